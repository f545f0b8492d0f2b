//! Application server abstraction.
//!
//! The driver never starts servers itself; it consumes URLs from anything
//! implementing [`DevServer`]. Suite crates own the lifecycle (spawning,
//! health probing, shutdown) and implement this trait so `Page::navigate_to`
//! can fail fast when the app is down.

use crate::error::Result;
use async_trait::async_trait;

/// A running application server that pages can navigate to.
///
/// Object-safe so pages can take `&dyn DevServer`.
#[async_trait]
pub trait DevServer: Send + Sync {
    /// Base URL of the server, e.g. `http://localhost:8000`.
    fn base_url(&self) -> &str;

    /// Verifies the server is responsive.
    ///
    /// Called before navigation so a dead server produces its own error
    /// instead of a navigation timeout. The default assumes health.
    ///
    /// # Errors
    ///
    /// Implementations return an error when the server is unreachable.
    async fn health_check(&self) -> Result<()> {
        Ok(())
    }

    /// Joins a path onto the base URL.
    fn url(&self, path: &str) -> String {
        let base = self.base_url().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }
}
