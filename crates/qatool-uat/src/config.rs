//! Suite configuration.
//!
//! Defaults suit a local checkout. Everything can be overridden through
//! `QATOOL_`-prefixed environment variables: `QATOOL_BASE_URL`,
//! `QATOOL_HEADLESS`, `QATOOL_SERVER_COMMAND` and
//! `QATOOL_STARTUP_TIMEOUT_SECS`.

use crate::error::Result;
use figment::providers::{Env, Serialized};
use figment::Figment;
use serde::{Deserialize, Serialize};

/// Settings for one suite run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteConfig {
    /// Where the app under test is (or will be) served.
    pub base_url: String,
    /// Run the browser without a window. Set to `false` to watch a run.
    pub headless: bool,
    /// Shell command that starts the app server. Leave unset to use a
    /// server that is already running at `base_url`.
    pub server_command: Option<String>,
    /// How long to wait for the app server to answer after spawning it.
    pub startup_timeout_secs: u64,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            headless: true,
            server_command: None,
            startup_timeout_secs: 30,
        }
    }
}

impl SuiteConfig {
    /// Loads the configuration: defaults first, environment on top.
    ///
    /// # Errors
    ///
    /// Returns `Config` if an override fails to parse into its field type.
    pub fn load() -> Result<Self> {
        let config = Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Env::prefixed("QATOOL_"))
            .extract()?;

        Ok(config)
    }
}
