//! Bounded polling for conditions that become true asynchronously.
//!
//! Everything a browser test waits on (the document finishing a load, a
//! tooltip appearing, a counter reaching a value) reduces to polling a
//! predicate until it holds or a deadline passes. `wait_for` and
//! `wait_for_result` are those loops; [`WaitConfig`] carries the deadline and
//! the poll cadence.

use crate::error::{BrowserError, Result};
use std::future::Future;
use std::time::{Duration, Instant};
use tokio::time::sleep;

/// Default deadline for wait operations (30 seconds).
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default interval between condition checks (100 milliseconds).
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Timeout and poll cadence for one wait loop.
#[derive(Debug, Clone, Copy)]
pub struct WaitConfig {
    /// Give up after this much time.
    pub timeout: Duration,

    /// Re-check the condition this often.
    pub poll_interval: Duration,
}

impl WaitConfig {
    /// Creates a config from an explicit timeout and poll interval.
    #[must_use]
    pub fn new(timeout: Duration, poll_interval: Duration) -> Self {
        Self {
            timeout,
            poll_interval,
        }
    }

    /// Creates a config with a custom timeout and the default poll interval.
    #[must_use]
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::new(timeout, DEFAULT_POLL_INTERVAL)
    }
}

impl Default for WaitConfig {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT, DEFAULT_POLL_INTERVAL)
    }
}

/// Polls `condition` until it returns true or the timeout expires.
///
/// `description` names the condition in the [`BrowserError::WaitTimeout`]
/// produced on expiry.
///
/// # Errors
///
/// Returns `WaitTimeout` if the condition never held within the timeout.
pub async fn wait_for<F, Fut>(condition: F, config: WaitConfig, description: &str) -> Result<()>
where
    F: Fn() -> Fut,
    Fut: Future<Output = bool>,
{
    let start = Instant::now();

    loop {
        if condition().await {
            return Ok(());
        }

        if start.elapsed() >= config.timeout {
            return Err(BrowserError::WaitTimeout {
                condition: description.to_string(),
                timeout: config.timeout,
            });
        }

        sleep(config.poll_interval).await;
    }
}

/// Polls a fallible condition until it returns `Ok(true)`.
///
/// An `Err` from the condition counts as "not yet": during navigation the
/// execution context disappears mid-check, and the next poll usually
/// succeeds. Only the deadline turns persistent failure into an error.
///
/// # Errors
///
/// Returns `WaitTimeout` if the condition never returned `Ok(true)` within
/// the timeout.
pub async fn wait_for_result<F, Fut>(
    condition: F,
    config: WaitConfig,
    description: &str,
) -> Result<()>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<bool>>,
{
    let start = Instant::now();

    loop {
        if let Ok(true) = condition().await {
            return Ok(());
        }

        if start.elapsed() >= config.timeout {
            return Err(BrowserError::WaitTimeout {
                condition: description.to_string(),
                timeout: config.timeout,
            });
        }

        sleep(config.poll_interval).await;
    }
}
