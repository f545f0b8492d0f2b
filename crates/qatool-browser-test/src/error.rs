//! Error types for driver operations.
//!
//! Failures are grouped by where they occur in a test's lifecycle: launching
//! the browser, navigating, waiting, locating elements, and executing scripts.
//! Element lookups carry the selector that failed, so a timed-out test names
//! the exact part of the page that never appeared.

use std::time::Duration;
use thiserror::Error;

/// The error type for all browser driver operations.
///
/// Variants carry enough context to diagnose a failed run from the test
/// output alone; sources are chained where an underlying error exists.
#[derive(Debug, Error)]
pub enum BrowserError {
    /// The Chrome process could not be started.
    ///
    /// Usually Chrome/Chromium is not installed, or the executable path is
    /// wrong.
    #[error("failed to launch browser: {reason}")]
    LaunchFailed {
        /// Why the launch failed.
        reason: String,
        /// Underlying launch error, when one exists.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The DevTools connection was rejected or dropped.
    #[error("CDP connection failed: {0}")]
    ConnectionFailed(String),

    /// Navigation did not complete.
    #[error("navigation to '{url}' failed: {reason}")]
    NavigationFailed {
        /// The URL that failed to load.
        url: String,
        /// Why navigation failed.
        reason: String,
    },

    /// A wait condition was not satisfied in time.
    #[error("wait condition '{condition}' timed out after {timeout:?}")]
    WaitTimeout {
        /// Description of the condition that was polled.
        condition: String,
        /// How long the condition was polled.
        timeout: Duration,
    },

    /// No element matched a selector within the locator's timeout.
    ///
    /// This is the auto-wait failure for locator actions and single-element
    /// reads.
    #[error("no actionable element matched {selector} within {timeout:?}")]
    ElementNotFound {
        /// Rendered form of the selector that matched nothing.
        selector: String,
        /// How long the locator polled before giving up.
        timeout: Duration,
    },

    /// JavaScript evaluation in the page context failed.
    #[error("script execution failed: {0}")]
    ScriptExecutionFailed(String),

    /// An operation was attempted on a browser that is already closed.
    #[error("browser instance is already closed")]
    AlreadyClosed,

    /// Raw protocol error from chromiumoxide.
    #[error("chromiumoxide error: {0}")]
    ChromiumOxide(#[from] chromiumoxide::error::CdpError),
}

/// A specialized Result type for driver operations.
pub type Result<T> = std::result::Result<T, BrowserError>;
