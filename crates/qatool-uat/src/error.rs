//! Suite-level error type.
//!
//! Driver failures ([`BrowserError`]) pass through via `From`; everything
//! the suite itself can get wrong has its own variant.

use qatool_browser_test::BrowserError;
use thiserror::Error;

/// Errors produced by the acceptance suite.
#[derive(Debug, Error)]
pub enum UatError {
    /// A caller passed a value the operation cannot work with.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The sidebar text did not contain a readable question count.
    #[error("no question count found in sidebar text {text:?}")]
    CounterParse {
        /// The sidebar text that failed to parse.
        text: String,
    },

    /// The application under test could not be started or reached.
    #[error("app server unavailable: {0}")]
    Server(String),

    /// The suite configuration could not be loaded.
    #[error("configuration error: {0}")]
    Config(#[from] figment::Error),

    /// A browser driver operation failed.
    #[error(transparent)]
    Browser(#[from] BrowserError),

    /// One or more recorded soft assertions failed.
    #[error("{} soft assertion(s) failed:\n{}", failures.len(), failures.join("\n"))]
    SoftAssertionsFailed {
        /// The individual failure messages, in recording order.
        failures: Vec<String>,
    },
}

/// Convenience alias for suite operations.
pub type Result<T> = std::result::Result<T, UatError>;
