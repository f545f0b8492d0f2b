//! Console message capture.
//!
//! Each page records everything the app writes through the `console` API so
//! tests can assert on it afterwards (most often: no errors). Messages are
//! accumulated in arrival order behind an `Arc<Mutex<Vec<_>>>`; tests query
//! the buffer repeatedly and care about order, and the volumes involved make
//! channel plumbing pointless.

use chromiumoxide::cdp::js_protocol::runtime::{ConsoleApiCalledType, EventConsoleApiCalled};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use std::time::SystemTime;

/// Severity of a console message, mirroring the JavaScript `console` methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConsoleLevel {
    /// `console.log()`
    Log,
    /// `console.info()`
    Info,
    /// `console.warn()`
    Warning,
    /// `console.error()`
    Error,
    /// `console.debug()`
    Debug,
    /// Anything else (`console.table()`, `console.trace()`, ...).
    Other,
}

impl ConsoleLevel {
    /// True for error-level messages.
    #[must_use]
    pub fn is_error(self) -> bool {
        matches!(self, ConsoleLevel::Error)
    }
}

impl From<ConsoleApiCalledType> for ConsoleLevel {
    fn from(kind: ConsoleApiCalledType) -> Self {
        match kind {
            ConsoleApiCalledType::Log => ConsoleLevel::Log,
            ConsoleApiCalledType::Info => ConsoleLevel::Info,
            ConsoleApiCalledType::Warning => ConsoleLevel::Warning,
            ConsoleApiCalledType::Error => ConsoleLevel::Error,
            ConsoleApiCalledType::Debug => ConsoleLevel::Debug,
            _ => ConsoleLevel::Other,
        }
    }
}

/// One captured console message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsoleMessage {
    /// Severity level.
    pub level: ConsoleLevel,

    /// Formatted message text; multiple arguments are joined with spaces.
    pub text: String,

    /// Capture time (host clock, not page time).
    pub timestamp: SystemTime,

    /// Source location when the protocol supplied one, as `url:line:column`.
    pub source: Option<String>,
}

impl ConsoleMessage {
    /// Creates a message without a source location.
    #[must_use]
    pub fn new(level: ConsoleLevel, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
            timestamp: SystemTime::now(),
            source: None,
        }
    }

    /// Converts a devtools `Runtime.consoleAPICalled` event.
    ///
    /// String arguments are taken verbatim; other primitives are rendered as
    /// JSON so `console.log(42, true)` captures as `"42 true"`. Arguments
    /// only available by remote reference come through as `<object>`.
    pub(crate) fn from_event(event: &EventConsoleApiCalled) -> Self {
        let text = event
            .args
            .iter()
            .map(|arg| match &arg.value {
                Some(serde_json::Value::String(s)) => s.clone(),
                Some(other) => other.to_string(),
                None => "<object>".to_string(),
            })
            .collect::<Vec<_>>()
            .join(" ");

        let source = event
            .stack_trace
            .as_ref()
            .and_then(|stack| stack.call_frames.first())
            .map(|frame| format!("{}:{}:{}", frame.url, frame.line_number, frame.column_number));

        Self {
            level: ConsoleLevel::from(event.r#type.clone()),
            text,
            timestamp: SystemTime::now(),
            source,
        }
    }
}

/// Thread-safe accumulator shared between the capture task and test code.
///
/// Cloning is cheap (it clones the `Arc`); all clones observe the same
/// buffer.
#[derive(Debug, Clone, Default)]
pub struct ConsoleCapture {
    messages: Arc<Mutex<Vec<ConsoleMessage>>>,
}

impl ConsoleCapture {
    /// Creates an empty capture buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a message.
    ///
    /// If the mutex is poisoned a panic is already unwinding somewhere and
    /// the test has failed; the message is dropped rather than compounding
    /// the failure.
    pub(crate) fn push(&self, message: ConsoleMessage) {
        if let Ok(mut messages) = self.messages.lock() {
            messages.push(message);
        }
    }

    /// Returns a snapshot of every captured message, in arrival order.
    #[must_use]
    pub fn messages(&self) -> Vec<ConsoleMessage> {
        self.messages
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    /// Returns the messages at one severity level.
    #[must_use]
    pub fn by_level(&self, level: ConsoleLevel) -> Vec<ConsoleMessage> {
        self.messages()
            .into_iter()
            .filter(|m| m.level == level)
            .collect()
    }

    /// Returns all error-level messages.
    #[must_use]
    pub fn errors(&self) -> Vec<ConsoleMessage> {
        self.by_level(ConsoleLevel::Error)
    }

    /// Counts error-level messages without cloning the buffer.
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.messages
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .iter()
            .filter(|m| m.level.is_error())
            .count()
    }

    /// True if any error-level message was captured.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    /// Discards all captured messages.
    ///
    /// Useful when one page navigates through several scenarios and each
    /// should start from a clean slate.
    pub fn clear(&self) {
        if let Ok(mut messages) = self.messages.lock() {
            messages.clear();
        }
    }

    /// Total number of captured messages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .len()
    }

    /// True if nothing has been captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
