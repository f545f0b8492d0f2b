//! Sidebar counter sentence rendering and parsing.
//!
//! The sidebar reports how many questions exist as a full sentence with an
//! irregular zero form. [`render_counter`] produces the sentence expected
//! for a count; [`parse_counter`] reads a count back out of whatever the
//! sidebar currently shows.

use crate::error::{Result, UatError};
use once_cell::sync::Lazy;
use regex::Regex;

/// Sentence the sidebar shows when no questions exist.
pub const EMPTY_COUNTER_TEXT: &str =
    "Here you can find no questions. Feel free to create your own questions!";

/// Wording that distinguishes the digitless zero form from arbitrary text.
const ZERO_MARKER: &str = "no questions";

static FIRST_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").expect("digit pattern compiles"));

/// Renders the sidebar sentence for `count` questions.
#[must_use]
pub fn render_counter(count: u64) -> String {
    match count {
        0 => EMPTY_COUNTER_TEXT.to_string(),
        1 => "Here you can find 1 question. Feel free to create your own questions!".to_string(),
        n => format!("Here you can find {n} questions. Feel free to create your own questions!"),
    }
}

/// Reads the question count back out of a sidebar sentence.
///
/// The first run of digits wins; a digitless sentence still parses as zero
/// when it carries the "no questions" wording.
///
/// # Errors
///
/// Returns `CounterParse` if the text contains neither digits nor the zero
/// wording.
pub fn parse_counter(text: &str) -> Result<u64> {
    if let Some(found) = FIRST_NUMBER.find(text) {
        return found.as_str().parse().map_err(|_| UatError::CounterParse {
            text: text.to_string(),
        });
    }

    if text.contains(ZERO_MARKER) {
        return Ok(0);
    }

    Err(UatError::CounterParse {
        text: text.to_string(),
    })
}
