//! Small text helpers shared by the scenarios.

use crate::fixtures::QuestionAnswerPair;

/// Trims surrounding whitespace from every entry, preserving order.
///
/// List items read off the page carry the indentation of their markup;
/// comparisons against generated fixtures want none of it.
#[must_use]
pub fn trim_all(texts: &[String]) -> Vec<String> {
    texts.iter().map(|text| text.trim().to_string()).collect()
}

/// Projects the question strings out of a fixture batch, preserving order.
#[must_use]
pub fn project_questions(pairs: &[QuestionAnswerPair]) -> Vec<String> {
    pairs.iter().map(|pair| pair.question.clone()).collect()
}
