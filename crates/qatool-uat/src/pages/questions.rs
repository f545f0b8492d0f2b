//! Page object for the Q/A tool's question board.

use crate::assert::SoftAssertions;
use crate::counter::{parse_counter, render_counter};
use crate::error::{Result, UatError};
use crate::fixtures::QuestionAnswerPair;
use qatool_browser_test::{Locator, Page};

/// Question text of the seed question the app starts with.
pub const DEFAULT_QUESTION: &str = "How to add a question?";

/// Answer text of the seed question.
pub const DEFAULT_ANSWER: &str = "Just use the form below!";

/// Tooltip revealed by hovering the "Created questions" title.
pub const CREATED_QUESTIONS_TOOLTIP: &str =
    "Here you can find the created questions and their answers.";

/// Tooltip revealed by hovering the "Create a new question" title.
pub const CREATE_NEW_QUESTION_TOOLTIP: &str =
    "Here you can create new questions and their answers.";

/// Empty-state message shown when the question list is empty.
pub const NO_QUESTIONS_TEXT: &str = "No questions yet :-(";

/// Question field capacity assumed when the input declares no `maxlength`.
pub const QUESTION_CAPACITY_FALLBACK: usize = 255;

/// Answer field capacity assumed when the input declares no `maxlength`.
pub const ANSWER_CAPACITY_FALLBACK: usize = 500;

/// The question board, one locator per element the scenarios touch.
///
/// Locators re-resolve on every use, so a handle created here stays valid
/// across re-renders, removals and re-creations.
#[derive(Debug, Clone)]
pub struct QuestionsPage {
    /// Page-level heading.
    pub header_title: Locator,
    /// "Created questions" section title.
    pub created_questions_title: Locator,
    /// Tooltip on the created-questions title.
    pub created_questions_tooltip: Locator,
    /// Every entry in the question list.
    pub questions_list_items: Locator,
    /// Question line of every list entry.
    pub question_texts: Locator,
    /// Answer paragraph of every list entry.
    pub answer_texts: Locator,
    /// Sorts the list alphabetically.
    pub sort_questions_button: Locator,
    /// Empties the list.
    pub remove_questions_button: Locator,
    /// "Create a new question" section title.
    pub create_new_question_title: Locator,
    /// Tooltip on the create-a-new-question title.
    pub create_new_question_tooltip: Locator,
    /// Question form field.
    pub question_input: Locator,
    /// Answer form field.
    pub answer_input: Locator,
    /// Submits the creation form.
    pub create_question_button: Locator,
    /// Sidebar element carrying the question-counter sentence.
    pub sidebar_counter: Locator,
    /// Empty-state message element.
    pub no_questions_message: Locator,
}

impl QuestionsPage {
    /// Binds locators for every element on `page`.
    #[must_use]
    pub fn new(page: &Page) -> Self {
        Self {
            header_title: page.by_role_named("heading", "The awesome Q/A tool"),
            created_questions_title: page.by_role_named("heading", "Created questions"),
            created_questions_tooltip: page.by_text(CREATED_QUESTIONS_TOOLTIP),
            questions_list_items: page.by_role("listitem"),
            question_texts: page.by_css("li div.question__question"),
            answer_texts: page.by_css("li p.question__answer"),
            sort_questions_button: page.by_role_named("button", "Sort questions"),
            remove_questions_button: page.by_role_named("button", "Remove questions"),
            create_new_question_title: page.by_role_named("heading", "Create a new question"),
            create_new_question_tooltip: page.by_text(CREATE_NEW_QUESTION_TOOLTIP),
            question_input: page.by_role_named("textbox", "question"),
            answer_input: page.by_role_named("textbox", "answer"),
            create_question_button: page.by_role_named("button", "Create question"),
            sidebar_counter: page.by_css(r#"[class="sidebar"]"#),
            no_questions_message: page.by_text(NO_QUESTIONS_TEXT),
        }
    }

    /// Fills the form with `question` and `answer` and submits it.
    ///
    /// # Errors
    ///
    /// Returns a driver error if a form element never became actionable.
    pub async fn create_question(&self, question: &str, answer: &str) -> Result<()> {
        self.question_input.fill(question).await?;
        self.answer_input.fill(answer).await?;
        self.create_question_button.click().await?;

        Ok(())
    }

    /// Creates every pair in order, one form submission each.
    ///
    /// # Errors
    ///
    /// Returns the first driver error; later pairs are not attempted.
    pub async fn create_multiple(&self, pairs: &[QuestionAnswerPair]) -> Result<()> {
        for pair in pairs {
            self.create_question(&pair.question, &pair.answer).await?;
        }

        Ok(())
    }

    /// Reads the current question count out of the sidebar sentence.
    ///
    /// # Errors
    ///
    /// Returns `CounterParse` if the sidebar text carries no readable
    /// count, or a driver error if the sidebar cannot be read at all.
    pub async fn counter_value(&self) -> Result<u64> {
        let text = self.sidebar_counter.inner_text().await?;

        parse_counter(&text)
    }

    /// Soft-asserts that the sidebar announces `expected` questions.
    ///
    /// Waits for the sidebar to settle on the expected sentence, so a check
    /// right after a mutation does not race the re-render. The verdict is
    /// recorded on `soft` either way.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for a negative expectation. A wrong
    /// sidebar sentence is a soft failure, not an error.
    pub async fn assert_counter(&self, soft: &mut SoftAssertions, expected: i64) -> Result<()> {
        let expected = u64::try_from(expected).map_err(|_| {
            UatError::InvalidArgument(format!(
                "expected question count cannot be negative, got {expected}"
            ))
        })?;
        let expected_text = render_counter(expected);

        if self.sidebar_counter.wait_text(&expected_text).await.is_ok() {
            return Ok(());
        }

        match self.sidebar_counter.inner_text().await {
            Ok(actual) => {
                soft.check_eq(actual.trim().to_string(), expected_text, "sidebar counter");
            }
            Err(error) => soft.check(false, &format!("sidebar counter unreadable: {error}")),
        }

        Ok(())
    }
}
