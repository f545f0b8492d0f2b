//! User acceptance suite for the awesome Q/A tool.
//!
//! The suite drives a real Chrome instance against the running app through
//! [`qatool_browser_test`] and checks what a user sees: section titles and
//! tooltips, creating questions, revealing answers, the sidebar counter,
//! sorting, removal, and form validation.
//!
//! # Layout
//!
//! - [`pages`] -- page objects binding locators and user flows
//! - [`fixtures`] -- randomized, collision-free question/answer data
//! - [`counter`] -- sidebar counter sentence rendering and parsing
//! - [`assert`] -- soft assertions with a deferred verdict
//! - [`config`] and [`server`] -- where the app runs and how it starts
//! - [`error`], [`logger`], [`text`] -- plumbing shared by the scenarios
//!
//! The scenarios live in `tests/user_acceptance.rs`. They need a Chrome
//! binary and the app itself, so they are `#[ignore]`d by default:
//!
//! ```bash
//! QATOOL_SERVER_COMMAND="npm run start-server" \
//!     cargo test -p qatool-uat --test user_acceptance -- --ignored
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod assert;
pub mod config;
pub mod counter;
pub mod error;
pub mod fixtures;
pub mod logger;
pub mod pages;
pub mod server;
pub mod text;

pub use assert::SoftAssertions;
pub use config::SuiteConfig;
pub use error::{Result, UatError};
pub use fixtures::{PairGenerator, QuestionAnswerPair};
pub use pages::QuestionsPage;
pub use server::AppServer;
