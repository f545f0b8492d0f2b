//! Page objects for the app under test.
//!
//! One type per page: locators and user flows live together, so the
//! scenarios stay declarative and markup changes land in one file.

pub mod questions;

pub use questions::QuestionsPage;
