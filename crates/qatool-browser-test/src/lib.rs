//! # qatool-browser-test
//!
//! A headless-Chrome driver for UI acceptance tests, built on chromiumoxide.
//!
//! The crate launches Chrome, opens pages, and exposes auto-waiting
//! [`Locator`] handles so tests describe *what* they interact with while the
//! driver absorbs *when* it becomes interactable. It knows nothing about any
//! particular application; suite crates layer page objects on top.
//!
//! ## Architecture
//!
//! - [`TestBrowser`]: process lifecycle and page creation
//! - [`Page`]: navigation, reload, script evaluation, console capture
//! - [`Selector`] / [`Locator`]: element selection and auto-waiting
//!   interaction
//! - [`DevServer`]: seam for the application server the suite manages
//! - [`WaitConfig`]: timeout and poll cadence shared by every wait
//!
//! ## Example
//!
//! ```ignore
//! use qatool_browser_test::{Selector, TestBrowser, TestBrowserConfig};
//!
//! #[tokio::test]
//! async fn heading_is_shown() -> Result<(), Box<dyn std::error::Error>> {
//!     let browser = TestBrowser::launch(TestBrowserConfig::default()).await?;
//!     let page = browser.new_page().await?;
//!
//!     page.navigate("http://localhost:8000").await?;
//!     let heading = page.locator(Selector::role_named("heading", "Questions"));
//!     assert_eq!(heading.inner_text().await?, "Questions");
//!
//!     assert_eq!(page.console().error_count(), 0);
//!     browser.close().await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Interaction model
//!
//! Locator actions re-resolve the selector on every poll and perform the
//! presence check and the action inside a single script evaluation, so a
//! re-render between "found it" and "clicked it" cannot invalidate the
//! element. Reads that return collections never wait; probes report current
//! state and have `wait_*` counterparts that poll.
//!
//! ## Testing strategy
//!
//! Unit tests cover the pure parts (script builders, selectors, waits,
//! console filtering). Integration tests in `tests/` drive a real Chrome
//! against data-URL fixtures and are `#[ignore]`d by default; run them with
//! `cargo test -- --ignored` where Chrome is installed.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod browser;
pub mod console;
pub mod error;
pub mod locator;
pub mod page;
pub mod selector;
pub mod server;
pub mod wait;

pub use browser::{TestBrowser, TestBrowserConfig};
pub use console::{ConsoleCapture, ConsoleLevel, ConsoleMessage};
pub use error::{BrowserError, Result};
pub use locator::Locator;
pub use page::Page;
pub use selector::Selector;
pub use server::DevServer;
pub use wait::{WaitConfig, DEFAULT_POLL_INTERVAL, DEFAULT_TIMEOUT};
