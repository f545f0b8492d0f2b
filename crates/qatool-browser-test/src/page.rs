//! Page-level operations: navigation, script evaluation, and locators.

use crate::console::{ConsoleCapture, ConsoleMessage};
use crate::error::{BrowserError, Result};
use crate::locator::Locator;
use crate::selector::Selector;
use crate::server::DevServer;
use crate::wait::{wait_for_result, WaitConfig};
use chromiumoxide::cdp::browser_protocol::page::ReloadParams;
use chromiumoxide::cdp::js_protocol::runtime::EventConsoleApiCalled;
use chromiumoxide::page::Page as ChromePage;
use futures::StreamExt;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// A browser tab.
///
/// Wraps a devtools page connection and adds console capture, load waiting,
/// and the [`Locator`] factory. Created through `TestBrowser::new_page`.
#[derive(Debug)]
pub struct Page {
    inner: Arc<ChromePage>,
    console: ConsoleCapture,
    default_wait: WaitConfig,
    console_task: JoinHandle<()>,
}

impl Page {
    pub(crate) fn new(page: ChromePage, default_wait: WaitConfig) -> Self {
        let console = ConsoleCapture::new();
        let sink = console.clone();
        let inner = Arc::new(page);

        let listener = inner.clone();
        let console_task = tokio::spawn(async move {
            if let Ok(mut events) = listener.event_listener::<EventConsoleApiCalled>().await {
                while let Some(event) = events.next().await {
                    sink.push(ConsoleMessage::from_event(&event));
                }
            }
        });

        Self {
            inner,
            console,
            default_wait,
            console_task,
        }
    }

    /// Returns the console messages captured on this page so far.
    #[must_use]
    pub fn console(&self) -> &ConsoleCapture {
        &self.console
    }

    /// Creates a locator for `selector`, carrying this page's wait policy.
    #[must_use]
    pub fn locator(&self, selector: Selector) -> Locator {
        Locator::new(self.inner.clone(), selector, self.default_wait)
    }

    /// Shorthand for `locator(Selector::css(..))`.
    #[must_use]
    pub fn by_css(&self, css: impl Into<String>) -> Locator {
        self.locator(Selector::css(css))
    }

    /// Shorthand for `locator(Selector::text(..))`.
    #[must_use]
    pub fn by_text(&self, text: impl Into<String>) -> Locator {
        self.locator(Selector::text(text))
    }

    /// Shorthand for `locator(Selector::role(..))`.
    #[must_use]
    pub fn by_role(&self, role: impl Into<String>) -> Locator {
        self.locator(Selector::role(role))
    }

    /// Shorthand for `locator(Selector::role_named(..))`.
    #[must_use]
    pub fn by_role_named(&self, role: impl Into<String>, name: impl Into<String>) -> Locator {
        self.locator(Selector::role_named(role, name))
    }

    /// Navigates to an absolute URL and waits for the document to finish
    /// loading.
    ///
    /// # Errors
    ///
    /// Returns `NavigationFailed` if the load fails or times out.
    pub async fn navigate(&self, url: &str) -> Result<()> {
        debug!(url, "navigate");
        self.inner
            .goto(url)
            .await
            .map_err(|e| BrowserError::NavigationFailed {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        self.wait_for_load(self.default_wait).await
    }

    /// Navigates to a path on a dev server.
    ///
    /// Performs the server's health check first so a dead server fails fast
    /// with its own error instead of a navigation timeout.
    ///
    /// # Errors
    ///
    /// Returns the health check error, or `NavigationFailed`.
    pub async fn navigate_to(&self, server: &dyn DevServer, path: &str) -> Result<()> {
        server.health_check().await?;

        let url = server.url(path);
        self.navigate(&url).await
    }

    /// Reloads the page and waits for the fresh document to finish loading.
    ///
    /// A marker is planted on the old document first; waiting until the
    /// marker is gone distinguishes the new document from the old one, which
    /// would otherwise satisfy a bare `readyState` check before the reload
    /// has even started.
    ///
    /// # Errors
    ///
    /// Returns `WaitTimeout` if the new document never finished loading.
    pub async fn reload(&self) -> Result<()> {
        debug!("reload");
        self.inner
            .evaluate("window.__qatoolReloadPending = true")
            .await
            .map_err(|e| BrowserError::ScriptExecutionFailed(e.to_string()))?;

        self.inner.execute(ReloadParams::default()).await?;

        wait_for_result(
            || {
                let page = self.inner.clone();
                async move {
                    // Errors here are expected while the old context is torn
                    // down; the poll loop treats them as "not yet".
                    let result = page
                        .evaluate(
                            "window.__qatoolReloadPending !== true \
                             && document.readyState === 'complete'",
                        )
                        .await
                        .map_err(|e| BrowserError::ScriptExecutionFailed(e.to_string()))?;

                    Ok(result
                        .value()
                        .and_then(serde_json::Value::as_bool)
                        .unwrap_or(false))
                }
            },
            self.default_wait,
            "reload complete",
        )
        .await
    }

    /// Waits until `document.readyState` is `complete`.
    ///
    /// Called by `navigate()`; call it manually after triggering navigation
    /// from script.
    ///
    /// # Errors
    ///
    /// Returns `WaitTimeout` if the document never finished loading.
    pub async fn wait_for_load(&self, config: WaitConfig) -> Result<()> {
        wait_for_result(
            || {
                let page = self.inner.clone();
                async move {
                    let result = page
                        .evaluate("document.readyState")
                        .await
                        .map_err(|e| BrowserError::ScriptExecutionFailed(e.to_string()))?;

                    Ok(result
                        .value()
                        .and_then(|v| v.as_str())
                        .is_some_and(|s| s == "complete"))
                }
            },
            config,
            "document ready",
        )
        .await
    }

    /// Evaluates JavaScript in the page and deserializes the result.
    ///
    /// Prefer locators for anything element-shaped; this is the escape hatch
    /// for globals and one-off page state.
    ///
    /// # Errors
    ///
    /// Returns `ScriptExecutionFailed` if evaluation fails or the result
    /// does not deserialize as `T`.
    pub async fn evaluate<T>(&self, script: &str) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let result = self
            .inner
            .evaluate(script)
            .await
            .map_err(|e| BrowserError::ScriptExecutionFailed(e.to_string()))?;

        result
            .into_value()
            .map_err(|e| BrowserError::ScriptExecutionFailed(e.to_string()))
    }

    /// Returns the current URL.
    ///
    /// # Errors
    ///
    /// Returns an error if script execution fails.
    pub async fn url(&self) -> Result<String> {
        self.evaluate("window.location.href").await
    }

    /// Returns the document title.
    ///
    /// # Errors
    ///
    /// Returns an error if script execution fails.
    pub async fn title(&self) -> Result<String> {
        self.evaluate("document.title").await
    }

    /// Captures a PNG screenshot, for attaching to failure reports.
    ///
    /// # Errors
    ///
    /// Returns an error if capture fails.
    pub async fn screenshot(&self) -> Result<Vec<u8>> {
        self.inner
            .screenshot(chromiumoxide::page::ScreenshotParams::default())
            .await
            .map_err(|e| BrowserError::ScriptExecutionFailed(e.to_string()))
    }

    /// Closes the tab.
    ///
    /// Dropping the page also works (the tab dies with the browser); this
    /// just closes it eagerly.
    ///
    /// # Errors
    ///
    /// Returns an error if the close command fails.
    pub async fn close(self) -> Result<()> {
        // Stop the console listener so it releases its handle on the page.
        self.console_task.abort();

        match Arc::try_unwrap(self.inner) {
            Ok(page) => {
                page.close().await?;
                Ok(())
            }
            Err(_still_shared) => {
                // The aborted listener has not dropped its handle yet; the
                // tab is cleaned up when the browser closes.
                warn!("page close deferred, handle still shared");
                Ok(())
            }
        }
    }
}
