//! Browser lifecycle management.
//!
//! [`TestBrowser`] launches a Chrome process over the devtools protocol,
//! hands out pages, and makes sure the process dies with the test run.
//! Explicit [`close`](TestBrowser::close) is the graceful path; Drop is the
//! backstop that keeps panicking tests from leaking Chrome processes.

use crate::error::{BrowserError, Result};
use crate::page::Page;
use crate::wait::WaitConfig;
use chromiumoxide::browser::{Browser, BrowserConfig};
use futures::StreamExt;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// Launch options for a test browser.
#[derive(Debug, Clone)]
pub struct TestBrowserConfig {
    /// Run without a visible window (default: true).
    pub headless: bool,

    /// Browser window size in pixels (default: 1280x720).
    pub window_size: (u32, u32),

    /// Extra Chrome command-line arguments, appended after the defaults.
    pub args: Vec<String>,

    /// Chrome executable to launch; `None` auto-detects an installation.
    pub chrome_path: Option<String>,

    /// Wait policy handed to every page (and from there to every locator).
    pub default_wait: WaitConfig,
}

impl TestBrowserConfig {
    /// Creates the default headless configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Shows the browser window, for watching a scenario run locally.
    #[must_use]
    pub fn visible(mut self) -> Self {
        self.headless = false;
        self
    }

    /// Overrides the window size.
    #[must_use]
    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        self.window_size = (width, height);
        self
    }

    /// Appends extra Chrome arguments.
    #[must_use]
    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args.extend(args);
        self
    }

    /// Overrides the wait policy pages start out with.
    #[must_use]
    pub fn with_wait(mut self, wait: WaitConfig) -> Self {
        self.default_wait = wait;
        self
    }

    #[allow(clippy::result_large_err)]
    fn to_browser_config(&self) -> Result<BrowserConfig> {
        let mut builder = BrowserConfig::builder()
            .window_size(self.window_size.0, self.window_size.1);

        if !self.headless {
            builder = builder.with_head();
        }

        // A fresh profile directory per instance; sharing one trips
        // Chrome's ProcessSingleton lock when tests run in parallel.
        let profile = std::env::temp_dir().join(format!("qatool-browser-{}", uuid::Uuid::new_v4()));
        builder = builder.user_data_dir(&profile);

        for arg in &self.args {
            builder = builder.arg(arg.clone());
        }

        if let Some(path) = &self.chrome_path {
            builder = builder.chrome_executable(path.clone());
        }

        builder.build().map_err(|reason| BrowserError::LaunchFailed {
            reason,
            source: None,
        })
    }
}

impl Default for TestBrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            window_size: (1280, 720),
            args: vec![
                // Chrome's sandbox needs user namespaces, which CI
                // containers usually don't grant.
                "--no-sandbox".to_string(),
                // /dev/shm is tiny in containers; renderers crash without this.
                "--disable-dev-shm-usage".to_string(),
            ],
            chrome_path: None,
            default_wait: WaitConfig::default(),
        }
    }
}

/// A running Chrome instance under test control.
///
/// # Example
///
/// ```ignore
/// let browser = TestBrowser::launch(TestBrowserConfig::default()).await?;
/// let page = browser.new_page().await?;
/// page.navigate("http://localhost:8000").await?;
/// // ...
/// browser.close().await?;
/// ```
pub struct TestBrowser {
    inner: Arc<Mutex<Option<Browser>>>,
    default_wait: WaitConfig,
}

impl TestBrowser {
    /// Launches Chrome and connects to it.
    ///
    /// A background task drains the devtools event stream for the lifetime
    /// of the connection; without it no command ever completes.
    ///
    /// # Errors
    ///
    /// Returns `LaunchFailed` if Chrome is missing, not executable, or
    /// exits during startup.
    pub async fn launch(config: TestBrowserConfig) -> Result<Self> {
        debug!(?config, "launching browser");

        let default_wait = config.default_wait;
        let browser_config = config.to_browser_config()?;

        let (browser, mut handler) =
            Browser::launch(browser_config)
                .await
                .map_err(|e| BrowserError::LaunchFailed {
                    reason: "failed to launch Chrome process".to_string(),
                    source: Some(Box::new(e)),
                })?;

        tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    warn!(error = %e, "browser handler error");
                }
            }
        });

        debug!("browser ready");

        Ok(Self {
            inner: Arc::new(Mutex::new(Some(browser))),
            default_wait,
        })
    }

    /// Opens a new page (tab) with console capture running.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyClosed` after `close()`, or `ConnectionFailed` if
    /// the browser rejects the request.
    pub async fn new_page(&self) -> Result<Page> {
        let guard = self.inner.lock().await;
        let browser = guard.as_ref().ok_or(BrowserError::AlreadyClosed)?;

        let chrome_page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| BrowserError::ConnectionFailed(e.to_string()))?;

        Ok(Page::new(chrome_page, self.default_wait))
    }

    /// Shuts the browser down gracefully.
    ///
    /// # Errors
    ///
    /// Returns `ConnectionFailed` if Chrome does not acknowledge the close.
    pub async fn close(self) -> Result<()> {
        let mut guard = self.inner.lock().await;

        if let Some(mut browser) = guard.take() {
            debug!("closing browser");
            browser
                .close()
                .await
                .map_err(|e| BrowserError::ConnectionFailed(e.to_string()))?;
        }

        Ok(())
    }

    /// True once `close()` has run.
    pub async fn is_closed(&self) -> bool {
        self.inner.lock().await.is_none()
    }
}

impl Drop for TestBrowser {
    fn drop(&mut self) {
        // Dropping the inner Browser makes chromiumoxide kill the process,
        // so nothing leaks either way; the warning only fires when a test
        // skipped the graceful path.
        if let Ok(guard) = self.inner.try_lock() {
            if guard.is_some() {
                warn!("browser dropped without close(), Chrome will be killed forcefully");
            }
        }
    }
}
