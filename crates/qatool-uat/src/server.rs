//! App server lifecycle for suite runs.
//!
//! A run needs the Q/A tool answering at the configured base URL. If
//! something is already listening there it is reused as-is; otherwise the
//! configured command is spawned and polled until it answers.

use crate::config::SuiteConfig;
use crate::error::{Result, UatError};
use async_trait::async_trait;
use qatool_browser_test::{BrowserError, DevServer};
use std::process::Stdio;
use std::time::{Duration, Instant};
use tokio::process::{Child, Command};
use tracing::{debug, info};

const PROBE_INTERVAL: Duration = Duration::from_millis(100);
const PROBE_TIMEOUT: Duration = Duration::from_secs(2);

/// The application under test, reachable over HTTP.
#[derive(Debug)]
pub struct AppServer {
    base_url: String,
    client: reqwest::Client,
    child: Option<Child>,
}

impl AppServer {
    /// Makes the app reachable: reuses a running server, or spawns
    /// `server_command` and waits for it to answer.
    ///
    /// A spawned process is killed when this handle drops. A reused server
    /// is left alone.
    ///
    /// # Errors
    ///
    /// Returns `Server` if nothing is listening and no command is
    /// configured, if spawning fails, or if the server never answered
    /// within the startup timeout.
    pub async fn start(config: &SuiteConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(PROBE_TIMEOUT)
            .build()
            .map_err(|e| UatError::Server(format!("probe client: {e}")))?;

        let mut server = Self {
            base_url: config.base_url.clone(),
            client,
            child: None,
        };

        if server.answers().await {
            info!(base_url = %server.base_url, "reusing running app server");
            return Ok(server);
        }

        let Some(command) = config.server_command.as_deref() else {
            return Err(UatError::Server(format!(
                "nothing is listening at {} and no server command is configured",
                server.base_url
            )));
        };

        info!(%command, "starting app server");
        let child = Command::new("sh")
            .arg("-c")
            .arg(command)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| UatError::Server(format!("failed to spawn {command:?}: {e}")))?;
        server.child = Some(child);

        server
            .wait_until_ready(Duration::from_secs(config.startup_timeout_secs))
            .await?;

        Ok(server)
    }

    /// Reports whether this handle owns a spawned process, as opposed to
    /// reusing an external server.
    #[must_use]
    pub fn is_managed(&self) -> bool {
        self.child.is_some()
    }

    async fn wait_until_ready(&self, timeout: Duration) -> Result<()> {
        let start = Instant::now();

        loop {
            if self.answers().await {
                debug!(elapsed = ?start.elapsed(), "app server is up");
                return Ok(());
            }

            if start.elapsed() >= timeout {
                return Err(UatError::Server(format!(
                    "{} did not answer within {timeout:?}",
                    self.base_url
                )));
            }

            tokio::time::sleep(PROBE_INTERVAL).await;
        }
    }

    async fn answers(&self) -> bool {
        match self.client.get(&self.base_url).send().await {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }
}

#[async_trait]
impl DevServer for AppServer {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn health_check(&self) -> qatool_browser_test::Result<()> {
        if self.answers().await {
            Ok(())
        } else {
            Err(BrowserError::ConnectionFailed(format!(
                "app server at {} stopped answering",
                self.base_url
            )))
        }
    }
}
