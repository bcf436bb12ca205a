// Badges server bootstrap for integration tests.

use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

use crate::app::App;
use crate::config::{Backend, Config};
use crate::shutdown::GracefulShutdown;

/// Whole application served on an ephemeral port.
pub struct BadgesServer {
    addr: String,
    app: App,
    shutdown_token: CancellationToken,
    graceful_shutdown: Arc<GracefulShutdown>,
}

impl BadgesServer {
    /// Starts the application; the backend base URL is rewritten to the bound address.
    pub async fn start(
        mut cfg: Config,
    ) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?.to_string();
        cfg.badges.backend = Some(Backend {
            base_url: format!("http://{addr}"),
        });

        let shutdown_token = CancellationToken::new();
        let app = App::new(shutdown_token.clone(), cfg)?;

        let graceful_shutdown = Arc::new(GracefulShutdown::new(shutdown_token.clone()));
        graceful_shutdown.add(1);
        app.serve_with_listener(listener, graceful_shutdown.clone());

        let server = Self {
            addr,
            app,
            shutdown_token,
            graceful_shutdown,
        };
        server.wait_alive().await?;
        Ok(server)
    }

    async fn wait_alive(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let health_url = format!("{}/healthcheck", self.base_url());
        let deadline = tokio::time::Instant::now() + Duration::from_secs(10);

        while tokio::time::Instant::now() < deadline {
            if let Ok(resp) = reqwest::get(&health_url).await {
                if resp.status().is_success() {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        Err("timed out waiting for badges server to become alive".into())
    }

    pub fn is_alive(&self) -> bool {
        self.app.is_alive()
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// External URL badges are served under.
    pub fn badges_url(&self) -> String {
        format!("{}/api/badges", self.base_url())
    }

    /// Stops the server and waits until the serving task has finished.
    pub async fn stop(self) {
        self.shutdown_token.cancel();
        let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
        while self.graceful_shutdown.pending() > 0 && tokio::time::Instant::now() < deadline {
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
    }
}
