// Main badges application implementation.

use anyhow::Result;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::shutdown::GracefulShutdown;

use super::server::HttpServer;
use super::services::Services;

/// Encapsulates the entire application state.
#[derive(Clone)]
pub struct App {
    shutdown_token: CancellationToken,
    server: Arc<HttpServer>,
}

impl App {
    /// Creates a new application with collaborators built from configuration.
    pub fn new(shutdown_token: CancellationToken, cfg: Config) -> Result<Self> {
        let services = Services::from_config(&cfg)?;
        Self::with_services(shutdown_token, cfg, services)
    }

    /// Creates a new application around the given collaborators.
    pub fn with_services(
        shutdown_token: CancellationToken,
        cfg: Config,
        services: Services,
    ) -> Result<Self> {
        let server = Arc::new(HttpServer::new(shutdown_token.clone(), cfg, services)?);
        Ok(Self {
            shutdown_token,
            server,
        })
    }

    /// Serves on the configured port in the background, signalling `gsh` when stopped.
    pub fn serve(&self, gsh: Arc<GracefulShutdown>) {
        self.spawn(None, gsh);
    }

    /// Serves on an already bound listener in the background.
    pub fn serve_with_listener(&self, listener: TcpListener, gsh: Arc<GracefulShutdown>) {
        self.spawn(Some(listener), gsh);
    }

    fn spawn(&self, listener: Option<TcpListener>, gsh: Arc<GracefulShutdown>) {
        let app = self.clone();

        tokio::task::spawn(async move {
            let result = match listener {
                Some(listener) => app.server.serve(listener).await,
                None => app.server.listen_and_serve().await,
            };
            if let Err(e) = result {
                error!(
                    component = "app",
                    scope = "server",
                    event = "serve_failed",
                    error = %e,
                    "server failed to serve"
                );
            }

            app.close();
            gsh.done();
        });

        info!(component = "app", event = "started", "application lifecycle");
    }

    /// Checks whether the HTTP server is still alive.
    pub fn is_alive(&self) -> bool {
        if !self.server.is_alive() {
            warn!(
                component = "app",
                scope = "http_server",
                event = "gone_away",
                "http server has gone away"
            );
            return false;
        }
        true
    }

    /// Cancels everything tied to the application token.
    pub fn close(&self) {
        self.shutdown_token.cancel();
        info!(component = "app", event = "stopped", "application lifecycle");
    }
}
