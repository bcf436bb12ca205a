// HTTP server wiring for the badges application.

use anyhow::Result;
use axum::Router;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::warn;

use super::services::Services;
use crate::config::{Config, ConfigTrait};
use crate::controller::{self, Addressing, EntityResolver};
use crate::http::{Controller, Middleware};

/// HTTP server implementation that wraps all dependencies.
pub struct HttpServer {
    server: Arc<crate::http::HttpServer>,
    is_server_alive: Arc<AtomicBool>,
}

impl HttpServer {
    /// Creates a new HttpServer with all controllers and middlewares.
    pub fn new(ctx: CancellationToken, cfg: Config, services: Services) -> Result<Self> {
        let controllers = Self::controllers(&cfg, &services);
        let middlewares = Self::middlewares(&cfg);
        let server = crate::http::HttpServer::new(ctx, cfg, controllers, middlewares)?;

        Ok(Self {
            server,
            is_server_alive: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Builds the layered router without binding a socket.
    pub fn make_router(cfg: &Config, services: &Services) -> Result<Router> {
        let server = crate::http::HttpServer::new(
            CancellationToken::new(),
            cfg.clone(),
            Self::controllers(cfg, services),
            Self::middlewares(cfg),
        )?;
        Ok(server.router())
    }

    /// Returns true if the server is marked as alive.
    pub fn is_alive(&self) -> bool {
        self.is_server_alive.load(Ordering::Relaxed)
    }

    /// Starts the HTTP server on the configured port (blocking call).
    pub async fn listen_and_serve(&self) -> Result<()> {
        self.is_server_alive.store(true, Ordering::Relaxed);
        let result = self.server.listen_and_serve().await;
        self.is_server_alive.store(false, Ordering::Relaxed);
        result
    }

    /// Serves on an already bound listener (blocking call).
    pub async fn serve(&self, listener: TcpListener) -> Result<()> {
        self.is_server_alive.store(true, Ordering::Relaxed);
        let result = self.server.serve(listener).await;
        self.is_server_alive.store(false, Ordering::Relaxed);
        result
    }

    /// Returns all HTTP controllers for the server.
    ///
    /// Obfuscated mode serves badges by hash only, so entity coordinates never
    /// appear in public badge URLs.
    fn controllers(cfg: &Config, services: &Services) -> Vec<Box<dyn Controller>> {
        let catalog_token = cfg.catalog().and_then(|c| c.token.clone());
        let resolver = Arc::new(EntityResolver::new(
            services.catalog.clone(),
            services.discovery.clone(),
            cfg.salt().map(str::to_string),
            catalog_token,
        ));

        let obfuscation_salt = cfg.salt().filter(|_| cfg.is_obfuscated());
        if cfg.is_obfuscated() && obfuscation_salt.is_none() {
            warn!(
                component = "server",
                event = "obfuscation_disabled",
                "obfuscation requested without a salt, serving badges by coordinates"
            );
        }
        let addressing = match obfuscation_salt {
            Some(_) => Addressing::Hash,
            None => Addressing::Coordinates,
        };

        let mut controllers: Vec<Box<dyn Controller>> = vec![
            // Healthcheck probe endpoint
            Box::new(controller::HealthcheckController::new()),
            // Metrics endpoint
            Box::new(controller::PrometheusMetricsController::new()),
            // Lists badge specs of an entity
            Box::new(controller::BadgeSpecsController::new(
                resolver.clone(),
                services.badge_builder.clone(),
                services.app.clone(),
                addressing,
            )),
            // Serves a single badge as svg or json
            Box::new(controller::BadgeController::new(
                resolver,
                services.badge_builder.clone(),
                services.app.clone(),
                addressing,
            )),
        ];

        if let Some(salt) = obfuscation_salt {
            // Issues entity hashes to authenticated callers
            controllers.push(Box::new(controller::ObfuscateController::new(
                services.identity.clone(),
                salt,
            )));
        }

        controllers
    }

    /// Returns the request middlewares; the first one is outermost.
    fn middlewares(cfg: &Config) -> Vec<Box<dyn Middleware>> {
        vec![
            Box::new(crate::middleware::RequestTraceMiddleware::new()),
            Box::new(crate::middleware::ErrorFormatMiddleware::new()),
            Box::new(crate::middleware::RequestTimeoutMiddleware::new(
                cfg.api_timeout(),
            )),
            Box::new(crate::middleware::PanicRecoverMiddleware::new()),
        ]
    }
}
