// Middleware interface used by the HTTP server.

use axum::Router;

/// Wraps the router with a layer.
pub trait Middleware: Send + Sync {
    fn apply(&self, router: Router) -> Router;
}
