//! Request tracing middleware.

use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Opens a span per request and logs the response status and latency.
pub struct RequestTraceMiddleware;

impl RequestTraceMiddleware {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RequestTraceMiddleware {
    fn default() -> Self {
        Self::new()
    }
}

impl crate::middleware::middleware::Middleware for RequestTraceMiddleware {
    fn apply(&self, router: axum::Router) -> axum::Router {
        router.layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
        )
    }
}
