//! Request timeout middleware.
//!
//! Runs inside the error formatting layer, so a timed out request gets the
//! same JSON error body as any other failure.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::time::Duration;
use tracing::warn;

use crate::http::error::ApiError;

pub struct RequestTimeoutMiddleware {
    timeout: Duration,
}

impl RequestTimeoutMiddleware {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

pub async fn request_timeout_middleware(
    State(timeout): State<Duration>,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();

    match tokio::time::timeout(timeout, next.run(request)).await {
        Ok(response) => response,
        Err(_) => {
            warn!(
                component = "http",
                event = "request_timeout",
                path = %path,
                timeout_ms = timeout.as_millis() as u64,
                "request timed out"
            );
            ApiError::Timeout.into_response()
        }
    }
}

impl crate::middleware::middleware::Middleware for RequestTimeoutMiddleware {
    fn apply(&self, router: axum::Router) -> axum::Router {
        router.layer(axum::middleware::from_fn_with_state(
            self.timeout,
            request_timeout_middleware,
        ))
    }
}
