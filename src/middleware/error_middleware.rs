//! Error formatting middleware.
//!
//! Handlers return `ApiError`, which only knows its own status and message.
//! This layer completes the body with the method and URL of the request.

use axum::{extract::Request, middleware::Next, response::Response};

use crate::http::error::ErrorReport;

pub struct ErrorFormatMiddleware;

impl ErrorFormatMiddleware {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ErrorFormatMiddleware {
    fn default() -> Self {
        Self::new()
    }
}

pub async fn error_format_middleware(request: Request, next: Next) -> Response {
    let method = request.method().to_string();
    let url = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());

    let mut response = next.run(request).await;

    match response.extensions_mut().remove::<ErrorReport>() {
        Some(report) => report.render(Some((&method, &url))),
        None => response,
    }
}

impl crate::middleware::middleware::Middleware for ErrorFormatMiddleware {
    fn apply(&self, router: axum::Router) -> axum::Router {
        router.layer(axum::middleware::from_fn(error_format_middleware))
    }
}
