//! Panic recovery middleware.
//

use axum::{extract::Request, middleware::Next, response::IntoResponse, response::Response};
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::error;

use crate::http::error::ApiError;

/// Global panic counter.
static PANICS_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Gets the current panic counter value.
pub fn panics_counter() -> u64 {
    PANICS_COUNTER.load(Ordering::Relaxed)
}

fn inc_panics() {
    PANICS_COUNTER.fetch_add(1, Ordering::Relaxed);
    crate::controller::metrics::inc_error("panic");
}

/// PanicRecoverMiddleware turns a panicking handler into a 500 response.
pub struct PanicRecoverMiddleware;

impl PanicRecoverMiddleware {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PanicRecoverMiddleware {
    fn default() -> Self {
        Self::new()
    }
}

pub async fn panic_recover_middleware(request: Request, next: Next) -> Response {
    let path = request.uri().path().to_string();

    match AssertUnwindSafe(next.run(request)).catch_unwind().await {
        Ok(response) => response,
        Err(panic) => {
            inc_panics();
            let reason = panic
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| panic.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());

            error!(
                component = "http",
                event = "panic_recovered",
                path = %path,
                reason = %reason,
                "handler panicked"
            );

            ApiError::Other(anyhow::anyhow!("internal server error")).into_response()
        }
    }
}

impl crate::middleware::middleware::Middleware for PanicRecoverMiddleware {
    fn apply(&self, router: axum::Router) -> axum::Router {
        router.layer(axum::middleware::from_fn(panic_recover_middleware))
    }
}
