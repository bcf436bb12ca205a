// Healthcheck probe controller.

use axum::{http::StatusCode, response::IntoResponse, routing::get, Router};

use crate::http::Controller;

pub const HEALTHCHECK_PATH: &str = "/healthcheck";

const SUCCESS_RESPONSE: &str = r#"{
  "status": 200,
  "message": "ok"
}"#;

/// HealthcheckController answers liveness probes.
#[derive(Clone, Default)]
pub struct HealthcheckController;

impl HealthcheckController {
    pub fn new() -> Self {
        Self
    }

    async fn probe() -> impl IntoResponse {
        (
            StatusCode::OK,
            [("content-type", "application/json")],
            SUCCESS_RESPONSE,
        )
    }
}

impl Controller for HealthcheckController {
    fn add_route(&self, router: Router) -> Router {
        router.route(HEALTHCHECK_PATH, get(Self::probe))
    }
}
