//! Request errors and their JSON representation.

use axum::{
    extract::rejection::{PathRejection, QueryRejection},
    http::{header::CONTENT_TYPE, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::{debug, error};

use crate::controller::metrics;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Input(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Authentication(String),
    #[error("request timed out")]
    Timeout,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ApiError {
    pub fn name(&self) -> &'static str {
        match self {
            ApiError::Input(_) => "InputError",
            ApiError::NotFound(_) => "NotFoundError",
            ApiError::Authentication(_) => "AuthenticationError",
            ApiError::Timeout => "TimeoutError",
            ApiError::Other(_) => "Error",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Input(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Authentication(_) => StatusCode::UNAUTHORIZED,
            ApiError::Timeout => StatusCode::REQUEST_TIMEOUT,
            ApiError::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// Hash routes share parameter slots with the coordinate routes, so the
// rejection text may name the wrong parameter; only a generic message is exposed.
impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        debug!(
            component = "http",
            event = "path_rejected",
            reason = %rejection.body_text(),
            "malformed path parameters"
        );
        ApiError::Input("Malformed path parameters".to_string())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Input(rejection.body_text())
    }
}

/// Error details carried in response extensions until the error
/// middleware renders them together with the request line.
#[derive(Debug, Clone)]
pub struct ErrorReport {
    pub name: &'static str,
    pub message: String,
    pub status: StatusCode,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: ErrorDetails<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    request: Option<RequestDetails<'a>>,
    response: ResponseDetails,
}

#[derive(Serialize)]
struct ErrorDetails<'a> {
    name: &'a str,
    message: &'a str,
}

#[derive(Serialize)]
struct RequestDetails<'a> {
    method: &'a str,
    url: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ResponseDetails {
    status_code: u16,
}

impl ErrorReport {
    /// Renders the report; `request` is `(method, url)` when known.
    pub fn render(&self, request: Option<(&str, &str)>) -> Response {
        let body = ErrorBody {
            error: ErrorDetails {
                name: self.name,
                message: &self.message,
            },
            request: request.map(|(method, url)| RequestDetails { method, url }),
            response: ResponseDetails {
                status_code: self.status.as_u16(),
            },
        };

        let json = serde_json::to_string(&body).unwrap_or_else(|_| {
            r#"{"error":{"name":"Error","message":"failed to serialize error"}}"#.to_string()
        });

        let mut response = (self.status, json).into_response();
        response
            .headers_mut()
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json; charset=utf-8"));
        response.extensions_mut().insert(self.clone());
        response
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let report = ErrorReport {
            name: self.name(),
            message: self.to_string(),
            status: self.status(),
        };

        match &self {
            ApiError::Other(err) => {
                error!(
                    component = "http",
                    event = "request_failed",
                    error = ?err,
                    "unexpected error while handling request"
                );
                metrics::inc_error("internal");
            }
            ApiError::Input(_) => metrics::inc_error("bad_request"),
            ApiError::NotFound(_) => metrics::inc_error("not_found"),
            ApiError::Authentication(_) => metrics::inc_error("unauthorized"),
            ApiError::Timeout => metrics::inc_error("timeout"),
        }

        report.render(None)
    }
}
