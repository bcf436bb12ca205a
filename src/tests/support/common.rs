// Common test utilities: in-process router requests and response decoding.

use axum::body::Body;
use axum::http::{header::AUTHORIZATION, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use std::collections::HashMap;
use std::time::Duration;
use tower::ServiceExt;

use crate::app::{HttpServer, Services};
use crate::config::{self, Config};

pub type H = HashMap<String, String>;

/// The fully layered router built from the test configuration.
pub fn test_router() -> Router {
    test_router_with(config::new_test_config())
}

/// The layered router in obfuscated mode: badges by hash token only.
pub fn test_obfuscated_router() -> Router {
    test_router_with(config::test_config::new_obfuscated_test_config())
}

/// The fully layered router built from `cfg` and its default collaborators.
pub fn test_router_with(cfg: Config) -> Router {
    let services = Services::from_config(&cfg).expect("services from test config");
    HttpServer::make_router(&cfg, &services).expect("router from test config")
}

/// The fully layered router around custom collaborators.
pub fn test_router_with_services(cfg: Config, services: Services) -> Router {
    HttpServer::make_router(&cfg, &services).expect("router from test config")
}

/// Sends a GET through the router without a network hop.
pub async fn get(router: &Router, uri: &str) -> Response {
    send(router, Request::get(uri).body(Body::empty()).expect("request")).await
}

/// Sends a GET carrying `Authorization: Bearer <token>`.
pub async fn get_authorized(router: &Router, uri: &str, token: &str) -> Response {
    let request = Request::get(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .expect("request");
    send(router, request).await
}

pub async fn send(router: &Router, request: Request<Body>) -> Response {
    router
        .clone()
        .oneshot(request)
        .await
        .expect("router is infallible")
}

pub fn content_type(response: &Response) -> String {
    response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .expect("read body")
        .to_bytes()
        .to_vec()
}

pub async fn body_text(response: Response) -> String {
    String::from_utf8(body_bytes(response).await).expect("utf-8 body")
}

pub async fn body_json(response: Response) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).expect("json body")
}

/// Asserts the structured error body and returns it.
pub async fn assert_error(
    response: Response,
    status: StatusCode,
    name: &str,
    message: &str,
) -> serde_json::Value {
    assert_equal(status, response.status());
    assert!(
        content_type(&response).starts_with("application/json"),
        "error responses are json"
    );

    let body = body_json(response).await;
    assert_equal(name, body["error"]["name"].as_str().unwrap_or_default());
    assert_equal(message, body["error"]["message"].as_str().unwrap_or_default());
    assert_equal(
        Some(status.as_u16() as u64),
        body["response"]["statusCode"].as_u64(),
    );
    body
}

/// Makes an HTTP request over the network.
pub async fn do_request(
    url: &str,
    headers: &H,
) -> Result<reqwest::Response, reqwest::Error> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(10))
        .build()?;

    let mut request = client.get(url);
    for (k, v) in headers {
        request = request.header(k, v);
    }

    request.send().await
}

/// Makes an HTTP request and parses a JSON response.
pub async fn do_json(url: &str, headers: &H) -> Result<(u16, serde_json::Value), reqwest::Error> {
    let resp = do_request(url, headers).await?;
    let status = resp.status().as_u16();
    let body = resp.json::<serde_json::Value>().await?;
    Ok((status, body))
}

/// Asserts that two values are equal.
pub fn assert_equal<T: PartialEq + std::fmt::Debug>(want: T, got: T) {
    if want != got {
        panic!("want={:?} got={:?}", want, got);
    }
}

/// Asserts that a result is Ok and unwraps it.
pub fn assert_ok<T, E: std::fmt::Display>(result: Result<T, E>) -> T {
    result.unwrap_or_else(|e| panic!("unexpected error: {}", e))
}
