//! Hyper HTTP client used for outbound calls to the catalog.

use anyhow::{Context, Result};
use bytes::Bytes;
use http_body_util::combinators::BoxBody;
use http_body_util::{BodyExt, Empty};
use hyper::{HeaderMap, Method, Request, StatusCode, Uri};
use hyper_rustls::HttpsConnector;
use hyper_util::client::legacy::connect::dns::GaiResolver;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;
use std::time::Duration;
use tokio::time::timeout;

/// Connection pool configuration constants.
pub const MAX_IDLE_PER_HOST: usize = 64;
pub const MAX_IDLE_CONN_DURATION: Duration = Duration::from_secs(30);
pub const TCP_KEEPALIVE: Duration = Duration::from_secs(30);

pub type HyperClient =
    Client<HttpsConnector<HttpConnector<GaiResolver>>, BoxBody<Bytes, hyper::Error>>;

/// Creates a pooled client that speaks both http and https.
pub fn create_client(connect_timeout: Duration) -> Result<HyperClient> {
    let mut http_connector = HttpConnector::new_with_resolver(GaiResolver::new());
    http_connector.set_nodelay(true);
    http_connector.set_keepalive(Some(TCP_KEEPALIVE));
    http_connector.set_connect_timeout(Some(connect_timeout));
    // The TLS wrapper decides the scheme.
    http_connector.enforce_http(false);

    let tls = hyper_rustls::HttpsConnectorBuilder::new()
        .with_native_roots()
        .context("failed to load native root certificates")?
        .https_or_http()
        .enable_http1()
        .wrap_connector(http_connector);

    Ok(Client::builder(TokioExecutor::new())
        .pool_idle_timeout(MAX_IDLE_CONN_DURATION)
        .pool_max_idle_per_host(MAX_IDLE_PER_HOST)
        .build(tls))
}

/// Performs a GET request and collects the whole body.
pub async fn get(
    client: &HyperClient,
    uri: Uri,
    headers: HeaderMap,
    timeout_duration: Duration,
) -> Result<(StatusCode, Bytes)> {
    let uri_str = uri.to_string();

    let body: BoxBody<Bytes, hyper::Error> = Empty::<Bytes>::new()
        .map_err(|never: std::convert::Infallible| match never {})
        .boxed();

    let mut req = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(body)
        .context("build request")?;
    *req.headers_mut() = headers;

    let response = match timeout(timeout_duration, client.request(req)).await {
        Ok(Ok(resp)) => resp,
        Ok(Err(e)) => {
            tracing::error!(
                component = "http_client",
                uri = %uri_str,
                error = %e,
                "request failed"
            );
            return Err(anyhow::anyhow!("request to {} failed: {}", uri_str, e));
        }
        Err(_) => {
            tracing::warn!(
                component = "http_client",
                uri = %uri_str,
                timeout = ?timeout_duration,
                "request timed out"
            );
            anyhow::bail!("request to {} timed out after {:?}", uri_str, timeout_duration);
        }
    };

    let status = response.status();
    let body = response
        .into_body()
        .collect()
        .await
        .context("failed to read response body")?
        .to_bytes();

    Ok((status, body))
}
