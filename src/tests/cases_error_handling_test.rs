// Error responses: fallback, upstream failures, timeouts and recovered panics.

use anyhow::Result;
use axum::http::StatusCode;
use std::sync::Arc;
use std::time::Duration;

use crate::app::Services;
use crate::badges::{BadgeBuilder, BadgeOptions};
use crate::catalog::Catalog;
use crate::config;
use crate::http::panics_counter;
use crate::model::{BadgeInfo, BadgeSpec, Entity, EntityRef};
use crate::support::{
    assert_equal, assert_error, get, test_router, test_router_with_services,
};

struct UnavailableCatalog;

#[async_trait::async_trait]
impl Catalog for UnavailableCatalog {
    async fn get_entity_by_ref(&self, _: &EntityRef, _: Option<&str>) -> Result<Option<Entity>> {
        anyhow::bail!("catalog is unavailable")
    }

    async fn get_entities(&self, _: Option<&str>) -> Result<Vec<Entity>> {
        anyhow::bail!("catalog is unavailable")
    }
}

struct PanickingBuilder;

#[async_trait::async_trait]
impl BadgeBuilder for PanickingBuilder {
    async fn get_badges(&self) -> Result<Vec<BadgeInfo>> {
        panic!("badge listing exploded")
    }

    async fn create_badge_json(&self, _: &BadgeOptions<'_>) -> Result<BadgeSpec> {
        panic!("badge json exploded")
    }

    async fn create_badge_svg(&self, _: &BadgeOptions<'_>) -> Result<String> {
        panic!("badge svg exploded")
    }
}

struct SlowBuilder;

#[async_trait::async_trait]
impl BadgeBuilder for SlowBuilder {
    async fn get_badges(&self) -> Result<Vec<BadgeInfo>> {
        tokio::time::sleep(Duration::from_secs(2)).await;
        Ok(Vec::new())
    }

    async fn create_badge_json(&self, _: &BadgeOptions<'_>) -> Result<BadgeSpec> {
        tokio::time::sleep(Duration::from_secs(2)).await;
        anyhow::bail!("too late")
    }

    async fn create_badge_svg(&self, _: &BadgeOptions<'_>) -> Result<String> {
        tokio::time::sleep(Duration::from_secs(2)).await;
        anyhow::bail!("too late")
    }
}

fn services() -> Services {
    Services::from_config(&config::new_test_config()).expect("services from test config")
}

#[tokio::test]
async fn test_unknown_route_uses_error_body() {
    let router = test_router();

    let body = assert_error(
        get(&router, "/nothing/here?x=1").await,
        StatusCode::NOT_FOUND,
        "NotFoundError",
        "Not found",
    )
    .await;
    assert_equal(Some("GET"), body["request"]["method"].as_str());
    assert_equal(Some("/nothing/here?x=1"), body["request"]["url"].as_str());
}

#[tokio::test]
async fn test_catalog_failure_is_internal_error() {
    let services = Services {
        catalog: Arc::new(UnavailableCatalog),
        ..services()
    };
    let router = test_router_with_services(config::new_test_config(), services);

    let body = assert_error(
        get(&router, "/entity/default/component/test/badge-specs").await,
        StatusCode::INTERNAL_SERVER_ERROR,
        "Error",
        "catalog is unavailable",
    )
    .await;
    assert_equal(Some(500), body["response"]["statusCode"].as_u64());
}

#[tokio::test]
async fn test_panicking_handler_is_recovered() {
    let services = Services {
        badge_builder: Arc::new(PanickingBuilder),
        ..services()
    };
    let router = test_router_with_services(config::new_test_config(), services);
    let panics_before = panics_counter();

    assert_error(
        get(&router, "/entity/default/component/test/badge/pingback").await,
        StatusCode::INTERNAL_SERVER_ERROR,
        "Error",
        "internal server error",
    )
    .await;
    assert!(panics_counter() > panics_before);

    // The router keeps serving after a panic.
    let resp = get(&router, "/healthcheck").await;
    assert_equal(StatusCode::OK, resp.status());
}

#[tokio::test]
async fn test_slow_handler_times_out_with_error_body() {
    let mut cfg = config::new_test_config();
    if let Some(api) = cfg.badges.api.as_mut() {
        api.timeout = Some(Duration::from_millis(50));
    }
    let services = Services {
        badge_builder: Arc::new(SlowBuilder),
        ..services()
    };
    let router = test_router_with_services(cfg, services);

    let body = assert_error(
        get(&router, "/entity/default/component/test/badge/owner").await,
        StatusCode::REQUEST_TIMEOUT,
        "TimeoutError",
        "request timed out",
    )
    .await;
    assert_equal(
        Some("/entity/default/component/test/badge/owner"),
        body["request"]["url"].as_str(),
    );
}
