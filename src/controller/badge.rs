// Badge controller: serves a single badge as SVG or JSON.

use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query,
    },
    http::header::CONTENT_TYPE,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

use super::metrics;
use super::resolver::{Addressing, EntityResolver, ResolvedEntity};
use crate::badges::{AppInfo, BadgeBuilder, BadgeContext, BadgeOptions};
use crate::http::error::ApiError;
use crate::http::Controller;
use crate::model::BadgeInfo;

pub const BADGE_BY_NAME_PATH: &str = "/entity/:namespace/:kind/:name/badge/:badge_id";
/// The first two slots carry the entity hash and the badge id.
pub const BADGE_BY_HASH_PATH: &str = "/entity/:namespace/:kind";

pub const SVG_CONTENT_TYPE: &str = "image/svg+xml";

/// Query parameters for badge endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct FormatQuery {
    format: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeFormat {
    Svg,
    Json,
}

impl BadgeFormat {
    /// `json` selects the JSON descriptor; anything else gets the image.
    pub fn from_query(query: &FormatQuery) -> Self {
        match query.format.as_deref() {
            Some(f) if f.eq_ignore_ascii_case("json") => BadgeFormat::Json,
            _ => BadgeFormat::Svg,
        }
    }
}

/// BadgeController serves one badge by entity coordinates or,
/// with obfuscation enabled, only by entity hash.
#[derive(Clone)]
pub struct BadgeController {
    resolver: Arc<EntityResolver>,
    builder: Arc<dyn BadgeBuilder>,
    app: Arc<AppInfo>,
    addressing: Addressing,
}

impl BadgeController {
    pub fn new(
        resolver: Arc<EntityResolver>,
        builder: Arc<dyn BadgeBuilder>,
        app: Arc<AppInfo>,
        addressing: Addressing,
    ) -> Self {
        Self {
            resolver,
            builder,
            app,
            addressing,
        }
    }

    async fn by_name(
        &self,
        (namespace, kind, name, badge_id): (String, String, String, String),
        format: BadgeFormat,
    ) -> Result<Response, ApiError> {
        metrics::inc_request("badge_by_name");
        let resolved = self.resolver.by_name(&namespace, &kind, &name).await?;
        self.badge(resolved, badge_id, format).await
    }

    async fn by_hash(
        &self,
        entity_hash: String,
        badge_id: String,
        format: BadgeFormat,
    ) -> Result<Response, ApiError> {
        metrics::inc_request("badge_by_hash");
        let resolved = self.resolver.by_hash(&entity_hash).await?;
        self.badge(resolved, badge_id, format).await
    }

    async fn badge(
        &self,
        resolved: ResolvedEntity,
        badge_id: String,
        format: BadgeFormat,
    ) -> Result<Response, ApiError> {
        let options = BadgeOptions {
            context: BadgeContext {
                badge_url: resolved.badge_url(&badge_id),
                entity: &resolved.entity,
                app: &self.app,
            },
            badge_info: BadgeInfo::new(badge_id),
        };

        match format {
            BadgeFormat::Json => {
                let spec = self.builder.create_badge_json(&options).await?;
                Ok(Json(spec).into_response())
            }
            BadgeFormat::Svg => {
                let svg = self.builder.create_badge_svg(&options).await?;
                Ok(([(CONTENT_TYPE, SVG_CONTENT_TYPE)], svg).into_response())
            }
        }
    }
}

impl Controller for BadgeController {
    fn add_route(&self, router: Router) -> Router {
        let controller = Arc::new(self.clone());
        match self.addressing {
            Addressing::Coordinates => router.route(
                BADGE_BY_NAME_PATH,
                get(
                    move |path: Result<Path<(String, String, String, String)>, PathRejection>,
                          query: Result<Query<FormatQuery>, QueryRejection>| {
                        let controller = controller.clone();
                        async move {
                            let Path(params) = path?;
                            let Query(query) = query?;
                            controller
                                .by_name(params, BadgeFormat::from_query(&query))
                                .await
                        }
                    },
                ),
            ),
            Addressing::Hash => router.route(
                BADGE_BY_HASH_PATH,
                get(
                    move |path: Result<Path<(String, String)>, PathRejection>,
                          query: Result<Query<FormatQuery>, QueryRejection>| {
                        let controller = controller.clone();
                        async move {
                            let Path((entity_hash, badge_id)) = path?;
                            let Query(query) = query?;
                            controller
                                .by_hash(entity_hash, badge_id, BadgeFormat::from_query(&query))
                                .await
                        }
                    },
                ),
            ),
        }
    }
}
