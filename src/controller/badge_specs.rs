// Badge specs controller: lists every badge of an entity as JSON.

use axum::{
    extract::{rejection::PathRejection, Path},
    routing::get,
    Json, Router,
};
use std::sync::Arc;
use tracing::debug;

use super::metrics;
use super::resolver::{Addressing, EntityResolver, ResolvedEntity};
use crate::badges::{AppInfo, BadgeBuilder, BadgeContext, BadgeOptions};
use crate::http::error::ApiError;
use crate::http::Controller;
use crate::model::BadgeSpec;

pub const BADGE_SPECS_BY_NAME_PATH: &str = "/entity/:namespace/:kind/:name/badge-specs";
/// The first slot carries the entity hash.
pub const BADGE_SPECS_BY_HASH_PATH: &str = "/entity/:namespace/badge-specs";

/// BadgeSpecsController serves badge specs by entity coordinates or,
/// with obfuscation enabled, only by entity hash.
#[derive(Clone)]
pub struct BadgeSpecsController {
    resolver: Arc<EntityResolver>,
    builder: Arc<dyn BadgeBuilder>,
    app: Arc<AppInfo>,
    addressing: Addressing,
}

impl BadgeSpecsController {
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
        namespace: String,
        kind: String,
        name: String,
    ) -> Result<Json<Vec<BadgeSpec>>, ApiError> {
        metrics::inc_request("badge_specs_by_name");
        let resolved = self.resolver.by_name(&namespace, &kind, &name).await?;
        self.badge_specs(resolved).await
    }

    async fn by_hash(&self, entity_hash: String) -> Result<Json<Vec<BadgeSpec>>, ApiError> {
        metrics::inc_request("badge_specs_by_hash");
        let resolved = self.resolver.by_hash(&entity_hash).await?;
        self.badge_specs(resolved).await
    }

    async fn badge_specs(&self, resolved: ResolvedEntity) -> Result<Json<Vec<BadgeSpec>>, ApiError> {
        let badges = self.builder.get_badges().await?;

        let mut specs = Vec::with_capacity(badges.len());
        for badge_info in badges {
            let options = BadgeOptions {
                context: BadgeContext {
                    badge_url: resolved.badge_url(&badge_info.id),
                    entity: &resolved.entity,
                    app: &self.app,
                },
                badge_info,
            };
            specs.push(self.builder.create_badge_json(&options).await?);
        }

        debug!(
            component = "badge_specs",
            entity = %resolved.entity.entity_ref(),
            count = specs.len(),
            "badge specs built"
        );

        Ok(Json(specs))
    }
}

impl Controller for BadgeSpecsController {
    fn add_route(&self, router: Router) -> Router {
        let controller = Arc::new(self.clone());
        match self.addressing {
            Addressing::Coordinates => router.route(
                BADGE_SPECS_BY_NAME_PATH,
                get(
                    move |path: Result<Path<(String, String, String)>, PathRejection>| {
                        let controller = controller.clone();
                        async move {
                            let Path((namespace, kind, name)) = path?;
                            controller.by_name(namespace, kind, name).await
                        }
                    },
                ),
            ),
            Addressing::Hash => router.route(
                BADGE_SPECS_BY_HASH_PATH,
                get(move |path: Result<Path<String>, PathRejection>| {
                    let controller = controller.clone();
                    async move {
                        let Path(entity_hash) = path?;
                        controller.by_hash(entity_hash).await
                    }
                }),
            ),
        }
    }
}
