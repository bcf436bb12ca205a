// Obfuscation controller: hands out entity hash tokens to authenticated callers.

use axum::{
    extract::{rejection::PathRejection, Path},
    http::HeaderMap,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

use super::metrics;
use crate::hash::entity_hash;
use crate::http::error::ApiError;
use crate::http::Controller;
use crate::identity::{bearer_token, IdentityVerifier};
use crate::model::EntityRef;

pub const OBFUSCATED_PATH: &str = "/entity/:namespace/:kind/:name/obfuscated";

#[derive(Debug, Serialize)]
pub struct ObfuscatedResponse {
    pub hash: String,
}

/// ObfuscateController computes the hash token for entity coordinates.
/// The entity does not have to exist in the catalog.
#[derive(Clone)]
pub struct ObfuscateController {
    identity: Arc<dyn IdentityVerifier>,
    salt: Arc<str>,
}

impl ObfuscateController {
    pub fn new(identity: Arc<dyn IdentityVerifier>, salt: &str) -> Self {
        Self {
            identity,
            salt: Arc::from(salt),
        }
    }

    async fn obfuscate(
        &self,
        headers: HeaderMap,
        (namespace, kind, name): (String, String, String),
    ) -> Result<Json<ObfuscatedResponse>, ApiError> {
        metrics::inc_request("obfuscated");

        let token = bearer_token(&headers)
            .ok_or_else(|| ApiError::Authentication("No token provided".to_string()))?;
        let identity = self
            .identity
            .verify(token)
            .await
            .map_err(|e| ApiError::Authentication(e.to_string()))?;

        let entity_ref = EntityRef::new(kind, namespace, name);
        let hash = entity_hash(&entity_ref, &self.salt);

        debug!(
            component = "obfuscate",
            subject = %identity.subject,
            entity = %entity_ref,
            "entity hash issued"
        );

        Ok(Json(ObfuscatedResponse { hash }))
    }
}

impl Controller for ObfuscateController {
    fn add_route(&self, router: Router) -> Router {
        let controller = Arc::new(self.clone());
        router.route(
            OBFUSCATED_PATH,
            get(
                move |headers: HeaderMap,
                      path: Result<Path<(String, String, String)>, PathRejection>| {
                    let controller = controller.clone();
                    async move {
                        let Path(params) = path?;
                        controller.obfuscate(headers, params).await
                    }
                },
            ),
        )
    }
}
