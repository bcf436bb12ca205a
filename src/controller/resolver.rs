// Entity resolution shared by the badge controllers.

use std::sync::Arc;

use crate::catalog::Catalog;
use crate::discovery::{Discovery, BADGES_PLUGIN_ID};
use crate::hash;
use crate::http::error::ApiError;
use crate::model::{Entity, EntityRef};

/// How badge routes address entities: by coordinates, or only by hash token
/// when obfuscation is enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Addressing {
    Coordinates,
    Hash,
}

/// An entity together with the URL prefix its badges are served under.
#[derive(Debug, Clone)]
pub struct ResolvedEntity {
    pub entity: Entity,
    badge_url_prefix: String,
}

impl ResolvedEntity {
    /// Absolute URL of the badge image.
    pub fn badge_url(&self, badge_id: &str) -> String {
        format!("{}/{}", self.badge_url_prefix, urlencoding::encode(badge_id))
    }
}

/// Resolves entities by coordinates or by hash token.
pub struct EntityResolver {
    catalog: Arc<dyn Catalog>,
    discovery: Arc<dyn Discovery>,
    salt: Option<String>,
    catalog_token: Option<String>,
}

impl EntityResolver {
    pub fn new(
        catalog: Arc<dyn Catalog>,
        discovery: Arc<dyn Discovery>,
        salt: Option<String>,
        catalog_token: Option<String>,
    ) -> Self {
        Self {
            catalog,
            discovery,
            salt,
            catalog_token,
        }
    }

    /// Looks up `kind:namespace/name`; badge URLs keep the coordinates as requested.
    pub async fn by_name(
        &self,
        namespace: &str,
        kind: &str,
        name: &str,
    ) -> Result<ResolvedEntity, ApiError> {
        let entity_ref = EntityRef::new(kind, namespace, name);
        let entity = self
            .catalog
            .get_entity_by_ref(&entity_ref, self.catalog_token.as_deref())
            .await?
            .ok_or_else(|| {
                ApiError::NotFound(format!(
                    "No {kind} entity in {namespace} named \"{name}\""
                ))
            })?;

        let base_url = self.discovery.external_base_url(BADGES_PLUGIN_ID).await?;
        Ok(ResolvedEntity {
            entity,
            badge_url_prefix: format!(
                "{}/entity/{}/{}/{}/badge",
                base_url,
                urlencoding::encode(namespace),
                urlencoding::encode(kind),
                urlencoding::encode(name),
            ),
        })
    }

    /// Reverse-maps a hash token; badge URLs keep the token so coordinates stay hidden.
    pub async fn by_hash(&self, entity_hash: &str) -> Result<ResolvedEntity, ApiError> {
        let salt = self
            .salt
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("entity hashing requires a configured salt"))?;

        let entity = hash::find_entity_by_hash(
            self.catalog.as_ref(),
            entity_hash,
            salt,
            self.catalog_token.as_deref(),
        )
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("No entity found for hash \"{entity_hash}\"")))?;

        let base_url = self.discovery.external_base_url(BADGES_PLUGIN_ID).await?;
        Ok(ResolvedEntity {
            entity,
            badge_url_prefix: format!(
                "{}/entity/{}",
                base_url,
                urlencoding::encode(entity_hash)
            ),
        })
    }
}
