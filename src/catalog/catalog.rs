// Catalog defines the entity lookup capability badges depend on.

use anyhow::Result;

use crate::model::{Entity, EntityRef};

/// Read-only access to catalog entities.
///
/// `token` is the service token forwarded to the catalog, if one is configured.
#[async_trait::async_trait]
pub trait Catalog: Send + Sync {
    /// Looks up a single entity; `Ok(None)` when the catalog does not know it.
    async fn get_entity_by_ref(
        &self,
        entity_ref: &EntityRef,
        token: Option<&str>,
    ) -> Result<Option<Entity>>;

    /// Lists every entity in the catalog.
    async fn get_entities(&self, token: Option<&str>) -> Result<Vec<Entity>>;
}
