// In-memory catalog backed by entities declared in configuration.

use anyhow::Result;

use super::Catalog;
use crate::model::{Entity, EntityRef};

pub struct StaticCatalog {
    entities: Vec<Entity>,
}

impl StaticCatalog {
    pub fn new(entities: Vec<Entity>) -> Self {
        Self { entities }
    }
}

#[async_trait::async_trait]
impl Catalog for StaticCatalog {
    async fn get_entity_by_ref(
        &self,
        entity_ref: &EntityRef,
        _token: Option<&str>,
    ) -> Result<Option<Entity>> {
        Ok(self
            .entities
            .iter()
            .find(|entity| entity.entity_ref().matches(entity_ref))
            .cloned())
    }

    async fn get_entities(&self, _token: Option<&str>) -> Result<Vec<Entity>> {
        Ok(self.entities.clone())
    }
}
