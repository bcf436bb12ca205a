// Package catalog provides entity lookup backends.

pub mod catalog;
pub mod http_catalog;
pub mod static_catalog;

pub use catalog::Catalog;
pub use http_catalog::HttpCatalog;
pub use static_catalog::StaticCatalog;

use anyhow::Result;
use std::sync::Arc;

use crate::config::{Config, ConfigTrait};

/// Builds the catalog selected by configuration: a remote catalog when
/// `base_url` is set, the declared entities otherwise.
pub fn from_config(cfg: &Config) -> Result<Arc<dyn Catalog>> {
    let catalog = cfg
        .catalog()
        .ok_or_else(|| anyhow::anyhow!("no catalog configured"))?;

    if let Some(base_url) = catalog.base_url.as_deref() {
        return Ok(Arc::new(HttpCatalog::new(base_url, cfg.catalog_timeout())?));
    }

    Ok(Arc::new(StaticCatalog::new(
        catalog.entities.clone().unwrap_or_default(),
    )))
}
