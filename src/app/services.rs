// Collaborators the badge routes depend on.

use anyhow::{Context, Result};
use std::sync::Arc;

use crate::badges::{default_factories, AppInfo, BadgeBuilder, DefaultBadgeBuilder};
use crate::catalog::{self, Catalog};
use crate::config::{Config, ConfigTrait};
use crate::discovery::{ConfigDiscovery, Discovery};
use crate::identity::{IdentityVerifier, StaticTokenVerifier};

/// Shared service handles, injected into controllers.
#[derive(Clone)]
pub struct Services {
    pub catalog: Arc<dyn Catalog>,
    pub badge_builder: Arc<dyn BadgeBuilder>,
    pub identity: Arc<dyn IdentityVerifier>,
    pub discovery: Arc<dyn Discovery>,
    pub app: Arc<AppInfo>,
}

impl Services {
    /// Builds the default collaborators described by configuration.
    pub fn from_config(cfg: &Config) -> Result<Self> {
        let catalog = catalog::from_config(cfg).context("failed to build catalog client")?;
        let backend = cfg
            .backend()
            .context("backend.base_url is required to build badge urls")?;

        Ok(Self {
            catalog,
            badge_builder: Arc::new(DefaultBadgeBuilder::new(default_factories())),
            identity: Arc::new(StaticTokenVerifier::new(cfg.auth_tokens())),
            discovery: Arc::new(ConfigDiscovery::new(&backend.base_url)),
            app: Arc::new(AppInfo {
                title: cfg.app_title().to_string(),
                base_url: cfg.app_base_url().to_string(),
            }),
        })
    }
}
