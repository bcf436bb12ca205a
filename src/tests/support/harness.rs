// Integration test harness: the application wired to a fake remote catalog.

use super::badges::BadgesServer;
use super::catalog::CatalogServer;
use crate::config::{self, test_config::test_entities, Config};

pub const CATALOG_TOKEN: &str = "catalog-service-token";

pub struct TestStack {
    pub catalog: CatalogServer,
    pub badges: BadgesServer,
}

impl TestStack {
    /// Starts a catalog with the test entities and the application in front of it.
    pub async fn start() -> Self {
        Self::start_with(|_| {}).await
    }

    /// Like [`start`](Self::start) with a chance to adjust the configuration.
    pub async fn start_with(adjust: impl FnOnce(&mut Config)) -> Self {
        let catalog = CatalogServer::start(test_entities()).await;

        let mut cfg = config::new_test_config();
        if let Some(catalog_cfg) = cfg.badges.catalog.as_mut() {
            catalog_cfg.base_url = Some(catalog.base_url());
            catalog_cfg.token = Some(CATALOG_TOKEN.to_string());
            catalog_cfg.entities = None;
        }
        adjust(&mut cfg);

        let badges = BadgesServer::start(cfg)
            .await
            .unwrap_or_else(|e| panic!("failed to start badges server: {}", e));

        Self { catalog, badges }
    }

    pub async fn stop(self) {
        self.badges.stop().await;
        self.catalog.close();
    }
}
