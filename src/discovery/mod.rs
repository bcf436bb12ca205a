//! Service discovery: resolves the externally reachable URL of a plugin.

use anyhow::Result;

pub const BADGES_PLUGIN_ID: &str = "badges";

#[async_trait::async_trait]
pub trait Discovery: Send + Sync {
    async fn external_base_url(&self, plugin_id: &str) -> Result<String>;
}

/// Derives plugin URLs from the configured backend base URL: `{base}/api/{plugin}`.
pub struct ConfigDiscovery {
    base_url: String,
}

impl ConfigDiscovery {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait::async_trait]
impl Discovery for ConfigDiscovery {
    async fn external_base_url(&self, plugin_id: &str) -> Result<String> {
        Ok(format!("{}/api/{}", self.base_url, plugin_id))
    }
}
