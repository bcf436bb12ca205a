// Configuration loading and management.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::model::Entity;

pub const PROD: &str = "prod";
#[allow(dead_code)]
pub const DEV: &str = "dev";
pub const TEST: &str = "test";

const DEFAULT_APP_TITLE: &str = "Backstage";
const DEFAULT_CATALOG_TIMEOUT: Duration = Duration::from_secs(5);
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Badges {
    #[serde(rename = "badges")]
    pub badges: BadgesBox,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BadgesBox {
    pub env: String,
    pub logs: Option<Logs>,
    pub api: Option<Api>,
    pub app: Option<App>,
    pub backend: Option<Backend>,
    /// Enables the hash based routes and the obfuscation endpoint.
    #[serde(default)]
    pub obfuscate: bool,
    #[serde(skip_serializing)]
    pub salt: Option<String>,
    pub auth: Option<Auth>,
    pub catalog: Option<Catalog>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Logs {
    pub level: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Api {
    pub name: Option<String>,
    pub port: Option<String>,
    #[serde(default, with = "humantime_serde")]
    pub timeout: Option<Duration>,
}

/// Frontend application settings used to build entity links inside badges.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct App {
    pub title: Option<String>,
    #[serde(rename = "base_url")]
    pub base_url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Backend {
    #[serde(rename = "base_url")]
    pub base_url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Auth {
    #[serde(default, skip_serializing)]
    pub tokens: Vec<AuthToken>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthToken {
    pub token: String,
    pub subject: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Catalog {
    #[serde(rename = "base_url")]
    pub base_url: Option<String>,
    #[serde(skip_serializing)]
    pub token: Option<String>,
    #[serde(default, with = "humantime_serde")]
    pub timeout: Option<Duration>,
    pub entities: Option<Vec<Entity>>,
}

pub trait ConfigTrait {
    fn logs(&self) -> Option<&Logs>;
    fn is_prod(&self) -> bool;
    #[allow(dead_code)]
    fn is_test(&self) -> bool;
    fn api(&self) -> Option<&Api>;
    fn api_timeout(&self) -> Duration;
    fn app_title(&self) -> &str;
    fn app_base_url(&self) -> &str;
    fn backend(&self) -> Option<&Backend>;
    fn is_obfuscated(&self) -> bool;
    fn salt(&self) -> Option<&str>;
    fn auth_tokens(&self) -> &[AuthToken];
    fn catalog(&self) -> Option<&Catalog>;
    fn catalog_timeout(&self) -> Duration;
}

pub type Config = Badges;

impl ConfigTrait for Config {
    fn logs(&self) -> Option<&Logs> {
        self.badges.logs.as_ref()
    }

    fn is_prod(&self) -> bool {
        self.badges.env == PROD
    }

    fn is_test(&self) -> bool {
        self.badges.env == TEST
    }

    fn api(&self) -> Option<&Api> {
        self.badges.api.as_ref()
    }

    fn api_timeout(&self) -> Duration {
        self.api()
            .and_then(|api| api.timeout)
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT)
    }

    fn app_title(&self) -> &str {
        self.badges
            .app
            .as_ref()
            .and_then(|app| app.title.as_deref())
            .unwrap_or(DEFAULT_APP_TITLE)
    }

    fn app_base_url(&self) -> &str {
        self.badges
            .app
            .as_ref()
            .map(|app| app.base_url.trim_end_matches('/'))
            .unwrap_or("")
    }

    fn backend(&self) -> Option<&Backend> {
        self.badges.backend.as_ref()
    }

    fn is_obfuscated(&self) -> bool {
        self.badges.obfuscate
    }

    fn salt(&self) -> Option<&str> {
        self.badges.salt.as_deref()
    }

    fn auth_tokens(&self) -> &[AuthToken] {
        self.badges
            .auth
            .as_ref()
            .map(|auth| auth.tokens.as_slice())
            .unwrap_or(&[])
    }

    fn catalog(&self) -> Option<&Catalog> {
        self.badges.catalog.as_ref()
    }

    fn catalog_timeout(&self) -> Duration {
        self.catalog()
            .and_then(|c| c.timeout)
            .unwrap_or(DEFAULT_CATALOG_TIMEOUT)
    }
}

impl Config {
    /// Loads configuration from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let abs_path = path
            .canonicalize()
            .with_context(|| format!("failed to resolve absolute config filepath: {:?}", path))?;

        let data = std::fs::read_to_string(&abs_path)
            .with_context(|| format!("read config yaml file {:?}", abs_path))?;

        Self::from_yaml(&data).with_context(|| format!("load config from {:?}", abs_path))
    }

    /// Parses and validates configuration from YAML text.
    pub fn from_yaml(data: &str) -> Result<Self> {
        let cfg: Badges = serde_yaml::from_str(data).context("unmarshal config yaml")?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> Result<()> {
        if self.badges.obfuscate && self.salt().map_or(true, str::is_empty) {
            anyhow::bail!("obfuscation is enabled but no salt is configured");
        }

        match self.catalog() {
            None => anyhow::bail!("no catalog configured"),
            Some(catalog) if catalog.base_url.is_none() && catalog.entities.is_none() => {
                anyhow::bail!("catalog requires either base_url or entities")
            }
            Some(_) => {}
        }

        if self.backend().is_none() {
            anyhow::bail!("backend.base_url is required to build badge urls");
        }

        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod test_config;
#[cfg(test)]
pub(crate) use test_config::new_test_config;
