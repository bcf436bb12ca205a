// Catalog client talking to a remote catalog API over HTTP(S).

use anyhow::{Context, Result};
use hyper::header::{HeaderValue, ACCEPT, AUTHORIZATION};
use hyper::{HeaderMap, StatusCode, Uri};
use std::time::Duration;
use tracing::debug;

use super::Catalog;
use crate::http::client::{self, HyperClient};
use crate::model::{Entity, EntityRef};

pub struct HttpCatalog {
    base_url: String,
    timeout: Duration,
    client: HyperClient,
}

impl HttpCatalog {
    /// Creates a client for the catalog rooted at `base_url` (e.g. `http://host/api/catalog`).
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
            client: client::create_client(timeout)?,
        })
    }

    fn entity_uri(&self, entity_ref: &EntityRef) -> Result<Uri> {
        let uri = format!(
            "{}/entities/by-name/{}/{}/{}",
            self.base_url,
            urlencoding::encode(&entity_ref.kind),
            urlencoding::encode(&entity_ref.namespace),
            urlencoding::encode(&entity_ref.name),
        );
        uri.parse().with_context(|| format!("invalid catalog uri {uri}"))
    }

    fn entities_uri(&self) -> Result<Uri> {
        let uri = format!("{}/entities", self.base_url);
        uri.parse().with_context(|| format!("invalid catalog uri {uri}"))
    }

    fn headers(token: Option<&str>) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(token) = token {
            let value = HeaderValue::from_str(&format!("Bearer {token}"))
                .context("catalog token is not a valid header value")?;
            headers.insert(AUTHORIZATION, value);
        }
        Ok(headers)
    }
}

#[async_trait::async_trait]
impl Catalog for HttpCatalog {
    async fn get_entity_by_ref(
        &self,
        entity_ref: &EntityRef,
        token: Option<&str>,
    ) -> Result<Option<Entity>> {
        let uri = self.entity_uri(entity_ref)?;
        let (status, body) =
            client::hyper_client::get(&self.client, uri, Self::headers(token)?, self.timeout)
                .await?;

        match status {
            StatusCode::NOT_FOUND => {
                debug!(
                    component = "catalog",
                    entity = %entity_ref,
                    "entity not found in catalog"
                );
                Ok(None)
            }
            s if s.is_success() => {
                let entity = serde_json::from_slice(&body)
                    .with_context(|| format!("decode catalog entity {entity_ref}"))?;
                Ok(Some(entity))
            }
            s => anyhow::bail!("catalog responded {} for entity {}", s, entity_ref),
        }
    }

    async fn get_entities(&self, token: Option<&str>) -> Result<Vec<Entity>> {
        let uri = self.entities_uri()?;
        let (status, body) =
            client::hyper_client::get(&self.client, uri, Self::headers(token)?, self.timeout)
                .await?;

        if !status.is_success() {
            anyhow::bail!("catalog responded {} while listing entities", status);
        }

        serde_json::from_slice(&body).context("decode catalog entity list")
    }
}
