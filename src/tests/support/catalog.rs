// Fake remote catalog for integration tests.

use axum::{
    extract::{Path, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::model::{Entity, EntityRef};

pub const CATALOG_PREFIX: &str = "/api/catalog";

#[derive(Clone, Default)]
struct CatalogState {
    entities: Arc<Vec<Entity>>,
    seen_authorization: Arc<Mutex<Vec<Option<String>>>>,
}

impl CatalogState {
    fn record(&self, headers: &HeaderMap) {
        let auth = headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        self.seen_authorization
            .lock()
            .expect("catalog state lock")
            .push(auth);
    }
}

async fn list_entities(State(state): State<CatalogState>, headers: HeaderMap) -> Response {
    state.record(&headers);
    Json(state.entities.as_ref().clone()).into_response()
}

async fn entity_by_name(
    State(state): State<CatalogState>,
    headers: HeaderMap,
    Path((kind, namespace, name)): Path<(String, String, String)>,
) -> Response {
    state.record(&headers);
    let wanted = EntityRef::new(kind, namespace, name);
    match state
        .entities
        .iter()
        .find(|e| e.entity_ref().matches(&wanted))
    {
        Some(entity) => Json(entity.clone()).into_response(),
        None => (StatusCode::NOT_FOUND, "entity not found").into_response(),
    }
}

/// Catalog API serving a fixed entity set on an ephemeral port.
pub struct CatalogServer {
    addr: String,
    state: CatalogState,
    handle: JoinHandle<()>,
}

impl CatalogServer {
    pub async fn start(entities: Vec<Entity>) -> Self {
        let state = CatalogState {
            entities: Arc::new(entities),
            ..Default::default()
        };

        let router = Router::new()
            .route(&format!("{CATALOG_PREFIX}/entities"), get(list_entities))
            .route(
                &format!("{CATALOG_PREFIX}/entities/by-name/:kind/:namespace/:name"),
                get(entity_by_name),
            )
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind catalog listener");
        let addr = listener.local_addr().expect("catalog addr").to_string();

        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, router).await {
                eprintln!("[catalog] serve failed: {}", e);
            }
        });

        Self {
            addr,
            state,
            handle,
        }
    }

    /// Base URL the catalog client should be configured with.
    pub fn base_url(&self) -> String {
        format!("http://{}{}", self.addr, CATALOG_PREFIX)
    }

    /// Authorization headers of every request received so far.
    pub fn seen_authorization(&self) -> Vec<Option<String>> {
        self.state
            .seen_authorization
            .lock()
            .expect("catalog state lock")
            .clone()
    }

    pub fn close(self) {
        self.handle.abort();
    }
}
