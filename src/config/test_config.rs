use super::{Api, App, Auth, AuthToken, Backend, BadgesBox, Catalog, Config, Logs};
use crate::model::{Entity, EntityMetadata};
use std::time::Duration;

pub const TEST_SALT: &str = "random-string";
pub const TEST_TOKEN: &str = "test-user-token";

/// Creates a new test configuration backed by a static catalog.
pub fn new_test_config() -> Config {
    Config {
        badges: BadgesBox {
            env: super::TEST.to_string(),
            logs: Some(Logs {
                level: Some("debug".to_string()),
            }),
            api: Some(Api {
                name: Some("badges:7007".to_string()),
                port: Some("7007".to_string()),
                timeout: Some(Duration::from_secs(5)),
            }),
            app: Some(App {
                title: Some("Backstage".to_string()),
                base_url: "http://localhost:3000".to_string(),
            }),
            backend: Some(Backend {
                base_url: "http://127.0.0.1:7007".to_string(),
            }),
            obfuscate: false,
            salt: Some(TEST_SALT.to_string()),
            auth: Some(Auth {
                tokens: vec![AuthToken {
                    token: TEST_TOKEN.to_string(),
                    subject: "user:default/guest".to_string(),
                }],
            }),
            catalog: Some(Catalog {
                base_url: None,
                token: None,
                timeout: None,
                entities: Some(test_entities()),
            }),
        },
    }
}

/// Test configuration serving badges by hash token only.
pub fn new_obfuscated_test_config() -> Config {
    let mut cfg = new_test_config();
    cfg.badges.obfuscate = true;
    cfg
}

/// Entities served by the test catalog.
pub fn test_entities() -> Vec<Entity> {
    vec![
        Entity {
            api_version: "backstage.io/v1alpha1".to_string(),
            kind: "Component".to_string(),
            metadata: EntityMetadata {
                name: "test".to_string(),
                namespace: Some("default".to_string()),
                title: None,
                description: None,
                annotations: Default::default(),
            },
            spec: serde_json::json!({
                "type": "service",
                "lifecycle": "production",
                "owner": "team-a",
            }),
        },
        Entity {
            api_version: "backstage.io/v1alpha1".to_string(),
            kind: "API".to_string(),
            metadata: EntityMetadata {
                name: "petstore".to_string(),
                namespace: None,
                title: Some("Pet Store".to_string()),
                description: None,
                annotations: Default::default(),
            },
            spec: serde_json::json!({
                "type": "openapi",
                "lifecycle": "experimental",
            }),
        },
    ]
}
