use super::{entity_hash, find_entity_by_hash};
use crate::catalog::StaticCatalog;
use crate::config::test_config::{test_entities, TEST_SALT};
use crate::model::EntityRef;

const TEST_COMPONENT_HASH: &str = "3a5f91c1e66519be5394c37a8ba69c3087b7c322c600e7497dc9d517353e5bed";

#[test]
fn test_known_digest() {
    let r = EntityRef::new("Component", "default", "test");
    assert_eq!(entity_hash(&r, TEST_SALT), TEST_COMPONENT_HASH);
}

#[test]
fn test_hash_is_deterministic_and_case_insensitive() {
    let a = entity_hash(&EntityRef::new("component", "default", "test"), TEST_SALT);
    let b = entity_hash(&EntityRef::new("COMPONENT", "Default", "TEST"), TEST_SALT);
    assert_eq!(a, b);
    assert_eq!(a.len(), 64);
}

#[test]
fn test_salt_changes_hash() {
    let r = EntityRef::new("component", "default", "test");
    assert_ne!(entity_hash(&r, TEST_SALT), entity_hash(&r, "other-salt"));
}

#[tokio::test]
async fn test_find_entity_by_hash() {
    let catalog = StaticCatalog::new(test_entities());

    let found = find_entity_by_hash(&catalog, TEST_COMPONENT_HASH, TEST_SALT, None)
        .await
        .unwrap()
        .expect("entity should resolve");
    assert_eq!(found.name(), "test");

    let upper = TEST_COMPONENT_HASH.to_uppercase();
    let found = find_entity_by_hash(&catalog, &upper, TEST_SALT, None).await.unwrap();
    assert!(found.is_some());
}

#[tokio::test]
async fn test_find_entity_by_hash_miss() {
    let catalog = StaticCatalog::new(test_entities());

    let missing = find_entity_by_hash(&catalog, "deadbeef", TEST_SALT, None).await.unwrap();
    assert!(missing.is_none());

    let wrong_salt = find_entity_by_hash(&catalog, TEST_COMPONENT_HASH, "nope", None)
        .await
        .unwrap();
    assert!(wrong_salt.is_none());
}
