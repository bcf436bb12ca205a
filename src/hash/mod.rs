//! Entity hash tokens.
//!
//! A hash token is the lowercase hex SHA-256 of `kind:namespace:name:salt`,
//! with the reference parts lowercased. It lets badge URLs point at an
//! entity without revealing its coordinates.

use anyhow::Result;
use sha2::{Digest, Sha256};

use crate::catalog::Catalog;
use crate::model::{Entity, EntityRef};

/// Computes the hash token for an entity reference.
pub fn entity_hash(entity_ref: &EntityRef, salt: &str) -> String {
    let canonical = entity_ref.canonical();

    let mut hasher = Sha256::new();
    hasher.update(canonical.kind.as_bytes());
    hasher.update(b":");
    hasher.update(canonical.namespace.as_bytes());
    hasher.update(b":");
    hasher.update(canonical.name.as_bytes());
    hasher.update(b":");
    hasher.update(salt.as_bytes());

    hex::encode(hasher.finalize())
}

/// Reverse-maps a hash token by scanning every catalog entity.
///
/// Returns the first entity whose hash matches; the comparison ignores hex case.
pub async fn find_entity_by_hash(
    catalog: &dyn Catalog,
    hash: &str,
    salt: &str,
    token: Option<&str>,
) -> Result<Option<Entity>> {
    let entities = catalog.get_entities(token).await?;

    Ok(entities
        .into_iter()
        .find(|entity| entity_hash(&entity.entity_ref(), salt).eq_ignore_ascii_case(hash)))
}

#[cfg(test)]
mod hash_test;
