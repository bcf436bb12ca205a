// Catalog entity model and entity references.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

pub const DEFAULT_NAMESPACE: &str = "default";
const DEFAULT_API_VERSION: &str = "backstage.io/v1alpha1";

/// A catalog entity. Only the fields badges read are typed; `spec` stays free-form.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    #[serde(default = "default_api_version")]
    pub api_version: String,
    pub kind: String,
    pub metadata: EntityMetadata,
    #[serde(default)]
    pub spec: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct EntityMetadata {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub annotations: BTreeMap<String, String>,
}

fn default_api_version() -> String {
    DEFAULT_API_VERSION.to_string()
}

impl Entity {
    /// Namespace of the entity, `default` when unset.
    pub fn namespace(&self) -> &str {
        self.metadata
            .namespace
            .as_deref()
            .filter(|ns| !ns.is_empty())
            .unwrap_or(DEFAULT_NAMESPACE)
    }

    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    /// Human facing name: the title when present, the name otherwise.
    pub fn display_name(&self) -> &str {
        self.metadata.title.as_deref().unwrap_or(&self.metadata.name)
    }

    pub fn entity_ref(&self) -> EntityRef {
        EntityRef::new(&self.kind, self.namespace(), &self.metadata.name)
    }

    /// Reads a string field from `spec`.
    pub fn spec_str(&self, key: &str) -> Option<&str> {
        self.spec.get(key).and_then(|v| v.as_str())
    }
}

/// Compound reference to an entity: `kind:namespace/name`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntityRef {
    pub kind: String,
    pub namespace: String,
    pub name: String,
}

impl EntityRef {
    pub fn new(kind: impl Into<String>, namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            namespace: namespace.into(),
            name: name.into(),
        }
    }

    /// Lowercased form used for comparisons and hashing.
    pub fn canonical(&self) -> Self {
        Self::new(
            self.kind.to_lowercase(),
            self.namespace.to_lowercase(),
            self.name.to_lowercase(),
        )
    }

    /// Case-insensitive equality under the same folding as [`canonical`](Self::canonical),
    /// so lookups and hash tokens agree on which references are equal.
    pub fn matches(&self, other: &EntityRef) -> bool {
        self.canonical() == other.canonical()
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}/{}", self.kind, self.namespace, self.name)
    }
}
