// Default badge factories.

use std::sync::Arc;

use super::builder::BadgeContext;
use crate::model::{Badge, BadgeStyle, Entity};

/// Produces one kind of badge for an entity.
pub trait BadgeFactory: Send + Sync {
    fn create_badge(&self, context: &BadgeContext<'_>) -> Badge;
}

impl<F> BadgeFactory for F
where
    F: Fn(&BadgeContext<'_>) -> Badge + Send + Sync,
{
    fn create_badge(&self, context: &BadgeContext<'_>) -> Badge {
        self(context)
    }
}

/// Ordered list of factories; the order is the order badge specs are listed in.
pub type BadgeFactories = Vec<(String, Arc<dyn BadgeFactory>)>;

pub const PINGBACK: &str = "pingback";
pub const LIFECYCLE: &str = "lifecycle";
pub const OWNER: &str = "owner";
pub const DOCS: &str = "docs";

pub fn default_factories() -> BadgeFactories {
    vec![
        (PINGBACK.to_string(), Arc::new(pingback) as Arc<dyn BadgeFactory>),
        (LIFECYCLE.to_string(), Arc::new(lifecycle) as Arc<dyn BadgeFactory>),
        (OWNER.to_string(), Arc::new(owner) as Arc<dyn BadgeFactory>),
        (DOCS.to_string(), Arc::new(docs) as Arc<dyn BadgeFactory>),
    ]
}

/// Link to the entity page in the portal frontend.
pub fn entity_link(context: &BadgeContext<'_>, section: &str) -> String {
    let entity = context.entity;
    format!(
        "{}/{}/{}/{}/{}",
        context.app.base_url,
        section,
        urlencoding::encode(entity.namespace()),
        urlencoding::encode(&entity.kind.to_lowercase()),
        urlencoding::encode(entity.name()),
    )
}

fn spec_or_unknown<'a>(entity: &'a Entity, key: &str) -> &'a str {
    entity.spec_str(key).unwrap_or("unknown")
}

fn pingback(context: &BadgeContext<'_>) -> Badge {
    let entity = context.entity;
    Badge::new(entity.kind.clone(), entity.display_name())
        .with_description(format!("Link to {} in {}", entity.name(), context.app.title))
        .with_link(entity_link(context, "catalog"))
        .with_style(BadgeStyle::FlatSquare)
        .for_entity()
}

fn lifecycle(context: &BadgeContext<'_>) -> Badge {
    Badge::new("lifecycle", spec_or_unknown(context.entity, "lifecycle"))
        .with_description("Entity lifecycle badge")
        .with_style(BadgeStyle::FlatSquare)
        .for_entity()
}

fn owner(context: &BadgeContext<'_>) -> Badge {
    Badge::new("owner", spec_or_unknown(context.entity, "owner"))
        .with_description("Entity owner badge")
        .with_color("blue")
        .with_style(BadgeStyle::FlatSquare)
        .for_entity()
}

fn docs(context: &BadgeContext<'_>) -> Badge {
    Badge::new("docs", context.entity.name())
        .with_description("Entity docs badge")
        .with_color("brightgreen")
        .with_link(entity_link(context, "docs"))
        .with_style(BadgeStyle::FlatSquare)
        .for_entity()
}
