// Badge builder: turns badge ids and an entity into badge specs and images.

use anyhow::Result;
use std::sync::Arc;

use super::factories::{BadgeFactories, BadgeFactory};
use super::svg;
use crate::model::{Badge, BadgeInfo, BadgeSpec, Entity};

/// Frontend details factories use to build links and descriptions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppInfo {
    pub title: String,
    pub base_url: String,
}

/// Everything a factory may look at when producing a badge.
pub struct BadgeContext<'a> {
    pub badge_url: String,
    pub entity: &'a Entity,
    pub app: &'a AppInfo,
}

pub struct BadgeOptions<'a> {
    pub badge_info: BadgeInfo,
    pub context: BadgeContext<'a>,
}

#[async_trait::async_trait]
pub trait BadgeBuilder: Send + Sync {
    /// Lists the badges this builder can produce.
    async fn get_badges(&self) -> Result<Vec<BadgeInfo>>;

    async fn create_badge_json(&self, options: &BadgeOptions<'_>) -> Result<BadgeSpec>;

    async fn create_badge_svg(&self, options: &BadgeOptions<'_>) -> Result<String>;
}

/// Builder driven by a set of badge factories keyed by id.
pub struct DefaultBadgeBuilder {
    factories: BadgeFactories,
}

impl DefaultBadgeBuilder {
    pub fn new(factories: BadgeFactories) -> Self {
        Self { factories }
    }

    fn factory(&self, id: &str) -> Option<&Arc<dyn BadgeFactory>> {
        self.factories
            .iter()
            .find(|(factory_id, _)| factory_id == id)
            .map(|(_, factory)| factory)
    }

    fn create_badge(&self, options: &BadgeOptions<'_>) -> Badge {
        match self.factory(&options.badge_info.id) {
            Some(factory) => factory.create_badge(&options.context),
            None => Badge::new("unknown badge", options.badge_info.id.clone()).with_color("red"),
        }
    }
}

#[async_trait::async_trait]
impl BadgeBuilder for DefaultBadgeBuilder {
    async fn get_badges(&self) -> Result<Vec<BadgeInfo>> {
        Ok(self
            .factories
            .iter()
            .map(|(id, _)| BadgeInfo::new(id.clone()))
            .collect())
    }

    async fn create_badge_json(&self, options: &BadgeOptions<'_>) -> Result<BadgeSpec> {
        let badge = self.create_badge(options);
        let url = options.context.badge_url.clone();
        let markdown = markdown_code(&badge, &url);

        Ok(BadgeSpec {
            id: options.badge_info.id.clone(),
            badge,
            url,
            markdown,
        })
    }

    async fn create_badge_svg(&self, options: &BadgeOptions<'_>) -> Result<String> {
        Ok(svg::render(&self.create_badge(options)))
    }
}

/// Markdown snippet embedding the badge image, linked when the badge has a link.
pub fn markdown_code(badge: &Badge, badge_url: &str) -> String {
    let mut alt_text = format!("{}: {}", badge.label, badge.message);
    if let Some(description) = badge.description.as_deref() {
        if description != badge.label {
            alt_text = format!("{description}, {alt_text}");
        }
    }

    let tooltip = badge
        .description
        .as_deref()
        .map(|d| format!(" \"{d}\""))
        .unwrap_or_default();
    let image = format!("![{alt_text}]({badge_url}{tooltip})");

    match badge.link.as_deref() {
        Some(link) => format!("[{image}]({link})"),
        None => image,
    }
}
