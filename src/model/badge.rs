// Badge content and the JSON descriptor returned to clients.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BadgeStyle {
    Plastic,
    #[default]
    Flat,
    FlatSquare,
    ForTheBadge,
    Social,
}

/// Renderable badge content.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Badge {
    pub label: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<BadgeStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl Badge {
    pub fn new(label: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            message: message.into(),
            ..Default::default()
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_style(mut self, style: BadgeStyle) -> Self {
        self.style = Some(style);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    pub fn for_entity(mut self) -> Self {
        self.kind = Some("entity".to_string());
        self
    }
}

/// Identifier of a badge offered by the builder.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct BadgeInfo {
    pub id: String,
}

impl BadgeInfo {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// JSON descriptor of a badge: content plus the ways to embed it.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct BadgeSpec {
    pub id: String,
    pub badge: Badge,
    pub url: String,
    pub markdown: String,
}
