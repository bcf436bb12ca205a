// Package model provides catalog entity and badge models.

pub mod badge;
pub mod entity;


pub use badge::{Badge, BadgeInfo, BadgeSpec, BadgeStyle};
pub use entity::{Entity, EntityMetadata, EntityRef, DEFAULT_NAMESPACE};
