// Package badges provides badge building and rendering.

pub mod builder;
pub mod factories;
pub mod svg;


pub use builder::{AppInfo, BadgeBuilder, BadgeContext, BadgeOptions, DefaultBadgeBuilder};
pub use factories::{default_factories, BadgeFactories, BadgeFactory};
