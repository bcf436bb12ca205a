//! Badge service for software catalog entities.
//!
//! Resolves catalog entities by their coordinates or by an obfuscated hash and
//! renders their badges as SVG images, JSON descriptions or badge spec lists.

pub mod app;
pub mod badges;
pub mod catalog;
pub mod config;
pub mod controller;
pub mod discovery;
pub mod hash;
pub mod http;
pub mod identity;
pub mod middleware;
pub mod model;
pub mod shutdown;

#[cfg(test)]
mod tests;

#[cfg(test)]
pub use tests::support;
