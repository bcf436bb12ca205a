// Shared test support code for integration tests.

pub mod badges;
pub mod catalog;
pub mod common;
pub mod harness;

pub use common::*;
pub use harness::TestStack;
