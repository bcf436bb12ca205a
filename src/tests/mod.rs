//! Integration tests for the badges service.
//!
//! Router level cases drive the layered router in process; the e2e cases run
//! the whole application against a fake remote catalog over real sockets.

mod cases_error_handling_test;

pub mod support;
