//! Service layer for business logic
//!
//! Transport independent logic shared between the HTTP API and the CLI.

mod counter_service;

pub use counter_service::*;
