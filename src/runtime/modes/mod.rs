//! Mode routing
//!
//! - Server mode (HTTP server, default)
//! - CLI mode (one-shot commands against the configured store)

pub mod server;

#[cfg(feature = "cli")]
pub mod cli;

pub use server::run_server;

#[cfg(feature = "cli")]
pub use cli::run_cli;
