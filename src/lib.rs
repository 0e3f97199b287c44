//! calclick - "add to calendar" click counter
//!
//! Counts how many times visitors clicked an add-to-calendar action, per
//! event and calendar platform, and serves the aggregates over HTTP.
//!
//! # Features
//! - **server**: HTTP server mode (default)
//! - **cli**: Command-line interface (default)
//!
//! # Architecture
//! - `storage`: `StatStore` trait, SeaORM (SQLite / PostgreSQL / MySQL) and in-memory stores
//! - `services`: `CounterService`, validation and aggregation
//! - `api`: HTTP routes and middleware
//! - `interfaces`: CLI commands
//! - `config`: Configuration loading
//! - `runtime`: Startup, shutdown and execution modes
//! - `system`: Logging and panic hook

pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod interfaces;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod system;
