//! # turntabled-server
//!
//! HTTP surface for turntabled.
//!
//! This crate provides:
//! - The axum router binding each action endpoint to the engine
//! - Error-to-HTTP mapping with a stable error envelope
//! - Server configuration (YAML file + environment overrides)
//! - The serve loop with graceful shutdown
//!
//! Handlers are thin forwarders: legality lives in the engine's
//! transition table, and the hypermedia links in every response come from
//! the same table.

pub mod config;
pub mod error;
pub mod routes;
pub mod server;

pub use config::{CatalogConfig, Config, ConfigError, NetworkConfig};
pub use error::{ApiError, ServerError};
pub use routes::{router, AppState};
pub use server::run_server;
