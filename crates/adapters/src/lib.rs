//! # ai-mcp-adapters
//!
//! Adapter implementations for ports (secrets backends).
//! This crate depends on `ports`, `shared`, and `config`.

/// Secrets backends.
pub mod secrets;

pub use secrets::{
    ChainedSecretsProvider, DirectorySecretsProvider, EnvSecretsProvider, InMemorySecretsProvider,
};

/// Returns the adapters crate version.
#[must_use]
pub const fn adapters_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
