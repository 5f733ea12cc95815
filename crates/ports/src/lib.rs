//! # ai-mcp-ports
//!
//! Port traits for the ai-mcp hexagonal architecture.
//!
//! This crate defines the interfaces between configuration resolution and
//! the infrastructure that backs it. It depends only on `shared`.

/// Returns the ports crate version.
#[must_use]
pub const fn ports_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

pub mod secrets;

pub use secrets::*;
