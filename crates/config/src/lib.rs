//! # ai-mcp-config
//!
//! Layered configuration for the ai-mcp server: built-in defaults, an
//! environment overlay, a secrets overlay and a command-line overlay.
//! This crate depends on `ports` and `shared` only.

/// Command-line overlay.
pub mod cli;
/// Advisory checks over a resolved config.
pub mod diagnostics;
/// Environment variable parsing and merging.
pub mod env;
/// Config resolution and serialization.
pub mod load;
/// Configuration schema types and defaults.
pub mod schema;
/// Credential overlay backed by a `SecretsProvider`.
pub mod secrets;

pub use cli::{CliOverrides, apply_cli_overrides};
pub use diagnostics::{ConfigWarning, diagnose};
pub use env::{RECOGNIZED_ENV_VARS, ServerEnv, apply_env_overrides, collect_std_env};
pub use load::{
    ConfigFormat, ConfigResolver, load_server_config_std_env, render_config, to_pretty_json,
    to_pretty_toml,
};
pub use schema::{
    ChatProviderConfig, EmbeddingConfig, EmbeddingEndpoint, KNOWN_TRANSPORTS, ServerConfig,
    ServerIdentity, TransportConfig, VectorStoreConfig,
};
pub use secrets::{SECRET_KEYS, apply_secret_overrides};

/// Returns the config crate version.
#[must_use]
pub const fn config_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;
    use ai_mcp_ports::ports_crate_version;
    use ai_mcp_shared::shared_crate_version;

    #[test]
    fn config_crate_compiles() {
        let version = config_crate_version();
        assert!(!version.is_empty());
    }

    #[test]
    fn config_can_use_ports_and_shared() {
        assert!(!ports_crate_version().is_empty());
        assert!(!shared_crate_version().is_empty());
    }

    #[test]
    fn secret_keys_never_overlap_env_vars() {
        for key in SECRET_KEYS {
            assert!(!RECOGNIZED_ENV_VARS.contains(&key), "{key} is read from env");
        }
    }
}
