//! Config resolution (defaults + env + secrets + CLI) and serialization.
//!
//! The resolver is responsible for deterministic overlay order and for
//! surfacing provider failures as typed `ErrorEnvelope`s.

use crate::cli::{CliOverrides, apply_cli_overrides};
use crate::env::{ServerEnv, apply_env_overrides, collect_std_env};
use crate::schema::ServerConfig;
use crate::secrets::apply_secret_overrides;
use ai_mcp_ports::SecretsProvider;
use ai_mcp_shared::{ErrorClass, ErrorCode, ErrorEnvelope, Result};
use std::collections::BTreeMap;

/// Resolves a `ServerConfig` from an environment snapshot and a secrets
/// backend.
///
/// Overlay order (later wins):
/// - defaults (`ServerConfig::default()`)
/// - env overrides (`ServerEnv`)
/// - secrets (credential fields only)
/// - CLI overrides (`from_args` only)
#[derive(Debug)]
pub struct ConfigResolver<'a, S: ?Sized> {
    env: &'a BTreeMap<String, String>,
    secrets: &'a S,
}

impl<'a, S> ConfigResolver<'a, S>
where
    S: SecretsProvider + ?Sized,
{
    /// Create a resolver over an environment map and a secrets provider.
    pub const fn new(env: &'a BTreeMap<String, String>, secrets: &'a S) -> Self {
        Self { env, secrets }
    }

    /// Defaults overlaid with the environment and the secrets backend.
    pub fn from_env(&self) -> Result<ServerConfig> {
        let mut config = ServerConfig::default();
        apply_env_overrides(&mut config, &ServerEnv::from_map(self.env));
        apply_secret_overrides(&mut config, self.secrets)?;

        tracing::info!(
            server = %config.server.name,
            transports = ?config.transport.types,
            service = %config.ai_service_type,
            "resolved server config"
        );
        Ok(config)
    }

    /// `from_env` followed by the CLI overlay.
    pub fn from_args(&self, overrides: &CliOverrides) -> Result<ServerConfig> {
        let mut config = self.from_env()?;
        apply_cli_overrides(&mut config, overrides);
        tracing::debug!(
            transports = ?config.transport.types,
            service = %config.ai_service_type,
            "applied CLI overrides"
        );
        Ok(config)
    }
}

/// Resolve from the current process environment and the given secrets.
pub fn load_server_config_std_env<S>(
    secrets: &S,
    overrides: Option<&CliOverrides>,
) -> Result<ServerConfig>
where
    S: SecretsProvider + ?Sized,
{
    let env = collect_std_env();
    let resolver = ConfigResolver::new(&env, secrets);
    match overrides {
        Some(overrides) => resolver.from_args(overrides),
        None => resolver.from_env(),
    }
}

/// Serialization format for the effective config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConfigFormat {
    /// Pretty JSON.
    #[default]
    Json,
    /// Pretty TOML.
    Toml,
}

/// Serialize the config in the requested format.
pub fn render_config(config: &ServerConfig, format: ConfigFormat) -> Result<String> {
    match format {
        ConfigFormat::Json => to_pretty_json(config),
        ConfigFormat::Toml => to_pretty_toml(config),
    }
}

/// Serialize the config as deterministic pretty JSON (with trailing newline).
pub fn to_pretty_json(config: &ServerConfig) -> Result<String> {
    let mut output = serde_json::to_string_pretty(config).map_err(|error| {
        ErrorEnvelope::unexpected(
            ErrorCode::internal(),
            format!("failed to serialize config: {error}"),
            ErrorClass::NonRetriable,
        )
    })?;
    output.push('\n');
    Ok(output)
}

/// Serialize the config as deterministic pretty TOML (with trailing newline).
pub fn to_pretty_toml(config: &ServerConfig) -> Result<String> {
    let mut output = toml::to_string_pretty(config).map_err(|error| {
        ErrorEnvelope::unexpected(
            ErrorCode::new("config", "serialize_toml"),
            format!("failed to serialize config TOML: {error}"),
            ErrorClass::NonRetriable,
        )
    })?;
    output.push('\n');
    Ok(output)
}
