//! Environment variable parsing and env-to-config merging.
//!
//! Parsing here is lenient on purpose:
//! - an absent or empty variable leaves the field untouched
//! - a value that fails to parse is logged at debug level and ignored, so
//!   the field keeps whatever the previous layer produced
//! - each field is handled independently; one bad value never discards the
//!   rest of the environment
//!
//! Credentials are not read here. They come from the secrets overlay.

use crate::schema::ServerConfig;
use ai_mcp_shared::redact_if_secret;
use std::collections::BTreeMap;
use std::str::FromStr;

/// Env var: server name.
pub const ENV_SERVER_NAME: &str = "MCP_SERVER_NAME";
/// Env var: server version.
pub const ENV_SERVER_VERSION: &str = "MCP_SERVER_VERSION";
/// Env var: comma separated transport list.
pub const ENV_TRANSPORT_TYPE: &str = "MCP_TRANSPORT_TYPE";
/// Env var: TCP bind host.
pub const ENV_TCP_HOST: &str = "MCP_TCP_HOST";
/// Env var: TCP port.
pub const ENV_TCP_PORT: &str = "MCP_TCP_PORT";
/// Env var: websocket port.
pub const ENV_WS_PORT: &str = "MCP_WS_PORT";
/// Env var: websocket path.
pub const ENV_WS_PATH: &str = "MCP_WS_PATH";
/// Env var: comma separated websocket origin allow-list.
pub const ENV_WS_ORIGINS: &str = "MCP_WS_ORIGINS";

/// Env var: chat service discriminator.
pub const ENV_AI_SERVICE_TYPE: &str = "AI_SERVICE_TYPE";

/// Env var: Claude default model.
pub const ENV_CLAUDE_DEFAULT_MODEL: &str = "CLAUDE_DEFAULT_MODEL";
/// Env var: Claude default max tokens.
pub const ENV_CLAUDE_DEFAULT_MAX_TOKENS: &str = "CLAUDE_DEFAULT_MAX_TOKENS";
/// Env var: Claude default temperature.
pub const ENV_CLAUDE_DEFAULT_TEMPERATURE: &str = "CLAUDE_DEFAULT_TEMPERATURE";
/// Env var: OpenAI default model.
pub const ENV_OPENAI_DEFAULT_MODEL: &str = "OPENAI_DEFAULT_MODEL";
/// Env var: OpenAI default max tokens.
pub const ENV_OPENAI_DEFAULT_MAX_TOKENS: &str = "OPENAI_DEFAULT_MAX_TOKENS";
/// Env var: OpenAI default temperature.
pub const ENV_OPENAI_DEFAULT_TEMPERATURE: &str = "OPENAI_DEFAULT_TEMPERATURE";

/// Env var: selected embedding model.
pub const ENV_EMBEDDING_MODEL: &str = "EMBEDDING_MODEL";
/// Env var: large embedding tier URL.
pub const ENV_EMBEDDINGS_LARGE_API_URL: &str = "EMBEDDINGS_3_LARGE_API_URL";
/// Env var: small embedding tier URL.
pub const ENV_EMBEDDINGS_SMALL_API_URL: &str = "EMBEDDINGS_3_SMALL_API_URL";
/// Env var: Azure embedding deployment name.
pub const ENV_AZURE_EMBEDDING_DEPLOYMENT: &str = "AZURE_OPENAI_EMBEDDING_DEPLOYMENT";

/// Every variable the env overlay recognizes.
pub const RECOGNIZED_ENV_VARS: [&str; 19] = [
    ENV_SERVER_NAME,
    ENV_SERVER_VERSION,
    ENV_TRANSPORT_TYPE,
    ENV_TCP_HOST,
    ENV_TCP_PORT,
    ENV_WS_PORT,
    ENV_WS_PATH,
    ENV_WS_ORIGINS,
    ENV_AI_SERVICE_TYPE,
    ENV_CLAUDE_DEFAULT_MODEL,
    ENV_CLAUDE_DEFAULT_MAX_TOKENS,
    ENV_CLAUDE_DEFAULT_TEMPERATURE,
    ENV_OPENAI_DEFAULT_MODEL,
    ENV_OPENAI_DEFAULT_MAX_TOKENS,
    ENV_OPENAI_DEFAULT_TEMPERATURE,
    ENV_EMBEDDING_MODEL,
    ENV_EMBEDDINGS_LARGE_API_URL,
    ENV_EMBEDDINGS_SMALL_API_URL,
    ENV_AZURE_EMBEDDING_DEPLOYMENT,
];

/// Typed env-derived overrides for `ServerConfig`.
///
/// `None` means "leave the field alone": either the variable was absent or
/// its value could not be parsed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServerEnv {
    /// Override for `server.name`.
    pub server_name: Option<String>,
    /// Override for `server.version`.
    pub server_version: Option<String>,
    /// Override for `transport.types`.
    pub transport_types: Option<Vec<String>>,
    /// Override for `transport.tcpHost`.
    pub tcp_host: Option<String>,
    /// Override for `transport.tcpPort`.
    pub tcp_port: Option<u16>,
    /// Override for `transport.wsPort`.
    pub ws_port: Option<u16>,
    /// Override for `transport.wsPath`.
    pub ws_path: Option<String>,
    /// Override for `transport.wsOrigins`.
    pub ws_origins: Option<Vec<String>>,
    /// Override for `aiServiceType`.
    pub ai_service_type: Option<String>,
    /// Overrides for `claude.*`.
    pub claude: ChatProviderEnv,
    /// Overrides for `openai.*`.
    pub openai: ChatProviderEnv,
    /// Override for `embedding.model`.
    pub embedding_model: Option<String>,
    /// Override for `embedding.large.apiUrl`.
    pub embeddings_large_api_url: Option<String>,
    /// Override for `embedding.small.apiUrl`.
    pub embeddings_small_api_url: Option<String>,
    /// Override for `embedding.azureDeployment`.
    pub azure_embedding_deployment: Option<String>,
}

/// Per-provider chat overrides.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChatProviderEnv {
    /// Override for `defaultModel`.
    pub default_model: Option<String>,
    /// Override for `defaultMaxTokens`.
    pub default_max_tokens: Option<u32>,
    /// Override for `defaultTemperature`.
    pub default_temperature: Option<f64>,
}

impl ChatProviderEnv {
    fn from_map(
        map: &BTreeMap<String, String>,
        model_var: &'static str,
        max_tokens_var: &'static str,
        temperature_var: &'static str,
    ) -> Self {
        Self {
            default_model: parse_optional_string(map, model_var),
            default_max_tokens: parse_optional_number(map, max_tokens_var),
            default_temperature: parse_optional_finite(map, temperature_var),
        }
    }
}

impl ServerEnv {
    /// Parse env overrides from a key/value map (useful for tests and fixtures).
    ///
    /// Never fails: unparsable values are dropped field by field.
    #[must_use]
    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        Self {
            server_name: parse_optional_string(map, ENV_SERVER_NAME),
            server_version: parse_optional_string(map, ENV_SERVER_VERSION),
            transport_types: parse_optional_csv(map, ENV_TRANSPORT_TYPE),
            tcp_host: parse_optional_string(map, ENV_TCP_HOST),
            tcp_port: parse_optional_number(map, ENV_TCP_PORT),
            ws_port: parse_optional_number(map, ENV_WS_PORT),
            ws_path: parse_optional_string(map, ENV_WS_PATH),
            ws_origins: parse_optional_csv(map, ENV_WS_ORIGINS),
            ai_service_type: parse_optional_string(map, ENV_AI_SERVICE_TYPE),
            claude: ChatProviderEnv::from_map(
                map,
                ENV_CLAUDE_DEFAULT_MODEL,
                ENV_CLAUDE_DEFAULT_MAX_TOKENS,
                ENV_CLAUDE_DEFAULT_TEMPERATURE,
            ),
            openai: ChatProviderEnv::from_map(
                map,
                ENV_OPENAI_DEFAULT_MODEL,
                ENV_OPENAI_DEFAULT_MAX_TOKENS,
                ENV_OPENAI_DEFAULT_TEMPERATURE,
            ),
            embedding_model: parse_optional_string(map, ENV_EMBEDDING_MODEL),
            embeddings_large_api_url: parse_present_string(map, ENV_EMBEDDINGS_LARGE_API_URL),
            embeddings_small_api_url: parse_present_string(map, ENV_EMBEDDINGS_SMALL_API_URL),
            azure_embedding_deployment: parse_present_string(map, ENV_AZURE_EMBEDDING_DEPLOYMENT),
        }
    }

    /// Parse env overrides from the current process environment.
    #[must_use]
    pub fn from_std_env() -> Self {
        Self::from_map(&collect_std_env())
    }
}

/// Snapshot the recognized variables from the process environment.
///
/// Only the names in [`RECOGNIZED_ENV_VARS`] are copied, so credentials that
/// happen to live in the environment never enter the resolver's input map.
#[must_use]
pub fn collect_std_env() -> BTreeMap<String, String> {
    RECOGNIZED_ENV_VARS
        .iter()
        .filter_map(|name| {
            std::env::var(name)
                .ok()
                .map(|value| ((*name).to_string(), value))
        })
        .collect()
}

/// Apply env overrides to a config (env wins over defaults).
pub fn apply_env_overrides(config: &mut ServerConfig, env: &ServerEnv) {
    set(&mut config.server.name, env.server_name.as_ref());
    set(&mut config.server.version, env.server_version.as_ref());

    set(&mut config.transport.types, env.transport_types.as_ref());
    set(&mut config.transport.tcp_host, env.tcp_host.as_ref());
    set(&mut config.transport.tcp_port, env.tcp_port.as_ref());
    set(&mut config.transport.ws_port, env.ws_port.as_ref());
    set(&mut config.transport.ws_path, env.ws_path.as_ref());
    set_opt(&mut config.transport.ws_origins, env.ws_origins.as_ref());

    set(&mut config.ai_service_type, env.ai_service_type.as_ref());

    apply_chat_provider_env(&mut config.claude, &env.claude);
    apply_chat_provider_env(&mut config.openai, &env.openai);

    set(&mut config.embedding.model, env.embedding_model.as_ref());
    set_opt(
        &mut config.embedding.large.api_url,
        env.embeddings_large_api_url.as_ref(),
    );
    set_opt(
        &mut config.embedding.small.api_url,
        env.embeddings_small_api_url.as_ref(),
    );
    set_opt(
        &mut config.embedding.azure_deployment,
        env.azure_embedding_deployment.as_ref(),
    );
}

fn apply_chat_provider_env(provider: &mut crate::schema::ChatProviderConfig, env: &ChatProviderEnv) {
    set(&mut provider.default_model, env.default_model.as_ref());
    set(&mut provider.default_max_tokens, env.default_max_tokens.as_ref());
    set(
        &mut provider.default_temperature,
        env.default_temperature.as_ref(),
    );
}

fn set<T: Clone>(field: &mut T, value: Option<&T>) {
    if let Some(value) = value {
        field.clone_from(value);
    }
}

fn set_opt<T: Clone>(field: &mut Option<T>, value: Option<&T>) {
    if let Some(value) = value {
        *field = Some(value.clone());
    }
}

/// Value of a variable that is present and non-empty.
fn read_non_empty<'a>(map: &'a BTreeMap<String, String>, var: &str) -> Option<&'a str> {
    map.get(var)
        .map(String::as_str)
        .filter(|value| !value.is_empty())
}

fn parse_optional_string(map: &BTreeMap<String, String>, var: &'static str) -> Option<String> {
    read_non_empty(map, var).map(ToOwned::to_owned)
}

/// Endpoint-style fields take the raw value whenever the variable exists,
/// including an empty string.
fn parse_present_string(map: &BTreeMap<String, String>, var: &'static str) -> Option<String> {
    map.get(var).cloned()
}

fn parse_optional_number<T: FromStr>(
    map: &BTreeMap<String, String>,
    var: &'static str,
) -> Option<T> {
    let raw = read_non_empty(map, var)?;
    if let Ok(value) = raw.trim().parse::<T>() {
        return Some(value);
    }

    tracing::debug!(
        env_var = var,
        value = %redact_if_secret(var, raw),
        "ignoring unparsable env value; keeping previous setting"
    );
    None
}

/// NaN and infinities parse as `f64` but have no JSON form.
fn parse_optional_finite(map: &BTreeMap<String, String>, var: &'static str) -> Option<f64> {
    let value = parse_optional_number::<f64>(map, var)?;
    if value.is_finite() {
        return Some(value);
    }

    tracing::debug!(
        env_var = var,
        value = %value,
        "ignoring non-finite env value; keeping previous setting"
    );
    None
}

fn parse_optional_csv(map: &BTreeMap<String, String>, var: &'static str) -> Option<Vec<String>> {
    read_non_empty(map, var).map(parse_csv)
}

/// Split on commas and trim each element. Empty elements are kept.
pub(crate) fn parse_csv(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .map(ToOwned::to_owned)
        .collect()
}
