//! Server configuration schema and defaults.
//!
//! `ServerConfig::default()` is the first resolution layer: it never touches
//! the environment or the secrets backend. List-valued fields are filled by
//! [`ServerConfig::normalize`], which allocates fresh vectors on every call
//! and only touches lists that are still empty.

use ai_mcp_shared::SecretString;
use serde::Serialize;

/// Default server name.
pub const DEFAULT_SERVER_NAME: &str = "ai-mcp-server";
/// Default server version string.
pub const DEFAULT_SERVER_VERSION: &str = "1.0.0";
/// Default server description.
pub const DEFAULT_SERVER_DESCRIPTION: &str = "MCP Server with multiple AI model integration";

/// Local pipe transport.
pub const TRANSPORT_STDIO: &str = "stdio";
/// Network socket transport.
pub const TRANSPORT_TCP: &str = "tcp";
/// Persistent bidirectional connection transport.
pub const TRANSPORT_WEBSOCKET: &str = "websocket";
/// Transports this workspace knows how to describe. The set stays open:
/// other names are carried through untouched.
pub const KNOWN_TRANSPORTS: [&str; 3] = [TRANSPORT_STDIO, TRANSPORT_TCP, TRANSPORT_WEBSOCKET];

/// Default TCP bind host.
pub const DEFAULT_TCP_HOST: &str = "127.0.0.1";
/// Default TCP port.
pub const DEFAULT_TCP_PORT: u16 = 9000;
/// Default websocket port.
pub const DEFAULT_WS_PORT: u16 = 8765;
/// Default websocket path.
pub const DEFAULT_WS_PATH: &str = "/";

/// Claude-backed chat service.
pub const SERVICE_TYPE_CLAUDE: &str = "claude";
/// OpenAI-backed chat service.
pub const SERVICE_TYPE_OPENAI: &str = "openai";
/// Offline mock chat service.
pub const SERVICE_TYPE_MOCK: &str = "mock";

const CLAUDE_DEFAULT_MODEL: &str = "claude-3-opus-20240229";
const CLAUDE_DEFAULT_MAX_TOKENS: u32 = 4096;
const OPENAI_DEFAULT_MODEL: &str = "gpt-4o";
const OPENAI_DEFAULT_MAX_TOKENS: u32 = 1024;
const DEFAULT_TEMPERATURE: f64 = 0.7;
const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-small";

/// Default Claude model catalog.
#[must_use]
pub fn default_claude_models() -> Vec<String> {
    to_owned_list(&[
        "claude-3-opus-20240229",
        "claude-3-sonnet-20240229",
        "claude-3-haiku-20240307",
    ])
}

/// Default OpenAI model catalog.
#[must_use]
pub fn default_openai_models() -> Vec<String> {
    to_owned_list(&["gpt-4o", "gpt-4-turbo", "gpt-4", "gpt-3.5-turbo"])
}

/// Default embedding model catalog.
#[must_use]
pub fn default_embedding_models() -> Vec<String> {
    to_owned_list(&["text-embedding-3-small", "text-embedding-3-large"])
}

/// Default transport set.
#[must_use]
pub fn default_transport_types() -> Vec<String> {
    to_owned_list(&[TRANSPORT_STDIO])
}

fn to_owned_list(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| (*item).to_owned()).collect()
}

/// Fully resolved server configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerConfig {
    /// Server identity reported to clients.
    pub server: ServerIdentity,
    /// Enabled transports and their endpoints.
    pub transport: TransportConfig,
    /// Discriminator selecting the chat/completion backend (`claude`,
    /// `openai`, `mock`, or anything a later provider registers).
    pub ai_service_type: String,
    /// Claude provider defaults and credentials.
    pub claude: ChatProviderConfig,
    /// OpenAI provider defaults and credentials.
    pub openai: ChatProviderConfig,
    /// Embedding subsystem settings.
    pub embedding: EmbeddingConfig,
    /// Vector store endpoint.
    pub vector_store: VectorStoreConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        let mut config = Self {
            server: ServerIdentity::default(),
            transport: TransportConfig::default(),
            ai_service_type: SERVICE_TYPE_CLAUDE.to_owned(),
            claude: ChatProviderConfig::new(CLAUDE_DEFAULT_MODEL, CLAUDE_DEFAULT_MAX_TOKENS),
            openai: ChatProviderConfig::new(OPENAI_DEFAULT_MODEL, OPENAI_DEFAULT_MAX_TOKENS),
            embedding: EmbeddingConfig::default(),
            vector_store: VectorStoreConfig::default(),
        };
        config.normalize();
        config
    }
}

impl ServerConfig {
    /// Fill list fields that were not supplied with their default content.
    ///
    /// Lists that already hold entries are left exactly as they are.
    pub fn normalize(&mut self) {
        fill_if_empty(&mut self.transport.types, default_transport_types);
        fill_if_empty(&mut self.claude.models, default_claude_models);
        fill_if_empty(&mut self.openai.models, default_openai_models);
        fill_if_empty(&mut self.embedding.models, default_embedding_models);
    }

    /// Returns true when the named transport is enabled.
    #[must_use]
    pub fn has_transport(&self, name: &str) -> bool {
        self.transport.types.iter().any(|item| item == name)
    }

    /// Provider settings for the currently selected chat service, if any.
    #[must_use]
    pub fn selected_chat_provider(&self) -> Option<&ChatProviderConfig> {
        match self.ai_service_type.as_str() {
            SERVICE_TYPE_CLAUDE => Some(&self.claude),
            SERVICE_TYPE_OPENAI => Some(&self.openai),
            _ => None,
        }
    }
}

fn fill_if_empty(list: &mut Vec<String>, defaults: fn() -> Vec<String>) {
    if list.is_empty() {
        *list = defaults();
    }
}

/// Server identity block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerIdentity {
    /// Server name.
    pub name: String,
    /// Server version.
    pub version: String,
    /// Free-form description.
    pub description: String,
}

impl Default for ServerIdentity {
    fn default() -> Self {
        Self {
            name: DEFAULT_SERVER_NAME.to_owned(),
            version: DEFAULT_SERVER_VERSION.to_owned(),
            description: DEFAULT_SERVER_DESCRIPTION.to_owned(),
        }
    }
}

/// Transport selection and endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransportConfig {
    /// Enabled transports in declaration order. Left empty by `Default` and
    /// filled by [`ServerConfig::normalize`].
    pub types: Vec<String>,
    /// TCP bind host.
    pub tcp_host: String,
    /// TCP port.
    pub tcp_port: u16,
    /// Websocket port.
    pub ws_port: u16,
    /// Websocket path.
    pub ws_path: String,
    /// Optional websocket origin allow-list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ws_origins: Option<Vec<String>>,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            types: Vec::new(),
            tcp_host: DEFAULT_TCP_HOST.to_owned(),
            tcp_port: DEFAULT_TCP_PORT,
            ws_port: DEFAULT_WS_PORT,
            ws_path: DEFAULT_WS_PATH.to_owned(),
            ws_origins: None,
        }
    }
}

/// Per-provider chat defaults.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatProviderConfig {
    /// API key (secrets backend or CLI only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<SecretString>,
    /// Default model identifier.
    pub default_model: String,
    /// Default max output tokens.
    pub default_max_tokens: u32,
    /// Default sampling temperature. Out-of-range values are kept as-is.
    pub default_temperature: f64,
    /// Advisory model catalog.
    pub models: Vec<String>,
}

impl ChatProviderConfig {
    fn new(default_model: &str, default_max_tokens: u32) -> Self {
        Self {
            api_key: None,
            default_model: default_model.to_owned(),
            default_max_tokens,
            default_temperature: DEFAULT_TEMPERATURE,
            models: Vec::new(),
        }
    }
}

/// Embedding subsystem settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbeddingConfig {
    /// Selected embedding model.
    pub model: String,
    /// Advisory embedding model catalog.
    pub models: Vec<String>,
    /// Endpoint for the large embedding tier.
    pub large: EmbeddingEndpoint,
    /// Endpoint for the small embedding tier.
    pub small: EmbeddingEndpoint,
    /// Azure-style deployment name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub azure_deployment: Option<String>,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_EMBEDDING_MODEL.to_owned(),
            models: Vec::new(),
            large: EmbeddingEndpoint::default(),
            small: EmbeddingEndpoint::default(),
            azure_deployment: None,
        }
    }
}

/// One embedding tier endpoint: URL from the environment, key from secrets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbeddingEndpoint {
    /// Endpoint URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
    /// Endpoint key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<SecretString>,
}

/// Vector store endpoint; both values come from the secrets backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VectorStoreConfig {
    /// Endpoint URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<SecretString>,
    /// API key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<SecretString>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_structurally_complete() {
        let config = ServerConfig::default();

        assert_eq!(config.server.name, DEFAULT_SERVER_NAME);
        assert_eq!(config.transport.types, vec!["stdio".to_string()]);
        assert_eq!(config.transport.tcp_port, 9000);
        assert_eq!(config.transport.ws_port, 8765);
        assert_eq!(config.transport.ws_path, "/");
        assert!(config.transport.ws_origins.is_none());
        assert_eq!(config.ai_service_type, "claude");
        assert_eq!(config.claude.default_model, "claude-3-opus-20240229");
        assert_eq!(config.claude.default_max_tokens, 4096);
        assert_eq!(config.openai.default_model, "gpt-4o");
        assert_eq!(config.openai.default_max_tokens, 1024);
        assert!((config.openai.default_temperature - 0.7).abs() < f64::EPSILON);
        assert_eq!(config.embedding.model, "text-embedding-3-small");
        assert_eq!(config.claude.models.len(), 3);
        assert_eq!(config.openai.models.len(), 4);
        assert_eq!(config.embedding.models.len(), 2);
    }

    #[test]
    fn defaults_leave_credentials_and_endpoints_absent() {
        let config = ServerConfig::default();

        assert!(config.claude.api_key.is_none());
        assert!(config.openai.api_key.is_none());
        assert_eq!(config.embedding.large, EmbeddingEndpoint::default());
        assert_eq!(config.embedding.small, EmbeddingEndpoint::default());
        assert!(config.embedding.azure_deployment.is_none());
        assert_eq!(config.vector_store, VectorStoreConfig::default());
    }

    #[test]
    fn catalogs_are_independent_across_constructions() {
        let mut first = ServerConfig::default();
        let second = ServerConfig::default();

        first.claude.models.push("claude-next".to_string());
        first.transport.types.push("tcp".to_string());
        first.embedding.models.clear();

        assert_eq!(second.claude.models, default_claude_models());
        assert_eq!(second.transport.types, default_transport_types());
        assert_eq!(second.embedding.models, default_embedding_models());
    }

    #[test]
    fn normalize_keeps_explicit_lists() {
        let mut config = ServerConfig::default();
        config.openai.models = vec!["o1".to_string()];
        config.transport.types = vec!["websocket".to_string()];
        config.claude.models.clear();

        config.normalize();

        assert_eq!(config.openai.models, vec!["o1".to_string()]);
        assert_eq!(config.transport.types, vec!["websocket".to_string()]);
        assert_eq!(config.claude.models, default_claude_models());
    }

    #[test]
    fn selected_chat_provider_follows_discriminator() {
        let mut config = ServerConfig::default();
        assert_eq!(
            config.selected_chat_provider().map(|p| p.default_model.as_str()),
            Some("claude-3-opus-20240229")
        );

        config.ai_service_type = SERVICE_TYPE_OPENAI.to_string();
        assert_eq!(
            config.selected_chat_provider().map(|p| p.default_model.as_str()),
            Some("gpt-4o")
        );

        config.ai_service_type = SERVICE_TYPE_MOCK.to_string();
        assert!(config.selected_chat_provider().is_none());
    }
}
