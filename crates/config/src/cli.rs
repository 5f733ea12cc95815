//! Command-line overlay applied after env and secrets resolution.

use crate::schema::{SERVICE_TYPE_MOCK, ServerConfig, TRANSPORT_TCP, TRANSPORT_WEBSOCKET};
use ai_mcp_shared::SecretString;
use serde_json::{Map, Value};

/// Option name: server name.
pub const ARG_NAME: &str = "name";
/// Option name: enable the TCP transport.
pub const ARG_TCP: &str = "tcp";
/// Option name: enable the websocket transport.
pub const ARG_WEBSOCKET: &str = "websocket";
/// Option name: TCP host.
pub const ARG_HOST: &str = "host";
/// Option name: TCP port.
pub const ARG_PORT: &str = "port";
/// Option name: force the mock chat service.
pub const ARG_MOCK: &str = "mock";
/// Option name: chat service discriminator.
pub const ARG_SERVICE_TYPE: &str = "service_type";
/// Option name: Claude API key.
pub const ARG_CLAUDE_API_KEY: &str = "claude_api_key";
/// Option name: OpenAI API key.
pub const ARG_OPENAI_API_KEY: &str = "openai_api_key";
/// Option name: vector store URL.
pub const ARG_QDRANT_URL: &str = "qdrant_url";
/// Option name: vector store API key.
pub const ARG_QDRANT_API_KEY: &str = "qdrant_api_key";

/// Already-parsed command-line options.
///
/// `None`/`false` means the option was not given. Empty strings and a zero
/// port are treated as not given when applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOverrides {
    /// Replaces `server.name`.
    pub name: Option<String>,
    /// Adds `tcp` to the transport set.
    pub tcp: bool,
    /// Adds `websocket` to the transport set.
    pub websocket: bool,
    /// Replaces `transport.tcpHost`.
    pub host: Option<String>,
    /// Replaces `transport.tcpPort`.
    pub port: Option<u16>,
    /// Forces `aiServiceType = "mock"`.
    pub mock: bool,
    /// Replaces `aiServiceType` unless `mock` is set.
    pub service_type: Option<String>,
    /// Replaces `claude.apiKey`.
    pub claude_api_key: Option<SecretString>,
    /// Replaces `openai.apiKey`.
    pub openai_api_key: Option<SecretString>,
    /// Replaces `vectorStore.url`.
    pub qdrant_url: Option<SecretString>,
    /// Replaces `vectorStore.apiKey`.
    pub qdrant_api_key: Option<SecretString>,
}

impl CliOverrides {
    /// Build overrides from a loose JSON object of option name to value.
    ///
    /// `null`, `false`, `0` and `""` count as not given. Values of the wrong
    /// type for their option are ignored; unknown names are ignored.
    #[must_use]
    pub fn from_value_map(map: &Map<String, Value>) -> Self {
        Self {
            name: string_arg(map, ARG_NAME),
            tcp: flag_arg(map, ARG_TCP),
            websocket: flag_arg(map, ARG_WEBSOCKET),
            host: string_arg(map, ARG_HOST),
            port: port_arg(map, ARG_PORT),
            mock: flag_arg(map, ARG_MOCK),
            service_type: string_arg(map, ARG_SERVICE_TYPE),
            claude_api_key: string_arg(map, ARG_CLAUDE_API_KEY).map(SecretString::from),
            openai_api_key: string_arg(map, ARG_OPENAI_API_KEY).map(SecretString::from),
            qdrant_url: string_arg(map, ARG_QDRANT_URL).map(SecretString::from),
            qdrant_api_key: string_arg(map, ARG_QDRANT_API_KEY).map(SecretString::from),
        }
    }
}

/// Apply CLI overrides on top of an env-resolved config.
pub fn apply_cli_overrides(config: &mut ServerConfig, overrides: &CliOverrides) {
    if let Some(name) = non_empty(overrides.name.as_deref()) {
        config.server.name = name.to_owned();
    }

    if overrides.tcp {
        add_transport(config, TRANSPORT_TCP);
    }
    if overrides.websocket {
        add_transport(config, TRANSPORT_WEBSOCKET);
    }

    if let Some(host) = non_empty(overrides.host.as_deref()) {
        config.transport.tcp_host = host.to_owned();
    }
    if let Some(port) = overrides.port.filter(|port| *port != 0) {
        config.transport.tcp_port = port;
    }

    // mock wins over an explicit service type given alongside it.
    if overrides.mock {
        SERVICE_TYPE_MOCK.clone_into(&mut config.ai_service_type);
    } else if let Some(service_type) = non_empty(overrides.service_type.as_deref()) {
        config.ai_service_type = service_type.to_owned();
    }

    set_secret(&mut config.claude.api_key, overrides.claude_api_key.as_ref());
    set_secret(&mut config.openai.api_key, overrides.openai_api_key.as_ref());
    set_secret(&mut config.vector_store.url, overrides.qdrant_url.as_ref());
    set_secret(
        &mut config.vector_store.api_key,
        overrides.qdrant_api_key.as_ref(),
    );
}

fn add_transport(config: &mut ServerConfig, transport: &str) {
    if !config.has_transport(transport) {
        config.transport.types.push(transport.to_owned());
    }
}

fn set_secret(field: &mut Option<SecretString>, value: Option<&SecretString>) {
    if let Some(value) = value.filter(|value| !value.expose().is_empty()) {
        *field = Some(value.clone());
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.is_empty())
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|number| number != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(entries) => !entries.is_empty(),
    }
}

fn flag_arg(map: &Map<String, Value>, name: &'static str) -> bool {
    map.get(name).is_some_and(is_truthy)
}

fn string_arg(map: &Map<String, Value>, name: &'static str) -> Option<String> {
    match map.get(name)? {
        Value::String(text) if !text.is_empty() => Some(text.clone()),
        value if is_truthy(value) => {
            tracing::debug!(option = name, "ignoring non-string CLI option value");
            None
        },
        _ => None,
    }
}

fn port_arg(map: &Map<String, Value>, name: &'static str) -> Option<u16> {
    let value = map.get(name)?;
    if !is_truthy(value) {
        return None;
    }
    let port = value
        .as_u64()
        .and_then(|number| u16::try_from(number).ok());
    if port.is_none() {
        tracing::debug!(option = name, value = %value, "ignoring invalid CLI port");
    }
    port
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{ENV_TCP_HOST, ENV_TCP_PORT, ServerEnv, apply_env_overrides};
    use crate::schema::{TRANSPORT_STDIO, default_transport_types};
    use serde_json::json;
    use std::collections::BTreeMap;
    use std::error::Error;

    /// Config as it looks after the env and secrets layers have run.
    fn layered_config() -> ServerConfig {
        let env: BTreeMap<String, String> = [(ENV_TCP_HOST, "10.0.0.5"), (ENV_TCP_PORT, "9100")]
            .into_iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        let mut config = ServerConfig::default();
        apply_env_overrides(&mut config, &ServerEnv::from_map(&env));
        config.claude.api_key = Some(SecretString::from("sk-ant-secrets"));
        config.openai.api_key = Some(SecretString::from("sk-openai-secrets"));
        config.vector_store.api_key = Some(SecretString::from("qd-secrets"));
        config
    }

    fn exposed(secret: Option<&SecretString>) -> Option<&str> {
        secret.map(SecretString::expose)
    }

    fn object(value: Value) -> Result<Map<String, Value>, Box<dyn Error>> {
        match value {
            Value::Object(map) => Ok(map),
            other => Err(format!("expected object, got {other}").into()),
        }
    }

    #[test]
    fn tcp_flag_is_additive_and_idempotent() {
        let mut config = ServerConfig::default();
        let overrides = CliOverrides {
            tcp: true,
            ..CliOverrides::default()
        };

        apply_cli_overrides(&mut config, &overrides);
        apply_cli_overrides(&mut config, &overrides);

        assert_eq!(config.transport.types, vec![TRANSPORT_STDIO, TRANSPORT_TCP]);
    }

    #[test]
    fn mock_wins_over_service_type() {
        let mut config = ServerConfig::default();
        let overrides = CliOverrides {
            mock: true,
            service_type: Some("openai".to_string()),
            ..CliOverrides::default()
        };

        apply_cli_overrides(&mut config, &overrides);

        assert_eq!(config.ai_service_type, SERVICE_TYPE_MOCK);
    }

    #[test]
    fn falsy_values_leave_config_untouched() {
        let mut config = ServerConfig::default();
        let overrides = CliOverrides {
            name: Some(String::new()),
            port: Some(0),
            claude_api_key: Some(SecretString::from("")),
            ..CliOverrides::default()
        };

        apply_cli_overrides(&mut config, &overrides);

        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.transport.types, default_transport_types());
    }

    #[test]
    fn scalar_overrides_replace_layered_values() {
        let mut config = layered_config();
        assert_eq!(config.transport.tcp_host, "10.0.0.5");
        assert_eq!(config.transport.tcp_port, 9100);

        let overrides = CliOverrides {
            host: Some("0.0.0.0".to_string()),
            port: Some(1),
            claude_api_key: Some(SecretString::from("sk-ant-cli")),
            openai_api_key: Some(SecretString::from("sk-openai-cli")),
            qdrant_api_key: Some(SecretString::from("qd-cli")),
            ..CliOverrides::default()
        };

        apply_cli_overrides(&mut config, &overrides);

        assert_eq!(config.transport.tcp_host, "0.0.0.0");
        assert_eq!(config.transport.tcp_port, 1);
        assert_eq!(exposed(config.claude.api_key.as_ref()), Some("sk-ant-cli"));
        assert_eq!(exposed(config.openai.api_key.as_ref()), Some("sk-openai-cli"));
        assert_eq!(exposed(config.vector_store.api_key.as_ref()), Some("qd-cli"));
    }

    #[test]
    fn empty_scalar_overrides_keep_layered_values() {
        let mut config = layered_config();
        let before = config.clone();
        let overrides = CliOverrides {
            host: Some(String::new()),
            port: Some(0),
            claude_api_key: Some(SecretString::from("")),
            openai_api_key: Some(SecretString::from("")),
            qdrant_api_key: Some(SecretString::from("")),
            ..CliOverrides::default()
        };

        apply_cli_overrides(&mut config, &overrides);

        assert_eq!(config, before);
        assert_eq!(exposed(config.openai.api_key.as_ref()), Some("sk-openai-secrets"));
    }

    #[test]
    fn value_map_applies_truthiness() -> Result<(), Box<dyn Error>> {
        let map = object(json!({
            "name": "cli-server",
            "tcp": 1,
            "websocket": false,
            "host": "",
            "port": 7000,
            "mock": null,
            "service_type": "openai",
            "openai_api_key": "sk-cli",
            "unknown": "ignored"
        }))?;

        let overrides = CliOverrides::from_value_map(&map);

        assert_eq!(overrides.name.as_deref(), Some("cli-server"));
        assert!(overrides.tcp);
        assert!(!overrides.websocket);
        assert_eq!(overrides.host, None);
        assert_eq!(overrides.port, Some(7000));
        assert!(!overrides.mock);
        assert_eq!(overrides.service_type.as_deref(), Some("openai"));
        assert_eq!(
            overrides.openai_api_key.as_ref().map(SecretString::expose),
            Some("sk-cli")
        );
        Ok(())
    }

    #[test]
    fn value_map_ignores_mistyped_values() -> Result<(), Box<dyn Error>> {
        let map = object(json!({
            "name": 42,
            "port": 70000,
            "qdrant_url": ["http://a"]
        }))?;

        let overrides = CliOverrides::from_value_map(&map);

        assert_eq!(overrides, CliOverrides::default());
        Ok(())
    }

    #[test]
    fn credentials_replace_secret_values() {
        let mut config = ServerConfig::default();
        config.vector_store.url = Some(SecretString::from("http://from-secrets"));
        let overrides = CliOverrides {
            qdrant_url: Some(SecretString::from("http://from-cli")),
            ..CliOverrides::default()
        };

        apply_cli_overrides(&mut config, &overrides);

        assert_eq!(
            config.vector_store.url.as_ref().map(SecretString::expose),
            Some("http://from-cli")
        );
    }
}
