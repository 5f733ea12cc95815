//! Advisory checks over a resolved config.
//!
//! Resolution itself never rejects a config. These checks point out gaps an
//! operator probably wants to fix (a selected provider with no key, a typo in
//! the transport list) without failing startup.

use crate::schema::{KNOWN_TRANSPORTS, SERVICE_TYPE_CLAUDE, SERVICE_TYPE_OPENAI, ServerConfig};
use crate::secrets::{
    SECRET_ANTHROPIC_API_KEY, SECRET_EMBEDDINGS_LARGE_API_KEY, SECRET_EMBEDDINGS_SMALL_API_KEY,
    SECRET_OPENAI_API_KEY,
};
use serde::Serialize;
use std::fmt;
use url::Url;

/// A single advisory finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum ConfigWarning {
    /// The selected chat service has no API key.
    MissingProviderKey {
        /// Selected service (`claude` or `openai`).
        service: String,
        /// Secret key that would provide it.
        secret_key: &'static str,
    },
    /// A transport name outside the known set.
    UnknownTransport {
        /// The unrecognized entry.
        transport: String,
    },
    /// The transport list is empty.
    EmptyTransportSet,
    /// An embedding tier has a URL without a key or a key without a URL.
    IncompleteEmbeddingEndpoint {
        /// Tier name (`large` or `small`).
        tier: &'static str,
        /// The half that is missing (`apiUrl` or `apiKey`).
        missing: &'static str,
        /// Secret key for the tier.
        secret_key: &'static str,
    },
    /// The vector store has an API key but no URL.
    IncompleteVectorStore,
    /// An embedding endpoint URL does not parse as an http(s) URL.
    InvalidEndpointUrl {
        /// Tier name (`large` or `small`).
        tier: &'static str,
        /// The URL with any embedded credentials stripped.
        url: String,
    },
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingProviderKey {
                service,
                secret_key,
            } => write!(
                formatter,
                "aiServiceType is {service} but no API key resolved (set {secret_key})"
            ),
            Self::UnknownTransport { transport } => write!(
                formatter,
                "transport.types contains unrecognized entry {transport:?}"
            ),
            Self::EmptyTransportSet => formatter.write_str("transport.types is empty"),
            Self::IncompleteEmbeddingEndpoint {
                tier,
                missing,
                secret_key,
            } => write!(
                formatter,
                "embedding.{tier} is missing {missing} (key comes from {secret_key})"
            ),
            Self::IncompleteVectorStore => {
                formatter.write_str("vectorStore.apiKey is set but vectorStore.url is not")
            },
            Self::InvalidEndpointUrl { tier, url } => write!(
                formatter,
                "embedding.{tier}.apiUrl is not a valid http(s) URL: {url}"
            ),
        }
    }
}

/// Run every advisory check, in a stable order.
#[must_use]
pub fn diagnose(config: &ServerConfig) -> Vec<ConfigWarning> {
    let mut warnings = Vec::new();
    check_chat_provider(config, &mut warnings);
    check_transports(config, &mut warnings);
    check_embedding(config, &mut warnings);
    if config.vector_store.api_key.is_some() && config.vector_store.url.is_none() {
        warnings.push(ConfigWarning::IncompleteVectorStore);
    }
    warnings
}

fn check_chat_provider(config: &ServerConfig, warnings: &mut Vec<ConfigWarning>) {
    let secret_key = match config.ai_service_type.as_str() {
        SERVICE_TYPE_CLAUDE => SECRET_ANTHROPIC_API_KEY,
        SERVICE_TYPE_OPENAI => SECRET_OPENAI_API_KEY,
        _ => return,
    };
    let has_key = config
        .selected_chat_provider()
        .is_some_and(|provider| provider.api_key.is_some());
    if !has_key {
        warnings.push(ConfigWarning::MissingProviderKey {
            service: config.ai_service_type.clone(),
            secret_key,
        });
    }
}

fn check_transports(config: &ServerConfig, warnings: &mut Vec<ConfigWarning>) {
    if config.transport.types.is_empty() {
        warnings.push(ConfigWarning::EmptyTransportSet);
        return;
    }
    for transport in &config.transport.types {
        if !KNOWN_TRANSPORTS.contains(&transport.as_str()) {
            warnings.push(ConfigWarning::UnknownTransport {
                transport: transport.clone(),
            });
        }
    }
}

fn check_embedding(config: &ServerConfig, warnings: &mut Vec<ConfigWarning>) {
    let tiers = [
        ("large", &config.embedding.large, SECRET_EMBEDDINGS_LARGE_API_KEY),
        ("small", &config.embedding.small, SECRET_EMBEDDINGS_SMALL_API_KEY),
    ];

    for (tier, endpoint, secret_key) in tiers {
        let api_url = endpoint.api_url.as_deref().filter(|url| !url.is_empty());
        match (api_url, endpoint.api_key.is_some()) {
            (Some(url), has_key) => {
                if !is_http_url(url) {
                    warnings.push(ConfigWarning::InvalidEndpointUrl {
                        tier,
                        url: sanitize_url(url),
                    });
                }
                if !has_key {
                    warnings.push(ConfigWarning::IncompleteEmbeddingEndpoint {
                        tier,
                        missing: "apiKey",
                        secret_key,
                    });
                }
            },
            (None, true) => warnings.push(ConfigWarning::IncompleteEmbeddingEndpoint {
                tier,
                missing: "apiUrl",
                secret_key,
            }),
            (None, false) => {},
        }
    }
}

fn is_http_url(value: &str) -> bool {
    Url::parse(value).is_ok_and(|parsed| matches!(parsed.scheme(), "http" | "https"))
}

/// Strips credentials embedded in a URL before it is shown.
fn sanitize_url(url: &str) -> String {
    match Url::parse(url) {
        Ok(mut parsed) => {
            if parsed.password().is_some() || !parsed.username().is_empty() {
                if parsed.set_username("").is_err() {
                    return "[invalid url: invalid username]".to_string();
                }
                if parsed.set_password(None).is_err() {
                    return "[invalid url: invalid password]".to_string();
                }
            }
            parsed.to_string()
        },
        Err(error) => format!("[invalid url: {error}]"),
    }
}
