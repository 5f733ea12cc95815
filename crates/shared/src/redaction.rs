//! Secret detection and redaction utilities.
//!
//! Credentials resolved for the AI providers and the vector store travel as
//! [`SecretString`], which never prints or serializes its contents.

use serde::{Serialize, Serializer};

/// The redacted placeholder string.
pub const REDACTED: &str = "[REDACTED]";

/// Checks if a key/variable name likely refers to a secret.
///
/// # Examples
///
/// ```
/// use ai_mcp_shared::is_secret_key;
///
/// assert!(is_secret_key("ANTHROPIC_API_KEY"));
/// assert!(is_secret_key("vault_token"));
/// assert!(!is_secret_key("MCP_TCP_PORT"));
/// ```
pub fn is_secret_key(key: &str) -> bool {
    let key = key.to_ascii_uppercase();
    ["KEY", "TOKEN", "SECRET", "PASSWORD", "CREDENTIAL", "AUTH"]
        .iter()
        .any(|marker| key.contains(marker))
}

/// Redacts a value if the key is likely a secret.
///
/// ```
/// use ai_mcp_shared::redact_if_secret;
///
/// assert_eq!(redact_if_secret("OPENAI_API_KEY", "sk-123"), "[REDACTED]");
/// assert_eq!(redact_if_secret("MCP_WS_PATH", "/ws"), "/ws");
/// ```
pub fn redact_if_secret(key: &str, value: &str) -> String {
    if is_secret_key(key) {
        REDACTED.to_string()
    } else {
        value.to_string()
    }
}

/// A secret string wrapper that redacts on Display/Debug/Serialize.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SecretString(Box<str>);

impl SecretString {
    /// Wrap a secret value.
    pub fn new(value: impl Into<Box<str>>) -> Self {
        Self(value.into())
    }

    /// Borrow the underlying secret.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for SecretString {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(REDACTED)
    }
}

impl std::fmt::Display for SecretString {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(REDACTED)
    }
}

impl Serialize for SecretString {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(REDACTED)
    }
}

impl AsRef<str> for SecretString {
    fn as_ref(&self) -> &str {
        self.expose()
    }
}

impl From<&str> for SecretString {
    fn from(value: &str) -> Self {
        Self(value.into())
    }
}

impl From<String> for SecretString {
    fn from(value: String) -> Self {
        Self(value.into_boxed_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn detects_credential_names() {
        assert!(is_secret_key("ANTHROPIC_API_KEY"));
        assert!(is_secret_key("EMBEDDINGS_3_SMALL_API_KEY"));
        assert!(is_secret_key("qdrant_api_key"));
        assert!(is_secret_key("GITHUB_TOKEN"));
        assert!(is_secret_key("DB_PASSWORD"));
        assert!(is_secret_key("basic_auth"));
    }

    #[test]
    fn ignores_plain_settings() {
        assert!(!is_secret_key("MCP_SERVER_NAME"));
        assert!(!is_secret_key("MCP_TCP_PORT"));
        assert!(!is_secret_key("EMBEDDINGS_3_LARGE_API_URL"));
        assert!(!is_secret_key("CLAUDE_DEFAULT_TEMPERATURE"));
    }

    #[test]
    fn secret_string_redacts_display_and_debug() {
        let secret = SecretString::new("sk-live-123");
        assert_eq!(secret.to_string(), REDACTED);
        assert_eq!(format!("{secret:?}"), REDACTED);
        assert_eq!(secret.expose(), "sk-live-123");
    }

    #[test]
    fn secret_string_serializes_redacted() -> Result<(), Box<dyn Error>> {
        let secret = SecretString::from("sk-live-123");
        let json = serde_json::to_string(&secret)?;
        assert_eq!(json, "\"[REDACTED]\"");
        Ok(())
    }
}
