//! Fixed in-memory secrets.

use ai_mcp_ports::SecretsProvider;
use ai_mcp_shared::{Result, SecretString};
use std::collections::BTreeMap;

/// Secrets held in a map, for embedding and tests.
#[derive(Debug, Clone, Default)]
pub struct InMemorySecretsProvider {
    values: BTreeMap<String, SecretString>,
}

impl InMemorySecretsProvider {
    /// Create an empty provider.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a secret.
    #[must_use]
    pub fn with_secret(mut self, key: impl Into<String>, value: impl Into<SecretString>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }
}

impl<K, V> FromIterator<(K, V)> for InMemorySecretsProvider
where
    K: Into<String>,
    V: Into<SecretString>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

impl SecretsProvider for InMemorySecretsProvider {
    fn get(&self, key: &str) -> Result<Option<SecretString>> {
        Ok(self.values.get(key).cloned())
    }
}
