//! Secrets read from a snapshot of the process environment.

use ai_mcp_config::SECRET_KEYS;
use ai_mcp_ports::SecretsProvider;
use ai_mcp_shared::{Result, SecretString};
use std::collections::BTreeMap;

/// Environment-backed secrets.
///
/// The snapshot is taken once at construction; later changes to the process
/// environment are not observed. Empty values count as unset.
#[derive(Debug, Clone, Default)]
pub struct EnvSecretsProvider {
    values: BTreeMap<String, SecretString>,
}

impl EnvSecretsProvider {
    /// Build from an explicit key/value map.
    #[must_use]
    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        let values = map
            .iter()
            .filter(|(_, value)| !value.is_empty())
            .map(|(key, value)| (key.clone(), SecretString::from(value.as_str())))
            .collect();
        Self { values }
    }

    /// Snapshot the known secret keys from the process environment.
    #[must_use]
    pub fn from_std_env() -> Self {
        let map: BTreeMap<String, String> = SECRET_KEYS
            .iter()
            .filter_map(|key| {
                std::env::var(key)
                    .ok()
                    .map(|value| ((*key).to_string(), value))
            })
            .collect();
        Self::from_map(&map)
    }
}

impl SecretsProvider for EnvSecretsProvider {
    fn get(&self, key: &str) -> Result<Option<SecretString>> {
        Ok(self.values.get(key).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn empty_values_are_unset() -> std::result::Result<(), Box<dyn Error>> {
        let map = BTreeMap::from([
            ("ANTHROPIC_API_KEY".to_string(), "sk-ant".to_string()),
            ("OPENAI_API_KEY".to_string(), String::new()),
        ]);
        let provider = EnvSecretsProvider::from_map(&map);

        assert_eq!(
            provider
                .get("ANTHROPIC_API_KEY")?
                .as_ref()
                .map(SecretString::expose),
            Some("sk-ant")
        );
        assert!(provider.get("OPENAI_API_KEY")?.is_none());
        assert!(provider.get("QDRANT_URL")?.is_none());
        Ok(())
    }

    #[test]
    fn debug_output_hides_values() {
        let map = BTreeMap::from([("QDRANT_API_KEY".to_string(), "qd-live".to_string())]);
        let provider = EnvSecretsProvider::from_map(&map);

        let debug = format!("{provider:?}");

        assert!(debug.contains("QDRANT_API_KEY"));
        assert!(!debug.contains("qd-live"));
    }
}
