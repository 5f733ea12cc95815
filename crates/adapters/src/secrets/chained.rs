//! Ordered fallback across several providers.

use ai_mcp_ports::SecretsProvider;
use ai_mcp_shared::{Result, SecretString};

/// Asks each provider in turn; the first `Some` wins.
///
/// An error from any provider stops the lookup and is returned as-is.
#[derive(Default)]
pub struct ChainedSecretsProvider {
    providers: Vec<Box<dyn SecretsProvider>>,
}

impl ChainedSecretsProvider {
    /// Create an empty chain (every lookup returns `None`).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a provider with lower priority than those already added.
    #[must_use]
    pub fn with(mut self, provider: impl SecretsProvider + 'static) -> Self {
        self.providers.push(Box::new(provider));
        self
    }

    /// Number of providers in the chain.
    #[must_use]
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Returns true when the chain has no providers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl std::fmt::Debug for ChainedSecretsProvider {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("ChainedSecretsProvider")
            .field("providers", &self.providers.len())
            .finish()
    }
}

impl SecretsProvider for ChainedSecretsProvider {
    fn get(&self, key: &str) -> Result<Option<SecretString>> {
        for provider in &self.providers {
            if let Some(value) = provider.get(key)? {
                return Ok(Some(value));
            }
        }
        Ok(None)
    }
}
