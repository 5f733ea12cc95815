//! Secrets lookup boundary contract.

use ai_mcp_shared::{Result, SecretString};
use std::sync::Arc;

/// Capability that maps a credential key name to an optional secret.
///
/// Implementations decide where secrets live (process environment, mounted
/// files, a remote vault). `Ok(None)` means the key is simply not set; an
/// `Err` means the backend itself could not answer and is propagated to the
/// caller of configuration resolution unchanged.
pub trait SecretsProvider: Send + Sync {
    /// Look up a single secret by key.
    fn get(&self, key: &str) -> Result<Option<SecretString>>;
}

impl<T: SecretsProvider + ?Sized> SecretsProvider for &T {
    fn get(&self, key: &str) -> Result<Option<SecretString>> {
        (**self).get(key)
    }
}

impl<T: SecretsProvider + ?Sized> SecretsProvider for Box<T> {
    fn get(&self, key: &str) -> Result<Option<SecretString>> {
        (**self).get(key)
    }
}

impl<T: SecretsProvider + ?Sized> SecretsProvider for Arc<T> {
    fn get(&self, key: &str) -> Result<Option<SecretString>> {
        (**self).get(key)
    }
}
