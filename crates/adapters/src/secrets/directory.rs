//! Secrets mounted as one file per key.

use ai_mcp_ports::SecretsProvider;
use ai_mcp_shared::{ErrorCode, ErrorEnvelope, Result, SecretString};
use std::path::{Path, PathBuf};

/// Reads `<root>/<KEY>` on every lookup so rotated files are picked up.
///
/// Trailing whitespace (usually the newline left by editors and secret
/// mounts) is stripped. A missing or empty file means the secret is unset.
#[derive(Debug, Clone)]
pub struct DirectorySecretsProvider {
    root: PathBuf,
}

impl DirectorySecretsProvider {
    /// Create a provider rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory the provider reads from.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn secret_path(&self, key: &str) -> Result<PathBuf> {
        let is_plain_name = !key.is_empty()
            && key != "."
            && key != ".."
            && !key.contains(['/', '\\'])
            && !key.contains('\0');
        if !is_plain_name {
            return Err(ErrorEnvelope::expected(
                ErrorCode::invalid_input(),
                "secret key is not a plain file name",
            )
            .with_metadata("lookup", key));
        }
        Ok(self.root.join(key))
    }
}

impl SecretsProvider for DirectorySecretsProvider {
    fn get(&self, key: &str) -> Result<Option<SecretString>> {
        let path = self.secret_path(key)?;
        match std::fs::read_to_string(&path) {
            Ok(contents) => {
                let value = contents.trim_end();
                Ok((!value.is_empty()).then(|| SecretString::from(value)))
            },
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(error) => Err(ErrorEnvelope::from(error)
                .with_metadata("lookup", key)
                .with_metadata("path", path.to_string_lossy().to_string())),
        }
    }
}
