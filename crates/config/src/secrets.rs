//! Secrets overlay: credential fields resolved through a `SecretsProvider`.

use crate::schema::ServerConfig;
use ai_mcp_ports::SecretsProvider;
use ai_mcp_shared::{Result, SecretString};

/// Secret key: Claude API key.
pub const SECRET_ANTHROPIC_API_KEY: &str = "ANTHROPIC_API_KEY";
/// Secret key: OpenAI API key.
pub const SECRET_OPENAI_API_KEY: &str = "OPENAI_API_KEY";
/// Secret key: large embedding tier API key.
pub const SECRET_EMBEDDINGS_LARGE_API_KEY: &str = "EMBEDDINGS_3_LARGE_API_KEY";
/// Secret key: small embedding tier API key.
pub const SECRET_EMBEDDINGS_SMALL_API_KEY: &str = "EMBEDDINGS_3_SMALL_API_KEY";
/// Secret key: vector store URL.
pub const SECRET_QDRANT_URL: &str = "QDRANT_URL";
/// Secret key: vector store API key.
pub const SECRET_QDRANT_API_KEY: &str = "QDRANT_API_KEY";

/// Secret keys in lookup order.
pub const SECRET_KEYS: [&str; 6] = [
    SECRET_ANTHROPIC_API_KEY,
    SECRET_OPENAI_API_KEY,
    SECRET_EMBEDDINGS_LARGE_API_KEY,
    SECRET_EMBEDDINGS_SMALL_API_KEY,
    SECRET_QDRANT_URL,
    SECRET_QDRANT_API_KEY,
];

/// Query the provider once per secret key and overwrite the credential fields.
///
/// A key the provider does not know clears the field. The first provider
/// error aborts the overlay and is returned with a `lookup` metadata
/// entry naming the lookup that failed.
pub fn apply_secret_overrides<S>(config: &mut ServerConfig, secrets: &S) -> Result<()>
where
    S: SecretsProvider + ?Sized,
{
    config.claude.api_key = lookup(secrets, SECRET_ANTHROPIC_API_KEY)?;
    config.openai.api_key = lookup(secrets, SECRET_OPENAI_API_KEY)?;
    config.embedding.large.api_key = lookup(secrets, SECRET_EMBEDDINGS_LARGE_API_KEY)?;
    config.embedding.small.api_key = lookup(secrets, SECRET_EMBEDDINGS_SMALL_API_KEY)?;
    config.vector_store.url = lookup(secrets, SECRET_QDRANT_URL)?;
    config.vector_store.api_key = lookup(secrets, SECRET_QDRANT_API_KEY)?;
    Ok(())
}

fn lookup<S>(secrets: &S, key: &'static str) -> Result<Option<SecretString>>
where
    S: SecretsProvider + ?Sized,
{
    let value = secrets
        .get(key)
        .map_err(|error| error.with_metadata("lookup", key))?;
    tracing::debug!(lookup = key, found = value.is_some(), "secret lookup");
    Ok(value)
}
