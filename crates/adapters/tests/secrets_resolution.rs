//! Secrets adapters wired into config resolution.

use ai_mcp_adapters::{ChainedSecretsProvider, DirectorySecretsProvider, EnvSecretsProvider};
use ai_mcp_config::{ConfigResolver, to_pretty_json};
use ai_mcp_shared::SecretString;
use std::collections::BTreeMap;
use std::error::Error;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_dir(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    std::env::temp_dir().join(format!("{prefix}-{nanos}"))
}

#[test]
fn mounted_secrets_shadow_env_secrets() -> Result<(), Box<dyn Error>> {
    let root = temp_dir("ai-mcp-chain");
    std::fs::create_dir_all(&root)?;
    std::fs::write(root.join("ANTHROPIC_API_KEY"), "sk-mounted\n")?;

    let env_secrets = EnvSecretsProvider::from_map(&BTreeMap::from([
        ("ANTHROPIC_API_KEY".to_string(), "sk-env".to_string()),
        ("QDRANT_URL".to_string(), "http://qdrant:6333".to_string()),
    ]));
    let secrets = ChainedSecretsProvider::new()
        .with(DirectorySecretsProvider::new(&root))
        .with(env_secrets);

    let env = BTreeMap::new();
    let config = ConfigResolver::new(&env, &secrets).from_env()?;

    assert_eq!(
        config.claude.api_key.as_ref().map(SecretString::expose),
        Some("sk-mounted")
    );
    assert_eq!(
        config.vector_store.url.as_ref().map(SecretString::expose),
        Some("http://qdrant:6333")
    );
    assert!(!to_pretty_json(&config)?.contains("sk-mounted"));

    std::fs::remove_dir_all(&root)?;
    Ok(())
}
