//! CLI integration tests.

use ai_mcp_config::{RECOGNIZED_ENV_VARS, SECRET_KEYS};
use std::path::PathBuf;
use std::process::{Command, Output};
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_dir(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    std::env::temp_dir().join(format!("{prefix}-{nanos}"))
}

fn clean_command(args: &[&str]) -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_ai-mcp"));
    command.args(args);
    for key in RECOGNIZED_ENV_VARS.iter().chain(SECRET_KEYS.iter()) {
        command.env_remove(key);
    }
    command.env_remove("RUST_LOG");
    command
}

fn run_cli_clean_env(args: &[&str], vars: &[(&str, &str)]) -> std::io::Result<Output> {
    let mut command = clean_command(args);
    command.arg("--no-dotenv");
    for (key, value) in vars {
        command.env(key, value);
    }
    command.output()
}

#[test]
fn cli_version_runs() -> std::io::Result<()> {
    let output = clean_command(&["--version"]).output()?;
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(output.status.success(), "--version failed: {stderr}");
    assert!(stdout.starts_with("ai-mcp "));
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));

    Ok(())
}

#[test]
fn config_show_applies_env_secrets_and_flags() -> Result<(), Box<dyn std::error::Error>> {
    let output = run_cli_clean_env(
        &["config", "show", "--output", "json", "--tcp", "--name", "cli-name"],
        &[
            ("MCP_SERVER_NAME", "env-name"),
            ("MCP_TRANSPORT_TYPE", "stdio, websocket"),
            ("CLAUDE_DEFAULT_MAX_TOKENS", "not-a-number"),
            ("ANTHROPIC_API_KEY", "sk-integration-secret"),
        ],
    )?;
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(output.status.success(), "config show failed: {stderr}");
    assert!(!stdout.contains("sk-integration-secret"));

    let value: serde_json::Value = serde_json::from_str(&stdout)?;
    let config = &value["effectiveConfig"];
    assert_eq!(config["server"]["name"], "cli-name");
    assert_eq!(
        config["transport"]["types"],
        serde_json::json!(["stdio", "websocket", "tcp"])
    );
    assert_eq!(config["claude"]["defaultMaxTokens"], 4096);
    assert_eq!(config["claude"]["apiKey"], "[REDACTED]");
    Ok(())
}

#[test]
fn config_show_renders_toml_text() -> std::io::Result<()> {
    let output = run_cli_clean_env(&["config", "show", "--format", "toml", "--mock"], &[])?;
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(stdout.starts_with("status: ok\nconfig:\n"));
    assert!(stdout.contains("aiServiceType = \"mock\""));
    Ok(())
}

#[test]
fn config_check_strict_fails_on_warnings() -> std::io::Result<()> {
    let lenient = run_cli_clean_env(&["config", "check"], &[])?;
    let strict = run_cli_clean_env(&["config", "check", "--strict"], &[])?;
    let with_key = run_cli_clean_env(
        &["config", "check", "--strict"],
        &[("ANTHROPIC_API_KEY", "sk-present")],
    )?;

    assert_eq!(lenient.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&lenient.stdout).contains("status: warn"));
    assert_eq!(strict.status.code(), Some(2));
    assert_eq!(with_key.status.code(), Some(0));
    Ok(())
}

#[test]
fn secrets_dir_shadows_environment() -> Result<(), Box<dyn std::error::Error>> {
    let root = temp_dir("ai-mcp-cli-secrets");
    std::fs::create_dir_all(&root)?;
    std::fs::write(root.join("OPENAI_API_KEY"), "sk-mounted\n")?;
    let secrets_dir = root.to_string_lossy().to_string();

    let output = run_cli_clean_env(
        &[
            "config",
            "check",
            "--strict",
            "--service-type",
            "openai",
            "--secrets-dir",
            &secrets_dir,
        ],
        &[],
    )?;

    assert_eq!(
        output.status.code(),
        Some(0),
        "stdout: {}",
        String::from_utf8_lossy(&output.stdout)
    );
    std::fs::remove_dir_all(&root)?;
    Ok(())
}

#[test]
fn env_file_feeds_resolution() -> Result<(), Box<dyn std::error::Error>> {
    let root = temp_dir("ai-mcp-cli-dotenv");
    std::fs::create_dir_all(&root)?;
    let env_file = root.join("custom.env");
    std::fs::write(&env_file, "MCP_WS_PORT=9999\nAI_SERVICE_TYPE=mock\n")?;
    let env_file = env_file.to_string_lossy().to_string();

    let output = clean_command(&["config", "show", "--output", "json", "--env-file", &env_file])
        .output()?;
    let value: serde_json::Value = serde_json::from_slice(&output.stdout)?;

    assert!(output.status.success());
    assert_eq!(value["effectiveConfig"]["transport"]["wsPort"], 9999);
    assert_eq!(value["effectiveConfig"]["aiServiceType"], "mock");
    std::fs::remove_dir_all(&root)?;
    Ok(())
}

#[test]
fn missing_env_file_exits_with_io_code() -> std::io::Result<()> {
    let missing = temp_dir("ai-mcp-cli-missing").join("absent.env");
    let missing = missing.to_string_lossy().to_string();

    let output = clean_command(&["info", "--env-file", &missing]).output()?;

    assert_eq!(output.status.code(), Some(3));
    assert!(String::from_utf8_lossy(&output.stderr).contains("env file error"));
    Ok(())
}
