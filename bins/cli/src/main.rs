//! CLI binary entrypoint.

mod bootstrap;
mod commands;
mod error;
mod format;

use ai_mcp_config::{CliOverrides, ConfigFormat, collect_std_env};
use ai_mcp_shared::{ErrorEnvelope, ErrorKind, SecretString, is_secret_key};
use clap::{Args, Parser, Subcommand, ValueEnum};
use commands::{ConfigInputs, run_config_check, run_config_show, run_info};
use error::{CliError, ExitCode};
use format::{OutputArgs, OutputMode};
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "ai-mcp",
    version,
    about = "Inspect the ai-mcp server configuration",
    long_about = None
)]
struct Cli {
    #[command(flatten)]
    output: OutputArgs,

    #[command(flatten)]
    bootstrap: BootstrapArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Process setup flags applied before any command runs.
#[derive(Debug, Args)]
struct BootstrapArgs {
    /// Load variables from this file instead of `./.env`.
    #[arg(long, global = true, conflicts_with = "no_dotenv")]
    env_file: Option<PathBuf>,
    /// Do not load any `.env` file.
    #[arg(long, global = true)]
    no_dotenv: bool,
    /// Directory of mounted secrets (one file per key), checked before the environment.
    #[arg(long, global = true)]
    secrets_dir: Option<PathBuf>,
    /// Emit logs as JSON lines on stderr.
    #[arg(long, global = true)]
    log_json: bool,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show build and version details.
    Info,
    /// Config-related commands.
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Debug, Subcommand)]
enum ConfigCommands {
    /// Resolve the config and report advisory warnings.
    Check {
        /// Exit with status 2 when any warning is reported.
        #[arg(long)]
        strict: bool,
        #[command(flatten)]
        server: ServerArgs,
    },
    /// Show the effective config after all overlays.
    Show {
        /// Rendering used for text output.
        #[arg(long, value_enum, default_value_t = RenderFormat::Json)]
        format: RenderFormat,
        #[command(flatten)]
        server: ServerArgs,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum RenderFormat {
    Json,
    Toml,
}

impl From<RenderFormat> for ConfigFormat {
    fn from(value: RenderFormat) -> Self {
        match value {
            RenderFormat::Json => Self::Json,
            RenderFormat::Toml => Self::Toml,
        }
    }
}

/// Server options layered over env and secrets.
#[derive(Debug, Args)]
struct ServerArgs {
    /// Server name.
    #[arg(long)]
    name: Option<String>,
    /// Enable the TCP transport.
    #[arg(long)]
    tcp: bool,
    /// Enable the websocket transport.
    #[arg(long)]
    websocket: bool,
    /// TCP bind host.
    #[arg(long)]
    host: Option<String>,
    /// TCP port.
    #[arg(long)]
    port: Option<u16>,
    /// Use the mock chat service (wins over `--service-type`).
    #[arg(long)]
    mock: bool,
    /// Chat service (`claude`, `openai`, ...).
    #[arg(long)]
    service_type: Option<String>,
    /// Claude API key.
    #[arg(long)]
    claude_api_key: Option<String>,
    /// OpenAI API key.
    #[arg(long)]
    openai_api_key: Option<String>,
    /// Vector store URL.
    #[arg(long)]
    qdrant_url: Option<String>,
    /// Vector store API key.
    #[arg(long)]
    qdrant_api_key: Option<String>,
}

impl From<&ServerArgs> for CliOverrides {
    fn from(args: &ServerArgs) -> Self {
        Self {
            name: args.name.clone(),
            tcp: args.tcp,
            websocket: args.websocket,
            host: args.host.clone(),
            port: args.port,
            mock: args.mock,
            service_type: args.service_type.clone(),
            claude_api_key: args.claude_api_key.as_deref().map(SecretString::from),
            openai_api_key: args.openai_api_key.as_deref().map(SecretString::from),
            qdrant_url: args.qdrant_url.as_deref().map(SecretString::from),
            qdrant_api_key: args.qdrant_api_key.as_deref().map(SecretString::from),
        }
    }
}

pub(crate) struct CliOutput {
    stdout: String,
    stderr: String,
    exit_code: ExitCode,
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    let mode = OutputMode::from_args(&cli.output);

    let dotenv = bootstrap::load_dotenv(cli.bootstrap.env_file.as_deref(), cli.bootstrap.no_dotenv);
    bootstrap::init_tracing(cli.bootstrap.log_json);
    let dotenv = match dotenv {
        Ok(outcome) => outcome,
        Err(error) => return exit_with_error(&error),
    };
    bootstrap::report_dotenv(&dotenv);

    match run(&cli, mode) {
        Ok(output) => match write_output(&output) {
            Ok(()) => std::process::ExitCode::from(output.exit_code.as_u8()),
            Err(error) => exit_with_error(&error),
        },
        Err(error) => exit_with_error(&error),
    }
}

fn exit_with_error(error: &CliError) -> std::process::ExitCode {
    let _ = writeln!(io::stderr(), "error: {error}");
    std::process::ExitCode::from(error.exit_code().as_u8())
}

fn run(cli: &Cli, mode: OutputMode) -> Result<CliOutput, CliError> {
    match &cli.command {
        Commands::Info => run_info(mode),
        Commands::Config { command } => {
            let env = collect_std_env();
            let secrets = bootstrap::build_secrets(cli.bootstrap.secrets_dir.as_deref());
            match command {
                ConfigCommands::Check { strict, server } => {
                    let overrides = CliOverrides::from(server);
                    let inputs = ConfigInputs {
                        env: &env,
                        secrets: &secrets,
                        overrides: &overrides,
                    };
                    run_config_check(mode, &inputs, *strict)
                },
                ConfigCommands::Show { format, server } => {
                    let overrides = CliOverrides::from(server);
                    let inputs = ConfigInputs {
                        env: &env,
                        secrets: &secrets,
                        overrides: &overrides,
                    };
                    run_config_show(mode, &inputs, (*format).into())
                },
            }
        },
    }
}

/// Exit code for a resolution failure.
fn error_exit_code(error: &ErrorEnvelope) -> ExitCode {
    match (error.code.namespace(), error.code.code()) {
        ("secrets", _) | (_, "io" | "permission_denied" | "not_found") => ExitCode::Io,
        _ if error.kind == ErrorKind::Unexpected => ExitCode::Internal,
        _ => ExitCode::InvalidInput,
    }
}

pub(crate) fn format_error_output(mode: OutputMode, error: &ErrorEnvelope) -> CliOutput {
    let exit_code = error_exit_code(error);
    let secret_keys: Vec<&str> = error
        .metadata
        .keys()
        .map(String::as_str)
        .filter(|key| is_secret_key(key))
        .collect();
    let error = &error.clone().redact_metadata(&secret_keys);

    let mut stderr = String::new();
    log_info(&mut stderr, "command failed", mode.no_progress);

    let stdout = if mode.is_ndjson() {
        let payload = serde_json::json!({
            "type": "error",
            "error": error,
        });
        let mut output = serde_json::to_string(&payload).unwrap_or_else(|_| {
            "{\"type\":\"error\",\"error\":{\"message\":\"internal error\"}}".to_string()
        });
        output.push('\n');
        output
    } else if mode.is_json() {
        let payload = serde_json::json!({
            "status": "error",
            "error": error,
        });

        // This is a CLI boundary, so JSON serialization errors are internal.
        let mut output = serde_json::to_string_pretty(&payload).unwrap_or_else(|_| {
            "{\"status\":\"error\",\"error\":{\"message\":\"internal error\"}}".to_string()
        });
        output.push('\n');
        output
    } else {
        format_error_text(error)
    };

    CliOutput {
        stdout,
        stderr,
        exit_code,
    }
}

fn format_error_text(error: &ErrorEnvelope) -> String {
    let mut out = format!(
        "status: error\ncode: {}\nmessage: {}\n",
        error.code, error.message
    );
    for (key, value) in &error.metadata {
        out.push_str(key);
        out.push_str(": ");
        out.push_str(value);
        out.push('\n');
    }
    out
}

pub(crate) fn log_info(stderr: &mut String, message: &str, no_progress: bool) {
    if no_progress {
        return;
    }
    stderr.push_str("info: ");
    stderr.push_str(message);
    stderr.push('\n');
}

pub(crate) fn format_ndjson_summary(
    status: &str,
    kind: &str,
    extra: Option<serde_json::Value>,
) -> String {
    let mut payload = serde_json::Map::new();
    payload.insert(
        "type".to_string(),
        serde_json::Value::String("summary".to_string()),
    );
    payload.insert(
        "status".to_string(),
        serde_json::Value::String(status.to_string()),
    );
    payload.insert(
        "kind".to_string(),
        serde_json::Value::String(kind.to_string()),
    );
    if let Some(serde_json::Value::Object(map)) = extra {
        for (key, value) in map {
            payload.insert(key, value);
        }
    }
    let mut out = serde_json::to_string(&serde_json::Value::Object(payload)).unwrap_or_else(|_| {
        "{\"type\":\"summary\",\"status\":\"error\",\"kind\":\"internal\"}".to_string()
    });
    out.push('\n');
    out
}

fn write_output(output: &CliOutput) -> Result<(), CliError> {
    let mut stdout = io::stdout();
    stdout.write_all(output.stdout.as_bytes())?;

    if !output.stderr.is_empty() {
        let mut stderr = io::stderr();
        stderr.write_all(output.stderr.as_bytes())?;
        stderr.flush()?;
    }

    Ok(())
}
