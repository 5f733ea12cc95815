//! Process bootstrap: `.env` loading, tracing, and secrets wiring.

use crate::error::CliError;
use ai_mcp_adapters::{ChainedSecretsProvider, DirectorySecretsProvider, EnvSecretsProvider};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// What happened when looking for a `.env` file.
#[derive(Debug, PartialEq, Eq)]
pub enum DotenvOutcome {
    /// Loading was turned off with `--no-dotenv`.
    Disabled,
    /// Variables were loaded from this file.
    Loaded(PathBuf),
    /// No default `.env` file was found.
    NotFound,
    /// The default `.env` file exists but could not be loaded.
    Failed(String),
}

/// Load `.env` variables into the process environment.
///
/// An explicit `env_file` must load; the implicit `.env` lookup is
/// best-effort. Variables already set in the environment are kept.
pub fn load_dotenv(env_file: Option<&Path>, disabled: bool) -> Result<DotenvOutcome, CliError> {
    if disabled {
        return Ok(DotenvOutcome::Disabled);
    }

    if let Some(path) = env_file {
        return dotenvy::from_path(path)
            .map(|()| DotenvOutcome::Loaded(path.to_path_buf()))
            .map_err(|error| CliError::EnvFile(format!("{}: {error}", path.display())));
    }

    Ok(match dotenvy::dotenv() {
        Ok(path) => DotenvOutcome::Loaded(path),
        Err(error) if error.not_found() => DotenvOutcome::NotFound,
        Err(error) => DotenvOutcome::Failed(error.to_string()),
    })
}

/// Install the global tracing subscriber, writing to stderr.
///
/// `RUST_LOG` controls the filter (default `warn`).
pub fn init_tracing(log_json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into());
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    let installed = if log_json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    if let Err(error) = installed {
        tracing::debug!(error = %error, "tracing subscriber already installed; keeping it");
    }
}

/// Log the `.env` outcome once tracing is available.
pub fn report_dotenv(outcome: &DotenvOutcome) {
    match outcome {
        DotenvOutcome::Disabled => tracing::debug!("dotenv loading disabled"),
        DotenvOutcome::Loaded(path) => {
            tracing::debug!(path = %path.display(), "loaded env file");
        },
        DotenvOutcome::NotFound => tracing::debug!("no .env file found"),
        DotenvOutcome::Failed(error) => {
            tracing::warn!(error = %error, "failed to load .env file");
        },
    }
}

/// Secrets backend: the mounted directory (if any) first, then the
/// process environment.
pub fn build_secrets(secrets_dir: Option<&Path>) -> ChainedSecretsProvider {
    let chain = ChainedSecretsProvider::new();
    let chain = match secrets_dir {
        Some(dir) => chain.with(DirectorySecretsProvider::new(dir)),
        None => chain,
    };
    chain.with(EnvSecretsProvider::from_std_env())
}
