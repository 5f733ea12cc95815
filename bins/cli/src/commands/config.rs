//! Config command handlers.

use crate::error::{CliError, ExitCode};
use crate::format::OutputMode;
use crate::{CliOutput, format_error_output, format_ndjson_summary, log_info};
use ai_mcp_config::{
    CliOverrides, ConfigFormat, ConfigResolver, ConfigWarning, ServerConfig, diagnose,
    render_config, to_pretty_json,
};
use ai_mcp_ports::SecretsProvider;
use std::collections::BTreeMap;

/// Inputs shared by the config commands.
pub struct ConfigInputs<'a> {
    pub env: &'a BTreeMap<String, String>,
    pub secrets: &'a dyn SecretsProvider,
    pub overrides: &'a CliOverrides,
}

impl ConfigInputs<'_> {
    fn resolve(&self) -> ai_mcp_shared::Result<ServerConfig> {
        ConfigResolver::new(self.env, self.secrets).from_args(self.overrides)
    }
}

/// Print the effective config.
pub fn run_config_show(
    mode: OutputMode,
    inputs: &ConfigInputs<'_>,
    format: ConfigFormat,
) -> Result<CliOutput, CliError> {
    let config = match inputs.resolve() {
        Ok(config) => config,
        Err(error) => return Ok(format_error_output(mode, &error)),
    };

    let mut stderr = String::new();
    log_info(&mut stderr, "config show completed", mode.no_progress);

    let stdout = if mode.is_ndjson() {
        format_ndjson_summary("ok", "config", None)
    } else if mode.is_json() {
        let config_json = match to_pretty_json(&config) {
            Ok(json) => json,
            Err(error) => return Ok(format_error_output(mode, &error)),
        };
        let config_value: serde_json::Value = serde_json::from_str(config_json.trim())?;
        let payload = serde_json::json!({
            "status": "ok",
            "effectiveConfig": config_value,
        });
        let mut output = serde_json::to_string_pretty(&payload)?;
        output.push('\n');
        output
    } else {
        let rendered = match render_config(&config, format) {
            Ok(rendered) => rendered,
            Err(error) => return Ok(format_error_output(mode, &error)),
        };
        let mut out = String::new();
        out.push_str("status: ok\nconfig:\n");
        out.push_str(&rendered);
        out
    };

    Ok(CliOutput {
        stdout,
        stderr,
        exit_code: ExitCode::Ok,
    })
}

/// Resolve the config and report advisory warnings.
pub fn run_config_check(
    mode: OutputMode,
    inputs: &ConfigInputs<'_>,
    strict: bool,
) -> Result<CliOutput, CliError> {
    let config = match inputs.resolve() {
        Ok(config) => config,
        Err(error) => return Ok(format_error_output(mode, &error)),
    };
    let warnings = diagnose(&config);

    let status = if warnings.is_empty() { "ok" } else { "warn" };
    let exit_code = if strict && !warnings.is_empty() {
        ExitCode::InvalidInput
    } else {
        ExitCode::Ok
    };

    let mut stderr = String::new();
    log_info(&mut stderr, "config check completed", mode.no_progress);

    let stdout = if mode.is_ndjson() {
        format_check_ndjson(status, &warnings)?
    } else if mode.is_json() {
        let payload = serde_json::json!({
            "status": status,
            "strict": strict,
            "warnings": warnings,
        });
        let mut output = serde_json::to_string_pretty(&payload)?;
        output.push('\n');
        output
    } else {
        format_check_text(status, &warnings)
    };

    Ok(CliOutput {
        stdout,
        stderr,
        exit_code,
    })
}

fn format_check_text(status: &str, warnings: &[ConfigWarning]) -> String {
    let mut out = format!("status: {status}\nwarnings: {}\n", warnings.len());
    for warning in warnings {
        out.push_str("warning: ");
        out.push_str(&warning.to_string());
        out.push('\n');
    }
    out
}

fn format_check_ndjson(status: &str, warnings: &[ConfigWarning]) -> Result<String, CliError> {
    let mut out = String::new();
    for warning in warnings {
        let mut value = serde_json::to_value(warning)?;
        if let serde_json::Value::Object(map) = &mut value {
            map.insert(
                "type".to_string(),
                serde_json::Value::String("warning".to_string()),
            );
            map.insert(
                "message".to_string(),
                serde_json::Value::String(warning.to_string()),
            );
        }
        out.push_str(&serde_json::to_string(&value)?);
        out.push('\n');
    }
    out.push_str(&format_ndjson_summary(
        status,
        "config",
        Some(serde_json::json!({ "warnings": warnings.len() })),
    ));
    Ok(out)
}
