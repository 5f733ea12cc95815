//! Info command handler.

use crate::CliOutput;
use crate::error::{CliError, ExitCode};
use crate::format::OutputMode;
use ai_mcp_config::{RECOGNIZED_ENV_VARS, SECRET_KEYS, config_crate_version};

/// Run the info command.
pub fn run_info(mode: OutputMode) -> Result<CliOutput, CliError> {
    let stdout = if mode.is_ndjson() {
        format_info_ndjson()?
    } else if mode.is_json() {
        format_info_json()?
    } else {
        format_info_text()
    };

    Ok(CliOutput {
        stdout,
        stderr: String::new(),
        exit_code: ExitCode::Ok,
    })
}

fn format_info_text() -> String {
    let mut out = format!(
        "status: ok\nname: {}\nversion: {}\nconfig: {}\nenv:\n",
        env!("CARGO_BIN_NAME"),
        env!("CARGO_PKG_VERSION"),
        config_crate_version(),
    );
    for name in RECOGNIZED_ENV_VARS {
        out.push_str("  ");
        out.push_str(name);
        out.push('\n');
    }
    out.push_str("secrets:\n");
    for key in SECRET_KEYS {
        out.push_str("  ");
        out.push_str(key);
        out.push('\n');
    }
    out
}

fn info_payload() -> serde_json::Value {
    serde_json::json!({
        "status": "ok",
        "build": {
            "name": env!("CARGO_BIN_NAME"),
            "version": env!("CARGO_PKG_VERSION"),
            "configVersion": config_crate_version(),
        },
        "envVars": RECOGNIZED_ENV_VARS,
        "secretKeys": SECRET_KEYS,
    })
}

fn format_info_json() -> Result<String, CliError> {
    let mut output = serde_json::to_string_pretty(&info_payload())?;
    output.push('\n');
    Ok(output)
}

fn format_info_ndjson() -> Result<String, CliError> {
    let mut payload = info_payload();
    if let serde_json::Value::Object(map) = &mut payload {
        map.insert(
            "type".to_string(),
            serde_json::Value::String("info".to_string()),
        );
    }
    let mut output = serde_json::to_string(&payload)?;
    output.push('\n');
    Ok(output)
}
