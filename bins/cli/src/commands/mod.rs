//! CLI command handlers.

pub mod config;
pub mod info;

pub use config::{ConfigInputs, run_config_check, run_config_show};
pub use info::run_info;
