use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use romsift_core::{EngineConfig, settings_path};

use crate::error::CliError;

pub(crate) fn run_config_path() -> Result<(), CliError> {
    let path = settings_path();
    let status = if path.is_file() {
        "exists".if_supports_color(Stdout, |t| t.green()).to_string()
    } else {
        "not found, using defaults"
            .if_supports_color(Stdout, |t| t.yellow())
            .to_string()
    };
    log::info!("{} ({})", path.display(), status);
    Ok(())
}

/// Print the effective settings, defaults included, as TOML.
pub(crate) fn run_config_show(config_path: Option<&Path>) -> Result<(), CliError> {
    let config = EngineConfig::resolve(config_path)?;
    print!("{}", config.to_toml_string()?);
    Ok(())
}
