use std::path::PathBuf;

use anyhow::{Context, Result};

const APP_DIR: &str = "waste-sorter";

/// Default config file location (`<config dir>/waste-sorter/config.toml`)
pub fn default_config_file() -> Result<PathBuf> {
    let base = dirs::config_dir().context("Failed to get platform config directory")?;
    Ok(base.join(APP_DIR).join("config.toml"))
}

/// Log file used while the TUI owns the terminal
pub fn log_file_path() -> Result<PathBuf> {
    let base = dirs::cache_dir().context("Failed to get platform cache directory")?;
    Ok(base.join(APP_DIR).join("waste-sorter.log"))
}
