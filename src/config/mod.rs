//! Runtime settings
//!
//! Layered with the `config` crate, lowest precedence first:
//!
//! 1. Built-in defaults (local Ollama endpoint, `granite4`, temperature 0.2, 180s timeout)
//! 2. TOML file: `--config PATH`, or `<config dir>/waste-sorter/config.toml` when present
//! 3. Environment variables prefixed `WASTE_SORTER_` (e.g. `WASTE_SORTER_MODEL`)
//! 4. Command-line overrides

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use config::{Config, Environment, File};
use serde::Deserialize;

use crate::utils::default_config_file;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:11434/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "granite4";
pub const DEFAULT_TEMPERATURE: f32 = 0.2;
pub const DEFAULT_TIMEOUT_SECS: u64 = 180;
pub const DEFAULT_EXPORT_FILE: &str = "waste_segregation_results.csv";

const ENV_PREFIX: &str = "WASTE_SORTER";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Settings {
    /// Chat completion URL of the inference service
    pub endpoint: String,
    pub model: String,
    pub temperature: f32,
    pub timeout_secs: u64,
    /// Where the TUI writes its CSV export
    pub export_path: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            export_path: PathBuf::from(DEFAULT_EXPORT_FILE),
        }
    }
}

/// Values given on the command line; `None` leaves the lower layers alone
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub config_file: Option<PathBuf>,
    pub endpoint: Option<String>,
    pub model: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl Settings {
    /// Load settings from every layer
    pub fn load(overrides: &Overrides) -> Result<Self> {
        Self::load_with_env(overrides, None)
    }

    /// Load settings with an explicit environment map instead of the process environment
    pub fn load_with_env(
        overrides: &Overrides,
        env: Option<config::Map<String, String>>,
    ) -> Result<Self> {
        let defaults = Settings::default();
        let mut builder = Config::builder()
            .set_default("endpoint", defaults.endpoint)?
            .set_default("model", defaults.model)?
            .set_default("temperature", f64::from(defaults.temperature))?
            .set_default("timeout_secs", defaults.timeout_secs)?
            .set_default("export_path", DEFAULT_EXPORT_FILE)?;

        match &overrides.config_file {
            Some(path) => {
                builder = builder.add_source(File::from(path.as_path()).required(true));
            }
            None => {
                if let Ok(path) = default_config_file() {
                    builder = builder.add_source(File::from(path).required(false));
                }
            }
        }

        builder = builder.add_source(Environment::with_prefix(ENV_PREFIX).source(env));

        if let Some(endpoint) = &overrides.endpoint {
            builder = builder.set_override("endpoint", endpoint.as_str())?;
        }
        if let Some(model) = &overrides.model {
            builder = builder.set_override("model", model.as_str())?;
        }
        if let Some(secs) = overrides.timeout_secs {
            builder = builder.set_override("timeout_secs", secs)?;
        }

        let settings: Settings = builder
            .build()
            .context("Failed to load configuration")?
            .try_deserialize()
            .context("Invalid configuration")?;
        settings.validate()?;

        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        let url = reqwest::Url::parse(&self.endpoint)
            .with_context(|| format!("Invalid endpoint URL: {}", self.endpoint))?;
        if !matches!(url.scheme(), "http" | "https") {
            bail!("Endpoint must use http or https: {}", self.endpoint);
        }
        if self.model.trim().is_empty() {
            bail!("Model name must not be empty");
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            bail!("Temperature must be between 0.0 and 2.0 (got {})", self.temperature);
        }
        if self.timeout_secs == 0 {
            bail!("Timeout must be at least 1 second");
        }
        Ok(())
    }
}
