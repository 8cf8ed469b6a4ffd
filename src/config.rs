use anyhow::{Context, Result};
use config::{Config as ConfigBuilder, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::path::PathBuf;

/// Directory under `$HOME` holding config and state.
pub const APP_DIR: &str = ".timecode";

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub launch: LaunchConfig,
    #[serde(default)]
    pub drying: DryingConfig,
    #[serde(default)]
    pub state: StateConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct LaunchConfig {
    /// Zero-based CSV column holding the launch datum
    pub datum_column: usize,
    /// Token that follows the `HH:MM` time in the datum
    pub marker: String,
    pub skip_header: bool,
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            datum_column: 3,
            marker: "UTC".to_string(),
            skip_header: true,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct DryingConfig {
    /// Drying seconds per square centimetre of surface
    pub seconds_per_cm2: f64,
}

impl Default for DryingConfig {
    fn default() -> Self {
        Self {
            seconds_per_cm2: 1.0,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct StateConfig {
    /// Optional override for state directory (for testing)
    pub state_dir_override: Option<PathBuf>,
}

impl LaunchConfig {
    pub fn validate(&self) -> Result<()> {
        if self.marker.trim().is_empty() {
            anyhow::bail!("Launch marker must not be empty");
        }
        Ok(())
    }
}

impl DryingConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.seconds_per_cm2.is_finite() || self.seconds_per_cm2 < 0.0 {
            anyhow::bail!(
                "Drying rate must be a non-negative number, got {}",
                self.seconds_per_cm2
            );
        }
        Ok(())
    }
}

impl Config {
    /// Validate all configuration
    pub fn validate(&self) -> Result<()> {
        self.launch.validate()?;
        self.drying.validate()?;
        Ok(())
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(home::home_dir()
        .context("Could not find home directory")?
        .join(APP_DIR)
        .join("config.toml"))
}

pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Config> {
    let loader = ConfigBuilder::builder()
        .add_source(File::from(path.as_ref()).format(FileFormat::Toml))
        .build()
        .context("Failed to build config loader")?;

    let config: Config = loader
        .try_deserialize()
        .context("Failed to parse config file")?;

    config.validate()?;
    log::debug!("loaded config from {}", path.as_ref().display());
    Ok(config)
}

/// Load the user config, falling back to defaults when no file exists.
///
/// A file that exists but does not parse or validate is still an error.
pub fn load_or_default() -> Result<Config> {
    let path = config_path()?;
    if !path.exists() {
        log::info!("No config at {}, using defaults", path.display());
        return Ok(Config::default());
    }
    load_from_path(path)
}

pub fn save_to_path<P: AsRef<Path>>(config: &Config, path: P) -> Result<()> {
    let toml_string = toml::to_string_pretty(config).context("Failed to serialize config")?;

    std::fs::write(path.as_ref(), toml_string).context("Failed to write config file")?;

    Ok(())
}
