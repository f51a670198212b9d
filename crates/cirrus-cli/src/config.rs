//! Configuration file loading for the CLI
//!
//! This module handles finding and loading TOML configuration files
//! from various locations (explicit path, local directory, system directory).

use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use cirrus::{CirrusError, config::AppConfig};

/// Configuration-related errors for CLI
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration: {0}")]
    Parse(String),

    #[error("Missing configuration file: {0}")]
    MissingFile(PathBuf),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<ConfigError> for CirrusError {
    fn from(err: ConfigError) -> Self {
        CirrusError::Config(err.to_string())
    }
}

/// Find and load configuration from various locations
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Local project directory (cirrus/config.toml)
/// 3. Platform-specific config directory
/// 4. Default config if none found
///
/// # Errors
///
/// Returns error if:
/// - Explicit path is provided but file doesn't exist
/// - Config file exists but cannot be parsed or holds invalid values
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, CirrusError> {
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        info!(path = path.display().to_string(); "Loading configuration from explicit path");
        return load_config_file(path);
    }

    let local_config = Path::new("cirrus/config.toml");
    if local_config.exists() {
        info!(path = local_config.display().to_string(); "Loading configuration from local path");
        return load_config_file(local_config);
    }

    if let Some(proj_dirs) = ProjectDirs::from("com", "cirrus", "cirrus") {
        let system_config = proj_dirs.config_dir().join("config.toml");

        if system_config.exists() {
            info!(path = system_config.display().to_string(); "Loading configuration from system path");
            return load_config_file(system_config);
        }

        debug!(path = system_config.display().to_string(); "System configuration file not found");
    } else {
        debug!("Could not determine platform-specific config directory");
    }

    debug!("No configuration file found, using default configuration");
    Ok(AppConfig::default())
}

/// Load and validate configuration from a TOML file
fn load_config_file(path: impl AsRef<Path>) -> Result<AppConfig, CirrusError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()).into());
    }

    let content = fs::read_to_string(path)?;
    let config: AppConfig =
        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;
    validate(&config)?;

    Ok(config)
}

fn validate(config: &AppConfig) -> Result<(), ConfigError> {
    let layout = config.layout();
    // Zero spacing would let neighbouring nodes share an edge.
    let positive = [
        ("service_width", layout.service_width()),
        ("service_height", layout.service_height()),
        ("sibling_spacing", layout.sibling_spacing()),
        ("layer_spacing", layout.layer_spacing()),
        ("group_spacing", layout.group_spacing()),
    ];
    if let Some((name, value)) = positive
        .iter()
        .find(|(_, value)| !value.is_finite() || *value <= 0.0)
    {
        return Err(ConfigError::Validation(format!(
            "layout.{name} must be a positive number, got {value}"
        )));
    }

    let non_negative = [
        ("group_padding", layout.group_padding()),
        ("group_header", layout.group_header()),
        ("min_offset", layout.min_offset()),
    ];
    if let Some((name, value)) = non_negative
        .iter()
        .find(|(_, value)| !value.is_finite() || *value < 0.0)
    {
        return Err(ConfigError::Validation(format!(
            "layout.{name} must be a non-negative number, got {value}"
        )));
    }

    let threshold = config.resolver().fuzzy_threshold();
    if !(0.0..=1.0).contains(&threshold) {
        return Err(ConfigError::Validation(format!(
            "resolver.fuzzy_threshold must be between 0 and 1, got {threshold}"
        )));
    }
    Ok(())
}
