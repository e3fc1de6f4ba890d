use std::env;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

use super::probe_config::Settings;

pub struct AppConfig {
    pub settings: Settings,
    pub config_file: PathBuf,
}

/// Load the application configuration.
/// The file location is taken from the `CONFIG_FILE` environment variable and
/// defaults to `config.json` in the working directory.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let config_file_location =
        env::var("CONFIG_FILE").unwrap_or_else(|_| "config.json".to_string());

    load_config_from(config_file_location)
}

/// Read, parse and validate the configuration file at `path`.
/// `.yml` and `.yaml` files are parsed as YAML, anything else as JSON.
pub fn load_config_from(path: impl AsRef<Path>) -> Result<AppConfig, ConfigError> {
    let path = path.as_ref().to_path_buf();
    let config_str = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
        path: path.clone(),
        source,
    })?;

    let settings: Settings = match path.extension().and_then(|ext| ext.to_str()) {
        Some("yml" | "yaml") => {
            serde_yaml::from_str(&config_str).map_err(|source| ConfigError::Yaml {
                path: path.clone(),
                source,
            })?
        }
        _ => serde_json::from_str(&config_str).map_err(|source| ConfigError::Json {
            path: path.clone(),
            source,
        })?,
    };

    settings.validate()?;

    log::info!(
        "Loaded {} website(s) from {}, checking every {}s",
        settings.websites.len(),
        path.display(),
        settings.checking_period_seconds
    );

    Ok(AppConfig {
        settings,
        config_file: path,
    })
}
