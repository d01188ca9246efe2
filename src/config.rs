// Configuration module for scrollcast
// This module handles loading and parsing configuration from ~/.config/scrollcast/config.toml

mod types;

pub use types::{Config, DispatchConfig, FadeConfig, MonitorConfig, ParallaxConfig};

use std::fs;
use std::path::{Path, PathBuf};

/// Result of loading configuration
pub struct ConfigResult {
    pub config: Config,
    pub warning: Option<String>,
}

/// Loads configuration from ~/.config/scrollcast/config.toml
/// Returns default configuration if file doesn't exist or on parse errors
pub fn load_config() -> ConfigResult {
    load_config_from(&get_config_path())
}

/// Loads configuration from an explicit path, with the same fallbacks as `load_config`
pub fn load_config_from(config_path: &Path) -> ConfigResult {
    #[cfg(debug_assertions)]
    log::debug!("Loading config from {:?}", config_path);

    // If file doesn't exist, return defaults silently
    if !config_path.exists() {
        #[cfg(debug_assertions)]
        log::debug!("Config file does not exist, using defaults");
        return ConfigResult {
            config: Config::default(),
            warning: None,
        };
    }

    let contents = match fs::read_to_string(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            log::warn!("Failed to read config file {:?}: {}", config_path, e);
            return ConfigResult {
                config: Config::default(),
                warning: Some(format!("Failed to read config: {}", e)),
            };
        }
    };

    match toml::from_str::<Config>(&contents) {
        Ok(mut config) => {
            #[cfg(debug_assertions)]
            log::debug!("Config parsed successfully: {:?}", config.dispatch);

            let reset = config.sanitize();
            let warning = if reset.is_empty() {
                None
            } else {
                log::warn!("Non-finite config values reset to defaults: {:?}", reset);
                Some(format!(
                    "Invalid config values reset to defaults: {}",
                    reset.join(", ")
                ))
            };
            ConfigResult { config, warning }
        }
        Err(e) => {
            log::warn!("Failed to parse config file {:?}: {}", config_path, e);
            ConfigResult {
                config: Config::default(),
                warning: Some(format!("Invalid config: {}", e)),
            }
        }
    }
}

/// Effective configuration rendered back as TOML
pub fn to_toml_string(config: &Config) -> Result<String, toml::ser::Error> {
    toml::to_string_pretty(config)
}

/// Returns the path to the configuration file
///
/// Always uses ~/.config/scrollcast/config.toml on all platforms for consistency.
pub fn get_config_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("scrollcast")
        .join("config.toml")
}
