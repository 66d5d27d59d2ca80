#![warn(clippy::all, clippy::pedantic)]

use log::{debug, info};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use super::Config;

// Default config file path
const CONFIG_FILE_PATH: &str = "config/restless.toml";

// Environment variable that overrides the config file location
pub const CONFIG_ENV_VAR: &str = "RESTLESS_CONFIG";

// Load the configuration from the default location
pub fn load_config_from_file() -> Result<Config, ConfigError> {
    load_config_from_path(&get_config_file_path())
}

/// Loads the configuration at `config_path`, writing a default file first if none exists.
/// Missing keys fall back to their defaults.
pub fn load_config_from_path(config_path: &Path) -> Result<Config, ConfigError> {
    // Check if config file exists
    if !config_path.exists() {
        info!("No config at {}, writing defaults", config_path.display());
        let default_config = Config::default();
        save_config_to_path(&default_config, config_path)?;
        return Ok(default_config);
    }

    // Read and parse config file
    let mut file = fs::File::open(config_path)?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)?;

    let mut config: Config = toml::from_str(&contents)?;
    config.game = config.game.sanitized();
    config.audio = config.audio.sanitized();
    debug!("Loaded config from {}", config_path.display());
    Ok(config)
}

/// Writes the configuration to `config_path`, creating parent directories as needed.
pub fn save_config_to_path(config: &Config, config_path: &Path) -> Result<(), ConfigError> {
    // Create parent directory if it doesn't exist
    if let Some(parent) = config_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    let toml_string = toml::to_string_pretty(config)?;
    fs::write(config_path, toml_string)?;

    Ok(())
}

// Get the path to the config file
#[must_use]
pub fn get_config_file_path() -> PathBuf {
    // Check for environment variable override
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        return PathBuf::from(path);
    }

    // Otherwise use default path in user's config directory
    if let Some(config_dir) = dirs::config_dir() {
        config_dir.join("restless").join("config.toml")
    } else {
        // Fallback to local directory
        PathBuf::from(CONFIG_FILE_PATH)
    }
}

// Custom error type for configuration operations
#[derive(Debug)]
pub enum ConfigError {
    Io(io::Error),
    Parse(toml::de::Error),
    Serialize(toml::ser::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config i/o error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
            ConfigError::Serialize(e) => write!(f, "config serialize error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<io::Error> for ConfigError {
    fn from(err: io::Error) -> Self {
        ConfigError::Io(err)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::Parse(err)
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(err: toml::ser::Error) -> Self {
        ConfigError::Serialize(err)
    }
}
