pub mod audio;
pub mod game;
pub mod loader;

pub use audio::AudioConfig;
pub use game::GameConfig;

use serde::{Deserialize, Serialize};
use std::sync::{Arc, PoisonError, RwLock};

// Process-wide configuration, filled in by `main` once the file is loaded
pub static CONFIG: once_cell::sync::Lazy<Arc<RwLock<Config>>> =
    once_cell::sync::Lazy::new(|| Arc::new(RwLock::new(Config::default())));

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub game: GameConfig,
    pub audio: AudioConfig,
}

impl Config {
    /// Snapshot of the process-wide configuration.
    #[must_use]
    pub fn current() -> Self {
        CONFIG
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replaces the process-wide configuration.
    pub fn store(config: Config) {
        *CONFIG.write().unwrap_or_else(PoisonError::into_inner) = config;
    }
}
