use serde::{Deserialize, Serialize};

// Player-facing sound preferences, edited from the start screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    pub sound_enabled: bool,
    pub music_volume: f32,
    pub sfx_volume: f32,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            sound_enabled: true,
            music_volume: 0.5,
            sfx_volume: 0.5,
        }
    }
}

impl AudioConfig {
    /// Clamps both volumes into `0.0..=1.0`.
    #[must_use]
    pub fn sanitized(mut self) -> Self {
        self.music_volume = self.music_volume.clamp(0.0, 1.0);
        self.sfx_volume = self.sfx_volume.clamp(0.0, 1.0);
        self
    }
}
