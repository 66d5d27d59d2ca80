pub mod app;
pub mod components;
pub mod config;
pub mod fraction;
pub mod game;
pub mod menu;
pub mod menu_types;
pub mod sound;
pub mod systems;
pub mod ui;

#[cfg(test)]
mod tests;

use bevy_ecs::prelude::Resource;
use std::time::{Duration, Instant};

/// Run clock. `elapsed` only moves when the app advances it, so tests can
/// step it by fixed amounts.
#[derive(Resource, Debug, Clone)]
pub struct Time {
    delta: Duration,
    elapsed: Duration,
    last_update: Instant,
}

impl Time {
    pub fn new() -> Self {
        Self {
            delta: Duration::default(),
            elapsed: Duration::default(),
            last_update: Instant::now(),
        }
    }

    /// Advances by the wall-clock time since the previous update.
    pub fn update(&mut self) {
        let now = Instant::now();
        self.advance(now.duration_since(self.last_update));
        self.last_update = now;
    }

    /// Advances by a fixed step.
    pub fn advance(&mut self, delta: Duration) {
        self.delta = delta;
        self.elapsed += delta;
    }

    pub fn delta_seconds(&self) -> f32 {
        self.delta.as_secs_f32()
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}
