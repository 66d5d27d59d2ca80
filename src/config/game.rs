use bevy_ecs::prelude::Resource;
use serde::{Deserialize, Serialize};

use crate::game::{
    BASE_SPAWN_INTERVAL, DESCENT_FACTOR, DIFFICULTY_LOCK_SECONDS, DIFFICULTY_PER_POINT,
    FIELD_HEIGHT, FIELD_WIDTH, FRAME_RATE, GRAVITY, JUMP_STRENGTH, MAX_JUMPS, MIN_SPAWN_INTERVAL,
    MOUTH_CLOSED_MS, MOUTH_HOTSPOT_BIAS, NOTE_RADIUS, NOTE_X, REST_SCALE, REST_SPAWN_OFFSET,
    REST_Y_OFFSET, SCROLL_SPEED, SNAP_BAND_ABOVE, SNAP_BAND_BELOW, STAFF_LINE_COUNT, STAFF_SPACING,
};

// Gameplay tunables. Every field defaults to the constant of the same name in `game`.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub width: f32,
    pub height: f32,
    pub staff_lines: usize,
    pub staff_spacing: f32,
    pub gravity: f32,
    pub jump_strength: f32,
    pub descent_factor: f32,
    pub snap_band_above: f32,
    pub snap_band_below: f32,
    pub note_x: f32,
    pub note_radius: f32,
    pub max_jumps: u32,
    pub mouth_hotspot_bias: f32,
    pub mouth_closed_ms: u64,
    pub scroll_speed: f32,
    pub rest_spawn_offset: f32,
    pub rest_y_offset: f32,
    pub rest_scale: f32,
    pub base_spawn_interval: u32,
    pub min_spawn_interval: u32,
    pub difficulty_per_point: f32,
    pub difficulty_lock_seconds: f32,
    pub frame_rate: u32,
    /// Fixed seed for the rest spawner. Random when absent.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: FIELD_WIDTH,
            height: FIELD_HEIGHT,
            staff_lines: STAFF_LINE_COUNT,
            staff_spacing: STAFF_SPACING,
            gravity: GRAVITY,
            jump_strength: JUMP_STRENGTH,
            descent_factor: DESCENT_FACTOR,
            snap_band_above: SNAP_BAND_ABOVE,
            snap_band_below: SNAP_BAND_BELOW,
            note_x: NOTE_X,
            note_radius: NOTE_RADIUS,
            max_jumps: MAX_JUMPS,
            mouth_hotspot_bias: MOUTH_HOTSPOT_BIAS,
            mouth_closed_ms: MOUTH_CLOSED_MS,
            scroll_speed: SCROLL_SPEED,
            rest_spawn_offset: REST_SPAWN_OFFSET,
            rest_y_offset: REST_Y_OFFSET,
            rest_scale: REST_SCALE,
            base_spawn_interval: BASE_SPAWN_INTERVAL,
            min_spawn_interval: MIN_SPAWN_INTERVAL,
            difficulty_per_point: DIFFICULTY_PER_POINT,
            difficulty_lock_seconds: DIFFICULTY_LOCK_SECONDS,
            frame_rate: FRAME_RATE,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Repairs values that would break the simulation's invariants.
    #[must_use]
    pub fn sanitized(mut self) -> Self {
        self.staff_lines = self.staff_lines.max(1);
        self.frame_rate = self.frame_rate.max(1);
        self.base_spawn_interval = self.base_spawn_interval.max(1);
        self.min_spawn_interval = self.min_spawn_interval.clamp(1, self.base_spawn_interval);
        if self.note_radius <= 0.0 {
            self.note_radius = NOTE_RADIUS;
        }
        self
    }

    /// Width a rest occupies on screen; it is evicted once fully past the left edge.
    #[must_use]
    pub fn rest_display_width(&self) -> f32 {
        self.note_radius * 2.0 * self.rest_scale
    }

    /// Lowest point the note may reach when no staff line catches it.
    #[must_use]
    pub fn floor_y(&self) -> f32 {
        self.height - self.note_radius
    }
}
