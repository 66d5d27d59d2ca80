#![warn(clippy::all, clippy::pedantic)]
#![allow(
    // Allow precision loss when casting line indices to f32 for layout maths
    clippy::cast_precision_loss,
    // Allow more than 3 bools in structs for game states and input handling where bools represent distinct flags
    clippy::struct_excessive_bools
)]

use bevy_ecs::prelude::*;
use std::collections::VecDeque;
use std::time::Duration;

use crate::config::GameConfig;
use crate::fraction::Fraction;
use crate::game::{STARTING_SCORE_DENOMINATOR, STARTING_SCORE_NUMERATOR};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RestKind {
    Sixteenth,
    Eighth,
    Quarter,
    Half,
    Whole,
}

impl RestKind {
    pub const ALL: [RestKind; 5] = [
        RestKind::Sixteenth,
        RestKind::Eighth,
        RestKind::Quarter,
        RestKind::Half,
        RestKind::Whole,
    ];

    #[must_use]
    pub fn random(rng: &mut fastrand::Rng) -> Self {
        Self::ALL[rng.usize(..Self::ALL.len())]
    }

    /// Note-duration denominator: a quarter rest is worth 1/4.
    #[must_use]
    pub fn denominator(self) -> i64 {
        match self {
            RestKind::Sixteenth => 16,
            RestKind::Eighth => 8,
            RestKind::Quarter => 4,
            RestKind::Half => 2,
            RestKind::Whole => 1,
        }
    }

    #[must_use]
    pub fn value(self) -> Fraction {
        Fraction::new(1, self.denominator())
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            RestKind::Sixteenth => "1/16",
            RestKind::Eighth => "1/8",
            RestKind::Quarter => "1/4",
            RestKind::Half => "1/2",
            RestKind::Whole => "1",
        }
    }

    #[must_use]
    pub fn get_color(self) -> ratatui::style::Color {
        match self {
            RestKind::Sixteenth => ratatui::style::Color::LightMagenta,
            RestKind::Eighth => ratatui::style::Color::LightCyan,
            RestKind::Quarter => ratatui::style::Color::LightGreen,
            RestKind::Half => ratatui::style::Color::Yellow,
            RestKind::Whole => ratatui::style::Color::LightRed,
        }
    }
}

// A collectible rest scrolling right to left along one staff line
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Rest {
    pub x: f32,
    pub y: f32,
    pub kind: RestKind,
    pub collected: bool,
    pub line: usize,
    /// Spawn order, used to walk rests newest first
    pub sequence: u64,
}

/// The five horizontal staff lines, top to bottom.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct Staff {
    lines: Vec<f32>,
}

impl Staff {
    /// Centres `count` lines spaced `spacing` apart in a field `height` tall.
    #[must_use]
    pub fn new(height: f32, count: usize, spacing: f32) -> Self {
        let count = count.max(1);
        let total_height = (count - 1) as f32 * spacing;
        let top = (height - total_height) / 2.0;
        Self {
            lines: (0..count).map(|i| top + i as f32 * spacing).collect(),
        }
    }

    #[must_use]
    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.height, config.staff_lines, config.staff_spacing)
    }

    #[must_use]
    pub fn line_y(&self, index: usize) -> f32 {
        self.lines[index]
    }

    #[must_use]
    pub fn lines(&self) -> &[f32] {
        &self.lines
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    #[must_use]
    pub fn last_index(&self) -> usize {
        self.lines.len() - 1
    }
}

// The player's eighth note
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct Note {
    pub x: f32,
    pub y: f32,
    pub vy: f32,
    pub radius: f32,
    pub max_jumps: u32,
    pub jumps_remaining: u32,
    pub current_line: usize,
    pub target_line: usize,
    pub descending: bool,
    pub mouth_open: bool,
}

impl Note {
    /// A note resting on the bottom staff line.
    #[must_use]
    pub fn new(staff: &Staff, config: &GameConfig) -> Self {
        let bottom = staff.last_index();
        Self {
            x: config.note_x,
            y: staff.line_y(bottom) - config.note_radius,
            vy: 0.0,
            radius: config.note_radius,
            max_jumps: config.max_jumps,
            jumps_remaining: config.max_jumps,
            current_line: bottom,
            target_line: bottom,
            descending: false,
            mouth_open: true,
        }
    }

    /// Budget-limited jump. Directional moves don't go through here.
    pub fn jump(&mut self, jump_strength: f32) -> bool {
        if self.jumps_remaining == 0 {
            return false;
        }
        self.vy = jump_strength;
        self.jumps_remaining -= 1;
        true
    }

    /// Jumps toward the line above. Refused on the top line.
    pub fn move_up(&mut self, jump_strength: f32) -> bool {
        if self.current_line == 0 {
            return false;
        }
        self.target_line = self.current_line - 1;
        self.vy = jump_strength;
        self.descending = false;
        true
    }

    /// Drops toward the line below with a softer push. Refused on the bottom line.
    pub fn move_down(&mut self, staff: &Staff, jump_strength: f32, descent_factor: f32) -> bool {
        if self.current_line >= staff.last_index() {
            return false;
        }
        self.target_line = self.current_line + 1;
        self.vy = -jump_strength * descent_factor;
        self.descending = true;
        true
    }

    /// Advances one frame of gravity and snaps onto a staff line when one is reached.
    /// Returns the index of the line snapped to, if any.
    pub fn step(&mut self, staff: &Staff, config: &GameConfig) -> Option<usize> {
        self.vy += config.gravity;
        self.y += self.vy;

        let mut snapped = None;
        if self.vy >= 0.0 {
            if self.descending {
                let line_y = staff.line_y(self.target_line);
                if self.within_band(line_y, config) {
                    self.land_on(line_y);
                    self.current_line = self.target_line;
                    self.descending = false;
                    snapped = Some(self.target_line);
                }
            } else {
                // Bottom to top, so the note lands on the nearest line below it
                for i in (0..staff.len()).rev() {
                    let line_y = staff.line_y(i);
                    if self.within_band(line_y, config) {
                        self.land_on(line_y);
                        self.current_line = i;
                        self.target_line = i;
                        snapped = Some(i);
                        break;
                    }
                }
            }
        }

        // Prevent falling below bottom of the field
        let floor = config.floor_y();
        if self.y > floor {
            self.y = floor;
            self.vy = 0.0;
            self.restore_jumps();
        }

        snapped
    }

    /// Point used for hit tests, slightly above the centre where the mouth is drawn.
    #[must_use]
    pub fn mouth_hotspot(&self, bias: f32) -> (f32, f32) {
        (self.x, self.y - self.radius * bias)
    }

    /// True when the bottom of the note sits exactly on `line_y`.
    #[must_use]
    pub fn is_resting_on(&self, line_y: f32) -> bool {
        (self.y + self.radius - line_y).abs() < f32::EPSILON && self.vy == 0.0
    }

    pub fn restore_jumps(&mut self) {
        self.jumps_remaining = self.max_jumps;
    }

    fn within_band(&self, line_y: f32, config: &GameConfig) -> bool {
        let bottom = self.y + self.radius;
        bottom >= line_y - config.snap_band_above && bottom <= line_y + config.snap_band_below
    }

    fn land_on(&mut self, line_y: f32) {
        self.y = line_y - self.radius;
        self.vy = 0.0;
        self.restore_jumps();
    }
}

#[derive(Debug, Resource, Clone)]
pub struct GameState {
    pub score: Fraction,
    pub started: bool,
    pub game_over: bool,
    pub spawn_timer: u32,
    pub next_sequence: u64,
    pub rests_eaten: u32,
    pub rests_missed: u32,
    pub frames: u64,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            score: Fraction::new(STARTING_SCORE_NUMERATOR, STARTING_SCORE_DENOMINATOR),
            started: false,
            game_over: false,
            spawn_timer: 0,
            next_sequence: 0,
            rests_eaten: 0,
            rests_missed: 0,
            frames: 0,
        }
    }
}

impl GameState {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Frames only run between the start of a run and game over.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.started && !self.game_over
    }
}

// Spawn pacing. The interval only tightens for the first minute of a run.
#[derive(Debug, Resource, Clone, PartialEq)]
pub struct Difficulty {
    pub spawn_interval: u32,
    pub run_started_at: Duration,
}

impl Difficulty {
    #[must_use]
    pub fn new(config: &GameConfig) -> Self {
        Self {
            spawn_interval: config.base_spawn_interval,
            run_started_at: Duration::ZERO,
        }
    }

    /// Restarts the ramp at `now` on the run clock.
    pub fn restart(&mut self, now: Duration, config: &GameConfig) {
        self.spawn_interval = config.base_spawn_interval;
        self.run_started_at = now;
    }

    /// Recomputes the spawn interval from the score while the ramp is unlocked,
    /// otherwise keeps the last interval.
    pub fn update(&mut self, score: Fraction, now: Duration, config: &GameConfig) {
        let elapsed = now.saturating_sub(self.run_started_at).as_secs_f32();
        let base = config.base_spawn_interval;
        let min = config.min_spawn_interval;

        if elapsed <= config.difficulty_lock_seconds {
            let max_reduction = f64::from(base.saturating_sub(min));
            let reduction =
                (f64::from(config.difficulty_per_point) * score.value()).min(max_reduction);
            let interval = (f64::from(base) - reduction).round();
            // A negative score would push this above base, so clamp both ends
            self.spawn_interval = clamp_interval(interval, min, base);
        } else {
            self.spawn_interval = self.spawn_interval.clamp(min, base);
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn clamp_interval(interval: f64, min: u32, base: u32) -> u32 {
    interval.clamp(f64::from(min), f64::from(base)) as u32
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveCommand {
    Up,
    Down,
}

// Edge-triggered move input. When the terminal reports key releases, a held
// key only fires once; otherwise every press event counts.
#[derive(Resource, Debug, Clone, Default)]
pub struct Input {
    pub pending: VecDeque<MoveCommand>,
    pub up_held: bool,
    pub down_held: bool,
    pub track_releases: bool,
}

impl Input {
    #[must_use]
    pub fn new(track_releases: bool) -> Self {
        Self {
            track_releases,
            ..Self::default()
        }
    }

    /// Records a key press. Returns false if it was swallowed as a repeat.
    pub fn press(&mut self, command: MoveCommand) -> bool {
        if self.track_releases {
            let held = match command {
                MoveCommand::Up => &mut self.up_held,
                MoveCommand::Down => &mut self.down_held,
            };
            if *held {
                return false;
            }
            *held = true;
        }
        self.pending.push_back(command);
        true
    }

    pub fn release(&mut self, command: MoveCommand) {
        match command {
            MoveCommand::Up => self.up_held = false,
            MoveCommand::Down => self.down_held = false,
        }
    }

    pub fn clear(&mut self) {
        self.pending.clear();
        self.up_held = false;
        self.down_held = false;
    }
}

// Pending re-open of the note's mouth after it bites a rest. A newer bite
// replaces the deadline.
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct MouthTimer {
    pub reopen_at: Option<Duration>,
}

impl MouthTimer {
    pub fn schedule(&mut self, at: Duration) {
        self.reopen_at = Some(at);
    }

    /// Returns true (and clears the deadline) once `now` has reached it.
    pub fn is_due(&mut self, now: Duration) -> bool {
        match self.reopen_at {
            Some(at) if now >= at => {
                self.reopen_at = None;
                true
            }
            _ => false,
        }
    }
}

// Seedable source for rest lanes and kinds
#[derive(Resource, Debug, Clone)]
pub struct SpawnRng(pub fastrand::Rng);

impl SpawnRng {
    #[must_use]
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self(fastrand::Rng::with_seed(seed)),
            None => Self(fastrand::Rng::new()),
        }
    }
}

/// Something the presentation layer (audio, HUD) may want to react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    MovedUp,
    MovedDown,
    RestSpawned { kind: RestKind, line: usize },
    RestEaten(RestKind),
    RestMissed(RestKind),
    GameOver,
}

#[derive(Resource, Debug, Clone, Default)]
pub struct FrameEvents {
    events: Vec<GameEvent>,
}

impl FrameEvents {
    pub fn push(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    #[must_use]
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn drain(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
