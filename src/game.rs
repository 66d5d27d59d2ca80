#![warn(clippy::all, clippy::pedantic)]

// Play field, in logical pixels. The terminal renderer scales this to fit.
pub const FIELD_WIDTH: f32 = 800.0;
pub const FIELD_HEIGHT: f32 = 400.0;

// Staff layout
pub const STAFF_LINE_COUNT: usize = 5;
pub const STAFF_SPACING: f32 = 60.0;

// Physics, per frame
pub const GRAVITY: f32 = 0.6;
pub const JUMP_STRENGTH: f32 = -9.0; // Negative is upward
pub const DESCENT_FACTOR: f32 = 0.8; // Down moves push with 80% of the jump strength
pub const SNAP_BAND_ABOVE: f32 = 2.0; // Snap band is [line - 2, line + 10]
pub const SNAP_BAND_BELOW: f32 = 10.0;

// The note
pub const NOTE_X: f32 = 200.0;
pub const NOTE_RADIUS: f32 = 33.0;
pub const MAX_JUMPS: u32 = 3;
pub const MOUTH_HOTSPOT_BIAS: f32 = 0.1; // Fraction of the radius above the centre
pub const MOUTH_CLOSED_MS: u64 = 222;

// Rests
pub const SCROLL_SPEED: f32 = 5.0;
pub const REST_SPAWN_OFFSET: f32 = 20.0; // Spawned this far past the right edge
pub const REST_Y_OFFSET: f32 = 5.0;
pub const REST_SCALE: f32 = 4.0; // Display width is radius * 2 * scale

// Difficulty ramp
pub const BASE_SPAWN_INTERVAL: u32 = 111; // Frames between spawns at the start of a run
pub const MIN_SPAWN_INTERVAL: u32 = 20; // Hardest setting
pub const DIFFICULTY_PER_POINT: f32 = 6.0; // Frames shaved off per 1.0 of score
pub const DIFFICULTY_LOCK_SECONDS: f32 = 60.0;

// Every run starts one eighth above silence
pub const STARTING_SCORE_NUMERATOR: i64 = 1;
pub const STARTING_SCORE_DENOMINATOR: i64 = 8;

pub const FRAME_RATE: u32 = 60;
