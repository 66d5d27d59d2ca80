#![warn(clippy::all, clippy::pedantic)]

#[cfg(test)]
mod tests {
    use crate::components::Staff;
    use crate::config::GameConfig;
    use crate::game::*;

    #[test]
    fn test_staff_fits_in_field() {
        let staff = Staff::new(FIELD_HEIGHT, STAFF_LINE_COUNT, STAFF_SPACING);
        assert!(staff.lines().iter().all(|y| *y > 0.0 && *y < FIELD_HEIGHT));
        // The note resting on the bottom line stays above the floor
        assert!(staff.line_y(staff.last_index()) - NOTE_RADIUS <= FIELD_HEIGHT - NOTE_RADIUS);
    }

    #[test]
    fn test_difficulty_constants() {
        assert!(MIN_SPAWN_INTERVAL < BASE_SPAWN_INTERVAL);
        assert!(DIFFICULTY_LOCK_SECONDS > 0.0);
    }

    #[test]
    fn test_jump_reaches_line_above() {
        // Apex height of a jump: v^2 / 2g
        let apex = JUMP_STRENGTH * JUMP_STRENGTH / (2.0 * GRAVITY);
        assert!(apex > STAFF_SPACING - SNAP_BAND_ABOVE);
    }

    #[test]
    fn test_config_defaults_match_constants() {
        let config = GameConfig::default();
        assert_eq!(config.staff_lines, STAFF_LINE_COUNT);
        assert_eq!(config.base_spawn_interval, BASE_SPAWN_INTERVAL);
        assert_eq!(config.mouth_closed_ms, MOUTH_CLOSED_MS);
        assert!((config.rest_display_width() - 264.0).abs() < f32::EPSILON);
        assert!((config.floor_y() - 367.0).abs() < f32::EPSILON);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_sanitized_repairs_bad_values() {
        let config = GameConfig {
            staff_lines: 0,
            frame_rate: 0,
            base_spawn_interval: 50,
            min_spawn_interval: 80,
            note_radius: -1.0,
            ..GameConfig::default()
        }
        .sanitized();

        assert_eq!(config.staff_lines, 1);
        assert_eq!(config.frame_rate, 1);
        assert_eq!(config.min_spawn_interval, 50);
        assert!((config.note_radius - NOTE_RADIUS).abs() < f32::EPSILON);
    }
}
