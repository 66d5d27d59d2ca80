#![warn(clippy::all, clippy::pedantic)]

#[cfg(test)]
mod tests {
    use crate::components::*;
    use crate::config::GameConfig;
    use crate::fraction::Fraction;
    use std::time::Duration;

    fn setup() -> (Staff, GameConfig, Note) {
        let config = GameConfig::default();
        let staff = Staff::from_config(&config);
        let note = Note::new(&staff, &config);
        (staff, config, note)
    }

    #[test]
    fn test_staff_layout() {
        let staff = Staff::new(400.0, 5, 60.0);
        assert_eq!(staff.lines(), &[80.0, 140.0, 200.0, 260.0, 320.0]);
        assert_eq!(staff.len(), 5);
        assert_eq!(staff.last_index(), 4);
        assert!(!staff.is_empty());
    }

    #[test]
    fn test_note_starts_on_bottom_line() {
        let (staff, config, note) = setup();
        assert_eq!(note.current_line, 4);
        assert_eq!(note.target_line, 4);
        assert!((note.y - (staff.line_y(4) - config.note_radius)).abs() < f32::EPSILON);
        assert!(note.is_resting_on(staff.line_y(4)));
        assert_eq!(note.jumps_remaining, config.max_jumps);
        assert!(note.mouth_open);
    }

    #[test]
    fn test_move_up_sets_target() {
        let (_staff, config, mut note) = setup();
        assert!(note.move_up(config.jump_strength));
        assert_eq!(note.target_line, 3);
        assert!((note.vy - config.jump_strength).abs() < f32::EPSILON);
        assert!(!note.descending);
    }

    #[test]
    fn test_move_up_snaps_to_line_above() {
        let (staff, config, mut note) = setup();
        note.move_up(config.jump_strength);

        for _ in 0..16 {
            note.step(&staff, &config);
        }
        // Still airborne just after the apex
        assert_eq!(note.current_line, 4);

        let snapped = note.step(&staff, &config);
        assert_eq!(snapped, Some(3));
        assert_eq!(note.current_line, 3);
        assert!((note.y - 227.0).abs() < f32::EPSILON);
        assert!(note.vy.abs() < f32::EPSILON);
    }

    #[test]
    fn test_move_down_snaps_to_line_below() {
        let (staff, config, mut note) = setup();
        note.move_up(config.jump_strength);
        while note.step(&staff, &config).is_none() {}
        assert_eq!(note.current_line, 3);

        assert!(note.move_down(&staff, config.jump_strength, config.descent_factor));
        assert!(note.descending);
        assert_eq!(note.target_line, 4);
        assert!((note.vy - 7.2).abs() < 1e-4);

        for _ in 0..6 {
            assert_eq!(note.step(&staff, &config), None);
        }
        assert_eq!(note.step(&staff, &config), Some(4));
        assert!(!note.descending);
        assert!((note.y - 287.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_moves_refused_at_staff_edges() {
        let (staff, config, mut note) = setup();
        assert!(!note.move_down(&staff, config.jump_strength, config.descent_factor));

        note.current_line = 0;
        note.target_line = 0;
        assert!(!note.move_up(config.jump_strength));
        assert_eq!(note.target_line, 0);
    }

    #[test]
    fn test_floor_clamp_restores_jumps() {
        let (staff, config, mut note) = setup();
        note.y = 380.0;
        note.jumps_remaining = 0;

        note.step(&staff, &config);
        assert!((note.y - config.floor_y()).abs() < f32::EPSILON);
        assert!(note.vy.abs() < f32::EPSILON);
        assert_eq!(note.jumps_remaining, config.max_jumps);
    }

    #[test]
    fn test_jump_budget() {
        let (_staff, config, mut note) = setup();
        for _ in 0..config.max_jumps {
            assert!(note.jump(config.jump_strength));
        }
        assert_eq!(note.jumps_remaining, 0);
        assert!(!note.jump(config.jump_strength));

        note.restore_jumps();
        assert_eq!(note.jumps_remaining, config.max_jumps);
    }

    #[test]
    fn test_mouth_hotspot_sits_above_centre() {
        let (_staff, config, note) = setup();
        let (x, y) = note.mouth_hotspot(config.mouth_hotspot_bias);
        assert!((x - note.x).abs() < f32::EPSILON);
        assert!((y - (note.y - 3.3)).abs() < 1e-4);
    }

    #[test]
    fn test_rest_kind_values() {
        assert_eq!(RestKind::Sixteenth.value(), Fraction::new(1, 16));
        assert_eq!(RestKind::Whole.value(), Fraction::new(1, 1));
        assert_eq!(RestKind::Half.label(), "1/2");
        assert_eq!(RestKind::ALL.len(), 5);
    }

    #[test]
    fn test_game_state_defaults() {
        let state = GameState::default();
        assert_eq!(state.score, Fraction::new(1, 8));
        assert!(!state.started);
        assert!(!state.is_running());

        let mut state = GameState {
            started: true,
            rests_eaten: 4,
            ..GameState::default()
        };
        assert!(state.is_running());
        state.reset();
        assert_eq!(state.rests_eaten, 0);
        assert!(!state.started);
    }

    #[test]
    fn test_input_edge_triggered_with_releases() {
        let mut input = Input::new(true);
        assert!(input.press(MoveCommand::Up));
        // Held key repeats are swallowed
        assert!(!input.press(MoveCommand::Up));
        assert_eq!(input.pending.len(), 1);

        input.release(MoveCommand::Up);
        assert!(input.press(MoveCommand::Up));
        assert!(input.press(MoveCommand::Down));
        assert_eq!(
            input.pending.iter().copied().collect::<Vec<_>>(),
            vec![MoveCommand::Up, MoveCommand::Up, MoveCommand::Down]
        );
    }

    #[test]
    fn test_input_without_release_tracking() {
        let mut input = Input::new(false);
        assert!(input.press(MoveCommand::Down));
        assert!(input.press(MoveCommand::Down));
        assert_eq!(input.pending.len(), 2);

        input.clear();
        assert!(input.pending.is_empty());
        assert!(!input.track_releases);
    }

    #[test]
    fn test_mouth_timer_last_schedule_wins() {
        let mut timer = MouthTimer::default();
        assert!(!timer.is_due(Duration::from_secs(10)));

        timer.schedule(Duration::from_millis(222));
        timer.schedule(Duration::from_millis(300));
        assert!(!timer.is_due(Duration::from_millis(250)));
        assert!(timer.is_due(Duration::from_millis(300)));
        // Fires once
        assert!(!timer.is_due(Duration::from_millis(400)));
    }

    #[test]
    fn test_seeded_rng_is_repeatable() {
        let mut a = SpawnRng::new(Some(7));
        let mut b = SpawnRng::new(Some(7));
        let kinds_a: Vec<RestKind> = (0..20).map(|_| RestKind::random(&mut a.0)).collect();
        let kinds_b: Vec<RestKind> = (0..20).map(|_| RestKind::random(&mut b.0)).collect();
        assert_eq!(kinds_a, kinds_b);
    }

    #[test]
    fn test_frame_events_drain() {
        let mut events = FrameEvents::default();
        events.push(GameEvent::MovedUp);
        events.push(GameEvent::GameOver);
        assert_eq!(events.events().len(), 2);

        let drained = events.drain();
        assert_eq!(drained, vec![GameEvent::MovedUp, GameEvent::GameOver]);
        assert!(events.events().is_empty());
    }
}
