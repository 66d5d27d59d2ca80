#![warn(clippy::all, clippy::pedantic)]

#[cfg(test)]
mod tests {
    use crate::components::Difficulty;
    use crate::config::GameConfig;
    use crate::fraction::Fraction;
    use std::time::Duration;

    fn secs(s: u64) -> Duration {
        Duration::from_secs(s)
    }

    #[test]
    fn test_starts_at_base_interval() {
        let config = GameConfig::default();
        let difficulty = Difficulty::new(&config);
        assert_eq!(difficulty.spawn_interval, 111);
    }

    #[test]
    fn test_interval_follows_score() {
        let config = GameConfig::default();
        let mut difficulty = Difficulty::new(&config);

        // 111 - 6 * 0.125 = 110.25
        difficulty.update(Fraction::new(1, 8), secs(0), &config);
        assert_eq!(difficulty.spawn_interval, 110);

        difficulty.update(Fraction::new(2, 1), secs(10), &config);
        assert_eq!(difficulty.spawn_interval, 99);
    }

    #[test]
    fn test_interval_floor() {
        let config = GameConfig::default();
        let mut difficulty = Difficulty::new(&config);
        difficulty.update(Fraction::new(100, 1), secs(30), &config);
        assert_eq!(difficulty.spawn_interval, config.min_spawn_interval);
    }

    #[test]
    fn test_negative_score_clamped_to_base() {
        let config = GameConfig::default();
        let mut difficulty = Difficulty::new(&config);
        difficulty.update(Fraction::new(-7, 8), secs(1), &config);
        assert_eq!(difficulty.spawn_interval, config.base_spawn_interval);
    }

    #[test]
    fn test_interval_frozen_after_lock() {
        let config = GameConfig::default();
        let mut difficulty = Difficulty::new(&config);

        difficulty.update(Fraction::new(2, 1), secs(60), &config);
        let at_lock = difficulty.spawn_interval;

        difficulty.update(Fraction::new(2, 1), secs(61), &config);
        assert_eq!(difficulty.spawn_interval, at_lock);

        // Even a much larger score no longer changes it
        difficulty.update(Fraction::new(12, 1), secs(90), &config);
        assert_eq!(difficulty.spawn_interval, at_lock);
    }

    #[test]
    fn test_restart_resets_clock_and_interval() {
        let config = GameConfig::default();
        let mut difficulty = Difficulty::new(&config);
        difficulty.update(Fraction::new(5, 1), secs(30), &config);
        assert!(difficulty.spawn_interval < config.base_spawn_interval);

        difficulty.restart(secs(100), &config);
        assert_eq!(difficulty.spawn_interval, config.base_spawn_interval);
        assert_eq!(difficulty.run_started_at, secs(100));

        // 30s into the new run the ramp is still live
        difficulty.update(Fraction::new(2, 1), secs(130), &config);
        assert_eq!(difficulty.spawn_interval, 99);
    }

    #[test]
    fn test_interval_always_within_bounds() {
        let config = GameConfig::default();
        let mut difficulty = Difficulty::new(&config);
        for numerator in -40..400 {
            for t in [0, 30, 59, 60, 61, 120] {
                difficulty.update(Fraction::new(numerator, 8), secs(t), &config);
                assert!(difficulty.spawn_interval >= config.min_spawn_interval);
                assert!(difficulty.spawn_interval <= config.base_spawn_interval);
            }
        }
    }
}
