#![warn(clippy::all, clippy::pedantic)]

#[cfg(test)]
mod tests {
    use crate::config::loader::{ConfigError, load_config_from_path, save_config_to_path};
    use crate::config::{AudioConfig, Config, GameConfig};
    use std::fs;
    use std::path::PathBuf;
    use tempfile::tempdir;

    // Helper function to create a test config path
    fn create_test_config_path() -> (tempfile::TempDir, PathBuf) {
        let temp_dir = tempdir().expect("Failed to create temp directory");
        let config_path = temp_dir.path().join("restless").join("config.toml");
        (temp_dir, config_path)
    }

    #[test]
    fn test_load_nonexistent_config_writes_defaults() {
        let (_temp_dir, config_path) = create_test_config_path();
        assert!(!config_path.exists());

        let config = load_config_from_path(&config_path).expect("Failed to load default config");

        assert!(config_path.exists(), "Config file should have been created");
        assert_eq!(config, Config::default());
        assert_eq!(config.game.base_spawn_interval, 111);
        assert!(config.audio.sound_enabled);
    }

    #[test]
    fn test_partial_config_falls_back_to_defaults() {
        let (_temp_dir, config_path) = create_test_config_path();
        fs::create_dir_all(config_path.parent().expect("has parent")).expect("create dir");
        fs::write(
            &config_path,
            "[game]\ngravity = 0.8\nseed = 99\n\n[audio]\nmusic_volume = 0.25\n",
        )
        .expect("write config");

        let config = load_config_from_path(&config_path).expect("Failed to load config");

        assert!((config.game.gravity - 0.8).abs() < f32::EPSILON);
        assert_eq!(config.game.seed, Some(99));
        assert!((config.game.jump_strength - GameConfig::default().jump_strength).abs() < f32::EPSILON);
        assert!((config.audio.music_volume - 0.25).abs() < f32::EPSILON);
        assert!((config.audio.sfx_volume - AudioConfig::default().sfx_volume).abs() < f32::EPSILON);
    }

    #[test]
    fn test_loaded_values_are_sanitized() {
        let (_temp_dir, config_path) = create_test_config_path();
        fs::create_dir_all(config_path.parent().expect("has parent")).expect("create dir");
        fs::write(
            &config_path,
            "[game]\nstaff_lines = 0\nmin_spawn_interval = 500\n\n[audio]\nsfx_volume = 3.0\n",
        )
        .expect("write config");

        let config = load_config_from_path(&config_path).expect("Failed to load config");

        assert_eq!(config.game.staff_lines, 1);
        assert_eq!(config.game.min_spawn_interval, config.game.base_spawn_interval);
        assert!((config.audio.sfx_volume - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_invalid_config_is_a_parse_error() {
        let (_temp_dir, config_path) = create_test_config_path();
        fs::create_dir_all(config_path.parent().expect("has parent")).expect("create dir");
        fs::write(&config_path, "[game\ngravity = ").expect("write config");

        let result = load_config_from_path(&config_path);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
        let message = result.expect_err("should fail").to_string();
        assert!(message.contains("parse"), "unexpected message: {message}");
    }

    #[test]
    fn test_saved_audio_preferences_reload() {
        let (_temp_dir, config_path) = create_test_config_path();

        let mut config = Config::default();
        config.audio.sound_enabled = false;
        config.audio.music_volume = 0.75;
        save_config_to_path(&config, &config_path).expect("Failed to save config");

        let loaded = load_config_from_path(&config_path).expect("Failed to load config");
        assert_eq!(loaded.audio, config.audio);
    }
}
