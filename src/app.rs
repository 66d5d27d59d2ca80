#![warn(clippy::all, clippy::pedantic)]

use bevy_ecs::prelude::*;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use log::{debug, error, info};
use std::error;
use std::path::PathBuf;
use std::time::Duration;

use crate::Time;
use crate::components::{
    Difficulty, FrameEvents, GameEvent, GameState, Input, MouthTimer, MoveCommand, Note, SpawnRng,
    Staff,
};
use crate::config::{Config, GameConfig, loader};
use crate::menu::MenuRenderer;
use crate::menu_types::{GameOverOption, Menu, MenuState, StartOption};
use crate::sound::{AudioState, SoundEffect, VOLUME_STEP};
use crate::systems::{frame_system, reset_run, start_run};

pub type AppResult<T> = std::result::Result<T, Box<dyn error::Error>>;

pub struct App {
    pub world: World,
    pub should_quit: bool,
    pub menu: Menu,
    pub menu_renderer: MenuRenderer,
    /// Where audio preferences are written when changed in the menu.
    pub settings_path: Option<PathBuf>,
}

impl App {
    /// Builds the app from the process-wide configuration and starts audio.
    pub fn new() -> Self {
        let config = Config::current();
        let audio = AudioState::from_config(&config.audio);
        let mut app = Self::with_audio(config.game, audio);
        app.settings_path = Some(loader::get_config_file_path());
        app
    }

    /// Builds the app around an existing audio state. Settings are not persisted.
    pub fn with_audio(config: GameConfig, audio: AudioState) -> Self {
        let config = config.sanitized();
        let staff = Staff::from_config(&config);

        let mut world = World::new();
        world.insert_resource(Time::new());
        world.insert_resource(Note::new(&staff, &config));
        world.insert_resource(Difficulty::new(&config));
        world.insert_resource(SpawnRng::new(config.seed));
        world.insert_resource(staff);
        world.insert_resource(GameState::default());
        world.insert_resource(Input::default());
        world.insert_resource(MouthTimer::default());
        world.insert_resource(FrameEvents::default());
        world.insert_resource(audio);
        world.insert_resource(config);

        Self {
            world,
            should_quit: false,
            menu: Menu::new(),
            menu_renderer: MenuRenderer::new(),
            settings_path: None,
        }
    }

    /// Switches input to release tracking, for terminals that report key releases.
    pub fn set_track_releases(&mut self, track_releases: bool) {
        self.world.resource_mut::<Input>().track_releases = track_releases;
    }

    /// Fixed simulation step matching the configured frame rate.
    #[must_use]
    pub fn frame_duration(&self) -> Duration {
        let frame_rate = self.world.resource::<GameConfig>().frame_rate.max(1);
        Duration::from_secs(1) / frame_rate
    }

    /// Advances the run clock by `delta` and runs one frame when in game.
    /// Returns the events the frame produced, after they were turned into sounds
    /// and screen changes.
    pub fn on_frame(&mut self, delta: Duration) -> Vec<GameEvent> {
        self.world.resource_mut::<Time>().advance(delta);

        if self.menu.state != MenuState::Game {
            self.menu_renderer.update();
            return Vec::new();
        }

        if !frame_system(&mut self.world) {
            return Vec::new();
        }

        let events = self.world.resource_mut::<FrameEvents>().drain();
        for event in &events {
            self.dispatch_event(*event);
        }
        events
    }

    fn dispatch_event(&mut self, event: GameEvent) {
        match event {
            GameEvent::MovedUp => {
                self.play(SoundEffect::JumpUp);
            }
            GameEvent::MovedDown => {
                self.play(SoundEffect::JumpDown);
            }
            GameEvent::RestEaten(_) => {
                self.play(SoundEffect::Eat);
            }
            GameEvent::RestSpawned { .. } | GameEvent::RestMissed(_) => {}
            GameEvent::GameOver => {
                self.play(SoundEffect::GameOver);
                self.world.resource_mut::<AudioState>().stop_music();
                self.menu.state = MenuState::GameOver;
                self.menu.game_over_selected = GameOverOption::TryAgain;
            }
        }
    }

    fn play(&self, effect: SoundEffect) {
        self.world.resource::<AudioState>().play_sound(effect);
    }

    /// Starts a fresh run from either menu: score, note, rests, spawn timer,
    /// interval and difficulty clock all go back to their initial values.
    pub fn begin_run(&mut self) {
        reset_run(&mut self.world);
        start_run(&mut self.world);
        self.menu.state = MenuState::Game;

        self.play(SoundEffect::GameStart);
        self.world.resource_mut::<AudioState>().start_music();
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        debug!("Key event: {key:?}");

        if key.kind == KeyEventKind::Release {
            if let Some(command) = move_command(key.code) {
                self.world.resource_mut::<Input>().release(command);
            }
            return;
        }

        // Allow quitting with 'q' regardless of screen
        if matches!(key.code, KeyCode::Char('q' | 'Q')) {
            self.should_quit = true;
            return;
        }

        match self.menu.state {
            MenuState::Game => {
                // Held keys report repeats; only fresh presses move the note
                if key.kind == KeyEventKind::Repeat {
                    return;
                }
                if let Some(command) = move_command(key.code) {
                    self.world.resource_mut::<Input>().press(command);
                }
            }
            MenuState::Start => self.handle_start_key(key.code),
            MenuState::GameOver => self.handle_game_over_key(key.code),
        }
    }

    fn handle_start_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Up | KeyCode::Char('w') => self.menu_renderer.prev_option(&mut self.menu),
            KeyCode::Down | KeyCode::Char('s') => self.menu_renderer.next_option(&mut self.menu),
            KeyCode::Left | KeyCode::Char('a') => self.adjust_volume(-VOLUME_STEP),
            KeyCode::Right | KeyCode::Char('d') => self.adjust_volume(VOLUME_STEP),
            KeyCode::Enter | KeyCode::Char(' ') => match self.menu.start_selected {
                StartOption::Start => self.begin_run(),
                StartOption::Sound => {
                    self.world.resource_mut::<AudioState>().toggle_sound();
                    self.persist_audio();
                }
                StartOption::MusicVolume | StartOption::SfxVolume => {}
                StartOption::Quit => self.should_quit = true,
            },
            _ => {}
        }
    }

    fn handle_game_over_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Up | KeyCode::Char('w') => self.menu_renderer.prev_option(&mut self.menu),
            KeyCode::Down | KeyCode::Char('s') => self.menu_renderer.next_option(&mut self.menu),
            KeyCode::Enter | KeyCode::Char(' ') => match self.menu.game_over_selected {
                GameOverOption::TryAgain => {
                    info!("Trying again");
                    self.begin_run();
                }
                GameOverOption::Quit => self.should_quit = true,
            },
            _ => {}
        }
    }

    fn adjust_volume(&mut self, step: f32) {
        {
            let mut audio = self.world.resource_mut::<AudioState>();
            match self.menu.start_selected {
                StartOption::MusicVolume => {
                    let volume = audio.get_music_volume();
                    audio.set_music_volume(volume + step);
                }
                StartOption::SfxVolume => {
                    let volume = audio.get_sfx_volume();
                    audio.set_sfx_volume(volume + step);
                    audio.play_sound(SoundEffect::Eat);
                }
                _ => return,
            }
        }
        self.persist_audio();
    }

    // Writes the current audio preferences back to the shared config and its file
    fn persist_audio(&self) {
        let mut config = Config::current();
        config.audio = self.world.resource::<AudioState>().to_config();
        Config::store(config.clone());

        if let Some(path) = &self.settings_path {
            if let Err(e) = loader::save_config_to_path(&config, path) {
                error!("Failed to save audio settings: {e}");
            }
        }
    }

    /// The score as the HUD shows it, e.g. "1 1/8".
    #[must_use]
    pub fn score_text(&self) -> String {
        self.world.resource::<GameState>().score.to_string()
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

fn move_command(code: KeyCode) -> Option<MoveCommand> {
    match code {
        KeyCode::Up | KeyCode::Char('w') => Some(MoveCommand::Up),
        KeyCode::Down | KeyCode::Char('s') => Some(MoveCommand::Down),
        _ => None,
    }
}
