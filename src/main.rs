#![warn(clippy::all, clippy::pedantic)]

use std::io;
use std::os::fd::AsRawFd;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::{
    execute,
    terminal::{
        EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
        supports_keyboard_enhancement,
    },
};
use log::{debug, error, info};
use ratatui::{Terminal, prelude::*};
use restless::app::{App, AppResult};
use restless::config::{self, Config};
use restless::sound::AudioState;
use restless::ui;

fn main() -> AppResult<()> {
    // Create log file and redirect stderr to it
    let log_path = "restless.log";
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(log_path)?;

    // Redirect stderr to the log file
    let stderr_fd = io::stderr().as_raw_fd();
    let log_file_fd = log_file.as_raw_fd();

    // Safety: both descriptors are open for the duration of the call
    unsafe {
        libc::dup2(log_file_fd, stderr_fd);
    }

    // Configure the logger to use stderr (which is now redirected to our file)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .format_module_path(false)
        .init();

    info!("Starting Restless");

    match config::loader::load_config_from_file() {
        Ok(loaded) => {
            Config::store(loaded);
            info!("Configuration loaded successfully");
        }
        Err(e) => error!("Failed to load configuration, using defaults: {e}"),
    }

    // Terminal initialization
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    // Release events let a held arrow key count as a single move
    let keyboard_enhanced = supports_keyboard_enhancement().unwrap_or(false);
    if keyboard_enhanced {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        )?;
    }
    debug!("Keyboard enhancement: {keyboard_enhanced}");

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new();
    app.set_track_releases(keyboard_enhanced);
    let res = run_app(&mut terminal, app);

    // Restore terminal
    if keyboard_enhanced {
        execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags)?;
    }
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        error!("Game error: {err:?}");
    }

    info!("Exiting");
    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, mut app: App) -> AppResult<()> {
    let frame_duration = app.frame_duration();
    let mut last_frame = Instant::now();

    // Explicitly flush any pending input events that might be in the buffer
    while event::poll(Duration::from_millis(0))? {
        let _ = event::read()?;
    }

    // Flag to track if we've already warned about audio device issues
    let mut audio_error_logged = false;

    loop {
        if app.should_quit {
            return Ok(());
        }

        // One fixed simulation step per rendered frame
        if last_frame.elapsed() >= frame_duration {
            last_frame = Instant::now();
            app.on_frame(frame_duration);
            terminal.draw(|f| ui::render(f, &mut app))?;

            let audio_unavailable = !app.world.resource::<AudioState>().is_audio_available();
            if audio_unavailable && !audio_error_logged {
                error!("Audio device is unavailable. Continuing without sound.");
                audio_error_logged = true;
            }
        }

        // Process keyboard input until the next frame is due
        let timeout = frame_duration.saturating_sub(last_frame.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                app.handle_key(key);
            }
        }
    }
}
