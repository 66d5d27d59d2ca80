#![warn(clippy::all, clippy::pedantic)]
#![allow(
    // Allow truncation and sign loss when placing backdrop rests on terminal cells
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_possible_wrap
)]

use crate::app::App;
use crate::components::{GameState, RestKind};
use crate::menu_types::{GameOverOption, Menu, MenuState, StartOption};
use crate::sound::AudioState;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Paragraph, Wrap},
};
use std::time::{Duration, Instant};

use super::title::{TITLE_HEIGHT, render_ascii_title};

const TITLE_COLOR_CYCLE: Duration = Duration::from_millis(400);
const BACKDROP_SPAWN_INTERVAL: Duration = Duration::from_millis(600);
const BACKDROP_MAX_RESTS: usize = 12;
const BACKDROP_WIDTH: i32 = 200;

// A rest label drifting across the menu background
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackdropRest {
    pub x: i32,
    pub row: u16,
    pub kind: RestKind,
}

pub struct MenuRenderer {
    pub backdrop: Vec<BackdropRest>,
    pub last_backdrop_spawn: Instant,
    pub title_colors: Vec<Color>,
    pub color_change_time: Instant,
}

impl Default for MenuRenderer {
    fn default() -> Self {
        Self {
            backdrop: Vec::new(),
            last_backdrop_spawn: Instant::now(),
            title_colors: vec![
                Color::LightMagenta,
                Color::LightCyan,
                Color::LightGreen,
                Color::Yellow,
                Color::LightRed,
            ],
            color_change_time: Instant::now(),
        }
    }
}

impl MenuRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_option(&mut self, menu: &mut Menu) {
        match menu.state {
            MenuState::Start => {
                menu.start_selected = cycle(&StartOption::ALL, menu.start_selected, 1);
            }
            MenuState::GameOver => {
                menu.game_over_selected = cycle(&GameOverOption::ALL, menu.game_over_selected, 1);
            }
            MenuState::Game => {}
        }
    }

    pub fn prev_option(&mut self, menu: &mut Menu) {
        match menu.state {
            MenuState::Start => {
                menu.start_selected =
                    cycle(&StartOption::ALL, menu.start_selected, StartOption::ALL.len() - 1);
            }
            MenuState::GameOver => {
                menu.game_over_selected = cycle(
                    &GameOverOption::ALL,
                    menu.game_over_selected,
                    GameOverOption::ALL.len() - 1,
                );
            }
            MenuState::Game => {}
        }
    }

    /// Cycles the title colours and drifts the backdrop rests leftward.
    pub fn update(&mut self) {
        if self.color_change_time.elapsed() > TITLE_COLOR_CYCLE {
            self.color_change_time = Instant::now();
            self.title_colors.rotate_left(1);
        }

        if self.last_backdrop_spawn.elapsed() > BACKDROP_SPAWN_INTERVAL
            && self.backdrop.len() < BACKDROP_MAX_RESTS
        {
            self.last_backdrop_spawn = Instant::now();
            self.backdrop.push(BackdropRest {
                x: BACKDROP_WIDTH,
                row: fastrand::u16(0..40),
                kind: RestKind::ALL[fastrand::usize(..RestKind::ALL.len())],
            });
        }

        for rest in &mut self.backdrop {
            rest.x -= 1;
        }
        self.backdrop.retain(|rest| rest.x > -5);
    }

    pub fn render_menu(f: &mut Frame, app: &App) {
        let area = f.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(TITLE_HEIGHT + 2),
                Constraint::Min(0),
            ])
            .split(area);

        // Backdrop first so it stays behind the text
        render_backdrop(f, &app.menu_renderer, area, chunks[0].height);
        render_ascii_title(f, chunks[0], &app.menu_renderer.title_colors);

        match app.menu.state {
            MenuState::Start => render_start_options(f, chunks[1], app),
            MenuState::GameOver => render_game_over(f, chunks[1], app),
            MenuState::Game => {}
        }
    }
}

fn cycle<T: Copy + PartialEq>(options: &[T], current: T, step: usize) -> T {
    let index = options.iter().position(|o| *o == current).unwrap_or(0);
    options[(index + step) % options.len()]
}

fn percent(volume: f32) -> u32 {
    (volume * 100.0).round() as u32
}

/// Label shown for a start screen entry, reflecting current audio settings.
#[must_use]
pub fn start_option_label(option: StartOption, audio: &AudioState) -> String {
    match option {
        StartOption::Start => "START".to_string(),
        StartOption::Sound => format!(
            "Sound: {}",
            if audio.is_sound_enabled() { "ON" } else { "OFF" }
        ),
        StartOption::MusicVolume => {
            format!("Music Volume: ◀ {}% ▶", percent(audio.get_music_volume()))
        }
        StartOption::SfxVolume => format!("SFX Volume: ◀ {}% ▶", percent(audio.get_sfx_volume())),
        StartOption::Quit => "Quit".to_string(),
    }
}

fn selectable_lines<'a, T: Copy + PartialEq>(
    options: &[T],
    selected: T,
    label: impl Fn(T) -> String,
) -> Vec<Line<'a>> {
    options
        .iter()
        .map(|option| {
            let style = if *option == selected {
                Style::default().add_modifier(Modifier::REVERSED)
            } else {
                Style::default()
            };
            Line::from(vec![Span::styled(label(*option), style)])
        })
        .collect()
}

fn render_start_options(f: &mut Frame, area: Rect, app: &App) {
    let audio = app.world.resource::<AudioState>();

    let mut lines = vec![
        Line::from(Span::styled(
            "EAT THE RESTS TO DEFEAT THE SILENCE!",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from("↑ = Jump Up    ↓ = Jump Down"),
        Line::from(""),
    ];
    lines.extend(selectable_lines(
        &StartOption::ALL,
        app.menu.start_selected,
        |option| start_option_label(option, audio),
    ));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Enter: select   ←/→: volume   Q: quit",
        Style::default().fg(Color::DarkGray),
    )));

    let paragraph = Paragraph::new(Text::from(lines))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

fn render_game_over(f: &mut Frame, area: Rect, app: &App) {
    let game_state = app.world.resource::<GameState>();

    let mut lines = vec![
        Line::from(Span::styled(
            "THE SILENCE HAS WON",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!(
            "Rests eaten: {}   Rests missed: {}",
            game_state.rests_eaten, game_state.rests_missed
        )),
        Line::from(""),
    ];
    lines.extend(selectable_lines(
        &GameOverOption::ALL,
        app.menu.game_over_selected,
        |option| match option {
            GameOverOption::TryAgain => "Try Again?".to_string(),
            GameOverOption::Quit => "Quit".to_string(),
        },
    ));

    let paragraph = Paragraph::new(Text::from(lines))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

/// Renders the drifting rests behind the menu, skipping the title rows
fn render_backdrop(f: &mut Frame, renderer: &MenuRenderer, area: Rect, title_rows: u16) {
    for rest in &renderer.backdrop {
        let y = area.y + title_rows + rest.row;
        if rest.x < 0 || y >= area.bottom() {
            continue;
        }
        let x = area.x + rest.x as u16;
        if x >= area.right() {
            continue;
        }
        let width = (rest.kind.label().len() as u16).min(area.right() - x);
        let label = Paragraph::new(rest.kind.label())
            .style(Style::default().fg(rest.kind.get_color()).add_modifier(Modifier::DIM));
        f.render_widget(label, Rect::new(x, y, width, 1));
    }
}

/// Helper function to create a centered rectangle inside another rectangle
pub fn centered_rect(width: u16, height: u16, r: Rect) -> Rect {
    let x = r.x + r.width.saturating_sub(width) / 2;
    let y = r.y + r.height.saturating_sub(height) / 2;

    Rect::new(x, y, width.min(r.width), height.min(r.height))
}
