#![warn(clippy::all, clippy::pedantic)]
#![allow(
    // World coordinates are projected onto terminal cells, always small and non-negative
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]

use crate::Time;
use crate::app::App;
use crate::components::{Difficulty, GameState, Note, Rest, Staff};
use crate::config::GameConfig;
use crate::menu::MenuRenderer;
use crate::menu::renderer::centered_rect;
use crate::menu_types::MenuState;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

// Smallest play field that still shows every staff line apart
const MIN_FIELD_WIDTH: u16 = 40;
const MIN_FIELD_HEIGHT: u16 = 14;
const INFO_WIDTH: u16 = 26;

pub const NOTE_GLYPH_OPEN: &str = "♪<";
pub const NOTE_GLYPH_CLOSED: &str = "♪=";

pub fn render(f: &mut Frame, app: &mut App) {
    if app.menu.state != MenuState::Game {
        MenuRenderer::render_menu(f, app);
        return;
    }

    // Check if the terminal is too small to render the game properly
    if f.area().width < MIN_FIELD_WIDTH + INFO_WIDTH || f.area().height < MIN_FIELD_HEIGHT {
        let warning_text = Paragraph::new(
            "Terminal too small!\nPlease resize your terminal\nto continue playing.",
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Restless"));

        let warning_area = centered_rect(34, 5, f.area());
        f.render_widget(warning_text, warning_area);
        return;
    }

    let main_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(MIN_FIELD_WIDTH), Constraint::Length(INFO_WIDTH)])
        .split(f.area());

    render_field(f, app, main_layout[0]);
    render_info(f, app, main_layout[1]);
}

// Maps a world coordinate onto one of `cells` terminal cells, or None when off screen
fn project(value: f32, extent: f32, cells: u16) -> Option<u16> {
    if extent <= 0.0 || cells == 0 {
        return None;
    }
    let cell = (value / extent * f32::from(cells)).floor();
    if cell < 0.0 || cell >= f32::from(cells) {
        None
    } else {
        Some(cell as u16)
    }
}

fn render_field(f: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(" RESTLESS ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let config = app.world.resource::<GameConfig>().clone();

    // Staff lines
    let staff = app.world.resource::<Staff>().clone();
    for &line_y in staff.lines() {
        if let Some(row) = project(line_y, config.height, inner.height) {
            let line = "─".repeat(usize::from(inner.width));
            let paragraph = Paragraph::new(line).style(Style::default().fg(Color::DarkGray));
            f.render_widget(paragraph, Rect::new(inner.x, inner.y + row, inner.width, 1));
        }
    }

    // Rests, drawn as their value label at their centre
    let rests: Vec<Rest> = app
        .world
        .query::<&Rest>()
        .iter(&app.world)
        .filter(|rest| !rest.collected)
        .copied()
        .collect();
    for rest in rests {
        let (Some(col), Some(row)) = (
            project(rest.x, config.width, inner.width),
            project(rest.y, config.height, inner.height),
        ) else {
            continue;
        };
        let label = rest.kind.label();
        let width = (label.len() as u16).min(inner.width - col);
        let paragraph = Paragraph::new(label).style(
            Style::default()
                .fg(rest.kind.get_color())
                .add_modifier(Modifier::BOLD),
        );
        f.render_widget(paragraph, Rect::new(inner.x + col, inner.y + row, width, 1));
    }

    // The note itself
    let note = app.world.resource::<Note>();
    if let (Some(col), Some(row)) = (
        project(note.x, config.width, inner.width),
        project(note.y, config.height, inner.height),
    ) {
        let glyph = if note.mouth_open {
            NOTE_GLYPH_OPEN
        } else {
            NOTE_GLYPH_CLOSED
        };
        let width = 2u16.min(inner.width - col);
        let paragraph = Paragraph::new(glyph).style(
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        );
        f.render_widget(paragraph, Rect::new(inner.x + col, inner.y + row, width, 1));
    }
}

fn render_info(f: &mut Frame, app: &App, area: Rect) {
    let info_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Title
            Constraint::Length(7), // Stats
            Constraint::Min(4),    // Controls
        ])
        .split(area);

    let info_title = Paragraph::new("INFO")
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(info_title, info_layout[0]);

    let game_state = app.world.resource::<GameState>();
    let difficulty = app.world.resource::<Difficulty>();
    let run_time = app
        .world
        .resource::<Time>()
        .elapsed()
        .saturating_sub(difficulty.run_started_at);

    let stats = vec![
        Line::from(vec![
            Span::raw("Score: "),
            Span::styled(
                game_state.score.to_string(),
                Style::default()
                    .fg(Color::LightGreen)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(format!("Eaten: {}", game_state.rests_eaten)),
        Line::from(format!("Missed: {}", game_state.rests_missed)),
        Line::from(format!("Spawn every: {} frames", difficulty.spawn_interval)),
        Line::from(format!("Time: {:.1}s", run_time.as_secs_f32())),
    ];
    let stats_info = Paragraph::new(stats).wrap(Wrap { trim: true });
    f.render_widget(stats_info, info_layout[1]);

    let controls = Paragraph::new(
        "Controls:\n\
        ↑/W: Jump up a line\n\
        ↓/S: Drop down a line\n\
        Q: Quit",
    )
    .block(Block::default().borders(Borders::TOP))
    .wrap(Wrap { trim: true });
    f.render_widget(controls, info_layout[2]);
}
