#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::cast_possible_truncation)]

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::Text,
    widgets::Paragraph,
};

use super::renderer::centered_rect;

pub const TITLE_HEIGHT: u16 = 5;

// Gap between letters, in columns
const LETTER_SPACING: u16 = 1;

// ASCII art letters for "RESTLESS" title
pub const TITLE_LETTERS: [&str; 8] = [
    // R
    "███ \n█  █\n███ \n█ █ \n█  █",
    // E
    "████\n█   \n███ \n█   \n████",
    // S
    " ███\n█   \n ██ \n   █\n███ ",
    // T
    "█████\n  █  \n  █  \n  █  \n  █  ",
    // L
    "█   \n█   \n█   \n█   \n████",
    // E
    "████\n█   \n███ \n█   \n████",
    // S
    " ███\n█   \n ██ \n   █\n███ ",
    // S
    " ███\n█   \n ██ \n   █\n███ ",
];

fn letter_width(letter: &str) -> u16 {
    letter.lines().next().map_or(0, |l| l.chars().count()) as u16
}

/// Total width of the title including letter spacing.
#[must_use]
pub fn title_width() -> u16 {
    let letters: u16 = TITLE_LETTERS.iter().map(|l| letter_width(l)).sum();
    letters + LETTER_SPACING * (TITLE_LETTERS.len() as u16 - 1)
}

/// Renders the ASCII art title, one colour per letter
pub fn render_ascii_title(f: &mut Frame, area: Rect, colors: &[Color]) {
    let title_area = centered_rect(title_width(), TITLE_HEIGHT, area);
    let mut current_x = title_area.x;

    for (i, letter) in TITLE_LETTERS.iter().enumerate() {
        let width = letter_width(letter);
        if current_x + width > title_area.right() {
            break;
        }
        let letter_area = Rect::new(current_x, title_area.y, width, title_area.height);

        let color = colors.get(i % colors.len().max(1)).copied().unwrap_or(Color::White);
        let paragraph = Paragraph::new(Text::from(*letter)).style(Style::default().fg(color));
        f.render_widget(paragraph, letter_area);

        current_x += width + LETTER_SPACING;
    }
}
