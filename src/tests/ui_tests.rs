#![warn(clippy::all, clippy::pedantic)]

#[cfg(test)]
mod tests {
    use crate::app::App;
    use crate::components::{Note, RestKind};
    use crate::menu_types::MenuState;
    use crate::tests::test_utils::{create_test_app, place_rest};
    use crate::ui::{self, NOTE_GLYPH_CLOSED, NOTE_GLYPH_OPEN};
    use ratatui::{Terminal, backend::TestBackend, buffer::Cell};

    // Helper function to create a test terminal
    fn create_test_terminal(width: u16, height: u16) -> Terminal<TestBackend> {
        let backend = TestBackend::new(width, height);
        Terminal::new(backend).unwrap()
    }

    fn draw(terminal: &mut Terminal<TestBackend>, app: &mut App) -> String {
        terminal.draw(|f| ui::render(f, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(Cell::symbol)
            .collect()
    }

    #[test]
    fn test_render_start_screen() {
        let mut terminal = create_test_terminal(80, 30);
        let mut app = create_test_app();

        let text = draw(&mut terminal, &mut app);
        assert!(text.contains("EAT THE RESTS TO DEFEAT THE SILENCE!"));
        assert!(text.contains("START"));
        assert!(text.contains("Sound: ON"));
        assert!(text.contains("Music Volume"));
        assert!(text.contains("Quit"));
    }

    #[test]
    fn test_render_game_view() {
        let mut terminal = create_test_terminal(100, 30);
        let mut app = create_test_app();
        app.begin_run();
        place_rest(&mut app.world, 400.0, 0, RestKind::Half);

        let text = draw(&mut terminal, &mut app);
        assert!(text.contains("Score: 0 1/8"));
        assert!(text.contains("INFO"));
        assert!(text.contains("1/2"));
        assert!(text.contains(NOTE_GLYPH_OPEN));
        assert!(text.contains("─────"));
    }

    #[test]
    fn test_render_closed_mouth() {
        let mut terminal = create_test_terminal(100, 30);
        let mut app = create_test_app();
        app.begin_run();
        app.world.resource_mut::<Note>().mouth_open = false;

        let text = draw(&mut terminal, &mut app);
        assert!(text.contains(NOTE_GLYPH_CLOSED));
        assert!(!text.contains(NOTE_GLYPH_OPEN));
    }

    #[test]
    fn test_off_screen_rest_not_drawn() {
        let mut terminal = create_test_terminal(100, 30);
        let mut app = create_test_app();
        app.begin_run();
        place_rest(&mut app.world, 820.0, 0, RestKind::Half);

        let text = draw(&mut terminal, &mut app);
        assert!(!text.contains("1/2"));
    }

    #[test]
    fn test_small_terminal_warning() {
        let mut terminal = create_test_terminal(40, 10);
        let mut app = create_test_app();
        app.begin_run();

        let text = draw(&mut terminal, &mut app);
        assert!(text.contains("Terminal too small!"));
        assert!(!text.contains("Score:"));
    }

    #[test]
    fn test_render_game_over_screen() {
        let mut terminal = create_test_terminal(80, 30);
        let mut app = create_test_app();
        app.menu.state = MenuState::GameOver;

        let text = draw(&mut terminal, &mut app);
        assert!(text.contains("THE SILENCE HAS WON"));
        assert!(text.contains("Try Again?"));
    }
}
