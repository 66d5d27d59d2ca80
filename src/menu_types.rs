// Which screen the app is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuState {
    Start,
    Game,
    GameOver,
}

// Start screen entries, top to bottom
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOption {
    Start,
    Sound,
    MusicVolume,
    SfxVolume,
    Quit,
}

impl StartOption {
    pub const ALL: [StartOption; 5] = [
        StartOption::Start,
        StartOption::Sound,
        StartOption::MusicVolume,
        StartOption::SfxVolume,
        StartOption::Quit,
    ];
}

// Game over screen entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverOption {
    TryAgain,
    Quit,
}

impl GameOverOption {
    pub const ALL: [GameOverOption; 2] = [GameOverOption::TryAgain, GameOverOption::Quit];
}

#[derive(Debug, Clone)]
pub struct Menu {
    pub state: MenuState,
    pub start_selected: StartOption,
    pub game_over_selected: GameOverOption,
}

impl Default for Menu {
    fn default() -> Self {
        Self {
            state: MenuState::Start,
            start_selected: StartOption::Start,
            game_over_selected: GameOverOption::TryAgain,
        }
    }
}

impl Menu {
    pub fn new() -> Self {
        Self::default()
    }
}
