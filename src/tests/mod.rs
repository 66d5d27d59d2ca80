#![warn(clippy::all, clippy::pedantic)]

pub mod components_tests;
pub mod config_loader_tests;
pub mod difficulty_tests;
pub mod game_tests;
pub mod ui_tests;
