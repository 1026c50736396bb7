use std::process::ExitCode;

use crate::game::Game;

mod abs;
mod config;
mod frame;
mod game;
mod logging;
mod render;

fn main() -> ExitCode {
    if let Err(e) = logging::init(logging::default_level()) {
        eprintln!("Failed to set up logging: {e}");
    }

    let mut game = match Game::new(&config::DISPLAY) {
        Ok(game) => game,
        Err(e) => {
            log::error!("{e:#}");
            return ExitCode::FAILURE;
        }
    };

    game.run();
    game.shutdown();
    ExitCode::SUCCESS
}
