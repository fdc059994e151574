pub mod config;
pub mod core;
pub mod ui;
pub mod utils;

pub use self::config::Config;
pub use self::core::{Board, Cell, GameEngine, GameState, MoveOutcome, Phase, Player};
pub use self::ui::{GameController, GameInterface, GameView, UiEvent};
pub use self::utils::{GameError, GameResult};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
