pub mod board;
pub mod engine;
pub mod events;
pub mod game_state;
pub mod player;

pub use board::{Board, Cell, LineKind, WinningLine, MAX_SIZE, MIN_SIZE};
pub use engine::GameEngine;
pub use events::{EventLogger, GameEvent, GameEventHandler, GameEventType};
pub use game_state::{GameState, MoveOutcome, Phase};
pub use player::Player;
