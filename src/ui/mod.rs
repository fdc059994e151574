pub mod adapter;
pub mod components;
pub mod interface;
pub mod theme;

pub use adapter::{GameController, GameView, UiEvent};
pub use components::Display;
pub use interface::{Command, GameInterface};
pub use theme::{Theme, ThemeManager};
