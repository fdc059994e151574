use std::io;

use crate::core::{Board, GameEngine, GameState, MoveOutcome, Player, WinningLine};
use crate::utils::{GameError, GameResult};
use tracing::debug;

pub const DRAW_MESSAGE: &str = "It's a tie!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEvent {
    CellActivated { row: usize, col: usize },
    ResetRequested,
}

pub trait GameView {
    fn render_board(&mut self, board: &Board, winning_line: Option<&WinningLine>) -> io::Result<()>;
    fn show_status(&mut self, message: &str) -> io::Result<()>;
    fn announce(&mut self, message: &str) -> io::Result<()>;
    fn warn(&mut self, message: &str) -> io::Result<()>;
}

pub fn turn_message(player: Player) -> String {
    format!("Player {}'s turn", player)
}

pub fn win_message(player: Player) -> String {
    format!("Player {} wins!", player)
}

pub fn status_message(state: GameState, current_player: Player) -> String {
    match state {
        GameState::InProgress => turn_message(current_player),
        GameState::Won(player) => win_message(player),
        GameState::Draw => DRAW_MESSAGE.to_string(),
    }
}

// None for errors that are not rejected moves
pub fn invalid_move_message(error: &GameError) -> Option<&'static str> {
    match error {
        GameError::CellOccupied { .. } => Some("This spot is already taken."),
        GameError::GameOver => Some("The game is over. Reset to play again."),
        GameError::OutOfBounds { .. } => Some("That cell is off the board."),
        _ => None,
    }
}

pub struct GameController<V: GameView> {
    engine: GameEngine,
    view: V,
}

impl<V: GameView> GameController<V> {
    pub fn new(engine: GameEngine, view: V) -> Self {
        Self { engine, view }
    }

    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn is_finished(&self) -> bool {
        self.engine.is_terminal()
    }

    pub fn refresh(&mut self) -> GameResult<()> {
        let winning_line = self.engine.winning_line();
        self.view.render_board(self.engine.board(), winning_line.as_ref())?;

        let state = self.engine.state();
        let message = status_message(state, self.engine.current_player());
        if state.is_terminal() {
            self.view.announce(&message)?;
        } else {
            self.view.show_status(&message)?;
        }
        Ok(())
    }

    // Rejected moves are shown as warnings and yield Ok(None)
    pub fn handle(&mut self, event: UiEvent) -> GameResult<Option<MoveOutcome>> {
        debug!("Handling {:?}", event);

        match event {
            UiEvent::CellActivated { row, col } => match self.engine.apply_move(row, col) {
                Ok(outcome) => {
                    self.refresh()?;
                    Ok(Some(outcome))
                }
                Err(e) => match invalid_move_message(&e) {
                    Some(message) => {
                        self.view.warn(message)?;
                        Ok(None)
                    }
                    None => Err(e),
                },
            },
            UiEvent::ResetRequested => {
                self.engine.reset();
                self.refresh()?;
                Ok(None)
            }
        }
    }
}
