use serde::{Deserialize, Serialize};

use crate::core::{Board, Player};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    InProgress,
    Won(Player),
    Draw,
}

impl GameState {
    pub fn from_board(board: &Board) -> Self {
        match board.winner() {
            Some(player) => GameState::Won(player),
            None if board.is_full() => GameState::Draw,
            None => GameState::InProgress,
        }
    }

    pub fn is_terminal(self) -> bool {
        !matches!(self, GameState::InProgress)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveOutcome {
    Continue,
    Win(Player),
    Draw,
}

impl MoveOutcome {
    pub fn is_terminal(self) -> bool {
        !matches!(self, MoveOutcome::Continue)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    AwaitingMove,
    Terminal,
}
