use std::path::Path;

use crate::core::{
    Board, EventLogger, GameEvent, GameEventHandler, GameState, MoveOutcome, Phase, Player,
    WinningLine,
};
use crate::utils::{GameError, GameResult};
use tracing::{debug, info, warn};

pub struct GameEngine {
    board: Board,
    current_player: Player,
    outcome: Option<MoveOutcome>,
    event_log: EventLogger,
}

impl GameEngine {
    pub fn new(size: usize) -> GameResult<Self> {
        let board = Board::new(size)?;
        info!("Starting new {}x{} game", size, size);

        let mut engine = Self {
            board,
            current_player: Player::FIRST,
            outcome: None,
            event_log: EventLogger::default(),
        };
        engine.emit_event(GameEvent::game_started(size));

        Ok(engine)
    }

    // Rejected moves leave the board and turn untouched
    pub fn apply_move(&mut self, row: usize, col: usize) -> GameResult<MoveOutcome> {
        let player = self.current_player;

        if let Err(e) = self.try_place(row, col) {
            warn!("Rejected move by {} at ({}, {}): {}", player, row, col, e);
            self.emit_event(GameEvent::move_rejected(player, row, col, &e));
            return Err(e);
        }

        debug!("Player {} marked ({}, {})", player, row, col);
        self.emit_event(GameEvent::move_applied(player, row, col));

        let outcome = if let Some(winner) = self.evaluate_winner() {
            MoveOutcome::Win(winner)
        } else if self.board.is_full() {
            MoveOutcome::Draw
        } else {
            MoveOutcome::Continue
        };

        match outcome {
            MoveOutcome::Continue => {
                self.current_player = player.other();
            }
            MoveOutcome::Win(winner) => {
                info!("Player {} wins after {} moves", winner, self.move_count());
                self.emit_event(GameEvent::game_won(winner, self.move_count()));
            }
            MoveOutcome::Draw => {
                info!("Game drawn after {} moves", self.move_count());
                self.emit_event(GameEvent::game_drawn(self.move_count()));
            }
        }

        if outcome.is_terminal() {
            self.outcome = Some(outcome);
        }

        Ok(outcome)
    }

    fn try_place(&mut self, row: usize, col: usize) -> GameResult<()> {
        if self.is_terminal() {
            return Err(GameError::GameOver);
        }
        self.board.place(row, col, self.current_player)
    }

    pub fn evaluate_winner(&self) -> Option<Player> {
        self.board.winner()
    }

    pub fn is_draw(&self) -> bool {
        self.board.is_full() && self.evaluate_winner().is_none()
    }

    pub fn reset(&mut self) {
        self.board.clear();
        self.current_player = Player::FIRST;
        self.outcome = None;

        self.event_log.clear();
        self.emit_event(GameEvent::game_reset(self.board.size()));
        info!("Game reset");
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn size(&self) -> usize {
        self.board.size()
    }

    pub fn state(&self) -> GameState {
        GameState::from_board(&self.board)
    }

    pub fn phase(&self) -> Phase {
        if self.outcome.is_some() {
            Phase::Terminal
        } else {
            Phase::AwaitingMove
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.phase() == Phase::Terminal
    }

    pub fn outcome(&self) -> Option<MoveOutcome> {
        self.outcome
    }

    pub fn winning_line(&self) -> Option<WinningLine> {
        self.board.winning_line()
    }

    pub fn move_count(&self) -> usize {
        self.board.filled_count()
    }

    fn emit_event(&mut self, event: GameEvent) {
        self.event_log.handle_event(&event);
    }

    pub fn event_history(&self) -> &[GameEvent] {
        self.event_log.get_events()
    }

    pub fn export_events(&self) -> GameResult<String> {
        Ok(self.event_log.export_events()?)
    }

    pub fn save_events<P: AsRef<Path>>(&self, path: P) -> GameResult<()> {
        std::fs::write(path, self.export_events()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::board::{Cell, LineKind, MAX_SIZE, MIN_SIZE};
    use crate::core::GameEventType;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    // every move but the last must continue
    fn play(engine: &mut GameEngine, moves: &[(usize, usize)]) -> MoveOutcome {
        let (last, rest) = moves.split_last().unwrap();
        for &(row, col) in rest {
            assert_eq!(engine.apply_move(row, col).unwrap(), MoveOutcome::Continue);
        }
        engine.apply_move(last.0, last.1).unwrap()
    }

    fn interleave(x_moves: &[(usize, usize)], o_moves: &[(usize, usize)]) -> Vec<(usize, usize)> {
        let mut moves = Vec::with_capacity(x_moves.len() + o_moves.len());
        for (i, &x) in x_moves.iter().enumerate() {
            moves.push(x);
            if let Some(&o) = o_moves.get(i) {
                moves.push(o);
            }
        }
        moves
    }

    // Pairs of columns alternate marks and each row flips the one above,
    // leaving no complete line for any size
    fn draw_pattern(size: usize) -> Vec<(usize, usize)> {
        let mut x_moves = Vec::new();
        let mut o_moves = Vec::new();
        for row in 0..size {
            for col in 0..size {
                if (col / 2 + row) % 2 == 0 {
                    x_moves.push((row, col));
                } else {
                    o_moves.push((row, col));
                }
            }
        }
        interleave(&x_moves, &o_moves)
    }

    #[test]
    fn test_fresh_engine_for_every_size() {
        for size in MIN_SIZE..=MAX_SIZE {
            let engine = GameEngine::new(size).unwrap();
            assert_eq!(engine.size(), size);
            assert_eq!(engine.board().cells().len(), size * size);
            assert!(engine.board().cells().iter().all(|cell| cell.is_empty()));
            assert_eq!(engine.current_player(), Player::X);
            assert_eq!(engine.phase(), Phase::AwaitingMove);
            assert_eq!(engine.state(), GameState::InProgress);
            assert_eq!(engine.outcome(), None);
        }
    }

    #[test]
    fn test_invalid_board_size() {
        assert!(matches!(GameEngine::new(2), Err(GameError::InvalidConfiguration { .. })));
        assert!(matches!(GameEngine::new(11), Err(GameError::InvalidConfiguration { .. })));
    }

    #[test]
    fn test_turn_alternation() {
        let mut engine = GameEngine::new(4).unwrap();
        let moves = [(0, 0), (3, 3), (1, 2), (2, 0), (0, 3)];

        for (i, &(row, col)) in moves.iter().enumerate() {
            let before = engine.current_player();
            assert_eq!(engine.apply_move(row, col).unwrap(), MoveOutcome::Continue);
            assert_eq!(engine.current_player(), before.other());
            assert_eq!(engine.board().get(row, col), Some(before.to_cell()));
            assert_eq!(engine.move_count(), i + 1);
        }
    }

    #[test]
    fn test_occupied_cell_is_rejected_without_mutation() {
        let mut engine = GameEngine::new(3).unwrap();
        engine.apply_move(1, 1).unwrap();

        let board_before = engine.board().clone();
        let player_before = engine.current_player();

        for _ in 0..3 {
            let result = engine.apply_move(1, 1);
            assert!(matches!(result, Err(GameError::CellOccupied { row: 1, col: 1 })));
            assert!(result.unwrap_err().is_invalid_move());
        }

        assert_eq!(engine.board(), &board_before);
        assert_eq!(engine.current_player(), player_before);
        assert_eq!(engine.move_count(), 1);
        assert_eq!(engine.phase(), Phase::AwaitingMove);
    }

    #[test]
    fn test_out_of_bounds_is_rejected() {
        let mut engine = GameEngine::new(3).unwrap();
        let result = engine.apply_move(3, 0);
        assert!(matches!(result, Err(GameError::OutOfBounds { row: 3, col: 0, size: 3 })));
        assert_eq!(engine.move_count(), 0);
        assert_eq!(engine.current_player(), Player::X);
    }

    #[test]
    fn test_diagonal_win_scenario() {
        let mut engine = GameEngine::new(3).unwrap();
        let outcome = play(&mut engine, &[(0, 0), (0, 1), (1, 1), (0, 2), (2, 2)]);

        assert_eq!(outcome, MoveOutcome::Win(Player::X));
        assert_eq!(engine.evaluate_winner(), Some(Player::X));
        assert_eq!(engine.phase(), Phase::Terminal);
        assert_eq!(engine.state(), GameState::Won(Player::X));
        assert_eq!(engine.winning_line().unwrap().kind, LineKind::MainDiagonal);
        assert!(!engine.is_draw());
    }

    #[test]
    fn test_draw_scenario() {
        let mut engine = GameEngine::new(3).unwrap();
        let outcome = play(
            &mut engine,
            &[(0, 0), (0, 1), (0, 2), (1, 1), (1, 0), (1, 2), (2, 1), (2, 0), (2, 2)],
        );

        assert_eq!(outcome, MoveOutcome::Draw);
        assert_eq!(engine.evaluate_winner(), None);
        assert!(engine.is_draw());
        assert_eq!(engine.state(), GameState::Draw);
        assert!(engine.is_terminal());
        assert_eq!(engine.board().get(1, 0), Some(Cell::X));
        assert_eq!(engine.board().get(2, 0), Some(Cell::O));
    }

    #[test]
    fn test_last_move_filling_board_with_a_line_is_a_win() {
        // X O X / O X O / O X X, final X completes the main diagonal
        let mut engine = GameEngine::new(3).unwrap();
        let outcome = play(
            &mut engine,
            &[(0, 0), (0, 1), (0, 2), (1, 0), (1, 1), (1, 2), (2, 1), (2, 0), (2, 2)],
        );

        assert!(engine.board().is_full());
        assert_eq!(outcome, MoveOutcome::Win(Player::X));
        assert!(!engine.is_draw());
        assert_eq!(engine.state(), GameState::Won(Player::X));
        assert_eq!(engine.outcome(), Some(MoveOutcome::Win(Player::X)));
    }

    #[test]
    fn test_column_win_by_o() {
        let mut engine = GameEngine::new(3).unwrap();
        let outcome = play(&mut engine, &[(0, 1), (0, 0), (1, 1), (1, 0), (0, 2), (2, 0)]);

        assert_eq!(outcome, MoveOutcome::Win(Player::O));
        assert_eq!(engine.winning_line().unwrap().kind, LineKind::Column(0));
        // the winner stays current; the turn only passes on Continue
        assert_eq!(engine.current_player(), Player::O);
    }

    #[test]
    fn test_row_win_for_every_size() {
        for size in MIN_SIZE..=MAX_SIZE {
            let mut engine = GameEngine::new(size).unwrap();
            let x_moves: Vec<_> = (0..size).map(|col| (0, col)).collect();
            let o_moves: Vec<_> = (0..size - 1).map(|col| (1, col)).collect();

            let outcome = play(&mut engine, &interleave(&x_moves, &o_moves));
            assert_eq!(outcome, MoveOutcome::Win(Player::X), "size {}", size);
            assert_eq!(engine.winning_line().unwrap().kind, LineKind::Row(0));
        }
    }

    #[test]
    fn test_column_win_for_every_size() {
        for size in MIN_SIZE..=MAX_SIZE {
            let mut engine = GameEngine::new(size).unwrap();
            let x_moves: Vec<_> = (0..size).map(|row| (row, size - 1)).collect();
            let o_moves: Vec<_> = (0..size - 1).map(|row| (row, 0)).collect();

            let outcome = play(&mut engine, &interleave(&x_moves, &o_moves));
            assert_eq!(outcome, MoveOutcome::Win(Player::X), "size {}", size);
            assert_eq!(engine.winning_line().unwrap().kind, LineKind::Column(size - 1));
        }
    }

    #[test]
    fn test_diagonal_wins_for_every_size() {
        for size in MIN_SIZE..=MAX_SIZE {
            let mut engine = GameEngine::new(size).unwrap();
            let x_moves: Vec<_> = (0..size).map(|i| (i, i)).collect();
            let o_moves: Vec<_> = (0..size - 1).map(|i| (i, (i + 1) % size)).collect();
            let outcome = play(&mut engine, &interleave(&x_moves, &o_moves));
            assert_eq!(outcome, MoveOutcome::Win(Player::X), "size {}", size);
            assert_eq!(engine.winning_line().unwrap().kind, LineKind::MainDiagonal);

            let mut engine = GameEngine::new(size).unwrap();
            let x_moves: Vec<_> = (0..size).map(|i| (i, size - 1 - i)).collect();
            let o_moves: Vec<_> = (0..size - 1).map(|i| (i, (size - i) % size)).collect();
            let outcome = play(&mut engine, &interleave(&x_moves, &o_moves));
            assert_eq!(outcome, MoveOutcome::Win(Player::X), "size {}", size);
            assert_eq!(engine.winning_line().unwrap().kind, LineKind::AntiDiagonal);
        }
    }

    #[test]
    fn test_draw_for_every_size() {
        for size in MIN_SIZE..=MAX_SIZE {
            let mut engine = GameEngine::new(size).unwrap();
            let outcome = play(&mut engine, &draw_pattern(size));

            assert_eq!(outcome, MoveOutcome::Draw, "size {}", size);
            assert!(engine.board().is_full());
            assert!(engine.is_draw());
            assert_eq!(engine.move_count(), size * size);
        }
    }

    #[test]
    fn test_moves_after_terminal_are_rejected() {
        let mut engine = GameEngine::new(3).unwrap();
        play(&mut engine, &[(0, 0), (0, 1), (1, 1), (0, 2), (2, 2)]);

        let board_before = engine.board().clone();
        let result = engine.apply_move(2, 0);
        assert!(matches!(result, Err(GameError::GameOver)));
        assert_eq!(engine.board(), &board_before);
        assert_eq!(engine.outcome(), Some(MoveOutcome::Win(Player::X)));
    }

    #[test]
    fn test_reset_from_terminal() {
        let mut engine = GameEngine::new(3).unwrap();
        play(&mut engine, &[(0, 0), (0, 1), (1, 1), (0, 2), (2, 2)]);
        assert!(engine.is_terminal());

        engine.reset();

        let fresh = GameEngine::new(3).unwrap();
        assert_eq!(engine.board(), fresh.board());
        assert_eq!(engine.current_player(), Player::X);
        assert_eq!(engine.phase(), Phase::AwaitingMove);
        assert_eq!(engine.outcome(), None);
        assert_eq!(engine.apply_move(0, 0).unwrap(), MoveOutcome::Continue);
    }

    #[test]
    fn test_reset_mid_game_keeps_size() {
        let mut engine = GameEngine::new(7).unwrap();
        engine.apply_move(3, 3).unwrap();
        engine.reset();

        assert_eq!(engine.size(), 7);
        assert_eq!(engine.move_count(), 0);
        assert_eq!(engine.current_player(), Player::X);
    }

    #[test]
    fn test_event_history() {
        let mut engine = GameEngine::new(3).unwrap();
        engine.apply_move(0, 0).unwrap();
        let _ = engine.apply_move(0, 0);

        let types: Vec<_> = engine
            .event_history()
            .iter()
            .map(|event| event.event_type.clone())
            .collect();
        assert_eq!(
            types,
            vec![
                GameEventType::GameStarted,
                GameEventType::MoveApplied,
                GameEventType::MoveRejected,
            ]
        );

        engine.reset();
        assert_eq!(engine.event_history().len(), 1);
        assert_eq!(engine.event_history()[0].event_type, GameEventType::GameReset);
        assert!(engine.export_events().unwrap().contains("GameReset"));
    }

    #[test]
    fn test_save_events_writes_round_as_json() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("events.json");

        let mut engine = GameEngine::new(3).unwrap();
        play(&mut engine, &[(0, 0), (0, 1), (1, 1), (0, 2), (2, 2)]);
        engine.save_events(&path).unwrap();

        let saved: Vec<GameEvent> =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(saved.len(), engine.event_history().len());
        assert_eq!(saved.last().unwrap().event_type, GameEventType::GameWon);
        assert_eq!(saved.last().unwrap().data["winner"], "X");
    }
}
