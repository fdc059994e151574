use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::Player;
use crate::utils::GameError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameEvent {
    pub id: Uuid,
    pub event_type: GameEventType,
    pub timestamp: DateTime<Utc>,
    pub data: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEventType {
    GameStarted,
    MoveApplied,
    MoveRejected,
    GameWon,
    GameDrawn,
    GameReset,
}

impl GameEvent {
    pub fn new(event_type: GameEventType, data: serde_json::Value) -> Self {
        Self {
            id: Uuid::new_v4(),
            event_type,
            timestamp: Utc::now(),
            data,
        }
    }

    pub fn game_started(size: usize) -> Self {
        let data = serde_json::json!({
            "size": size,
            "first_player": Player::FIRST
        });
        Self::new(GameEventType::GameStarted, data)
    }

    pub fn move_applied(player: Player, row: usize, col: usize) -> Self {
        let data = serde_json::json!({
            "player": player,
            "row": row,
            "col": col
        });
        Self::new(GameEventType::MoveApplied, data)
    }

    pub fn move_rejected(player: Player, row: usize, col: usize, error: &GameError) -> Self {
        let data = serde_json::json!({
            "player": player,
            "row": row,
            "col": col,
            "reason": error.to_string()
        });
        Self::new(GameEventType::MoveRejected, data)
    }

    pub fn game_won(player: Player, moves: usize) -> Self {
        let data = serde_json::json!({
            "winner": player,
            "moves": moves
        });
        Self::new(GameEventType::GameWon, data)
    }

    pub fn game_drawn(moves: usize) -> Self {
        let data = serde_json::json!({
            "moves": moves
        });
        Self::new(GameEventType::GameDrawn, data)
    }

    pub fn game_reset(size: usize) -> Self {
        let data = serde_json::json!({
            "size": size
        });
        Self::new(GameEventType::GameReset, data)
    }
}

pub trait GameEventHandler {
    fn handle_event(&mut self, event: &GameEvent);
}

// Bounded; the oldest entry is dropped once full
pub struct EventLogger {
    events: Vec<GameEvent>,
    max_events: usize,
}

impl EventLogger {
    pub fn new(max_events: usize) -> Self {
        Self {
            events: Vec::new(),
            max_events,
        }
    }

    pub fn get_events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn export_events(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.events)
    }
}

impl Default for EventLogger {
    fn default() -> Self {
        // enough for a full 10x10 round plus rejected clicks
        Self::new(1000)
    }
}

impl GameEventHandler for EventLogger {
    fn handle_event(&mut self, event: &GameEvent) {
        self.events.push(event.clone());

        if self.events.len() > self.max_events {
            self.events.remove(0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_event_creation() {
        let event = GameEvent::move_applied(Player::O, 2, 1);

        assert_eq!(event.event_type, GameEventType::MoveApplied);
        assert_eq!(event.data["player"], "O");
        assert_eq!(event.data["row"], 2);
        assert_eq!(event.data["col"], 1);
    }

    #[test]
    fn test_move_rejected_event_carries_reason() {
        let error = GameError::CellOccupied { row: 0, col: 0 };
        let event = GameEvent::move_rejected(Player::X, 0, 0, &error);

        assert_eq!(event.event_type, GameEventType::MoveRejected);
        assert_eq!(event.data["reason"], "Invalid move: cell (0, 0) is already taken");
    }

    #[test]
    fn test_event_logger() {
        let mut logger = EventLogger::new(3);

        logger.handle_event(&GameEvent::game_started(3));
        logger.handle_event(&GameEvent::move_applied(Player::X, 0, 0));
        logger.handle_event(&GameEvent::move_applied(Player::O, 1, 1));

        assert_eq!(logger.get_events().len(), 3);

        logger.handle_event(&GameEvent::move_applied(Player::X, 2, 2));

        assert_eq!(logger.get_events().len(), 3);
        assert_eq!(logger.get_events()[0].event_type, GameEventType::MoveApplied);
        assert_eq!(logger.get_events()[2].data["row"], 2);

        logger.clear();
        assert!(logger.get_events().is_empty());
    }

    #[test]
    fn test_export_events() {
        let mut logger = EventLogger::default();
        logger.handle_event(&GameEvent::game_drawn(9));

        let exported = logger.export_events().unwrap();
        let parsed: Vec<GameEvent> = serde_json::from_str(&exported).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].event_type, GameEventType::GameDrawn);
        assert_eq!(parsed[0].data["moves"], 9);
    }
}
