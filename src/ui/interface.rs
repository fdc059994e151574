use dialoguer::{Confirm, Input};
use std::time::Duration;

use crate::config::Config;
use crate::core::{GameEngine, MAX_SIZE, MIN_SIZE};
use crate::ui::{Display, GameController, ThemeManager, UiEvent};
use crate::utils::{GameError, GameResult};
use tracing::{error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    // zero-based, parsed from 1-based input
    Move { row: usize, col: usize },
    Reset,
    Help,
    Quit,
}

impl Command {
    pub fn parse(input: &str) -> Result<Self, String> {
        let input = input.trim();

        match input.to_lowercase().as_str() {
            "r" | "reset" => return Ok(Command::Reset),
            "h" | "help" | "?" => return Ok(Command::Help),
            "q" | "quit" | "exit" => return Ok(Command::Quit),
            _ => {}
        }

        let parts: Vec<&str> = input
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|part| !part.is_empty())
            .collect();

        let [row, col] = parts.as_slice() else {
            return Err("Enter a move as `row col`, or `h` for help".to_string());
        };

        let parse_coordinate = |text: &str| match text.parse::<usize>() {
            Ok(value) if value >= 1 => Ok(value - 1),
            _ => Err(format!("'{}' is not a valid coordinate", text)),
        };

        Ok(Command::Move {
            row: parse_coordinate(*row)?,
            col: parse_coordinate(*col)?,
        })
    }

    pub fn to_event(self) -> Option<UiEvent> {
        match self {
            Command::Move { row, col } => Some(UiEvent::CellActivated { row, col }),
            Command::Reset => Some(UiEvent::ResetRequested),
            Command::Help | Command::Quit => None,
        }
    }
}

pub fn validate_board_size(input: &String) -> Result<(), String> {
    match input.trim().parse::<usize>() {
        Ok(size) if (MIN_SIZE..=MAX_SIZE).contains(&size) => Ok(()),
        _ => Err(format!("Enter a whole number between {} and {}", MIN_SIZE, MAX_SIZE)),
    }
}

pub struct GameInterface {
    controller: GameController<Display>,
    config: Config,
}

impl GameInterface {
    pub fn new(config: Config) -> GameResult<Self> {
        info!("Initializing game interface");

        let mut display = Display::new(ThemeManager::new(), config.ui.cell_width, config.ui.show_coordinates)?;

        if !display.set_theme(&config.ui.theme) {
            warn!("Unknown theme '{}', using default", config.ui.theme);
        }

        let size = match config.game.board_size {
            Some(size) => size,
            None => Self::prompt_board_size()?,
        };
        let engine = GameEngine::new(size)?;

        Ok(Self {
            controller: GameController::new(engine, display),
            config,
        })
    }

    pub fn prompt_board_size() -> GameResult<usize> {
        let input: String = Input::new()
            .with_prompt(format!("Board size ({}-{})", MIN_SIZE, MAX_SIZE))
            .validate_with(validate_board_size)
            .interact_text()
            .map_err(|e| GameError::prompt(format!("Board size input error: {}", e)))?;

        input
            .trim()
            .parse()
            .map_err(|_| GameError::invalid_configuration(format!("Invalid board size: {}", input)))
    }

    pub fn run(&mut self) -> GameResult<()> {
        info!("Starting game loop on a {}x{} board", self.controller.engine().size(), self.controller.engine().size());
        self.controller.refresh()?;

        loop {
            if self.controller.is_finished() {
                self.export_events()?;
                std::thread::sleep(Duration::from_millis(self.config.get_animation_delay_ms()));
                if !self.confirm("Play again?", true)? {
                    break;
                }
                self.controller.handle(UiEvent::ResetRequested)?;
                continue;
            }

            let input: String = Input::new()
                .with_prompt(format!("Player {}", self.controller.engine().current_player()))
                .interact_text()
                .map_err(|e| GameError::prompt(format!("Move input error: {}", e)))?;

            let command = match Command::parse(&input) {
                Ok(command) => command,
                Err(message) => {
                    self.controller.view().show_error(&message)?;
                    continue;
                }
            };

            match command {
                Command::Quit => {
                    if self.confirm("Quit the current game?", false)? {
                        self.export_events()?;
                        break;
                    }
                }
                Command::Help => self.show_help()?,
                Command::Reset => {
                    if !self.config.game.confirm_reset || self.confirm("Reset the board?", false)? {
                        self.dispatch(command)?;
                    }
                }
                Command::Move { .. } => self.dispatch(command)?,
            }
        }

        self.controller.view().show_info("Thanks for playing!")?;
        Ok(())
    }

    fn dispatch(&mut self, command: Command) -> GameResult<()> {
        let Some(event) = command.to_event() else {
            return Ok(());
        };

        if let Err(e) = self.controller.handle(event) {
            error!("Failed to handle {:?}: {}", event, e);
            return Err(e);
        }
        Ok(())
    }

    // The file always holds the most recent round; reset clears the log
    fn export_events(&self) -> GameResult<()> {
        let Some(path) = &self.config.logging.events_file else {
            return Ok(());
        };

        let engine = self.controller.engine();
        engine.save_events(path)?;
        info!("Exported {} events to {}", engine.event_history().len(), path.display());
        Ok(())
    }

    fn show_help(&self) -> GameResult<()> {
        let size = self.controller.engine().size();
        let display = self.controller.view();

        display.show_info(&format!("Enter `row col` (1-{}) to place your mark, e.g. `1 {}`.", size, size))?;
        display.show_info("`r` resets the board, `q` quits.")?;
        display.show_info(&format!("Complete a row, column, or diagonal of {} to win.", size))?;
        Ok(())
    }

    fn confirm(&self, prompt: &str, default: bool) -> GameResult<bool> {
        Confirm::new()
            .with_prompt(prompt)
            .default(default)
            .interact()
            .map_err(|e| GameError::prompt(format!("Confirmation error: {}", e)))
    }
}
