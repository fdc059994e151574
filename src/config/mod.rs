use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use crate::core::{MAX_SIZE, MIN_SIZE};
use crate::utils::{GameError, GameResult};

// e.g. TICTACTOE_GAME__BOARD_SIZE=5
pub const ENV_PREFIX: &str = "TICTACTOE";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub game: GameConfig,
    pub ui: UiConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    // None prompts for a size at startup
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub board_size: Option<usize>,
    pub confirm_reset: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiConfig {
    pub theme: String,
    pub show_coordinates: bool,
    pub cell_width: usize,
    pub animation_speed: AnimationSpeed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub events_file: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AnimationSpeed {
    None,
    Slow,
    Medium,
    Fast,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            game: GameConfig {
                board_size: None,
                confirm_reset: true,
            },
            ui: UiConfig {
                theme: "default".to_string(),
                show_coordinates: true,
                cell_width: 3,
                animation_speed: AnimationSpeed::Medium,
            },
            logging: LoggingConfig {
                level: "warn".to_string(),
                events_file: None,
            },
        }
    }
}

impl Config {
    // Defaults, then the TOML file, then TICTACTOE_* environment variables.
    // Callers validate after applying CLI overrides.
    pub fn load(path: Option<&Path>) -> GameResult<Self> {
        Self::load_with_env_prefix(path, ENV_PREFIX)
    }

    fn load_with_env_prefix(path: Option<&Path>, env_prefix: &str) -> GameResult<Self> {
        let mut builder = config::Config::builder()
            .add_source(config::Config::try_from(&Self::default())?);

        if let Some(path) = path {
            if !path.exists() {
                Self::from_file(path)?;
            }
            builder = builder.add_source(
                config::File::from(path)
                    .format(config::FileFormat::Toml)
                    .required(false),
            );
        }

        let config = builder
            .add_source(
                config::Environment::with_prefix(env_prefix)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> GameResult<Self> {
        let path = path.as_ref();

        if !path.exists() {
            let default_config = Self::default();
            default_config.save_to_file(path)?;
            return Ok(default_config);
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| GameError::invalid_configuration(format!("Failed to read config file: {}", e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| GameError::invalid_configuration(format!("Failed to parse config file: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> GameResult<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| GameError::invalid_configuration(format!("Failed to create config directory: {}", e)))?;
        }

        let toml_content = toml::to_string_pretty(self)?;

        std::fs::write(path, toml_content)
            .map_err(|e| GameError::invalid_configuration(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    pub fn validate(&self) -> GameResult<()> {
        match self.logging.level.as_str() {
            "error" | "warn" | "info" | "debug" | "trace" => {}
            _ => return Err(GameError::invalid_configuration("Invalid logging level")),
        }

        if let Some(size) = self.game.board_size {
            if !(MIN_SIZE..=MAX_SIZE).contains(&size) {
                return Err(GameError::invalid_configuration(format!(
                    "Board size must be between {} and {}",
                    MIN_SIZE, MAX_SIZE
                )));
            }
        }

        if self.ui.theme.is_empty() {
            return Err(GameError::invalid_configuration("Theme name cannot be empty"));
        }
        if !(1..=5).contains(&self.ui.cell_width) {
            return Err(GameError::invalid_configuration("Cell width must be between 1 and 5"));
        }

        Ok(())
    }

    pub fn merge_with_cli(&mut self, cli_config: CliConfig) {
        if let Some(size) = cli_config.board_size {
            self.game.board_size = Some(size);
        }
        if let Some(log_level) = cli_config.log_level {
            self.logging.level = log_level;
        }
        if cli_config.debug {
            self.logging.level = "debug".to_string();
        }
        if let Some(theme) = cli_config.theme {
            self.ui.theme = theme;
        }
        if let Some(path) = cli_config.export_events {
            self.logging.events_file = Some(path);
        }
    }

    pub fn get_animation_delay_ms(&self) -> u64 {
        match self.ui.animation_speed {
            AnimationSpeed::None => 0,
            AnimationSpeed::Slow => 600,
            AnimationSpeed::Medium => 300,
            AnimationSpeed::Fast => 100,
        }
    }
}

// Configuration that can be overridden by CLI arguments
#[derive(Debug, Default)]
pub struct CliConfig {
    pub board_size: Option<usize>,
    pub log_level: Option<String>,
    pub debug: bool,
    pub theme: Option<String>,
    pub export_events: Option<PathBuf>,
}
