use log::warn;
use serde::{Deserialize, Serialize};

use std::path::Path;
use std::time::Duration;

use crate::board::{Board, Player};
use crate::error::ConfigError;
use crate::{COLS, IN_A_ROW, ROWS};

/// Shape of the game board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub rows: usize,
    pub columns: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        BoardConfig {
            rows: ROWS,
            columns: COLS,
        }
    }
}

impl BoardConfig {
    pub fn empty_board(&self) -> anyhow::Result<Board> {
        Board::with_size(self.rows, self.columns)
    }
}

/// Resource limits of one engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Wall-clock budget of a single decision
    pub time_budget_ms: u64,
    /// Deepest iteration the search will attempt
    pub max_depth: usize,
    /// Share of the budget after which no new iteration is started
    pub deepen_fraction: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            time_budget_ms: 9960,
            max_depth: 6,
            deepen_fraction: 0.4,
        }
    }
}

impl EngineConfig {
    pub fn time_budget(&self) -> Duration {
        Duration::from_millis(self.time_budget_ms)
    }

    pub fn with_time_budget(mut self, budget: Duration) -> Self {
        self.time_budget_ms = budget.as_millis() as u64;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_depth == 0 {
            return Err(ConfigError::Validation(
                "engine.max_depth must be >= 1".into(),
            ));
        }
        if !(self.deepen_fraction > 0.0 && self.deepen_fraction <= 1.0) {
            return Err(ConfigError::Validation(
                "engine.deepen_fraction must be in (0, 1]".into(),
            ));
        }
        Ok(())
    }
}

/// Settings of the match referee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// The side that makes the first move
    pub first: Player,
    /// Pause after each move, to make engine-only games watchable
    pub turn_delay_ms: u64,
}

impl Default for MatchConfig {
    fn default() -> Self {
        MatchConfig {
            first: Player::B,
            turn_delay_ms: 0,
        }
    }
}

impl MatchConfig {
    pub fn turn_delay(&self) -> Duration {
        Duration::from_millis(self.turn_delay_ms)
    }
}

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub board: BoardConfig,
    pub engine: EngineConfig,
    #[serde(rename = "match")]
    pub referee: MatchConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            warn!("config file '{}' not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board.rows < IN_A_ROW {
            return Err(ConfigError::Validation(format!(
                "board.rows must be >= {}",
                IN_A_ROW
            )));
        }
        if self.board.columns < IN_A_ROW {
            return Err(ConfigError::Validation(format!(
                "board.columns must be >= {}",
                IN_A_ROW
            )));
        }
        if self.engine.time_budget_ms == 0 {
            return Err(ConfigError::Validation(
                "engine.time_budget_ms must be > 0".into(),
            ));
        }
        self.engine.validate()
    }

    /// Generate a TOML string with all default values.
    pub fn default_toml() -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(&AppConfig::default())?)
    }
}
