use std::path::PathBuf;

use crate::board::Player;

/// Errors from requesting a drop the board cannot take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("column {column} out of range, columns must be between 0 and {last}")]
    ColumnOutOfRange { column: usize, last: usize },

    #[error("column {0} is full")]
    ColumnFull(usize),
}

/// Errors that end a match early.
#[derive(Debug, thiserror::Error)]
pub enum MatchError {
    #[error("player {player} made an invalid move in column {column}: {source}")]
    InvalidMove {
        player: Player,
        column: usize,
        source: MoveError,
    },

    #[error("player {player} failed to choose a move: {cause:#}")]
    Strategy { player: Player, cause: anyhow::Error },
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", .path.display())]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("failed to write TOML: {0}")]
    TomlWrite(#[from] toml::ser::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}
