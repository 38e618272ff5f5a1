//! A time-bounded agent for the gravity-drop game 'four in a row' on a wide board
//!
//! This agent uses an iterative-deepening alpha-beta search with a
//! window-based heuristic to pick a column within a fixed wall-clock budget.
//! It is a bounded-resource searcher: deeper positions are judged by the
//! heuristic rather than solved.
//!
//! # Basic Usage
//!
//! ```
//! use drop4_ai::{Board, Engine, EngineConfig, Player};
//!
//!# use std::error::Error;
//!# fn main() -> Result<(), Box<dyn Error>> {
//! let engine = Engine::new(EngineConfig::default().with_max_depth(1), Player::A);
//! let column = engine.decide(&Board::new());
//!
//! // the center column carries a bonus
//! assert_eq!(column, 6);
//!# Ok(())
//!# }
//! ```

use static_assertions::*;
pub use anyhow;

pub mod board;

pub mod evaluation;

pub mod engine;

pub mod strategy;

pub mod referee;

pub mod config;

pub mod error;


pub use board::{Board, Cell, Outcome, Player};
pub use config::{AppConfig, BoardConfig, EngineConfig, MatchConfig};
pub use engine::{Engine, SearchReport};
pub use error::{ConfigError, MatchError, MoveError};
pub use referee::{MatchReport, Referee, Turn};
pub use strategy::{RandomStrategy, Strategy};

/// The default number of rows on the game board
pub const ROWS: usize = 6;

/// The default number of columns on the game board
pub const COLS: usize = 12;

/// The number of aligned tiles needed to win
pub const IN_A_ROW: usize = 4;

// every line family needs room for at least one full window
const_assert!(ROWS >= IN_A_ROW);
const_assert!(COLS >= IN_A_ROW);
