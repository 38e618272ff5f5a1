//! Runs a match between two strategies

use log::info;

use std::thread;
use std::time::{Duration, Instant};

use crate::board::{Board, Outcome, Player};
use crate::error::MatchError;
use crate::strategy::Strategy;

/// A move that has been played
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Turn {
    /// Counts from 1
    pub number: usize,
    pub player: Player,
    pub column: usize,
    /// Time the strategy took to decide
    pub elapsed: Duration,
}

/// The end of a match
#[derive(Clone, Debug)]
pub struct MatchReport {
    pub outcome: Outcome,
    pub turns: usize,
    pub board: Board,
}

/// Alternates two strategies on one board until the game is over
///
/// Every column a strategy returns is checked against the board; an illegal
/// column ends the match with [`MatchError::InvalidMove`].
pub struct Referee {
    board: Board,
    to_move: Player,
    player_a: Box<dyn Strategy>,
    player_b: Box<dyn Strategy>,
    turn_delay: Duration,
}

impl Referee {
    pub fn new(
        board: Board,
        first: Player,
        player_a: Box<dyn Strategy>,
        player_b: Box<dyn Strategy>,
    ) -> Self {
        Self {
            board,
            to_move: first,
            player_a,
            player_b,
            turn_delay: Duration::ZERO,
        }
    }

    /// Pause after every move that does not end the game
    pub fn with_turn_delay(mut self, turn_delay: Duration) -> Self {
        self.turn_delay = turn_delay;
        self
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn to_move(&self) -> Player {
        self.to_move
    }

    /// Plays the match out, calling `observer` with the board after each move
    pub fn play<F>(mut self, mut observer: F) -> Result<MatchReport, MatchError>
    where
        F: FnMut(&Board, &Turn),
    {
        let mut turns = 0;

        while !self.board.is_terminal() {
            let player = self.to_move;
            let strategy = match player {
                Player::A => &mut self.player_a,
                Player::B => &mut self.player_b,
            };

            let start = Instant::now();
            let column = strategy
                .decide(&self.board)
                .map_err(|cause| MatchError::Strategy { player, cause })?;
            let elapsed = start.elapsed();

            self.board = self
                .board
                .apply_move(column, player)
                .map_err(|source| MatchError::InvalidMove {
                    player,
                    column,
                    source,
                })?;
            turns += 1;

            info!(
                "turn {}: {} ({}) plays column {} in {:.2}s",
                turns,
                player,
                strategy.name(),
                column,
                elapsed.as_secs_f64()
            );
            let turn = Turn {
                number: turns,
                player,
                column,
                elapsed,
            };
            observer(&self.board, &turn);

            self.to_move = player.other();
            if !self.turn_delay.is_zero() && !self.board.is_terminal() {
                thread::sleep(self.turn_delay);
            }
        }

        let outcome = self.board.outcome();
        info!("match over after {} turns: {:?}", turns, outcome);
        Ok(MatchReport {
            outcome,
            turns,
            board: self.board,
        })
    }
}
