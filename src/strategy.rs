use anyhow::{anyhow, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::board::Board;
use crate::engine::Engine;

/// Anything that can choose a column for the side to move.
///
/// The referee owns one `Strategy` per side; swapping an agent means building
/// a new value and handing it over.
pub trait Strategy {
    /// Return the strategy's display name.
    fn name(&self) -> &str;

    /// Choose a column to play on `board`.
    fn decide(&mut self, board: &Board) -> Result<usize>;
}

impl Strategy for Engine {
    fn name(&self) -> &str {
        "Alpha-beta"
    }

    fn decide(&mut self, board: &Board) -> Result<usize> {
        Ok(Engine::decide(self, board))
    }
}

/// A strategy that selects uniformly at random from the valid columns.
pub struct RandomStrategy {
    rng: StdRng,
}

impl RandomStrategy {
    pub fn new() -> Self {
        RandomStrategy {
            rng: StdRng::from_os_rng(),
        }
    }

    /// A reproducible strategy, for tests and benchmarks
    pub fn seeded(seed: u64) -> Self {
        RandomStrategy {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for RandomStrategy {
    fn name(&self) -> &str {
        "Random"
    }

    fn decide(&mut self, board: &Board) -> Result<usize> {
        let columns = board.valid_columns();
        if columns.is_empty() {
            return Err(anyhow!("no valid columns left to play"));
        }
        let idx = self.rng.random_range(0..columns.len());
        Ok(columns[idx])
    }
}
