//! An agent to choose moves under a time limit

use log::{debug, info, warn};
use static_assertions::assert_impl_all;

use std::time::{Duration, Instant};

use crate::{
    board::{Board, Player},
    config::EngineConfig,
    evaluation::utility,
};

/// Raised when a search node is entered after the time budget ran out
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Cancelled;

/// Wall-clock limit of one decision
#[derive(Copy, Clone, Debug)]
struct Deadline {
    start: Instant,
    budget: Duration,
}

impl Deadline {
    fn start(budget: Duration) -> Self {
        Self {
            start: Instant::now(),
            budget,
        }
    }

    fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    fn check(&self) -> Result<(), Cancelled> {
        if self.elapsed() >= self.budget {
            Err(Cancelled)
        } else {
            Ok(())
        }
    }

    /// Whether more than `fraction` of the budget has been used
    fn past(&self, fraction: f64) -> bool {
        self.elapsed().as_secs_f64() > self.budget.as_secs_f64() * fraction
    }
}

/// The result of one decision, with diagnostics
#[derive(Clone, Debug, PartialEq)]
pub struct SearchReport {
    /// The chosen column, 0 if no iteration completed
    pub column: usize,
    /// The deepest iteration that completed, 0 if none did
    pub depth: usize,
    /// The value of the chosen column at that depth
    pub score: Option<i32>,
    /// The number of nodes searched over all iterations (for diagnostics only)
    pub nodes: usize,
    pub elapsed: Duration,
}

/// A time-bounded alpha-beta agent
///
/// # Notes
/// The engine always plays for its `perspective`: that player is the maximizer
/// at the root and on every even ply, its opponent minimizes on odd plies.
/// Each decision re-runs the search with depth limits 1, 2, ... up to
/// `max_depth`, keeping the answer of the deepest iteration that finished
/// before the deadline.
///
/// # Move Scoring
/// Leaves are scored by [`utility`]: `1000 - ply` for a win, `-1000 + ply` for
/// a loss, 0 for a draw and the window heuristic otherwise. Among columns of
/// equal value the lowest index is chosen.
#[derive(Clone, Debug)]
pub struct Engine {
    config: EngineConfig,
    perspective: Player,
}

// independent searches may run on different threads
assert_impl_all!(Engine: Send, Sync);

impl Engine {
    /// Creates a new `Engine` playing for `perspective`
    pub fn new(config: EngineConfig, perspective: Player) -> Self {
        Self {
            config,
            perspective,
        }
    }

    pub fn perspective(&self) -> Player {
        self.perspective
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Picks a column for the engine's player
    ///
    /// The board should not be terminal. The result is one of
    /// `board.valid_columns()` unless no iteration completes in time, in which
    /// case it is column 0.
    pub fn decide(&self, board: &Board) -> usize {
        self.search(board).column
    }

    /// Performs the iterative deepening search, returning the chosen column and diagnostics
    pub fn search(&self, board: &Board) -> SearchReport {
        let deadline = Deadline::start(self.config.time_budget());
        let mut report = SearchReport {
            column: 0,
            depth: 0,
            score: None,
            nodes: 0,
            elapsed: Duration::ZERO,
        };

        for depth_limit in 1..=self.config.max_depth {
            // only start a new iteration while there is plenty of budget left
            if deadline.past(self.config.deepen_fraction) {
                debug!("not starting depth {}: {:?} elapsed", depth_limit, deadline.elapsed());
                break;
            }

            let mut search = Search {
                perspective: self.perspective,
                depth_limit,
                deadline: &deadline,
                node_count: 0,
            };
            let result = search.alpha_beta(board, i32::MIN, i32::MAX, 0);
            report.nodes += search.node_count;

            match result {
                Ok((score, best_column)) => {
                    if let Some(column) = best_column {
                        report.column = column;
                    }
                    report.depth = depth_limit;
                    report.score = Some(score);
                    debug!(
                        "depth {} complete: column {}, score {}, {} nodes",
                        depth_limit, report.column, score, search.node_count
                    );
                }
                Err(Cancelled) => {
                    debug!(
                        "depth {} aborted after {} nodes, out of time",
                        depth_limit, search.node_count
                    );
                    break;
                }
            }
        }

        report.elapsed = deadline.elapsed();
        if report.depth == 0 {
            warn!(
                "no search depth completed within {:?}, defaulting to column {}",
                self.config.time_budget(),
                report.column
            );
        } else {
            info!(
                "player {} chooses column {} (depth {}, score {:?}, {} nodes, {:.2}s)",
                self.perspective,
                report.column,
                report.depth,
                report.score,
                report.nodes,
                report.elapsed.as_secs_f64()
            );
        }
        report
    }
}

/// State of a single fixed-depth iteration
struct Search<'a> {
    perspective: Player,
    depth_limit: usize,
    deadline: &'a Deadline,
    node_count: usize,
}

impl Search<'_> {
    /// Performs game tree search
    ///
    /// Returns the value of the position and, unless it is a leaf, the
    /// column that reaches that value. `depth` is the ply below the root;
    /// even plies maximize for `perspective`.
    fn alpha_beta(
        &mut self,
        board: &Board,
        mut alpha: i32,
        mut beta: i32,
        depth: usize,
    ) -> Result<(i32, Option<usize>), Cancelled> {
        self.deadline.check()?;
        self.node_count += 1;

        if depth == self.depth_limit || board.is_terminal() {
            return Ok((utility(board, self.perspective, depth), None));
        }

        let maximizing = depth % 2 == 0;
        let mover = if maximizing {
            self.perspective
        } else {
            self.perspective.other()
        };

        let mut best = if maximizing { i32::MIN } else { i32::MAX };
        let mut best_column = None;

        // ascending column order, so ties keep the lowest column
        for column in board.valid_columns() {
            let next = board.apply_move(column, mover);
            debug_assert!(next.is_ok(), "valid column {} was rejected", column);
            let next = match next {
                Ok(next) => next,
                Err(_) => continue,
            };
            let (score, _) = self.alpha_beta(&next, alpha, beta, depth + 1)?;

            if maximizing {
                if score > best {
                    best = score;
                    best_column = Some(column);
                }
                // the minimizer above will never allow this branch
                if best >= beta {
                    return Ok((best, best_column));
                }
                alpha = alpha.max(best);
            } else {
                if score < best {
                    best = score;
                    best_column = Some(column);
                }
                if best <= alpha {
                    return Ok((best, best_column));
                }
                beta = beta.min(best);
            }
        }

        Ok((best, best_column))
    }
}
