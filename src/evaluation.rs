//! Static scoring of positions
//!
//! Scores are always from the point of view of one player, the maximizer.
//! Positive values favour that player.

use crate::board::{Board, Player};

/// The value of a completed line, and the base of terminal utilities
pub const WIN_SCORE: i32 = 1000;

/// Bonus for each of the maximizer's pieces in the center column
pub const CENTER_BONUS: i32 = 3;

/// Scores a single window from its piece counts
///
/// Threats by the opponent weigh more than the matching threats by the
/// maximizer, which biases play towards blocking. Windows holding pieces of
/// both players can never be completed and score nothing.
pub fn window_score(own: usize, opponent: usize, empty: usize) -> i32 {
    match (own, opponent, empty) {
        (4, 0, 0) => WIN_SCORE,
        (3, 0, 1) => 50,
        (2, 0, 2) => 10,
        (1, 0, 3) => 1,
        (0, 4, 0) => -WIN_SCORE,
        (0, 3, 1) => -80,
        (0, 2, 2) => -15,
        (0, 1, 3) => -2,
        _ => 0,
    }
}

/// Heuristic value of a non-terminal position for `perspective`
pub fn heuristic_score(board: &Board, perspective: Player) -> i32 {
    let own_cell = perspective.cell();
    let opponent_cell = perspective.other().cell();

    let lines: i32 = board
        .windows()
        .map(|window| {
            let own = window.iter().filter(|&&cell| cell == own_cell).count();
            let opponent = window.iter().filter(|&&cell| cell == opponent_cell).count();
            window_score(own, opponent, window.len() - own - opponent)
        })
        .sum();

    let center = board.center_column();
    let center_pieces = (0..board.rows())
        .filter(|&row| board.get(row, center) == own_cell)
        .count() as i32;

    lines + CENTER_BONUS * center_pieces
}

/// Value of a search leaf reached `depth` plies below the root
///
/// Wins are worth more the sooner they happen, losses cost less the later
/// they happen. A full board without a line is a draw worth 0.
pub fn utility(board: &Board, perspective: Player, depth: usize) -> i32 {
    match board.detect_winner() {
        Some(winner) if winner == perspective => WIN_SCORE - depth as i32,
        Some(_) => -WIN_SCORE + depth as i32,
        None if board.is_full() => 0,
        None => heuristic_score(board, perspective),
    }
}
