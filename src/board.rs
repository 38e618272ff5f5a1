use anyhow::{anyhow, ensure, Result};
use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

use crate::{error::MoveError, COLS, IN_A_ROW, ROWS};

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
pub enum Player {
    A,
    B,
}

impl Player {
    /// Get the other player
    pub fn other(self) -> Self {
        match self {
            Player::A => Player::B,
            Player::B => Player::A,
        }
    }

    pub fn cell(self) -> Cell {
        match self {
            Player::A => Cell::A,
            Player::B => Cell::B,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::A => write!(f, "A"),
            Player::B => write!(f, "B"),
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Cell {
    Empty,
    A,
    B,
}

impl Cell {
    pub fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// The owner of this cell, if any
    pub fn player(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::A => Some(Player::A),
            Cell::B => Some(Player::B),
        }
    }

    fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '.' => Some(Cell::Empty),
            'A' | 'X' => Some(Cell::A),
            'B' | 'O' => Some(Cell::B),
            _ => None,
        }
    }

    fn symbol(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::A => 'A',
            Cell::B => 'B',
        }
    }
}

/// The state of a game, always derived from a board
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Outcome {
    Playing,
    WinA,
    WinB,
    Draw,
}

impl Outcome {
    pub fn winner(self) -> Option<Player> {
        match self {
            Outcome::WinA => Some(Player::A),
            Outcome::WinB => Some(Player::B),
            _ => None,
        }
    }

    pub fn is_over(self) -> bool {
        self != Outcome::Playing
    }
}

/// Line directions as (row step, column step) in scan order:
/// rows, columns, then the two diagonals
const DIRECTIONS: [(isize, usize); 4] = [(0, 1), (1, 0), (1, 1), (-1, 1)];

/// A grid of cells with row 0 at the top
///
/// Pieces obey gravity: in every column the empty cells sit above the
/// occupied ones. Boards are treated as values, a move produces a new board
/// and leaves the original untouched.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Board {
    rows: usize,
    columns: usize,
    cells: Vec<Cell>, // row-major, top-to-bottom then left-to-right
}

impl Board {
    /// Creates an empty board of the default size
    pub fn new() -> Self {
        Self::empty(ROWS, COLS)
    }

    /// Creates an empty board of any size that fits a full line
    pub fn with_size(rows: usize, columns: usize) -> Result<Self> {
        ensure!(
            rows >= IN_A_ROW && columns >= IN_A_ROW,
            "board must be at least {0}x{0}, got {1}x{2}",
            IN_A_ROW,
            rows,
            columns
        );
        Ok(Self::empty(rows, columns))
    }

    fn empty(rows: usize, columns: usize) -> Self {
        Self {
            rows,
            columns,
            cells: vec![Cell::Empty; rows * columns],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn center_column(&self) -> usize {
        self.columns / 2
    }

    /// The cell at `row` (0 is the top) and `column`
    ///
    /// # Panics
    /// Panics if `row` or `column` lies outside the board.
    pub fn get(&self, row: usize, column: usize) -> Cell {
        debug_assert!(
            row < self.rows && column < self.columns,
            "cell ({}, {}) outside a {}x{} board",
            row,
            column,
            self.rows,
            self.columns
        );
        self.cells[row * self.columns + column]
    }

    /// Every contiguous line of `IN_A_ROW` cells, in scan order
    pub fn windows(&self) -> impl Iterator<Item = [Cell; IN_A_ROW]> + '_ {
        let span = IN_A_ROW - 1;
        DIRECTIONS.into_iter().flat_map(move |(d_row, d_col)| {
            let rows = match d_row {
                0 => 0..self.rows,
                1 => 0..self.rows - span,
                _ => span..self.rows,
            };
            let columns = 0..self.columns - d_col * span;
            rows.flat_map(move |row| {
                columns
                    .clone()
                    .map(move |column| self.window(row, column, d_row, d_col))
            })
        })
    }

    fn window(&self, row: usize, column: usize, d_row: isize, d_col: usize) -> [Cell; IN_A_ROW] {
        let mut window = [Cell::Empty; IN_A_ROW];
        for (i, cell) in window.iter_mut().enumerate() {
            let r = (row as isize + d_row * i as isize) as usize;
            *cell = self.get(r, column + d_col * i);
        }
        window
    }

    /// Returns the owner of the first complete line found
    pub fn detect_winner(&self) -> Option<Player> {
        self.windows().find_map(|window| {
            let owner = window[0].player()?;
            if window.iter().all(|&cell| cell == window[0]) {
                Some(owner)
            } else {
                None
            }
        })
    }

    /// A board is full once its top row is, thanks to gravity
    pub fn is_full(&self) -> bool {
        (0..self.columns).all(|column| !self.get(0, column).is_empty())
    }

    pub fn is_terminal(&self) -> bool {
        self.detect_winner().is_some() || self.is_full()
    }

    pub fn outcome(&self) -> Outcome {
        match self.detect_winner() {
            Some(Player::A) => Outcome::WinA,
            Some(Player::B) => Outcome::WinB,
            None if self.is_full() => Outcome::Draw,
            None => Outcome::Playing,
        }
    }

    pub fn playable(&self, column: usize) -> bool {
        column < self.columns && self.get(0, column).is_empty()
    }

    /// Playable columns in ascending order
    pub fn valid_columns(&self) -> Vec<usize> {
        (0..self.columns).filter(|&column| self.playable(column)).collect()
    }

    /// The row a piece dropped in `column` would land on
    pub fn landing_row(&self, column: usize) -> Option<usize> {
        if column >= self.columns {
            return None;
        }
        (0..self.rows)
            .rev()
            .find(|&row| self.get(row, column).is_empty())
    }

    /// Returns a copy of the board with `player`'s piece dropped in `column`
    pub fn apply_move(&self, column: usize, player: Player) -> Result<Board, MoveError> {
        if column >= self.columns {
            return Err(MoveError::ColumnOutOfRange {
                column,
                last: self.columns - 1,
            });
        }
        let row = self
            .landing_row(column)
            .ok_or(MoveError::ColumnFull(column))?;

        let mut next = self.clone();
        next.cells[row * self.columns + column] = player.cell();
        Ok(next)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Parses one line of cells per row, top row first
///
/// `.` is empty, `A`/`X` and `B`/`O` are the two players. Blank lines and
/// surrounding whitespace are ignored.
impl FromStr for Board {
    type Err = anyhow::Error;

    fn from_str(text: &str) -> Result<Self> {
        let lines: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        let rows = lines.len();
        let columns = lines.first().map_or(0, |line| line.chars().count());

        let mut board = Self::with_size(rows, columns)?;
        for (row, line) in lines.iter().enumerate() {
            let width = line.chars().count();
            ensure!(
                width == columns,
                "row {} has {} cells, expected {}",
                row,
                width,
                columns
            );
            for (column, symbol) in line.chars().enumerate() {
                let cell = Cell::from_symbol(symbol)
                    .ok_or_else(|| anyhow!("could not parse '{}' as a cell", symbol))?;
                board.cells[row * columns + column] = cell;
            }
        }

        // pieces may not float above an empty cell
        for column in 0..columns {
            let mut landed = false;
            for row in 0..rows {
                let empty = board.get(row, column).is_empty();
                if landed && empty {
                    return Err(anyhow!(
                        "invalid position, floating piece above row {} in column {}",
                        row,
                        column
                    ));
                }
                landed |= !empty;
            }
        }
        Ok(board)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            if row > 0 {
                writeln!(f)?;
            }
            for column in 0..self.columns {
                write!(f, "{}", self.get(row, column).symbol())?;
            }
        }
        Ok(())
    }
}
