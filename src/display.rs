use anyhow::Result;
use crossterm::{
    style::{style, Attribute, Color, PrintStyledContent},
    QueueableCommand,
};

use std::io::{stdout, Write};

use drop4_ai::{Board, Cell};

/// Draws the board top row first, under a header of column numbers
pub fn draw(board: &Board) -> Result<()> {
    let mut stdout = stdout();

    let header: String = (0..board.columns()).map(|x| format!("{:>2} ", x)).collect();
    stdout.queue(PrintStyledContent(style(header + "\n")))?;

    for row in 0..board.rows() {
        for column in 0..board.columns() {
            stdout.queue(PrintStyledContent(
                style(" O ")
                    .attribute(Attribute::Bold)
                    .on(Color::DarkBlue)
                    .with(match board.get(row, column) {
                        Cell::A => Color::Red,
                        Cell::B => Color::Yellow,
                        Cell::Empty => Color::DarkBlue,
                    }),
            ))?;
        }
        stdout.queue(PrintStyledContent(style("\n")))?;
    }
    stdout.flush()?;
    Ok(())
}
