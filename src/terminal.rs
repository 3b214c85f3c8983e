use anyhow::{anyhow, Result};
use crossterm::{
    style::{style, Attribute, Color, PrintStyledContent},
    QueueableCommand,
};

use std::io::{stdout, Write};

use gomoku_ai::{board::from_row_col, Board, Cell, ROWS};

/// Draws the board with row and column numbers, highlighting the last move
pub fn display(board: &Board) -> Result<()> {
    let mut stdout = stdout();

    let cols: String = (0..ROWS).map(|col| format!("{:>3}", col)).collect();
    stdout.queue(PrintStyledContent(style(format!("   {}\n", cols))))?;

    for row in 0..ROWS {
        stdout.queue(PrintStyledContent(style(format!("{:>3}", row))))?;
        for col in 0..ROWS {
            let cell = row * ROWS + col;
            let (symbol, color) = match board.cell(cell) {
                Cell::PlayerOne => ("X", Color::Red),
                Cell::PlayerTwo => ("O", Color::Yellow),
                Cell::Empty => (".", Color::DarkGrey),
            };
            let mut content = style(format!("{:>3}", symbol)).with(color);
            if board.last_move() == Some(cell) {
                content = content.attribute(Attribute::Bold).on(Color::DarkBlue);
            }
            stdout.queue(PrintStyledContent(content))?;
        }
        stdout.queue(PrintStyledContent(style("\n".to_string())))?;
    }
    stdout.flush()?;
    Ok(())
}

/// Parses a move typed as "row col"
pub fn parse_move(input: &str) -> Result<usize> {
    let mut parts = input.split_whitespace();
    let mut coordinate = |name: &str| -> Result<i32> {
        let part = parts
            .next()
            .ok_or_else(|| anyhow!("missing {}, moves are written as \"row col\"", name))?;
        part.parse::<i32>()
            .map_err(|_| anyhow!("could not parse '{}' as a {}", part, name))
    };
    let row = coordinate("row")?;
    let col = coordinate("column")?;

    from_row_col(row, col).ok_or_else(|| {
        anyhow!(
            "Invalid move, ({}, {}) is off the board. Rows and columns must be between 0 and {}",
            row,
            col,
            ROWS - 1
        )
    })
}
