//! Errors raised by the board and the move search

use thiserror::Error;

use crate::board::GameStatus;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GomokuError {
    /// The supplied stones cannot come from a legal game
    #[error("invalid board: {0}")]
    InvalidBoard(String),

    /// A move targets a cell that is off the board or already taken
    #[error("illegal move at cell {cell}: {reason}")]
    IllegalMove { cell: usize, reason: &'static str },

    /// More moves were unmade than made, which is a bug in the caller
    #[error("no move left to unmake")]
    IllegalState,

    /// A move was requested on a board where the game is over
    #[error("no legal move, the game is {0}")]
    NoLegalMove(GameStatus),

    /// A line-following strategy was given a direction it cannot step in
    #[error("invalid direction ({row_inc}, {col_inc}), increments must be -1, 0 or 1 and not both 0")]
    InvalidDirection { row_inc: i32, col_inc: i32 },
}
