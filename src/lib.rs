//! A search-based agent for playing five-in-a-row on a 25x25 board
//!
//! The agent runs a memory-enhanced alpha-beta search under an
//! iterative-deepening MTD(f) driver to pick the move that gives the
//! side to move the best forced outcome within the search horizon.
//!
//! # Basic Usage
//!
//! ```
//! use gomoku_ai::compute_move;
//!
//!# use std::error::Error;
//!# fn main() -> Result<(), Box<dyn Error>> {
//! // four stones in the top row, the fifth wins
//! let best_move = compute_move(&[0, 1, 2, 3], &[100, 200, 300, 400], Some(400), 2)?;
//!
//! assert_eq!(best_move, 4);
//!# Ok(())
//!# }
//! ```

use static_assertions::*;
pub use anyhow;

use std::collections::HashSet;

pub mod error;

pub mod board;

pub mod threat;

pub mod movegen;

pub mod transposition_table;

pub mod search;

pub mod mtd;

pub mod strategy;

pub mod arena;


pub use board::{Board, Cell, GameStatus, MoveGuard, Player};
pub use error::GomokuError;
pub use mtd::Mtd;
pub use search::AlphaBeta;
pub use transposition_table::{TranspositionTable, DEFAULT_TABLE_SIZE};

/// The number of rows (and columns) of the game board
pub const ROWS: usize = 25;

/// The total number of cells on the board
pub const GRID_SIZE: usize = ROWS * ROWS;

/// The number of stones in a row needed to win
pub const WIN_LENGTH: usize = 5;

/// The cell played when the board is still empty
pub const CENTER: usize = GRID_SIZE / 2;

/// The search depth used when none is configured
pub const DEFAULT_MAX_DEPTH: u32 = 5;

// a winning line must fit on the board, and cell indices must fit the i32 row/column arithmetic
const_assert!(WIN_LENGTH <= ROWS);
const_assert!(GRID_SIZE < i32::MAX as usize);

/// Tunable parameters of a move search
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SearchConfig {
    /// The deepest iteration of the MTD(f) driver, in plies
    pub max_depth: u32,
    /// The number of slots in the transposition table
    pub table_size: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            table_size: DEFAULT_TABLE_SIZE,
        }
    }
}

/// Computes the best move for the player owning `self_cells`, who is to move
///
/// `last_opponent_move` is reordered to be the opponent's most recent stone; when
/// absent, `opponent_cells` is taken to be in play order.
///
/// # Errors
/// Fails with [`GomokuError::InvalidBoard`] for overlapping or out-of-range cells
/// or broken turn parity, and with [`GomokuError::NoLegalMove`] if the game is
/// already decided or the board is full.
pub fn compute_move(
    self_cells: &[usize],
    opponent_cells: &[usize],
    last_opponent_move: Option<usize>,
    max_depth: u32,
) -> Result<usize, GomokuError> {
    let config = SearchConfig {
        max_depth,
        ..SearchConfig::default()
    };
    compute_move_with(self_cells, opponent_cells, last_opponent_move, &config)
}

/// [`compute_move`] with every search parameter supplied by the caller
pub fn compute_move_with(
    self_cells: &[usize],
    opponent_cells: &[usize],
    last_opponent_move: Option<usize>,
    config: &SearchConfig,
) -> Result<usize, GomokuError> {
    let mut opponent_cells = opponent_cells.to_vec();
    if let Some(last) = last_opponent_move {
        let index = opponent_cells
            .iter()
            .position(|&cell| cell == last)
            .ok_or_else(|| {
                GomokuError::InvalidBoard(format!(
                    "last opponent move {} is not an opponent stone",
                    last
                ))
            })?;
        let last = opponent_cells.remove(index);
        opponent_cells.push(last);
    }

    // the player to move goes first when the stone counts are level
    let mut board = if self_cells.len() == opponent_cells.len() {
        Board::from_moves(self_cells, &opponent_cells)?
    } else if opponent_cells.len() == self_cells.len() + 1 {
        Board::from_moves(&opponent_cells, self_cells)?
    } else {
        return Err(GomokuError::InvalidBoard(format!(
            "{} own stones against {} opponent stones is not a position with the own side to move",
            self_cells.len(),
            opponent_cells.len()
        )));
    };

    Mtd::new(config).run(&mut board)
}

/// Returns true if `occupied` alone forms five in a row through `cell`
pub fn check_winning_step(occupied: &HashSet<usize>, cell: usize) -> bool {
    threat::steps_to_win_sets(cell, occupied, &HashSet::new()) == Some(0)
}
