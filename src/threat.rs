//! Distance to a completed line through a single cell

use std::collections::{HashSet, VecDeque};

use crate::{
    board::{from_row_col, to_row_col, Board, Player},
    WIN_LENGTH,
};

/// Vertical, horizontal, diagonal and anti-diagonal line directions
const DIRECTIONS: [(i32, i32); 4] = [(1, 0), (0, 1), (1, 1), (1, -1)];

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Occupant {
    Player,
    Opponent,
    Empty,
}

/// Returns the fewest extra stones `player` needs for five in a row through `cell`
///
/// `cell` itself counts as one of the player's stones. `Some(0)` is a completed
/// line, `None` means every line through `cell` is blocked by the opponent.
pub fn steps_to_win(board: &Board, cell: usize, player: Player) -> Option<u8> {
    steps_to_win_with(cell, |pos| match board.cell(pos).owner() {
        Some(owner) if owner == player => Occupant::Player,
        Some(_) => Occupant::Opponent,
        None => Occupant::Empty,
    })
}

/// [`steps_to_win`] for stones given as cell sets
pub fn steps_to_win_sets(
    cell: usize,
    player_cells: &HashSet<usize>,
    opponent_cells: &HashSet<usize>,
) -> Option<u8> {
    steps_to_win_with(cell, |pos| {
        if player_cells.contains(&pos) {
            Occupant::Player
        } else if opponent_cells.contains(&pos) {
            Occupant::Opponent
        } else {
            Occupant::Empty
        }
    })
}

/// [`steps_to_win`] over any cell lookup
pub fn steps_to_win_with<F>(cell: usize, occupant: F) -> Option<u8>
where
    F: Fn(usize) -> Occupant,
{
    DIRECTIONS
        .iter()
        .filter_map(|&(row_inc, col_inc)| steps_in_direction(cell, row_inc, col_inc, &occupant))
        .min()
}

fn steps_in_direction<F>(cell: usize, row_inc: i32, col_inc: i32, occupant: &F) -> Option<u8>
where
    F: Fn(usize) -> Occupant,
{
    let span = WIN_LENGTH as i32 - 1;
    let (mut row, mut col) = to_row_col(cell);

    // step back as far as a window containing the cell can start
    let mut back = 0;
    while back < span && from_row_col(row - row_inc, col - col_inc).is_some() {
        row -= row_inc;
        col -= col_inc;
        back += 1;
    }

    let mut best: Option<u8> = None;
    // true for cells that count as the player's, false for empty cells
    let mut window: VecDeque<bool> = VecDeque::with_capacity(WIN_LENGTH);
    let mut to_take = 0u8;

    for _ in 0..back + WIN_LENGTH as i32 {
        let pos = match from_row_col(row, col) {
            Some(pos) => pos,
            None => break,
        };
        match occupant(pos) {
            _ if pos == cell => window.push_back(true),
            Occupant::Player => window.push_back(true),
            Occupant::Opponent => {
                // no window through an opponent stone can be completed
                window.clear();
                to_take = 0;
            }
            Occupant::Empty => {
                window.push_back(false);
                to_take += 1;
            }
        }

        if window.len() == WIN_LENGTH {
            best = Some(best.map_or(to_take, |best| best.min(to_take)));
            if window.pop_front() == Some(false) {
                to_take -= 1;
            }
        }

        row += row_inc;
        col += col_inc;
    }
    best
}
