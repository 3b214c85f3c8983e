//! Candidate moves for the search

use crate::{
    board::{neighbours, Board},
    CENTER, GRID_SIZE,
};

/// Returns the empty cells adjacent to any stone, with `hint` first if it is one of them
///
/// The order is deterministic: stones are visited in play order, player one's first,
/// and their neighbours in a fixed compass order. On an empty board the only
/// candidate is the centre cell.
pub fn possible_moves(board: &Board, hint: Option<usize>) -> Vec<usize> {
    if board.num_moves() == 0 {
        return vec![CENTER];
    }

    let mut seen = [false; GRID_SIZE];
    let mut moves = Vec::new();
    for stone in board.occupied() {
        for neighbour in neighbours(stone) {
            if !seen[neighbour] && board.is_empty(neighbour) {
                seen[neighbour] = true;
                moves.push(neighbour);
            }
        }
    }

    // search the previous best move first
    if let Some(hint) = hint {
        if let Some(index) = moves.iter().position(|&cell| cell == hint) {
            moves[..=index].rotate_right(1);
        }
    }
    moves
}
