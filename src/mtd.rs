//! Iterative deepening with MTD(f) null-window searches

use log::{debug, trace};

use crate::{
    board::{Board, GameStatus},
    error::GomokuError,
    movegen::possible_moves,
    search::{AlphaBeta, INFINITY},
    threat::steps_to_win,
    transposition_table::TranspositionTable,
    SearchConfig, CENTER,
};

/// An agent choosing moves by MTD(f) over an [`AlphaBeta`] searcher
///
/// # Notes
/// Every depth from 1 up to the configured maximum is searched in turn. Each depth
/// converges on the exact minimax score through a series of null-window searches
/// around the previous depth's score. The transposition table carries bounds from
/// one pass to the next, and the best move of each depth is searched first at the
/// next one.
#[derive(Clone)]
pub struct Mtd {
    searcher: AlphaBeta,
}

impl Mtd {
    pub fn new(config: &SearchConfig) -> Self {
        let max_depth = config.max_depth.max(1);
        Self {
            searcher: AlphaBeta::new_with_transposition_table(
                max_depth,
                TranspositionTable::with_size(config.table_size),
            ),
        }
    }

    /// The number of nodes visited by the most recent [`Mtd::run`] (for diagnostics only)
    pub fn node_count(&self) -> usize {
        self.searcher.node_count
    }

    /// Returns the best move for the side to move on `board`
    ///
    /// The board is searched in place and is left as it was given. Unless the side
    /// to move can complete five itself, a cell where the opponent would complete
    /// five is blocked without searching.
    pub fn run(&mut self, board: &mut Board) -> Result<usize, GomokuError> {
        let status = board.status();
        if status != GameStatus::Playing {
            return Err(GomokuError::NoLegalMove(status));
        }
        if board.last_move().is_none() {
            debug!("Empty board, playing the centre cell {}", CENTER);
            return Ok(CENTER);
        }

        // bounds from another position are meaningless here
        self.searcher.reset();

        if let Some(block) = forced_block(board) {
            debug!("Blocking the opponent's five at {}", block);
            return Ok(block);
        }

        let mut guess = 0;
        let mut best_move = None;
        for depth in 1..=self.searcher.max_depth() {
            let (next_move, score, passes) = self.mtd(board, guess, depth);
            debug!(
                "Search depth: {}/{}, score: {}, best move: {:?}, passes: {}, nodes: {}",
                depth,
                self.searcher.max_depth(),
                score,
                next_move,
                passes,
                self.searcher.node_count
            );
            guess = score;
            if next_move.is_some() {
                best_move = next_move;
            }
            self.searcher.set_hint(best_move);
        }

        if let Some(table) = self.searcher.transposition_table() {
            trace!(
                "Transposition table: {} entries, {} hits, {} misses",
                table.len(),
                table.hits,
                table.misses
            );
        }
        best_move.ok_or(GomokuError::NoLegalMove(status))
    }

    /// Converges on the exact score at `depth` with null-window searches around `guess`
    ///
    /// Returns the best move, its score and the number of searches made. The move
    /// comes from the last search that failed high, as that search proved the move
    /// reaches the final score.
    pub fn mtd(&mut self, board: &mut Board, guess: i32, depth: u32) -> (Option<usize>, i32, usize) {
        let mut score = guess;
        let mut lower_bound = -INFINITY;
        let mut upper_bound = INFINITY;
        let mut best_move = None;
        let mut passes = 0;

        // iteratively narrow the bounds until they meet
        while lower_bound < upper_bound {
            let beta = if score == lower_bound { score + 1 } else { score };

            // use a null-window to determine if the actual score is greater or less than beta
            let (next_move, r) = self.searcher.search(board, depth, beta - 1, beta);
            passes += 1;
            score = r;

            if r < beta {
                // actual score <= r
                upper_bound = r;
                if best_move.is_none() {
                    best_move = next_move;
                }
            } else {
                // actual score >= r
                lower_bound = r;
                best_move = next_move.or(best_move);
            }
        }
        (best_move, score, passes)
    }
}

// a cell where the opponent would complete five, if the side to move has no five of its own
fn forced_block(board: &Board) -> Option<usize> {
    let player = board.side_to_move();
    let candidates = possible_moves(board, None);
    let completes = |cell: usize, owner| steps_to_win(board, cell, owner) == Some(0);
    if candidates.iter().any(|&cell| completes(cell, player)) {
        return None;
    }
    candidates
        .into_iter()
        .find(|&cell| completes(cell, player.opponent()))
}
