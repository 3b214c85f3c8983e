//! Depth-limited alpha-beta search over five-in-a-row positions

use crate::{
    board::Board,
    movegen::possible_moves,
    threat::steps_to_win,
    transposition_table::{Bounds, Key, TranspositionTable},
    WIN_LENGTH,
};

/// Score of a completed line for the maximizing side, before the depth penalty
pub const WIN_SCORE: i32 = 1000;
/// Score of a completed line for the minimizing side, before the depth penalty
pub const DEFEAT_SCORE: i32 = -WIN_SCORE;
/// Bound beyond any reachable score
pub const INFINITY: i32 = 2 * WIN_SCORE;
/// Steps charged for a stone whose lines are all blocked
pub const BLOCKED_STEPS: i32 = WIN_LENGTH as i32;

/// A minimax searcher with alpha-beta pruning and an optional transposition table
///
/// # Position Scoring
/// Scores are from the point of view of the side to move at the root, which
/// maximizes. A completed five scores [`WIN_SCORE`] less the number of plies
/// taken to reach it, so faster wins (and slower defeats) are preferred. At the
/// depth limit a position scores the negated steps to win of the player who
/// just moved, for that player.
#[derive(Clone)]
pub struct AlphaBeta {
    max_depth: u32,
    transposition_table: Option<TranspositionTable>,
    hint: Option<usize>,

    /// The number of nodes searched by this `AlphaBeta` so far (for diagnostics only)
    pub node_count: usize,
}

impl AlphaBeta {
    /// Creates a searcher with a fresh transposition table
    pub fn new(max_depth: u32) -> Self {
        Self::new_with_transposition_table(max_depth, TranspositionTable::new())
    }

    /// Creates a searcher with a given transposition table
    pub fn new_with_transposition_table(
        max_depth: u32,
        transposition_table: TranspositionTable,
    ) -> Self {
        Self {
            max_depth,
            transposition_table: Some(transposition_table),
            hint: None,
            node_count: 0,
        }
    }

    /// Creates a searcher that keeps no memory between nodes
    pub fn without_memory(max_depth: u32) -> Self {
        Self {
            max_depth,
            transposition_table: None,
            hint: None,
            node_count: 0,
        }
    }

    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    /// Sets a move to search first wherever it is a candidate
    pub fn set_hint(&mut self, hint: Option<usize>) {
        self.hint = hint;
    }

    pub fn transposition_table(&self) -> Option<&TranspositionTable> {
        self.transposition_table.as_ref()
    }

    /// Clears all state left over from searching another position
    pub fn reset(&mut self) {
        self.hint = None;
        self.node_count = 0;
        if let Some(table) = &mut self.transposition_table {
            table.clear();
        }
    }

    /// Searches `depth` plies below the root for the side to move
    ///
    /// Returns the best move found and its fail-soft score: if the score is at or
    /// below `alpha` it is an upper bound, at or above `beta` a lower bound,
    /// otherwise exact. The move is `None` only if the root is already decided,
    /// full, or `depth` is zero.
    pub fn search(
        &mut self,
        board: &mut Board,
        depth: u32,
        alpha: i32,
        beta: i32,
    ) -> (Option<usize>, i32) {
        debug_assert!(depth <= self.max_depth);
        self.memorized_search(board, depth, true, alpha, beta)
    }

    fn memorized_search(
        &mut self,
        board: &mut Board,
        depth: u32,
        maximizing: bool,
        mut alpha: i32,
        mut beta: i32,
    ) -> (Option<usize>, i32) {
        self.node_count += 1;

        if let Some(score) = self.evaluate(board, depth, maximizing) {
            return (None, score);
        }

        let key = Key::new(board.key(), depth, maximizing);
        let mut known = Bounds::unknown(INFINITY);
        if let Some(table) = &mut self.transposition_table {
            if let Some(bounds) = table.get(key) {
                if bounds.lower >= beta {
                    return (bounds.best_move, bounds.lower);
                }
                if bounds.upper <= alpha {
                    return (bounds.best_move, bounds.upper);
                }
                alpha = alpha.max(bounds.lower);
                beta = beta.min(bounds.upper);
                known = bounds;
            }
        }

        let (best_move, best_score) = self.expand(board, depth, maximizing, alpha, beta);

        if let Some(table) = &mut self.transposition_table {
            let bounds = if best_score <= alpha {
                // failed low, the true score is at most best_score
                Bounds {
                    best_move,
                    upper: best_score,
                    ..known
                }
            } else if best_score >= beta {
                // failed high, the true score is at least best_score
                Bounds {
                    best_move,
                    lower: best_score,
                    ..known
                }
            } else {
                Bounds {
                    best_move,
                    lower: best_score,
                    upper: best_score,
                }
            };
            table.set(key, bounds);
        }
        (best_move, best_score)
    }

    // search the next level of the tree
    fn expand(
        &mut self,
        board: &mut Board,
        depth: u32,
        maximizing: bool,
        mut alpha: i32,
        mut beta: i32,
    ) -> (Option<usize>, i32) {
        let candidates = possible_moves(board, self.hint);
        if candidates.is_empty() {
            // the board is full without a winner
            return (None, 0);
        }

        let mut best_move = None;
        let mut best_score = if maximizing { -INFINITY } else { INFINITY };
        for cell in candidates {
            let mut child = board.play_scoped(cell);
            let (_, score) =
                self.memorized_search(&mut child, depth - 1, !maximizing, alpha, beta);
            drop(child);

            if maximizing {
                if score > best_score {
                    best_score = score;
                    best_move = Some(cell);
                }
                alpha = alpha.max(score);
                // the minimizing side will not allow this line
                if score >= beta {
                    break;
                }
            } else {
                if score < best_score {
                    best_score = score;
                    best_move = Some(cell);
                }
                beta = beta.min(score);
                // the maximizing side will not allow this line
                if score <= alpha {
                    break;
                }
            }
        }
        (best_move, best_score)
    }

    /// Scores decided positions and positions at the depth limit
    ///
    /// `maximizing` is the side to move, so the stone just played belongs to the
    /// other side.
    fn evaluate(&self, board: &Board, depth: u32, maximizing: bool) -> Option<i32> {
        let (mover, last_move) = match (board.last_mover(), board.last_move()) {
            (Some(mover), Some(last_move)) => (mover, last_move),
            _ => return if depth == 0 { Some(0) } else { None },
        };
        let sign = if maximizing { -1 } else { 1 };

        let steps = steps_to_win(board, last_move, mover);
        if steps == Some(0) {
            let plies = self.max_depth.saturating_sub(depth) as i32;
            return Some(sign * (WIN_SCORE - plies));
        }
        if depth == 0 {
            let steps = steps.map_or(BLOCKED_STEPS, i32::from);
            return Some(sign * -steps);
        }
        None
    }
}
