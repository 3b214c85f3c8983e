//! Interchangeable ways of choosing the next move

use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{
    board::{offset, Board, GameStatus},
    error::GomokuError,
    mtd::Mtd,
    search::{AlphaBeta, INFINITY},
    SearchConfig, CENTER, GRID_SIZE,
};

/// A player able to pick a move for the side to move
pub trait Strategy {
    /// Returns an empty cell to play on `board`
    ///
    /// # Errors
    /// Returns [`GomokuError::NoLegalMove`] if the game on `board` is over.
    fn next_move(&mut self, board: &Board) -> Result<usize, GomokuError>;
}

fn ensure_playing(board: &Board) -> Result<(), GomokuError> {
    match board.status() {
        GameStatus::Playing => Ok(()),
        status => Err(GomokuError::NoLegalMove(status)),
    }
}

/// Plays a uniformly random empty cell
pub struct RandomStrategy {
    rng: StdRng,
}

impl RandomStrategy {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates a strategy whose choices replay identically for the same seed
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for RandomStrategy {
    fn next_move(&mut self, board: &Board) -> Result<usize, GomokuError> {
        ensure_playing(board)?;
        let free: Vec<usize> = (0..GRID_SIZE).filter(|&cell| board.is_empty(cell)).collect();
        Ok(free[self.rng.gen_range(0..free.len())])
    }
}

/// Greedily extends a straight line in one direction
///
/// Each stone is placed one step from the previous one, the first one step from
/// the start cell ([`CENTER`] unless set with [`DummyStrategy::with_start`]). When
/// that cell is taken or off the board, a random cell is played and the line
/// restarts from there.
pub struct DummyStrategy {
    row_inc: i32,
    col_inc: i32,
    anchor: usize,
    random: RandomStrategy,
}

impl DummyStrategy {
    pub fn new(row_inc: i32, col_inc: i32) -> Result<Self, GomokuError> {
        Self::with_random(row_inc, col_inc, RandomStrategy::new())
    }

    pub fn with_seed(row_inc: i32, col_inc: i32, seed: u64) -> Result<Self, GomokuError> {
        Self::with_random(row_inc, col_inc, RandomStrategy::with_seed(seed))
    }

    /// Starts the line one step from `start` instead of the centre
    ///
    /// # Errors
    /// Returns [`GomokuError::IllegalMove`] if `start` is off the board.
    pub fn with_start(mut self, start: usize) -> Result<Self, GomokuError> {
        if start >= GRID_SIZE {
            return Err(GomokuError::IllegalMove {
                cell: start,
                reason: "is off the board",
            });
        }
        self.anchor = start;
        Ok(self)
    }

    fn with_random(row_inc: i32, col_inc: i32, random: RandomStrategy) -> Result<Self, GomokuError> {
        let step = -1..=1;
        if !step.contains(&row_inc) || !step.contains(&col_inc) || (row_inc, col_inc) == (0, 0) {
            return Err(GomokuError::InvalidDirection { row_inc, col_inc });
        }
        Ok(Self {
            row_inc,
            col_inc,
            anchor: CENTER,
            random,
        })
    }
}

impl Strategy for DummyStrategy {
    fn next_move(&mut self, board: &Board) -> Result<usize, GomokuError> {
        ensure_playing(board)?;
        let next = offset(self.anchor, self.row_inc, self.col_inc)
            .filter(|&cell| board.is_empty(cell));
        let cell = match next {
            Some(cell) => cell,
            None => self.random.next_move(board)?,
        };
        self.anchor = cell;
        Ok(cell)
    }
}

/// Plays the result of a single full-window alpha-beta search
pub struct AlphaBetaStrategy {
    searcher: AlphaBeta,
}

impl AlphaBetaStrategy {
    /// Creates a strategy searching `max_depth` plies without a transposition table
    pub fn new(max_depth: u32) -> Self {
        Self {
            searcher: AlphaBeta::without_memory(max_depth.max(1)),
        }
    }
}

impl Strategy for AlphaBetaStrategy {
    fn next_move(&mut self, board: &Board) -> Result<usize, GomokuError> {
        ensure_playing(board)?;
        let mut board = board.clone();
        self.searcher.reset();
        let depth = self.searcher.max_depth();
        let (best_move, _) = self.searcher.search(&mut board, depth, -INFINITY, INFINITY);
        best_move.ok_or(GomokuError::NoLegalMove(GameStatus::Playing))
    }
}

/// Plays the move chosen by the MTD(f) driver
pub struct MtdStrategy {
    driver: Mtd,
}

impl MtdStrategy {
    pub fn new(config: &SearchConfig) -> Self {
        Self {
            driver: Mtd::new(config),
        }
    }
}

impl Strategy for MtdStrategy {
    fn next_move(&mut self, board: &Board) -> Result<usize, GomokuError> {
        let mut board = board.clone();
        self.driver.run(&mut board)
    }
}
