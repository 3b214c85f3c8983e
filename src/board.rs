use std::fmt;
use std::ops::{Deref, DerefMut};

use crate::{error::GomokuError, threat, GRID_SIZE, ROWS};

mod static_keys {
    use crate::GRID_SIZE;

    const SEED: u64 = 0x2545_F491_4F6C_DD1D;

    // one step of the splitmix64 generator, returns (next state, output)
    const fn splitmix(state: u64) -> (u64, u64) {
        let state = state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        (state, z ^ (z >> 31))
    }

    // rows 0 and 1 key the stones of each player, row 2 keys the last move played
    pub const fn generate() -> [[u64; GRID_SIZE]; 3] {
        let mut keys = [[0; GRID_SIZE]; 3];
        let mut state = SEED;
        let mut table = 0;
        while table < 3 {
            let mut cell = 0;
            while cell < GRID_SIZE {
                let (next, key) = splitmix(state);
                state = next;
                keys[table][cell] = key;
                cell += 1;
            }
            table += 1;
        }
        keys
    }
}

static ZOBRIST_KEYS: [[u64; GRID_SIZE]; 3] = static_keys::generate();
const LAST_MOVE_KEYS: usize = 2;

/// The 8-neighbourhood of a cell as (row, column) offsets
pub static NEIGHBOUR_OFFSETS: [(i32, i32); 8] = [
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];

/// Splits a cell index into its (row, column) coordinates
pub fn to_row_col(cell: usize) -> (i32, i32) {
    ((cell / ROWS) as i32, (cell % ROWS) as i32)
}

/// Joins (row, column) coordinates into a cell index, or `None` off the board
pub fn from_row_col(row: i32, col: i32) -> Option<usize> {
    if row < 0 || col < 0 || row >= ROWS as i32 || col >= ROWS as i32 {
        None
    } else {
        Some(row as usize * ROWS + col as usize)
    }
}

/// The cell reached by stepping `(row_inc, col_inc)` from `cell`, if it is on the board
pub fn offset(cell: usize, row_inc: i32, col_inc: i32) -> Option<usize> {
    let (row, col) = to_row_col(cell);
    from_row_col(row + row_inc, col + col_inc)
}

/// The on-board cells adjacent to `cell`, diagonals included
pub fn neighbours(cell: usize) -> impl Iterator<Item = usize> {
    NEIGHBOUR_OFFSETS
        .iter()
        .filter_map(move |&(row_inc, col_inc)| offset(cell, row_inc, col_inc))
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    fn index(self) -> usize {
        match self {
            Player::One => 0,
            Player::Two => 1,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::One => write!(f, "Player 1"),
            Player::Two => write!(f, "Player 2"),
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Cell {
    PlayerOne,
    PlayerTwo,
    Empty,
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn owner(&self) -> Option<Player> {
        match self {
            Cell::PlayerOne => Some(Player::One),
            Cell::PlayerTwo => Some(Player::Two),
            Cell::Empty => None,
        }
    }
}

impl From<Player> for Cell {
    fn from(player: Player) -> Self {
        match player {
            Player::One => Cell::PlayerOne,
            Player::Two => Cell::PlayerTwo,
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum GameStatus {
    Playing,
    Draw,
    Finished,
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::Playing => write!(f, "in progress"),
            GameStatus::Draw => write!(f, "drawn"),
            GameStatus::Finished => write!(f, "finished"),
        }
    }
}

/// A five-in-a-row board with the move history of both players
///
/// # Notes
/// Player one always moves first, so the side to move and the last move played
/// follow from the lengths of the two move lists. The Zobrist hash of the stones
/// is kept up to date on every move, making [`Board::key`] O(1).
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Board {
    cells: [Cell; GRID_SIZE],
    // moves of player one and player two, in play order
    moves: [Vec<usize>; 2],
    hash: u64,
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: [Cell::Empty; GRID_SIZE],
            moves: [Vec::new(), Vec::new()],
            hash: 0,
        }
    }

    /// Builds a board from the moves of both players, each list in play order
    ///
    /// # Errors
    /// Returns [`GomokuError::InvalidBoard`] if a cell is off the board or repeated,
    /// or if player one is not level with or one move ahead of player two.
    pub fn from_moves(moves_one: &[usize], moves_two: &[usize]) -> Result<Self, GomokuError> {
        if moves_one.len() != moves_two.len() && moves_one.len() != moves_two.len() + 1 {
            return Err(GomokuError::InvalidBoard(format!(
                "player 1 has {} stones and player 2 has {}, player 1 must be level or one ahead",
                moves_one.len(),
                moves_two.len()
            )));
        }

        let mut board = Self::new();
        let turns = moves_one
            .iter()
            .enumerate()
            .flat_map(|(i, &cell)| std::iter::once(cell).chain(moves_two.get(i).copied()));
        for cell in turns {
            board.make_move(cell).map_err(|err| match err {
                GomokuError::IllegalMove { cell, reason } => {
                    GomokuError::InvalidBoard(format!("cell {} {}", cell, reason))
                }
                other => other,
            })?;
        }
        Ok(board)
    }

    pub fn cell(&self, cell: usize) -> Cell {
        self.cells[cell]
    }

    pub fn is_empty(&self, cell: usize) -> bool {
        self.cells[cell].is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.num_moves() == GRID_SIZE
    }

    pub fn num_moves(&self) -> usize {
        self.moves[0].len() + self.moves[1].len()
    }

    /// The moves of `player` in the order they were played
    pub fn moves(&self, player: Player) -> &[usize] {
        &self.moves[player.index()]
    }

    /// Every occupied cell, player one's stones first
    pub fn occupied(&self) -> impl Iterator<Item = usize> + '_ {
        self.moves[0].iter().chain(self.moves[1].iter()).copied()
    }

    pub fn side_to_move(&self) -> Player {
        if self.moves[0].len() == self.moves[1].len() {
            Player::One
        } else {
            Player::Two
        }
    }

    /// The player who made the most recent move, `None` on an empty board
    pub fn last_mover(&self) -> Option<Player> {
        if self.moves[0].is_empty() {
            None
        } else {
            Some(self.side_to_move().opponent())
        }
    }

    pub fn last_move(&self) -> Option<usize> {
        self.last_mover()
            .and_then(|player| self.moves[player.index()].last().copied())
    }

    /// Plays `cell` for the side to move
    pub fn make_move(&mut self, cell: usize) -> Result<(), GomokuError> {
        self.check_move(cell)?;
        self.play(cell);
        Ok(())
    }

    fn check_move(&self, cell: usize) -> Result<(), GomokuError> {
        if cell >= GRID_SIZE {
            return Err(GomokuError::IllegalMove {
                cell,
                reason: "is off the board",
            });
        }
        if !self.is_empty(cell) {
            return Err(GomokuError::IllegalMove {
                cell,
                reason: "is already occupied",
            });
        }
        Ok(())
    }

    /// Takes back the most recent move, returning its cell
    pub fn unmake_move(&mut self) -> Result<usize, GomokuError> {
        self.undo().ok_or(GomokuError::IllegalState)
    }

    /// Plays `cell` until the returned guard is dropped
    ///
    /// # Errors
    /// Returns [`GomokuError::IllegalMove`] if `cell` is off the board or taken,
    /// leaving the board untouched.
    pub fn play_guarded(&mut self, cell: usize) -> Result<MoveGuard<'_>, GomokuError> {
        self.check_move(cell)?;
        Ok(self.play_scoped(cell))
    }

    // the search walks the tree without copying the board; its candidates are always empty cells
    pub(crate) fn play_scoped(&mut self, cell: usize) -> MoveGuard<'_> {
        debug_assert!(self.is_empty(cell), "scoped move on occupied cell {}", cell);
        self.play(cell);
        MoveGuard { board: self }
    }

    fn play(&mut self, cell: usize) {
        let player = self.side_to_move();
        self.cells[cell] = player.into();
        self.moves[player.index()].push(cell);
        self.hash ^= ZOBRIST_KEYS[player.index()][cell];
    }

    fn undo(&mut self) -> Option<usize> {
        let player = self.last_mover()?;
        let cell = self.moves[player.index()].pop()?;
        self.cells[cell] = Cell::Empty;
        self.hash ^= ZOBRIST_KEYS[player.index()][cell];
        Some(cell)
    }

    /// Current state of the game, a completed line takes precedence over a full board
    pub fn status(&self) -> GameStatus {
        if let (Some(player), Some(cell)) = (self.last_mover(), self.last_move()) {
            if threat::steps_to_win(self, cell, player) == Some(0) {
                return GameStatus::Finished;
            }
        }
        if self.is_full() {
            GameStatus::Draw
        } else {
            GameStatus::Playing
        }
    }

    /// Zobrist hash of the stones of both players
    pub fn hash(&self) -> u64 {
        self.hash
    }

    // key for transposition table, the last move is included as evaluation depends on it
    pub fn key(&self) -> u64 {
        match self.last_move() {
            Some(cell) => self.hash ^ ZOBRIST_KEYS[LAST_MOVE_KEYS][cell],
            None => self.hash,
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(ROWS) {
            let line: String = row
                .iter()
                .map(|cell| match cell {
                    Cell::PlayerOne => 'X',
                    Cell::PlayerTwo => 'O',
                    Cell::Empty => '.',
                })
                .collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// A move played on a borrowed [`Board`], taken back when the guard is dropped
pub struct MoveGuard<'a> {
    board: &'a mut Board,
}

impl Deref for MoveGuard<'_> {
    type Target = Board;

    fn deref(&self) -> &Self::Target {
        self.board
    }
}

impl DerefMut for MoveGuard<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.board
    }
}

impl Drop for MoveGuard<'_> {
    fn drop(&mut self) {
        self.board.undo();
    }
}
