//! Games between two strategies

use log::debug;
use rayon::prelude::*;

use crate::{
    board::{Board, GameStatus, Player},
    error::GomokuError,
    strategy::Strategy,
};

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Outcome {
    Win(Player),
    Draw,
    /// The move limit was reached with the game still in progress
    Unfinished,
}

#[derive(Clone, Debug)]
pub struct MatchResult {
    pub outcome: Outcome,
    pub board: Board,
    /// The number of moves played by both sides together
    pub moves: usize,
}

/// Plays `first` as player one against `second` from an empty board
///
/// The game stops when a player completes five in a row, the board is full, or
/// `max_moves` moves have been played in total.
///
/// # Errors
/// Fails if either strategy fails or returns an illegal move.
pub fn play_match<S1, S2>(
    first: &mut S1,
    second: &mut S2,
    max_moves: usize,
) -> Result<MatchResult, GomokuError>
where
    S1: Strategy + ?Sized,
    S2: Strategy + ?Sized,
{
    let mut board = Board::new();
    let mut outcome = Outcome::Unfinished;

    while board.num_moves() < max_moves {
        let player = board.side_to_move();
        let cell = match player {
            Player::One => first.next_move(&board)?,
            Player::Two => second.next_move(&board)?,
        };
        board.make_move(cell)?;

        match board.status() {
            GameStatus::Playing => continue,
            GameStatus::Finished => outcome = Outcome::Win(player),
            GameStatus::Draw => outcome = Outcome::Draw,
        }
        break;
    }

    debug!("Match ended after {} moves: {:?}", board.num_moves(), outcome);
    Ok(MatchResult {
        outcome,
        moves: board.num_moves(),
        board,
    })
}

/// Plays `games` independent matches in parallel
///
/// `make_first` and `make_second` build the strategies for the game with the
/// given index, so every game owns its players. `on_finish` is called as each
/// game ends. Results are returned in game order.
pub fn play_matches<S1, S2, F1, F2, C>(
    games: usize,
    make_first: F1,
    make_second: F2,
    max_moves: usize,
    on_finish: C,
) -> Result<Vec<MatchResult>, GomokuError>
where
    S1: Strategy,
    S2: Strategy,
    F1: Fn(usize) -> S1 + Sync,
    F2: Fn(usize) -> S2 + Sync,
    C: Fn(&MatchResult) + Sync,
{
    (0..games)
        .into_par_iter()
        .map(|game| {
            let mut first = make_first(game);
            let mut second = make_second(game);
            let result = play_match(&mut first, &mut second, max_moves)?;
            on_finish(&result);
            Ok(result)
        })
        .collect()
}

/// Outcome counts over a set of matches
#[derive(Copy, Clone, Default, Eq, PartialEq, Debug)]
pub struct Tally {
    pub first_wins: usize,
    pub second_wins: usize,
    pub draws: usize,
    pub unfinished: usize,
}

impl Tally {
    pub fn from_results(results: &[MatchResult]) -> Self {
        let mut tally = Self::default();
        for result in results {
            match result.outcome {
                Outcome::Win(Player::One) => tally.first_wins += 1,
                Outcome::Win(Player::Two) => tally.second_wins += 1,
                Outcome::Draw => tally.draws += 1,
                Outcome::Unfinished => tally.unfinished += 1,
            }
        }
        tally
    }

    pub fn games(&self) -> usize {
        self.first_wins + self.second_wins + self.draws + self.unfinished
    }
}
