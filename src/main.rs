use anyhow::{Context, Result};
use indicatif::*;
use log::info;

use std::env;
use std::io::{stdin, stdout, Stdin, Write};
use std::time::Instant;

use gomoku_ai::{
    arena::{play_matches, Tally},
    board::to_row_col,
    strategy::{DummyStrategy, MtdStrategy, RandomStrategy, Strategy},
    *,
};

mod terminal;

/// Longest arena game, in moves of both sides together
const ARENA_MAX_MOVES: usize = 200;

fn main() -> Result<()> {
    env_logger::init();

    let config = config_from_env()?;
    let stdin = stdin();

    println!("Welcome to Gomoku\n");
    info!(
        "Searching {} plies deep with a {} slot transposition table",
        config.max_depth, config.table_size
    );

    loop {
        let answer = prompt(&stdin, "Play a game (p) or run an AI arena (a)? p/a: ")?;
        match answer.to_lowercase().chars().next() {
            Some('p') => return play_game(&stdin, &config),
            Some('a') => return run_arena(&stdin, &config),
            _ => println!("Unknown answer given"),
        }
    }
}

/// Reads search settings from `GOMOKU_MAX_DEPTH` and `GOMOKU_TABLE_SIZE`
fn config_from_env() -> Result<SearchConfig> {
    let mut config = SearchConfig::default();
    if let Ok(depth) = env::var("GOMOKU_MAX_DEPTH") {
        config.max_depth = depth
            .trim()
            .parse()
            .with_context(|| format!("GOMOKU_MAX_DEPTH={} is not a valid depth", depth))?;
    }
    if let Ok(size) = env::var("GOMOKU_TABLE_SIZE") {
        config.table_size = size
            .trim()
            .parse()
            .with_context(|| format!("GOMOKU_TABLE_SIZE={} is not a valid table size", size))?;
    }
    Ok(config)
}

fn prompt(stdin: &Stdin, question: &str) -> Result<String> {
    print!("{}", question);
    stdout().flush().expect("failed to flush to stdout!");
    let mut buffer = String::new();
    stdin.read_line(&mut buffer)?;
    Ok(buffer.trim().to_string())
}

fn ask_yes_no(stdin: &Stdin, question: &str) -> Result<bool> {
    loop {
        let answer = prompt(stdin, question)?;
        match answer.to_lowercase().chars().next() {
            Some('y') => return Ok(true),
            Some('n') => return Ok(false),
            _ => println!("Unknown answer given"),
        }
    }
}

fn play_game(stdin: &Stdin, config: &SearchConfig) -> Result<()> {
    let ai_players = (
        ask_yes_no(stdin, "Is player 1 AI controlled? y/n: ")?,
        ask_yes_no(stdin, "Is player 2 AI controlled? y/n: ")?,
    );

    let mut board = Board::new();
    let mut engine = MtdStrategy::new(config);

    // game loop
    loop {
        terminal::display(&board).expect("Failed to draw board!");

        match board.status() {
            GameStatus::Playing => {
                let player = board.side_to_move();
                let next_move = if (player == Player::One && ai_players.0)
                    || (player == Player::Two && ai_players.1)
                {
                    println!("AI is thinking...");
                    stdout().flush().expect("Failed to flush to stdout!");

                    let start = Instant::now();
                    let best_move = engine.next_move(&board)?;
                    let (row, col) = to_row_col(best_move);
                    println!(
                        "{} plays {} {} ({:.3}s)",
                        player,
                        row,
                        col,
                        start.elapsed().as_secs_f64()
                    );
                    best_move
                } else {
                    let input = prompt(stdin, &format!("{} move input (row col) > ", player))?;
                    match terminal::parse_move(&input) {
                        Err(err) => {
                            println!("{}", err);
                            continue;
                        }
                        Ok(cell) => cell,
                    }
                };

                if let Err(err) = board.make_move(next_move) {
                    println!("{}", err);
                    // try the move again
                    continue;
                }
            }

            // end states
            GameStatus::Finished => {
                let winner = board
                    .last_mover()
                    .context("a finished game has a last mover")?;
                println!("{} wins!", winner);
                break;
            }
            GameStatus::Draw => {
                println!("Draw!");
                break;
            }
        }
    }
    Ok(())
}

fn run_arena(stdin: &Stdin, config: &SearchConfig) -> Result<()> {
    let games = loop {
        let answer = prompt(stdin, "How many games? ")?;
        match answer.parse::<usize>() {
            Ok(games) if games > 0 => break games,
            _ => println!("Invalid number: {}", answer),
        }
    };
    let dummy_opponent = ask_yes_no(
        stdin,
        "Should the AI face the line-building dummy (y) or random play (n)? y/n: ",
    )?;

    let progress = ProgressBar::new(games as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("Playing games: {bar:40.cyan/blue} {pos}/{len} ~{eta} remaining")
            .progress_chars("█▓▒░  "),
    );

    let start = Instant::now();
    let on_finish = |_: &arena::MatchResult| progress.inc(1);
    let results = if dummy_opponent {
        // cycle through the eight line directions
        let directions = [(0, 1), (1, 1), (1, 0), (1, -1), (0, -1), (-1, -1), (-1, 0), (-1, 1)];
        let make_dummy = |game: usize| {
            let (row_inc, col_inc) = directions[game % directions.len()];
            DummyStrategy::new(row_inc, col_inc).expect("arena directions are unit steps")
        };
        play_matches(
            games,
            |_| MtdStrategy::new(config),
            make_dummy,
            ARENA_MAX_MOVES,
            on_finish,
        )?
    } else {
        play_matches(
            games,
            |_| MtdStrategy::new(config),
            |_| RandomStrategy::new(),
            ARENA_MAX_MOVES,
            on_finish,
        )?
    };
    progress.finish();

    let tally = Tally::from_results(&results);
    println!(
        "{} games in {:.1}s: AI won {}, opponent won {}, {} drawn, {} unfinished",
        tally.games(),
        start.elapsed().as_secs_f64(),
        tally.first_wins,
        tally.second_wins,
        tally.draws,
        tally.unfinished
    );
    Ok(())
}
