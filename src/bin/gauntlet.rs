use anyhow::Result;
use clap::Parser;
use cozy_chess::Color;
use elobot::elo::{new_rating, GameOutcome};
use elobot::player::AiPlayer;
use elobot::book::OpeningBook;
use elobot::{Position, Rules};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "elobot-gauntlet", about = "Play engine-vs-engine games at two ratings and track rating changes")]
struct Args {
    #[arg(long, default_value_t = 1200)]
    rating_a: i32,
    #[arg(long, default_value_t = 1600)]
    rating_b: i32,
    #[arg(long, default_value_t = 10)]
    games: usize,
    /// Games longer than this are scored as draws
    #[arg(long, default_value_t = 200)]
    max_plies: usize,
    #[arg(long, default_value_t = 42)]
    seed: u64,
    #[arg(long, default_value_t = false)]
    no_book: bool,
    /// Optional JSON summary output
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct GameRecord {
    white: char,
    moves: Vec<String>,
    /// From A's point of view
    outcome: GameOutcome,
}

#[derive(Debug, Serialize)]
struct Summary {
    start_a: i32,
    start_b: i32,
    final_a: i32,
    final_b: i32,
    wins_a: usize,
    draws: usize,
    wins_b: usize,
    games: Vec<GameRecord>,
}

fn play_game(white: &mut AiPlayer, black: &mut AiPlayer, max_plies: usize) -> Result<(Vec<String>, Option<Color>)> {
    let mut pos = Position::startpos();
    while pos.ply_count() < max_plies && !pos.is_game_over() {
        let mover = if pos.turn() == Color::White { &mut *white } else { &mut *black };
        if mover.make_move(&mut pos)?.is_none() { break; }
    }
    let winner = if pos.is_checkmate() { Some(!pos.turn()) } else { None };
    Ok((pos.history_uci(), winner))
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let book = if args.no_book { None } else { Some(OpeningBook::standard()) };
    let mut a = AiPlayer::new(args.rating_a, args.seed);
    let mut b = AiPlayer::new(args.rating_b, args.seed ^ 0x9E37_79B9_7F4A_7C15);
    a.set_book(book.clone());
    b.set_book(book);

    let pb = ProgressBar::new(args.games as u64);
    pb.set_style(ProgressStyle::with_template("{bar:40} {pos}/{len} {msg}")?.progress_chars("=>-"));

    let (mut ra, mut rb) = (args.rating_a, args.rating_b);
    let mut summary = Summary { start_a: ra, start_b: rb, final_a: ra, final_b: rb, wins_a: 0, draws: 0, wins_b: 0, games: Vec::new() };
    for g in 0..args.games {
        let a_white = g % 2 == 0;
        let (moves, winner) = if a_white { play_game(&mut a, &mut b, args.max_plies)? } else { play_game(&mut b, &mut a, args.max_plies)? };
        let outcome = match winner {
            None => GameOutcome::Draw,
            Some(c) if (c == Color::White) == a_white => GameOutcome::Win,
            Some(_) => GameOutcome::Loss,
        };
        match outcome {
            GameOutcome::Win => summary.wins_a += 1,
            GameOutcome::Draw => summary.draws += 1,
            GameOutcome::Loss => summary.wins_b += 1,
        }
        let (na, nb) = (new_rating(ra, rb, outcome), new_rating(rb, ra, outcome.reversed()));
        ra = na;
        rb = nb;
        summary.games.push(GameRecord { white: if a_white { 'A' } else { 'B' }, moves, outcome });
        pb.set_message(format!("A {} / B {}", ra, rb));
        pb.inc(1);
    }
    pb.finish();

    summary.final_a = ra;
    summary.final_b = rb;
    println!("A ({} -> {}): +{} ={} -{}", summary.start_a, ra, summary.wins_a, summary.draws, summary.wins_b);
    println!("B ({} -> {})", summary.start_b, rb);
    if let Some(path) = &args.out {
        std::fs::write(path, serde_json::to_string_pretty(&summary)?)?;
        eprintln!("Wrote summary to {}", path.display());
    }
    Ok(())
}
