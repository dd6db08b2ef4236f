use anyhow::Result;
use clap::Parser;
use cozy_chess::{Color, File, Piece, Rank, Square};
use elobot::config::EngineConfig;
use elobot::player::MoveSource;
use elobot::session::{GameMode, GameStatus, Session};
use elobot::{Position, Rules};
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(author, version, about = "Play chess against a rating-scaled engine", long_about = None)]
struct Args {
    /// JSON config file (see EngineConfig)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Engine rating; sets search depth and evaluation noise
    #[arg(long)]
    rating: Option<i32>,

    /// Game mode: 'ai' or 'human'
    #[arg(long, default_value = "ai")]
    mode: String,

    /// Your color: 'w' for white, 'b' for black
    #[arg(long, default_value = "w")]
    color: String,

    /// Disable the opening book
    #[arg(long)]
    no_book: bool,

    /// Deadline per engine move in milliseconds
    #[arg(long)]
    think_ms: Option<u64>,

    /// RNG seed for book choice and evaluation noise
    #[arg(long)]
    seed: Option<u64>,

    /// Starting FEN position
    #[arg(long)]
    fen: Option<String>,
}

fn parse_color(color_str: &str) -> Result<Color> {
    match color_str.to_lowercase().as_str() {
        "w" | "white" => Ok(Color::White),
        "b" | "black" => Ok(Color::Black),
        _ => anyhow::bail!("Invalid color: use 'w' or 'b'"),
    }
}

fn parse_mode(mode_str: &str) -> Result<GameMode> {
    match mode_str.to_lowercase().as_str() {
        "ai" => Ok(GameMode::VsAi),
        "human" | "h" => Ok(GameMode::VsHuman),
        _ => anyhow::bail!("Invalid mode: use 'ai' or 'human'"),
    }
}

fn piece_char(piece: Piece, color: Color) -> char {
    let c = match piece {
        Piece::Pawn => 'p',
        Piece::Knight => 'n',
        Piece::Bishop => 'b',
        Piece::Rook => 'r',
        Piece::Queen => 'q',
        Piece::King => 'k',
    };
    if color == Color::White { c.to_ascii_uppercase() } else { c }
}

fn print_board(pos: &Position, flip: bool) {
    println!();
    for r in 0..8 {
        let rank = if flip { r } else { 7 - r };
        print!("{} ", rank + 1);
        for f in 0..8 {
            let file = if flip { 7 - f } else { f };
            let sq = Square::new(File::index(file), Rank::index(rank));
            let ch = pos.piece_at(sq).map(|(p, c)| piece_char(p, c)).unwrap_or('.');
            print!("{} ", ch);
        }
        println!();
    }
    println!("  {}", if flip { "h g f e d c b a" } else { "a b c d e f g h" });
    println!("{}", pos.fen());
}

fn print_help() {
    println!("Commands: <move> (e.g. e2e4, e7e8q) | moves <square> | undo | new | elo <n> | eval | help | quit");
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut conf = match &args.config {
        Some(p) => EngineConfig::from_json_file(p)?,
        None => EngineConfig::default(),
    }
    .apply_env();
    if let Some(r) = args.rating { conf.rating = r; }
    if args.no_book { conf.own_book = false; }
    if args.think_ms.is_some() { conf.think_ms = args.think_ms; }
    if args.seed.is_some() { conf.seed = args.seed; }

    let human_color = parse_color(&args.color)?;
    let mode = parse_mode(&args.mode)?;
    let mut session = Session::new(conf.build_player()?, mode, human_color);
    if let Some(fen) = &args.fen {
        session = session.with_position(Position::from_fen(fen)?);
    }

    println!("EloBot: rating {} (depth {})", conf.rating, session.ai().strength().depth());
    print_help();

    loop {
        print_board(session.position(), human_color == Color::Black);
        let status = session.status();
        println!("{}  [eval bar {:.0}%]", status, session.eval_bar_percent());
        if !matches!(status, GameStatus::ToMove { .. }) {
            print!("Game over. 'new' to restart, 'undo' to take back, 'quit' to exit: ");
        } else if session.ai_to_move() {
            println!("Thinking...");
            let t0 = Instant::now();
            if let Some(d) = session.play_ai()? {
                let tag = match d.source { MoveSource::Book => " (book)", MoveSource::Search => "", MoveSource::Fallback => " (timeout fallback)" };
                println!("Engine plays: {}{}  [{:.2}s, {} nodes]", d.uci, tag, t0.elapsed().as_secs_f32(), d.nodes);
            }
            continue;
        } else {
            print!("Your move: ");
        }
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 { break; }
        let input = input.trim();
        let mut words = input.split_whitespace();
        match words.next() {
            None => continue,
            Some("quit") | Some("exit") => break,
            Some("help") => print_help(),
            Some("new") => session.new_game(),
            Some("undo") => match session.takeback() {
                Ok(n) => println!("Took back {} ply", n),
                Err(e) => println!("{}", e),
            },
            Some("moves") => match words.next().and_then(|s| s.parse::<Square>().ok()) {
                Some(sq) => {
                    let pos = session.position();
                    let targets: Vec<String> = pos.legal_moves_from(sq).iter().map(|m| pos.to_uci(m.mv)).collect();
                    println!("{}", if targets.is_empty() { "no legal moves".to_string() } else { targets.join(" ") });
                }
                None => println!("Usage: moves <square>"),
            },
            Some("eval") => println!("Evaluation: {} cp", elobot::evaluate(session.position())),
            Some("elo") => match words.next().and_then(|s| s.parse::<i32>().ok()) {
                Some(r) => { session.set_rating(r); println!("Rating {} (depth {})", r, session.ai().strength().depth()); }
                None => println!("Usage: elo <rating>"),
            },
            Some(mv) => {
                if let Err(e) = session.play_human(mv) { println!("{}", e); }
            }
        }
    }

    println!("Thanks for playing!");
    Ok(())
}
