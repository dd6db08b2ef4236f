use cozy_chess::Color;
use log::{debug, warn};
use std::io::{self, BufRead, Write};
use crate::board::Position;
use crate::book::OpeningBook;
use crate::config::EngineConfig;
use crate::player::{AiPlayer, MoveSource};
use crate::search::Searcher;
use crate::search::noise::EvalNoise;

pub struct UciEngine {
    pos: Position,
    ai: AiPlayer,
    /// Installed when `OwnBook` is switched on, whatever the startup setting.
    book: OpeningBook,
    seed: u64,
}

impl UciEngine {
    pub fn new(conf: &EngineConfig) -> crate::error::Result<Self> {
        Ok(Self {
            pos: Position::startpos(),
            ai: conf.build_player()?,
            book: conf.load_book()?,
            seed: conf.seed.unwrap_or(0),
        })
    }

    pub fn position(&self) -> &Position { &self.pos }

    fn cmd_uci<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "id name EloBot")?;
        writeln!(out, "id author EloBot Team")?;
        writeln!(out, "option name Elo type spin default {} min 0 max 3200", self.ai.strength().rating)?;
        writeln!(out, "option name OwnBook type check default true")?;
        writeln!(out, "uciok")
    }

    fn cmd_position(&mut self, args: &str) {
        // Supports: 'position startpos [moves ...]' and 'position fen <fen> [moves ...]'
        let mut tokens = args.split_whitespace();
        let base = match tokens.next() {
            Some("startpos") => Position::startpos(),
            Some("fen") => {
                let fen_fields: Vec<&str> = tokens.by_ref().take_while(|t| *t != "moves").collect();
                match Position::from_fen(&fen_fields.join(" ")) {
                    Ok(p) => p,
                    Err(e) => { warn!("ignoring position: {}", e); return; }
                }
            }
            _ => return,
        };
        let mut pos = base;
        for m in tokens.filter(|t| *t != "moves") {
            if let Err(e) = pos.make_move_uci(m) { warn!("ignoring position: {}", e); return; }
        }
        self.pos = pos;
    }

    fn cmd_setoption(&mut self, args: &str) {
        // setoption name <Name> value <v>
        let lower = args.to_ascii_lowercase();
        let mut parts = lower.splitn(2, " value ");
        let name = parts.next().unwrap_or("").trim().trim_start_matches("name").trim().to_string();
        let value = parts.next().unwrap_or("").trim().to_string();
        match name.as_str() {
            "elo" => match value.parse::<i32>() {
                Ok(r) => self.ai.update_strength(r),
                Err(_) => warn!("bad Elo value: {}", value),
            },
            "ownbook" => self.ai.set_book(if value == "true" { Some(self.book.clone()) } else { None }),
            _ => debug!("unknown option: {}", name),
        }
    }

    fn cmd_go<W: Write>(&mut self, args: &str, out: &mut W) -> anyhow::Result<()> {
        // Support: go depth N; anything else plays at the configured strength.
        let mut depth: Option<u32> = None;
        let mut tokens = args.split_whitespace();
        while let Some(tok) = tokens.next() {
            if tok == "depth" { depth = tokens.next().and_then(|s| s.parse::<u32>().ok()); }
        }
        let sign = if self.pos.side_to_move() == Color::White { 1 } else { -1 };
        let (best, score, nodes, d) = match depth {
            Some(d) => {
                self.seed = self.seed.wrapping_add(1);
                let noise = EvalNoise::seeded(self.ai.strength().noise_amplitude_cp(), self.seed);
                let res = Searcher::with_noise(noise).search_depth(&mut self.pos, d)?;
                (res.bestmove.map(|m| self.pos.to_uci(m)), res.score_cp, res.nodes, d.max(1))
            }
            None => match self.ai.decide(&mut self.pos)? {
                Some(dec) => {
                    let d = if dec.source == MoveSource::Search { self.ai.strength().depth() } else { 0 };
                    (Some(dec.uci), dec.score_cp, dec.nodes, d)
                }
                None => (None, None, 0, 0),
            },
        };
        if let Some(s) = score { writeln!(out, "info depth {} score cp {} nodes {}", d, s * sign, nodes)?; }
        match best {
            Some(m) => writeln!(out, "bestmove {}", m)?,
            None => writeln!(out, "bestmove 0000")?,
        }
        Ok(())
    }

    /// Handles one command line. Returns `false` on `quit`.
    pub fn handle_line<W: Write>(&mut self, line: &str, out: &mut W) -> anyhow::Result<bool> {
        let line = line.trim();
        match line {
            "" => {}
            "uci" => self.cmd_uci(out)?,
            "isready" => writeln!(out, "readyok")?,
            "ucinewgame" => self.pos = Position::startpos(),
            "quit" => return Ok(false),
            "stop" => {}
            _ => {
                if let Some(rest) = line.strip_prefix("position ") { self.cmd_position(rest); }
                else if let Some(rest) = line.strip_prefix("setoption ") { self.cmd_setoption(rest); }
                else if line == "go" { self.cmd_go("", out)?; }
                else if let Some(rest) = line.strip_prefix("go ") { self.cmd_go(rest, out)?; }
                else { debug!("unknown command: {}", line); }
            }
        }
        out.flush()?;
        Ok(true)
    }

    pub fn run_loop(&mut self) -> anyhow::Result<()> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        for line in stdin.lock().lines() {
            let line = line?;
            if !self.handle_line(&line, &mut stdout.lock())? { break; }
        }
        Ok(())
    }
}
