use cozy_chess::Move;
use log::info;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::path::Path;
use crate::board::Position;
use crate::error::Result;

/// A named line of book moves in UCI notation, from the standard start position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpeningLine {
    pub name: String,
    pub moves: Vec<String>,
}

const STANDARD_LINES: &[(&str, &[&str])] = &[
    ("Italian Game", &["e2e4", "e7e5", "g1f3", "b8c6", "f1c4", "f8c5", "e1g1", "g8f6"]),
    ("Ruy Lopez", &["e2e4", "e7e5", "g1f3", "b8c6", "f1b5", "a7a6", "b5a4", "g8f6"]),
    ("Queen's Gambit", &["d2d4", "d7d5", "c2c4", "e7e6", "b1c3", "g8f6", "c1g5", "f8e7"]),
    ("Sicilian Defense - Dragon Variation", &["e2e4", "c7c5", "g1f3", "d7d6", "d2d4", "c5d4", "f3d4", "g8f6"]),
    ("French Defense", &["e2e4", "e7e6", "d2d4", "d7d5", "b1c3", "f8b4", "e4e5", "c7c5"]),
    ("King's Indian Defense", &["d2d4", "g8f6", "c2c4", "g7g6", "b1c3", "f8g7", "e2e4", "d7d6"]),
    ("English Opening", &["c2c4", "e7e5", "b1c3", "g8f6", "g2g3", "d7d5", "c4d5", "f6d5"]),
    ("Caro-Kann Defense", &["e2e4", "c7c6", "d2d4", "d7d5", "b1c3", "d5e4", "c3e4", "c8f5"]),
    ("Scotch Game", &["e2e4", "e7e5", "g1f3", "b8c6", "d2d4", "e5d4", "f3d4", "f8c5"]),
    ("Queen's Indian Defense", &["d2d4", "g8f6", "c2c4", "e7e6", "g1f3", "b7b6", "g2g3", "c8b7"]),
    ("Nimzo-Indian Defense", &["d2d4", "g8f6", "c2c4", "e7e6", "b1c3", "f8b4", "e2e3", "e8g8"]),
    ("Pirc Defense", &["e2e4", "d7d6", "d2d4", "g8f6", "b1c3", "g7g6", "f2f4", "f8g7"]),
    ("Alekhine's Defense", &["e2e4", "g8f6", "e4e5", "f6d5", "d2d4", "d7d6", "g1f3", "c8g4"]),
    ("Benoni Defense", &["d2d4", "g8f6", "c2c4", "c7c5", "d4d5", "e7e6", "b1c3", "e6d5"]),
    ("Dutch Defense", &["d2d4", "f7f5", "g2g3", "g8f6", "f1g2", "e7e6", "g1f3", "f8e7"]),
    ("Scandinavian Defense", &["e2e4", "d7d5", "e4d5", "d8d5", "b1c3", "d5a5", "d2d4", "g8f6"]),
    ("Vienna Game", &["e2e4", "e7e5", "b1c3", "g8f6", "f2f4", "d7d5", "f4e5", "f6e4"]),
    ("King's Gambit", &["e2e4", "e7e5", "f2f4", "e5f4", "g1f3", "g7g5", "h2h4", "g5g4"]),
    ("London System", &["d2d4", "d7d5", "g1f3", "g8f6", "c1f4", "c7c5", "e2e3", "b8c6"]),
    ("Catalan Opening", &["d2d4", "g8f6", "c2c4", "e7e6", "g2g3", "d7d5", "f1g2", "f8e7"]),
];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OpeningBook {
    pub lines: Vec<OpeningLine>,
}

impl OpeningBook {
    /// Twenty classical openings, eight plies each.
    pub fn standard() -> Self {
        let lines = STANDARD_LINES
            .iter()
            .map(|(name, moves)| OpeningLine {
                name: name.to_string(),
                moves: moves.iter().map(|m| m.to_string()).collect(),
            })
            .collect();
        Self { lines }
    }

    /// Loads a JSON book: `{"lines": [{"name": "...", "moves": ["e2e4", ...]}]}`.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let book: Self = serde_json::from_str(&text)?;
        info!("loaded {} book lines from {}", book.lines.len(), path.as_ref().display());
        Ok(book)
    }

    pub fn len(&self) -> usize { self.lines.len() }
    pub fn is_empty(&self) -> bool { self.lines.is_empty() }

    /// Distinct next moves of every line that strictly extends `played`, in
    /// book order.
    pub fn replies(&self, played: &[String]) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for line in &self.lines {
            if line.moves.len() > played.len() && line.moves[..played.len()] == *played {
                let next = line.moves[played.len()].as_str();
                if !out.contains(&next) { out.push(next); }
            }
        }
        out
    }

    /// A book reply for `pos`, chosen uniformly among the candidates, while
    /// fewer than `horizon` plies have been played. Never mutates `pos`; any
    /// miss returns `None` so the caller falls through to search.
    pub fn probe<R: Rng + ?Sized>(&self, pos: &Position, horizon: usize, rng: &mut R) -> Option<Move> {
        if !pos.started_from_startpos() || pos.ply_count() >= horizon { return None; }
        let played = pos.history_uci();
        let legal: Vec<Move> = self.replies(&played).into_iter().filter_map(|u| pos.find_move_uci(u)).collect();
        legal.choose(rng).copied()
    }
}
