use cozy_chess::Move;
use log::{debug, info, warn};
use rand::{Rng, SeedableRng};
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::time::Duration;
use crate::board::{Position, Rules};
use crate::book::OpeningBook;
use crate::error::{EngineError, Result};
use crate::search::{EvalNoise, NoiseSource, SearchResult, Searcher};
use crate::strength::Strength;

/// Where a decision came from. `Fallback` is the deadline policy's random
/// move and must never be mistaken for a search result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveSource { Book, Search, Fallback }

#[derive(Debug, Clone)]
pub struct Decision {
    pub mv: Move,
    pub uci: String,
    pub source: MoveSource,
    /// Absolute search score, when a search produced one.
    pub score_cp: Option<i32>,
    pub nodes: u64,
}

/// An AI-controlled side: strength, optional opening book and its own
/// random source for book choice and evaluation noise.
pub struct AiPlayer {
    strength: Strength,
    book: Option<OpeningBook>,
    rng: SmallRng,
    think_limit: Option<Duration>,
}

impl AiPlayer {
    pub fn new(rating: i32, seed: u64) -> Self {
        Self { strength: Strength::new(rating), book: None, rng: SmallRng::seed_from_u64(seed), think_limit: None }
    }

    pub fn with_book(mut self, book: OpeningBook) -> Self { self.book = Some(book); self }

    /// Caller-side deadline. Past it, a random legal move is played instead.
    pub fn with_think_limit(mut self, limit: Duration) -> Self { self.think_limit = Some(limit); self }

    pub fn strength(&self) -> Strength { self.strength }

    pub fn update_strength(&mut self, rating: i32) {
        self.strength = Strength::new(rating);
        info!("ai strength set: rating={} depth={}", rating, self.strength.depth());
    }

    pub fn set_book(&mut self, book: Option<OpeningBook>) { self.book = book; }

    /// Picks a move without playing it. `pos` is left exactly as given.
    pub fn decide(&mut self, pos: &mut Position) -> Result<Option<Decision>> {
        if let Some(book) = &self.book {
            if let Some(mv) = book.probe(pos, self.strength.book_horizon(), &mut self.rng) {
                let uci = pos.to_uci(mv);
                info!("book move {}", uci);
                return Ok(Some(Decision { mv, uci, source: MoveSource::Book, score_cp: None, nodes: 0 }));
            }
        }
        let depth = self.strength.depth();
        let noise = EvalNoise::seeded(self.strength.noise_amplitude_cp(), self.rng.gen());
        let mut searcher = Searcher::with_noise(noise);
        let res = match self.think_limit {
            None => searcher.search_depth(pos, depth)?,
            Some(limit) => match search_with_deadline(searcher, pos, depth, limit)? {
                Some(res) => res,
                None => return Ok(self.fallback(pos, limit)),
            },
        };
        Ok(res.bestmove.map(|mv| {
            debug!("search move {} score={:?} nodes={}", mv, res.score_cp, res.nodes);
            Decision { mv, uci: pos.to_uci(mv), source: MoveSource::Search, score_cp: res.score_cp, nodes: res.nodes }
        }))
    }

    /// Decides and plays the move on `pos`.
    pub fn make_move(&mut self, pos: &mut Position) -> Result<Option<Decision>> {
        let decision = self.decide(pos)?;
        if let Some(d) = &decision { pos.apply(d.mv)?; }
        Ok(decision)
    }

    fn fallback(&mut self, pos: &Position, limit: Duration) -> Option<Decision> {
        let moves = pos.legal_moves();
        let mv = moves.choose(&mut self.rng)?.mv;
        warn!("search exceeded {:?}; playing random fallback move", limit);
        Some(Decision { mv, uci: pos.to_uci(mv), source: MoveSource::Fallback, score_cp: None, nodes: 0 })
    }
}

// The search runs on a copy in a worker thread and is not interrupted; a late
// result is simply dropped. A worker that dies without sending is an error,
// not a missed deadline.
fn search_with_deadline<N: NoiseSource + Send + 'static>(
    mut searcher: Searcher<N>,
    pos: &Position,
    depth: u32,
    limit: Duration,
) -> Result<Option<SearchResult>> {
    let mut scratch = pos.clone();
    let (tx, rx) = mpsc::channel();
    std::thread::spawn(move || {
        let res = searcher.search_depth(&mut scratch, depth);
        let _ = tx.send(res);
    });
    match rx.recv_timeout(limit) {
        Ok(res) => res.map(Some),
        Err(RecvTimeoutError::Timeout) => Ok(None),
        Err(RecvTimeoutError::Disconnected) => Err(EngineError::SearchAborted),
    }
}
