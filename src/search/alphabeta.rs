use cozy_chess::{Color, Move};
use log::debug;
use crate::board::Rules;
use crate::error::Result;
use crate::search::eval::{leaf_score, terminal_score};
use crate::search::noise::{NoNoise, NoiseSource};
use crate::search::ordering::{order_moves, ORDERING_MIN_DEPTH};

/// Window bound. Material alone can exceed `MATE_SCORE` with many queens on
/// the board, so this is tied to the integer range rather than the mate score.
const INF: i32 = i32::MAX;

#[derive(Debug, Clone, Copy)]
pub struct SearchParams {
    pub depth: u32,
    /// Alpha-beta cutoffs. Off gives plain minimax over the same tree.
    pub prune: bool,
    pub order_moves: bool,
}

impl Default for SearchParams {
    fn default() -> Self { Self { depth: 1, prune: true, order_moves: true } }
}

#[derive(Default, Debug, Clone)]
pub struct SearchResult {
    pub bestmove: Option<Move>,
    /// Absolute score (positive favours White). `None` when the move was
    /// forced and nothing was searched.
    pub score_cp: Option<i32>,
    pub nodes: u64,
}

/// Depth-limited minimax with alpha-beta pruning over a position it mutates
/// in place through apply/undo pairs.
pub struct Searcher<N: NoiseSource = NoNoise> {
    noise: N,
    nodes: u64,
    prune: bool,
    order: bool,
}

impl Default for Searcher<NoNoise> {
    fn default() -> Self { Self::with_noise(NoNoise) }
}

impl<N: NoiseSource> Searcher<N> {
    pub fn with_noise(noise: N) -> Self { Self { noise, nodes: 0, prune: true, order: true } }

    /// Nodes entered below the root by the last search.
    pub fn nodes(&self) -> u64 { self.nodes }

    pub fn set_prune(&mut self, on: bool) { self.prune = on; }
    pub fn set_order_moves(&mut self, on: bool) { self.order = on; }

    pub fn choose_move<R: Rules>(&mut self, pos: &mut R, depth: u32) -> Result<Option<Move>> {
        Ok(self.search_depth(pos, depth)?.bestmove)
    }

    pub fn search_with_params<R: Rules>(&mut self, pos: &mut R, params: SearchParams) -> Result<SearchResult> {
        self.prune = params.prune;
        self.order = params.order_moves;
        self.search_depth(pos, params.depth)
    }

    /// Searches every root move to `depth` plies (at least one) and returns
    /// the best for the side to move. Ties keep the earlier move in ordering.
    pub fn search_depth<R: Rules>(&mut self, pos: &mut R, depth: u32) -> Result<SearchResult> {
        self.nodes = 0;
        let depth = depth.max(1);
        let mut moves = pos.legal_moves();
        if moves.is_empty() {
            return Ok(SearchResult { bestmove: None, score_cp: terminal_score(&*pos, 0), nodes: 0 });
        }
        if moves.len() == 1 {
            return Ok(SearchResult { bestmove: Some(moves[0].mv), score_cp: None, nodes: 0 });
        }
        if self.order { order_moves(&mut moves); }

        // Full window at the root: every sibling is searched, no cutoff here.
        let maximizing = pos.turn() == Color::White;
        let mut alpha = -INF;
        let mut beta = INF;
        let mut best: Option<(Move, i32)> = None;
        for m in &moves {
            pos.apply(m.mv)?;
            let r = self.minimax(pos, depth - 1, 1, alpha, beta, !maximizing);
            pos.undo()?;
            let score = r?;
            let improves = match best {
                None => true,
                Some((_, b)) => if maximizing { score > b } else { score < b },
            };
            if improves { best = Some((m.mv, score)); }
            if maximizing { alpha = alpha.max(score); } else { beta = beta.min(score); }
        }

        let (bestmove, score) = match best { Some((m, s)) => (Some(m), Some(s)), None => (None, None) };
        debug!("search depth={} nodes={} score={:?} best={:?}", depth, self.nodes, score, bestmove.map(|m| format!("{}", m)));
        Ok(SearchResult { bestmove, score_cp: score, nodes: self.nodes })
    }

    fn minimax<R: Rules>(&mut self, pos: &mut R, depth: u32, ply: u32, mut alpha: i32, mut beta: i32, maximizing: bool) -> Result<i32> {
        self.nodes += 1;
        if depth == 0 { return Ok(leaf_score(&*pos, ply, &mut self.noise)); }
        if let Some(t) = terminal_score(&*pos, ply) { return Ok(t); }

        let mut moves = pos.legal_moves();
        if self.order && depth >= ORDERING_MIN_DEPTH { order_moves(&mut moves); }

        let mut best = if maximizing { -INF } else { INF };
        for m in &moves {
            pos.apply(m.mv)?;
            // Undo before propagating so this frame never leaves its move applied.
            let r = self.minimax(pos, depth - 1, ply + 1, alpha, beta, !maximizing);
            pos.undo()?;
            let score = r?;
            if maximizing {
                best = best.max(score);
                alpha = alpha.max(best);
            } else {
                best = best.min(score);
                beta = beta.min(best);
            }
            if self.prune && beta <= alpha { break; }
        }
        Ok(best)
    }
}
