pub mod cozy;

pub use cozy::Position;

use cozy_chess::{Color, Move, Piece, Square};
use crate::error::Result;

/// A legal move plus the ordering hints the search cares about, filled in once
/// by the rules engine when moves are generated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveInfo {
    pub mv: Move,
    pub piece: Piece,
    pub is_capture: bool,
    pub is_check: bool,
    pub promotion: Option<Piece>,
}

/// The rules-engine surface the search and evaluation consume.
///
/// Implementations own the position and mutate it in place; every `apply`
/// issued by a caller is paired with exactly one `undo`.
pub trait Rules {
    fn legal_moves(&self) -> Vec<MoveInfo>;
    fn has_legal_moves(&self) -> bool;
    fn apply(&mut self, mv: Move) -> Result<()>;
    /// Reverses the last applied move and returns it.
    fn undo(&mut self) -> Result<Move>;
    fn turn(&self) -> Color;
    fn in_check(&self) -> bool;
    fn is_threefold_repetition(&self) -> bool;
    fn is_insufficient_material(&self) -> bool;
    fn is_fifty_moves(&self) -> bool;
    fn piece_at(&self, sq: Square) -> Option<(Piece, Color)>;
    fn fen(&self) -> String;

    fn legal_moves_from(&self, from: Square) -> Vec<MoveInfo> {
        self.legal_moves().into_iter().filter(|m| m.mv.from == from).collect()
    }

    fn is_checkmate(&self) -> bool { self.in_check() && !self.has_legal_moves() }

    fn is_stalemate(&self) -> bool { !self.in_check() && !self.has_legal_moves() }

    fn is_draw(&self) -> bool {
        self.is_fifty_moves()
            || self.is_insufficient_material()
            || self.is_threefold_repetition()
            || self.is_stalemate()
    }

    fn is_game_over(&self) -> bool { self.is_checkmate() || self.is_draw() }
}
