// Rating-scaled chess opponent: minimax + alpha-beta over cozy-chess
pub mod board;
pub mod book;
pub mod config;
pub mod elo;
pub mod error;
pub mod perft;
pub mod player;
pub mod search;
pub mod session;
pub mod strength;
pub mod uci;

// Re-exports for the UI-facing entry points
pub use board::{MoveInfo, Position, Rules};
pub use error::{EngineError, Result};
pub use search::{evaluate, evaluate_for_search, Searcher};
pub use strength::depth_for_rating;

/// Best move for the side to move at `depth` plies, without evaluation noise.
/// `None` when there is no legal move; the position is restored on return.
pub fn choose_move<R: Rules>(pos: &mut R, depth: u32) -> Result<Option<cozy_chess::Move>> {
    Searcher::default().choose_move(pos, depth)
}
