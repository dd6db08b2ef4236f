use thiserror::Error;

/// Errors surfaced by the library. Binaries wrap these in `anyhow`.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("FEN error: {0}")]
    Fen(String),
    /// The rules engine refused a move. Moves taken from `legal_moves()` never
    /// trigger this, so seeing it mid-search means the move stack is broken.
    #[error("illegal move: {0}")]
    IllegalMove(String),
    #[error("nothing to undo")]
    EmptyHistory,
    #[error("it is not the human player's turn")]
    NotYourTurn,
    /// The deadline worker stopped without sending a result.
    #[error("search worker stopped without a result")]
    SearchAborted,
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
