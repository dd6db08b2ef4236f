pub mod alphabeta;
pub mod eval;
pub mod noise;
pub mod ordering;
pub mod pst;

pub use alphabeta::{SearchParams, SearchResult, Searcher};
pub use eval::{evaluate, evaluate_for_search, MATE_SCORE};
pub use noise::{EvalNoise, NoNoise, NoiseSource};
