use cozy_chess::{Color, Square};
use crate::board::Rules;
use crate::search::noise::NoiseSource;
use crate::search::pst::square_value;

// Mate scoring helpers
pub const MATE_SCORE: i32 = 10_000;
pub const DRAW_SCORE: i32 = 0;

/// Score of a finished game, absolute (positive means White is winning), or
/// `None` while play can continue. A mate `ply` plies below the root scores
/// `MATE_SCORE - ply` so nearer mates rank higher.
pub fn terminal_score<R: Rules + ?Sized>(pos: &R, ply: u32) -> Option<i32> {
    if pos.is_checkmate() {
        let mag = MATE_SCORE - ply as i32;
        return Some(if pos.turn() == Color::White { -mag } else { mag });
    }
    if pos.is_draw() { return Some(DRAW_SCORE); }
    None
}

// Side-agnostic material + piece-square sum: positive means White is better.
pub fn material_pst_cp<R: Rules + ?Sized>(pos: &R) -> i32 {
    Square::ALL
        .iter()
        .filter_map(|&sq| pos.piece_at(sq).map(|(piece, color)| square_value(piece, color, sq)))
        .sum()
}

/// Deterministic evaluation, for display (no noise ever).
pub fn evaluate<R: Rules + ?Sized>(pos: &R) -> i32 {
    terminal_score(pos, 0).unwrap_or_else(|| material_pst_cp(pos))
}

/// Evaluation used for move selection: non-terminal scores get one fresh
/// noise sample. Terminal scores are exact.
pub fn evaluate_for_search<R: Rules + ?Sized, N: NoiseSource + ?Sized>(pos: &R, noise: &mut N) -> i32 {
    leaf_score(pos, 0, noise)
}

pub(crate) fn leaf_score<R: Rules + ?Sized, N: NoiseSource + ?Sized>(pos: &R, ply: u32, noise: &mut N) -> i32 {
    match terminal_score(pos, ply) {
        Some(v) => v,
        None => material_pst_cp(pos) + noise.sample_cp(),
    }
}

/// Height of an evaluation bar in percent: 50 is level, +-20 pawns fills it,
/// clamped to [5, 95] so both colours stay visible.
pub fn eval_bar_percent(score_cp: i32) -> f64 {
    let pawns = score_cp as f64 / 100.0;
    (50.0 + (pawns / 20.0) * 50.0).clamp(5.0, 95.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eval_bar_is_centred_and_clamped() {
        assert_eq!(eval_bar_percent(0), 50.0);
        assert_eq!(eval_bar_percent(1000), 75.0);
        assert_eq!(eval_bar_percent(-1000), 25.0);
        assert_eq!(eval_bar_percent(MATE_SCORE), 95.0);
        assert_eq!(eval_bar_percent(-MATE_SCORE), 5.0);
    }
}
