use serde::{Deserialize, Serialize};

pub const MIN_DEPTH: u32 = 1;
pub const MAX_DEPTH: u32 = 5;
/// At or above this rating leaf evaluations carry no noise.
pub const NOISE_FREE_RATING: i32 = 2000;
const MAX_NOISE_CP: f64 = 50.0;

/// Search depth in plies: one extra ply per 400 rating points above 800,
/// floored at 1 and capped at `MAX_DEPTH`.
pub fn depth_for_rating(rating: i32) -> u32 {
    let bands = (rating as i64 - 800).div_euclid(400);
    (1 + bands).clamp(MIN_DEPTH as i64, MAX_DEPTH as i64) as u32
}

/// Number of plies from the start for which a book reply may replace search.
pub fn opening_book_horizon(rating: i32) -> usize {
    match rating {
        r if r < 1200 => 3,
        r if r < 1600 => 4,
        r if r < 2000 => 5,
        _ => 6,
    }
}

/// Half-width of the uniform noise added to leaf scores, in centipawns.
/// Shrinks linearly to zero at `NOISE_FREE_RATING`; ratings below zero are
/// treated as zero.
pub fn noise_amplitude_cp(rating: i32) -> f64 {
    if rating >= NOISE_FREE_RATING { return 0.0; }
    let factor = (NOISE_FREE_RATING - rating.max(0)) as f64 / 1000.0;
    MAX_NOISE_CP * factor
}

/// Playing strength of one AI-controlled side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Strength {
    pub rating: i32,
}

impl Default for Strength {
    fn default() -> Self { Self { rating: 1200 } }
}

impl Strength {
    pub fn new(rating: i32) -> Self { Self { rating } }
    pub fn depth(&self) -> u32 { depth_for_rating(self.rating) }
    pub fn book_horizon(&self) -> usize { opening_book_horizon(self.rating) }
    pub fn noise_amplitude_cp(&self) -> f64 { noise_amplitude_cp(self.rating) }
}
