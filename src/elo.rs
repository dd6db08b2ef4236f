//! Rating-update arithmetic (logistic model), independent of search.

use serde::{Deserialize, Serialize};

pub const K_FACTOR: f64 = 32.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOutcome { Win, Draw, Loss }

impl GameOutcome {
    pub fn score(self) -> f64 {
        match self {
            GameOutcome::Win => 1.0,
            GameOutcome::Draw => 0.5,
            GameOutcome::Loss => 0.0,
        }
    }

    pub fn reversed(self) -> Self {
        match self {
            GameOutcome::Win => GameOutcome::Loss,
            GameOutcome::Draw => GameOutcome::Draw,
            GameOutcome::Loss => GameOutcome::Win,
        }
    }
}

/// Expected score of a player rated `rating_a` against `rating_b`.
pub fn expected_score(rating_a: i32, rating_b: i32) -> f64 {
    1.0 / (1.0 + 10f64.powf((rating_b - rating_a) as f64 / 400.0))
}

// Half-up rounding, so -2.5 becomes -2.
fn round_half_up(x: f64) -> i32 { (x + 0.5).floor() as i32 }

pub fn rating_delta(my_rating: i32, opponent_rating: i32, outcome: GameOutcome) -> i32 {
    let expected = expected_score(my_rating, opponent_rating);
    round_half_up(K_FACTOR * (outcome.score() - expected))
}

pub fn new_rating(my_rating: i32, opponent_rating: i32, outcome: GameOutcome) -> i32 {
    let expected = expected_score(my_rating, opponent_rating);
    round_half_up(my_rating as f64 + K_FACTOR * (outcome.score() - expected))
}
