use crate::models::{Difficulty, Meal};

/// Divisor turning a raw score gap into a win bias.
pub const DELTA_SCALE: f64 = 100.0;

/// Score concession per difficulty level: harder dishes give up less.
pub fn difficulty_modifier(difficulty: Difficulty) -> f64 {
    match difficulty {
        Difficulty::High => 1.0,
        Difficulty::Med => 2.0,
        Difficulty::Low => 3.0,
    }
}

/// Competitive strength of a meal.
///
/// Formula: price x cuisine length - difficulty modifier.
/// Deterministic in the meal's attributes; no side effects.
pub fn battle_score(meal: &Meal) -> f64 {
    meal.price * meal.cuisine.chars().count() as f64 - difficulty_modifier(meal.difficulty)
}

/// Win bias for the higher-scoring meal, normalized into [0, 1].
///
/// The raw gap is divided by [`DELTA_SCALE`] and saturated at 1.0, so
/// equal scores give 0 (the draw never lands below it) and gaps of 100
/// or more resolve deterministically to the higher scorer.
pub fn normalized_delta(score_a: f64, score_b: f64) -> f64 {
    ((score_a - score_b).abs() / DELTA_SCALE).min(1.0)
}
