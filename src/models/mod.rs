mod leaderboard;
mod meal;

pub use leaderboard::{LeaderboardEntry, LeaderboardSort};
pub use meal::{BattleOutcome, Difficulty, Meal};

pub(crate) use meal::validate_attributes;
