use std::str::FromStr;

use serde::Serialize;

use crate::error::MealError;
use crate::models::Difficulty;

/// One row of the battle leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderboardEntry {
    pub id: i64,
    pub name: String,
    pub cuisine: String,
    pub price: f64,
    pub difficulty: Difficulty,
    pub battles: u32,
    pub wins: u32,

    /// Win percentage on a 0-100 scale, rounded to one decimal place.
    pub win_pct: f64,
}

/// Sort order for leaderboard retrieval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaderboardSort {
    Wins,
    WinPct,
}

impl FromStr for LeaderboardSort {
    type Err = MealError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "wins" => Ok(LeaderboardSort::Wins),
            "win_pct" => Ok(LeaderboardSort::WinPct),
            other => Err(MealError::InvalidSortBy(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_key_parse() {
        assert_eq!("wins".parse::<LeaderboardSort>().unwrap(), LeaderboardSort::Wins);
        assert_eq!(
            "win_pct".parse::<LeaderboardSort>().unwrap(),
            LeaderboardSort::WinPct
        );

        let err = "unknown".parse::<LeaderboardSort>().unwrap_err();
        assert_eq!(err.to_string(), "Invalid sort_by parameter: unknown");
    }
}
