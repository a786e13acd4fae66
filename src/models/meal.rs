use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{MealError, Result};

/// Preparation difficulty of a meal.
///
/// Stored and serialized as `"LOW"`, `"MED"`, or `"HIGH"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Difficulty {
    Low,
    Med,
    High,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Low => "LOW",
            Difficulty::Med => "MED",
            Difficulty::High => "HIGH",
        }
    }
}

impl FromStr for Difficulty {
    type Err = MealError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "LOW" => Ok(Difficulty::Low),
            "MED" => Ok(Difficulty::Med),
            "HIGH" => Ok(Difficulty::High),
            other => Err(MealError::InvalidDifficulty(other.to_string())),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a battle from one meal's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleOutcome {
    Win,
    Loss,
}

impl BattleOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            BattleOutcome::Win => "win",
            BattleOutcome::Loss => "loss",
        }
    }
}

/// A meal record with its battle statistics.
///
/// The id is assigned by the catalog at creation and never changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meal {
    pub id: i64,
    pub name: String,
    pub cuisine: String,
    pub price: f64,
    pub difficulty: Difficulty,

    #[serde(default)]
    pub battles: u32,

    #[serde(default)]
    pub wins: u32,

    #[serde(default)]
    pub deleted: bool,
}

impl Meal {
    /// Validated constructor; counters start at zero.
    pub fn new(id: i64, name: &str, cuisine: &str, price: f64, difficulty: Difficulty) -> Result<Self> {
        validate_attributes(name, cuisine, price)?;
        Ok(Self {
            id,
            name: name.to_string(),
            cuisine: cuisine.to_string(),
            price,
            difficulty,
            battles: 0,
            wins: 0,
            deleted: false,
        })
    }

    /// Win percentage over all battles fought, 0.0 when unfought.
    pub fn win_pct(&self) -> f64 {
        if self.battles == 0 {
            0.0
        } else {
            f64::from(self.wins) / f64::from(self.battles)
        }
    }
}

/// Attribute checks shared by `Meal::new` and catalog inserts.
///
/// The price check is written as `!(price > 0.0)` so NaN is rejected too.
pub(crate) fn validate_attributes(name: &str, cuisine: &str, price: f64) -> Result<()> {
    if name.is_empty() {
        return Err(MealError::InvalidName);
    }
    if cuisine.is_empty() {
        return Err(MealError::InvalidCuisine);
    }
    if !(price > 0.0) {
        return Err(MealError::InvalidPrice(price));
    }
    Ok(())
}
