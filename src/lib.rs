pub mod battle;
pub mod error;
pub mod kitchen;
pub mod models;
pub mod random;

pub use battle::BattleArena;
pub use error::{MealError, Result};
pub use kitchen::{KitchenConfig, MealCatalog};
pub use models::{BattleOutcome, Difficulty, Meal};
pub use random::{RandomOrgClient, RandomSource};
