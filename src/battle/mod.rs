mod arena;
pub mod scoring;

pub use arena::{BattleArena, StatsStore, MAX_COMBATANTS};
pub use scoring::{battle_score, difficulty_modifier, normalized_delta};
