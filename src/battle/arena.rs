use tracing::{info, warn};

use crate::battle::scoring::{battle_score, normalized_delta};
use crate::error::{MealError, Result};
use crate::models::{BattleOutcome, Meal};
use crate::random::RandomSource;

/// Maximum number of meals staged for a battle.
pub const MAX_COMBATANTS: usize = 2;

/// Sink for battle outcomes, keyed by meal id.
///
/// [`crate::kitchen::MealCatalog`] is the production implementation;
/// tests substitute recording stubs.
pub trait StatsStore {
    fn update_meal_stats(&mut self, meal_id: i64, outcome: BattleOutcome) -> Result<()>;
}

/// Staging area for meal battles.
///
/// Holds at most two combatants in insertion order. `battle` resolves a
/// winner from the score gap and a random draw, reports both outcomes to
/// the stats store, and keeps the winner as the sole combatant.
#[derive(Debug, Default)]
pub struct BattleArena {
    combatants: Vec<Meal>,
}

impl BattleArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage a meal for the next battle.
    pub fn prep_combatant(&mut self, meal: Meal) -> Result<()> {
        if self.combatants.len() >= MAX_COMBATANTS {
            warn!("Attempted to prep {} with a full combatant list", meal.name);
            return Err(MealError::CombatantsFull);
        }
        info!("{} enters the arena", meal.name);
        self.combatants.push(meal);
        Ok(())
    }

    /// Currently staged combatants, in insertion order.
    pub fn get_combatants(&self) -> &[Meal] {
        &self.combatants
    }

    /// Remove all staged combatants; safe to call when already empty.
    pub fn clear_combatants(&mut self) {
        self.combatants.clear();
    }

    /// Competitive strength of a meal; see [`battle_score`].
    pub fn get_battle_score(&self, meal: &Meal) -> f64 {
        battle_score(meal)
    }

    /// Resolve a battle between the two staged combatants.
    ///
    /// The higher scorer wins when the draw falls below the normalized
    /// score gap, the lower scorer wins otherwise. Both stat updates are
    /// attempted (win first, then loss) and the loser leaves the arena
    /// before any update error is propagated, so a failed second update
    /// leaves the winner's stats already persisted and the loser already
    /// removed. A failed draw leaves everything untouched.
    ///
    /// Returns the winner's name.
    pub fn battle(
        &mut self,
        random: &impl RandomSource,
        stats: &mut impl StatsStore,
    ) -> Result<String> {
        if self.combatants.len() < MAX_COMBATANTS {
            return Err(MealError::InsufficientCombatants);
        }

        let score_a = battle_score(&self.combatants[0]);
        let score_b = battle_score(&self.combatants[1]);
        let delta = normalized_delta(score_a, score_b);

        info!(
            "Battle started between {} (score {}) and {} (score {}), delta {}",
            self.combatants[0].name, score_a, self.combatants[1].name, score_b, delta
        );

        // Draw before any mutation; a failure here must leave no trace.
        let draw = random.get_random()?;
        info!("Random draw: {}", draw);

        let (high, low) = if score_a > score_b { (0, 1) } else { (1, 0) };
        let (winner_idx, loser_idx) = if draw < delta { (high, low) } else { (low, high) };

        let winner_id = self.combatants[winner_idx].id;
        let winner_name = self.combatants[winner_idx].name.clone();
        let loser_id = self.combatants[loser_idx].id;
        let loser_name = self.combatants[loser_idx].name.clone();

        info!("{} defeats {}", winner_name, loser_name);

        let win_update = stats.update_meal_stats(winner_id, BattleOutcome::Win);
        let loss_update = stats.update_meal_stats(loser_id, BattleOutcome::Loss);

        self.combatants.remove(loser_idx);

        win_update?;
        loss_update?;

        Ok(winner_name)
    }
}
