use std::fs;
use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension};
use tracing::{error, info};

use crate::battle::StatsStore;
use crate::error::{MealError, Result};
use crate::kitchen::KitchenConfig;
use crate::models::{
    validate_attributes, BattleOutcome, Difficulty, LeaderboardEntry, LeaderboardSort, Meal,
};

/// The meal catalog: all meal records and their battle statistics,
/// backed by a SQLite database.
///
/// Deleted meals stay in the table as soft-deleted rows; every lookup
/// and mutation excludes them.
pub struct MealCatalog {
    conn: Connection,
}

impl MealCatalog {
    /// Open (or create) a catalog database at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        Ok(Self { conn })
    }

    /// Open a private in-memory catalog; used by tests and demos.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn })
    }

    /// Recreate the meals table from the configured schema script,
    /// deleting all meals. Also serves as first-time initialization.
    pub fn clear_meals(&self, config: &KitchenConfig) -> Result<()> {
        let script = fs::read_to_string(&config.schema_path)?;
        self.conn.execute_batch(&script)?;
        info!("Meals cleared successfully.");
        Ok(())
    }

    /// Insert a new meal and return it with its assigned id.
    pub fn create_meal(&self, name: &str, cuisine: &str, price: f64, difficulty: &str) -> Result<Meal> {
        let difficulty: Difficulty = difficulty.parse()?;
        validate_attributes(name, cuisine, price)?;

        let inserted = self.conn.execute(
            "INSERT INTO meals (meal, cuisine, price, difficulty)
             VALUES (?1, ?2, ?3, ?4)",
            params![name, cuisine, price, difficulty.as_str()],
        );

        match inserted {
            Ok(_) => {
                info!("Meal successfully added to the database: {}", name);
                Ok(Meal {
                    id: self.conn.last_insert_rowid(),
                    name: name.to_string(),
                    cuisine: cuisine.to_string(),
                    price,
                    difficulty,
                    battles: 0,
                    wins: 0,
                    deleted: false,
                })
            }
            Err(rusqlite::Error::SqliteFailure(e, _))
                if e.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                error!("Duplicate meal name: {}", name);
                Err(MealError::DuplicateName(name.to_string()))
            }
            Err(e) => {
                error!("Database error: {}", e);
                Err(e.into())
            }
        }
    }

    /// Soft-delete a meal by id.
    pub fn delete_meal(&self, meal_id: i64) -> Result<()> {
        self.check_exists_and_not_deleted(meal_id)?;

        self.conn.execute(
            "UPDATE meals SET deleted = TRUE WHERE id = ?1",
            params![meal_id],
        )?;
        info!("Meal with ID {} marked as deleted.", meal_id);
        Ok(())
    }

    /// Fetch a meal by id, excluding soft-deleted rows.
    pub fn get_meal_by_id(&self, meal_id: i64) -> Result<Meal> {
        let meal = self
            .conn
            .query_row(
                "SELECT id, meal, cuisine, price, difficulty, battles, wins, deleted
                 FROM meals WHERE id = ?1",
                params![meal_id],
                parse_meal_row,
            )
            .optional()?;

        match meal {
            Some(meal) if meal.deleted => {
                info!("Meal with ID {} has been deleted", meal_id);
                Err(MealError::IdDeleted(meal_id))
            }
            Some(meal) => Ok(meal),
            None => {
                info!("Meal with ID {} not found", meal_id);
                Err(MealError::IdNotFound(meal_id))
            }
        }
    }

    /// Fetch a meal by name, excluding soft-deleted rows.
    pub fn get_meal_by_name(&self, name: &str) -> Result<Meal> {
        let meal = self
            .conn
            .query_row(
                "SELECT id, meal, cuisine, price, difficulty, battles, wins, deleted
                 FROM meals WHERE meal = ?1",
                params![name],
                parse_meal_row,
            )
            .optional()?;

        match meal {
            Some(meal) if meal.deleted => {
                info!("Meal with name {} has been deleted", name);
                Err(MealError::NameDeleted(name.to_string()))
            }
            Some(meal) => Ok(meal),
            None => {
                info!("Meal with name {} not found", name);
                Err(MealError::NameNotFound(name.to_string()))
            }
        }
    }

    /// Record a battle outcome: `battles` always increments, `wins`
    /// only on a win.
    pub fn update_meal_stats(&self, meal_id: i64, outcome: BattleOutcome) -> Result<()> {
        self.check_exists_and_not_deleted(meal_id)?;

        let statement = match outcome {
            BattleOutcome::Win => {
                "UPDATE meals SET battles = battles + 1, wins = wins + 1 WHERE id = ?1"
            }
            BattleOutcome::Loss => "UPDATE meals SET battles = battles + 1 WHERE id = ?1",
        };
        self.conn.execute(statement, params![meal_id])?;
        info!(
            "Updated stats for meal with ID {}: {}",
            meal_id,
            outcome.as_str()
        );
        Ok(())
    }

    /// Meals that have fought at least one battle, ranked by the given
    /// key (`"wins"` or `"win_pct"`), best first.
    pub fn get_leaderboard(&self, sort_by: &str) -> Result<Vec<LeaderboardEntry>> {
        let sort: LeaderboardSort = sort_by.parse().inspect_err(|_| {
            error!("Invalid sort_by parameter: {}", sort_by);
        })?;

        let order_by = match sort {
            LeaderboardSort::Wins => "wins DESC",
            LeaderboardSort::WinPct => "win_pct DESC",
        };
        let query = format!(
            "SELECT id, meal, cuisine, price, difficulty, battles, wins,
                    (wins * 1.0 / battles) AS win_pct
             FROM meals WHERE deleted = FALSE AND battles > 0
             ORDER BY {order_by}"
        );

        let mut stmt = self.conn.prepare(&query)?;
        let rows = stmt.query_map([], parse_leaderboard_row)?;

        let mut leaderboard = Vec::new();
        for row in rows {
            leaderboard.push(row?);
        }
        info!("Leaderboard retrieved successfully");
        Ok(leaderboard)
    }

    /// Shared guard for mutations: the id must resolve to a live row.
    fn check_exists_and_not_deleted(&self, meal_id: i64) -> Result<()> {
        let deleted: Option<bool> = self
            .conn
            .query_row(
                "SELECT deleted FROM meals WHERE id = ?1",
                params![meal_id],
                |row| row.get(0),
            )
            .optional()?;

        match deleted {
            Some(true) => {
                info!("Meal with ID {} has been deleted", meal_id);
                Err(MealError::IdDeleted(meal_id))
            }
            Some(false) => Ok(()),
            None => {
                info!("Meal with ID {} not found", meal_id);
                Err(MealError::IdNotFound(meal_id))
            }
        }
    }
}

impl StatsStore for MealCatalog {
    fn update_meal_stats(&mut self, meal_id: i64, outcome: BattleOutcome) -> Result<()> {
        MealCatalog::update_meal_stats(self, meal_id, outcome)
    }
}

fn parse_meal_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Meal> {
    Ok(Meal {
        id: row.get(0)?,
        name: row.get(1)?,
        cuisine: row.get(2)?,
        price: row.get(3)?,
        difficulty: parse_difficulty_column(row, 4)?,
        battles: parse_counter_column(row, 5)?,
        wins: parse_counter_column(row, 6)?,
        deleted: row.get(7)?,
    })
}

fn parse_leaderboard_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<LeaderboardEntry> {
    let raw_pct: f64 = row.get(7)?;
    Ok(LeaderboardEntry {
        id: row.get(0)?,
        name: row.get(1)?,
        cuisine: row.get(2)?,
        price: row.get(3)?,
        difficulty: parse_difficulty_column(row, 4)?,
        battles: parse_counter_column(row, 5)?,
        wins: parse_counter_column(row, 6)?,
        win_pct: round_percentage(raw_pct),
    })
}

/// Win fraction to a 0-100 percentage, one decimal place.
fn round_percentage(fraction: f64) -> f64 {
    (fraction * 1000.0).round() / 10.0
}

fn parse_difficulty_column(row: &rusqlite::Row<'_>, index: usize) -> rusqlite::Result<Difficulty> {
    let raw: String = row.get(index)?;
    raw.parse().map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            index,
            rusqlite::types::Type::Text,
            Box::new(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("invalid difficulty value: {raw}"),
            )),
        )
    })
}

fn parse_counter_column(row: &rusqlite::Row<'_>, index: usize) -> rusqlite::Result<u32> {
    let raw: i64 = row.get(index)?;
    u32::try_from(raw).map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            index,
            rusqlite::types::Type::Integer,
            Box::new(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("negative battle counter: {raw}"),
            )),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fresh_catalog() -> MealCatalog {
        let catalog = MealCatalog::open_in_memory().unwrap();
        catalog.clear_meals(&KitchenConfig::default()).unwrap();
        catalog
    }

    #[test]
    fn test_create_meal_assigns_ids() {
        let catalog = fresh_catalog();

        let first = catalog
            .create_meal("Butter Chicken", "Indian", 14.75, "MED")
            .unwrap();
        let second = catalog
            .create_meal("Miso Ramen", "Japanese", 13.4, "LOW")
            .unwrap();

        assert!(first.id > 0);
        assert_eq!(second.id, first.id + 1);
        assert_eq!(first.battles, 0);
        assert_eq!(first.difficulty, Difficulty::Med);
    }

    #[test]
    fn test_create_meal_validation_happens_before_insert() {
        let catalog = fresh_catalog();

        assert!(catalog.create_meal("Fries", "American", -3.5, "LOW").is_err());
        assert!(catalog.create_meal("Carbonara", "Italian", 12.99, "EASY").is_err());

        // Nothing was written.
        assert!(matches!(
            catalog.get_meal_by_name("Fries"),
            Err(MealError::NameNotFound(_))
        ));
    }

    #[test]
    fn test_round_percentage() {
        assert_eq!(round_percentage(0.7), 70.0);
        assert_eq!(round_percentage(2.0 / 3.0), 66.7);
        assert_eq!(round_percentage(1.0), 100.0);
        assert_eq!(round_percentage(0.0), 0.0);
    }

    #[test]
    fn test_clear_meals_empties_table() {
        let catalog = fresh_catalog();
        catalog.create_meal("Pizza", "Italian", 10.99, "LOW").unwrap();

        catalog.clear_meals(&KitchenConfig::default()).unwrap();
        assert!(matches!(
            catalog.get_meal_by_name("Pizza"),
            Err(MealError::NameNotFound(_))
        ));
    }

    #[test]
    fn test_clear_meals_missing_script() {
        let catalog = MealCatalog::open_in_memory().unwrap();
        let config = KitchenConfig {
            schema_path: "no/such/script.sql".into(),
        };
        assert!(matches!(catalog.clear_meals(&config), Err(MealError::Io(_))));
    }
}
