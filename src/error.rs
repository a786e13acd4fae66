use thiserror::Error;

/// Errors surfaced by the kitchen catalog, the battle arena, and the
/// random-number client.
///
/// The display strings are part of the observable contract: hosts show
/// them to users verbatim, and the test suite asserts them.
#[derive(Debug, Error)]
pub enum MealError {
    #[error("Invalid price: {0}. Price must be a positive number.")]
    InvalidPrice(f64),

    #[error("Invalid difficulty level: {0}. Must be 'LOW', 'MED', or 'HIGH'.")]
    InvalidDifficulty(String),

    #[error("Invalid meal name: must be a non-empty string.")]
    InvalidName,

    #[error("Invalid cuisine: must be a non-empty string.")]
    InvalidCuisine,

    #[error("Meal with name '{0}' already exists")]
    DuplicateName(String),

    #[error("Meal with ID {0} not found")]
    IdNotFound(i64),

    #[error("Meal with ID {0} has been deleted")]
    IdDeleted(i64),

    #[error("Meal with name {0} not found")]
    NameNotFound(String),

    #[error("Meal with name {0} has been deleted")]
    NameDeleted(String),

    #[error("Invalid sort_by parameter: {0}")]
    InvalidSortBy(String),

    #[error("Combatant list is full")]
    CombatantsFull,

    #[error("Two combatants must be prepped for a battle")]
    InsufficientCombatants,

    #[error("Request to random.org failed: {0}")]
    RandomRequestFailed(String),

    #[error("Request to random.org timed out.")]
    RandomRequestTimeout,

    #[error("Invalid response from random.org: {0}")]
    RandomInvalidResponse(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, MealError>;
