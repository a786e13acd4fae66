mod catalog;
mod config;

pub use catalog::MealCatalog;
pub use config::{KitchenConfig, SCHEMA_PATH_ENV};
