use std::path::PathBuf;

use serde::Deserialize;

/// Environment variable overriding the schema script location.
pub const SCHEMA_PATH_ENV: &str = "SQL_CREATE_TABLE_PATH";

const DEFAULT_SCHEMA_PATH: &str = "sql/create_meal_table.sql";

/// Catalog configuration supplied by the host at construction time.
#[derive(Debug, Clone, Deserialize)]
pub struct KitchenConfig {
    /// SQL script that (re)creates the meals table.
    pub schema_path: PathBuf,
}

impl Default for KitchenConfig {
    fn default() -> Self {
        Self {
            schema_path: PathBuf::from(DEFAULT_SCHEMA_PATH),
        }
    }
}

impl KitchenConfig {
    /// Configuration from the environment, falling back to the default
    /// schema location.
    pub fn from_env() -> Self {
        let schema_path = std::env::var(SCHEMA_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_SCHEMA_PATH));
        Self { schema_path }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_schema_path() {
        let config = KitchenConfig::default();
        assert_eq!(config.schema_path, PathBuf::from("sql/create_meal_table.sql"));
    }

    #[test]
    fn test_deserializes_from_json() {
        let config: KitchenConfig =
            serde_json::from_str(r#"{"schema_path": "custom/schema.sql"}"#).unwrap();
        assert_eq!(config.schema_path, PathBuf::from("custom/schema.sql"));
    }
}
