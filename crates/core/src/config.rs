//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into the loaders. Request
//! handlers never read environment variables.

use crate::constants::{DEFAULT_DATABASE_PATH, DEFAULT_MODEL_PATH, DEFAULT_TABLE_NAME};
use crate::{DashboardError, DashboardResult};
use std::path::{Path, PathBuf};

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    database_path: PathBuf,
    table_name: String,
    model_path: PathBuf,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// The table name is interpolated into SQL, so it must be a plain identifier.
    pub fn new(
        database_path: PathBuf,
        table_name: String,
        model_path: PathBuf,
    ) -> DashboardResult<Self> {
        validate_table_name(&table_name)?;

        Ok(Self {
            database_path,
            table_name,
            model_path,
        })
    }

    /// Build a config from optional raw values, falling back to the defaults for anything
    /// missing or blank.
    pub fn from_values(
        database_path: Option<String>,
        table_name: Option<String>,
        model_path: Option<String>,
    ) -> DashboardResult<Self> {
        Self::new(
            PathBuf::from(value_or_default(database_path, DEFAULT_DATABASE_PATH)),
            value_or_default(table_name, DEFAULT_TABLE_NAME),
            PathBuf::from(value_or_default(model_path, DEFAULT_MODEL_PATH)),
        )
    }

    pub fn database_path(&self) -> &Path {
        &self.database_path
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    pub fn model_path(&self) -> &Path {
        &self.model_path
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from(DEFAULT_DATABASE_PATH),
            table_name: DEFAULT_TABLE_NAME.into(),
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
        }
    }
}

fn value_or_default(value: Option<String>, default: &str) -> String {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Table names must match `[A-Za-z_][A-Za-z0-9_]*`.
pub fn validate_table_name(name: &str) -> DashboardResult<()> {
    let mut chars = name.chars();
    let valid_start = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    if valid_start && chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        Ok(())
    } else {
        Err(DashboardError::InvalidInput(format!(
            "table name must be a plain identifier: {name:?}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_values_falls_back_to_defaults() {
        let cfg = CoreConfig::from_values(None, Some("   ".into()), None).unwrap();
        assert_eq!(cfg.database_path(), Path::new(DEFAULT_DATABASE_PATH));
        assert_eq!(cfg.table_name(), DEFAULT_TABLE_NAME);
        assert_eq!(cfg.model_path(), Path::new(DEFAULT_MODEL_PATH));
    }

    #[test]
    fn from_values_uses_overrides() {
        let cfg = CoreConfig::from_values(
            Some("/tmp/x.db".into()),
            Some("messages".into()),
            Some("/tmp/m.json".into()),
        )
        .unwrap();
        assert_eq!(cfg.database_path(), Path::new("/tmp/x.db"));
        assert_eq!(cfg.table_name(), "messages");
        assert_eq!(cfg.model_path(), Path::new("/tmp/m.json"));
    }

    #[test]
    fn rejects_table_names_that_are_not_identifiers() {
        for bad in ["", "1abc", "drop table", "a;b", "\"quoted\""] {
            let err = CoreConfig::new(PathBuf::new(), bad.into(), PathBuf::new())
                .expect_err("expected invalid table name");
            assert!(matches!(err, DashboardError::InvalidInput(_)));
        }
        validate_table_name("Disaster_Response2").expect("valid identifier");
    }
}
