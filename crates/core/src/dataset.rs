//! The in-memory message dataset.
//!
//! The message table is read wholesale from SQLite once at startup. Its first four columns are
//! reserved (`id`, `message`, `original`, `genre`); every further column is a category flag.

use crate::config::{validate_table_name, CoreConfig};
use crate::constants::RESERVED_COLUMNS;
use crate::{DashboardError, DashboardResult};
use rusqlite::types::ValueRef;
use rusqlite::{Connection, OpenFlags};
use std::collections::BTreeSet;
use std::path::Path;

/// One row of the message table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MessageRecord {
    pub id: i64,
    /// NULL messages are kept but left out of per-genre message counts.
    pub message: Option<String>,
    pub original: Option<String>,
    /// Rows with a NULL genre are left out of every per-genre view.
    pub genre: Option<String>,
    /// One value per category column, in column order.
    pub categories: Vec<i64>,
}

/// Immutable, fully loaded message table.
#[derive(Clone, Debug, Default)]
pub struct Dataset {
    categories: Vec<String>,
    records: Vec<MessageRecord>,
}

impl Dataset {
    /// Build a dataset from already loaded records.
    ///
    /// # Errors
    /// Returns `InvalidTable` if any record does not carry exactly one value per category.
    pub fn new(categories: Vec<String>, records: Vec<MessageRecord>) -> DashboardResult<Self> {
        if let Some(bad) = records
            .iter()
            .find(|r| r.categories.len() != categories.len())
        {
            return Err(DashboardError::InvalidTable(format!(
                "record {} has {} category values, expected {}",
                bad.id,
                bad.categories.len(),
                categories.len()
            )));
        }

        Ok(Self {
            categories,
            records,
        })
    }

    /// Load the table named in `cfg` from its SQLite database.
    pub fn load(cfg: &CoreConfig) -> DashboardResult<Self> {
        Self::load_table(cfg.database_path(), cfg.table_name())
    }

    /// Load `table` from the SQLite database at `path`.
    ///
    /// The database is opened read-only, so a missing file is an error rather than an empty
    /// database.
    ///
    /// # Errors
    /// Returns an error if:
    /// - the database cannot be opened or the table cannot be queried,
    /// - the leading columns are not `id`, `message`, `original`, `genre`, or
    /// - a value cannot be read as the type its column requires.
    pub fn load_table(path: &Path, table: &str) -> DashboardResult<Self> {
        validate_table_name(table)?;

        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(DashboardError::DatabaseOpen)?;

        let mut stmt = conn
            .prepare(&format!("SELECT * FROM \"{table}\""))
            .map_err(DashboardError::DatabaseQuery)?;

        let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();
        check_reserved_columns(&columns)?;
        let categories = columns[RESERVED_COLUMNS.len()..].to_vec();

        let mut records = Vec::new();
        let mut rows = stmt.query([]).map_err(DashboardError::DatabaseQuery)?;
        while let Some(row) = rows.next().map_err(DashboardError::DatabaseQuery)? {
            let id: i64 = row.get(0).map_err(DashboardError::DatabaseQuery)?;
            let message: Option<String> = row.get(1).map_err(DashboardError::DatabaseQuery)?;
            let original: Option<String> = row.get(2).map_err(DashboardError::DatabaseQuery)?;
            let genre: Option<String> = row.get(3).map_err(DashboardError::DatabaseQuery)?;

            let mut values = Vec::with_capacity(categories.len());
            for (offset, name) in categories.iter().enumerate() {
                let value = row
                    .get_ref(RESERVED_COLUMNS.len() + offset)
                    .map_err(DashboardError::DatabaseQuery)?;
                values.push(category_value(value, name, id)?);
            }

            records.push(MessageRecord {
                id,
                message,
                original,
                genre,
                categories: values,
            });
        }

        tracing::debug!(
            "loaded {} messages with {} categories from {}",
            records.len(),
            categories.len(),
            path.display()
        );

        Self::new(categories, records)
    }

    /// Category column names, in table order.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn records(&self) -> &[MessageRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct non-NULL genres in sorted order.
    pub fn genres(&self) -> Vec<String> {
        self.records
            .iter()
            .filter_map(|r| r.genre.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

fn check_reserved_columns(columns: &[String]) -> DashboardResult<()> {
    let leading: Vec<&str> = columns
        .iter()
        .take(RESERVED_COLUMNS.len())
        .map(String::as_str)
        .collect();
    if leading != RESERVED_COLUMNS {
        return Err(DashboardError::InvalidTable(format!(
            "expected leading columns {RESERVED_COLUMNS:?}, found {leading:?}"
        )));
    }
    Ok(())
}

/// Category values are integers; REAL values are truncated and NULL counts as 0.
fn category_value(value: ValueRef<'_>, column: &str, id: i64) -> DashboardResult<i64> {
    match value {
        ValueRef::Null => Ok(0),
        ValueRef::Integer(v) => Ok(v),
        ValueRef::Real(v) => Ok(v as i64),
        ValueRef::Text(text) => std::str::from_utf8(text)
            .ok()
            .and_then(|t| t.trim().parse::<i64>().ok())
            .ok_or_else(|| {
                DashboardError::InvalidTable(format!(
                    "non-numeric value in column {column} for message {id}"
                ))
            }),
        ValueRef::Blob(_) => Err(DashboardError::InvalidTable(format!(
            "blob value in column {column} for message {id}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_db(dir: &TempDir, ddl: &str, inserts: &[&str]) -> std::path::PathBuf {
        let path = dir.path().join("messages.db");
        let conn = Connection::open(&path).unwrap();
        conn.execute(ddl, []).unwrap();
        for insert in inserts {
            conn.execute(insert, []).unwrap();
        }
        path
    }

    #[test]
    fn loads_records_and_categories_in_column_order() {
        let dir = TempDir::new().unwrap();
        let path = write_db(
            &dir,
            "CREATE TABLE DisasterResponse (id INTEGER, message TEXT, original TEXT, genre TEXT, related INTEGER, food INTEGER, water REAL)",
            &[
                "INSERT INTO DisasterResponse VALUES (1, 'need food', NULL, 'direct', 1, 1, 0.0)",
                "INSERT INTO DisasterResponse VALUES (2, 'water please', 'dlo souple', 'news', 2, NULL, 1.0)",
            ],
        );

        let dataset = Dataset::load_table(&path, "DisasterResponse").unwrap();
        assert_eq!(dataset.categories(), ["related", "food", "water"]);
        assert_eq!(dataset.len(), 2);

        let first = &dataset.records()[0];
        assert_eq!(first.id, 1);
        assert_eq!(first.original, None);
        assert_eq!(first.categories, vec![1, 1, 0]);

        let second = &dataset.records()[1];
        assert_eq!(second.original.as_deref(), Some("dlo souple"));
        assert_eq!(second.categories, vec![2, 0, 1]);
        assert_eq!(dataset.genres(), vec!["direct", "news"]);
    }

    #[test]
    fn rejects_tables_without_reserved_columns() {
        let dir = TempDir::new().unwrap();
        let path = write_db(
            &dir,
            "CREATE TABLE DisasterResponse (id INTEGER, genre TEXT, message TEXT, original TEXT, food INTEGER)",
            &[],
        );

        let err = Dataset::load_table(&path, "DisasterResponse").expect_err("expected layout error");
        assert!(matches!(err, DashboardError::InvalidTable(_)));
    }

    #[test]
    fn missing_database_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let err = Dataset::load_table(&dir.path().join("absent.db"), "DisasterResponse")
            .expect_err("expected open failure");
        assert!(matches!(err, DashboardError::DatabaseOpen(_)));
        assert!(!dir.path().join("absent.db").exists());
    }

    #[test]
    fn missing_table_is_a_query_error() {
        let dir = TempDir::new().unwrap();
        let path = write_db(&dir, "CREATE TABLE other (id INTEGER)", &[]);
        let err = Dataset::load_table(&path, "DisasterResponse").expect_err("expected query failure");
        assert!(matches!(err, DashboardError::DatabaseQuery(_)));
    }

    #[test]
    fn null_message_and_genre_rows_are_loaded() {
        let dir = TempDir::new().unwrap();
        let path = write_db(
            &dir,
            "CREATE TABLE DisasterResponse (id INTEGER, message TEXT, original TEXT, genre TEXT, food INTEGER)",
            &[
                "INSERT INTO DisasterResponse VALUES (1, 'ok', NULL, 'news', 1)",
                "INSERT INTO DisasterResponse VALUES (2, NULL, NULL, 'news', 0)",
                "INSERT INTO DisasterResponse VALUES (3, 'no genre', NULL, NULL, 1)",
            ],
        );

        let dataset = Dataset::load_table(&path, "DisasterResponse").unwrap();
        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset.records()[1].message, None);
        assert_eq!(dataset.records()[2].genre, None);
        assert_eq!(dataset.genres(), vec!["news"]);
    }

    #[test]
    fn new_rejects_ragged_records() {
        let record = MessageRecord {
            id: 7,
            message: Some("m".into()),
            original: None,
            genre: Some("news".into()),
            categories: vec![1],
        };
        let err = Dataset::new(vec!["a".into(), "b".into()], vec![record])
            .expect_err("expected ragged record error");
        assert!(matches!(err, DashboardError::InvalidTable(_)));
    }
}
