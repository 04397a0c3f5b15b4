//! Ecobase database bootstrap
//!
//! `EcobaseDatabase` is the one-shot schema initializer: opening it opens the
//! SQLite file (creating it if absent), applies the idempotent backend DDL in
//! a single transaction, and commits. Dropping the value releases the
//! connection, so every exit path, error paths included, closes the database.

use crate::database::core::{DatabaseConn, SchemaManager, SchemaStatus};
use anyhow::{anyhow, Result};
use tracing::{info, warn};

/// Handle to an initialized ecobase backend database
pub struct EcobaseDatabase {
    db: DatabaseConn,
}

impl EcobaseDatabase {
    /// Open the ecobase database at the specified path
    ///
    /// If the database doesn't exist, it is created and initialized.
    /// Repeated opens re-run the same `CREATE TABLE IF NOT EXISTS` DDL and
    /// change nothing.
    pub fn open(path: &str) -> Result<Self> {
        let db = DatabaseConn::open_path(path)?;
        Self::initialize(db)
    }

    /// Open the ecobase database from a data directory
    ///
    /// Uses the standard database file path: `{data_dir}/ecobase-backend.sqlite3`
    pub fn open_in_dir(data_dir: &str) -> Result<Self> {
        let path = format!("{}/ecobase-backend.sqlite3", data_dir.trim_end_matches('/'));
        Self::open(&path)
    }

    /// Create an in-memory ecobase database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let db = DatabaseConn::open_in_memory()?;
        Self::initialize(db)
    }

    fn initialize(db: DatabaseConn) -> Result<Self> {
        let schema = SchemaManager::new(&db.conn);
        match schema.check_status()? {
            SchemaStatus::NotInitialized => {
                info!("Initializing ecobase database schema");
            }
            SchemaStatus::Current => {
                info!("Ecobase database schema is current");
            }
            SchemaStatus::Corrupted => {
                warn!("Ecobase database is missing tables, re-running schema creation");
            }
        }

        // One transaction for the whole bootstrap: commit on success, the
        // guard rolls back on any earlier error.
        let tx = db.transaction()?;
        SchemaManager::new(&tx).initialize()?;
        tx.commit()
            .map_err(|e| anyhow!("Failed to commit schema bootstrap: {}", e))?;

        Ok(Self { db })
    }

    /// Get the underlying database connection
    pub fn connection(&self) -> &rusqlite::Connection {
        &self.db.conn
    }

    /// Current schema status as seen on this connection
    pub fn schema_status(&self) -> Result<SchemaStatus> {
        SchemaManager::new(&self.db.conn).check_status()
    }

    /// List the user-visible tables in the database, alphabetically
    pub fn table_names(&self) -> Result<Vec<String>> {
        let mut stmt = self
            .db
            .conn
            .prepare(
                "SELECT name FROM sqlite_master WHERE type='table' \
                 AND name NOT LIKE 'sqlite_%' ORDER BY name",
            )
            .map_err(|e| anyhow!("Failed to prepare table listing: {}", e))?;

        let names = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .map_err(|e| anyhow!("Failed to list tables: {}", e))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| anyhow!("Failed to read table name: {}", e))?;

        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_in_memory() {
        let db = EcobaseDatabase::open_in_memory();
        assert!(db.is_ok());
    }

    #[test]
    fn test_schema_status_current_after_open() {
        let db = EcobaseDatabase::open_in_memory().unwrap();
        assert_eq!(db.schema_status().unwrap(), SchemaStatus::Current);
    }

    #[test]
    fn test_table_names() {
        let db = EcobaseDatabase::open_in_memory().unwrap();
        let names = db.table_names().unwrap();

        for expected in [
            "bookings",
            "carbon_calculations",
            "ecobase_meta",
            "energy_calculations",
            "payments",
            "products",
            "users",
        ] {
            assert!(names.iter().any(|n| n == expected), "missing {}", expected);
        }
    }

    #[test]
    fn test_reopen_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir
            .path()
            .join("ecobase-backend.sqlite3")
            .to_string_lossy()
            .to_string();

        let first = EcobaseDatabase::open(&path).unwrap();
        let tables_first = first.table_names().unwrap();
        drop(first);

        let second = EcobaseDatabase::open(&path).unwrap();
        let tables_second = second.table_names().unwrap();

        assert_eq!(tables_first, tables_second);
        assert_eq!(second.schema_status().unwrap(), SchemaStatus::Current);
    }

    #[test]
    fn test_open_in_dir_creates_standard_file() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().to_string_lossy().to_string();

        let _db = EcobaseDatabase::open_in_dir(&data_dir).unwrap();
        assert!(dir.path().join("ecobase-backend.sqlite3").exists());
    }

    #[test]
    fn test_data_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("backend.db").to_string_lossy().to_string();

        {
            let db = EcobaseDatabase::open(&path).unwrap();
            db.connection()
                .execute(
                    "INSERT INTO users (username, email, password_hash) VALUES ('alice', 'alice@example.com', 'h')",
                    [],
                )
                .unwrap();
        }

        let db = EcobaseDatabase::open(&path).unwrap();
        let count: i64 = db
            .connection()
            .query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }
}
