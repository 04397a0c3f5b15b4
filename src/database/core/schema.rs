//! Database schema management
//!
//! This module holds the DDL for the ecobase backend database and the manager
//! that applies it. All tables are defined here so the whole schema can be
//! reviewed in one place.

use anyhow::{anyhow, Result};
use rusqlite::Connection;

/// Current schema version
/// Recorded in the meta table for observability; there is no migration
/// machinery, the bootstrap only ever re-runs the idempotent DDL.
pub const SCHEMA_VERSION: u32 = 1;

/// Schema definitions for all tables in the ecobase database
pub struct SchemaDefinitions;

impl SchemaDefinitions {
    /// SQL for creating the meta table (tracks schema version)
    pub const META_TABLE: &'static str = r#"
        CREATE TABLE IF NOT EXISTS ecobase_meta (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL,
            updated_at INTEGER NOT NULL DEFAULT (strftime('%s', 'now'))
        );
    "#;

    /// SQL for creating the users table
    pub const USERS_TABLE: &'static str = r#"
        CREATE TABLE IF NOT EXISTS users (
            user_id INTEGER PRIMARY KEY AUTOINCREMENT,
            username TEXT UNIQUE NOT NULL,
            email TEXT UNIQUE NOT NULL,
            password_hash TEXT NOT NULL,
            created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
        );
    "#;

    /// SQL for creating the products table
    pub const PRODUCTS_TABLE: &'static str = r#"
        CREATE TABLE IF NOT EXISTS products (
            product_id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            description TEXT,
            price DECIMAL(10,2),
            category TEXT,
            image_url TEXT
        );
    "#;

    /// SQL for creating the carbon calculations table
    pub const CARBON_CALCULATIONS_TABLE: &'static str = r#"
        CREATE TABLE IF NOT EXISTS carbon_calculations (
            calc_id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER,
            carbon_output DECIMAL(10,2) NOT NULL,
            date TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
            details TEXT,
            FOREIGN KEY (user_id) REFERENCES users(user_id) ON DELETE CASCADE
        );
    "#;

    /// SQL for creating the energy calculations table
    pub const ENERGY_CALCULATIONS_TABLE: &'static str = r#"
        CREATE TABLE IF NOT EXISTS energy_calculations (
            calc_id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER,
            energy_usage DECIMAL(10,2) NOT NULL,
            date TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
            details TEXT,
            FOREIGN KEY (user_id) REFERENCES users(user_id) ON DELETE CASCADE
        );
    "#;

    /// SQL for creating the payments table
    pub const PAYMENTS_TABLE: &'static str = r#"
        CREATE TABLE IF NOT EXISTS payments (
            payment_id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL,
            product_id INTEGER NOT NULL,
            amount DECIMAL(10,2) NOT NULL,
            payment_method TEXT CHECK (payment_method IN ('Credit Card', 'PayPal', 'Bank Transfer')),
            status TEXT CHECK (status IN ('Pending', 'Completed', 'Failed')) DEFAULT 'Pending',
            transaction_date TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
            FOREIGN KEY (user_id) REFERENCES users(user_id) ON DELETE CASCADE,
            FOREIGN KEY (product_id) REFERENCES products(product_id) ON DELETE CASCADE
        );
    "#;

    /// SQL for creating the bookings table
    pub const BOOKINGS_TABLE: &'static str = r#"
        CREATE TABLE IF NOT EXISTS bookings (
            booking_id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER,
            date TIMESTAMP NOT NULL,
            type TEXT CHECK (type IN ('Consultation', 'Installation')),
            status TEXT CHECK (status IN ('Pending', 'Confirmed', 'Cancelled')) DEFAULT 'Pending',
            FOREIGN KEY (user_id) REFERENCES users(user_id) ON DELETE CASCADE
        );
    "#;

    /// Backend table names, in creation order. Referenced tables (users,
    /// products) come first, though enforcement is deferred to runtime
    /// foreign-key checks anyway.
    pub const BACKEND_TABLES: &'static [(&'static str, &'static str)] = &[
        ("users", Self::USERS_TABLE),
        ("products", Self::PRODUCTS_TABLE),
        ("carbon_calculations", Self::CARBON_CALCULATIONS_TABLE),
        ("energy_calculations", Self::ENERGY_CALCULATIONS_TABLE),
        ("payments", Self::PAYMENTS_TABLE),
        ("bookings", Self::BOOKINGS_TABLE),
    ];
}

/// Schema manager for the ecobase database
///
/// Handles schema initialization and status checking.
pub struct SchemaManager<'a> {
    conn: &'a Connection,
}

impl<'a> SchemaManager<'a> {
    /// Create a new schema manager for the given connection
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Initialize the database schema
    ///
    /// Creates the meta table and all six backend tables if they don't
    /// exist, and records the schema version. Safe to run repeatedly.
    pub fn initialize(&self) -> Result<()> {
        self.conn
            .execute(SchemaDefinitions::META_TABLE, [])
            .map_err(|e| anyhow!("Failed to create ecobase_meta table: {}", e))?;

        self.set_meta("schema_version", &SCHEMA_VERSION.to_string())?;

        for (name, table_sql) in SchemaDefinitions::BACKEND_TABLES {
            self.conn
                .execute(table_sql, [])
                .map_err(|e| anyhow!("Failed to create {} table: {}", name, e))?;
        }

        Ok(())
    }

    /// Check the current schema status
    pub fn check_status(&self) -> Result<SchemaStatus> {
        let meta_exists: i32 = self
            .conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='ecobase_meta'",
                [],
                |row| row.get(0),
            )
            .unwrap_or(0);

        if meta_exists == 0 {
            return Ok(SchemaStatus::NotInitialized);
        }

        if self.verify_integrity()? {
            Ok(SchemaStatus::Current)
        } else {
            Ok(SchemaStatus::Corrupted)
        }
    }

    /// Get the recorded schema version from the database
    pub fn get_schema_version(&self) -> Result<u32> {
        let version: String = self
            .conn
            .query_row(
                "SELECT value FROM ecobase_meta WHERE key = 'schema_version'",
                [],
                |row| row.get(0),
            )
            .unwrap_or_else(|_| "0".to_string());

        version
            .parse()
            .map_err(|e| anyhow!("Invalid schema version: {}", e))
    }

    /// Verify schema integrity by checking all backend tables exist
    fn verify_integrity(&self) -> Result<bool> {
        for (table, _) in SchemaDefinitions::BACKEND_TABLES {
            let exists: i32 = self
                .conn
                .query_row(
                    "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name=?1",
                    [table],
                    |row| row.get(0),
                )
                .unwrap_or(0);

            if exists == 0 {
                return Ok(false);
            }
        }

        Ok(true)
    }

    /// Set a metadata value
    pub fn set_meta(&self, key: &str, value: &str) -> Result<()> {
        self.conn
            .execute(
                "INSERT OR REPLACE INTO ecobase_meta (key, value, updated_at) VALUES (?1, ?2, strftime('%s', 'now'))",
                [key, value],
            )
            .map_err(|e| anyhow!("Failed to set meta value: {}", e))?;
        Ok(())
    }

    /// Get a metadata value
    pub fn get_meta(&self, key: &str) -> Result<Option<String>> {
        let result: Result<String, _> = self.conn.query_row(
            "SELECT value FROM ecobase_meta WHERE key = ?1",
            [key],
            |row| row.get(0),
        );

        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(anyhow!("Failed to get meta value: {}", e)),
        }
    }

    /// Get the unix timestamp a metadata key was last written
    pub fn get_meta_updated_at(&self, key: &str) -> Result<Option<i64>> {
        let result: Result<i64, _> = self.conn.query_row(
            "SELECT updated_at FROM ecobase_meta WHERE key = ?1",
            [key],
            |row| row.get(0),
        );

        match result {
            Ok(ts) => Ok(Some(ts)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(anyhow!("Failed to get meta timestamp: {}", e)),
        }
    }
}

/// Status of the database schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaStatus {
    /// Database is not initialized (fresh database)
    NotInitialized,

    /// All backend tables are present
    Current,

    /// Meta table exists but one or more backend tables are missing
    Corrupted,
}
