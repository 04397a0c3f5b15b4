#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

//! Ecobase - schema bootstrap for the green-energy backend database
//!
//! Ecobase creates and maintains the SQLite schema backing the ecobase
//! storefront backend: user accounts, the product catalog, carbon and energy
//! calculation results, payments, and consultation/installation bookings.
//! Opening the database applies the idempotent `CREATE TABLE IF NOT EXISTS`
//! DDL in one committed transaction; repeated runs change nothing.
//!
//! The crate can be used as a command-line tool or as a library.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use ecobase::EcobaseDatabase;
//!
//! // Open or create the database; the schema is bootstrapped on open
//! let db = EcobaseDatabase::open_in_dir("~/.ecobase")?;
//!
//! // The connection is available for anything beyond the bootstrap
//! let conn = db.connection();
//! ```
//!
//! # Modules
//!
//! - **[`database`]**: Connection wrapper, schema definitions, enum boundary
//!   types, and the `EcobaseDatabase` bootstrap handle
//! - **[`config`]**: Configuration management (TOML file + `ECOBASE_`
//!   environment overrides) and database status reporting

pub mod config;
pub mod database;

pub use config::{format_size, get_sqlite_info, EcobaseConfig, SqliteDatabaseInfo};

pub use database::EcobaseDatabase;
pub use database::{DatabaseConn, SchemaDefinitions, SchemaManager, SchemaStatus, SCHEMA_VERSION};
pub use database::{BookingKind, BookingStatus, PaymentMethod, PaymentStatus};
