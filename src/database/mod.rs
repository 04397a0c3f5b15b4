//! Database module
//!
//! All database functionality for ecobase, organized into:
//!
//! - **core**: Core database infrastructure (SQLite connection, schema
//!   definitions, enum boundary types)
//! - **ecobase**: The `EcobaseDatabase` handle that performs the one-shot
//!   schema bootstrap
//!
//! # Architecture
//!
//! ```text
//! database/
//! ├── core/           # Foundation
//! │   ├── connection  # SQLite DatabaseConn wrapper
//! │   ├── schema      # DDL for the six backend tables + SchemaManager
//! │   └── types       # Enums mirroring the CHECK-constrained columns
//! │
//! └── ecobase/        # EcobaseDatabase (open = bootstrap)
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use ecobase::database::EcobaseDatabase;
//!
//! // Open (and initialize, if needed) the backend database
//! let db = EcobaseDatabase::open_in_dir("~/.ecobase")?;
//! assert_eq!(db.table_names()?.len(), 7);
//! ```

pub mod core;
pub mod ecobase;

pub use core::{DatabaseConn, SchemaDefinitions, SchemaManager, SchemaStatus, SCHEMA_VERSION};
pub use core::{BookingKind, BookingStatus, PaymentMethod, PaymentStatus};
pub use ecobase::EcobaseDatabase;

/// Ensure the data directory exists
pub fn ensure_data_dir(data_dir: &str) -> anyhow::Result<()> {
    std::fs::create_dir_all(data_dir)
        .map_err(|e| anyhow::anyhow!("Failed to create data directory '{}': {}", data_dir, e))
}
