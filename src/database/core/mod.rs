//! Core database infrastructure
//!
//! SQLite connection management, schema definitions, and the enum boundary
//! types backing the CHECK-constrained columns.

pub mod connection;
pub mod schema;
pub mod types;

pub use connection::DatabaseConn;
pub use schema::{SchemaDefinitions, SchemaManager, SchemaStatus, SCHEMA_VERSION};
pub use types::{BookingKind, BookingStatus, PaymentMethod, PaymentStatus};
