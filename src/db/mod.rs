//! Database module: models and schema for persistent storage.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows, plus the validated student draft
//! - `schema.rs`: SQL DDL for initializing the database
//! - `sqlite.rs`: pool setup and the account/student storages

pub mod models;
pub mod schema;
pub mod sqlite;

pub use models::{Account, StudentDraft, StudentRecord};
pub use schema::SQLITE_INIT;
pub use sqlite::{AccountStorage, SqlitePool, StudentStorage, connect};
