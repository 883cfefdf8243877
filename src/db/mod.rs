//! Database module: models and schema for persistent storage.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows
//! - `schema.rs`: SQL DDL for initializing the database (SQLite-first)
//! - `sqlite.rs`: the keyed read/write operations the catalog service consumes

pub mod models;
pub mod schema;
pub mod sqlite;

pub use models::{Category, Product};
pub use schema::SQLITE_INIT;
pub use sqlite::{CatalogStorage, SqlitePool, connect};
