//! Database module: the item store and its persistent schema.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows and write results
//! - `schema.rs`: SQL DDL for initializing the database (SQLite-first)
//! - `actor.rs`: the actor that owns the connection pool and serves store calls

pub mod actor;
pub mod models;
pub mod schema;

pub use models::{DbItem, WriteOutcome};
pub use schema::SQLITE_INIT;

pub use actor::{DbActorHandle, spawn};
