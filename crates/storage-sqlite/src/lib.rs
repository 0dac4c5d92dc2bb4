//! SQLite storage implementation for Kipo.
//!
//! This crate is the only place where Diesel is used. It provides connection
//! pooling, embedded migrations, the single-writer actor and one repository
//! per domain entity, each implementing the matching trait from `kipo-core`.

pub mod db;
pub mod errors;
pub mod schema;

// Repository implementations
pub mod cards;
pub mod goals;
pub mod recommendations;
pub mod transactions;
pub mod users;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, init, run_migrations, spawn_writer, DbConnection, DbPool,
    WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

pub use kipo_core::errors::{DatabaseError, Error, Result};
