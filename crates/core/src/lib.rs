//! Kipo Core - Domain entities, services, and traits.
//!
//! This crate contains the business logic for the Kipo finance tracker.
//! It is database-agnostic and defines traits that are implemented
//! by the `storage-sqlite` crate (repositories) and the `ai` crate
//! (advisor).

pub mod cards;
pub mod constants;
pub mod errors;
pub mod goals;
pub mod notifications;
pub mod recommendations;
pub mod transactions;
pub mod users;
pub mod utils;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
