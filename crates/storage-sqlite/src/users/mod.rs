//! SQLite storage implementation for users and API keys.

mod model;
mod repository;

pub use model::{ApiKeyDB, UserDB};
pub use repository::UserRepository;
