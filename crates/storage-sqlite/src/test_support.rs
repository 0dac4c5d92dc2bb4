use std::sync::Arc;
use tempfile::TempDir;

use kipo_core::users::{User, UserRegistration, UserRepositoryTrait};

use crate::db::{create_pool, init, run_migrations, spawn_writer, DbPool, WriteHandle};
use crate::users::UserRepository;

/// A migrated database in a temp dir. Keep the `TempDir` alive for the test.
pub(crate) fn test_db() -> (Arc<DbPool>, WriteHandle, TempDir) {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let db_path = temp_dir.path().join("kipo-test.db");
    let db_path = init(&db_path.to_string_lossy()).expect("Failed to init database");
    let pool = create_pool(&db_path).expect("Failed to create pool");
    run_migrations(&pool).expect("Failed to run migrations");
    let writer = spawn_writer(Arc::clone(&pool));
    (pool, writer, temp_dir)
}

/// Inserts a user so child rows satisfy their foreign keys.
pub(crate) async fn insert_user(pool: &Arc<DbPool>, writer: &WriteHandle, email: &str) -> User {
    UserRepository::new(Arc::clone(pool), writer.clone())
        .create(UserRegistration {
            name: "Test".to_string(),
            email: email.to_string(),
            password_hash: "hash".to_string(),
        })
        .await
        .expect("Failed to create user")
}
