//! User repository and service traits.

use async_trait::async_trait;
use chrono::NaiveDateTime;

use super::users_model::{
    ApiKey, CreatedApiKey, NewApiKey, NewUser, OnboardingInput, PasswordChange, User,
    UserRegistration, UserUpdate,
};
use crate::errors::Result;

/// Persistence contract for users and their embedded API keys.
#[async_trait]
pub trait UserRepositoryTrait: Send + Sync {
    /// Inserts a user. A duplicate email surfaces as a unique violation.
    async fn create(&self, registration: UserRegistration) -> Result<User>;

    /// Writes the profile fields, password hash and onboarding flag of `user`.
    async fn update(&self, user: User) -> Result<User>;

    fn get_by_id(&self, user_id: &str) -> Result<User>;

    fn find_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Every user with their API keys attached.
    fn list_all(&self) -> Result<Vec<User>>;

    async fn insert_api_key(&self, key: ApiKey) -> Result<ApiKey>;

    async fn revoke_api_key(&self, key_id: &str, revoked_at: NaiveDateTime) -> Result<ApiKey>;
}

/// Account lifecycle and profile operations.
#[async_trait]
pub trait UserServiceTrait: Send + Sync {
    async fn register(&self, new_user: NewUser) -> Result<User>;

    /// Checks an email/password pair. Both failure cases look identical.
    fn authenticate(&self, email: &str, password: &str) -> Result<User>;

    fn get_user(&self, user_id: &str) -> Result<User>;

    fn list_users(&self) -> Result<Vec<User>>;

    async fn update_profile(&self, user_id: &str, update: UserUpdate) -> Result<User>;

    async fn complete_onboarding(&self, user_id: &str, input: OnboardingInput) -> Result<User>;

    async fn change_password(&self, user_id: &str, change: PasswordChange) -> Result<()>;
}

/// API key issuance and bearer-token authentication.
#[async_trait]
pub trait ApiKeyServiceTrait: Send + Sync {
    async fn create_api_key(&self, user_id: &str, new_key: NewApiKey) -> Result<CreatedApiKey>;

    /// Keys of `user_id`, newest first.
    fn list_api_keys(&self, user_id: &str) -> Result<Vec<ApiKey>>;

    async fn revoke_api_key(&self, user_id: &str, key_id: &str) -> Result<ApiKey>;

    /// Resolves a bearer token to the owning user's id.
    ///
    /// Malformed tokens are rejected before storage is touched. Otherwise
    /// every non-revoked key of every user is compared against the token.
    /// This does CPU-heavy hashing; async callers should run it on a
    /// blocking thread.
    fn authenticate_bearer(&self, token: &str) -> Result<String>;
}
