//! Users module - accounts, credentials and API keys.

mod api_keys_service;
mod credentials;
mod users_model;
mod users_service;
mod users_traits;


pub use api_keys_service::ApiKeyService;
pub use credentials::{generate_api_token, is_well_formed_api_token, CredentialHasher};
pub use users_model::{
    is_valid_email, normalize_email, normalize_labels, ApiKey, CreatedApiKey, NewApiKey, NewUser,
    OnboardingInput, PasswordChange, User, UserRegistration, UserUpdate,
};
pub use users_service::UserService;
pub use users_traits::{ApiKeyServiceTrait, UserRepositoryTrait, UserServiceTrait};
