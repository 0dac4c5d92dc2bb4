use async_trait::async_trait;
use chrono::Utc;
use log::{debug, info};
use std::sync::Arc;

use super::credentials::CredentialHasher;
use super::users_model::{
    NewUser, OnboardingInput, PasswordChange, User, UserRegistration, UserUpdate,
};
use super::users_traits::{UserRepositoryTrait, UserServiceTrait};
use crate::errors::{DatabaseError, Error, Result};

const INVALID_LOGIN: &str = "Invalid email or password";
const DUPLICATE_EMAIL: &str = "An account with this email already exists";

pub struct UserService {
    repository: Arc<dyn UserRepositoryTrait>,
    hasher: CredentialHasher,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepositoryTrait>, hasher: CredentialHasher) -> Self {
        Self { repository, hasher }
    }
}

#[async_trait]
impl UserServiceTrait for UserService {
    async fn register(&self, new_user: NewUser) -> Result<User> {
        let new_user = new_user.normalized();
        new_user.validate()?;

        if self.repository.find_by_email(&new_user.email)?.is_some() {
            return Err(Error::ConstraintViolation(DUPLICATE_EMAIL.to_string()));
        }

        let password_hash = self.hasher.hash_blocking(&new_user.password).await?;
        let registration = UserRegistration {
            name: new_user.name,
            email: new_user.email,
            password_hash,
        };

        // Concurrent registrations are settled by the unique email index.
        let user = self
            .repository
            .create(registration)
            .await
            .map_err(|err| match err {
                Error::Database(DatabaseError::UniqueViolation(_)) => {
                    Error::ConstraintViolation(DUPLICATE_EMAIL.to_string())
                }
                other => other,
            })?;
        info!("Registered user {}", user.id);
        Ok(user)
    }

    fn authenticate(&self, email: &str, password: &str) -> Result<User> {
        let email = super::users_model::normalize_email(email);
        let Some(user) = self.repository.find_by_email(&email)? else {
            debug!("Login attempt for unknown email");
            return Err(Error::Unauthorized(INVALID_LOGIN.to_string()));
        };
        if !self.hasher.verify(password, &user.password_hash)? {
            return Err(Error::Unauthorized(INVALID_LOGIN.to_string()));
        }
        Ok(user)
    }

    fn get_user(&self, user_id: &str) -> Result<User> {
        self.repository.get_by_id(user_id).map_err(|err| match err {
            Error::Database(DatabaseError::NotFound(_)) => Error::NotFound("User".to_string()),
            other => other,
        })
    }

    fn list_users(&self) -> Result<Vec<User>> {
        self.repository.list_all()
    }

    async fn update_profile(&self, user_id: &str, update: UserUpdate) -> Result<User> {
        update.validate()?;
        let mut user = self.get_user(user_id)?;
        update.apply_to(&mut user);
        user.updated_at = Utc::now().naive_utc();
        self.repository.update(user).await
    }

    async fn complete_onboarding(&self, user_id: &str, input: OnboardingInput) -> Result<User> {
        input.validate()?;
        let mut user = self.get_user(user_id)?;
        UserUpdate {
            name: None,
            monthly_income: Some(input.monthly_income),
            monthly_expenses: Some(input.monthly_expenses),
            saving_categories: Some(input.saving_categories),
        }
        .apply_to(&mut user);
        user.onboarding_completed = true;
        user.updated_at = Utc::now().naive_utc();
        self.repository.update(user).await
    }

    async fn change_password(&self, user_id: &str, change: PasswordChange) -> Result<()> {
        change.validate()?;
        let mut user = self.get_user(user_id)?;
        if !self
            .hasher
            .verify_blocking(&change.current_password, &user.password_hash)
            .await?
        {
            return Err(Error::Unauthorized(
                "Current password is incorrect".to_string(),
            ));
        }
        user.password_hash = self.hasher.hash_blocking(&change.new_password).await?;
        user.updated_at = Utc::now().naive_utc();
        self.repository.update(user).await?;
        info!("Password changed for user {}", user_id);
        Ok(())
    }
}
