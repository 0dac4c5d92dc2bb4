//! Database models for users and their API keys.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use kipo_core::users::{ApiKey, User};

#[derive(Queryable, Identifiable, Insertable, AsChangeset, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct UserDB {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub monthly_income: f64,
    pub monthly_expenses: f64,
    /// JSON array of strings.
    pub saving_categories: String,
    pub onboarding_completed: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(
    Queryable, Identifiable, Insertable, Selectable, Associations, PartialEq, Debug, Clone,
)]
#[diesel(belongs_to(UserDB, foreign_key = user_id))]
#[diesel(table_name = crate::schema::api_keys)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ApiKeyDB {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub key_hash: String,
    pub created_at: NaiveDateTime,
    pub revoked_at: Option<NaiveDateTime>,
}

impl UserDB {
    pub fn into_domain(self, api_keys: Vec<ApiKeyDB>) -> User {
        User {
            id: self.id,
            name: self.name,
            email: self.email,
            password_hash: self.password_hash,
            monthly_income: self.monthly_income,
            monthly_expenses: self.monthly_expenses,
            saving_categories: serde_json::from_str(&self.saving_categories).unwrap_or_default(),
            onboarding_completed: self.onboarding_completed,
            api_keys: api_keys.into_iter().map(ApiKey::from).collect(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl From<&User> for UserDB {
    fn from(domain: &User) -> Self {
        Self {
            id: domain.id.clone(),
            name: domain.name.clone(),
            email: domain.email.clone(),
            password_hash: domain.password_hash.clone(),
            monthly_income: domain.monthly_income,
            monthly_expenses: domain.monthly_expenses,
            saving_categories: serde_json::to_string(&domain.saving_categories)
                .unwrap_or_else(|_| "[]".to_string()),
            onboarding_completed: domain.onboarding_completed,
            created_at: domain.created_at,
            updated_at: domain.updated_at,
        }
    }
}

impl From<ApiKeyDB> for ApiKey {
    fn from(db: ApiKeyDB) -> Self {
        Self {
            id: db.id,
            user_id: db.user_id,
            name: db.name,
            key_hash: db.key_hash,
            created_at: db.created_at,
            revoked_at: db.revoked_at,
        }
    }
}

impl From<ApiKey> for ApiKeyDB {
    fn from(domain: ApiKey) -> Self {
        Self {
            id: domain.id,
            user_id: domain.user_id,
            name: domain.name,
            key_hash: domain.key_hash,
            created_at: domain.created_at,
            revoked_at: domain.revoked_at,
        }
    }
}
