//! User and API key domain models.

use chrono::NaiveDateTime;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::constants::{API_KEY_NAME_MAX_LEN, PASSWORD_MIN_LEN};
use crate::errors::{FieldErrors, Result};

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex"));

/// Domain model representing a registered user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub monthly_income: f64,
    pub monthly_expenses: f64,
    pub saving_categories: Vec<String>,
    pub onboarding_completed: bool,
    #[serde(default)]
    pub api_keys: Vec<ApiKey>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl User {
    /// Keys that can still authenticate.
    pub fn active_api_keys(&self) -> impl Iterator<Item = &ApiKey> {
        self.api_keys.iter().filter(|k| k.is_active())
    }
}

/// A named API key belonging to a user. Only the hash of the secret is kept.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ApiKey {
    pub id: String,
    pub user_id: String,
    pub name: String,
    #[serde(skip_serializing, default)]
    pub key_hash: String,
    pub created_at: NaiveDateTime,
    pub revoked_at: Option<NaiveDateTime>,
}

impl ApiKey {
    pub fn is_active(&self) -> bool {
        self.revoked_at.is_none()
    }
}

/// Registration payload.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl NewUser {
    /// Trims the name and lower-cases the email.
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            email: normalize_email(&self.email),
            password: self.password,
        }
    }

    pub fn validate(&self) -> Result<()> {
        let mut errors = FieldErrors::new();
        errors.check(self.name.trim().is_empty(), "name", "is required");
        if self.email.trim().is_empty() {
            errors.push("email", "is required");
        } else if !is_valid_email(&self.email) {
            errors.push("email", "is not a valid email address");
        }
        check_password(&mut errors, "password", &self.password);
        errors.into_result()
    }
}

/// What the repository needs to persist a new user.
#[derive(Debug, Clone)]
pub struct UserRegistration {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

/// Partial profile update.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    pub name: Option<String>,
    pub monthly_income: Option<f64>,
    pub monthly_expenses: Option<f64>,
    pub saving_categories: Option<Vec<String>>,
}

impl UserUpdate {
    pub fn validate(&self) -> Result<()> {
        let mut errors = FieldErrors::new();
        if let Some(name) = &self.name {
            errors.check(name.trim().is_empty(), "name", "cannot be empty");
        }
        check_money(&mut errors, "monthlyIncome", self.monthly_income);
        check_money(&mut errors, "monthlyExpenses", self.monthly_expenses);
        errors.into_result()
    }

    pub fn apply_to(self, user: &mut User) {
        if let Some(name) = self.name {
            user.name = name.trim().to_string();
        }
        if let Some(income) = self.monthly_income {
            user.monthly_income = income;
        }
        if let Some(expenses) = self.monthly_expenses {
            user.monthly_expenses = expenses;
        }
        if let Some(categories) = self.saving_categories {
            user.saving_categories = normalize_labels(categories);
        }
    }
}

/// Data captured by the onboarding flow.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingInput {
    pub monthly_income: f64,
    pub monthly_expenses: f64,
    #[serde(default)]
    pub saving_categories: Vec<String>,
}

impl OnboardingInput {
    pub fn validate(&self) -> Result<()> {
        let mut errors = FieldErrors::new();
        check_money(&mut errors, "monthlyIncome", Some(self.monthly_income));
        check_money(&mut errors, "monthlyExpenses", Some(self.monthly_expenses));
        errors.into_result()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordChange {
    pub current_password: String,
    pub new_password: String,
}

impl PasswordChange {
    pub fn validate(&self) -> Result<()> {
        let mut errors = FieldErrors::new();
        errors.check(
            self.current_password.is_empty(),
            "currentPassword",
            "is required",
        );
        check_password(&mut errors, "newPassword", &self.new_password);
        errors.into_result()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewApiKey {
    pub name: String,
}

impl NewApiKey {
    pub fn validate(&self) -> Result<()> {
        let mut errors = FieldErrors::new();
        let name = self.name.trim();
        errors.check(name.is_empty(), "name", "is required");
        errors.check(
            name.chars().count() > API_KEY_NAME_MAX_LEN,
            "name",
            "must be at most 64 characters",
        );
        errors.into_result()
    }
}

/// Returned once, when a key is created. `token` is never retrievable again.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedApiKey {
    pub key: ApiKey,
    pub token: String,
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email.trim())
}

/// Trims labels, drops empty ones and removes duplicates, keeping order.
pub fn normalize_labels(labels: Vec<String>) -> Vec<String> {
    let mut seen: Vec<String> = Vec::with_capacity(labels.len());
    for label in labels {
        let label = label.trim();
        if !label.is_empty() && !seen.iter().any(|s| s == label) {
            seen.push(label.to_string());
        }
    }
    seen
}

fn check_password(errors: &mut FieldErrors, field: &str, password: &str) {
    if password.chars().count() < PASSWORD_MIN_LEN {
        errors.push(field, format!("must be at least {PASSWORD_MIN_LEN} characters"));
    }
}

fn check_money(errors: &mut FieldErrors, field: &str, value: Option<f64>) {
    if let Some(v) = value {
        if !v.is_finite() || v < 0.0 {
            errors.push(field, "must be zero or a positive number");
        }
    }
}
