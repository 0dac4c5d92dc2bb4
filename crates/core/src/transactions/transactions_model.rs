//! Transaction domain models.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::{Error, FieldErrors, Result, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    #[default]
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Unknown transaction type '{other}'"
            )))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecurrenceFrequency {
    Daily,
    Weekly,
    Biweekly,
    Monthly,
    Yearly,
}

impl RecurrenceFrequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecurrenceFrequency::Daily => "daily",
            RecurrenceFrequency::Weekly => "weekly",
            RecurrenceFrequency::Biweekly => "biweekly",
            RecurrenceFrequency::Monthly => "monthly",
            RecurrenceFrequency::Yearly => "yearly",
        }
    }
}

impl FromStr for RecurrenceFrequency {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" => Ok(RecurrenceFrequency::Daily),
            "weekly" => Ok(RecurrenceFrequency::Weekly),
            "biweekly" => Ok(RecurrenceFrequency::Biweekly),
            "monthly" => Ok(RecurrenceFrequency::Monthly),
            "yearly" => Ok(RecurrenceFrequency::Yearly),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Unknown recurrence frequency '{other}'"
            )))),
        }
    }
}

/// Domain model representing a recorded income or expense.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub user_id: String,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub amount: f64,
    pub category: String,
    pub description: Option<String>,
    pub date: NaiveDate,
    pub is_recurring: bool,
    pub recurrence_frequency: Option<RecurrenceFrequency>,
    pub tags: Vec<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Transaction {
    pub fn is_expense(&self) -> bool {
        self.transaction_type == TransactionType::Expense
    }

    pub fn validate(&self) -> Result<()> {
        let mut errors = FieldErrors::new();
        check_fields(
            &mut errors,
            self.amount,
            &self.category,
            self.is_recurring,
            self.recurrence_frequency,
        );
        errors.into_result()
    }
}

/// Input model for creating a transaction.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    #[serde(rename = "type", default)]
    pub transaction_type: TransactionType,
    pub amount: f64,
    pub category: String,
    pub description: Option<String>,
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub is_recurring: bool,
    pub recurrence_frequency: Option<RecurrenceFrequency>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl NewTransaction {
    pub fn validate(&self) -> Result<()> {
        let mut errors = FieldErrors::new();
        check_fields(
            &mut errors,
            self.amount,
            &self.category,
            self.is_recurring,
            self.recurrence_frequency,
        );
        errors.into_result()
    }
}

/// Partial update for a transaction. Absent fields are left unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TransactionUpdate {
    #[serde(rename = "type")]
    pub transaction_type: Option<TransactionType>,
    pub amount: Option<f64>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub date: Option<NaiveDate>,
    pub is_recurring: Option<bool>,
    pub recurrence_frequency: Option<RecurrenceFrequency>,
    pub tags: Option<Vec<String>>,
}

/// Query filters for listing transactions.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TransactionFilter {
    #[serde(rename = "type")]
    pub transaction_type: Option<TransactionType>,
    pub category: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub limit: Option<i64>,
}

impl TransactionFilter {
    pub fn validate(&self) -> Result<()> {
        if let (Some(from), Some(to)) = (self.from, self.to) {
            if from > to {
                let mut errors = FieldErrors::new();
                errors.push("from", "must not be after 'to'");
                return errors.into_result();
            }
        }
        Ok(())
    }

    pub fn between(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        Self {
            from,
            to,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTotal {
    pub category: String,
    pub total: f64,
    pub count: usize,
}

/// Aggregates over a date range, used by the dashboard charts and emails.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TransactionSummary {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub total_income: f64,
    pub total_expenses: f64,
    pub balance: f64,
    pub transaction_count: usize,
    pub expenses_by_category: Vec<CategoryTotal>,
}

fn check_fields(
    errors: &mut FieldErrors,
    amount: f64,
    category: &str,
    is_recurring: bool,
    frequency: Option<RecurrenceFrequency>,
) {
    errors.check(
        !amount.is_finite() || amount <= 0.0,
        "amount",
        "must be greater than zero",
    );
    errors.check(category.trim().is_empty(), "category", "is required");
    errors.check(
        is_recurring && frequency.is_none(),
        "recurrenceFrequency",
        "is required for recurring transactions",
    );
    errors.check(
        !is_recurring && frequency.is_some(),
        "recurrenceFrequency",
        "is only allowed on recurring transactions",
    );
}
