//! Payment card models.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::errors::{Error, FieldErrors, Result, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CardKind {
    Debit,
    #[default]
    Credit,
}

impl CardKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CardKind::Debit => "debit",
            CardKind::Credit => "credit",
        }
    }
}

impl FromStr for CardKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "debit" => Ok(CardKind::Debit),
            "credit" => Ok(CardKind::Credit),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Unknown card kind '{other}'"
            )))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub brand: String,
    pub kind: CardKind,
    pub cutoff_date: NaiveDate,
    pub due_date: NaiveDate,
    pub minimum_payment: f64,
    pub no_interest_payment: f64,
    pub paid: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Card {
    pub fn validate(&self) -> Result<()> {
        let mut errors = FieldErrors::new();
        errors.check(self.name.trim().is_empty(), "name", "is required");
        errors.check(self.brand.trim().is_empty(), "brand", "is required");
        let valid_amount = |v: f64| v.is_finite() && v >= 0.0;
        errors.check(
            !valid_amount(self.minimum_payment),
            "minimumPayment",
            "must be zero or a positive number",
        );
        errors.check(
            !valid_amount(self.no_interest_payment),
            "noInterestPayment",
            "must be zero or a positive number",
        );
        errors.check(
            self.minimum_payment > self.no_interest_payment,
            "minimumPayment",
            "must not exceed the no-interest payment",
        );
        errors.check(
            self.due_date < self.cutoff_date,
            "dueDate",
            "must not be before the cutoff date",
        );
        errors.into_result()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCard {
    pub name: String,
    pub brand: String,
    #[serde(default)]
    pub kind: CardKind,
    pub cutoff_date: NaiveDate,
    pub due_date: NaiveDate,
    #[serde(default)]
    pub minimum_payment: f64,
    #[serde(default)]
    pub no_interest_payment: f64,
    #[serde(default)]
    pub paid: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CardUpdate {
    pub name: Option<String>,
    pub brand: Option<String>,
    pub kind: Option<CardKind>,
    pub cutoff_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub minimum_payment: Option<f64>,
    pub no_interest_payment: Option<f64>,
    pub paid: Option<bool>,
}

impl CardUpdate {
    pub fn apply_to(self, card: &mut Card) {
        if let Some(name) = self.name {
            card.name = name.trim().to_string();
        }
        if let Some(brand) = self.brand {
            card.brand = brand.trim().to_string();
        }
        if let Some(kind) = self.kind {
            card.kind = kind;
        }
        if let Some(cutoff) = self.cutoff_date {
            card.cutoff_date = cutoff;
        }
        if let Some(due) = self.due_date {
            card.due_date = due;
        }
        if let Some(min) = self.minimum_payment {
            card.minimum_payment = min;
        }
        if let Some(no_interest) = self.no_interest_payment {
            card.no_interest_payment = no_interest;
        }
        if let Some(paid) = self.paid {
            card.paid = paid;
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardPaidUpdate {
    pub paid: bool,
}
