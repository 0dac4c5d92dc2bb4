//! Recommendation and advisor models.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::{Error, Result, ValidationError};
use crate::goals::Goal;
use crate::transactions::{Transaction, TransactionSummary};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationType {
    Saving,
    Spending,
    Budget,
    Goal,
}

impl RecommendationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecommendationType::Saving => "saving",
            RecommendationType::Spending => "spending",
            RecommendationType::Budget => "budget",
            RecommendationType::Goal => "goal",
        }
    }
}

impl fmt::Display for RecommendationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecommendationType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "saving" => Ok(RecommendationType::Saving),
            "spending" => Ok(RecommendationType::Spending),
            "budget" => Ok(RecommendationType::Budget),
            "goal" => Ok(RecommendationType::Goal),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Unknown recommendation type '{other}'"
            )))),
        }
    }
}

/// A stored budgeting tip.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub id: String,
    pub user_id: String,
    pub transaction_id: Option<String>,
    #[serde(rename = "type")]
    pub recommendation_type: RecommendationType,
    pub title: String,
    pub message: String,
    pub category: Option<String>,
    pub created_at: NaiveDateTime,
}

/// A recommendation as proposed by an advisor, before validation.
///
/// `recommendation_type` is kept as free text; drafts whose type is not one
/// of the known kinds are discarded by the service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationDraft {
    #[serde(rename = "type", default)]
    pub recommendation_type: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub category: Option<String>,
}

/// Where a suggestion came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionSource {
    Ai,
    Fallback,
}

impl SuggestionSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            SuggestionSource::Ai => "ai",
            SuggestionSource::Fallback => "fallback",
        }
    }
}

impl FromStr for SuggestionSource {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "ai" => Ok(SuggestionSource::Ai),
            "fallback" => Ok(SuggestionSource::Fallback),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Unknown suggestion source '{other}'"
            )))),
        }
    }
}

/// Everything the advisor sees when asked about a single transaction.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationContext {
    pub transaction: Transaction,
    pub recent_summary: TransactionSummary,
    pub monthly_income: f64,
    pub monthly_expenses: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdviceContext {
    pub question: Option<String>,
    pub recent_summary: TransactionSummary,
    pub monthly_income: f64,
    pub monthly_expenses: f64,
    pub active_goals: Vec<Goal>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Advice {
    pub advice: String,
    pub source: SuggestionSource,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AdviceRequest {
    pub question: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRecommendationsRequest {
    pub transaction_id: String,
}

/// Input for a contribution plan suggestion.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanRequest {
    pub goal: Goal,
    pub today: NaiveDate,
    pub monthly_income: f64,
    pub monthly_expenses: f64,
}

/// Amounts proposed by an advisor for reaching a goal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct PlanDraft {
    pub monthly_amount: f64,
    pub weekly_amount: f64,
    #[serde(default)]
    pub notes: Option<String>,
}
