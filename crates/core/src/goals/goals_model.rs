//! Goals domain models.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::errors::{Error, FieldErrors, Result, ValidationError};
use crate::recommendations::SuggestionSource;
use crate::utils::time_utils::{days_between, round_cents};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GoalPriority {
    Low,
    #[default]
    Medium,
    High,
}

impl GoalPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            GoalPriority::Low => "low",
            GoalPriority::Medium => "medium",
            GoalPriority::High => "high",
        }
    }
}

impl FromStr for GoalPriority {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "low" => Ok(GoalPriority::Low),
            "medium" => Ok(GoalPriority::Medium),
            "high" => Ok(GoalPriority::High),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Unknown goal priority '{other}'"
            )))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReminderFrequency {
    #[default]
    None,
    Daily,
    Weekly,
    Monthly,
}

impl ReminderFrequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReminderFrequency::None => "none",
            ReminderFrequency::Daily => "daily",
            ReminderFrequency::Weekly => "weekly",
            ReminderFrequency::Monthly => "monthly",
        }
    }
}

impl FromStr for ReminderFrequency {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "none" => Ok(ReminderFrequency::None),
            "daily" => Ok(ReminderFrequency::Daily),
            "weekly" => Ok(ReminderFrequency::Weekly),
            "monthly" => Ok(ReminderFrequency::Monthly),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Unknown reminder frequency '{other}'"
            )))),
        }
    }
}

/// Suggested periodic amounts for reaching a goal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContributionPlan {
    pub monthly_amount: f64,
    pub weekly_amount: f64,
    pub remaining_amount: f64,
    pub months_remaining: i64,
    pub weeks_remaining: i64,
    pub notes: Option<String>,
    pub source: SuggestionSource,
    pub generated_at: NaiveDateTime,
}

/// Domain model representing a savings goal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub description: Option<String>,
    pub target_amount: f64,
    pub current_amount: f64,
    pub start_date: NaiveDate,
    pub target_date: NaiveDate,
    pub category: String,
    pub priority: GoalPriority,
    pub completed: bool,
    pub active: bool,
    pub reminder_frequency: ReminderFrequency,
    pub contribution_plan: Option<ContributionPlan>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Goal {
    /// Recomputes `completed` from the amounts. Must run after every change
    /// to either amount.
    pub fn sync_completed(&mut self) {
        self.completed = self.current_amount >= self.target_amount;
    }

    pub fn remaining_amount(&self) -> f64 {
        round_cents((self.target_amount - self.current_amount).max(0.0))
    }

    pub fn progress(&self, today: NaiveDate) -> GoalProgress {
        let percentage = if self.target_amount > 0.0 {
            (self.current_amount / self.target_amount * 100.0).clamp(0.0, 100.0)
        } else {
            0.0
        };
        GoalProgress {
            percentage: round_cents(percentage),
            remaining_amount: self.remaining_amount(),
            days_left: days_between(today, self.target_date),
            completed: self.completed,
        }
    }

    pub fn validate(&self) -> Result<()> {
        let mut errors = FieldErrors::new();
        check_goal_fields(
            &mut errors,
            &self.title,
            self.target_amount,
            self.current_amount,
            &self.category,
        );
        errors.check(
            self.target_date < self.start_date,
            "targetDate",
            "must not be before the start date",
        );
        errors.into_result()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GoalProgress {
    pub percentage: f64,
    pub remaining_amount: f64,
    pub days_left: i64,
    pub completed: bool,
}

/// A goal together with its computed progress, as returned by the API.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GoalWithProgress {
    #[serde(flatten)]
    pub goal: Goal,
    pub progress: GoalProgress,
}

impl GoalWithProgress {
    pub fn new(goal: Goal, today: NaiveDate) -> Self {
        let progress = goal.progress(today);
        Self { goal, progress }
    }
}

/// Input model for creating a new goal.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct NewGoal {
    pub title: String,
    pub description: Option<String>,
    pub target_amount: f64,
    pub current_amount: Option<f64>,
    pub start_date: Option<NaiveDate>,
    pub target_date: NaiveDate,
    #[serde(default)]
    pub category: String,
    pub priority: Option<GoalPriority>,
    pub active: Option<bool>,
    pub reminder_frequency: Option<ReminderFrequency>,
}

impl NewGoal {
    pub fn validate(&self) -> Result<()> {
        let mut errors = FieldErrors::new();
        check_goal_fields(
            &mut errors,
            &self.title,
            self.target_amount,
            self.current_amount.unwrap_or(0.0),
            &self.category,
        );
        errors.into_result()
    }
}

/// Partial update for a goal.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct GoalUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub target_amount: Option<f64>,
    pub current_amount: Option<f64>,
    pub start_date: Option<NaiveDate>,
    pub target_date: Option<NaiveDate>,
    pub category: Option<String>,
    pub priority: Option<GoalPriority>,
    pub active: Option<bool>,
    pub reminder_frequency: Option<ReminderFrequency>,
}

impl GoalUpdate {
    pub fn apply_to(self, goal: &mut Goal) {
        if let Some(title) = self.title {
            goal.title = title.trim().to_string();
        }
        if let Some(description) = self.description {
            let description = description.trim().to_string();
            goal.description = (!description.is_empty()).then_some(description);
        }
        if let Some(target) = self.target_amount {
            goal.target_amount = target;
        }
        if let Some(current) = self.current_amount {
            goal.current_amount = current;
        }
        if let Some(start) = self.start_date {
            goal.start_date = start;
        }
        if let Some(target_date) = self.target_date {
            goal.target_date = target_date;
        }
        if let Some(category) = self.category {
            goal.category = category.trim().to_string();
        }
        if let Some(priority) = self.priority {
            goal.priority = priority;
        }
        if let Some(active) = self.active {
            goal.active = active;
        }
        if let Some(reminder) = self.reminder_frequency {
            goal.reminder_frequency = reminder;
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct GoalContribution {
    pub amount: f64,
}

fn check_goal_fields(
    errors: &mut FieldErrors,
    title: &str,
    target_amount: f64,
    current_amount: f64,
    category: &str,
) {
    errors.check(title.trim().is_empty(), "title", "is required");
    errors.check(
        !target_amount.is_finite() || target_amount <= 0.0,
        "targetAmount",
        "must be greater than zero",
    );
    errors.check(
        !current_amount.is_finite() || current_amount < 0.0,
        "currentAmount",
        "must be zero or a positive number",
    );
    errors.check(category.trim().is_empty(), "category", "is required");
}
