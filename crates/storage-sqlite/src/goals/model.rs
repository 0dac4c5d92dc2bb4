//! Database models for goals.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use log::warn;

use kipo_core::goals::{ContributionPlan, Goal};

/// Database model for goals
#[derive(Queryable, Identifiable, Insertable, AsChangeset, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::goals)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
pub struct GoalDB {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub description: Option<String>,
    pub target_amount: f64,
    pub current_amount: f64,
    pub start_date: NaiveDate,
    pub target_date: NaiveDate,
    pub category: String,
    pub priority: String,
    pub completed: bool,
    pub active: bool,
    pub reminder_frequency: String,
    /// JSON-encoded [`ContributionPlan`].
    pub contribution_plan: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

// Conversion to domain models
impl From<GoalDB> for Goal {
    fn from(db: GoalDB) -> Self {
        let contribution_plan = db.contribution_plan.as_deref().and_then(|raw| {
            serde_json::from_str::<ContributionPlan>(raw)
                .map_err(|e| warn!("Ignoring unreadable plan on goal {}: {}", db.id, e))
                .ok()
        });
        Self {
            id: db.id,
            user_id: db.user_id,
            title: db.title,
            description: db.description,
            target_amount: db.target_amount,
            current_amount: db.current_amount,
            start_date: db.start_date,
            target_date: db.target_date,
            category: db.category,
            priority: db.priority.parse().unwrap_or_default(),
            completed: db.completed,
            active: db.active,
            reminder_frequency: db.reminder_frequency.parse().unwrap_or_default(),
            contribution_plan,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl TryFrom<Goal> for GoalDB {
    type Error = serde_json::Error;

    fn try_from(domain: Goal) -> Result<Self, Self::Error> {
        let contribution_plan = domain
            .contribution_plan
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;
        Ok(Self {
            id: domain.id,
            user_id: domain.user_id,
            title: domain.title,
            description: domain.description,
            target_amount: domain.target_amount,
            current_amount: domain.current_amount,
            start_date: domain.start_date,
            target_date: domain.target_date,
            category: domain.category,
            priority: domain.priority.as_str().to_string(),
            completed: domain.completed,
            active: domain.active,
            reminder_frequency: domain.reminder_frequency.as_str().to_string(),
            contribution_plan,
            created_at: domain.created_at,
            updated_at: domain.updated_at,
        })
    }
}
