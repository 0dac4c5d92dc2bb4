//! Goals module - domain models, services, and traits.

mod goals_model;
mod goals_plan;
mod goals_service;
mod goals_traits;


pub use goals_model::{
    ContributionPlan, Goal, GoalContribution, GoalPriority, GoalProgress, GoalUpdate,
    GoalWithProgress, NewGoal, ReminderFrequency,
};
pub use goals_plan::{fallback_plan, plan_from_draft};
pub use goals_service::GoalService;
pub use goals_traits::{GoalRepositoryTrait, GoalServiceTrait};
