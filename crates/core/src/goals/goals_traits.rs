use crate::errors::Result;
use crate::goals::goals_model::{Goal, GoalUpdate, NewGoal};
use async_trait::async_trait;

/// Trait for goal repository operations
#[async_trait]
pub trait GoalRepositoryTrait: Send + Sync {
    async fn insert_goal(&self, goal: Goal) -> Result<Goal>;
    async fn update_goal(&self, goal: Goal) -> Result<Goal>;
    async fn delete_goal(&self, goal_id: &str) -> Result<usize>;
    fn find_goal(&self, goal_id: &str) -> Result<Option<Goal>>;
    /// Goals of `user_id`, earliest target date first.
    fn load_goals(&self, user_id: &str, active_only: bool) -> Result<Vec<Goal>>;
    /// Active, incomplete goals of every user that have a reminder set.
    fn load_goals_with_reminders(&self) -> Result<Vec<Goal>>;
}

/// Trait for goal service operations
#[async_trait]
pub trait GoalServiceTrait: Send + Sync {
    async fn create_goal(&self, user_id: &str, new_goal: NewGoal) -> Result<Goal>;
    fn list_goals(&self, user_id: &str, active_only: bool) -> Result<Vec<Goal>>;
    fn get_goal(&self, user_id: &str, goal_id: &str) -> Result<Goal>;
    async fn update_goal(&self, user_id: &str, goal_id: &str, update: GoalUpdate)
        -> Result<Goal>;
    async fn delete_goal(&self, user_id: &str, goal_id: &str) -> Result<()>;
    async fn contribute(&self, user_id: &str, goal_id: &str, amount: f64) -> Result<Goal>;
    /// Stores a contribution plan on the goal. Falls back to a locally
    /// computed plan when the advisor fails.
    async fn suggest_plan(&self, user_id: &str, goal_id: &str) -> Result<Goal>;
    fn list_goals_with_reminders(&self) -> Result<Vec<Goal>>;
}
