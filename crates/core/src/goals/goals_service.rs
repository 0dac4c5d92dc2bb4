use async_trait::async_trait;
use chrono::Utc;
use log::{debug, warn};
use std::sync::Arc;
use uuid::Uuid;

use crate::errors::{Error, FieldErrors, Result};
use crate::goals::goals_model::{Goal, GoalUpdate, NewGoal};
use crate::goals::goals_plan::{fallback_plan, plan_from_draft};
use crate::goals::goals_traits::{GoalRepositoryTrait, GoalServiceTrait};
use crate::recommendations::{AdvisorTrait, PlanRequest};
use crate::users::UserServiceTrait;
use crate::utils::ownership::ensure_owner;
use crate::utils::time_utils::{round_cents, today};

pub struct GoalService {
    goal_repo: Arc<dyn GoalRepositoryTrait>,
    user_service: Arc<dyn UserServiceTrait>,
    advisor: Arc<dyn AdvisorTrait>,
}

impl GoalService {
    pub fn new(
        goal_repo: Arc<dyn GoalRepositoryTrait>,
        user_service: Arc<dyn UserServiceTrait>,
        advisor: Arc<dyn AdvisorTrait>,
    ) -> Self {
        GoalService {
            goal_repo,
            user_service,
            advisor,
        }
    }

    fn load_owned(&self, user_id: &str, goal_id: &str) -> Result<Goal> {
        let goal = self
            .goal_repo
            .find_goal(goal_id)?
            .ok_or_else(|| Error::NotFound("Goal".to_string()))?;
        ensure_owner(&goal.user_id, user_id, "goal")?;
        Ok(goal)
    }

    async fn save(&self, mut goal: Goal) -> Result<Goal> {
        goal.sync_completed();
        goal.updated_at = Utc::now().naive_utc();
        self.goal_repo.update_goal(goal).await
    }
}

#[async_trait]
impl GoalServiceTrait for GoalService {
    async fn create_goal(&self, user_id: &str, new_goal: NewGoal) -> Result<Goal> {
        new_goal.validate()?;
        let now = Utc::now().naive_utc();
        let mut goal = Goal {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            title: new_goal.title.trim().to_string(),
            description: new_goal
                .description
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty()),
            target_amount: new_goal.target_amount,
            current_amount: new_goal.current_amount.unwrap_or(0.0),
            start_date: new_goal.start_date.unwrap_or_else(today),
            target_date: new_goal.target_date,
            category: new_goal.category.trim().to_string(),
            priority: new_goal.priority.unwrap_or_default(),
            completed: false,
            active: new_goal.active.unwrap_or(true),
            reminder_frequency: new_goal.reminder_frequency.unwrap_or_default(),
            contribution_plan: None,
            created_at: now,
            updated_at: now,
        };
        goal.validate()?;
        goal.sync_completed();
        let goal = self.goal_repo.insert_goal(goal).await?;
        debug!("Created goal {} for user {}", goal.id, user_id);
        Ok(goal)
    }

    fn list_goals(&self, user_id: &str, active_only: bool) -> Result<Vec<Goal>> {
        self.goal_repo.load_goals(user_id, active_only)
    }

    fn get_goal(&self, user_id: &str, goal_id: &str) -> Result<Goal> {
        self.load_owned(user_id, goal_id)
    }

    async fn update_goal(
        &self,
        user_id: &str,
        goal_id: &str,
        update: GoalUpdate,
    ) -> Result<Goal> {
        let mut goal = self.load_owned(user_id, goal_id)?;
        update.apply_to(&mut goal);
        goal.validate()?;
        self.save(goal).await
    }

    async fn delete_goal(&self, user_id: &str, goal_id: &str) -> Result<()> {
        let goal = self.load_owned(user_id, goal_id)?;
        self.goal_repo.delete_goal(&goal.id).await?;
        Ok(())
    }

    async fn contribute(&self, user_id: &str, goal_id: &str, amount: f64) -> Result<Goal> {
        let mut errors = FieldErrors::new();
        errors.check(
            !amount.is_finite() || amount <= 0.0,
            "amount",
            "must be greater than zero",
        );
        errors.into_result()?;

        let mut goal = self.load_owned(user_id, goal_id)?;
        goal.current_amount = round_cents(goal.current_amount + amount);
        self.save(goal).await
    }

    async fn suggest_plan(&self, user_id: &str, goal_id: &str) -> Result<Goal> {
        let mut goal = self.load_owned(user_id, goal_id)?;
        let user = self.user_service.get_user(user_id)?;
        let today = today();
        let request = PlanRequest {
            goal: goal.clone(),
            today,
            monthly_income: user.monthly_income,
            monthly_expenses: user.monthly_expenses,
        };

        let plan = match self.advisor.plan_contributions(&request).await {
            Ok(draft) => plan_from_draft(&goal, today, draft).unwrap_or_else(|| {
                warn!("Advisor returned an unusable plan for goal {}", goal.id);
                fallback_plan(&goal, today)
            }),
            Err(e) => {
                warn!(
                    "Advisor failed to plan goal {}: {}; using local plan",
                    goal.id, e
                );
                fallback_plan(&goal, today)
            }
        };
        goal.contribution_plan = Some(plan);
        self.save(goal).await
    }

    fn list_goals_with_reminders(&self) -> Result<Vec<Goal>> {
        self.goal_repo.load_goals_with_reminders()
    }
}
