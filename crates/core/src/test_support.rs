//! In-memory doubles shared by the service tests.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::{Arc, Mutex};

use crate::errors::{DatabaseError, Error, Result};
use crate::goals::{Goal, GoalRepositoryTrait, ReminderFrequency};
use crate::notifications::{EmailDelivery, EmailMessage, EmailSenderTrait};
use crate::recommendations::{
    AdviceContext, AdvisorTrait, PlanDraft, PlanRequest, Recommendation, RecommendationContext,
    RecommendationDraft, RecommendationRepositoryTrait,
};
use crate::transactions::{Transaction, TransactionFilter, TransactionRepositoryTrait};
use crate::users::{
    NewUser, OnboardingInput, PasswordChange, User, UserServiceTrait, UserUpdate,
};

// --- Mock TransactionRepository ---
#[derive(Clone, Default)]
pub(crate) struct MockTransactionRepository {
    pub transactions: Arc<Mutex<Vec<Transaction>>>,
}

#[async_trait]
impl TransactionRepositoryTrait for MockTransactionRepository {
    async fn create(&self, transaction: Transaction) -> Result<Transaction> {
        self.transactions.lock().unwrap().push(transaction.clone());
        Ok(transaction)
    }

    async fn update(&self, transaction: Transaction) -> Result<Transaction> {
        let mut all = self.transactions.lock().unwrap();
        let slot = all
            .iter_mut()
            .find(|t| t.id == transaction.id)
            .ok_or_else(|| Error::Database(DatabaseError::NotFound(transaction.id.clone())))?;
        *slot = transaction.clone();
        Ok(transaction)
    }

    async fn delete(&self, transaction_id: &str) -> Result<usize> {
        let mut all = self.transactions.lock().unwrap();
        let before = all.len();
        all.retain(|t| t.id != transaction_id);
        Ok(before - all.len())
    }

    fn find_by_id(&self, transaction_id: &str) -> Result<Option<Transaction>> {
        Ok(self
            .transactions
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.id == transaction_id)
            .cloned())
    }

    fn list(&self, user_id: &str, filter: &TransactionFilter) -> Result<Vec<Transaction>> {
        let mut found: Vec<Transaction> = self
            .transactions
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.user_id == user_id)
            .filter(|t| filter.transaction_type.map_or(true, |k| t.transaction_type == k))
            .filter(|t| filter.category.as_ref().map_or(true, |c| &t.category == c))
            .filter(|t| filter.from.map_or(true, |f| t.date >= f))
            .filter(|t| filter.to.map_or(true, |to| t.date <= to))
            .cloned()
            .collect();
        found.sort_by(|a, b| b.date.cmp(&a.date));
        if let Some(limit) = filter.limit {
            found.truncate(limit as usize);
        }
        Ok(found)
    }
}

// --- Mock GoalRepository ---
#[derive(Clone, Default)]
pub(crate) struct MockGoalRepository {
    pub goals: Arc<Mutex<Vec<Goal>>>,
}

#[async_trait]
impl GoalRepositoryTrait for MockGoalRepository {
    async fn insert_goal(&self, goal: Goal) -> Result<Goal> {
        self.goals.lock().unwrap().push(goal.clone());
        Ok(goal)
    }

    async fn update_goal(&self, goal: Goal) -> Result<Goal> {
        let mut goals = self.goals.lock().unwrap();
        let slot = goals
            .iter_mut()
            .find(|g| g.id == goal.id)
            .ok_or_else(|| Error::Database(DatabaseError::NotFound(goal.id.clone())))?;
        *slot = goal.clone();
        Ok(goal)
    }

    async fn delete_goal(&self, goal_id: &str) -> Result<usize> {
        let mut goals = self.goals.lock().unwrap();
        let before = goals.len();
        goals.retain(|g| g.id != goal_id);
        Ok(before - goals.len())
    }

    fn find_goal(&self, goal_id: &str) -> Result<Option<Goal>> {
        Ok(self
            .goals
            .lock()
            .unwrap()
            .iter()
            .find(|g| g.id == goal_id)
            .cloned())
    }

    fn load_goals(&self, user_id: &str, active_only: bool) -> Result<Vec<Goal>> {
        let mut goals: Vec<Goal> = self
            .goals
            .lock()
            .unwrap()
            .iter()
            .filter(|g| g.user_id == user_id && (!active_only || g.active))
            .cloned()
            .collect();
        goals.sort_by(|a, b| a.target_date.cmp(&b.target_date));
        Ok(goals)
    }

    fn load_goals_with_reminders(&self) -> Result<Vec<Goal>> {
        Ok(self
            .goals
            .lock()
            .unwrap()
            .iter()
            .filter(|g| {
                g.active && !g.completed && g.reminder_frequency != ReminderFrequency::None
            })
            .cloned()
            .collect())
    }
}

// --- Mock RecommendationRepository ---
#[derive(Clone, Default)]
pub(crate) struct MockRecommendationRepository {
    pub recommendations: Arc<Mutex<Vec<Recommendation>>>,
}

#[async_trait]
impl RecommendationRepositoryTrait for MockRecommendationRepository {
    async fn create_many(
        &self,
        recommendations: Vec<Recommendation>,
    ) -> Result<Vec<Recommendation>> {
        self.recommendations
            .lock()
            .unwrap()
            .extend(recommendations.iter().cloned());
        Ok(recommendations)
    }

    fn find_by_id(&self, recommendation_id: &str) -> Result<Option<Recommendation>> {
        Ok(self
            .recommendations
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == recommendation_id)
            .cloned())
    }

    fn list(&self, user_id: &str, limit: i64) -> Result<Vec<Recommendation>> {
        let mut found: Vec<Recommendation> = self
            .recommendations
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        found.truncate(limit as usize);
        Ok(found)
    }

    async fn delete(&self, recommendation_id: &str) -> Result<usize> {
        let mut all = self.recommendations.lock().unwrap();
        let before = all.len();
        all.retain(|r| r.id != recommendation_id);
        Ok(before - all.len())
    }
}

pub(crate) fn test_user(id: &str, email: &str) -> User {
    let now = Utc::now().naive_utc();
    User {
        id: id.to_string(),
        name: "Test User".to_string(),
        email: email.to_string(),
        password_hash: String::new(),
        monthly_income: 3000.0,
        monthly_expenses: 2000.0,
        saving_categories: Vec::new(),
        onboarding_completed: true,
        api_keys: Vec::new(),
        created_at: now,
        updated_at: now,
    }
}

// --- Stub UserService ---
#[derive(Default)]
pub(crate) struct StubUserService {
    pub users: Mutex<Vec<User>>,
}

impl StubUserService {
    pub fn with_users(users: Vec<User>) -> Self {
        Self {
            users: Mutex::new(users),
        }
    }
}

#[async_trait]
impl UserServiceTrait for StubUserService {
    async fn register(&self, _new_user: NewUser) -> Result<User> {
        Err(Error::Unexpected("not supported in tests".into()))
    }

    fn authenticate(&self, _email: &str, _password: &str) -> Result<User> {
        Err(Error::Unauthorized("not supported in tests".into()))
    }

    fn get_user(&self, user_id: &str) -> Result<User> {
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == user_id)
            .cloned()
            .ok_or_else(|| Error::NotFound("User".to_string()))
    }

    fn list_users(&self) -> Result<Vec<User>> {
        Ok(self.users.lock().unwrap().clone())
    }

    async fn update_profile(&self, user_id: &str, _update: UserUpdate) -> Result<User> {
        self.get_user(user_id)
    }

    async fn complete_onboarding(&self, user_id: &str, _input: OnboardingInput) -> Result<User> {
        self.get_user(user_id)
    }

    async fn change_password(&self, _user_id: &str, _change: PasswordChange) -> Result<()> {
        Ok(())
    }
}

// --- Advisors ---

/// Advisor whose every call fails, as when the provider is unreachable.
pub(crate) struct FailingAdvisor;

#[async_trait]
impl AdvisorTrait for FailingAdvisor {
    async fn recommend(&self, _context: &RecommendationContext) -> Result<Vec<RecommendationDraft>> {
        Err(Error::Unexpected("provider unavailable".into()))
    }

    async fn advise(&self, _context: &AdviceContext) -> Result<String> {
        Err(Error::Unexpected("provider unavailable".into()))
    }

    async fn plan_contributions(&self, _request: &PlanRequest) -> Result<PlanDraft> {
        Err(Error::Unexpected("provider unavailable".into()))
    }
}

/// Advisor returning canned answers.
#[derive(Default)]
pub(crate) struct StaticAdvisor {
    pub drafts: Vec<RecommendationDraft>,
    pub advice: String,
    pub plan: PlanDraft,
}

#[async_trait]
impl AdvisorTrait for StaticAdvisor {
    async fn recommend(&self, _context: &RecommendationContext) -> Result<Vec<RecommendationDraft>> {
        Ok(self.drafts.clone())
    }

    async fn advise(&self, _context: &AdviceContext) -> Result<String> {
        Ok(self.advice.clone())
    }

    async fn plan_contributions(&self, _request: &PlanRequest) -> Result<PlanDraft> {
        Ok(self.plan.clone())
    }
}

// --- Email sender ---
#[derive(Default)]
pub(crate) struct RecordingEmailSender {
    pub sent: Mutex<Vec<EmailMessage>>,
    pub fail: bool,
}

#[async_trait]
impl EmailSenderTrait for RecordingEmailSender {
    async fn send(&self, message: EmailMessage) -> EmailDelivery {
        if self.fail {
            return EmailDelivery::failed("provider rejected the message");
        }
        self.sent.lock().unwrap().push(message);
        EmailDelivery::delivered(Some("msg_1".to_string()))
    }
}
