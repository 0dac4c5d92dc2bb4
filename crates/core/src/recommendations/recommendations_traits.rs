use async_trait::async_trait;

use super::recommendations_model::{
    Advice, AdviceContext, PlanDraft, PlanRequest, Recommendation, RecommendationContext,
    RecommendationDraft,
};
use crate::errors::Result;

/// An external source of budgeting suggestions, typically an LLM.
///
/// Callers treat every error as "no suggestion" and fall back to local
/// computations, so implementations should not retry aggressively.
#[async_trait]
pub trait AdvisorTrait: Send + Sync {
    async fn recommend(&self, context: &RecommendationContext) -> Result<Vec<RecommendationDraft>>;

    async fn advise(&self, context: &AdviceContext) -> Result<String>;

    async fn plan_contributions(&self, request: &PlanRequest) -> Result<PlanDraft>;
}

#[async_trait]
pub trait RecommendationRepositoryTrait: Send + Sync {
    async fn create_many(&self, recommendations: Vec<Recommendation>)
        -> Result<Vec<Recommendation>>;

    fn find_by_id(&self, recommendation_id: &str) -> Result<Option<Recommendation>>;

    /// Newest first.
    fn list(&self, user_id: &str, limit: i64) -> Result<Vec<Recommendation>>;

    async fn delete(&self, recommendation_id: &str) -> Result<usize>;
}

#[async_trait]
pub trait RecommendationServiceTrait: Send + Sync {
    fn list_recommendations(&self, user_id: &str, limit: Option<i64>)
        -> Result<Vec<Recommendation>>;

    /// Asks the advisor for tips about one transaction and stores the valid
    /// ones. Advisor failures yield an empty list.
    async fn generate_for_transaction(
        &self,
        user_id: &str,
        transaction_id: &str,
    ) -> Result<Vec<Recommendation>>;

    async fn get_advice(&self, user_id: &str, question: Option<String>) -> Result<Advice>;

    async fn delete_recommendation(&self, user_id: &str, recommendation_id: &str) -> Result<()>;
}
