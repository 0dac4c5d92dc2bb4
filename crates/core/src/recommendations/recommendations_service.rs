use async_trait::async_trait;
use chrono::{Duration, Utc};
use log::{debug, info, warn};
use std::sync::Arc;
use uuid::Uuid;

use super::fallback::{fallback_advice, truncate_chars};
use super::recommendations_model::{
    Advice, AdviceContext, Recommendation, RecommendationContext, RecommendationDraft,
    RecommendationType, SuggestionSource,
};
use super::recommendations_traits::{
    AdvisorTrait, RecommendationRepositoryTrait, RecommendationServiceTrait,
};
use crate::constants::{
    FALLBACK_MESSAGE_MAX_CHARS, MAX_RECOMMENDATIONS_PER_REQUEST, RECOMMENDATION_CONTEXT_DAYS,
};
use crate::errors::{Error, Result};
use crate::goals::GoalServiceTrait;
use crate::transactions::{TransactionServiceTrait, TransactionSummary};
use crate::users::UserServiceTrait;
use crate::utils::ownership::{clamp_limit, ensure_owner};
use crate::utils::time_utils::today;

const TITLE_MAX_CHARS: usize = 120;

pub struct RecommendationService {
    repository: Arc<dyn RecommendationRepositoryTrait>,
    transaction_service: Arc<dyn TransactionServiceTrait>,
    user_service: Arc<dyn UserServiceTrait>,
    goal_service: Arc<dyn GoalServiceTrait>,
    advisor: Arc<dyn AdvisorTrait>,
}

impl RecommendationService {
    pub fn new(
        repository: Arc<dyn RecommendationRepositoryTrait>,
        transaction_service: Arc<dyn TransactionServiceTrait>,
        user_service: Arc<dyn UserServiceTrait>,
        goal_service: Arc<dyn GoalServiceTrait>,
        advisor: Arc<dyn AdvisorTrait>,
    ) -> Self {
        Self {
            repository,
            transaction_service,
            user_service,
            goal_service,
            advisor,
        }
    }

    fn recent_summary(&self, user_id: &str) -> Result<TransactionSummary> {
        let to = today();
        let from = to - Duration::days(RECOMMENDATION_CONTEXT_DAYS);
        self.transaction_service
            .get_summary(user_id, Some(from), Some(to))
    }
}

/// Turns advisor drafts into storable recommendations.
///
/// Drafts with an unknown type or an empty title/message are dropped, and at
/// most `MAX_RECOMMENDATIONS_PER_REQUEST` are kept.
pub fn accept_drafts(
    user_id: &str,
    transaction_id: Option<&str>,
    drafts: Vec<RecommendationDraft>,
) -> Vec<Recommendation> {
    let now = Utc::now().naive_utc();
    drafts
        .into_iter()
        .filter_map(|draft| {
            let kind = match draft.recommendation_type.parse::<RecommendationType>() {
                Ok(kind) => kind,
                Err(_) => {
                    debug!(
                        "Dropping recommendation with unknown type '{}'",
                        draft.recommendation_type
                    );
                    return None;
                }
            };
            let title = draft.title.trim();
            let message = draft.message.trim();
            if title.is_empty() || message.is_empty() {
                return None;
            }
            Some(Recommendation {
                id: Uuid::new_v4().to_string(),
                user_id: user_id.to_string(),
                transaction_id: transaction_id.map(str::to_string),
                recommendation_type: kind,
                title: truncate_chars(title, TITLE_MAX_CHARS),
                message: truncate_chars(message, FALLBACK_MESSAGE_MAX_CHARS * 2),
                category: draft
                    .category
                    .map(|c| c.trim().to_string())
                    .filter(|c| !c.is_empty()),
                created_at: now,
            })
        })
        .take(MAX_RECOMMENDATIONS_PER_REQUEST)
        .collect()
}

#[async_trait]
impl RecommendationServiceTrait for RecommendationService {
    fn list_recommendations(
        &self,
        user_id: &str,
        limit: Option<i64>,
    ) -> Result<Vec<Recommendation>> {
        self.repository.list(user_id, clamp_limit(limit))
    }

    async fn generate_for_transaction(
        &self,
        user_id: &str,
        transaction_id: &str,
    ) -> Result<Vec<Recommendation>> {
        let transaction = self
            .transaction_service
            .get_transaction(user_id, transaction_id)?;
        let user = self.user_service.get_user(user_id)?;
        let context = RecommendationContext {
            transaction,
            recent_summary: self.recent_summary(user_id)?,
            monthly_income: user.monthly_income,
            monthly_expenses: user.monthly_expenses,
        };

        let drafts = match self.advisor.recommend(&context).await {
            Ok(drafts) => drafts,
            Err(e) => {
                warn!(
                    "Advisor failed for transaction {}: {}; returning no recommendations",
                    transaction_id, e
                );
                return Ok(Vec::new());
            }
        };

        let accepted = accept_drafts(user_id, Some(transaction_id), drafts);
        if accepted.is_empty() {
            return Ok(accepted);
        }
        let stored = self.repository.create_many(accepted).await?;
        info!(
            "Stored {} recommendation(s) for transaction {}",
            stored.len(),
            transaction_id
        );
        Ok(stored)
    }

    async fn get_advice(&self, user_id: &str, question: Option<String>) -> Result<Advice> {
        let user = self.user_service.get_user(user_id)?;
        let active_goals = self
            .goal_service
            .list_goals(user_id, true)?
            .into_iter()
            .filter(|g| !g.completed)
            .collect();
        let context = AdviceContext {
            question: question
                .map(|q| q.trim().to_string())
                .filter(|q| !q.is_empty()),
            recent_summary: self.recent_summary(user_id)?,
            monthly_income: user.monthly_income,
            monthly_expenses: user.monthly_expenses,
            active_goals,
        };

        match self.advisor.advise(&context).await {
            Ok(text) if !text.trim().is_empty() => Ok(Advice {
                advice: text.trim().to_string(),
                source: SuggestionSource::Ai,
            }),
            Ok(_) => {
                warn!("Advisor returned empty advice; using local advice");
                Ok(Advice {
                    advice: fallback_advice(&context),
                    source: SuggestionSource::Fallback,
                })
            }
            Err(e) => {
                warn!("Advisor failed to give advice: {}; using local advice", e);
                Ok(Advice {
                    advice: fallback_advice(&context),
                    source: SuggestionSource::Fallback,
                })
            }
        }
    }

    async fn delete_recommendation(&self, user_id: &str, recommendation_id: &str) -> Result<()> {
        let recommendation = self
            .repository
            .find_by_id(recommendation_id)?
            .ok_or_else(|| Error::NotFound("Recommendation".to_string()))?;
        ensure_owner(&recommendation.user_id, user_id, "recommendation")?;
        self.repository.delete(&recommendation.id).await?;
        Ok(())
    }
}
