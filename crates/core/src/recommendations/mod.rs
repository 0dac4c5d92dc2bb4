//! Recommendations module - advisor seam, stored tips and local fallbacks.

mod fallback;
mod recommendations_model;
mod recommendations_service;
mod recommendations_traits;

#[cfg(test)]
mod recommendations_service_tests;

pub use fallback::{fallback_advice, fallback_draft_from_text};
pub use recommendations_model::{
    Advice, AdviceContext, AdviceRequest, GenerateRecommendationsRequest, PlanDraft, PlanRequest,
    Recommendation, RecommendationContext, RecommendationDraft, RecommendationType,
    SuggestionSource,
};
pub use recommendations_service::{accept_drafts, RecommendationService};
pub use recommendations_traits::{
    AdvisorTrait, RecommendationRepositoryTrait, RecommendationServiceTrait,
};
