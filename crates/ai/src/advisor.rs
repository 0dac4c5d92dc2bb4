//! [`AdvisorTrait`] implementations.

use async_trait::async_trait;
use log::debug;
use std::sync::Arc;

use kipo_core::recommendations::{
    AdviceContext, AdvisorTrait, PlanDraft, PlanRequest, RecommendationContext,
    RecommendationDraft,
};
use kipo_core::Result;

use crate::client::{CompletionBackend, RigBackend};
use crate::config::AiConfig;
use crate::error::AiError;
use crate::extract::{parse_plan, parse_recommendations, strip_reasoning};
use crate::prompts::{advice_prompt, plan_prompt, recommendation_prompt, ADVISOR_PREAMBLE};

/// Advisor that prompts an LLM and parses its replies.
pub struct LlmAdvisor {
    backend: Arc<dyn CompletionBackend>,
}

impl LlmAdvisor {
    pub fn new(config: AiConfig) -> Self {
        Self::with_backend(Arc::new(RigBackend::new(config)))
    }

    pub fn with_backend(backend: Arc<dyn CompletionBackend>) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl AdvisorTrait for LlmAdvisor {
    async fn recommend(&self, context: &RecommendationContext) -> Result<Vec<RecommendationDraft>> {
        let reply = self
            .backend
            .complete(ADVISOR_PREAMBLE, &recommendation_prompt(context))
            .await?;
        let drafts = parse_recommendations(&reply);
        debug!(
            "Advisor proposed {} recommendation(s) for transaction {}",
            drafts.len(),
            context.transaction.id
        );
        Ok(drafts)
    }

    async fn advise(&self, context: &AdviceContext) -> Result<String> {
        let reply = self
            .backend
            .complete(ADVISOR_PREAMBLE, &advice_prompt(context))
            .await?;
        Ok(strip_reasoning(&reply))
    }

    async fn plan_contributions(&self, request: &PlanRequest) -> Result<PlanDraft> {
        let reply = self
            .backend
            .complete(ADVISOR_PREAMBLE, &plan_prompt(request))
            .await?;
        Ok(parse_plan(&reply)?)
    }
}

/// Advisor used when no provider is configured. Every call fails, so the
/// services answer with their local fallbacks.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledAdvisor;

#[async_trait]
impl AdvisorTrait for DisabledAdvisor {
    async fn recommend(&self, _context: &RecommendationContext) -> Result<Vec<RecommendationDraft>> {
        Err(AiError::Disabled.into())
    }

    async fn advise(&self, _context: &AdviceContext) -> Result<String> {
        Err(AiError::Disabled.into())
    }

    async fn plan_contributions(&self, _request: &PlanRequest) -> Result<PlanDraft> {
        Err(AiError::Disabled.into())
    }
}

/// Picks the LLM advisor when `config` can reach a provider.
pub fn advisor_from_config(config: Option<AiConfig>) -> Arc<dyn AdvisorTrait> {
    match config {
        Some(config) if config.is_usable() => Arc::new(LlmAdvisor::new(config)),
        _ => Arc::new(DisabledAdvisor),
    }
}
