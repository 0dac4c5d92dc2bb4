use std::sync::Arc;

use crate::{auth::SessionManager, config::Config, error::expose_internal_errors};
use kipo_ai::advisor_from_config;
use kipo_core::{
    cards::{CardService, CardServiceTrait},
    goals::{GoalService, GoalServiceTrait},
    notifications::{NotificationService, NotificationServiceTrait, ResendEmailSender},
    recommendations::{RecommendationService, RecommendationServiceTrait},
    transactions::{TransactionService, TransactionServiceTrait},
    users::{ApiKeyService, ApiKeyServiceTrait, CredentialHasher, UserService, UserServiceTrait},
};
use kipo_storage_sqlite::{
    cards::CardRepository, db, goals::GoalRepository, recommendations::RecommendationRepository,
    transactions::TransactionRepository, users::UserRepository,
};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub struct AppState {
    pub user_service: Arc<dyn UserServiceTrait>,
    pub api_key_service: Arc<dyn ApiKeyServiceTrait>,
    pub transaction_service: Arc<dyn TransactionServiceTrait>,
    pub goal_service: Arc<dyn GoalServiceTrait>,
    pub card_service: Arc<dyn CardServiceTrait>,
    pub recommendation_service: Arc<dyn RecommendationServiceTrait>,
    pub notification_service: Arc<dyn NotificationServiceTrait>,
    pub sessions: Arc<SessionManager>,
    pub db_path: String,
}

pub fn init_tracing() {
    let log_format = std::env::var("KIPO_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    expose_internal_errors(config.development);

    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);
    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = db::spawn_writer(pool.clone());

    let user_repository = Arc::new(UserRepository::new(pool.clone(), writer.clone()));
    let transaction_repository = Arc::new(TransactionRepository::new(pool.clone(), writer.clone()));
    let goal_repository = Arc::new(GoalRepository::new(pool.clone(), writer.clone()));
    let card_repository = Arc::new(CardRepository::new(pool.clone(), writer.clone()));
    let recommendation_repository = Arc::new(RecommendationRepository::new(pool.clone(), writer));

    let advisor = advisor_from_config(Some(config.ai.clone()));
    if config.ai.is_usable() {
        tracing::info!(
            "AI advisor enabled ({} / {})",
            config.ai.provider,
            config.ai.model
        );
    } else {
        tracing::info!("AI advisor disabled; local fallbacks will be used");
    }

    let user_service: Arc<dyn UserServiceTrait> = Arc::new(UserService::new(
        user_repository.clone(),
        CredentialHasher::default(),
    ));
    let api_key_service: Arc<dyn ApiKeyServiceTrait> = Arc::new(ApiKeyService::new(
        user_repository,
        CredentialHasher::default(),
    ));
    let transaction_service: Arc<dyn TransactionServiceTrait> =
        Arc::new(TransactionService::new(transaction_repository));
    let goal_service: Arc<dyn GoalServiceTrait> = Arc::new(GoalService::new(
        goal_repository,
        user_service.clone(),
        advisor.clone(),
    ));
    let card_service: Arc<dyn CardServiceTrait> = Arc::new(CardService::new(card_repository));
    let recommendation_service: Arc<dyn RecommendationServiceTrait> =
        Arc::new(RecommendationService::new(
            recommendation_repository,
            transaction_service.clone(),
            user_service.clone(),
            goal_service.clone(),
            advisor,
        ));

    let email_sender = Arc::new(ResendEmailSender::new(config.email.clone()));
    if !email_sender.is_configured() {
        tracing::warn!("KIPO_EMAIL_API_KEY is not set; emails will not be delivered");
    }
    let notification_service: Arc<dyn NotificationServiceTrait> =
        Arc::new(NotificationService::new(
            user_service.clone(),
            goal_service.clone(),
            transaction_service.clone(),
            email_sender,
        ));

    let sessions = Arc::new(SessionManager::from_config(config)?);

    Ok(Arc::new(AppState {
        user_service,
        api_key_service,
        transaction_service,
        goal_service,
        card_service,
        recommendation_service,
        notification_service,
        sessions,
        db_path,
    }))
}
