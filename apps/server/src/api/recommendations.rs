use std::sync::Arc;

use axum::{
    extract::State,
    routing::{delete, get, post},
    Router,
};
use kipo_core::recommendations::{
    Advice, AdviceRequest, GenerateRecommendationsRequest, Recommendation,
};
use serde::Deserialize;

use super::shared::{ok, ApiJson, ApiPath, ApiQuery, ApiResponse, Deleted};
use crate::{auth::AuthUser, main_lib::AppState};

#[derive(Deserialize, Default)]
struct ListQuery {
    limit: Option<i64>,
}

async fn list_recommendations(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    ApiQuery(query): ApiQuery<ListQuery>,
) -> ApiResponse<Vec<Recommendation>> {
    let recommendations = state
        .recommendation_service
        .list_recommendations(&auth.user_id, query.limit)?;
    Ok(ok(recommendations))
}

async fn generate(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    ApiJson(request): ApiJson<GenerateRecommendationsRequest>,
) -> ApiResponse<Vec<Recommendation>> {
    let recommendations = state
        .recommendation_service
        .generate_for_transaction(&auth.user_id, &request.transaction_id)
        .await?;
    Ok(ok(recommendations))
}

async fn advice(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    ApiJson(request): ApiJson<AdviceRequest>,
) -> ApiResponse<Advice> {
    let advice = state
        .recommendation_service
        .get_advice(&auth.user_id, request.question)
        .await?;
    Ok(ok(advice))
}

async fn delete_recommendation(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    ApiPath(id): ApiPath<String>,
) -> ApiResponse<Deleted> {
    state
        .recommendation_service
        .delete_recommendation(&auth.user_id, &id)
        .await?;
    Ok(ok(Deleted { id }))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/recommendations", get(list_recommendations))
        .route("/recommendations/generate", post(generate))
        .route("/recommendations/advice", post(advice))
        .route("/recommendations/{id}", delete(delete_recommendation))
}
