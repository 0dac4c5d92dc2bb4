use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use kipo_core::{
    cards::{Card, CardPaidUpdate, CardUpdate, NewCard},
    utils::time_utils::today,
};
use serde::Deserialize;

use super::shared::{ok, ApiJson, ApiPath, ApiQuery, ApiResponse, Deleted, Envelope};
use crate::{auth::AuthUser, error::ApiResult, main_lib::AppState};

const DEFAULT_UPCOMING_DAYS: i64 = 7;

#[derive(Deserialize, Default)]
struct UpcomingQuery {
    days: Option<i64>,
}

async fn list_cards(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
) -> ApiResponse<Vec<Card>> {
    Ok(ok(state.card_service.list_cards(&auth.user_id)?))
}

async fn create_card(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    ApiJson(new_card): ApiJson<NewCard>,
) -> ApiResult<(StatusCode, Json<Envelope<Card>>)> {
    let card = state.card_service.create_card(&auth.user_id, new_card).await?;
    Ok((StatusCode::CREATED, ok(card)))
}

async fn upcoming_payments(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    ApiQuery(query): ApiQuery<UpcomingQuery>,
) -> ApiResponse<Vec<Card>> {
    let within_days = query.days.unwrap_or(DEFAULT_UPCOMING_DAYS).max(0);
    let cards = state
        .card_service
        .upcoming_payments(&auth.user_id, today(), within_days)?;
    Ok(ok(cards))
}

async fn get_card(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    ApiPath(id): ApiPath<String>,
) -> ApiResponse<Card> {
    Ok(ok(state.card_service.get_card(&auth.user_id, &id)?))
}

async fn update_card(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    ApiPath(id): ApiPath<String>,
    ApiJson(update): ApiJson<CardUpdate>,
) -> ApiResponse<Card> {
    let card = state
        .card_service
        .update_card(&auth.user_id, &id, update)
        .await?;
    Ok(ok(card))
}

async fn delete_card(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    ApiPath(id): ApiPath<String>,
) -> ApiResponse<Deleted> {
    state.card_service.delete_card(&auth.user_id, &id).await?;
    Ok(ok(Deleted { id }))
}

async fn set_paid(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    ApiPath(id): ApiPath<String>,
    ApiJson(update): ApiJson<CardPaidUpdate>,
) -> ApiResponse<Card> {
    let card = state
        .card_service
        .set_paid(&auth.user_id, &id, update.paid)
        .await?;
    Ok(ok(card))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/cards", get(list_cards).post(create_card))
        .route("/cards/upcoming", get(upcoming_payments))
        .route(
            "/cards/{id}",
            get(get_card).put(update_card).delete(delete_card),
        )
        .route("/cards/{id}/paid", put(set_paid))
}
