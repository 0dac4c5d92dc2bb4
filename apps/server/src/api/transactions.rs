use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use kipo_core::transactions::{
    NewTransaction, Transaction, TransactionFilter, TransactionSummary, TransactionUpdate,
};
use serde::Deserialize;

use super::shared::{
    ok, spawn_expense_follow_up, ApiJson, ApiPath, ApiQuery, ApiResponse, Deleted, Envelope,
};
use crate::{auth::AuthUser, error::ApiResult, main_lib::AppState};

#[derive(Deserialize, Default)]
struct SummaryQuery {
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
}

async fn list_transactions(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    ApiQuery(filter): ApiQuery<TransactionFilter>,
) -> ApiResponse<Vec<Transaction>> {
    let transactions = state
        .transaction_service
        .list_transactions(&auth.user_id, filter)?;
    Ok(ok(transactions))
}

async fn create_transaction(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    ApiJson(new_transaction): ApiJson<NewTransaction>,
) -> ApiResult<(StatusCode, Json<Envelope<Transaction>>)> {
    let transaction = state
        .transaction_service
        .create_transaction(&auth.user_id, new_transaction)
        .await?;
    spawn_expense_follow_up(state.clone(), &transaction);
    Ok((StatusCode::CREATED, ok(transaction)))
}

async fn get_summary(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    ApiQuery(query): ApiQuery<SummaryQuery>,
) -> ApiResponse<TransactionSummary> {
    let summary = state
        .transaction_service
        .get_summary(&auth.user_id, query.from, query.to)?;
    Ok(ok(summary))
}

async fn get_transaction(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    ApiPath(id): ApiPath<String>,
) -> ApiResponse<Transaction> {
    Ok(ok(state
        .transaction_service
        .get_transaction(&auth.user_id, &id)?))
}

async fn update_transaction(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    ApiPath(id): ApiPath<String>,
    ApiJson(update): ApiJson<TransactionUpdate>,
) -> ApiResponse<Transaction> {
    let transaction = state
        .transaction_service
        .update_transaction(&auth.user_id, &id, update)
        .await?;
    Ok(ok(transaction))
}

async fn delete_transaction(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    ApiPath(id): ApiPath<String>,
) -> ApiResponse<Deleted> {
    state
        .transaction_service
        .delete_transaction(&auth.user_id, &id)
        .await?;
    Ok(ok(Deleted { id }))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/transactions",
            get(list_transactions).post(create_transaction),
        )
        .route("/transactions/summary", get(get_summary))
        .route(
            "/transactions/{id}",
            get(get_transaction)
                .put(update_transaction)
                .delete(delete_transaction),
        )
}
