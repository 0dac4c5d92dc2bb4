//! Single-transaction endpoint for API-key clients such as phone shortcuts.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use chrono::NaiveDate;
use kipo_core::transactions::{NewTransaction, Transaction, TransactionType};
use serde::Deserialize;

use super::shared::{ok, spawn_expense_follow_up, ApiJson, Envelope};
use crate::{auth::AuthUser, error::ApiResult, main_lib::AppState};

#[derive(Debug, Deserialize)]
struct EntryRequest {
    #[serde(rename = "type", default)]
    transaction_type: TransactionType,
    amount: f64,
    category: String,
    description: Option<String>,
    date: Option<NaiveDate>,
}

impl From<EntryRequest> for NewTransaction {
    fn from(entry: EntryRequest) -> Self {
        NewTransaction {
            transaction_type: entry.transaction_type,
            amount: entry.amount,
            category: entry.category,
            description: entry.description,
            date: entry.date,
            ..Default::default()
        }
    }
}

async fn create_entry(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    ApiJson(entry): ApiJson<EntryRequest>,
) -> ApiResult<(StatusCode, Json<Envelope<Transaction>>)> {
    let transaction = state
        .transaction_service
        .create_transaction(&auth.user_id, entry.into())
        .await?;
    tracing::info!(
        "Recorded entry {} for user {} via API key",
        transaction.id,
        auth.user_id
    );
    spawn_expense_follow_up(state.clone(), &transaction);
    Ok((StatusCode::CREATED, ok(transaction)))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/entries", post(create_entry))
}
