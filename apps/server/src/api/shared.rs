use std::sync::Arc;

use axum::{
    extract::{FromRequest, FromRequestParts},
    Json,
};
use kipo_core::transactions::Transaction;
use serde::Serialize;
use tracing::{debug, warn};

use crate::{error::ApiError, main_lib::AppState};

/// Success envelope shared by every JSON endpoint.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub data: T,
}

pub fn ok<T: Serialize>(data: T) -> Json<Envelope<T>> {
    Json(Envelope {
        success: true,
        data,
    })
}

pub type ApiResponse<T> = Result<Json<Envelope<T>>, ApiError>;

/// JSON body extractor whose rejections use the error envelope.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);

#[derive(Debug, Serialize)]
pub struct Deleted {
    pub id: String,
}

/// Runs recommendation generation and the unusual-spending check for a new
/// expense without holding up the response.
pub fn spawn_expense_follow_up(state: Arc<AppState>, transaction: &Transaction) {
    if !transaction.is_expense() {
        return;
    }
    let user_id = transaction.user_id.clone();
    let transaction_id = transaction.id.clone();
    tokio::spawn(async move {
        match state
            .recommendation_service
            .generate_for_transaction(&user_id, &transaction_id)
            .await
        {
            Ok(stored) => debug!(
                "Stored {} recommendations for transaction {}",
                stored.len(),
                transaction_id
            ),
            Err(e) => warn!(
                "Recommendation generation failed for transaction {}: {}",
                transaction_id, e
            ),
        }
        match state
            .notification_service
            .check_unusual_spending(&user_id, &transaction_id)
            .await
        {
            Ok(Some(delivery)) if !delivery.success => warn!(
                "Unusual spending email for transaction {} not delivered: {}",
                transaction_id,
                delivery.error.unwrap_or_default()
            ),
            Ok(_) => {}
            Err(e) => warn!(
                "Unusual spending check failed for transaction {}: {}",
                transaction_id, e
            ),
        }
    });
}
