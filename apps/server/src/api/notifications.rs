use std::sync::Arc;

use axum::{extract::State, routing::post, Router};
use kipo_core::{notifications::EmailDelivery, utils::time_utils::today};

use super::shared::{ok, ApiPath, ApiResponse};
use crate::{auth::AuthUser, main_lib::AppState};

/// Delivery problems come back as `success: false` in the payload, not as errors.
async fn send_weekly_summary(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
) -> ApiResponse<EmailDelivery> {
    let delivery = state
        .notification_service
        .send_weekly_summary(&auth.user_id, today())
        .await?;
    Ok(ok(delivery))
}

async fn send_goal_progress(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    ApiPath(id): ApiPath<String>,
) -> ApiResponse<EmailDelivery> {
    let delivery = state
        .notification_service
        .send_goal_progress(&auth.user_id, &id)
        .await?;
    Ok(ok(delivery))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/notifications/weekly-summary", post(send_weekly_summary))
        .route("/notifications/goals/{id}", post(send_goal_progress))
}
