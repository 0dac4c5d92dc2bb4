use std::sync::Arc;

use axum::{
    extract::State,
    routing::{post, put},
    Router,
};
use kipo_core::users::{OnboardingInput, PasswordChange, User, UserUpdate};
use serde::Serialize;

use super::shared::{ok, ApiJson, ApiResponse};
use crate::{auth::AuthUser, main_lib::AppState};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PasswordChanged {
    password_changed: bool,
}

async fn update_profile(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    ApiJson(update): ApiJson<UserUpdate>,
) -> ApiResponse<User> {
    let user = state
        .user_service
        .update_profile(&auth.user_id, update)
        .await?;
    Ok(ok(user))
}

async fn complete_onboarding(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    ApiJson(input): ApiJson<OnboardingInput>,
) -> ApiResponse<User> {
    let user = state
        .user_service
        .complete_onboarding(&auth.user_id, input)
        .await?;
    Ok(ok(user))
}

async fn change_password(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    ApiJson(change): ApiJson<PasswordChange>,
) -> ApiResponse<PasswordChanged> {
    state
        .user_service
        .change_password(&auth.user_id, change)
        .await?;
    Ok(ok(PasswordChanged {
        password_changed: true,
    }))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/users/me", put(update_profile))
        .route("/users/me/onboarding", post(complete_onboarding))
        .route("/users/me/password", post(change_password))
}
