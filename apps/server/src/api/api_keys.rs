use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use kipo_core::users::{ApiKey, CreatedApiKey, NewApiKey};

use super::shared::{ok, ApiJson, ApiPath, ApiResponse, Envelope};
use crate::{auth::AuthUser, error::ApiResult, main_lib::AppState};

async fn list_api_keys(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
) -> ApiResponse<Vec<ApiKey>> {
    Ok(ok(state.api_key_service.list_api_keys(&auth.user_id)?))
}

/// The plain token is only ever returned here.
async fn create_api_key(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    ApiJson(new_key): ApiJson<NewApiKey>,
) -> ApiResult<(StatusCode, Json<Envelope<CreatedApiKey>>)> {
    let created = state
        .api_key_service
        .create_api_key(&auth.user_id, new_key)
        .await?;
    Ok((StatusCode::CREATED, ok(created)))
}

async fn revoke_api_key(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    ApiPath(id): ApiPath<String>,
) -> ApiResponse<ApiKey> {
    let key = state
        .api_key_service
        .revoke_api_key(&auth.user_id, &id)
        .await?;
    Ok(ok(key))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api-keys", get(list_api_keys).post(create_api_key))
        .route("/api-keys/{id}", delete(revoke_api_key))
}
