use std::sync::Arc;

use axum::{
    extract::State,
    http::{header::SET_COOKIE, HeaderMap, HeaderValue, StatusCode},
    routing::{get, post},
    Json, Router,
};
use kipo_core::users::{NewUser, User};
use serde::{Deserialize, Serialize};

use super::shared::{ok, ApiJson, ApiResponse, Envelope};
use crate::{
    auth::AuthUser,
    error::{ApiError, ApiResult},
    main_lib::AppState,
};

#[derive(Deserialize)]
struct LoginRequest {
    email: String,
    password: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SessionResponse {
    user: User,
    token: String,
    expires_in: u64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LogoutResponse {
    logged_out: bool,
}

fn cookie_headers(cookie: String) -> ApiResult<HeaderMap> {
    let mut headers = HeaderMap::new();
    let value = HeaderValue::from_str(&cookie)
        .map_err(|e| ApiError::Internal(format!("Invalid session cookie: {e}")))?;
    headers.insert(SET_COOKIE, value);
    Ok(headers)
}

fn start_session(
    state: &AppState,
    user: User,
) -> ApiResult<(HeaderMap, Json<Envelope<SessionResponse>>)> {
    let token = state.sessions.issue(&user.id)?;
    let headers = cookie_headers(state.sessions.session_cookie(&token))?;
    let body = ok(SessionResponse {
        user,
        token,
        expires_in: state.sessions.ttl().as_secs(),
    });
    Ok((headers, body))
}

async fn register(
    State(state): State<Arc<AppState>>,
    ApiJson(new_user): ApiJson<NewUser>,
) -> ApiResult<(StatusCode, HeaderMap, Json<Envelope<SessionResponse>>)> {
    let user = state.user_service.register(new_user).await?;
    let (headers, body) = start_session(&state, user)?;
    Ok((StatusCode::CREATED, headers, body))
}

async fn login(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> ApiResult<(HeaderMap, Json<Envelope<SessionResponse>>)> {
    let users = state.user_service.clone();
    let user = tokio::task::spawn_blocking(move || {
        users.authenticate(&payload.email, &payload.password)
    })
    .await
    .map_err(|e| ApiError::Internal(format!("Login check failed: {e}")))??;
    start_session(&state, user)
}

async fn logout(
    State(state): State<Arc<AppState>>,
) -> ApiResult<(HeaderMap, Json<Envelope<LogoutResponse>>)> {
    let headers = cookie_headers(state.sessions.clear_cookie())?;
    Ok((headers, ok(LogoutResponse { logged_out: true })))
}

async fn me(State(state): State<Arc<AppState>>, auth: AuthUser) -> ApiResponse<User> {
    Ok(ok(state.user_service.get_user(&auth.user_id)?))
}

/// Routes reachable without a session.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
}

pub fn session_router() -> Router<Arc<AppState>> {
    Router::new().route("/auth/me", get(me))
}
