use std::sync::Arc;

use axum::{routing::get, Router};
use serde::Serialize;

use super::shared::{ok, ApiResponse};
use crate::main_lib::AppState;

#[derive(Serialize)]
struct HealthStatus {
    status: &'static str,
    version: &'static str,
}

async fn health() -> ApiResponse<HealthStatus> {
    Ok(ok(HealthStatus {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    }))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(health))
}
