//! HTTP routes under `/api`.

use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method},
    middleware, Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    auth::{require_api_key, require_session},
    config::Config,
    error::ApiError,
    main_lib::AppState,
};

pub mod api_keys;
pub mod auth;
pub mod cards;
pub mod entries;
pub mod goals;
pub mod health;
pub mod notifications;
pub mod recommendations;
pub mod shared;
pub mod transactions;
pub mod users;

async fn route_not_found() -> ApiError {
    ApiError::NotFound("Route not found".into())
}

fn cors_layer(config: &Config) -> CorsLayer {
    if config.cors_allow.iter().any(|o| o == "*") {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }
    let origins = config
        .cors_allow
        .iter()
        .filter_map(|o| match o.parse::<HeaderValue>() {
            Ok(origin) => Some(origin),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin '{}'", o);
                None
            }
        })
        .collect::<Vec<_>>();
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true)
}

pub fn app_router(state: Arc<AppState>, config: &Config) -> Router {
    let session_routes = Router::new()
        .merge(auth::session_router())
        .merge(users::router())
        .merge(api_keys::router())
        .merge(transactions::router())
        .merge(goals::router())
        .merge(cards::router())
        .merge(recommendations::router())
        .merge(notifications::router())
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_session,
        ));

    let api_key_routes = entries::router().route_layer(middleware::from_fn_with_state(
        state.clone(),
        require_api_key,
    ));

    let api = Router::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(api_key_routes)
        .merge(session_routes)
        .fallback(route_not_found);

    Router::new()
        .nest("/api", api)
        .fallback(route_not_found)
        .with_state(state)
        .layer(cors_layer(config))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(TraceLayer::new_for_http())
}
