//! Browser sessions and API-key authentication.
//!
//! Sessions are HS256 JWTs carried in the `kipo_session` cookie (or as an
//! `Authorization: Bearer` header for clients without cookies). API keys are
//! only accepted by the entries endpoint.

use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{
        header::{AUTHORIZATION, COOKIE},
        request::Parts,
        HeaderMap,
    },
    middleware::Next,
    response::Response,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use kipo_core::constants::API_KEY_PREFIX;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{config::Config, error::ApiError, main_lib::AppState};

pub const SESSION_COOKIE: &str = "kipo_session";

const SESSION_REQUIRED: &str = "Authentication required";
const SESSION_INVALID: &str = "Session is invalid or expired";
const API_KEY_REQUIRED: &str = "A valid API key is required";

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    exp: usize,
    iat: usize,
}

pub struct SessionManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
    secure_cookies: bool,
}

impl SessionManager {
    pub fn new(secret: &[u8], ttl: Duration, secure_cookies: bool) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            ttl,
            secure_cookies,
        }
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let secret = match config.session_secret.as_deref() {
            Some(raw) => decode_secret_key(raw)?,
            None => {
                warn!("KIPO_SESSION_SECRET is not set; sessions will not survive a restart");
                let mut bytes = vec![0u8; 32];
                rand::thread_rng().fill_bytes(&mut bytes);
                bytes
            }
        };
        Ok(Self::new(&secret, config.session_ttl, config.secure_cookies))
    }

    /// Signs a session token for `user_id`.
    pub fn issue(&self, user_id: &str) -> Result<String, ApiError> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|_| ApiError::Internal("System clock is before UNIX_EPOCH".into()))?;
        let exp = now + self.ttl;
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.as_secs() as usize,
            exp: exp.as_secs() as usize,
        };
        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| ApiError::Internal(format!("Failed to sign session: {e}")))
    }

    /// Returns the user id carried by a valid, unexpired token.
    pub fn validate(&self, token: &str) -> Result<String, ApiError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims.sub)
            .map_err(|err| {
                debug!("Rejected session token: {:?}", err.kind());
                ApiError::Unauthorized(SESSION_INVALID.into())
            })
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn session_cookie(&self, token: &str) -> String {
        self.cookie(token, self.ttl.as_secs())
    }

    pub fn clear_cookie(&self) -> String {
        self.cookie("", 0)
    }

    fn cookie(&self, value: &str, max_age: u64) -> String {
        let mut cookie =
            format!("{SESSION_COOKIE}={value}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age}");
        if self.secure_cookies {
            cookie.push_str("; Secure");
        }
        cookie
    }
}

pub fn decode_secret_key(raw: &str) -> anyhow::Result<Vec<u8>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        anyhow::bail!("Session secret cannot be empty");
    }
    let decoded = match BASE64.decode(trimmed) {
        Ok(bytes) => bytes,
        Err(_) if trimmed.len() == 32 => trimmed.as_bytes().to_vec(),
        Err(_) => {
            anyhow::bail!("Session secret must be base64 encoded or a 32-byte ASCII string")
        }
    };

    if decoded.len() != 32 {
        anyhow::bail!("Session secret must decode to exactly 32 bytes");
    }

    Ok(decoded)
}

/// The authenticated caller, placed in request extensions by the auth middleware.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: String,
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or_else(|| ApiError::Unauthorized(SESSION_REQUIRED.into()))
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let header = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let mut parts = header.splitn(2, ' ');
    let (Some(scheme), Some(token)) = (parts.next(), parts.next()) else {
        return None;
    };
    if !scheme.eq_ignore_ascii_case("Bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then(|| token.to_string())
}

fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Session token from a non-API-key bearer header, else from the cookie.
fn session_token(headers: &HeaderMap) -> Option<String> {
    bearer_token(headers)
        .filter(|token| !token.starts_with(API_KEY_PREFIX))
        .or_else(|| cookie_value(headers, SESSION_COOKIE))
}

pub async fn require_session(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = session_token(request.headers())
        .ok_or_else(|| ApiError::Unauthorized(SESSION_REQUIRED.into()))?;
    let user_id = state.sessions.validate(&token)?;
    request.extensions_mut().insert(AuthUser { user_id });
    Ok(next.run(request).await)
}

pub async fn require_api_key(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(request.headers())
        .ok_or_else(|| ApiError::Unauthorized(API_KEY_REQUIRED.into()))?;
    let service = state.api_key_service.clone();
    let user_id = tokio::task::spawn_blocking(move || service.authenticate_bearer(&token))
        .await
        .map_err(|e| ApiError::Internal(format!("API key check failed: {e}")))??;
    request.extensions_mut().insert(AuthUser { user_id });
    Ok(next.run(request).await)
}
