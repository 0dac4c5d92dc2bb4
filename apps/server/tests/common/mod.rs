use std::collections::HashMap;

use axum::{
    body::{to_bytes, Body},
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use kipo_server::{api::app_router, build_state, config::Config};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

pub struct TestApp {
    router: Router,
    _tmp: TempDir,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

pub enum Auth<'a> {
    None,
    Bearer(&'a str),
    Cookie(&'a str),
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_vars(&[]).await
    }

    pub async fn with_vars(extra: &[(&str, &str)]) -> Self {
        let tmp = tempfile::tempdir().unwrap();
        let mut vars = HashMap::new();
        vars.insert(
            "KIPO_DB_PATH".to_string(),
            tmp.path().join("kipo.db").to_string_lossy().into_owned(),
        );
        vars.insert("KIPO_SCHEDULER_ENABLED".to_string(), "false".to_string());
        for (key, value) in extra {
            vars.insert(key.to_string(), value.to_string());
        }
        let config = Config::from_map(&vars);
        let state = build_state(&config).await.unwrap();
        Self {
            router: app_router(state, &config),
            _tmp: tmp,
        }
    }

    pub async fn raw(&self, request: Request<Body>) -> axum::response::Response {
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        auth: Auth<'_>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        match auth {
            Auth::None => {}
            Auth::Bearer(token) => {
                builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
            }
            Auth::Cookie(cookie) => {
                builder = builder.header(header::COOKIE, cookie);
            }
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        TestResponse {
            status,
            headers,
            body,
        }
    }

    /// Registers a user and returns its session token and id.
    pub async fn register(&self, email: &str) -> (String, String) {
        let response = self
            .send(
                Method::POST,
                "/api/auth/register",
                Auth::None,
                Some(serde_json::json!({
                    "name": "Test User",
                    "email": email,
                    "password": "correct-horse",
                })),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
        let token = response.body["data"]["token"].as_str().unwrap().to_string();
        let user_id = response.body["data"]["user"]["id"]
            .as_str()
            .unwrap()
            .to_string();
        (token, user_id)
    }
}
