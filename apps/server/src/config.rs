use std::{collections::HashMap, net::SocketAddr, time::Duration};

use kipo_ai::AiConfig;
use kipo_core::notifications::EmailSettings;

pub const DEFAULT_EMAIL_API_URL: &str = "https://api.resend.com";
pub const DEFAULT_EMAIL_FROM: &str = "Kipo <noreply@kipo.app>";

#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    /// Raw `KIPO_SESSION_SECRET`; a random key is generated when absent.
    pub session_secret: Option<String>,
    pub session_ttl: Duration,
    /// `KIPO_ENV=development` exposes internal error messages.
    pub development: bool,
    pub secure_cookies: bool,
    pub ai: AiConfig,
    pub email: EmailSettings,
    pub scheduler_enabled: bool,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an explicit set of variables.
    pub fn from_map(vars: &HashMap<String, String>) -> Self {
        Self::from_lookup(|key| vars.get(key).cloned())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let flag = |key: &str, default: bool| {
            get(key)
                .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(default)
        };

        let listen_addr: SocketAddr = get("KIPO_LISTEN_ADDR")
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 8080)));
        let db_path = get("KIPO_DB_PATH").unwrap_or_else(|| "./db/kipo.db".into());
        let cors_allow = get("KIPO_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let timeout_ms: u64 = get("KIPO_REQUEST_TIMEOUT_MS")
            .and_then(|v| v.parse().ok())
            .unwrap_or(30000);
        let session_ttl_secs: u64 = get("KIPO_SESSION_TTL_SECS")
            .and_then(|v| v.parse().ok())
            .unwrap_or(7 * 24 * 60 * 60);
        let development = get("KIPO_ENV")
            .map(|v| v.eq_ignore_ascii_case("development"))
            .unwrap_or(false);

        let ai_defaults = AiConfig::default();
        let ai = AiConfig {
            provider: get("KIPO_AI_PROVIDER").unwrap_or(ai_defaults.provider),
            model: get("KIPO_AI_MODEL").unwrap_or(ai_defaults.model),
            api_key: get("KIPO_AI_API_KEY"),
            base_url: get("KIPO_AI_BASE_URL"),
            ..ai_defaults
        };

        let email = EmailSettings {
            api_key: get("KIPO_EMAIL_API_KEY"),
            api_url: get("KIPO_EMAIL_API_URL").unwrap_or_else(|| DEFAULT_EMAIL_API_URL.into()),
            from: get("KIPO_EMAIL_FROM").unwrap_or_else(|| DEFAULT_EMAIL_FROM.into()),
        };

        Self {
            listen_addr,
            db_path,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            session_secret: get("KIPO_SESSION_SECRET"),
            session_ttl: Duration::from_secs(session_ttl_secs),
            development,
            secure_cookies: flag("KIPO_SECURE_COOKIES", false),
            ai,
            email,
            scheduler_enabled: flag("KIPO_SCHEDULER_ENABLED", true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = Config::from_map(&HashMap::new());
        assert_eq!(config.listen_addr.port(), 8080);
        assert_eq!(config.db_path, "./db/kipo.db");
        assert_eq!(config.cors_allow, vec!["*".to_string()]);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.session_ttl, Duration::from_secs(604800));
        assert!(!config.development);
        assert!(config.scheduler_enabled);
        assert_eq!(config.ai.provider, "openai");
        assert_eq!(config.email.api_url, DEFAULT_EMAIL_API_URL);
        assert!(config.email.api_key.is_none());
    }

    #[test]
    fn values_are_read_from_variables() {
        let config = Config::from_map(&vars(&[
            ("KIPO_LISTEN_ADDR", "127.0.0.1:9000"),
            ("KIPO_CORS_ALLOW_ORIGINS", "http://a.test, http://b.test"),
            ("KIPO_ENV", "Development"),
            ("KIPO_SCHEDULER_ENABLED", "false"),
            ("KIPO_AI_PROVIDER", "anthropic"),
            ("KIPO_AI_API_KEY", "sk-test"),
            ("KIPO_EMAIL_API_KEY", "re_test"),
        ]));
        assert_eq!(config.listen_addr.port(), 9000);
        assert_eq!(config.cors_allow.len(), 2);
        assert!(config.development);
        assert!(!config.scheduler_enabled);
        assert_eq!(config.ai.provider, "anthropic");
        assert_eq!(config.ai.api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.email.api_key.as_deref(), Some("re_test"));
    }

    #[test]
    fn blank_values_count_as_unset() {
        let config = Config::from_map(&vars(&[("KIPO_AI_API_KEY", "  "), ("KIPO_DB_PATH", "")]));
        assert!(config.ai.api_key.is_none());
        assert_eq!(config.db_path, "./db/kipo.db");
    }
}
