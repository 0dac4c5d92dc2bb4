//! Provider selection for the advisor.

use serde::{Deserialize, Serialize};

pub const DEFAULT_PROVIDER: &str = "openai";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Which provider and model to call, and how.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiConfig {
    /// One of `openai`, `anthropic`, `gemini`, `groq`, `ollama`. Anything
    /// else is treated as OpenAI-compatible.
    pub provider: String,
    pub model: String,
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    /// Custom endpoint for OpenAI-compatible servers and Ollama.
    pub base_url: Option<String>,
    pub temperature: f64,
    pub max_tokens: u64,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            provider: DEFAULT_PROVIDER.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
            base_url: None,
            temperature: 0.4,
            max_tokens: 800,
        }
    }
}

impl AiConfig {
    /// Ollama runs locally and needs no key; every other provider does.
    pub fn needs_api_key(&self) -> bool {
        self.provider != "ollama"
    }

    pub fn is_usable(&self) -> bool {
        !self.needs_api_key()
            || self
                .api_key
                .as_deref()
                .is_some_and(|key| !key.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ollama_works_without_key() {
        let config = AiConfig {
            provider: "ollama".to_string(),
            ..Default::default()
        };
        assert!(config.is_usable());
        assert!(!AiConfig::default().is_usable());
    }

    #[test]
    fn blank_key_is_not_usable() {
        let config = AiConfig {
            api_key: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(!config.is_usable());
    }

    #[test]
    fn key_is_never_serialized() {
        let config = AiConfig {
            api_key: Some("sk-secret".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("sk-secret"));
    }
}
