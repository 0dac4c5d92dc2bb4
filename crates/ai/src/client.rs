//! One-shot completions through rig-core providers.

use async_trait::async_trait;
use log::debug;
use reqwest::Client as HttpClient;
use rig::{
    client::{CompletionClient, Nothing},
    completion::Prompt,
    providers::{anthropic, gemini, groq, ollama, openai},
};

use crate::config::AiConfig;
use crate::error::AiError;

/// Sends a single prompt and returns the model's text reply.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    async fn complete(&self, preamble: &str, prompt: &str) -> Result<String, AiError>;
}

/// Backend calling the configured provider through rig-core.
pub struct RigBackend {
    config: AiConfig,
}

impl RigBackend {
    pub fn new(config: AiConfig) -> Self {
        Self { config }
    }

    fn api_key(&self) -> Result<String, AiError> {
        self.config
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| AiError::MissingApiKey(self.config.provider.clone()))
    }
}

macro_rules! prompt_agent {
    ($client:expr, $config:expr, $preamble:expr, $prompt:expr) => {{
        $client
            .agent(&$config.model)
            .preamble($preamble)
            .temperature($config.temperature)
            .max_tokens($config.max_tokens)
            .build()
            .prompt($prompt)
            .await
            .map_err(|e| AiError::Provider(e.to_string()))?
    }};
}

#[async_trait]
impl CompletionBackend for RigBackend {
    async fn complete(&self, preamble: &str, prompt: &str) -> Result<String, AiError> {
        let config = &self.config;
        debug!(
            "Prompting provider {} model {}",
            config.provider, config.model
        );

        let response = match config.provider.as_str() {
            "anthropic" => {
                let client: anthropic::Client<HttpClient> =
                    anthropic::Client::new(&self.api_key()?)
                        .map_err(|e| AiError::Provider(e.to_string()))?;
                prompt_agent!(client, config, preamble, prompt)
            }
            "gemini" | "google" => {
                let client: gemini::Client<HttpClient> = gemini::Client::new(&self.api_key()?)
                    .map_err(|e| AiError::Provider(e.to_string()))?;
                prompt_agent!(client, config, preamble, prompt)
            }
            "groq" => {
                let client: groq::Client<HttpClient> = groq::Client::new(&self.api_key()?)
                    .map_err(|e| AiError::Provider(e.to_string()))?;
                prompt_agent!(client, config, preamble, prompt)
            }
            "ollama" => {
                let mut builder = ollama::Client::<HttpClient>::builder().api_key(Nothing);
                if let Some(url) = &config.base_url {
                    builder = builder.base_url(url);
                }
                let client = builder
                    .build()
                    .map_err(|e| AiError::Provider(e.to_string()))?;
                prompt_agent!(client, config, preamble, prompt)
            }
            _ => {
                // Default to OpenAI-compatible (Completions API)
                let key = self.api_key()?;
                let mut builder = openai::CompletionsClient::<HttpClient>::builder().api_key(&key);
                if let Some(url) = &config.base_url {
                    builder = builder.base_url(url);
                }
                let client = builder
                    .build()
                    .map_err(|e| AiError::Provider(e.to_string()))?;
                prompt_agent!(client, config, preamble, prompt)
            }
        };

        if response.trim().is_empty() {
            return Err(AiError::EmptyResponse);
        }
        Ok(response)
    }
}
