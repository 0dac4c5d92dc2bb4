//! Advisor error types.

use kipo_core::Error as CoreError;
use thiserror::Error;

/// Errors raised while talking to an LLM provider.
///
/// They never reach HTTP callers: the services in `kipo-core` treat every
/// advisor error as "no suggestion" and fall back to local computations.
#[derive(Debug, Error)]
pub enum AiError {
    /// The advisor is switched off in configuration.
    #[error("AI advisor is disabled")]
    Disabled,

    /// Missing API key for a provider.
    #[error("Missing API key for provider {0}")]
    MissingApiKey(String),

    /// Provider error (from rig-core or API).
    #[error("Provider error: {0}")]
    Provider(String),

    /// The provider answered with nothing usable.
    #[error("Empty response from provider")]
    EmptyResponse,

    /// The reply could not be turned into the expected shape.
    #[error("Unreadable response: {0}")]
    Parse(String),

    /// Core error from kipo-core.
    #[error("Core error: {0}")]
    Core(#[from] CoreError),
}

impl AiError {
    pub fn provider(msg: impl Into<String>) -> Self {
        Self::Provider(msg.into())
    }

    pub fn code(&self) -> &'static str {
        match self {
            AiError::Disabled => "AI_DISABLED",
            AiError::MissingApiKey(_) => "MISSING_API_KEY",
            AiError::Provider(_) => "PROVIDER_ERROR",
            AiError::EmptyResponse => "EMPTY_RESPONSE",
            AiError::Parse(_) => "PARSE_ERROR",
            AiError::Core(_) => "CORE_ERROR",
        }
    }
}

impl From<AiError> for CoreError {
    fn from(err: AiError) -> Self {
        match err {
            AiError::Core(inner) => inner,
            other => CoreError::Unexpected(format!("[{}] {}", other.code(), other)),
        }
    }
}
