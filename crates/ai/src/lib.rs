//! Kipo AI - budgeting advice from an LLM using rig-core.
//!
//! - `advisor`: [`LlmAdvisor`] and [`DisabledAdvisor`], the implementations
//!   of `kipo_core::recommendations::AdvisorTrait`
//! - `client`: provider client factory and the one-shot completion seam
//! - `prompts`: prompt texts
//! - `extract`: JSON extraction from model replies

pub mod advisor;
pub mod client;
pub mod config;
pub mod error;
pub mod extract;
pub mod prompts;

pub use advisor::{advisor_from_config, DisabledAdvisor, LlmAdvisor};
pub use client::{CompletionBackend, RigBackend};
pub use config::AiConfig;
pub use error::AiError;
