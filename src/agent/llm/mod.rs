//! LLM client abstraction layer.
//!
//! This module provides:
//! - [`LlmClient`] trait for swappable LLM backends
//! - [`ProviderRegistry`] for creating a backend from configuration
//! - [`OllamaClient`], the local Ollama implementation
//!
//! # Adding a New Provider
//!
//! 1. Create a new file (e.g., `openai.rs`)
//! 2. Implement `LlmClient` trait
//! 3. Add to `ProviderRegistry::create()`
//! 4. Add config fields in `config.rs`

mod types;

use async_trait::async_trait;

use crate::config::Config;
use crate::error::Error;
use crate::Result;

pub use types::*;

pub mod ollama;

pub use ollama::{diagnose, Diagnosis, OllamaClient};

use super::message::Message;

/// LLM client trait — swappable backend abstraction.
///
/// A call either yields the response text or an error describing what went
/// wrong. The agent loop turns errors into ordinary conversation text, so
/// implementations should make error messages readable.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Generate the next assistant turn for the conversation so far.
    async fn generate(&self, messages: &[Message], max_tokens: usize) -> Result<String>;

    /// Get the model this client talks to.
    fn default_model(&self) -> &str;
}

#[async_trait]
impl<T: LlmClient + ?Sized> LlmClient for Box<T> {
    async fn generate(&self, messages: &[Message], max_tokens: usize) -> Result<String> {
        (**self).generate(messages, max_tokens).await
    }

    fn default_model(&self) -> &str {
        (**self).default_model()
    }
}

/// Provider registry — creates LLM clients from configuration.
///
/// # Example
///
/// ```ignore
/// let client = ProviderRegistry::create(&config).await?;
/// let text = client.generate(&messages, config.max_tokens).await?;
/// ```
pub struct ProviderRegistry;

impl ProviderRegistry {
    /// Create an LLM client from configuration.
    ///
    /// Supported providers:
    /// - `"ollama"`: local Ollama server at `config.base_url`
    pub async fn create(config: &Config) -> Result<Box<dyn LlmClient>> {
        match config.provider.as_str() {
            "ollama" => {
                let client = OllamaClient::connect(config).await?;
                Ok(Box::new(client))
            }
            other => Err(Error::Config(format!(
                "Unknown provider: {other} (available: {})",
                Self::available().join(", ")
            ))),
        }
    }

    /// List available provider names.
    pub fn available() -> &'static [&'static str] {
        &["ollama"]
    }
}

/// Fake LLM client for testing.
///
/// Replays scripted responses in order and records the context it was
/// given on every call.
#[cfg(test)]
pub struct FakeLlmClient {
    responses: std::sync::Mutex<std::collections::VecDeque<std::result::Result<String, String>>>,
    calls: std::sync::Mutex<Vec<Vec<Message>>>,
}

#[cfg(test)]
impl FakeLlmClient {
    /// Create with predefined text responses.
    pub fn new(responses: Vec<&str>) -> Self {
        Self::scripted(responses.into_iter().map(|s| Ok(s.to_string())).collect())
    }

    /// Create with responses that may be backend failures.
    pub fn scripted(responses: Vec<std::result::Result<String, String>>) -> Self {
        Self {
            responses: std::sync::Mutex::new(responses.into()),
            calls: std::sync::Mutex::new(Vec::new()),
        }
    }

    /// Number of `generate` calls so far.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Context passed on the n-th call.
    pub fn context_of(&self, call: usize) -> Vec<Message> {
        self.calls.lock().unwrap()[call].clone()
    }
}

#[cfg(test)]
#[async_trait]
impl LlmClient for FakeLlmClient {
    async fn generate(&self, messages: &[Message], _max_tokens: usize) -> Result<String> {
        self.calls.lock().unwrap().push(messages.to_vec());
        let mut responses = self.responses.lock().unwrap();
        match responses.pop_front() {
            Some(Ok(text)) => Ok(text),
            Some(Err(e)) => Err(Error::Llm(e)),
            None => Err(Error::Llm("No more fake responses".to_string())),
        }
    }

    fn default_model(&self) -> &str {
        "fake-model"
    }
}
