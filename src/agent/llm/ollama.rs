//! Ollama LLM client implementation (local chat API).

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::Error;
use crate::Result;

use super::super::message::Message;
use super::{ChatOptions, ChatRequest, ChatResponse, ErrorResponse, LlmClient, TagsResponse};

const STOP_SEQUENCES: [&str; 2] = ["Human:", "User:"];

const TAGS_TIMEOUT: Duration = Duration::from_secs(10);

const DIAGNOSE_TIMEOUT: Duration = Duration::from_secs(5);

/// Ollama client talking to `/api/chat`.
#[derive(Clone)]
pub struct OllamaClient {
    client: Client,
    base_url: String,
    model: String,
    temperature: f32,
    top_p: f32,
}

impl OllamaClient {
    /// Create a client for the configured model without contacting the server.
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            temperature: config.temperature,
            top_p: config.top_p,
        })
    }

    /// Create a client and make sure the model is installed.
    ///
    /// If the configured model is missing, the first installed model is used
    /// instead. If the server cannot be queried the configured model is kept.
    pub async fn connect(config: &Config) -> Result<Self> {
        let mut client = Self::new(config)?;
        client.resolve_model().await;
        Ok(client)
    }

    /// Names of the models installed on the server.
    pub async fn list_models(&self) -> Result<Vec<String>> {
        list_models(&self.client, &self.base_url, TAGS_TIMEOUT).await
    }

    async fn resolve_model(&mut self) {
        let available = match self.list_models().await {
            Ok(models) => models,
            Err(e) => {
                warn!("Could not check model availability: {}", e);
                return;
            }
        };

        if available.iter().any(|m| m.contains(&self.model)) {
            info!("Using model: {}", self.model);
            return;
        }

        warn!("Model '{}' not found! Available models: {:?}", self.model, available);
        match available.into_iter().next() {
            Some(suggested) => {
                warn!("Using '{}' instead", suggested);
                self.model = suggested;
            }
            None => warn!("No models available. Install one with: ollama pull llama3.2"),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Map transport failures to the hint the user needs.
fn describe_send_error(e: reqwest::Error) -> Error {
    if e.is_connect() {
        Error::Llm("Cannot connect to Ollama. Make sure Ollama is running with: 'ollama serve'".to_string())
    } else if e.is_timeout() {
        Error::Llm("Request timed out. The model might be too large or the prompt too complex.".to_string())
    } else {
        Error::Llm(format!("Failed to generate response: {}", e))
    }
}

async fn list_models(client: &Client, base_url: &str, timeout: Duration) -> Result<Vec<String>> {
    let response = client
        .get(format!("{}/api/tags", base_url))
        .timeout(timeout)
        .send()
        .await?
        .error_for_status()?;

    let tags: TagsResponse = response.json().await?;
    Ok(tags.models.into_iter().map(|m| m.name).collect())
}

#[async_trait]
impl LlmClient for OllamaClient {
    async fn generate(&self, messages: &[Message], max_tokens: usize) -> Result<String> {
        let request = ChatRequest {
            model: &self.model,
            messages,
            stream: false,
            options: ChatOptions {
                num_predict: max_tokens,
                temperature: self.temperature,
                top_p: self.top_p,
                stop: STOP_SEQUENCES.to_vec(),
            },
        };

        let response = self.client
            .post(self.url("/api/chat"))
            .json(&request)
            .send()
            .await
            .map_err(describe_send_error)?;

        let status = response.status();
        if !status.is_success() {
            let detail = match response.json::<ErrorResponse>().await {
                Ok(body) => format!(" - {}", body.error.as_deref().unwrap_or("Unknown error")),
                Err(_) => String::new(),
            };
            return Err(Error::Llm(format!(
                "HTTP {}{}. Try: 1) Check if model exists with 'ollama list', 2) Pull model with 'ollama pull {}'",
                status.as_u16(),
                detail,
                self.model
            )));
        }

        let chat: ChatResponse = response.json().await.map_err(describe_send_error)?;
        Ok(chat.message.content)
    }

    fn default_model(&self) -> &str {
        &self.model
    }
}

/// State of the local Ollama install.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnosis {
    /// Server is up with these models installed.
    Ready { models: Vec<String> },
    /// Server is up but has no models.
    NoModels,
    /// Server answered with a non-success status.
    BadStatus(u16),
    /// Nothing is listening at the base URL.
    Unreachable,
    Failed(String),
}

/// Check whether Ollama is running and has models installed.
pub async fn diagnose(base_url: &str) -> Diagnosis {
    let client = Client::new();
    let url = format!("{}/api/tags", base_url.trim_end_matches('/'));

    let response = match client.get(url).timeout(DIAGNOSE_TIMEOUT).send().await {
        Ok(response) => response,
        Err(e) if e.is_connect() => return Diagnosis::Unreachable,
        Err(e) => return Diagnosis::Failed(e.to_string()),
    };

    if !response.status().is_success() {
        return Diagnosis::BadStatus(response.status().as_u16());
    }

    match response.json::<TagsResponse>().await {
        Ok(tags) if tags.models.is_empty() => Diagnosis::NoModels,
        Ok(tags) => Diagnosis::Ready {
            models: tags.models.into_iter().map(|m| m.name).collect(),
        },
        Err(e) => Diagnosis::Failed(e.to_string()),
    }
}
