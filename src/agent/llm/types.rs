//! Wire types for the Ollama HTTP API.

use serde::{Deserialize, Serialize};

use super::super::message::Message;

/// Body of `POST /api/chat`.
#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: &'a [Message],
    pub stream: bool,
    pub options: ChatOptions,
}

/// Sampling options for a chat request.
#[derive(Debug, Serialize)]
pub struct ChatOptions {
    pub num_predict: usize,
    pub temperature: f32,
    pub top_p: f32,
    /// Keeps the model from writing the next user turn itself.
    pub stop: Vec<&'static str>,
}

/// Non-streaming chat response.
#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub message: ChatMessage,
}

#[derive(Debug, Deserialize)]
pub struct ChatMessage {
    #[serde(default)]
    pub content: String,
}

/// Body of `GET /api/tags`.
#[derive(Debug, Deserialize)]
pub struct TagsResponse {
    #[serde(default)]
    pub models: Vec<ModelTag>,
}

#[derive(Debug, Deserialize)]
pub struct ModelTag {
    pub name: String,
}

/// Error body returned with non-2xx statuses.
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub error: Option<String>,
}
