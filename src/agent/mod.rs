//! Agent module — core agent logic.
//!
//! This module contains:
//! - Message types and the append-only conversation log
//! - LLM client trait and the Ollama implementation
//! - The tool call parser for `TOOL_CALL:` lines
//! - Agent loop driving model calls and tool dispatch
//! - Prompt construction and protocol markers
//!
//! # Adding a New LLM Provider
//!
//! See [`llm::ProviderRegistry`] for instructions.

mod context;
mod loop_impl;
mod message;
pub mod parser;

// LLM providers in submodule
pub mod llm;

// Re-exports for convenience
pub use context::{build_system_prompt, CALL_MARKER, FINAL_ANSWER_MARKER};
pub use llm::{diagnose, Diagnosis, LlmClient, OllamaClient, ProviderRegistry};
pub use loop_impl::{AgentLoop, Outcome, Research, DEFAULT_MAX_ITERATIONS, DEFAULT_MAX_TOKENS, NO_FINAL_ANSWER};
pub use message::{ConversationLog, Message, Role};
pub use parser::{Extraction, ToolCall};
