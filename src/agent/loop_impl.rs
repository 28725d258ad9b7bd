//! Agent loop - core research cycle

use tracing::{debug, info, warn};
use crate::tools::ToolRunner;
use super::context::{seed_log, FINAL_ANSWER_MARKER};
use super::llm::LlmClient;
use super::message::ConversationLog;
use super::parser::{self, Extraction};

/// Default number of model calls per run.
pub const DEFAULT_MAX_ITERATIONS: usize = 5;

/// Default token cap per model call.
pub const DEFAULT_MAX_TOKENS: usize = 1000;

/// Returned when the budget runs out before a final answer.
pub const NO_FINAL_ANSWER: &str =
    "Research completed but agent didn't provide a final answer within the iteration limit.";

/// How a run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The model wrote a final answer; holds the trimmed text after the marker.
    Answer(String),
    /// The iteration budget ran out.
    Exhausted,
}

/// Result of one research run
#[derive(Debug, Clone)]
pub struct Research {
    pub outcome: Outcome,
    /// Model calls made
    pub iterations: usize,
    /// Everything written to the conversation before the run ended
    pub log: ConversationLog,
}

impl Research {
    /// The report text: the final answer, or the fixed fallback message.
    pub fn report(&self) -> &str {
        match &self.outcome {
            Outcome::Answer(text) => text,
            Outcome::Exhausted => NO_FINAL_ANSWER,
        }
    }

    pub fn into_report(self) -> String {
        match self.outcome {
            Outcome::Answer(text) => text,
            Outcome::Exhausted => NO_FINAL_ANSWER.to_string(),
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self.outcome, Outcome::Answer(_))
    }
}

/// The agent loop alternates model calls and tool dispatch until the model
/// gives a final answer or the iteration budget runs out.
///
/// A run never fails: backend and tool errors become conversation text.
pub struct AgentLoop<C: LlmClient> {
    client: C,
    tools: ToolRunner,
    max_iterations: usize,
    max_tokens: usize,
}

impl<C: LlmClient> AgentLoop<C> {
    /// Create a new agent loop
    pub fn new(client: C, tools: ToolRunner, max_iterations: usize) -> Self {
        Self {
            client,
            tools,
            max_iterations,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    /// Set the token cap passed to the backend
    pub fn with_max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Research `task` and return the report with the conversation that produced it.
    pub async fn run(&self, task: &str) -> Research {
        let mut log = seed_log(&self.tools, task);

        info!("Starting research on: {}", task);

        for iteration in 1..=self.max_iterations {
            debug!("Iteration {}/{}", iteration, self.max_iterations);

            let response = self.generate(&log).await;
            info!("Agent thinking: {}", preview(&response, 200));

            let extraction = parser::extract(&response);
            match &extraction {
                Extraction::GrammarMismatch => {
                    debug!("Tool call marker present but call is malformed, treating as text");
                }
                Extraction::PartialArgs { call, skipped } => {
                    debug!("Tool call {} had unparsed arguments: {}", call.name, skipped);
                }
                Extraction::NoMarker | Extraction::Call(_) => {}
            }

            if let Some(call) = extraction.into_call() {
                info!("Using tool: {}", call.name);

                if self.tools.has(&call.name) {
                    let result = self.tools.execute_to_text(&call.name, &call.args).await;
                    info!("Tool result: {}", preview(&result, 100));

                    log.push_assistant(response);
                    log.push_user(format!("Tool result: {}", result));
                } else {
                    warn!("Model asked for unknown tool: {}", call.name);
                    log.push_assistant(format!("Error: Unknown tool '{}'", call.name));
                }
            } else if let Some(answer) = final_answer(&response) {
                info!("Research completed after {} iterations", iteration);
                return Research {
                    outcome: Outcome::Answer(answer.to_string()),
                    iterations: iteration,
                    log,
                };
            } else {
                log.push_assistant(response);
            }
        }

        warn!("No final answer within {} iterations", self.max_iterations);
        Research {
            outcome: Outcome::Exhausted,
            iterations: self.max_iterations,
            log,
        }
    }

    /// Call the backend; failures come back as text like any other response.
    async fn generate(&self, log: &ConversationLog) -> String {
        match self.client.generate(log.messages(), self.max_tokens).await {
            Ok(text) => text,
            Err(e) => {
                // Counts against the budget like any response.
                warn!("Backend call failed: {}", e);
                format!("Error: {}", e)
            }
        }
    }
}

/// Text after the last final-answer marker, trimmed.
fn final_answer(response: &str) -> Option<&str> {
    response
        .rsplit_once(FINAL_ANSWER_MARKER)
        .map(|(_, answer)| answer.trim())
}

/// First `max_chars` characters, for log lines.
fn preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
