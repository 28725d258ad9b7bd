//! Tool runner - manages and executes tools

use tracing::debug;
use crate::config::SearchConfig;
use crate::Result;
use crate::error::Error;
use super::{Tool, ToolArgs};
use super::summarize::SummaryTool;
use super::web::WebSearchTool;

/// Tool runner holds the registered tools, in registration order.
///
/// Lookup is exact and case-sensitive. Once handed to an
/// [`AgentLoop`](crate::agent::AgentLoop) the set of tools is fixed.
pub struct ToolRunner {
    tools: Vec<Box<dyn Tool>>,
}

impl ToolRunner {
    /// Create an empty tool runner
    pub fn new() -> Self {
        Self {
            tools: Vec::new(),
        }
    }

    /// Create a tool runner with the research tools
    pub fn new_with_defaults(search: &SearchConfig) -> Result<Self> {
        let mut runner = Self::new();

        runner.register(WebSearchTool::new(search)?);
        runner.register(SummaryTool);

        Ok(runner)
    }

    /// Register a tool, replacing any tool with the same name
    pub fn register<T: Tool + 'static>(&mut self, tool: T) {
        if let Some(slot) = self.tools.iter_mut().find(|t| t.name() == tool.name()) {
            *slot = Box::new(tool);
        } else {
            self.tools.push(Box::new(tool));
        }
    }

    fn get(&self, name: &str) -> Option<&dyn Tool> {
        self.tools.iter().find(|t| t.name() == name).map(|t| &**t)
    }

    /// Tool descriptions for the system prompt
    pub fn descriptions(&self) -> impl Iterator<Item = &str> {
        self.tools.iter().map(|t| t.description())
    }

    /// Execute a tool by name
    pub async fn execute(&self, name: &str, args: &ToolArgs) -> Result<String> {
        let tool = self.get(name)
            .ok_or_else(|| Error::Tool(format!("Unknown tool: {}", name)))?;

        tool.execute(args).await
    }

    /// Execute a tool and render any failure as text.
    ///
    /// This is what the agent loop feeds back to the model.
    pub async fn execute_to_text(&self, name: &str, args: &ToolArgs) -> String {
        match self.execute(name, args).await {
            Ok(result) => {
                debug!("Tool {} succeeded: {} chars", name, result.len());
                result
            }
            Err(e) => {
                let error_msg = format!("Error: {}", e);
                debug!("Tool {} failed: {}", name, error_msg);
                error_msg
            }
        }
    }

    /// Check if a tool exists
    pub fn has(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// List registered tool names
    pub fn tool_names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl Default for ToolRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::DummyTool;

    #[tokio::test]
    async fn test_tool_runner_register_and_execute() {
        let mut runner = ToolRunner::new();
        runner.register(DummyTool::new("test_tool", "success"));

        assert!(runner.has("test_tool"));

        let result = runner.execute("test_tool", &ToolArgs::new()).await.unwrap();
        assert_eq!(result, "success");
    }

    #[tokio::test]
    async fn test_tool_runner_unknown_tool() {
        let runner = ToolRunner::new();
        let result = runner.execute("unknown", &ToolArgs::new()).await;
        assert!(result.is_err());
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let mut runner = ToolRunner::new();
        runner.register(DummyTool::new("web_search", "ok"));
        assert!(runner.has("web_search"));
        assert!(!runner.has("Web_Search"));
    }

    #[test]
    fn test_registration_order_is_kept() {
        let mut runner = ToolRunner::new();
        runner.register(DummyTool::new("zeta", "z"));
        runner.register(DummyTool::new("alpha", "a"));
        runner.register(DummyTool::new("zeta", "z2"));

        assert_eq!(runner.tool_names(), vec!["zeta", "alpha"]);
        assert_eq!(runner.len(), 2);
    }

    #[tokio::test]
    async fn test_failures_become_text() {
        let mut runner = ToolRunner::new();
        runner.register(DummyTool::failing("flaky", "Search failed: timeout"));

        let text = runner.execute_to_text("flaky", &ToolArgs::new()).await;
        assert_eq!(text, "Error: Search failed: timeout");
    }

    #[test]
    fn test_defaults() {
        let runner = ToolRunner::new_with_defaults(&SearchConfig::default()).unwrap();
        assert_eq!(runner.tool_names(), vec!["web_search", "summarize"]);
    }
}
