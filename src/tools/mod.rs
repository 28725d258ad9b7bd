//! Tools module - agent capabilities
//!
//! Tools are the external actions the agent can request with a `TOOL_CALL:`
//! line: searching the web and summarizing text.

mod runner;
mod summarize;
mod web;

pub use runner::ToolRunner;
pub use summarize::SummaryTool;
pub use web::WebSearchTool;

use std::collections::HashMap;
use async_trait::async_trait;
use crate::Result;
use crate::error::Error;

/// Keyword arguments parsed from a tool call
pub type ToolArgs = HashMap<String, String>;

/// Tool trait - interface for all agent tools
#[async_trait]
pub trait Tool: Send + Sync {
    /// Tool name used in `TOOL_CALL:` lines
    fn name(&self) -> &str;

    /// One-line call signature shown to the model
    fn description(&self) -> &str;

    /// Execute the tool with the parsed arguments.
    ///
    /// Optional arguments that are missing take the tool's own defaults.
    async fn execute(&self, args: &ToolArgs) -> Result<String>;
}

/// Fetch a required argument or fail with a tool error.
pub(crate) fn required_arg<'a>(args: &'a ToolArgs, key: &str) -> Result<&'a str> {
    args.get(key)
        .map(String::as_str)
        .ok_or_else(|| Error::Tool(format!("Missing '{}' argument", key)))
}

/// Dummy tool for testing
#[cfg(test)]
pub struct DummyTool {
    pub name: String,
    pub description: String,
    pub result: std::result::Result<String, String>,
    pub calls: std::sync::Mutex<Vec<ToolArgs>>,
}

#[cfg(test)]
impl DummyTool {
    pub fn new(name: &str, result: &str) -> Self {
        Self {
            name: name.to_string(),
            description: format!("{}(input: str) - Dummy tool for testing", name),
            result: Ok(result.to_string()),
            calls: std::sync::Mutex::new(Vec::new()),
        }
    }

    pub fn failing(name: &str, error: &str) -> Self {
        Self {
            result: Err(error.to_string()),
            ..Self::new(name, "")
        }
    }
}

#[cfg(test)]
#[async_trait]
impl Tool for DummyTool {
    fn name(&self) -> &str { &self.name }
    fn description(&self) -> &str { &self.description }

    async fn execute(&self, args: &ToolArgs) -> Result<String> {
        self.calls.lock().unwrap().push(args.clone());
        self.result.clone().map_err(Error::Tool)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_arg() {
        let mut args = ToolArgs::new();
        args.insert("query".to_string(), "tides".to_string());

        assert_eq!(required_arg(&args, "query").unwrap(), "tides");

        let err = required_arg(&args, "text").unwrap_err();
        assert_eq!(err.to_string(), "Missing 'text' argument");
    }
}
