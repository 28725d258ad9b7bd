//! Prompt construction and the protocol markers.
//!
//! The markers below appear both in the instructions given to the model and
//! in the code that recognises them. Change them together.

use crate::tools::ToolRunner;

use super::message::ConversationLog;

/// Prefix of a line that requests a tool.
pub const CALL_MARKER: &str = "TOOL_CALL:";

/// Prefix of the final report.
pub const FINAL_ANSWER_MARKER: &str = "FINAL_ANSWER:";

/// Build the system prompt from the registered tools.
pub fn build_system_prompt(tools: &ToolRunner) -> String {
    let tools_desc = tools
        .descriptions()
        .map(|d| format!("- {d}"))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"You are a research agent. Your job is to help users research topics by gathering information and providing comprehensive reports.

Available tools:
{tools_desc}

To use a tool, write: {CALL_MARKER} tool_name(arg1="value1", arg2="value2")

Your research process should be:
1. Break down the research topic into key questions
2. Use web_search to find information about different aspects
3. Use summarize to organize the information you find
4. Provide a comprehensive final answer

When you're ready to give your final answer, write: {FINAL_ANSWER_MARKER} [your comprehensive response]

Be thorough, accurate, and cite your sources when possible."#
    )
}

/// Start a fresh conversation for `task`.
pub fn seed_log(tools: &ToolRunner, task: &str) -> ConversationLog {
    ConversationLog::seed(build_system_prompt(tools), task)
}
