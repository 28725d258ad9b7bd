//! Summarize tool - pull key sentences out of text

use std::sync::OnceLock;
use async_trait::async_trait;
use regex::Regex;
use tracing::debug;
use crate::Result;
use super::{required_arg, Tool, ToolArgs};

/// Sentences this short are usually fragments, not points.
const MIN_SENTENCE_CHARS: usize = 20;

const MAX_POINTS: usize = 3;

fn sentence_boundary() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[.!?]+").expect("valid sentence regex"))
}

/// Organize text into a short list of key points
pub struct SummaryTool;

impl SummaryTool {
    fn summarize(text: &str) -> String {
        let points: Vec<String> = sentence_boundary()
            .split(text)
            .map(str::trim)
            .filter(|s| s.chars().count() > MIN_SENTENCE_CHARS)
            .take(MAX_POINTS)
            .map(|s| format!("- {}.", s))
            .collect();

        if points.is_empty() {
            return "No content to summarize.".to_string();
        }

        let mut lines = Vec::with_capacity(points.len() + 1);
        lines.push("Key Points".to_string());
        lines.extend(points);
        lines.join("\n")
    }
}

#[async_trait]
impl Tool for SummaryTool {
    fn name(&self) -> &str { "summarize" }
    fn description(&self) -> &str {
        "summarize(text: str, focus: str = 'general') - Summarize and organize text information."
    }

    async fn execute(&self, args: &ToolArgs) -> Result<String> {
        let text = required_arg(args, "text")?;
        // Accepted for the model's benefit; the extraction is the same for every focus.
        let focus = args.get("focus").map(String::as_str).unwrap_or("general");
        debug!("Summarizing {} chars (focus: {})", text.len(), focus);

        Ok(Self::summarize(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(pairs: &[(&str, &str)]) -> ToolArgs {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[tokio::test]
    async fn test_keeps_first_three_long_sentences() {
        let text = "Solar capacity doubled in the last five years. Short one. \
                    Wind power is now the cheapest source in many regions! \
                    Is storage the remaining bottleneck for renewables? \
                    Grid upgrades are also needed to move power around.";
        let out = SummaryTool.execute(&args(&[("text", text)])).await.unwrap();

        assert_eq!(
            out,
            "Key Points\n\
             - Solar capacity doubled in the last five years.\n\
             - Wind power is now the cheapest source in many regions.\n\
             - Is storage the remaining bottleneck for renewables."
        );
    }

    #[tokio::test]
    async fn test_nothing_long_enough() {
        let out = SummaryTool.execute(&args(&[("text", "Too short. Also short!")])).await.unwrap();
        assert_eq!(out, "No content to summarize.");
    }

    #[tokio::test]
    async fn test_focus_is_optional() {
        let text = "Quantum error correction has improved a great deal recently.";
        let with_focus = SummaryTool
            .execute(&args(&[("text", text), ("focus", "hardware")]))
            .await
            .unwrap();
        let without = SummaryTool.execute(&args(&[("text", text)])).await.unwrap();
        assert_eq!(with_focus, without);
    }

    #[tokio::test]
    async fn test_missing_text_is_an_error() {
        let err = SummaryTool.execute(&ToolArgs::new()).await.unwrap_err();
        assert!(err.to_string().contains("'text'"));
    }
}
