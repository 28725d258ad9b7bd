//! Tool call parser.
//!
//! The model requests a tool by writing a line such as
//!
//! ```text
//! TOOL_CALL: web_search(query="solar energy")
//! ```
//!
//! Only the first line carrying the marker is considered. The text after the
//! marker must match
//!
//! ```text
//! call    := IDENT '(' arglist? ')'
//! arglist := arg (',' arg)*
//! arg     := IDENT '=' '"' STRING_NO_QUOTE '"'
//! ```
//!
//! Parsing is fail-soft: a broken header means "no call", and argument text
//! that is not a `key="value"` pair is skipped. Quoted values cannot contain
//! escaped quotes, and nested parentheses are not understood.

use crate::tools::ToolArgs;

use super::context::CALL_MARKER;

/// A tool invocation extracted from a model response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCall {
    pub name: String,
    pub args: ToolArgs,
}

/// Result of scanning a response for a tool call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    /// No line contains the call marker.
    NoMarker,
    /// The marker is present but the text after it is not `name(...)`.
    GrammarMismatch,
    /// A well-formed call.
    Call(ToolCall),
    /// A call whose argument list contained text that was not a
    /// `key="value"` pair; that text is in `skipped`.
    PartialArgs { call: ToolCall, skipped: String },
}

impl Extraction {
    /// Collapse to the call the loop should dispatch, if any.
    pub fn into_call(self) -> Option<ToolCall> {
        match self {
            Extraction::Call(call) | Extraction::PartialArgs { call, .. } => Some(call),
            Extraction::NoMarker | Extraction::GrammarMismatch => None,
        }
    }
}

/// Extract a tool call from a model response.
pub fn extract(response: &str) -> Extraction {
    let Some(line) = response.lines().find(|l| l.contains(CALL_MARKER)) else {
        return Extraction::NoMarker;
    };

    // Text after the last marker on the line
    let candidate = match line.rsplit_once(CALL_MARKER) {
        Some((_, rest)) => rest.trim(),
        None => return Extraction::NoMarker,
    };

    let Some((name, arg_text)) = match_header(candidate) else {
        return Extraction::GrammarMismatch;
    };

    let (args, skipped) = scan_args(arg_text);
    let call = ToolCall {
        name: name.to_string(),
        args,
    };

    if skipped.is_empty() {
        Extraction::Call(call)
    } else {
        Extraction::PartialArgs { call, skipped }
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Match `IDENT '(' ... ')'` at the start of `candidate`.
///
/// The argument text runs to the last `)` on the line; anything after it is
/// ignored.
fn match_header(candidate: &str) -> Option<(&str, &str)> {
    let ident_len = candidate
        .find(|c: char| !is_word_char(c))
        .unwrap_or(candidate.len());
    if ident_len == 0 {
        return None;
    }

    let (name, rest) = candidate.split_at(ident_len);
    let rest = rest.strip_prefix('(')?;
    let close = rest.rfind(')')?;
    Some((name, &rest[..close]))
}

/// Collect every non-overlapping `key="value"` pair, left to right.
///
/// Returns the pairs and whatever non-separator text had to be skipped.
fn scan_args(text: &str) -> (ToolArgs, String) {
    let mut args = ToolArgs::new();
    let mut skipped = String::new();
    let mut pos = 0;

    while let Some(c) = text[pos..].chars().next() {
        if let Some((key, value, end)) = match_arg(text, pos) {
            args.insert(key.to_string(), value.to_string());
            pos = end;
            continue;
        }

        if !(c.is_whitespace() || c == ',') {
            skipped.push(c);
        }
        pos += c.len_utf8();
    }

    (args, skipped)
}

/// Try to match `IDENT '=' '"' [^"]* '"'` starting at byte offset `start`.
fn match_arg(text: &str, start: usize) -> Option<(&str, &str, usize)> {
    let rest = &text[start..];
    let key_len = rest.find(|c: char| !is_word_char(c)).unwrap_or(rest.len());
    if key_len == 0 {
        return None;
    }

    let value_and_tail = rest[key_len..].strip_prefix("=\"")?;
    let close = value_and_tail.find('"')?;

    // key + `="` + value + `"`
    let end = start + key_len + 2 + close + 1;
    Some((&rest[..key_len], &value_and_tail[..close], end))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call(response: &str) -> ToolCall {
        extract(response).into_call().expect("expected a tool call")
    }

    #[test]
    fn test_single_argument_call() {
        let tc = call("TOOL_CALL: web_search(query=\"solar energy\")");
        assert_eq!(tc.name, "web_search");
        assert_eq!(tc.args.len(), 1);
        assert_eq!(tc.args["query"], "solar energy");
    }

    #[test]
    fn test_call_inside_prose() {
        let response = "I should look this up first.\n\
                        TOOL_CALL: summarize(text=\"Long text here\", focus=\"energy\")\n\
                        Then I will report back.";
        let tc = call(response);
        assert_eq!(tc.name, "summarize");
        assert_eq!(tc.args["text"], "Long text here");
        assert_eq!(tc.args["focus"], "energy");
    }

    #[test]
    fn test_empty_argument_list() {
        assert_eq!(
            extract("TOOL_CALL: list_sources()"),
            Extraction::Call(ToolCall {
                name: "list_sources".to_string(),
                args: ToolArgs::new(),
            })
        );
    }

    #[test]
    fn test_no_marker() {
        assert_eq!(extract("Just thinking out loud."), Extraction::NoMarker);
        assert_eq!(extract(""), Extraction::NoMarker);
    }

    #[test]
    fn test_missing_close_paren_is_not_a_call() {
        assert_eq!(
            extract("TOOL_CALL: web_search(query=\"solar\""),
            Extraction::GrammarMismatch
        );
    }

    #[test]
    fn test_missing_open_paren_is_not_a_call() {
        assert_eq!(
            extract("TOOL_CALL: web_search query=\"solar\")"),
            Extraction::GrammarMismatch
        );
        assert_eq!(
            extract("TOOL_CALL: web_search (query=\"solar\")"),
            Extraction::GrammarMismatch
        );
    }

    #[test]
    fn test_marker_with_nothing_after_it() {
        assert_eq!(extract("TOOL_CALL:   "), Extraction::GrammarMismatch);
        assert_eq!(extract("TOOL_CALL: (query=\"x\")"), Extraction::GrammarMismatch);
    }

    #[test]
    fn test_only_first_marker_line_counts() {
        let response = "TOOL_CALL: not a call\nTOOL_CALL: web_search(query=\"x\")";
        assert_eq!(extract(response), Extraction::GrammarMismatch);
    }

    #[test]
    fn test_last_marker_on_line_wins() {
        let tc = call("TOOL_CALL: TOOL_CALL: web_search(query=\"tides\")");
        assert_eq!(tc.name, "web_search");
        assert_eq!(tc.args["query"], "tides");
    }

    #[test]
    fn test_text_after_closing_paren_is_ignored() {
        let tc = call("TOOL_CALL: web_search(query=\"wind\") and then summarize");
        assert_eq!(tc.args["query"], "wind");
    }

    #[test]
    fn test_unquoted_argument_is_skipped() {
        let extraction = extract("TOOL_CALL: summarize(text=\"Some text\", focus=general)");
        match extraction {
            Extraction::PartialArgs { call, skipped } => {
                assert_eq!(call.name, "summarize");
                assert_eq!(call.args.len(), 1);
                assert_eq!(call.args["text"], "Some text");
                assert_eq!(skipped, "focus=general");
            }
            other => panic!("expected PartialArgs, got {:?}", other),
        }
    }

    #[test]
    fn test_escaped_quote_truncates_value() {
        // Escapes are not supported: the value ends at the first quote.
        let tc = call(r#"TOOL_CALL: web_search(query="say \"hi\"")"#);
        assert_eq!(tc.args["query"], "say \\");
    }

    #[test]
    fn test_parentheses_inside_value() {
        let tc = call("TOOL_CALL: web_search(query=\"carbon (CO2) capture\")");
        assert_eq!(tc.args["query"], "carbon (CO2) capture");
    }

    #[test]
    fn test_duplicate_key_keeps_last() {
        let tc = call("TOOL_CALL: web_search(query=\"a\", query=\"b\")");
        assert_eq!(tc.args["query"], "b");
    }

    #[test]
    fn test_unicode_values() {
        let tc = call("TOOL_CALL: web_search(query=\"énergie solaire ☀\")");
        assert_eq!(tc.args["query"], "énergie solaire ☀");
    }

    #[test]
    fn test_case_is_preserved() {
        assert_eq!(call("TOOL_CALL: Web_Search(query=\"x\")").name, "Web_Search");
    }
}
