//! Web search tool - DuckDuckGo Instant Answer API

use std::time::Duration;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;
use crate::config::SearchConfig;
use crate::Result;
use super::{required_arg, Tool, ToolArgs};

/// Subset of the Instant Answer response we use.
///
/// Either field may be absent or `null`; both mean "nothing here".
#[derive(Debug, Default, Deserialize)]
struct InstantAnswer {
    #[serde(rename = "Abstract", default)]
    summary: Option<String>,

    /// Mix of topic objects (`{"Text": ...}`) and topic groups
    #[serde(rename = "RelatedTopics", default)]
    related_topics: Option<Vec<Value>>,
}

/// Search the web through DuckDuckGo (free, no API key needed)
pub struct WebSearchTool {
    client: Client,
    endpoint: String,
    max_related: usize,
}

impl WebSearchTool {
    pub fn new(config: &SearchConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("sleuth/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            max_related: config.max_related,
        })
    }

    async fn search(&self, query: &str) -> Result<InstantAnswer> {
        let response = self.client
            .get(&self.endpoint)
            .query(&[
                ("q", query),
                ("format", "json"),
                ("no_html", "1"),
                ("skip_disambig", "1"),
            ])
            .send()
            .await?;

        // The API answers with a javascript content type, so parse the body ourselves
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    fn format_answer(&self, query: &str, answer: &InstantAnswer) -> String {
        let mut result = Vec::new();

        if let Some(summary) = answer.summary.as_deref().filter(|s| !s.is_empty()) {
            result.push(format!("Summary: {}", summary));
        }

        if let Some(topics) = answer.related_topics.as_deref().filter(|t| !t.is_empty()) {
            result.push("Related Information:".to_string());
            // Groups among the first few entries have no Text and are dropped.
            result.extend(
                topics
                    .iter()
                    .take(self.max_related)
                    .filter_map(|topic| topic.get("Text").and_then(Value::as_str))
                    .map(|text| format!("- {}", text)),
            );
        }

        if result.is_empty() {
            format!(
                "No detailed information found for '{}'. Try a more specific search term.",
                query
            )
        } else {
            result.join("\n")
        }
    }
}

#[async_trait]
impl Tool for WebSearchTool {
    fn name(&self) -> &str { "web_search" }
    fn description(&self) -> &str {
        "web_search(query: str) - Search the web for information about a topic"
    }

    async fn execute(&self, args: &ToolArgs) -> Result<String> {
        let query = required_arg(args, "query")?;
        debug!("Searching DuckDuckGo for: {}", query);

        // A failed search is still a result the model can read and react to.
        match self.search(query).await {
            Ok(answer) => Ok(self.format_answer(query, &answer)),
            Err(e) => {
                debug!("Search for '{}' failed: {}", query, e);
                Ok(format!("Search failed: {}", e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn setup(body: Value) -> (MockServer, WebSearchTool) {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("q", "solar energy"))
            .and(query_param("format", "json"))
            .and(query_param("no_html", "1"))
            .and(query_param("skip_disambig", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&server)
            .await;

        let config = SearchConfig {
            endpoint: format!("{}/", server.uri()),
            ..SearchConfig::default()
        };
        (server, WebSearchTool::new(&config).unwrap())
    }

    fn query(q: &str) -> ToolArgs {
        ToolArgs::from([("query".to_string(), q.to_string())])
    }

    #[tokio::test]
    async fn test_summary_and_related_topics() {
        let (_server, tool) = setup(json!({
            "Abstract": "Solar energy is radiant light and heat from the Sun.",
            "RelatedTopics": [
                {"Text": "Photovoltaics - conversion of light into electricity"},
                {"Name": "See also", "Topics": []},
                {"Text": "Solar thermal energy"},
                {"Text": "Never shown"}
            ]
        }))
        .await;

        let result = tool.execute(&query("solar energy")).await.unwrap();
        assert_eq!(
            result,
            "Summary: Solar energy is radiant light and heat from the Sun.\n\
             Related Information:\n\
             - Photovoltaics - conversion of light into electricity\n\
             - Solar thermal energy"
        );
    }

    #[tokio::test]
    async fn test_empty_answer() {
        let (_server, tool) = setup(json!({"Abstract": "", "RelatedTopics": []})).await;

        let result = tool.execute(&query("solar energy")).await.unwrap();
        assert_eq!(
            result,
            "No detailed information found for 'solar energy'. Try a more specific search term."
        );
    }

    #[tokio::test]
    async fn test_bad_body_is_a_search_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>rate limited</html>"))
            .mount(&server)
            .await;

        let config = SearchConfig {
            endpoint: server.uri(),
            ..SearchConfig::default()
        };
        let tool = WebSearchTool::new(&config).unwrap();

        let result = tool.execute(&query("anything")).await.unwrap();
        assert!(result.starts_with("Search failed: JSON error:"));
    }

    #[tokio::test]
    async fn test_null_abstract_keeps_related_topics() {
        let (_server, tool) = setup(json!({
            "Abstract": null,
            "RelatedTopics": [{"Text": "Photovoltaics"}]
        }))
        .await;

        let result = tool.execute(&query("solar energy")).await.unwrap();
        assert_eq!(result, "Related Information:\n- Photovoltaics");
    }

    #[tokio::test]
    async fn test_null_fields_mean_no_information() {
        let (_server, tool) = setup(json!({"Abstract": "", "RelatedTopics": null})).await;

        let result = tool.execute(&query("solar energy")).await.unwrap();
        assert_eq!(
            result,
            "No detailed information found for 'solar energy'. Try a more specific search term."
        );
    }

    #[tokio::test]
    async fn test_missing_query() {
        let tool = WebSearchTool::new(&SearchConfig::default()).unwrap();
        let err = tool.execute(&ToolArgs::new()).await.unwrap_err();
        assert_eq!(err.to_string(), "Missing 'query' argument");
    }
}
