//! Web search capability backed by the DuckDuckGo Instant Answer API.
//!
//! The API requires no key and returns abstracts, direct answers, and
//! related topics rather than full result listings. Raw payloads carry
//! the answer text plus its source URL; like every capability, nothing
//! leaves the machine here except the query itself.

use async_trait::async_trait;
use scribe_application::ports::capability::{CapabilityOutput, CapabilityPort};
use scribe_domain::{CandidateResult, ExecutionError, ResultCaps, ToolKind, ToolParams};
use std::time::Duration;
use tracing::debug;

/// DuckDuckGo Instant Answer API endpoint (no API key required).
const DDG_API_URL: &str = "https://api.duckduckgo.com/";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct WebSearchClient {
    client: reqwest::Client,
}

impl WebSearchClient {
    pub fn new() -> Self {
        // Static configuration; a build failure here is a programming
        // error, and falling back to an unbounded client would lose
        // the timeout.
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent("scribe-agent/0.4 (writing assistant)")
            .build()
            .expect("HTTP client construction with static configuration");
        Self { client }
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Default for WebSearchClient {
    fn default() -> Self {
        Self::new()
    }
}

fn str_field<'a>(value: &'a serde_json::Value, key: &str) -> Option<&'a str> {
    value.get(key).and_then(|v| v.as_str()).filter(|s| !s.is_empty())
}

fn topic_candidate(topic: &serde_json::Value, preview_chars: usize) -> Option<CandidateResult> {
    let url = str_field(topic, "FirstURL")?;
    let text = str_field(topic, "Text")?;
    let raw = format!("{}\n\nSource: {}", text, url);
    Some(CandidateResult::with_preview(
        url,
        text,
        text,
        raw,
        preview_chars,
    ))
}

#[async_trait]
impl CapabilityPort for WebSearchClient {
    fn kind(&self) -> ToolKind {
        ToolKind::WebSearch
    }

    async fn execute(
        &self,
        params: &ToolParams,
        caps: &ResultCaps,
    ) -> Result<CapabilityOutput, ExecutionError> {
        let query = match params {
            ToolParams::WebSearch { query } => query,
            other => {
                return Err(ExecutionError::invalid_argument(format!(
                    "web search received {} parameters",
                    other.kind()
                )));
            }
        };
        if query.trim().is_empty() {
            return Err(ExecutionError::invalid_argument("query must not be empty"));
        }

        let response = self
            .client
            .get(DDG_API_URL)
            .query(&[
                ("q", query.as_str()),
                ("format", "json"),
                ("no_html", "1"),
                ("skip_disambig", "1"),
            ])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ExecutionError::timeout("web search timed out")
                } else {
                    ExecutionError::network(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            return Err(ExecutionError::network(format!(
                "search API returned {}",
                response.status()
            )));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ExecutionError::network(e.to_string()))?;

        let mut candidates = Vec::new();

        // Abstract: the headline summary, when present.
        if let Some(abstract_text) = str_field(&body, "AbstractText") {
            let url = str_field(&body, "AbstractURL").unwrap_or(DDG_API_URL);
            let title = str_field(&body, "Heading").unwrap_or(query);
            let raw = format!("{}\n\nSource: {}", abstract_text, url);
            candidates.push(CandidateResult::with_preview(
                url,
                title,
                abstract_text,
                raw,
                caps.preview_chars,
            ));
        }

        // Direct factual answer.
        if let Some(answer) = str_field(&body, "Answer") {
            candidates.push(CandidateResult::new(
                format!("answer:{}", query),
                "Instant Answer",
                answer,
                caps.preview_chars,
            ));
        }

        // Related topics, flattening one level of grouped topics.
        if let Some(topics) = body.get("RelatedTopics").and_then(|v| v.as_array()) {
            for topic in topics {
                if let Some(candidate) = topic_candidate(topic, caps.preview_chars) {
                    candidates.push(candidate);
                } else if let Some(grouped) = topic.get("Topics").and_then(|v| v.as_array()) {
                    candidates.extend(
                        grouped
                            .iter()
                            .filter_map(|t| topic_candidate(t, caps.preview_chars)),
                    );
                }
            }
        }

        let total_found = candidates.len();
        candidates.truncate(caps.max_results);
        debug!(query = %query, total_found, "web search completed");
        Ok(CapabilityOutput::new(candidates, total_found))
    }
}
