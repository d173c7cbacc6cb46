//! GeminiApiAgent - Direct REST API implementation for Gemini.
//!
//! Sends `generateContent` requests with an optional `google_search` tool and
//! thinking budget, and returns the generated text plus grounded references.

use std::collections::HashSet;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, header::HeaderValue};
use serde::{Deserialize, Serialize};
use spark_core::SparkError;
use spark_core::config::DEFAULT_GEMINI_MODEL;
use spark_core::error::Result;
use spark_core::generation::{
    GenerationRequest, GenerationResponse, GroundingCitation, TextGenerator, TurnRole,
};

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Agent implementation that talks to the Gemini HTTP API.
#[derive(Clone)]
pub struct GeminiApiAgent {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiApiAgent {
    /// Creates a new agent with the provided API key and model.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            base_url: BASE_URL.to_string(),
        }
    }

    /// Creates an agent for the default model.
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self::new(api_key, DEFAULT_GEMINI_MODEL)
    }

    /// Overrides the API root (e.g. for a proxy).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn build_request(request: &GenerationRequest) -> GenerateContentRequest {
        let mut contents: Vec<Content> = request
            .history
            .iter()
            .filter(|turn| !turn.text.trim().is_empty())
            .map(|turn| Content {
                role: Some(
                    match turn.role {
                        TurnRole::User => "user",
                        TurnRole::Model => "model",
                    }
                    .to_string(),
                ),
                parts: vec![Part {
                    text: turn.text.clone(),
                }],
            })
            .collect();
        contents.push(Content {
            role: Some("user".to_string()),
            parts: vec![Part {
                text: request.prompt.clone(),
            }],
        });

        let system_instruction = (!request.system_instruction.is_empty()).then(|| Content {
            role: None,
            parts: vec![Part {
                text: request.system_instruction.clone(),
            }],
        });

        let tools = if request.web_search {
            vec![Tool::default()]
        } else {
            Vec::new()
        };

        let generation_config = request.thinking_budget.map(|budget| GenerationConfig {
            thinking_config: ThinkingConfig {
                thinking_budget: budget,
            },
        });

        GenerateContentRequest {
            contents,
            system_instruction,
            tools,
            generation_config,
        }
    }

    async fn send_request(&self, body: &GenerateContentRequest) -> Result<GenerationResponse> {
        let url = format!(
            "{}/{model}:generateContent?key={api_key}",
            self.base_url,
            model = self.model,
            api_key = self.api_key
        );

        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|err| {
                let is_retryable = err.is_connect() || err.is_timeout();
                SparkError::Generation {
                    status_code: None,
                    message: format!("Gemini API request failed: {}", err.without_url()),
                    is_retryable,
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let retry_after = parse_retry_after(response.headers().get("retry-after"));
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read Gemini error body".to_string());
            return Err(map_http_error(status, body_text, retry_after));
        }

        let parsed: GenerateContentResponse = response.json().await.map_err(|err| {
            SparkError::generation(format!("Failed to parse Gemini response: {err}"))
        })?;

        Ok(into_generation_response(parsed))
    }
}

#[async_trait]
impl TextGenerator for GeminiApiAgent {
    async fn generate(&self, request: GenerationRequest) -> Result<GenerationResponse> {
        if self.api_key.trim().is_empty() {
            return Err(SparkError::config("Gemini API key is not configured"));
        }

        tracing::debug!(
            model = %self.model,
            web_search = request.web_search,
            history = request.history.len(),
            "Sending Gemini request"
        );
        let body = Self::build_request(&request);
        let response = self.send_request(&body).await?;
        tracing::debug!(citations = response.citations.len(), "Gemini request finished");
        Ok(response)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<Tool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Serialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Serialize, Default)]
struct Tool {
    #[serde(rename = "google_search")]
    google_search: GoogleSearchConfig,
}

#[derive(Serialize, Default)]
struct GoogleSearchConfig {}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    thinking_config: ThinkingConfig,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ThinkingConfig {
    thinking_budget: u32,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<ContentResponse>,
    grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Deserialize)]
struct ContentResponse {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Deserialize)]
struct PartResponse {
    text: Option<String>,
    #[serde(default)]
    thought: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroundingMetadata {
    #[serde(default)]
    grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Deserialize)]
struct GroundingChunk {
    web: Option<WebChunk>,
}

#[derive(Deserialize)]
struct WebChunk {
    uri: Option<String>,
    title: Option<String>,
}

#[derive(Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    status: Option<String>,
}

/// Collects the first candidate's answer text and every grounded web source.
fn into_generation_response(response: GenerateContentResponse) -> GenerationResponse {
    let candidates = response.candidates.unwrap_or_default();

    let text = candidates
        .first()
        .and_then(|candidate| candidate.content.as_ref())
        .map(|content| {
            content
                .parts
                .iter()
                .filter(|part| !part.thought)
                .filter_map(|part| part.text.as_deref())
                .collect::<String>()
        })
        .filter(|text| !text.trim().is_empty());

    let mut seen = HashSet::new();
    let citations = candidates
        .iter()
        .filter_map(|candidate| candidate.grounding_metadata.as_ref())
        .flat_map(|metadata| metadata.grounding_chunks.iter())
        .filter_map(|chunk| chunk.web.as_ref())
        .filter_map(|web| {
            let uri = web.uri.clone()?;
            if !seen.insert(uri.clone()) {
                return None;
            }
            let title = web.title.clone().unwrap_or_else(|| uri.clone());
            Some(GroundingCitation { title, uri })
        })
        .collect();

    GenerationResponse { text, citations }
}

fn map_http_error(status: StatusCode, body: String, retry_after: Option<Duration>) -> SparkError {
    let message = serde_json::from_str::<ErrorWrapper>(&body)
        .map(|wrapper| {
            let status_text = wrapper.error.status.unwrap_or_default();
            let msg = wrapper.error.message.unwrap_or_else(|| body.clone());
            if status_text.is_empty() {
                msg
            } else {
                format!("{status_text}: {msg}")
            }
        })
        .unwrap_or_else(|_| body.clone());

    let message = match retry_after {
        Some(delay) => format!("{message} (retry after {}s)", delay.as_secs()),
        None => message,
    };

    SparkError::Generation {
        status_code: Some(status.as_u16()),
        message,
        is_retryable: is_retryable_status(status),
    }
}

fn is_retryable_status(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::TOO_MANY_REQUESTS
            | StatusCode::INTERNAL_SERVER_ERROR
            | StatusCode::BAD_GATEWAY
            | StatusCode::SERVICE_UNAVAILABLE
            | StatusCode::GATEWAY_TIMEOUT
    )
}

fn parse_retry_after(header: Option<&HeaderValue>) -> Option<Duration> {
    let value = header?.to_str().ok()?;
    value.parse::<u64>().ok().map(Duration::from_secs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use spark_core::generation::HistoryTurn;

    fn parse(value: serde_json::Value) -> GenerationResponse {
        into_generation_response(serde_json::from_value(value).unwrap())
    }

    #[test]
    fn test_request_with_search_and_system_instruction() {
        let request = GenerationRequest::new("Be a coach.", "How do I start?").with_web_search(true);
        let body = serde_json::to_value(GeminiApiAgent::build_request(&request)).unwrap();

        assert_eq!(body["systemInstruction"]["parts"][0]["text"], "Be a coach.");
        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(body["contents"][0]["parts"][0]["text"], "How do I start?");
        assert!(body["tools"][0].get("google_search").is_some());
        assert!(body.get("generationConfig").is_none());
    }

    #[test]
    fn test_request_with_history_and_thinking_budget() {
        let request = GenerationRequest::new("Be Maya.", "What do you draw?")
            .with_history(vec![
                HistoryTurn {
                    role: TurnRole::User,
                    text: "Hi Maya".into(),
                },
                HistoryTurn {
                    role: TurnRole::Model,
                    text: "Hey! Love this cafe.".into(),
                },
            ])
            .with_thinking_budget(Some(100));
        let body = serde_json::to_value(GeminiApiAgent::build_request(&request)).unwrap();

        let contents = body["contents"].as_array().unwrap();
        assert_eq!(contents.len(), 3);
        assert_eq!(contents[1]["role"], "model");
        assert_eq!(contents[2]["parts"][0]["text"], "What do you draw?");
        assert_eq!(
            body["generationConfig"]["thinkingConfig"]["thinkingBudget"],
            100
        );
        assert!(body.get("tools").is_none());
    }

    #[test]
    fn test_response_text_and_deduplicated_citations() {
        let response = parse(json!({
            "candidates": [{
                "content": { "parts": [
                    { "text": "planning...", "thought": true },
                    { "text": "Ask an open question." }
                ]},
                "groundingMetadata": { "groundingChunks": [
                    { "web": { "uri": "https://a.example", "title": "A" } },
                    { "web": { "uri": "https://a.example", "title": "A again" } },
                    { "web": { "uri": "https://b.example" } },
                    { "retrievedContext": { "uri": "ignored" } }
                ]}
            }]
        }));

        assert_eq!(response.text.as_deref(), Some("Ask an open question."));
        assert_eq!(
            response.citations,
            vec![
                GroundingCitation {
                    title: "A".into(),
                    uri: "https://a.example".into()
                },
                GroundingCitation {
                    title: "https://b.example".into(),
                    uri: "https://b.example".into()
                },
            ]
        );
    }

    #[test]
    fn test_response_without_candidates_has_no_text() {
        let response = parse(json!({}));
        assert!(response.text.is_none());
        assert!(response.citations.is_empty());
    }

    #[test]
    fn test_map_http_error_uses_api_message() {
        let body = r#"{"error":{"code":429,"message":"Quota exceeded","status":"RESOURCE_EXHAUSTED"}}"#;
        let err = map_http_error(
            StatusCode::TOO_MANY_REQUESTS,
            body.to_string(),
            Some(Duration::from_secs(7)),
        );
        match err {
            SparkError::Generation {
                status_code,
                message,
                is_retryable,
            } => {
                assert_eq!(status_code, Some(429));
                assert_eq!(message, "RESOURCE_EXHAUSTED: Quota exceeded (retry after 7s)");
                assert!(is_retryable);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_map_http_error_falls_back_to_body() {
        let err = map_http_error(StatusCode::BAD_REQUEST, "bad".into(), None);
        assert_eq!(
            err,
            SparkError::Generation {
                status_code: Some(400),
                message: "bad".into(),
                is_retryable: false,
            }
        );
    }

    #[tokio::test]
    async fn test_empty_api_key_fails_without_network() {
        let agent = GeminiApiAgent::with_api_key("").with_base_url("http://127.0.0.1:9");
        let err = agent
            .generate(GenerationRequest::new("persona", "hello"))
            .await
            .unwrap_err();
        assert!(matches!(err, SparkError::Config(_)));
    }
}
