//! Text-generation collaborator interface.
//!
//! The hosted model is the only source of "AI" behavior. Callers describe a
//! single request (persona, history, user text, tool switches) and get back
//! the generated text together with any web sources the answer was grounded on.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Speaker of a prior turn sent as conversation history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    User,
    Model,
}

/// One prior exchange in the conversation history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryTurn {
    pub role: TurnRole,
    pub text: String,
}

/// A single generation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Persona prompt sent as the system instruction.
    pub system_instruction: String,
    /// Earlier turns, oldest first. Empty for one-shot requests.
    #[serde(default)]
    pub history: Vec<HistoryTurn>,
    /// The new user text.
    pub prompt: String,
    /// Enables the search-grounding tool.
    #[serde(default)]
    pub web_search: bool,
    /// Token budget for model-side reasoning.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thinking_budget: Option<u32>,
}

impl GenerationRequest {
    pub fn new(system_instruction: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            system_instruction: system_instruction.into(),
            history: Vec::new(),
            prompt: prompt.into(),
            web_search: false,
            thinking_budget: None,
        }
    }

    pub fn with_history(mut self, history: Vec<HistoryTurn>) -> Self {
        self.history = history;
        self
    }

    pub fn with_web_search(mut self, enabled: bool) -> Self {
        self.web_search = enabled;
        self
    }

    pub fn with_thinking_budget(mut self, budget: Option<u32>) -> Self {
        self.thinking_budget = budget;
        self
    }
}

/// A web source an answer was grounded on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundingCitation {
    pub title: String,
    pub uri: String,
}

/// Result of a successful generation call.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GenerationResponse {
    /// Generated text; `None` when the model returned no text part.
    pub text: Option<String>,
    #[serde(default)]
    pub citations: Vec<GroundingCitation>,
}

impl GenerationResponse {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            citations: Vec::new(),
        }
    }

    /// Returns the text as generated, or `fallback` when it is missing or
    /// blank.
    pub fn text_or(&self, fallback: &str) -> String {
        match self.text.as_deref() {
            Some(text) if !text.trim().is_empty() => text.to_string(),
            _ => fallback.to_string(),
        }
    }
}

/// A hosted text-generation service.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, request: GenerationRequest) -> Result<GenerationResponse>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_or_uses_fallback_for_blank() {
        let blank = GenerationResponse {
            text: Some("   ".into()),
            citations: vec![],
        };
        assert_eq!(blank.text_or("fallback"), "fallback");
        assert_eq!(GenerationResponse::default().text_or("fallback"), "fallback");
    }

    #[test]
    fn test_text_or_keeps_surrounding_whitespace() {
        let reply = GenerationResponse::text("\nTry a picnic.\n");
        assert_eq!(reply.text_or("fallback"), "\nTry a picnic.\n");
    }

    #[test]
    fn test_builder_sets_switches() {
        let request = GenerationRequest::new("persona", "hello")
            .with_web_search(true)
            .with_thinking_budget(Some(100));
        assert!(request.web_search);
        assert_eq!(request.thinking_budget, Some(100));
        assert!(request.history.is_empty());
    }
}
