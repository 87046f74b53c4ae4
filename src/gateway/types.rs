//! Core types for the completion gateway.

use std::time::Duration;

// =============================================================================
// REQUEST
// =============================================================================

/// Request for a single system+user completion.
///
/// The engine only ever sends one system prompt and one user prompt per call,
/// so the request carries those directly rather than a message list.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// Provider model id, e.g. "llama-3.1-8b-instant".
    pub model: String,
    /// System prompt.
    pub system: String,
    /// User prompt.
    pub user: String,
    /// Sampling temperature (0.0 - 2.0).
    pub temperature: f32,
    /// Maximum tokens to generate.
    pub max_tokens: Option<u32>,
    /// Whether to request JSON output.
    pub json_mode: bool,
}

impl CompletionRequest {
    pub fn new(
        model: impl Into<String>,
        system: impl Into<String>,
        user: impl Into<String>,
    ) -> Self {
        Self {
            model: model.into(),
            system: system.into(),
            user: user.into(),
            temperature: 0.0,
            max_tokens: None,
            json_mode: false,
        }
    }

    pub fn temperature(mut self, t: f32) -> Self {
        self.temperature = t;
        self
    }

    pub fn max_tokens(mut self, max: u32) -> Self {
        self.max_tokens = Some(max);
        self
    }

    pub fn json(mut self) -> Self {
        self.json_mode = true;
        self
    }
}

// =============================================================================
// RESPONSE
// =============================================================================

/// Reason the model stopped generating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FinishReason {
    Stop,
    Length,
    ContentFilter,
    Unknown(String),
}

impl From<Option<String>> for FinishReason {
    fn from(s: Option<String>) -> Self {
        match s.as_deref() {
            Some("stop") => FinishReason::Stop,
            Some("length") => FinishReason::Length,
            Some("content_filter") => FinishReason::ContentFilter,
            Some(other) => FinishReason::Unknown(other.to_string()),
            None => FinishReason::Unknown("none".to_string()),
        }
    }
}

/// Response from a completion request.
#[derive(Debug, Clone)]
pub struct CompletionResponse {
    /// Generated content.
    pub content: String,
    /// Input tokens consumed.
    pub input_tokens: u32,
    /// Output tokens generated.
    pub output_tokens: u32,
    /// Time taken for the request.
    pub latency: Duration,
    /// Why the model stopped.
    pub finish_reason: FinishReason,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_builder_defaults() {
        let req = CompletionRequest::new("llama-3.1-8b-instant", "system", "user");
        assert_eq!(req.temperature, 0.0);
        assert!(req.max_tokens.is_none());
        assert!(!req.json_mode);
    }

    #[test]
    fn request_builder_chains() {
        let req = CompletionRequest::new("m", "s", "u")
            .temperature(0.7)
            .max_tokens(1000)
            .json();
        assert_eq!(req.temperature, 0.7);
        assert_eq!(req.max_tokens, Some(1000));
        assert!(req.json_mode);
    }

    #[test]
    fn finish_reason_parses_known_values() {
        assert_eq!(FinishReason::from(Some("stop".to_string())), FinishReason::Stop);
        assert_eq!(FinishReason::from(Some("length".to_string())), FinishReason::Length);
        assert_eq!(
            FinishReason::from(Some("weird".to_string())),
            FinishReason::Unknown("weird".to_string())
        );
        assert_eq!(FinishReason::from(None), FinishReason::Unknown("none".to_string()));
    }
}
