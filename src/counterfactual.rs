//! Counterfactual generator: what the alternate self did instead.
//!
//! Two paths produce an [`AlternateDecision`]. The generated path prompts the
//! completion gateway for a structured better-choice payload; the rule-based
//! path flips a harmful habit to its antidote through the policy table.
//! Generation failure of any kind (capability absent, network error, noisy or
//! malformed payload) falls back to the rule-based path and never surfaces to
//! the caller.

use std::sync::Arc;

use futures::stream::{self, StreamExt};
use tracing::{debug, warn};

use crate::classifier::classify;
use crate::dimension::Dimension;
use crate::gateway::{
    CompletionGateway, CompletionRequest, FinishReason, ProviderError, DEFAULT_MODEL,
};
use crate::policy::base_impact;
use crate::prompts::counterfactual_prompt;
use crate::types::{AlternateDecision, Decision, GeneratedAlternate};

// =============================================================================
// RULE-BASED PATH
// =============================================================================

/// Deterministic alternate for a decision, no I/O.
///
/// Harmful habits (any negative entry in the classified base vector) map to
/// their antidote, with a rationale naming the worst dimension; ties on the
/// worst value resolve in natural key order. Anything else, including
/// unclassified text, doubles down on the original action.
pub fn rule_based_alternate(decision: &Decision) -> AlternateDecision {
    let key = classify(&decision.action);
    let base = base_impact(key);

    let mut negatives: Vec<(Dimension, f64)> = base.iter().filter(|(_, v)| *v < 0.0).collect();
    negatives.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));

    match negatives.first() {
        Some((worst_dim, _)) => {
            let alt_action = key.antidote().label();
            let rationale = format!(
                "Instead of {}, your alternate self chose to {}, improving {} and overall wellbeing.",
                decision.action, alt_action, worst_dim
            );
            AlternateDecision::rule_based(decision.id, alt_action, rationale)
        }
        None => AlternateDecision::rule_based(
            decision.id,
            format!("{} (extended session)", decision.action),
            "Your alternate self doubled down on this positive choice, maximizing the benefits.",
        ),
    }
}

// =============================================================================
// GENERATED PATH
// =============================================================================

/// Internal failure taxonomy for the generated path. Callers never see these;
/// they are logged and the rule-based path takes over.
#[derive(Debug, thiserror::Error)]
enum GenerateError {
    #[error("completion failed: {0}")]
    Completion(#[from] ProviderError),
    #[error("failed to parse alternate payload: {0}")]
    Parse(String),
    #[error("payload has an empty action")]
    EmptyAction,
}

/// Produces alternates for decisions, preferring the generative capability
/// when one is configured.
pub struct CounterfactualGenerator {
    gateway: Option<Arc<dyn CompletionGateway>>,
    model: String,
}

impl CounterfactualGenerator {
    /// `None` means the capability is absent and every alternate will be
    /// rule-based.
    pub fn new(gateway: Option<Arc<dyn CompletionGateway>>) -> Self {
        Self {
            gateway,
            model: DEFAULT_MODEL.to_string(),
        }
    }

    /// Generator with no generative capability.
    pub fn offline() -> Self {
        Self::new(None)
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Alternate for one decision. Infallible: the rule-based path is the
    /// floor behavior.
    pub async fn generate(&self, decision: &Decision) -> AlternateDecision {
        let Some(gateway) = &self.gateway else {
            return rule_based_alternate(decision);
        };

        match self.generated(gateway.as_ref(), decision).await {
            Ok(alt) => alt,
            Err(err) => {
                warn!(
                    decision = %decision.id,
                    error = %err,
                    "alternate generation failed, using rule-based path"
                );
                rule_based_alternate(decision)
            }
        }
    }

    async fn generated(
        &self,
        gateway: &dyn CompletionGateway,
        decision: &Decision,
    ) -> Result<AlternateDecision, GenerateError> {
        let prompt = counterfactual_prompt(decision);
        let req = CompletionRequest::new(&self.model, prompt.system, prompt.user)
            .temperature(0.7)
            .max_tokens(1000)
            .json();

        let resp = gateway.complete(req).await?;
        if resp.finish_reason == FinishReason::Length {
            debug!(decision = %decision.id, "alternate payload truncated at max_tokens");
        }

        let payload = parse_generated(&resp.content)?;
        Ok(AlternateDecision::generated(decision.id, payload))
    }

    /// Alternates for a whole day, generated concurrently and returned in
    /// input order.
    pub async fn generate_batch(
        &self,
        decisions: &[Decision],
        concurrency: usize,
    ) -> Vec<AlternateDecision> {
        let mut indexed: Vec<(usize, AlternateDecision)> = stream::iter(
            decisions
                .iter()
                .enumerate()
                .map(|(idx, decision)| async move { (idx, self.generate(decision).await) }),
        )
        .buffer_unordered(concurrency.max(1))
        .collect()
        .await;

        indexed.sort_by_key(|(idx, _)| *idx);
        indexed.into_iter().map(|(_, alt)| alt).collect()
    }
}

fn parse_generated(raw: &str) -> Result<GeneratedAlternate, GenerateError> {
    let json = extract_json(raw);
    let payload: GeneratedAlternate = serde_json::from_str(json).map_err(|e| {
        let preview: String = raw.chars().take(200).collect();
        GenerateError::Parse(format!("{e} — raw: {preview}"))
    })?;

    if payload.action.trim().is_empty() {
        return Err(GenerateError::EmptyAction);
    }
    Ok(payload)
}

// =============================================================================
// JSON EXTRACTION
// =============================================================================

/// Pull the first JSON object out of possibly noisy model output.
///
/// Accepts bare objects, fenced ```json blocks, and objects buried in prose.
/// When no balanced object is found the trimmed input comes back unchanged,
/// leaving the caller's serde error to describe the mess.
pub fn extract_json(raw: &str) -> &str {
    let trimmed = raw.trim();
    let start = match trimmed.find('{') {
        Some(idx) => idx,
        None => return trimmed,
    };
    let candidate = &trimmed[start..];
    match object_end(candidate) {
        Some(end) => &candidate[..end],
        None => trimmed,
    }
}

/// Byte length of the balanced object opening at the start of `s`, if its
/// braces close. Quoted string literals are consumed whole so braces and
/// escaped quotes inside them never count toward nesting.
fn object_end(s: &str) -> Option<usize> {
    let mut depth = 0i32;
    let mut chars = s.char_indices();

    while let Some((i, c)) = chars.next() {
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i + 1);
                }
            }
            '"' => {
                let mut escaped = false;
                for (_, sc) in chars.by_ref() {
                    if escaped {
                        escaped = false;
                    } else if sc == '\\' {
                        escaped = true;
                    } else if sc == '"' {
                        break;
                    }
                }
            }
            _ => {}
        }
    }
    None
}
