//! Core record types: logged decisions, their alternates, daily deltas, and
//! sync tasks.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::dimension::Dimension;

// =============================================================================
// DECISIONS
// =============================================================================

/// A real-world decision logged by the user.
///
/// `intensity` is how big the action was (1..=5, neutral 3) and `sentiment`
/// how the user felt about it (-2..=2, neutral 0). Out-of-range values are
/// accepted as-is and scale accordingly; the engine does not clamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Decision {
    /// Assigned on deserialization when the input omits it, so hand-written
    /// decision files don't need to mint UUIDs.
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    /// User-facing grouping ("health", "productivity", ...): carried through
    /// to prompts but never consulted by the impact math.
    pub category: String,
    /// Free-text description; this is what the classifier reads.
    pub action: String,
    pub intensity: i32,
    pub sentiment: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    /// When the choice was made; may be backdated by the caller.
    #[serde(default = "Utc::now")]
    pub decided_at: DateTime<Utc>,
    /// When the record was logged. Stays put when `decided_at` is backdated.
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Decision {
    pub fn new(
        category: impl Into<String>,
        action: impl Into<String>,
        intensity: i32,
        sentiment: i32,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            category: category.into(),
            action: action.into(),
            intensity,
            sentiment,
            context: None,
            decided_at: Utc::now(),
            created_at: Utc::now(),
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn decided_at(mut self, at: DateTime<Utc>) -> Self {
        self.decided_at = at;
        self
    }
}

// =============================================================================
// ALTERNATES
// =============================================================================

/// How an alternate decision was produced. Downstream impact math branches on
/// this, so it is recorded rather than inferred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    /// Produced by the text-generation capability.
    Generated,
    /// Produced by the deterministic antidote policy.
    RuleBased,
}

/// Structured payload returned by the generation capability for one decision.
///
/// Every field defaults so that a partially valid payload still parses;
/// validation beyond "non-empty action" happens downstream (unknown
/// dimensions in `expected_impact` are dropped at simulation time).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedAlternate {
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub rationale: String,
    #[serde(default)]
    pub expected_impact: Vec<ExpectedImpact>,
    /// Self-assessed difficulty of the alternate, 1..=5.
    #[serde(default)]
    pub difficulty: Option<i32>,
    /// Rough time estimate, e.g. "30 minutes".
    #[serde(default)]
    pub timeframe: Option<String>,
}

/// One predicted per-dimension change inside a generated payload. The
/// dimension is kept as raw text because the generator may name axes outside
/// the closed set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpectedImpact {
    #[serde(default)]
    pub dimension: String,
    #[serde(default)]
    pub change: f64,
    #[serde(default)]
    pub explanation: String,
}

/// The counterfactual twin of a logged [`Decision`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlternateDecision {
    pub id: Uuid,
    /// The real decision this alternate shadows.
    pub decision_id: Uuid,
    pub alt_action: String,
    pub rationale: String,
    pub provenance: Provenance,
    /// Present iff `provenance` is [`Provenance::Generated`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<GeneratedAlternate>,
    pub created_at: DateTime<Utc>,
}

impl AlternateDecision {
    pub fn rule_based(
        decision_id: Uuid,
        alt_action: impl Into<String>,
        rationale: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            decision_id,
            alt_action: alt_action.into(),
            rationale: rationale.into(),
            provenance: Provenance::RuleBased,
            payload: None,
            created_at: Utc::now(),
        }
    }

    pub fn generated(decision_id: Uuid, payload: GeneratedAlternate) -> Self {
        Self {
            id: Uuid::new_v4(),
            decision_id,
            alt_action: payload.action.clone(),
            rationale: payload.rationale.clone(),
            provenance: Provenance::Generated,
            payload: Some(payload),
            created_at: Utc::now(),
        }
    }
}

// =============================================================================
// DELTAS AND TASKS
// =============================================================================

/// Aggregated real-vs-alternate standing for one dimension on one day.
/// Positive `delta` means the alternate self is ahead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyDelta {
    /// Calendar day this delta aggregates, as `YYYY-MM-DD`.
    pub day: String,
    pub dimension: Dimension,
    pub real_score: f64,
    pub alternate_score: f64,
    pub delta: f64,
}

/// A small concrete habit suggested to close a dimension gap.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncTask {
    pub id: Uuid,
    pub title: String,
    pub dimension: Dimension,
    /// Effort estimate in 1..=5, derived from the gap size.
    pub effort: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}
