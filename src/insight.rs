//! Coaching insights and whole-journey analysis.
//!
//! A thin peer of the counterfactual generator: same generated/fallback
//! shape, but feeding on aggregated history instead of a single decision.
//! Not part of the scoring math; nothing downstream consumes these.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::counterfactual::extract_json;
use crate::gateway::{CompletionGateway, CompletionRequest, ProviderError, DEFAULT_MODEL};
use crate::prompts::{analysis_prompt, insights_prompt};
use crate::types::{DailyDelta, Decision};

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    Warning,
    Success,
    Info,
    Tip,
}

impl InsightKind {
    /// Lenient parse for generated payloads; unknown kinds become `Info`.
    pub fn from_str(s: &str) -> InsightKind {
        match s.trim().to_lowercase().as_str() {
            "warning" => InsightKind::Warning,
            "success" => InsightKind::Success,
            "tip" => InsightKind::Tip,
            _ => InsightKind::Info,
        }
    }
}

/// One piece of coaching advice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Insight {
    pub kind: InsightKind,
    pub title: String,
    pub message: String,
    pub actionable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_action: Option<String>,
}

/// Whole-journey analysis summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Analysis {
    /// 0..=100, higher is better.
    pub overall_score: i32,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub recommendations: Vec<String>,
    pub motivational_message: String,
}

// =============================================================================
// WIRE SHAPES
// =============================================================================

#[derive(Debug, Deserialize)]
struct InsightsResponse {
    insights: Vec<InsightWire>,
}

/// Raw insight as extracted from LLM JSON output.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InsightWire {
    #[serde(default, rename = "type")]
    kind: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    message: String,
    #[serde(default)]
    actionable: bool,
    #[serde(default)]
    suggested_action: Option<String>,
}

impl InsightWire {
    fn into_insight(self) -> Insight {
        Insight {
            kind: InsightKind::from_str(&self.kind),
            title: self.title,
            message: self.message,
            actionable: self.actionable,
            suggested_action: self.suggested_action,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnalysisWire {
    overall_score: i32,
    #[serde(default)]
    strengths: Vec<String>,
    #[serde(default)]
    weaknesses: Vec<String>,
    #[serde(default)]
    recommendations: Vec<String>,
    #[serde(default)]
    motivational_message: String,
}

#[derive(Debug, thiserror::Error)]
enum InsightError {
    #[error("completion failed: {0}")]
    Completion(#[from] ProviderError),
    #[error("failed to parse payload: {0}")]
    Parse(String),
}

// =============================================================================
// GENERATOR
// =============================================================================

/// Produces insights and analyses, preferring the generative capability when
/// one is configured and there is any history to feed it.
pub struct InsightGenerator {
    gateway: Option<Arc<dyn CompletionGateway>>,
    model: String,
}

impl InsightGenerator {
    pub fn new(gateway: Option<Arc<dyn CompletionGateway>>) -> Self {
        Self {
            gateway,
            model: DEFAULT_MODEL.to_string(),
        }
    }

    pub fn offline() -> Self {
        Self::new(None)
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Coaching insights over recent history. Infallible; the deterministic
    /// fallback is the floor behavior.
    pub async fn insights(&self, decisions: &[Decision], deltas: &[DailyDelta]) -> Vec<Insight> {
        let Some(gateway) = &self.gateway else {
            return fallback_insights(deltas);
        };
        if decisions.is_empty() {
            return fallback_insights(deltas);
        }

        match self.generated_insights(gateway.as_ref(), decisions, deltas).await {
            Ok(insights) => insights,
            Err(err) => {
                warn!(error = %err, "insight generation failed, using fallback");
                fallback_insights(deltas)
            }
        }
    }

    async fn generated_insights(
        &self,
        gateway: &dyn CompletionGateway,
        decisions: &[Decision],
        deltas: &[DailyDelta],
    ) -> Result<Vec<Insight>, InsightError> {
        let prompt = insights_prompt(decisions, deltas);
        let req = CompletionRequest::new(&self.model, prompt.system, prompt.user)
            .temperature(0.8)
            .max_tokens(1500)
            .json();
        let resp = gateway.complete(req).await?;

        let parsed: InsightsResponse = serde_json::from_str(extract_json(&resp.content))
            .map_err(|e| InsightError::Parse(e.to_string()))?;

        Ok(parsed
            .insights
            .into_iter()
            .filter(|w| !w.title.trim().is_empty())
            .map(InsightWire::into_insight)
            .collect())
    }

    /// Whole-journey analysis. Infallible, same fallback contract as
    /// [`InsightGenerator::insights`].
    pub async fn analysis(
        &self,
        decisions: &[Decision],
        deltas: &[DailyDelta],
        completed_tasks: usize,
    ) -> Analysis {
        let Some(gateway) = &self.gateway else {
            return fallback_analysis(deltas, completed_tasks);
        };
        if decisions.is_empty() {
            return fallback_analysis(deltas, completed_tasks);
        }

        match self
            .generated_analysis(gateway.as_ref(), decisions, deltas, completed_tasks)
            .await
        {
            Ok(analysis) => analysis,
            Err(err) => {
                warn!(error = %err, "analysis generation failed, using fallback");
                fallback_analysis(deltas, completed_tasks)
            }
        }
    }

    async fn generated_analysis(
        &self,
        gateway: &dyn CompletionGateway,
        decisions: &[Decision],
        deltas: &[DailyDelta],
        completed_tasks: usize,
    ) -> Result<Analysis, InsightError> {
        let prompt = analysis_prompt(decisions.len(), completed_tasks, deltas);
        let req = CompletionRequest::new(&self.model, prompt.system, prompt.user)
            .temperature(0.7)
            .max_tokens(1500)
            .json();
        let resp = gateway.complete(req).await?;

        let wire: AnalysisWire = serde_json::from_str(extract_json(&resp.content))
            .map_err(|e| InsightError::Parse(e.to_string()))?;

        Ok(Analysis {
            overall_score: wire.overall_score,
            strengths: wire.strengths,
            weaknesses: wire.weaknesses,
            recommendations: wire.recommendations,
            motivational_message: wire.motivational_message,
        })
    }
}

// =============================================================================
// FALLBACKS
// =============================================================================

/// Deterministic insights: a warning for the worst gap over 2 points, a
/// success note when ahead by more than a point anywhere, and always one
/// consistency tip.
pub fn fallback_insights(deltas: &[DailyDelta]) -> Vec<Insight> {
    let mut insights = Vec::new();

    let worst = deltas
        .iter()
        .reduce(|worst, current| if current.delta > worst.delta { current } else { worst });
    if let Some(worst) = worst {
        if worst.delta > 2.0 {
            insights.push(Insight {
                kind: InsightKind::Warning,
                title: format!("{} needs attention", capitalize(worst.dimension.as_str())),
                message: format!(
                    "Your alternate self is ahead by {:.1} points in {}. Focus on this dimension to close the gap.",
                    worst.delta, worst.dimension
                ),
                actionable: true,
                suggested_action: Some(format!(
                    "Complete sync tasks related to {}",
                    worst.dimension
                )),
            });
        }
    }

    let best = deltas
        .iter()
        .reduce(|best, current| if current.delta < best.delta { current } else { best });
    if let Some(best) = best {
        if best.delta < -1.0 {
            insights.push(Insight {
                kind: InsightKind::Success,
                title: format!("Excelling in {}!", best.dimension),
                message: format!(
                    "You're ahead of your alternate self by {:.1} points. Keep up the great work!",
                    best.delta.abs()
                ),
                actionable: false,
                suggested_action: None,
            });
        }
    }

    insights.push(Insight {
        kind: InsightKind::Tip,
        title: "Consistency is key".to_string(),
        message: "Small daily improvements compound into remarkable results over time. \
                  Focus on building sustainable habits."
            .to_string(),
        actionable: true,
        suggested_action: Some("Log at least one decision daily".to_string()),
    });

    insights
}

/// Deterministic analysis: score anchored at 70 and pulled down five points
/// per average delta point, clamped to 0..=100.
pub fn fallback_analysis(deltas: &[DailyDelta], completed_tasks: usize) -> Analysis {
    let avg_delta = if deltas.is_empty() {
        0.0
    } else {
        deltas.iter().map(|d| d.delta).sum::<f64>() / deltas.len() as f64
    };
    let score = (70.0 - avg_delta * 5.0).clamp(0.0, 100.0).round() as i32;

    Analysis {
        overall_score: score,
        strengths: deltas
            .iter()
            .filter(|d| d.delta < 0.0)
            .map(|d| format!("Strong {} performance", d.dimension))
            .collect(),
        weaknesses: deltas
            .iter()
            .filter(|d| d.delta > 2.0)
            .map(|d| format!("{} needs improvement", capitalize(d.dimension.as_str())))
            .collect(),
        recommendations: vec![
            "Focus on completing sync tasks daily".to_string(),
            "Log decisions consistently to track progress".to_string(),
            "Prioritize dimensions with the largest gaps".to_string(),
            "Celebrate small wins to maintain motivation".to_string(),
        ],
        motivational_message: if completed_tasks > 0 {
            format!(
                "You've completed {completed_tasks} sync tasks! Every step forward counts. \
                 Keep pushing toward your best self."
            )
        } else {
            "Your journey to becoming your best self starts now. Every decision matters!"
                .to_string()
        },
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dimension::Dimension;
    use crate::gateway::{CompletionResponse, FinishReason};
    use std::time::Duration;

    fn delta(dimension: Dimension, value: f64) -> DailyDelta {
        DailyDelta {
            day: "2025-06-01".to_string(),
            dimension,
            real_score: 0.0,
            alternate_score: value,
            delta: value,
        }
    }

    struct FixedGateway(String);

    #[async_trait::async_trait]
    impl CompletionGateway for FixedGateway {
        async fn complete(
            &self,
            _req: CompletionRequest,
        ) -> Result<CompletionResponse, ProviderError> {
            Ok(CompletionResponse {
                content: self.0.clone(),
                input_tokens: 5,
                output_tokens: 5,
                latency: Duration::from_millis(1),
                finish_reason: FinishReason::Stop,
            })
        }
    }

    #[test]
    fn fallback_flags_the_worst_gap() {
        let insights = fallback_insights(&[
            delta(Dimension::Health, 3.5),
            delta(Dimension::Mood, 0.5),
        ]);
        assert_eq!(insights[0].kind, InsightKind::Warning);
        assert_eq!(insights[0].title, "Health needs attention");
        assert!(insights[0].message.contains("ahead by 3.5 points in health"));
        assert_eq!(
            insights[0].suggested_action.as_deref(),
            Some("Complete sync tasks related to health")
        );
    }

    #[test]
    fn fallback_celebrates_a_lead() {
        let insights = fallback_insights(&[
            delta(Dimension::Skills, -2.3),
            delta(Dimension::Mood, 0.5),
        ]);
        let success = insights
            .iter()
            .find(|i| i.kind == InsightKind::Success)
            .expect("lead over 1 point earns a success insight");
        assert_eq!(success.title, "Excelling in skills!");
        assert!(success.message.contains("by 2.3 points"));
        assert!(!success.actionable);
    }

    #[test]
    fn fallback_always_ends_with_the_consistency_tip() {
        let empty = fallback_insights(&[]);
        assert_eq!(empty.len(), 1);
        assert_eq!(empty[0].kind, InsightKind::Tip);
        assert_eq!(empty[0].title, "Consistency is key");

        let small_gaps = fallback_insights(&[delta(Dimension::Mood, 1.0)]);
        assert_eq!(small_gaps.len(), 1);
    }

    #[test]
    fn fallback_analysis_score_math() {
        // avg delta 2.0 -> 70 - 10 = 60
        let analysis = fallback_analysis(
            &[delta(Dimension::Health, 3.0), delta(Dimension::Mood, 1.0)],
            0,
        );
        assert_eq!(analysis.overall_score, 60);
        assert_eq!(analysis.weaknesses, vec!["Health needs improvement"]);
        assert!(analysis.strengths.is_empty());
        assert_eq!(analysis.recommendations.len(), 4);
        assert!(analysis.motivational_message.contains("starts now"));
    }

    #[test]
    fn fallback_analysis_clamps_and_counts_tasks() {
        // Hugely negative average pushes the score past the cap.
        let analysis = fallback_analysis(&[delta(Dimension::Health, -20.0)], 3);
        assert_eq!(analysis.overall_score, 100);
        assert_eq!(analysis.strengths, vec!["Strong health performance"]);
        assert!(analysis.motivational_message.contains("3 sync tasks"));

        let analysis = fallback_analysis(&[delta(Dimension::Health, 50.0)], 0);
        assert_eq!(analysis.overall_score, 0);
    }

    #[test]
    fn unknown_insight_kind_becomes_info() {
        assert_eq!(InsightKind::from_str("WARNING"), InsightKind::Warning);
        assert_eq!(InsightKind::from_str("motivation"), InsightKind::Info);
        assert_eq!(InsightKind::from_str(""), InsightKind::Info);
    }

    #[tokio::test]
    async fn generated_insights_parse_and_filter() {
        let content = r#"{"insights":[
            {"type":"tip","title":"Morning focus","message":"Do hard work first.","actionable":true,"suggestedAction":"Block 9-11am"},
            {"type":"success","title":"","message":"dropped for empty title","actionable":false}
        ]}"#;
        let generator = InsightGenerator::new(Some(Arc::new(FixedGateway(content.to_string()))));
        let decisions = vec![Decision::new("misc", "Read a chapter", 3, 1)];
        let insights = generator.insights(&decisions, &[]).await;
        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].kind, InsightKind::Tip);
        assert_eq!(insights[0].suggested_action.as_deref(), Some("Block 9-11am"));
    }

    #[tokio::test]
    async fn empty_history_skips_the_gateway() {
        // Gateway would return garbage; with no decisions it must not be hit.
        let generator = InsightGenerator::new(Some(Arc::new(FixedGateway("garbage".into()))));
        let insights = generator.insights(&[], &[delta(Dimension::Mood, 3.0)]).await;
        assert!(insights.iter().any(|i| i.kind == InsightKind::Warning));
    }

    #[tokio::test]
    async fn malformed_analysis_falls_back() {
        let generator = InsightGenerator::new(Some(Arc::new(FixedGateway("not json".into()))));
        let decisions = vec![Decision::new("misc", "Read a chapter", 3, 1)];
        let analysis = generator.analysis(&decisions, &[], 2).await;
        assert_eq!(analysis.overall_score, 70);
        assert!(analysis.motivational_message.contains("2 sync tasks"));
    }

    #[tokio::test]
    async fn generated_analysis_parses() {
        let content = r#"{"overallScore":82,"strengths":["shows up daily"],"weaknesses":[],"recommendations":["keep going"],"motivationalMessage":"Nice trajectory."}"#;
        let generator = InsightGenerator::new(Some(Arc::new(FixedGateway(content.to_string()))));
        let decisions = vec![Decision::new("misc", "Read a chapter", 3, 1)];
        let analysis = generator.analysis(&decisions, &[], 0).await;
        assert_eq!(analysis.overall_score, 82);
        assert_eq!(analysis.strengths, vec!["shows up daily"]);
        assert_eq!(analysis.motivational_message, "Nice trajectory.");
    }
}
