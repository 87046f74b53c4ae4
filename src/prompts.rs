//! Prompt templates for the generative paths.
//!
//! Domain logic for rendering coaching prompts. Provider-agnostic; the
//! gateway decides how the rendered pair reaches the model.

use serde_json::json;

use crate::types::{DailyDelta, Decision};

/// Rendered prompt ready for the completion gateway.
#[derive(Debug, Clone)]
pub struct PromptInstance {
    pub system: String,
    pub user: String,
}

// =============================================================================
// COUNTERFACTUAL
// =============================================================================

pub const COUNTERFACTUAL_SYSTEM: &str = "You are an expert life coach and decision analyst. \
     Provide practical, actionable advice in JSON format only.";

const COUNTERFACTUAL_FORMAT: &str = r#"
Generate an alternate, better decision they could have made instead. Consider:
- Health, Skills, Discipline, Social, Finance, and Mood dimensions
- Realistic and actionable alternatives
- Positive long-term impact

Respond in JSON format:
{
  "action": "specific alternate action",
  "rationale": "why this is better",
  "expectedImpact": [
    {"dimension": "health", "change": 2, "explanation": "brief explanation"},
    {"dimension": "skills", "change": 3, "explanation": "brief explanation"}
  ],
  "difficulty": 3,
  "timeframe": "30 minutes"
}"#;

/// Prompt asking the model for a better alternate to one decision.
pub fn counterfactual_prompt(decision: &Decision) -> PromptInstance {
    let mut user = format!(
        "You are an AI life coach analyzing decisions. A person made this decision:\n\n\
         Action: {}\n\
         Category: {}\n\
         Intensity (1-5): {}\n\
         Sentiment (-2 to +2): {}\n",
        decision.action, decision.category, decision.intensity, decision.sentiment
    );
    if let Some(context) = &decision.context {
        user.push_str(&format!("Context: {context}\n"));
    }
    user.push_str(COUNTERFACTUAL_FORMAT);

    PromptInstance {
        system: COUNTERFACTUAL_SYSTEM.to_string(),
        user,
    }
}

// =============================================================================
// INSIGHTS
// =============================================================================

pub const INSIGHTS_SYSTEM: &str = "You are a supportive life coach providing personalized \
     insights. Be encouraging but realistic.";

/// Prompt asking the model for coaching insights over recent history.
///
/// Only the last five decisions are included; older history adds tokens
/// without changing the advice.
pub fn insights_prompt(decisions: &[Decision], deltas: &[DailyDelta]) -> PromptInstance {
    let recent: Vec<serde_json::Value> = decisions
        .iter()
        .skip(decisions.len().saturating_sub(5))
        .map(|d| {
            json!({
                "action": d.action,
                "category": d.category,
                "intensity": d.intensity,
            })
        })
        .collect();
    let gaps: Vec<serde_json::Value> = deltas
        .iter()
        .map(|d| json!({"dimension": d.dimension, "gap": d.delta}))
        .collect();

    let user = format!(
        r#"Analyze these recent decisions and performance gaps:

Recent Decisions: {}
Performance Gaps: {}

Generate 3-4 personalized insights as a life coach. Each insight should be:
- Specific and actionable
- Encouraging but honest
- Focused on improvement

Respond in JSON format:
{{
  "insights": [
    {{
      "type": "warning|success|info|tip",
      "title": "short title",
      "message": "detailed message",
      "actionable": true,
      "suggestedAction": "specific action to take"
    }}
  ]
}}"#,
        json!(recent),
        json!(gaps)
    );

    PromptInstance {
        system: INSIGHTS_SYSTEM.to_string(),
        user,
    }
}

// =============================================================================
// ANALYSIS
// =============================================================================

pub const ANALYSIS_SYSTEM: &str = "You are an expert life coach providing comprehensive \
     analysis. Be specific, actionable, and motivating.";

/// Prompt asking the model for a whole-journey analysis.
pub fn analysis_prompt(
    total_decisions: usize,
    completed_tasks: usize,
    deltas: &[DailyDelta],
) -> PromptInstance {
    let gaps: Vec<serde_json::Value> = deltas
        .iter()
        .map(|d| {
            json!({
                "dimension": d.dimension,
                "yourScore": d.real_score,
                "alternateScore": d.alternate_score,
                "gap": d.delta,
            })
        })
        .collect();

    let user = format!(
        r#"Provide a comprehensive life analysis based on:

Total Decisions: {total_decisions}
Completed Sync Tasks: {completed_tasks}
Performance Gaps: {}

Generate a motivational analysis in JSON format:
{{
  "overallScore": 75,
  "strengths": ["list of 2-3 strengths"],
  "weaknesses": ["list of 2-3 areas to improve"],
  "recommendations": ["list of 3-4 specific recommendations"],
  "motivationalMessage": "encouraging message about their journey"
}}"#,
        json!(gaps)
    );

    PromptInstance {
        system: ANALYSIS_SYSTEM.to_string(),
        user,
    }
}

// =============================================================================
// TESTS
// =============================================================================
