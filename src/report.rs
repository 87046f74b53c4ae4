//! One-shot daily pipeline: decisions in, full report out.
//!
//! Stitches the counterfactual generator, the delta simulation, the
//! multiverse score, and the task planner into a single call so callers
//! (the CLI, mostly) never have to sequence the stages themselves.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::counterfactual::CounterfactualGenerator;
use crate::planner::{multiverse_score, plan_tasks, DEFAULT_MAX_TASKS};
use crate::simulate::simulate_daily_deltas;
use crate::types::{AlternateDecision, DailyDelta, Decision, SyncTask};

/// Knobs for a day run.
#[derive(Debug, Clone)]
pub struct SimulateOptions {
    /// Cap on planned sync tasks.
    pub max_tasks: usize,
    /// In-flight limit for alternate generation.
    pub concurrency: usize,
}

impl Default for SimulateOptions {
    fn default() -> Self {
        Self {
            max_tasks: DEFAULT_MAX_TASKS,
            concurrency: 4,
        }
    }
}

/// Everything the engine produces for one day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayReport {
    pub day: String,
    pub deltas: Vec<DailyDelta>,
    pub multiverse_score: f64,
    pub tasks: Vec<SyncTask>,
    pub alternates: Vec<AlternateDecision>,
}

/// Runs the full pipeline for one day of decisions.
pub async fn simulate_day(
    generator: &CounterfactualGenerator,
    decisions: &[Decision],
    day: &str,
    opts: &SimulateOptions,
) -> DayReport {
    let alternates = generator.generate_batch(decisions, opts.concurrency).await;
    let deltas = simulate_daily_deltas(decisions, &alternates, day);
    let score = multiverse_score(&deltas);
    let tasks = plan_tasks(&deltas, opts.max_tasks);
    debug!(
        day,
        decisions = decisions.len(),
        score,
        tasks = tasks.len(),
        "day simulated"
    );

    DayReport {
        day: day.to_string(),
        deltas,
        multiverse_score: score,
        tasks,
        alternates,
    }
}
