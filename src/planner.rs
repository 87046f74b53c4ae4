//! Score and task planner: reduce deltas to one scalar and pick remediation
//! tasks for the worst gaps.

use chrono::{Duration, Utc};
use rand::Rng;
use uuid::Uuid;

use crate::dimension::Dimension;
use crate::types::{DailyDelta, SyncTask};

/// Default cap on tasks per planning pass.
pub const DEFAULT_MAX_TASKS: usize = 3;

/// Sum of positive deltas: total ground ceded to the alternate self.
/// Always >= 0, and 0 exactly when no dimension is behind.
pub fn multiverse_score(deltas: &[DailyDelta]) -> f64 {
    deltas.iter().map(|d| d.delta.max(0.0)).sum()
}

/// Fixed task templates per dimension. Selection is uniform within a
/// dimension; the titles are product copy and tests treat membership, not
/// position, as the contract.
pub fn task_templates(dim: Dimension) -> &'static [&'static str] {
    match dim {
        Dimension::Health => &[
            "30-minute workout session",
            "Prepare a healthy meal",
            "Get 8 hours of sleep tonight",
            "10-minute meditation",
        ],
        Dimension::Skills => &[
            "Complete one online course module",
            "Read 20 pages of a skill-building book",
            "Practice coding for 1 hour",
            "Watch an educational video",
        ],
        Dimension::Discipline => &[
            "Wake up at your target time",
            "Complete your morning routine",
            "Finish one important task before lunch",
            "Avoid phone for 2 hours",
        ],
        Dimension::Social => &[
            "Call a friend or family member",
            "Attend a social event",
            "Send 3 meaningful messages",
            "Join a community activity",
        ],
        Dimension::Finance => &[
            "Review and update your budget",
            "Save $50 today",
            "Cancel one unnecessary subscription",
            "Research one investment opportunity",
        ],
        Dimension::Mood => &[
            "Practice gratitude journaling",
            "Spend 30 minutes on a hobby",
            "Take a walk in nature",
            "Listen to uplifting music",
        ],
    }
}

/// Plan up to `max_tasks` sync tasks from the largest positive deltas.
///
/// Template choice is randomized per call; use [`plan_tasks_with_rng`] when
/// reproducibility matters.
pub fn plan_tasks(deltas: &[DailyDelta], max_tasks: usize) -> Vec<SyncTask> {
    plan_tasks_with_rng(deltas, max_tasks, &mut rand::thread_rng())
}

/// [`plan_tasks`] with an injected random source.
pub fn plan_tasks_with_rng<R: Rng + ?Sized>(
    deltas: &[DailyDelta],
    max_tasks: usize,
    rng: &mut R,
) -> Vec<SyncTask> {
    let mut behind: Vec<&DailyDelta> = deltas.iter().filter(|d| d.delta > 0.0).collect();
    // Stable sort keeps natural key order on equal deltas.
    behind.sort_by(|a, b| {
        b.delta
            .partial_cmp(&a.delta)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let now = Utc::now();
    behind
        .into_iter()
        .take(max_tasks)
        .map(|delta| {
            let templates = task_templates(delta.dimension);
            let title = templates[rng.gen_range(0..templates.len())];
            SyncTask {
                id: Uuid::new_v4(),
                title: title.to_string(),
                dimension: delta.dimension,
                effort: effort_for(delta.delta),
                due_at: Some(now + Duration::hours(24)),
                completed_at: None,
                created_at: now,
            }
        })
        .collect()
}

/// Effort estimate from gap size, clamped to the 1..=5 scale.
fn effort_for(delta: f64) -> i32 {
    ((delta.abs() / 2.0).ceil() as i32).min(5)
}
