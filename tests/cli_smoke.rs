use std::process::Command;

use multiverse_engine::dimension::Dimension;
use multiverse_engine::insight::{Analysis, Insight, InsightKind};
use multiverse_engine::report::DayReport;
use multiverse_engine::types::{DailyDelta, Decision, Provenance, SyncTask};
use tempfile::tempdir;

fn bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_multiverse"))
}

fn write_decisions(path: &std::path::Path, decisions: &[Decision]) {
    std::fs::write(path, serde_json::to_string_pretty(decisions).unwrap()).unwrap();
}

#[test]
fn cli_simulate_offline_writes_a_full_report() {
    let dir = tempdir().unwrap();
    let input_path = dir.path().join("decisions.json");
    let out_path = dir.path().join("report.json");

    write_decisions(
        &input_path,
        &[
            Decision::new("leisure", "Scrolled social media for 2 hours", 3, 0),
            Decision::new("learning", "Studied Rust for an hour", 3, 1),
        ],
    );

    let status = bin()
        .args(["simulate", "--day", "2025-06-01"])
        .arg("--input")
        .arg(&input_path)
        .arg("--out")
        .arg(&out_path)
        .status()
        .unwrap();
    assert!(status.success());

    let raw = std::fs::read_to_string(&out_path).unwrap();
    let report: DayReport = serde_json::from_str(&raw).unwrap();

    assert_eq!(report.day, "2025-06-01");
    assert_eq!(report.deltas.len(), 6);
    assert_eq!(report.alternates.len(), 2);
    assert!(report
        .alternates
        .iter()
        .all(|a| a.provenance == Provenance::RuleBased));
    assert!(report.multiverse_score >= 0.0);
    assert!(report.tasks.len() <= 3);
}

#[test]
fn cli_simulate_accepts_hand_written_decisions_on_stdout() {
    let dir = tempdir().unwrap();
    let input_path = dir.path().join("decisions.json");

    // No ids or timestamps; the engine fills those in.
    let raw = serde_json::json!([
        { "category": "health", "action": "Skipped my workout", "intensity": 4, "sentiment": -1 }
    ]);
    std::fs::write(&input_path, serde_json::to_string_pretty(&raw).unwrap()).unwrap();

    let output = bin()
        .args(["simulate", "--day", "2025-06-02"])
        .arg("--input")
        .arg(&input_path)
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: DayReport = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report.day, "2025-06-02");
    assert_eq!(report.alternates[0].alt_action, "workout");
}

#[test]
fn cli_classify_prints_action_and_impact() {
    let output = bin()
        .args(["classify", "Scrolled social media for 2 hours"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("action: scroll_phone"));
    assert!(stdout.contains("discipline: -2.0"));
    assert!(stdout.contains("mood: -1.0"));
}

#[test]
fn cli_classify_rejects_out_of_range_intensity() {
    let output = bin()
        .args(["classify", "whatever", "--intensity", "9"])
        .output()
        .unwrap();
    assert!(!output.status.success());
}

#[test]
fn cli_tasks_plans_from_deltas() {
    let dir = tempdir().unwrap();
    let input_path = dir.path().join("deltas.json");
    let out_path = dir.path().join("tasks.json");

    let deltas = vec![
        DailyDelta {
            day: "2025-06-01".into(),
            dimension: Dimension::Discipline,
            real_score: -2.0,
            alternate_score: 2.2,
            delta: 4.2,
        },
        DailyDelta {
            day: "2025-06-01".into(),
            dimension: Dimension::Mood,
            real_score: -1.0,
            alternate_score: 1.5,
            delta: 2.5,
        },
        DailyDelta {
            day: "2025-06-01".into(),
            dimension: Dimension::Health,
            real_score: 1.0,
            alternate_score: 0.0,
            delta: -1.0,
        },
    ];
    std::fs::write(&input_path, serde_json::to_string_pretty(&deltas).unwrap()).unwrap();

    let status = bin()
        .args(["tasks", "--max-tasks", "2"])
        .arg("--input")
        .arg(&input_path)
        .arg("--out")
        .arg(&out_path)
        .status()
        .unwrap();
    assert!(status.success());

    let raw = std::fs::read_to_string(&out_path).unwrap();
    let tasks: Vec<SyncTask> = serde_json::from_str(&raw).unwrap();

    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0].dimension, Dimension::Discipline);
    assert_eq!(tasks[0].effort, 3);
    assert_eq!(tasks[1].dimension, Dimension::Mood);
    assert_eq!(tasks[1].effort, 2);
}

#[test]
fn cli_insights_and_analysis_offline() {
    let dir = tempdir().unwrap();
    let decisions_path = dir.path().join("decisions.json");
    let report_path = dir.path().join("report.json");

    write_decisions(
        &decisions_path,
        &[Decision::new(
            "leisure",
            "Scrolled social media for 2 hours",
            3,
            0,
        )],
    );

    let status = bin()
        .args(["simulate", "--day", "2025-06-01"])
        .arg("--input")
        .arg(&decisions_path)
        .arg("--out")
        .arg(&report_path)
        .status()
        .unwrap();
    assert!(status.success());

    let output = bin()
        .arg("insights")
        .arg("--decisions")
        .arg(&decisions_path)
        .arg("--report")
        .arg(&report_path)
        .output()
        .unwrap();
    assert!(output.status.success());

    let insights: Vec<Insight> = serde_json::from_slice(&output.stdout).unwrap();
    // Scroll day leaves skills as the worst gap; the tip always closes the list.
    assert_eq!(insights[0].kind, InsightKind::Warning);
    assert_eq!(insights[0].title, "Skills needs attention");
    assert_eq!(insights.last().unwrap().title, "Consistency is key");

    let output = bin()
        .args(["analysis", "--completed-tasks", "2"])
        .arg("--decisions")
        .arg(&decisions_path)
        .arg("--report")
        .arg(&report_path)
        .output()
        .unwrap();
    assert!(output.status.success());

    let analysis: Analysis = serde_json::from_slice(&output.stdout).unwrap();
    // Deltas 2.0 + 4.6 + 2.2 over six dimensions: 70 - (8.8/6)*5 rounds to 63.
    assert_eq!(analysis.overall_score, 63);
    assert!(analysis.motivational_message.contains("2 sync tasks"));
}
