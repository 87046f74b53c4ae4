//! Minimal end-to-end example for `multiverse-engine`.
//!
//! This scores one day of real decisions against the alternate self and
//! prints the per-dimension gaps, the multiverse score, and the sync tasks
//! that would close the worst gaps.
//!
//! To run:
//! - `cargo run --example quickstart` (offline, rule-based alternates)
//! - Set `GROQ_API_KEY` first to let a model draft the alternates instead.

use std::sync::Arc;

use multiverse_engine::{
    simulate_day, CompletionGateway, CounterfactualGenerator, Decision, Provenance,
    ProviderGateway, SimulateOptions,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // -- Infrastructure setup ------------------------------------------------

    // Groq gateway when a key is present; without one the generator runs fully
    // offline and every alternate comes from the rule table.
    let gateway: Option<Arc<dyn CompletionGateway>> = match std::env::var("GROQ_API_KEY") {
        Ok(_) => Some(Arc::new(ProviderGateway::from_env()?)),
        Err(_) => None,
    };
    let generator = CounterfactualGenerator::new(gateway);

    // -- The day being simulated ---------------------------------------------

    let decisions = vec![
        Decision::new("lifestyle", "Scrolled social media for 2 hours", 4, -1),
        Decision::new("health", "Went to the gym", 3, 1),
        Decision::new("food", "Ordered pizza", 2, 0),
    ];

    // -- Run it --------------------------------------------------------------

    let report = simulate_day(
        &generator,
        &decisions,
        "2025-06-01",
        &SimulateOptions::default(),
    )
    .await;

    // -- Interpret results ---------------------------------------------------

    let generated = report
        .alternates
        .iter()
        .filter(|a| a.provenance == Provenance::Generated)
        .count();
    println!(
        "alternates: {} generated, {} rule-based",
        generated,
        report.alternates.len() - generated
    );
    println!();

    for delta in &report.deltas {
        println!(
            "  {:<10} you {:>5.1} | alternate {:>5.1} | gap {:>5.1}",
            delta.dimension.as_str(),
            delta.real_score,
            delta.alternate_score,
            delta.delta
        );
    }
    println!();
    println!("multiverse score: {:.1}", report.multiverse_score);

    for task in &report.tasks {
        println!(
            "  task: {} ({}, effort {})",
            task.title, task.dimension, task.effort
        );
    }

    Ok(())
}
