#![forbid(unsafe_code)]

use std::path::PathBuf;
use std::sync::Arc;

use chrono::Utc;
use clap::{Parser, Subcommand};

use multiverse_engine::classifier::classify;
use multiverse_engine::gateway::{CompletionGateway, ProviderGateway};
use multiverse_engine::impact::impact;
use multiverse_engine::planner::{self, DEFAULT_MAX_TASKS};
use multiverse_engine::report::{simulate_day, DayReport, SimulateOptions};
use multiverse_engine::types::{DailyDelta, Decision};
use multiverse_engine::{CounterfactualGenerator, InsightGenerator};

#[derive(Parser)]
#[command(name = "multiverse", version, about = "Decision-impact simulation CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate one day: generate alternates, compute deltas, plan sync tasks
    Simulate {
        /// Path to a JSON array of decisions
        #[arg(long)]
        input: PathBuf,

        /// Day label, YYYY-MM-DD (default: today, UTC)
        #[arg(long)]
        day: Option<String>,

        /// Generate alternates via the configured LLM gateway (requires GROQ_API_KEY)
        #[arg(long)]
        live: bool,

        /// Model for live generation
        #[arg(long)]
        model: Option<String>,

        #[arg(long, default_value_t = DEFAULT_MAX_TASKS)]
        max_tasks: usize,

        /// In-flight limit for live generation
        #[arg(long, default_value_t = 4)]
        concurrency: usize,

        /// Output JSON path (default: stdout)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Classify one decision text and show its impact vector
    Classify {
        text: String,

        #[arg(long, default_value_t = 3)]
        intensity: i32,

        #[arg(long, default_value_t = 0)]
        sentiment: i32,
    },
    /// Plan sync tasks from a JSON array of daily deltas
    Tasks {
        #[arg(long)]
        input: PathBuf,

        #[arg(long, default_value_t = DEFAULT_MAX_TASKS)]
        max_tasks: usize,

        /// Output JSON path (default: stdout)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Generate coaching insights from decisions and a day report
    Insights {
        /// Path to a JSON array of decisions
        #[arg(long)]
        decisions: PathBuf,

        /// Path to a day report produced by `simulate`
        #[arg(long)]
        report: PathBuf,

        /// Use the configured LLM gateway (requires GROQ_API_KEY)
        #[arg(long)]
        live: bool,

        #[arg(long)]
        model: Option<String>,

        /// Output JSON path (default: stdout)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Generate a whole-journey analysis from decisions and a day report
    Analysis {
        /// Path to a JSON array of decisions
        #[arg(long)]
        decisions: PathBuf,

        /// Path to a day report produced by `simulate`
        #[arg(long)]
        report: PathBuf,

        /// Number of completed sync tasks to credit
        #[arg(long, default_value_t = 0)]
        completed_tasks: usize,

        /// Use the configured LLM gateway (requires GROQ_API_KEY)
        #[arg(long)]
        live: bool,

        #[arg(long)]
        model: Option<String>,

        /// Output JSON path (default: stdout)
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Simulate {
            input,
            day,
            live,
            model,
            max_tasks,
            concurrency,
            out,
        } => {
            let decisions: Vec<Decision> = read_json(&input)?;
            let day = day.unwrap_or_else(|| Utc::now().format("%Y-%m-%d").to_string());

            let mut generator = CounterfactualGenerator::new(build_gateway(live)?);
            if let Some(model) = model {
                generator = generator.with_model(model);
            }

            let opts = SimulateOptions {
                max_tasks,
                concurrency,
            };
            let report = simulate_day(&generator, &decisions, &day, &opts).await;
            emit(&report, out.as_ref())?;
        }
        Commands::Classify {
            text,
            intensity,
            sentiment,
        } => {
            if !(1..=5).contains(&intensity) {
                return Err("--intensity must be in 1..=5".into());
            }
            if !(-2..=2).contains(&sentiment) {
                return Err("--sentiment must be in -2..=2".into());
            }
            let decision = Decision::new("cli", text, intensity, sentiment);
            let key = classify(&decision.action);
            let vector = impact(&decision);

            println!("action: {}", key.as_str());
            if vector.is_empty() {
                println!("impact: none");
            } else {
                println!("impact:");
                for (dimension, value) in vector.iter() {
                    println!("  {dimension}: {value:+.1}");
                }
            }
        }
        Commands::Tasks {
            input,
            max_tasks,
            out,
        } => {
            let deltas: Vec<DailyDelta> = read_json(&input)?;
            let tasks = planner::plan_tasks(&deltas, max_tasks);
            emit(&tasks, out.as_ref())?;
        }
        Commands::Insights {
            decisions,
            report,
            live,
            model,
            out,
        } => {
            let decisions: Vec<Decision> = read_json(&decisions)?;
            let report: DayReport = read_json(&report)?;

            let mut generator = InsightGenerator::new(build_gateway(live)?);
            if let Some(model) = model {
                generator = generator.with_model(model);
            }

            let insights = generator.insights(&decisions, &report.deltas).await;
            emit(&insights, out.as_ref())?;
        }
        Commands::Analysis {
            decisions,
            report,
            completed_tasks,
            live,
            model,
            out,
        } => {
            let decisions: Vec<Decision> = read_json(&decisions)?;
            let report: DayReport = read_json(&report)?;

            let mut generator = InsightGenerator::new(build_gateway(live)?);
            if let Some(model) = model {
                generator = generator.with_model(model);
            }

            let analysis = generator
                .analysis(&decisions, &report.deltas, completed_tasks)
                .await;
            emit(&analysis, out.as_ref())?;
        }
    }

    Ok(())
}

fn build_gateway(
    live: bool,
) -> Result<Option<Arc<dyn CompletionGateway>>, Box<dyn std::error::Error>> {
    if live {
        let gateway = ProviderGateway::from_env()?;
        Ok(Some(Arc::new(gateway)))
    } else {
        Ok(None)
    }
}

fn read_json<T: serde::de::DeserializeOwned>(
    path: &PathBuf,
) -> Result<T, Box<dyn std::error::Error>> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

fn emit<T: serde::Serialize>(
    value: &T,
    out: Option<&PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let json = serde_json::to_string_pretty(value)?;
    match out {
        Some(path) => {
            std::fs::write(path, json)?;
            eprintln!("[multiverse] written to {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}
