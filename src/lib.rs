#![forbid(unsafe_code)]

//! # multiverse-engine
//!
//! Simulates the life your alternate self is living.
//!
//! Every logged decision ("Scrolled social media for 2 hours") is classified
//! against a small action policy and scored across six life dimensions. A
//! counterfactual generator then produces the better decision an alternate
//! you made in a parallel timeline: an LLM writes it when a completion
//! gateway is configured, and a deterministic antidote table stands in when
//! one isn't or when generation fails. Daily deltas between the two
//! timelines roll up into a multiverse score and a short list of sync tasks
//! for closing the gap.
//!
//! [`report::simulate_day`] runs the whole pipeline in one call.

pub mod classifier;
pub mod counterfactual;
pub mod dimension;
pub mod gateway;
pub mod impact;
pub mod insight;
pub mod planner;
pub mod policy;
pub mod prompts;
pub mod report;
pub mod simulate;
pub mod types;

pub use counterfactual::CounterfactualGenerator;
pub use dimension::{Dimension, ImpactVector};
pub use gateway::{CompletionGateway, GatewayConfig, ProviderGateway};
pub use insight::{Analysis, Insight, InsightGenerator, InsightKind};
pub use report::{simulate_day, DayReport, SimulateOptions};
pub use types::{AlternateDecision, DailyDelta, Decision, Provenance, SyncTask};
