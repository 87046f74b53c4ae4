//! Delta simulator: aggregate real vs alternate impacts into per-dimension
//! gaps for one day.

use tracing::debug;

use crate::classifier::classify;
use crate::dimension::{Dimension, ImpactVector};
use crate::impact::impact;
use crate::policy::base_impact;
use crate::types::{AlternateDecision, DailyDelta, Decision, Provenance};

/// Multiplier on generated-path alternate impacts. The generated payload
/// already carries plausibility-weighted magnitudes, so the bonus is small.
pub const GENERATED_BONUS: f64 = 1.1;

/// Multiplier on rule-based alternate impacts. Larger than the generated
/// bonus: the rule path re-enters the policy table with no intensity or
/// sentiment input, so it over-rewards to compensate.
pub const RULE_BASED_BONUS: f64 = 1.2;

/// Round to one decimal place.
pub(crate) fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

/// Impact vector contributed by one alternate, bonus included.
///
/// Generated alternates are scored from their retained payload, dropping
/// entries naming dimensions outside the closed set. Rule-based alternates
/// re-enter the classifier with their action text.
fn alternate_impact(alt: &AlternateDecision) -> ImpactVector {
    match alt.provenance {
        Provenance::Generated => {
            let mut v = ImpactVector::new();
            if let Some(payload) = &alt.payload {
                for entry in &payload.expected_impact {
                    match Dimension::parse(&entry.dimension) {
                        Some(dim) => v.add(dim, entry.change * GENERATED_BONUS),
                        None => debug!(
                            dimension = %entry.dimension,
                            "dropping unknown dimension from generated payload"
                        ),
                    }
                }
            }
            v
        }
        Provenance::RuleBased => {
            let mut v = ImpactVector::new();
            v.add_scaled(&base_impact(classify(&alt.alt_action)), RULE_BASED_BONUS);
            v
        }
    }
}

/// Aggregate one day of decisions and their alternates into six
/// [`DailyDelta`] records, one per dimension, in natural key order.
///
/// Accumulation is associative and commutative, so input order never changes
/// the result. Rounding to one decimal happens once per output field, on the
/// raw accumulator values; intermediate sums stay unrounded.
pub fn simulate_daily_deltas(
    real_decisions: &[Decision],
    alternates: &[AlternateDecision],
    day: &str,
) -> Vec<DailyDelta> {
    let mut real = ImpactVector::new();
    for decision in real_decisions {
        real.add_scaled(&impact(decision), 1.0);
    }

    let mut alternate = ImpactVector::new();
    for alt in alternates {
        alternate.add_scaled(&alternate_impact(alt), 1.0);
    }

    Dimension::ALL
        .into_iter()
        .map(|dim| {
            let real_raw = real.get(dim);
            let alt_raw = alternate.get(dim);
            DailyDelta {
                day: day.to_string(),
                dimension: dim,
                real_score: round1(real_raw),
                alternate_score: round1(alt_raw),
                delta: round1(alt_raw - real_raw),
            }
        })
        .collect()
}
