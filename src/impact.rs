//! Impact calculator: policy base vector scaled by how big the action was and
//! how the user felt about it.

use crate::classifier::classify;
use crate::dimension::ImpactVector;
use crate::policy::base_impact;
use crate::types::Decision;

/// Intensity value that leaves the base vector unscaled.
pub const NEUTRAL_INTENSITY: f64 = 3.0;

/// Additive sentiment weight per point, applied to every touched dimension.
pub const SENTIMENT_WEIGHT: f64 = 0.5;

/// Per-dimension impact of a single real decision.
///
/// Pure: same decision fields, same vector, no matter how often or in what
/// order decisions are scored. The sentiment bonus lands only on the
/// dimensions the base vector touches, so it can flip the sign of a weak
/// entry (a loved junk-food day goes from -1 to 0 on finance) but never
/// invents a new dimension.
pub fn impact(decision: &Decision) -> ImpactVector {
    let base = base_impact(classify(&decision.action));
    let intensity_scale = decision.intensity as f64 / NEUTRAL_INTENSITY;
    let sentiment_bonus = decision.sentiment as f64 * SENTIMENT_WEIGHT;

    let mut scaled = ImpactVector::new();
    for (dim, value) in base.iter() {
        scaled.set(dim, value * intensity_scale + sentiment_bonus);
    }
    scaled
}
