//! The closed set of life dimensions and the partial impact vectors keyed by them.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

// =============================================================================
// DIMENSION
// =============================================================================

/// One of the six fixed life-quality axes the engine tracks.
///
/// The declaration order is the "natural key order" used everywhere a
/// deterministic dimension ordering is needed (accumulator output, worst-first
/// tie-breaking). No other axis may appear in any vector, delta, or task.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Health,
    Skills,
    Discipline,
    Social,
    Finance,
    Mood,
}

impl Dimension {
    /// All six dimensions in natural key order.
    pub const ALL: [Dimension; 6] = [
        Dimension::Health,
        Dimension::Skills,
        Dimension::Discipline,
        Dimension::Social,
        Dimension::Finance,
        Dimension::Mood,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Dimension::Health => "health",
            Dimension::Skills => "skills",
            Dimension::Discipline => "discipline",
            Dimension::Social => "social",
            Dimension::Finance => "finance",
            Dimension::Mood => "mood",
        }
    }

    /// Parse a dimension name, case-insensitively.
    ///
    /// Returns `None` for anything outside the closed set; callers drop such
    /// entries rather than erroring (generated payloads may name axes we do
    /// not track).
    pub fn parse(s: &str) -> Option<Dimension> {
        match s.trim().to_lowercase().as_str() {
            "health" => Some(Dimension::Health),
            "skills" => Some(Dimension::Skills),
            "discipline" => Some(Dimension::Discipline),
            "social" => Some(Dimension::Social),
            "finance" => Some(Dimension::Finance),
            "mood" => Some(Dimension::Mood),
            _ => None,
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// IMPACT VECTOR
// =============================================================================

/// Partial mapping from [`Dimension`] to a signed magnitude.
///
/// Dimensions that are absent read as zero. Backed by a `BTreeMap` so that
/// iteration always yields entries in natural key order, which makes every
/// downstream fold and tie-break deterministic. Computed on demand; the
/// engine never persists one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImpactVector(BTreeMap<Dimension, f64>);

impl ImpactVector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value for a dimension; absent entries are zero.
    pub fn get(&self, dim: Dimension) -> f64 {
        self.0.get(&dim).copied().unwrap_or(0.0)
    }

    pub fn set(&mut self, dim: Dimension, value: f64) {
        self.0.insert(dim, value);
    }

    /// Accumulate `delta` onto a dimension, creating the entry if absent.
    pub fn add(&mut self, dim: Dimension, delta: f64) {
        *self.0.entry(dim).or_insert(0.0) += delta;
    }

    /// Accumulate every entry of `other`, scaled by `factor`.
    pub fn add_scaled(&mut self, other: &ImpactVector, factor: f64) {
        for (dim, value) in other.iter() {
            self.add(dim, value * factor);
        }
    }

    /// Present entries in natural key order.
    pub fn iter(&self) -> impl Iterator<Item = (Dimension, f64)> + '_ {
        self.0.iter().map(|(d, v)| (*d, *v))
    }

    /// Whether the dimension has an explicit entry (even a zero one).
    pub fn touches(&self, dim: Dimension) -> bool {
        self.0.contains_key(&dim)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl<const N: usize> From<[(Dimension, f64); N]> for ImpactVector {
    fn from(entries: [(Dimension, f64); N]) -> Self {
        Self(BTreeMap::from(entries))
    }
}

impl FromIterator<(Dimension, f64)> for ImpactVector {
    fn from_iter<I: IntoIterator<Item = (Dimension, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
