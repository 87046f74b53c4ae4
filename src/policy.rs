//! Static policy table: the canonical action vocabulary, the per-dimension
//! base impact of each action, and the antidote pairing used when proposing a
//! corrective alternate for a harmful habit.

use serde::{Deserialize, Serialize};

use crate::dimension::{Dimension, ImpactVector};

// =============================================================================
// ACTION KEYS
// =============================================================================

/// Canonical key for a recognized action archetype.
///
/// Ten positive habits, eight negative ones, plus [`ActionKey::Neutral`] for
/// free text the classifier cannot place. The table is data, not behavior:
/// changing a weight here retunes the whole engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKey {
    // Positive habits.
    Workout,
    Study,
    SleepExtra,
    Meditate,
    SocialEvent,
    SaveMoney,
    ReadBook,
    CookHealthy,
    Network,
    SideProject,
    // Negative habits.
    ScrollPhone,
    SkipWorkout,
    JunkFood,
    Oversleep,
    ImpulseBuy,
    Procrastinate,
    SkipSocial,
    StayUpLate,
    // Unrecognized.
    Neutral,
}

impl ActionKey {
    /// Every key in the vocabulary, positives first.
    pub const ALL: [ActionKey; 19] = [
        ActionKey::Workout,
        ActionKey::Study,
        ActionKey::SleepExtra,
        ActionKey::Meditate,
        ActionKey::SocialEvent,
        ActionKey::SaveMoney,
        ActionKey::ReadBook,
        ActionKey::CookHealthy,
        ActionKey::Network,
        ActionKey::SideProject,
        ActionKey::ScrollPhone,
        ActionKey::SkipWorkout,
        ActionKey::JunkFood,
        ActionKey::Oversleep,
        ActionKey::ImpulseBuy,
        ActionKey::Procrastinate,
        ActionKey::SkipSocial,
        ActionKey::StayUpLate,
        ActionKey::Neutral,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKey::Workout => "workout",
            ActionKey::Study => "study",
            ActionKey::SleepExtra => "sleep_extra",
            ActionKey::Meditate => "meditate",
            ActionKey::SocialEvent => "social_event",
            ActionKey::SaveMoney => "save_money",
            ActionKey::ReadBook => "read_book",
            ActionKey::CookHealthy => "cook_healthy",
            ActionKey::Network => "network",
            ActionKey::SideProject => "side_project",
            ActionKey::ScrollPhone => "scroll_phone",
            ActionKey::SkipWorkout => "skip_workout",
            ActionKey::JunkFood => "junk_food",
            ActionKey::Oversleep => "oversleep",
            ActionKey::ImpulseBuy => "impulse_buy",
            ActionKey::Procrastinate => "procrastinate",
            ActionKey::SkipSocial => "skip_social",
            ActionKey::StayUpLate => "stay_up_late",
            ActionKey::Neutral => "neutral",
        }
    }

    /// Human-readable form of the key: underscores become spaces.
    ///
    /// Used verbatim as the alternate action text in rule-based
    /// counterfactuals ("read book", "social event").
    pub fn label(&self) -> String {
        self.as_str().replace('_', " ")
    }

    /// Whether the base impact carries any negative entry.
    pub fn is_negative(&self) -> bool {
        base_impact(*self).iter().any(|(_, v)| v < 0.0)
    }

    /// The corrective counterpart prescribed for a harmful habit.
    ///
    /// Only meaningful for negative keys; anything without an explicit
    /// pairing falls back to [`ActionKey::Workout`].
    pub fn antidote(&self) -> ActionKey {
        match self {
            ActionKey::ScrollPhone => ActionKey::ReadBook,
            ActionKey::SkipWorkout => ActionKey::Workout,
            ActionKey::JunkFood => ActionKey::CookHealthy,
            ActionKey::Oversleep => ActionKey::SleepExtra,
            ActionKey::ImpulseBuy => ActionKey::SaveMoney,
            ActionKey::Procrastinate => ActionKey::Study,
            ActionKey::SkipSocial => ActionKey::SocialEvent,
            ActionKey::StayUpLate => ActionKey::Meditate,
            _ => ActionKey::Workout,
        }
    }
}

// =============================================================================
// BASE IMPACT TABLE
// =============================================================================

/// Per-dimension base impact of an action key, before any intensity or
/// sentiment scaling. Dimensions an action does not touch are simply absent.
pub fn base_impact(key: ActionKey) -> ImpactVector {
    use Dimension::*;
    match key {
        ActionKey::Workout => {
            ImpactVector::from([(Health, 3.0), (Discipline, 2.0), (Mood, 1.0)])
        }
        ActionKey::Study => {
            ImpactVector::from([(Skills, 4.0), (Discipline, 1.0), (Mood, 1.0)])
        }
        ActionKey::SleepExtra => {
            ImpactVector::from([(Health, 2.0), (Mood, 1.0), (Skills, 1.0)])
        }
        ActionKey::Meditate => {
            ImpactVector::from([(Mood, 3.0), (Discipline, 2.0), (Health, 1.0)])
        }
        ActionKey::SocialEvent => ImpactVector::from([(Social, 3.0), (Mood, 2.0)]),
        ActionKey::SaveMoney => ImpactVector::from([(Finance, 2.0), (Discipline, 1.0)]),
        ActionKey::ReadBook => ImpactVector::from([(Skills, 3.0), (Mood, 1.0)]),
        ActionKey::CookHealthy => {
            ImpactVector::from([(Health, 2.0), (Finance, 1.0), (Discipline, 1.0)])
        }
        ActionKey::Network => ImpactVector::from([(Social, 2.0), (Skills, 1.0)]),
        ActionKey::SideProject => {
            ImpactVector::from([(Skills, 3.0), (Finance, 1.0), (Discipline, 2.0)])
        }
        ActionKey::ScrollPhone => {
            ImpactVector::from([(Discipline, -2.0), (Mood, -1.0), (Skills, -1.0)])
        }
        ActionKey::SkipWorkout => {
            ImpactVector::from([(Health, -2.0), (Discipline, -1.0)])
        }
        ActionKey::JunkFood => ImpactVector::from([(Health, -2.0), (Finance, -1.0)]),
        ActionKey::Oversleep => ImpactVector::from([(Discipline, -2.0), (Mood, -1.0)]),
        ActionKey::ImpulseBuy => ImpactVector::from([(Finance, -3.0), (Discipline, -1.0)]),
        ActionKey::Procrastinate => {
            ImpactVector::from([(Discipline, -3.0), (Skills, -1.0), (Mood, -1.0)])
        }
        ActionKey::SkipSocial => ImpactVector::from([(Social, -2.0), (Mood, -1.0)]),
        ActionKey::StayUpLate => {
            ImpactVector::from([(Health, -2.0), (Mood, -1.0), (Discipline, -1.0)])
        }
        ActionKey::Neutral => ImpactVector::new(),
    }
}
