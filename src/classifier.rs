//! Keyword classifier mapping free-text action descriptions onto the policy
//! vocabulary.
//!
//! Rules are an ordered list evaluated top to bottom; the first hit wins.
//! Several keyword sets overlap ("scroll social media" vs "social event",
//! "procrastinated on my project" vs "side project"), so rule order is part
//! of the observable behavior and reordering entries here is a semantic
//! change, not a cleanup.

use crate::policy::ActionKey;

// =============================================================================
// RULES
// =============================================================================

/// A single classification rule. Matching is case-insensitive substring
/// containment over the full description.
enum Rule {
    /// Any keyword present selects the key.
    Any(&'static [&'static str], ActionKey),
    /// Any keyword present selects the positive key, unless the text also
    /// mentions skipping, which flips to the negative variant.
    SkipAware(&'static [&'static str], ActionKey, ActionKey),
    /// Needs one keyword from each set ("sleep" alone is not "sleep_extra").
    Paired(&'static [&'static str], &'static [&'static str], ActionKey),
}

impl Rule {
    fn matches(&self, text: &str) -> Option<ActionKey> {
        match self {
            Rule::Any(keywords, key) => contains_any(text, keywords).then_some(*key),
            Rule::SkipAware(keywords, positive, negative) => {
                if contains_any(text, keywords) {
                    Some(if text.contains("skip") { *negative } else { *positive })
                } else {
                    None
                }
            }
            Rule::Paired(first, second, key) => {
                (contains_any(text, first) && contains_any(text, second)).then_some(*key)
            }
        }
    }
}

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| text.contains(k))
}

/// The rule table, in evaluation order. The scroll rule sits above the social
/// rule on purpose: "social media" must resolve to scrolling, not socializing.
const RULES: &[Rule] = &[
    Rule::Any(&["scroll", "social media", "tiktok"], ActionKey::ScrollPhone),
    Rule::SkipAware(
        &["workout", "work out", "worked out", "exercise", "gym"],
        ActionKey::Workout,
        ActionKey::SkipWorkout,
    ),
    Rule::Any(&["study", "studied", "learn", "course"], ActionKey::Study),
    Rule::Paired(&["sleep", "slept"], &["extra", "more"], ActionKey::SleepExtra),
    Rule::Any(&["oversl"], ActionKey::Oversleep),
    Rule::Any(&["meditat", "mindful"], ActionKey::Meditate),
    Rule::SkipAware(
        &["social", "friend", "party"],
        ActionKey::SocialEvent,
        ActionKey::SkipSocial,
    ),
    Rule::Any(&["network"], ActionKey::Network),
    Rule::Any(&["save", "saving", "invest"], ActionKey::SaveMoney),
    Rule::Any(&["read", "book"], ActionKey::ReadBook),
    Rule::Any(&["cook", "meal prep"], ActionKey::CookHealthy),
    Rule::Any(&["junk", "fast food", "pizza"], ActionKey::JunkFood),
    Rule::Any(&["procrastinat", "delay", "put off"], ActionKey::Procrastinate),
    Rule::Paired(
        &["buy", "bought", "spend", "spent"],
        &["impulse", "unnecessary"],
        ActionKey::ImpulseBuy,
    ),
    Rule::Any(&["up late", "late night"], ActionKey::StayUpLate),
    Rule::Any(&["project", "side hustle"], ActionKey::SideProject),
];

// =============================================================================
// CLASSIFY
// =============================================================================

/// Map a free-text description onto the closest [`ActionKey`].
///
/// Total and infallible: text that matches nothing is [`ActionKey::Neutral`],
/// which lets a day with unrecognized entries still simulate (they just
/// contribute nothing).
pub fn classify(action: &str) -> ActionKey {
    let text = action.to_lowercase();
    for rule in RULES {
        if let Some(key) = rule.matches(&text) {
            return key;
        }
    }
    ActionKey::Neutral
}
