//! Tier classification for composite index values
//!
//! The index is cut at fixed points into three ordinal tiers. Only the
//! lowest tier is closed at its lower end, so 0.0 is `Low` while every
//! other boundary value belongs to the tier below it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Inclusive upper bound of the `Low` tier
pub const LOW_UPPER_BOUND: f64 = 0.33;

/// Inclusive upper bound of the `Medium` tier
pub const MEDIUM_UPPER_BOUND: f64 = 0.66;

/// Socioeconomic tier of a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// [0, 0.33]
    Low,
    /// (0.33, 0.66]
    Medium,
    /// (0.66, 1.0]
    High,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::Low, Tier::Medium, Tier::High];

    /// Get tier label for display
    pub fn label(&self) -> &'static str {
        match self {
            Tier::Low => "low",
            Tier::Medium => "medium",
            Tier::High => "high",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify a rescaled index value.
///
/// Returns `None` for values outside [0, 1] (including NaN).
pub fn classify(index: f64) -> Option<Tier> {
    if !(0.0..=1.0).contains(&index) {
        None
    } else if index <= LOW_UPPER_BOUND {
        Some(Tier::Low)
    } else if index <= MEDIUM_UPPER_BOUND {
        Some(Tier::Medium)
    } else {
        Some(Tier::High)
    }
}

/// Number of rows per tier, in tier order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierCounts {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
}

impl TierCounts {
    pub fn from_tiers(tiers: impl IntoIterator<Item = Tier>) -> Self {
        tiers.into_iter().fold(Self::default(), |mut counts, tier| {
            match tier {
                Tier::Low => counts.low += 1,
                Tier::Medium => counts.medium += 1,
                Tier::High => counts.high += 1,
            }
            counts
        })
    }

    pub fn get(&self, tier: Tier) -> usize {
        match tier {
            Tier::Low => self.low,
            Tier::Medium => self.medium,
            Tier::High => self.high,
        }
    }

    pub fn total(&self) -> usize {
        self.low + self.medium + self.high
    }
}
