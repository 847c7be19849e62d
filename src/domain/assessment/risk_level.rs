//! Risk tiers and the two ways of reaching one.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Highest rule-based score that still maps to [`RiskLevel::Low`].
pub const LOW_SCORE_CEILING: u32 = 30;

/// Highest rule-based score that still maps to [`RiskLevel::Medium`].
pub const MEDIUM_SCORE_CEILING: u32 = 60;

/// Probabilities below this map to [`RiskLevel::Low`].
pub const LOW_PROBABILITY_CEILING: f64 = 0.3;

/// Probabilities below this (and not Low) map to [`RiskLevel::Medium`].
pub const MEDIUM_PROBABILITY_CEILING: f64 = 0.7;

/// Risk tier shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Tier for an additive rule score (inclusive ceilings 30 and 60).
    pub fn from_rule_score(raw_score: u32) -> Self {
        match raw_score {
            0..=LOW_SCORE_CEILING => RiskLevel::Low,
            s if s <= MEDIUM_SCORE_CEILING => RiskLevel::Medium,
            _ => RiskLevel::High,
        }
    }

    /// Tier for a model probability (exclusive ceilings 0.3 and 0.7).
    pub fn from_probability(probability: f64) -> Self {
        if probability < LOW_PROBABILITY_CEILING {
            RiskLevel::Low
        } else if probability < MEDIUM_PROBABILITY_CEILING {
            RiskLevel::Medium
        } else {
            RiskLevel::High
        }
    }

    /// Returns the display label for this tier.
    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
