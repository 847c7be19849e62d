//! Output contract of a risk evaluation.

use serde::{Deserialize, Serialize};

use super::RiskLevel;
use crate::domain::foundation::Percentage;

/// Direction in which a factor moves the risk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    /// Raises risk.
    Positive,
    /// Lowers risk.
    Negative,
    Neutral,
}

/// One explained contribution to the assessment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskFactor {
    pub name: String,
    pub impact: Impact,
    pub description: String,
}

impl RiskFactor {
    pub fn new(name: impl Into<String>, impact: Impact, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            impact,
            description: description.into(),
        }
    }
}

/// Which model determined the tier and percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModelUsed {
    Trained,
    RuleBased,
}

impl ModelUsed {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelUsed::Trained => "trained",
            ModelUsed::RuleBased => "rule-based",
        }
    }
}

/// Unified result returned by every evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskResult {
    pub risk_level: RiskLevel,
    pub risk_percentage: Percentage,
    pub factors: Vec<RiskFactor>,
    pub recommendations: Vec<String>,
    pub model_used: ModelUsed,
    /// Accuracy reported by the trained model, when it answered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_accuracy: Option<f64>,
}
