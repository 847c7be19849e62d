//! Assessment Module - Health profiles, rule-based scoring and risk results.
//!
//! # Components
//!
//! - `HealthProfile` - Validated input with derived BMI
//! - `RuleEngine` - Additive point scoring, factor explanations, recommendations
//! - `RiskLevel` - Tier mapping from rule scores and model probabilities
//! - `RiskResult` - The unified output contract
//! - `EvaluationState` - Per-request attempt/fallback lifecycle
//!
//! Everything here is pure and deterministic: the same profile always yields
//! the same assessment.

mod errors;
mod evaluation_state;
mod profile;
mod result;
mod risk_level;
mod rule_engine;

pub use errors::RiskError;
pub use evaluation_state::EvaluationState;
pub use profile::{
    derive_bmi, ActivityLevel, AlcoholIntake, ClinicalMeasurements, DietType, Gender,
    HealthProfile, HealthProfileInput, SmokingStatus, StressLevel, YesNo, AGE_RANGE,
    HEIGHT_RANGE_CM, WEIGHT_RANGE_KG,
};
pub use result::{Impact, ModelUsed, RiskFactor, RiskResult};
pub use risk_level::{
    RiskLevel, LOW_PROBABILITY_CEILING, LOW_SCORE_CEILING, MEDIUM_PROBABILITY_CEILING,
    MEDIUM_SCORE_CEILING,
};
pub use rule_engine::{
    Explanation, RuleAssessment, RuleEngine, MAX_RULE_PERCENTAGE, MAX_RULE_SCORE,
};
