//! Errors raised while building or scoring a health profile.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};

/// Failure to score a profile at all.
///
/// Remote scoring failures never surface here; they are absorbed by the
/// rule-based fallback. Only a profile that cannot be scored reaches callers.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RiskError {
    /// Height or weight absent (or non-finite), so no BMI can be derived.
    #[error("cannot score without BMI: height and weight are required")]
    MissingBmi,

    /// A profile field failed its range or format check.
    #[error("invalid health profile: {0}")]
    InvalidProfile(#[from] ValidationError),
}

impl From<RiskError> for DomainError {
    fn from(err: RiskError) -> Self {
        match err {
            RiskError::MissingBmi => DomainError::new(ErrorCode::MissingBmi, err.to_string()),
            RiskError::InvalidProfile(inner) => inner.into(),
        }
    }
}
