//! Per-request evaluation lifecycle.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::StateMachine;

/// Where a single evaluation stands.
///
/// ```text
/// AttemptTrained ──► Trained
///        │
///        └────────► FallbackRuleBased
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationState {
    /// The primary scorer is being consulted.
    AttemptTrained,
    /// The primary scorer answered; its tier stands.
    Trained,
    /// The primary scorer was absent or failed; the rule engine decides.
    FallbackRuleBased,
}

impl StateMachine for EvaluationState {
    fn can_transition_to(&self, target: &Self) -> bool {
        matches!(
            (self, target),
            (
                EvaluationState::AttemptTrained,
                EvaluationState::Trained | EvaluationState::FallbackRuleBased
            )
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        match self {
            EvaluationState::AttemptTrained => {
                vec![EvaluationState::Trained, EvaluationState::FallbackRuleBased]
            }
            EvaluationState::Trained | EvaluationState::FallbackRuleBased => vec![],
        }
    }
}

impl fmt::Display for EvaluationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EvaluationState::AttemptTrained => "attempt_trained",
            EvaluationState::Trained => "trained",
            EvaluationState::FallbackRuleBased => "fallback_rule_based",
        };
        f.write_str(s)
    }
}
