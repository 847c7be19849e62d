//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (percentages, errors, state machines)
//! - `assessment` - Health profiles, rule scoring and the risk result contract
//! - `model` - Feature encoding, dataset fitting and the linear classifier

pub mod assessment;
pub mod foundation;
pub mod model;
