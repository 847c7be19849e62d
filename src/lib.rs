//! Diabetes Risk - Risk estimation from a health profile.
//!
//! A deterministic rule engine always produces an explained result; a logistic
//! model trained at startup (locally or behind an HTTP service) sets the tier
//! when it is available in time.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
