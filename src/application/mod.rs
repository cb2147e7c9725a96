//! Application layer: Use cases and services.
//!
//! Wraps the pure domain formula with logging and presentation.

mod scoring;

pub use scoring::{ScoredExam, ScoringService};
