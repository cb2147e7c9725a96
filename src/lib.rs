//! # SACI
//!
//! Severity-Adjusted Caries Index calculator.
//!
//! This crate provides:
//! - The SACI formula as a pure function over ten examination counts
//! - A terminal entry form that recomputes the index on every keystroke
//! - JSON batch scoring for exported examination records
//!
//! ## Architecture
//!
//! - `domain`: Examination counts and the scoring formula
//! - `application`: Scoring service (logging, reports, batches)
//! - `adapters`: JSON import/export and log sanitization
//! - `config`: Environment-driven settings
//! - `tui`: Terminal user interface

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod tui;

pub use domain::{calculate, DentalExam, ExamCounts, SaciAssessment, SaciOutcome, SaciScores};

/// Result type for SACI operations
pub type Result<T> = std::result::Result<T, SaciError>;

/// Main error type for SACI
#[derive(Debug, thiserror::Error)]
pub enum SaciError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
