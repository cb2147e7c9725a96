//! Domain layer: Core clinical types and the SACI formula.
//!
//! Pure Rust types with no I/O. Everything here is serializable and
//! deterministic.

mod exam;
mod score;

pub use exam::{DentalExam, ExamCounts, ExamField, FIELDS};
pub use score::{
    calculate, component_scores, format_percent, format_score, ComponentScores, SaciAssessment,
    SaciOutcome, SaciScores, ScoreError, ScoreView, BASELINE_SURFACES,
};
