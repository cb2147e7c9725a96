//! Severity-Adjusted Caries Index calculation.
//!
//! The index combines three weighted numerators over a shared denominator of
//! scorable surfaces:
//!
//! ```text
//! da_score       = 0.5*S1_2 + 1.0*S3_4 + 2.0*S5_6
//! mc_score       = 4*NMc_ant + 5*NMc_post
//! fc_score       = 1*NF1 + 2*NF2_3 + 3*NF4_plus
//! total_surfaces = 128 - 4*NMnc_ant - 5*NMnc_post
//! ```
//!
//! Each percentage is `numerator / total_surfaces * 100`, defined only when
//! `total_surfaces > 0`. Nothing is rounded here; rounding happens at display.

use serde::{Deserialize, Serialize};

use super::ExamCounts;

/// Scorable surfaces in a full permanent dentition (28 teeth).
pub const BASELINE_SURFACES: i64 = 128;

/// ICDAS 1-2 lesion weight
pub const WEIGHT_ICDAS_1_2: f64 = 0.5;
/// ICDAS 3-4 lesion weight
pub const WEIGHT_ICDAS_3_4: f64 = 1.0;
/// ICDAS 5-6 lesion weight
pub const WEIGHT_ICDAS_5_6: f64 = 2.0;

/// Surfaces per anterior tooth
pub const SURFACES_ANTERIOR: i64 = 4;
/// Surfaces per posterior tooth
pub const SURFACES_POSTERIOR: i64 = 5;

/// Single-surface filling weight
pub const WEIGHT_FILLING_1: f64 = 1.0;
/// 2-3 surface filling weight
pub const WEIGHT_FILLING_2_3: f64 = 2.0;
/// 4+ surface filling or crown weight
pub const WEIGHT_FILLING_4_PLUS: f64 = 3.0;

/// Denominator guard failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ScoreError {
    #[error("Invalid total surface count (≤0). Adjust non-caries tooth counts.")]
    InvalidDenominator { total_surfaces: i64 },
}

/// Intermediate scores, reported whether or not the index is defined.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComponentScores {
    /// Weighted active caries score (Dₐ)
    pub da_score: f64,

    /// Missing-due-to-caries score (M_c)
    pub mc_score: f64,

    /// Restored-due-to-caries score (F_c)
    pub fc_score: f64,

    /// Available surfaces after non-caries tooth loss (S_total); may be <= 0
    pub total_surfaces: i64,
}

/// The four SACI percentages.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SaciScores {
    /// SACI-total: all three numerators over the denominator
    pub total: f64,
    /// SACI-active: active lesions only
    pub active: f64,
    /// SACI-loss: caries-related tooth loss only
    pub loss: f64,
    /// SACI-restoration: restorations only
    pub restoration: f64,
}

/// Result of the denominator guard.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SaciOutcome {
    Scored(SaciScores),
    InvalidDenominator { total_surfaces: i64 },
}

/// Full calculator output: the components plus the guarded percentages.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SaciAssessment {
    pub components: ComponentScores,
    pub outcome: SaciOutcome,
}

impl SaciAssessment {
    /// The percentages, or the guard error.
    ///
    /// # Errors
    /// Returns [`ScoreError::InvalidDenominator`] when `total_surfaces <= 0`.
    pub fn scores(&self) -> Result<SaciScores, ScoreError> {
        match self.outcome {
            SaciOutcome::Scored(scores) => Ok(scores),
            SaciOutcome::InvalidDenominator { total_surfaces } => {
                Err(ScoreError::InvalidDenominator { total_surfaces })
            }
        }
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self.outcome, SaciOutcome::Scored(_))
    }
}

/// Which percentages a readout shows.
///
/// `Composite` is the single-score variant; `Breakdown` adds the three
/// submodel percentages. Calculation is identical for both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreView {
    #[default]
    Breakdown,
    Composite,
}

impl ScoreView {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Breakdown => Self::Composite,
            Self::Composite => Self::Breakdown,
        }
    }

    /// Labelled percentage readouts for this view, in display order.
    #[must_use]
    pub fn readouts(self, scores: &SaciScores) -> Vec<(&'static str, f64)> {
        match self {
            Self::Composite => vec![("SACI-total", scores.total)],
            Self::Breakdown => vec![
                ("SACI-total", scores.total),
                ("SACI-active", scores.active),
                ("SACI-loss", scores.loss),
                ("SACI-restoration", scores.restoration),
            ],
        }
    }
}

impl std::fmt::Display for ScoreView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Breakdown => write!(f, "Breakdown"),
            Self::Composite => write!(f, "Composite"),
        }
    }
}

impl std::str::FromStr for ScoreView {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "breakdown" => Ok(Self::Breakdown),
            "composite" => Ok(Self::Composite),
            other => Err(format!("Unknown score view '{other}'")),
        }
    }
}

/// Compute the component scores. Never fails.
#[must_use]
pub fn component_scores(counts: &ExamCounts) -> ComponentScores {
    let da_score = WEIGHT_ICDAS_1_2 * f64::from(counts.s1_2)
        + WEIGHT_ICDAS_3_4 * f64::from(counts.s3_4)
        + WEIGHT_ICDAS_5_6 * f64::from(counts.s5_6);

    let mc_score = (SURFACES_ANTERIOR * i64::from(counts.nmc_ant)
        + SURFACES_POSTERIOR * i64::from(counts.nmc_post)) as f64;

    let fc_score = WEIGHT_FILLING_1 * f64::from(counts.nf1)
        + WEIGHT_FILLING_2_3 * f64::from(counts.nf2_3)
        + WEIGHT_FILLING_4_PLUS * f64::from(counts.nf4_plus);

    let total_surfaces = BASELINE_SURFACES
        - SURFACES_ANTERIOR * i64::from(counts.nmnc_ant)
        - SURFACES_POSTERIOR * i64::from(counts.nmnc_post);

    ComponentScores {
        da_score,
        mc_score,
        fc_score,
        total_surfaces,
    }
}

/// Evaluate the index for one set of counts.
///
/// Pure: identical inputs give bit-identical outputs.
#[must_use]
pub fn calculate(counts: &ExamCounts) -> SaciAssessment {
    let components = component_scores(counts);

    if components.total_surfaces <= 0 {
        return SaciAssessment {
            components,
            outcome: SaciOutcome::InvalidDenominator {
                total_surfaces: components.total_surfaces,
            },
        };
    }

    let denom = components.total_surfaces as f64;
    let scores = SaciScores {
        total: (components.da_score + components.mc_score + components.fc_score) / denom * 100.0,
        active: components.da_score / denom * 100.0,
        loss: components.mc_score / denom * 100.0,
        restoration: components.fc_score / denom * 100.0,
    };

    SaciAssessment {
        components,
        outcome: SaciOutcome::Scored(scores),
    }
}

/// Format a component score for display (2 decimal places).
#[must_use]
pub fn format_score(value: f64) -> String {
    format!("{value:.2}")
}

/// Format a percentage for display (2 decimal places, `%` suffix).
#[must_use]
pub fn format_percent(value: f64) -> String {
    format!("{value:.2}%")
}
