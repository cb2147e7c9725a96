//! Scoring service: Evaluates examinations and renders readouts.
//!
//! The service holds only presentation settings. Every call runs the formula
//! from scratch; nothing is cached between evaluations.

use serde::{Deserialize, Serialize};

use crate::domain::{
    calculate, format_percent, format_score, DentalExam, ExamCounts, SaciAssessment, SaciOutcome,
    ScoreView,
};

/// An assessment tied back to the record it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredExam {
    pub id: Option<String>,
    #[serde(flatten)]
    pub assessment: SaciAssessment,
}

/// Service for evaluating SACI scores.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoringService {
    view: ScoreView,
}

impl ScoringService {
    /// Create a new scoring service.
    #[must_use]
    pub fn new(view: ScoreView) -> Self {
        Self { view }
    }

    #[must_use]
    pub fn view(&self) -> ScoreView {
        self.view
    }

    pub fn set_view(&mut self, view: ScoreView) {
        self.view = view;
    }

    /// Evaluate one set of counts.
    #[must_use]
    pub fn assess(&self, counts: &ExamCounts) -> SaciAssessment {
        let assessment = calculate(counts);
        let c = &assessment.components;

        tracing::debug!(
            da_score = c.da_score,
            mc_score = c.mc_score,
            fc_score = c.fc_score,
            total_surfaces = c.total_surfaces,
            "SACI components computed"
        );

        if let SaciOutcome::InvalidDenominator { total_surfaces } = assessment.outcome {
            tracing::warn!(total_surfaces, "SACI undefined: non-positive surface count");
        }

        assessment
    }

    /// Evaluate a stored examination record.
    #[must_use]
    pub fn assess_exam(&self, exam: &DentalExam) -> ScoredExam {
        ScoredExam {
            id: exam.id.clone(),
            assessment: self.assess(&exam.counts),
        }
    }

    /// Evaluate a batch of records, preserving order.
    #[must_use]
    pub fn assess_batch(&self, exams: &[DentalExam]) -> Vec<ScoredExam> {
        let scored: Vec<ScoredExam> = exams.iter().map(|e| self.assess_exam(e)).collect();
        let invalid = scored.iter().filter(|s| !s.assessment.is_valid()).count();

        tracing::info!(
            exams = scored.len(),
            invalid,
            "Batch scoring complete"
        );

        scored
    }

    /// Plain-text readout: component scores, then either the guard message or
    /// the percentages selected by the current view.
    #[must_use]
    pub fn render_report(&self, assessment: &SaciAssessment) -> String {
        let c = &assessment.components;
        let mut out = String::from("Component Scores\n");

        out.push_str(&format!(
            "  Weighted Active Caries Score (Dₐ):  {}\n",
            format_score(c.da_score)
        ));
        out.push_str(&format!(
            "  Missing Due to Caries Score (M_c):  {}\n",
            format_score(c.mc_score)
        ));
        out.push_str(&format!(
            "  Restored Due to Caries Score (F_c): {}\n",
            format_score(c.fc_score)
        ));
        out.push_str(&format!(
            "  Total Available Surfaces (S_total): {}\n",
            c.total_surfaces
        ));
        out.push_str("\nSACI Scores\n");

        match assessment.scores() {
            Ok(scores) => {
                for (label, value) in self.view.readouts(&scores) {
                    out.push_str(&format!("  {label}: {}\n", format_percent(value)));
                }
            }
            Err(e) => out.push_str(&format!("  {e}\n")),
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_counts() -> ExamCounts {
        ExamCounts {
            s1_2: 4,
            s3_4: 2,
            s5_6: 1,
            nf1: 3,
            ..Default::default()
        }
    }

    #[test]
    fn test_assess_matches_formula() {
        let service = ScoringService::default();
        let counts = sample_counts();
        assert_eq!(service.assess(&counts), calculate(&counts));
    }

    #[test]
    fn test_report_breakdown() {
        let service = ScoringService::new(ScoreView::Breakdown);
        let report = service.render_report(&service.assess(&sample_counts()));

        assert!(report.contains("Weighted Active Caries Score (Dₐ):  6.00"));
        assert!(report.contains("Restored Due to Caries Score (F_c): 3.00"));
        assert!(report.contains("Total Available Surfaces (S_total): 128"));
        assert!(report.contains("SACI-total: 7.03%"));
        assert!(report.contains("SACI-loss: 0.00%"));
        assert!(report.contains("SACI-restoration: 2.34%"));
    }

    #[test]
    fn test_report_composite_exact_text() {
        let service = ScoringService::new(ScoreView::Composite);
        let report = service.render_report(&service.assess(&sample_counts()));

        let expected = "Component Scores\n\
            \x20 Weighted Active Caries Score (Dₐ):  6.00\n\
            \x20 Missing Due to Caries Score (M_c):  0.00\n\
            \x20 Restored Due to Caries Score (F_c): 3.00\n\
            \x20 Total Available Surfaces (S_total): 128\n\
            \n\
            SACI Scores\n\
            \x20 SACI-total: 7.03%\n";
        assert_eq!(report, expected);
    }

    #[test]
    fn test_report_invalid_exact_tail() {
        let service = ScoringService::default();
        let counts = ExamCounts {
            nmnc_ant: 32,
            ..Default::default()
        };
        let report = service.render_report(&service.assess(&counts));

        assert!(report.ends_with(
            "  Total Available Surfaces (S_total): 0\n\
             \nSACI Scores\n\
             \x20 Invalid total surface count (≤0). Adjust non-caries tooth counts.\n"
        ));
        assert_eq!(report.lines().count(), 8);
    }

    #[test]
    fn test_report_composite_hides_submodels() {
        let service = ScoringService::new(ScoreView::Composite);
        let report = service.render_report(&service.assess(&sample_counts()));

        assert!(report.contains("SACI-total: 7.03%"));
        assert!(!report.contains("SACI-active"));
        assert!(!report.contains("SACI-restoration"));
    }

    #[test]
    fn test_report_invalid_denominator() {
        let service = ScoringService::default();
        let counts = ExamCounts {
            nmnc_ant: 20,
            nmnc_post: 10,
            ..Default::default()
        };
        let report = service.render_report(&service.assess(&counts));

        assert!(report.contains("Total Available Surfaces (S_total): -2"));
        assert!(report.contains("Invalid total surface count (≤0). Adjust non-caries tooth counts."));
        assert!(!report.contains('%'));
    }

    #[test]
    fn test_batch_preserves_order_and_ids() {
        let service = ScoringService::default();
        let exams = vec![
            DentalExam::with_id("a", sample_counts()),
            DentalExam::new(ExamCounts {
                nmnc_post: 30,
                ..Default::default()
            }),
        ];

        let scored = service.assess_batch(&exams);
        assert_eq!(scored.len(), 2);
        assert_eq!(scored[0].id.as_deref(), Some("a"));
        assert!(scored[0].assessment.is_valid());
        assert!(scored[1].id.is_none());
        assert!(!scored[1].assessment.is_valid());
    }

    #[test]
    fn test_set_view() {
        let mut service = ScoringService::default();
        assert_eq!(service.view(), ScoreView::Breakdown);
        service.set_view(ScoreView::Composite);
        assert_eq!(service.view(), ScoreView::Composite);
    }
}
