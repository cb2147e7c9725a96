//! Dental examination counts for SACI scoring.
//!
//! Ten clinician-entered tallies taken at chairside: ICDAS-graded active
//! lesions, teeth lost to caries, restorations, and teeth lost to other causes.

use serde::{Deserialize, Serialize};

/// One input of the calculator, as shown on the entry form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExamField {
    /// Clinical code used as the serialized key (e.g. `S1_2`)
    pub code: &'static str,

    /// Form label
    pub label: &'static str,
}

/// Field catalogue in canonical order. `to_vec`/`from_vec` follow this order.
pub const FIELDS: [ExamField; 10] = [
    ExamField {
        code: "S1_2",
        label: "Number of surfaces with ICDAS 1-2 scores (S1-2)",
    },
    ExamField {
        code: "S3_4",
        label: "Number of surfaces with ICDAS 3-4 scores (S3-4)",
    },
    ExamField {
        code: "S5_6",
        label: "Number of surfaces with ICDAS 5-6 scores (S5-6)",
    },
    ExamField {
        code: "NMc_ant",
        label: "Anterior teeth missing due to caries (NMc_ant)",
    },
    ExamField {
        code: "NMc_post",
        label: "Posterior teeth missing due to caries (NMc_post)",
    },
    ExamField {
        code: "NF1",
        label: "Single-surface fillings (NF1)",
    },
    ExamField {
        code: "NF2_3",
        label: "2-3 surface fillings (NF2-3)",
    },
    ExamField {
        code: "NF4_plus",
        label: "4+ surface fillings or crowns (NF4+)",
    },
    ExamField {
        code: "NMnc_ant",
        label: "Anterior teeth missing non-caries (NMnc_ant)",
    },
    ExamField {
        code: "NMnc_post",
        label: "Posterior teeth missing non-caries (NMnc_post)",
    },
];

/// The ten SACI inputs.
///
/// Counts are unsigned, so the "each input is >= 0" bound holds by construction.
/// Keys absent from serialized input default to 0, matching the entry form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExamCounts {
    /// Surfaces scored ICDAS 1-2
    #[serde(rename = "S1_2")]
    pub s1_2: u32,

    /// Surfaces scored ICDAS 3-4
    #[serde(rename = "S3_4")]
    pub s3_4: u32,

    /// Surfaces scored ICDAS 5-6
    #[serde(rename = "S5_6")]
    pub s5_6: u32,

    /// Anterior teeth missing due to caries
    #[serde(rename = "NMc_ant")]
    pub nmc_ant: u32,

    /// Posterior teeth missing due to caries
    #[serde(rename = "NMc_post")]
    pub nmc_post: u32,

    /// Single-surface fillings
    #[serde(rename = "NF1")]
    pub nf1: u32,

    /// 2-3 surface fillings
    #[serde(rename = "NF2_3")]
    pub nf2_3: u32,

    /// 4+ surface fillings or crowns
    #[serde(rename = "NF4_plus")]
    pub nf4_plus: u32,

    /// Anterior teeth missing, non-caries cause
    #[serde(rename = "NMnc_ant")]
    pub nmnc_ant: u32,

    /// Posterior teeth missing, non-caries cause
    #[serde(rename = "NMnc_post")]
    pub nmnc_post: u32,
}

impl ExamCounts {
    /// Counts in [`FIELDS`] order.
    #[must_use]
    pub fn to_vec(&self) -> Vec<u32> {
        vec![
            self.s1_2,
            self.s3_4,
            self.s5_6,
            self.nmc_ant,
            self.nmc_post,
            self.nf1,
            self.nf2_3,
            self.nf4_plus,
            self.nmnc_ant,
            self.nmnc_post,
        ]
    }

    /// Build counts from a slice in [`FIELDS`] order.
    ///
    /// # Errors
    /// Returns error if the slice length is not 10.
    pub fn from_vec(v: &[u32]) -> Result<Self, String> {
        if v.len() != FIELDS.len() {
            return Err(format!(
                "Expected {} counts, got {}",
                FIELDS.len(),
                v.len()
            ));
        }

        Ok(Self {
            s1_2: v[0],
            s3_4: v[1],
            s5_6: v[2],
            nmc_ant: v[3],
            nmc_post: v[4],
            nf1: v[5],
            nf2_3: v[6],
            nf4_plus: v[7],
            nmnc_ant: v[8],
            nmnc_post: v[9],
        })
    }
}

/// An examination record: the counts plus bookkeeping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DentalExam {
    /// Record identifier (local only)
    #[serde(default)]
    pub id: Option<String>,

    /// The ten counts, flattened into the record
    #[serde(flatten)]
    pub counts: ExamCounts,

    /// When the counts were entered
    #[serde(default = "chrono::Utc::now")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl DentalExam {
    /// Create an exam record with the given counts.
    #[must_use]
    pub fn new(counts: ExamCounts) -> Self {
        Self {
            id: None,
            counts,
            created_at: chrono::Utc::now(),
        }
    }

    /// Create an exam record with an ID.
    #[must_use]
    pub fn with_id(id: impl Into<String>, counts: ExamCounts) -> Self {
        Self {
            id: Some(id.into()),
            counts,
            created_at: chrono::Utc::now(),
        }
    }
}
