use serde::{Deserialize, Serialize};

use crate::core::chrpos::ChromPos;

/// Identifier used by VCF and summary statistics files for "no ID"
pub const MISSING_ID: &str = ".";

/// Whether `id` names a variant rather than standing in for a missing one
pub fn has_id(id: &str) -> bool {
    !id.is_empty() && id != MISSING_ID
}

/// A single variant in the reference panel.
///
/// The per-sample columns are kept as raw text; genotype calls are decoded only
/// when asked for (see [`crate::parsing::vcf::decode_genotypes`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelVariant {
    pub chrpos: ChromPos,

    /// Variant name (VCF ID column), `.` when absent
    pub id: String,

    /// Index of the `GT` key in the FORMAT column, if present
    pub gt_index: Option<usize>,

    /// Tab-separated sample columns, unparsed
    pub sample_fields: String,
}

impl PanelVariant {
    pub fn new(chrpos: ChromPos, id: impl Into<String>) -> Self {
        Self {
            chrpos,
            id: id.into(),
            gt_index: None,
            sample_fields: String::new(),
        }
    }

    #[must_use]
    pub fn with_genotypes(mut self, gt_index: usize, sample_fields: impl Into<String>) -> Self {
        self.gt_index = Some(gt_index);
        self.sample_fields = sample_fields.into();
        self
    }
}

/// A single association result from the study (GWAS summary statistics)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GwasVariant {
    /// Variant name, usually an rsID
    pub id: String,

    /// Coordinate, or [`ChromPos::UNKNOWN`] when the file carried none
    pub chrpos: ChromPos,

    /// Association z statistic
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z: Option<f64>,
}

impl GwasVariant {
    pub fn new(id: impl Into<String>, chrpos: ChromPos) -> Self {
        Self {
            id: id.into(),
            chrpos,
            z: None,
        }
    }

    #[must_use]
    pub fn with_z(mut self, z: f64) -> Self {
        self.z = Some(z);
        self
    }
}
