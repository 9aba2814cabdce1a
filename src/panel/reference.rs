use tracing::{debug, warn};

use crate::core::chrpos::ChromPos;
use crate::core::variant::PanelVariant;
use crate::panel::view::{GenotypeSource, SortedView};
use crate::parsing::vcf::decode_genotypes;
use crate::parsing::ParseError;
use crate::utils::validation::{check_non_negative, first_duplicate};

/// What to do when two reference panel records share a coordinate.
///
/// The windowed intersection assumes reference coordinates are unique; a repeated
/// coordinate could be skipped past and silently lose a tag.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum DuplicatePolicy {
    /// Fail on the first repeated coordinate
    #[default]
    Reject,
    /// Keep the first record at each coordinate and drop the rest
    KeepFirst,
}

/// In-memory reference panel sorted by coordinate
#[derive(Debug, Clone)]
pub struct ReferencePanel {
    samples: Vec<String>,
    records: Vec<PanelVariant>,
}

impl ReferencePanel {
    /// Build a panel from unsorted records.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::InvalidFormat` if a position is negative, or
    /// `ParseError::DuplicatePosition` if two records share a coordinate and the
    /// policy is [`DuplicatePolicy::Reject`].
    pub fn new(
        samples: Vec<String>,
        mut records: Vec<PanelVariant>,
        policy: DuplicatePolicy,
    ) -> Result<Self, ParseError> {
        for record in &records {
            check_non_negative(record.chrpos)?;
        }

        // stable, so KeepFirst keeps file order among equal coordinates
        records.sort_by_key(|r| r.chrpos);

        if let Some(dup) = first_duplicate(records.iter().map(|r| r.chrpos)) {
            match policy {
                DuplicatePolicy::Reject => return Err(ParseError::DuplicatePosition(dup)),
                DuplicatePolicy::KeepFirst => {
                    let before = records.len();
                    records.dedup_by_key(|r| r.chrpos);
                    warn!(
                        dropped = before - records.len(),
                        first = %dup,
                        "Dropped reference records at repeated coordinates"
                    );
                }
            }
        }

        debug!(
            records = records.len(),
            samples = samples.len(),
            "Built reference panel"
        );

        Ok(Self { samples, records })
    }

    pub fn samples(&self) -> &[String] {
        &self.samples
    }

    pub fn records(&self) -> &[PanelVariant] {
        &self.records
    }
}

impl SortedView for ReferencePanel {
    fn len(&self) -> usize {
        self.records.len()
    }

    fn chrpos_at(&self, index: usize) -> ChromPos {
        self.records[index].chrpos
    }
}

impl GenotypeSource for ReferencePanel {
    fn id_at(&self, index: usize) -> &str {
        &self.records[index].id
    }

    fn n_samples(&self) -> usize {
        self.samples.len()
    }

    fn genotypes_at(&self, index: usize) -> Result<Vec<i8>, ParseError> {
        let record = &self.records[index];
        match record.gt_index {
            Some(gt_index) => decode_genotypes(&record.sample_fields, gt_index, self.n_samples()),
            // no GT key: every call is missing
            None => Ok(vec![-1; self.n_samples()]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn variant(chrom: i32, pos: i64, id: &str, samples: &str) -> PanelVariant {
        PanelVariant::new(ChromPos::new(chrom, pos), id).with_genotypes(0, samples)
    }

    fn samples(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("S{i}")).collect()
    }

    #[test]
    fn test_new_sorts_records() {
        let panel = ReferencePanel::new(
            samples(1),
            vec![
                variant(2, 50, "rs4", "0/0"),
                variant(1, 260, "rs3", "0/1"),
                variant(1, 100, "rs1", "1/1"),
            ],
            DuplicatePolicy::Reject,
        )
        .unwrap();

        let ids: Vec<&str> = (0..panel.len()).map(|i| panel.id_at(i)).collect();
        assert_eq!(ids, vec!["rs1", "rs3", "rs4"]);
        assert_eq!(panel.chrpos_at(0), ChromPos::new(1, 100));
    }

    #[test]
    fn test_duplicate_position_rejected() {
        let result = ReferencePanel::new(
            samples(1),
            vec![variant(1, 100, "rs1", "0/0"), variant(1, 100, "rs2", "0/1")],
            DuplicatePolicy::Reject,
        );
        assert!(matches!(
            result,
            Err(ParseError::DuplicatePosition(p)) if p == ChromPos::new(1, 100)
        ));
    }

    #[test]
    fn test_duplicate_position_keep_first() {
        let panel = ReferencePanel::new(
            samples(1),
            vec![
                variant(1, 100, "rs1", "0/0"),
                variant(1, 100, "rs2", "0/1"),
                variant(1, 200, "rs3", "0/1"),
            ],
            DuplicatePolicy::KeepFirst,
        )
        .unwrap();
        assert_eq!(panel.len(), 2);
        assert_eq!(panel.id_at(0), "rs1");
    }

    #[test]
    fn test_negative_position_rejected() {
        let result = ReferencePanel::new(
            samples(1),
            vec![variant(1, -5, "rs1", "0/0")],
            DuplicatePolicy::Reject,
        );
        assert!(matches!(result, Err(ParseError::InvalidFormat(_))));
    }

    #[test]
    fn test_genotypes_at() {
        let panel = ReferencePanel::new(
            samples(3),
            vec![variant(1, 100, "rs1", "0|0\t0|1\t1/1")],
            DuplicatePolicy::Reject,
        )
        .unwrap();
        assert_eq!(panel.genotypes_at(0).unwrap(), vec![0, 1, 2]);
    }

    #[test]
    fn test_genotypes_without_gt_are_missing() {
        let panel = ReferencePanel::new(
            samples(2),
            vec![PanelVariant::new(ChromPos::new(1, 1), "rs1")],
            DuplicatePolicy::Reject,
        )
        .unwrap();
        assert_eq!(panel.genotypes_at(0).unwrap(), vec![-1, -1]);
    }
}
