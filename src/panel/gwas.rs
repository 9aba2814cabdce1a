use crate::core::chrpos::ChromPos;
use crate::core::variant::GwasVariant;
use crate::panel::view::{AssociationSource, SortedView};

/// In-memory association dataset (GWAS summary statistics)
///
/// Records with unknown positions sort first, so range queries on real
/// chromosomes never see them.
#[derive(Debug, Clone, Default)]
pub struct GwasDataset {
    records: Vec<GwasVariant>,
}

impl GwasDataset {
    #[must_use]
    pub fn new(records: Vec<GwasVariant>) -> Self {
        let mut dataset = Self { records };
        dataset.sort_entries();
        dataset
    }

    pub fn records(&self) -> &[GwasVariant] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&GwasVariant> {
        self.records.get(index)
    }
}

impl SortedView for GwasDataset {
    fn len(&self) -> usize {
        self.records.len()
    }

    fn chrpos_at(&self, index: usize) -> ChromPos {
        self.records[index].chrpos
    }
}

impl AssociationSource for GwasDataset {
    fn id_at(&self, index: usize) -> &str {
        &self.records[index].id
    }

    fn set_chrpos_at(&mut self, index: usize, chrpos: ChromPos) {
        self.records[index].chrpos = chrpos;
    }

    fn sort_entries(&mut self) {
        self.records.sort_by_key(|r| r.chrpos);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_sorts_unknown_first() {
        let gwas = GwasDataset::new(vec![
            GwasVariant::new("rs2", ChromPos::new(1, 205)),
            GwasVariant::new("rs9", ChromPos::UNKNOWN),
            GwasVariant::new("rs1", ChromPos::new(1, 100)),
        ]);
        assert_eq!(gwas.id_at(0), "rs9");
        assert_eq!(gwas.id_at(1), "rs1");
        assert_eq!(gwas.count_unknown(), 1);
    }

    #[test]
    fn test_set_chrpos_and_resort() {
        let mut gwas = GwasDataset::new(vec![
            GwasVariant::new("rs9", ChromPos::UNKNOWN),
            GwasVariant::new("rs2", ChromPos::new(1, 205)),
        ]);
        gwas.set_chrpos_at(0, ChromPos::new(1, 300));
        gwas.sort_entries();
        assert_eq!(gwas.id_at(1), "rs9");
        assert_eq!(gwas.count_unknown(), 0);
    }

    #[test]
    fn test_duplicates_kept() {
        let gwas = GwasDataset::new(vec![
            GwasVariant::new("rs1", ChromPos::new(1, 100)).with_z(1.5),
            GwasVariant::new("rs1", ChromPos::new(1, 100)).with_z(-0.5),
        ]);
        assert_eq!(gwas.len(), 2);
        assert_eq!(gwas.get(0).and_then(|r| r.z), Some(1.5));
    }
}
