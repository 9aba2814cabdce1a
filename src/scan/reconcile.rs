//! Coordinate reconciliation between the study and the reference panel.
//!
//! Summary statistics files often carry only an rsID. Before scanning, every
//! study record whose identifier is known to the panel gets the panel's
//! coordinate; records the panel cannot place keep [`ChromPos::UNKNOWN`] and
//! sort to the front, out of reach of every window.

use serde::Serialize;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use tracing::{debug, info, warn};

use crate::core::chrpos::ChromPos;
use crate::core::variant::has_id;
use crate::panel::view::{AssociationSource, GenotypeSource, SortedView};
use crate::scan::ScanError;

/// Outcome of filling study positions from the reference panel
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReconcileSummary {
    /// Records that had no position and were given the panel's
    pub filled: usize,

    /// Records whose own position disagrees with the panel's for the same identifier
    pub conflicting: usize,

    /// Records still without a position afterwards
    pub unresolved: usize,
}

/// Record counts printed ahead of the window reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DatasetSummary {
    pub reference_snps: usize,
    pub gwas_snps: usize,
    pub gwas_unknown_position: usize,
}

impl DatasetSummary {
    pub fn collect<R, G>(reference: &R, gwas: &G) -> Self
    where
        R: SortedView + ?Sized,
        G: AssociationSource + ?Sized,
    {
        Self {
            reference_snps: reference.len(),
            gwas_snps: gwas.len(),
            gwas_unknown_position: gwas.count_unknown(),
        }
    }
}

/// Map every named reference record to its coordinate.
///
/// Records with the missing identifier `.` are left out.
///
/// # Errors
///
/// Returns `ScanError::DuplicateIdentifier` if a name appears twice.
pub fn build_id_index<R: GenotypeSource + ?Sized>(
    reference: &R,
) -> Result<HashMap<String, ChromPos>, ScanError> {
    let mut index = HashMap::with_capacity(reference.len());

    for i in 0..reference.len() {
        let id = reference.id_at(i);
        if !has_id(id) {
            continue;
        }
        match index.entry(id.to_string()) {
            Entry::Occupied(_) => return Err(ScanError::DuplicateIdentifier(id.to_string())),
            Entry::Vacant(slot) => {
                slot.insert(reference.chrpos_at(i));
            }
        }
    }

    debug!(identifiers = index.len(), "Built reference identifier index");
    Ok(index)
}

/// Fill unknown study positions from `index`. Leaves the dataset unsorted.
pub fn fill_positions<G: AssociationSource + ?Sized>(
    gwas: &mut G,
    index: &HashMap<String, ChromPos>,
) -> ReconcileSummary {
    let mut summary = ReconcileSummary::default();

    for i in 0..gwas.len() {
        let current = gwas.chrpos_at(i);
        let Some(&panel) = index.get(gwas.id_at(i)) else {
            if current.is_unknown() {
                summary.unresolved += 1;
            }
            continue;
        };

        if current.is_unknown() {
            gwas.set_chrpos_at(i, panel);
            summary.filled += 1;
        } else if current != panel {
            warn!(
                id = gwas.id_at(i),
                study = %current,
                panel = %panel,
                "Study position disagrees with the reference panel; keeping the study's"
            );
            summary.conflicting += 1;
        }
    }

    summary
}

/// Resolve study positions against the panel, then restore sort order.
///
/// # Errors
///
/// Returns `ScanError::DuplicateIdentifier` if the panel repeats an identifier.
pub fn reconcile<R, G>(reference: &R, gwas: &mut G) -> Result<ReconcileSummary, ScanError>
where
    R: GenotypeSource + ?Sized,
    G: AssociationSource + ?Sized,
{
    let index = build_id_index(reference)?;
    let summary = fill_positions(gwas, &index);
    gwas.sort_entries();

    info!(
        filled = summary.filled,
        conflicting = summary.conflicting,
        unresolved = summary.unresolved,
        "Reconciled study positions"
    );

    Ok(summary)
}
