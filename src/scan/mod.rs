//! Windowed scanning for tag SNPs.
//!
//! This module provides the core scanning functionality:
//!
//! - [`WindowPartitioner`]: Walks fixed-width windows along one chromosome
//! - [`intersect`]: Merge-with-seek intersection of two sorted sub-ranges
//! - [`GenotypeCache`]: Per-chromosome memo of decoded reference genotypes
//! - [`reconcile`]: Fills missing study positions from the reference panel
//! - [`RegionReporter`] and [`ImputationDriver`]: The two drivers
//!
//! ## Scanning Algorithm
//!
//! For each autosome:
//!
//! 1. **Chromosome bounds**: Two lower-bound searches bracket the chromosome's
//!    reference records
//! 2. **Windows**: `[w * width, (w + 1) * width)`, skipping windows with no
//!    reference SNPs and stopping after the last one
//! 3. **Flanked study range**: `[start - flank, end + flank)` searched in the full
//!    study dataset
//! 4. **Tags**: Coordinates present in both ranges
//! 5. **Genotypes** (driver only): Looked up through the cache
//!
//! ## Example
//!
//! ```rust
//! use tag_scan::core::chrpos::ChromPos;
//! use tag_scan::core::variant::{GwasVariant, PanelVariant};
//! use tag_scan::panel::gwas::GwasDataset;
//! use tag_scan::panel::reference::{DuplicatePolicy, ReferencePanel};
//! use tag_scan::scan::{RegionReporter, ScanConfig};
//!
//! let panel = ReferencePanel::new(
//!     vec![],
//!     vec![PanelVariant::new(ChromPos::new(1, 100), "rs1")],
//!     DuplicatePolicy::Reject,
//! )
//! .unwrap();
//! let gwas = GwasDataset::new(vec![GwasVariant::new("rs1", ChromPos::new(1, 100))]);
//!
//! let reporter = RegionReporter::new(&panel, &gwas, ScanConfig::new(200, 10).unwrap()).unwrap();
//! let reports = reporter.collect_reports().unwrap();
//! assert_eq!(reports.len(), 1);
//! assert_eq!(reports[0].tag_snps, 1);
//! ```

use thiserror::Error;

use crate::core::chrpos::ChromPos;
use crate::parsing::ParseError;

pub mod cache;
pub mod config;
pub mod driver;
pub mod intersect;
pub mod reconcile;
pub mod window;

pub use cache::{CacheStats, GenotypeCache};
pub use config::{ConfigError, ScanConfig};
pub use driver::{ImputationDriver, RegionReporter, TagBatch, WindowReport};
pub use intersect::{intersect, intersect_window};
pub use window::{chromosome_bounds, Window, WindowPartitioner};

#[derive(Error, Debug)]
pub enum ScanError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Identifier '{0}' appears more than once in the reference panel")]
    DuplicateIdentifier(String),

    #[error("Coordinate {0} is not in the reference panel")]
    MissingCoordinate(ChromPos),

    #[error("Reference record at {0} has a negative position")]
    NegativePosition(ChromPos),

    #[error("The {view} is not sorted: {before} is followed by {after}")]
    Unsorted {
        view: &'static str,
        before: ChromPos,
        after: ChromPos,
    },

    #[error("Failed to decode genotypes: {0}")]
    Genotype(#[from] ParseError),
}
