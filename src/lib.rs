//! # tag-scan
//!
//! A library for finding tag SNPs shared by a reference panel and GWAS summary
//! statistics, window by window along each autosome.
//!
//! Summary-statistics imputation predicts association statistics at untyped SNPs
//! from nearby typed ones. Its inputs, per genomic window, are the SNPs that the
//! study measured *and* the reference panel genotyped ("tags"), plus the panel's
//! genotypes at those tags. `tag-scan` assembles exactly that.
//!
//! ## Features
//!
//! - **Position reconciliation**: Study SNPs with only an rsID are placed using the panel
//! - **Windowed scanning**: Fixed-width windows with a flanking margin on the study side
//! - **Seek-ahead intersection**: Cursors jump with lower-bound searches on mismatch
//! - **Genotype cache**: Each panel record is decoded at most once per chromosome
//! - **Duplicate handling**: Repeated panel coordinates are rejected or de-duplicated
//!
//! ## Example
//!
//! ```rust
//! use tag_scan::parsing::tsv::parse_gwas_text;
//! use tag_scan::parsing::vcf::parse_vcf_text;
//! use tag_scan::panel::reference::DuplicatePolicy;
//! use tag_scan::scan::reconcile::reconcile;
//! use tag_scan::scan::{ImputationDriver, ScanConfig};
//!
//! let vcf = "##fileformat=VCFv4.2\n\
//!            #CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\tFORMAT\tS1\tS2\n\
//!            1\t100\trs1\tA\tG\t.\tPASS\t.\tGT\t0/1\t1/1\n\
//!            1\t250\trs2\tC\tT\t.\tPASS\t.\tGT\t0/0\t0/1\n";
//! let panel = parse_vcf_text(vcf, DuplicatePolicy::Reject).unwrap();
//!
//! // rs1 has no position in the study; it is filled in from the panel
//! let mut gwas = parse_gwas_text("SNP\tCHR\tBP\tZ\nrs1\tNA\tNA\t2.5\n", '\t').unwrap();
//! let summary = reconcile(&panel, &mut gwas).unwrap();
//! assert_eq!(summary.filled, 1);
//!
//! let driver = ImputationDriver::new(&panel, &gwas, ScanConfig::new(200, 10).unwrap()).unwrap();
//! let mut batches = Vec::new();
//! driver.run(|batch| batches.push(batch)).unwrap();
//!
//! assert_eq!(batches.len(), 2);
//! assert_eq!(batches[0].tags.len(), 1);
//! assert_eq!(batches[0].genotypes[0].to_vec(), vec![1, 2]);
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Coordinates and variant records
//! - [`panel`]: Sorted views, cursors, and the in-memory datasets
//! - [`parsing`]: VCF and summary-statistics readers
//! - [`scan`]: Windows, intersection, genotype cache, reconciliation, and drivers
//! - [`cli`]: Command-line interface implementation
//! - [`utils`]: Ingestion checks

pub mod cli;
pub mod core;
pub mod panel;
pub mod parsing;
pub mod scan;
pub mod utils;

// Re-export commonly used types for convenience
pub use core::chrpos::ChromPos;
pub use panel::gwas::GwasDataset;
pub use panel::reference::{DuplicatePolicy, ReferencePanel};
pub use scan::{ImputationDriver, RegionReporter, ScanConfig, ScanError};
