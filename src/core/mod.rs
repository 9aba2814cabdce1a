//! Core data types for tag SNP scanning.
//!
//! - [`ChromPos`]: A (chromosome, position) coordinate with a total order and an
//!   "unknown" sentinel
//! - [`PanelVariant`]: A reference panel record with lazily decoded genotypes
//! - [`GwasVariant`]: An association result from the study dataset
//!
//! ## Chromosome numbering
//!
//! | Name              | Number |
//! |-------------------|--------|
//! | `1`..`22`, `chr1` | 1..22  |
//! | `X`, `chrX`       | 23     |
//! | `Y`, `chrY`       | 24     |
//! | `MT`, `chrM`      | 25     |
//!
//! Only the autosomes (1-22) are scanned.
//!
//! [`ChromPos`]: chrpos::ChromPos
//! [`PanelVariant`]: variant::PanelVariant
//! [`GwasVariant`]: variant::GwasVariant

pub mod chrpos;
pub mod variant;
