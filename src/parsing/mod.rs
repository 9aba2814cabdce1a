//! Readers that turn input files into sorted in-memory views.
//!
//! - **VCF** (`.vcf`, `.vcf.gz`, `.vcf.bgz`): the reference panel, with sample
//!   genotypes kept as raw text until requested
//! - **Summary statistics** (TSV/CSV, optionally gzipped): the association dataset
//!
//! ## Summary statistics columns
//!
//! Matched case-insensitively against the header row:
//!
//! | Field      | Accepted names                           | Required |
//! |------------|------------------------------------------|----------|
//! | identifier | snp, rsid, id, snpid, markername         | Yes      |
//! | chromosome | chr, chrom, chromosome, #chrom           | No       |
//! | position   | pos, bp, position                        | No       |
//! | z          | z, zscore, z_score                       | No       |
//!
//! Rows without a usable chromosome or position get [`ChromPos::UNKNOWN`] and can be
//! filled in from the reference panel later.

use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::MultiGzDecoder;
use thiserror::Error;

use crate::core::chrpos::ChromPos;

pub mod tsv;
pub mod vcf;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Missing required column: {0}")]
    MissingColumn(String),

    #[error("Reference panel has more than one record at {0}")]
    DuplicatePosition(ChromPos),
}

/// Check if the path is a gzipped file
#[allow(clippy::case_sensitive_file_extension_comparisons)] // Already lowercased
pub(crate) fn is_gzipped(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();
    path_str.ends_with(".gz") || path_str.ends_with(".bgz")
}

/// Open a text file for buffered reading, decompressing gzip/bgzip transparently.
/// VCF input uses the BGZF reader in [`vcf`] instead.
pub(crate) fn open_text(path: &Path) -> Result<Box<dyn BufRead>, ParseError> {
    let file = std::fs::File::open(path)?;
    if is_gzipped(path) {
        // bgzip output is a series of gzip members
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}
