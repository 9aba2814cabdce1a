//! Reader for reference panel VCF files.
//!
//! Records are read with the `noodles` VCF reader; `.gz`/`.bgz` input goes through
//! its BGZF decoder. Only the fixed columns are parsed up front. The sample columns
//! of each record are stored verbatim and decoded by [`decode_genotypes`] when a
//! genotype is actually requested, which keeps loading a large panel cheap.
//!
//! Genotype calls are alternate-allele dosages:
//!
//! | GT    | Call |
//! |-------|------|
//! | `0/0` | 0    |
//! | `0|1` | 1    |
//! | `1/1` | 2    |
//! | `1`   | 1    |
//! | `./.` | -1   |

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

use noodles::bgzf;
use noodles::vcf;
use noodles::vcf::variant::record::samples::keys::key;
use noodles::vcf::variant::record::Ids as _;
use noodles::vcf::variant::record_buf::samples::sample::value::genotype::Genotype;
use tracing::{debug, warn};

use crate::core::chrpos::{parse_chromosome, ChromPos};
use crate::core::variant::{PanelVariant, MISSING_ID};
use crate::panel::reference::{DuplicatePolicy, ReferencePanel};
use crate::parsing::{is_gzipped, ParseError};

/// Parse a VCF file (plain or bgzipped) into a reference panel
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, `ParseError::InvalidFormat`
/// for a malformed header or record, or `ParseError::DuplicatePosition` per `policy`.
pub fn parse_vcf_file(path: &Path, policy: DuplicatePolicy) -> Result<ReferencePanel, ParseError> {
    let file = File::open(path)?;
    let reader: Box<dyn BufRead> = if is_gzipped(path) {
        Box::new(BufReader::new(bgzf::Reader::new(file)))
    } else {
        Box::new(BufReader::new(file))
    };
    parse_vcf_reader(reader, policy)
}

/// Parse VCF text into a reference panel
///
/// # Errors
///
/// See [`parse_vcf_file`].
pub fn parse_vcf_text(text: &str, policy: DuplicatePolicy) -> Result<ReferencePanel, ParseError> {
    parse_vcf_reader(text.as_bytes(), policy)
}

/// Parse VCF records from any buffered reader
///
/// # Errors
///
/// See [`parse_vcf_file`].
pub fn parse_vcf_reader<R: BufRead>(
    reader: R,
    policy: DuplicatePolicy,
) -> Result<ReferencePanel, ParseError> {
    let mut reader = vcf::io::Reader::new(reader);
    let header = reader
        .read_header()
        .map_err(|e| ParseError::InvalidFormat(format!("Invalid VCF header: {e}")))?;

    let samples: Vec<String> = header.sample_names().iter().cloned().collect();
    let mut records = Vec::new();
    let mut skipped = 0usize;

    for (i, result) in reader.records().enumerate() {
        // Record numbers in errors are 1-based for user friendliness
        let record_num = i + 1;
        let record = result.map_err(|e| record_error(record_num, e))?;

        match convert_record(&record, record_num, samples.len())? {
            Some(variant) => records.push(variant),
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        warn!(
            skipped,
            "Skipped reference records on unrecognised chromosomes"
        );
    }
    debug!(records = records.len(), "Read reference panel VCF");

    ReferencePanel::new(samples, records, policy)
}

fn record_error(record_num: usize, e: io::Error) -> ParseError {
    if e.kind() == io::ErrorKind::InvalidData {
        ParseError::InvalidFormat(format!("Invalid record {record_num}: {e}"))
    } else {
        ParseError::Io(e)
    }
}

/// Convert one record. Returns `None` for records on chromosomes we don't number.
fn convert_record(
    record: &vcf::Record,
    record_num: usize,
    n_samples: usize,
) -> Result<Option<PanelVariant>, ParseError> {
    let Some(chrom) = parse_chromosome(record.reference_sequence_name()) else {
        return Ok(None);
    };

    let position = record
        .variant_start()
        .transpose()
        .map_err(|e| {
            ParseError::InvalidFormat(format!("Invalid position in record {record_num}: {e}"))
        })?
        .ok_or_else(|| {
            ParseError::InvalidFormat(format!("Missing position in record {record_num}"))
        })?;
    let pos = i64::try_from(usize::from(position)).map_err(|_| {
        ParseError::InvalidFormat(format!("Position out of range in record {record_num}"))
    })?;

    let ids = record.ids();
    let id = ids.iter().next().unwrap_or(MISSING_ID);
    let mut variant = PanelVariant::new(ChromPos::new(chrom, pos), id);

    if n_samples > 0 {
        let samples = record.samples();
        let gt_index = samples.keys().iter().position(|k| k == key::GENOTYPE);
        // the raw text starts with the FORMAT column
        let columns = samples.as_ref().split_once('\t').map(|(_, rest)| rest);
        match (gt_index, columns) {
            (Some(gt_index), Some(columns)) => {
                variant = variant.with_genotypes(gt_index, columns);
            }
            (Some(_), None) => {
                return Err(ParseError::InvalidFormat(format!(
                    "Record {record_num} is missing sample columns"
                )));
            }
            (None, _) => {}
        }
    }

    Ok(Some(variant))
}

/// Decode the `GT` subfield of every sample column into dosage calls
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` if a genotype does not parse or the number
/// of sample columns differs from `n_samples`.
pub fn decode_genotypes(
    sample_fields: &str,
    gt_index: usize,
    n_samples: usize,
) -> Result<Vec<i8>, ParseError> {
    if n_samples == 0 {
        return Ok(Vec::new());
    }

    let mut calls = Vec::with_capacity(n_samples);
    for sample in sample_fields.split('\t') {
        // trailing fields may be dropped in VCF
        let gt = sample.split(':').nth(gt_index).unwrap_or(".");
        calls.push(decode_gt(gt)?);
    }

    if calls.len() != n_samples {
        return Err(ParseError::InvalidFormat(format!(
            "Expected {} sample columns, found {}",
            n_samples,
            calls.len()
        )));
    }

    Ok(calls)
}

fn decode_gt(gt: &str) -> Result<i8, ParseError> {
    if gt.is_empty() || gt == "." {
        return Ok(-1);
    }
    let genotype = Genotype::from_str(gt)
        .map_err(|e| ParseError::InvalidFormat(format!("Invalid genotype '{gt}': {e}")))?;

    let mut dosage: i8 = 0;
    for allele in genotype.as_ref() {
        match allele.position() {
            Some(0) => {}
            Some(_) => dosage = dosage.saturating_add(1),
            None => return Ok(-1),
        }
    }
    Ok(dosage)
}
