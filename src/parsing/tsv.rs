use std::io::BufRead;
use std::path::Path;

use tracing::debug;

use crate::core::chrpos::{parse_chromosome, ChromPos};
use crate::core::variant::GwasVariant;
use crate::panel::gwas::GwasDataset;
use crate::parsing::{open_text, ParseError};

const ID_COLUMNS: &[&str] = &["snp", "rsid", "id", "snpid", "markername"];
const CHROM_COLUMNS: &[&str] = &["chr", "chrom", "chromosome", "#chrom"];
const POS_COLUMNS: &[&str] = &["pos", "bp", "position"];
const Z_COLUMNS: &[&str] = &["z", "zscore", "z_score"];

/// Column indices resolved from the header row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Columns {
    id: usize,
    chrom: Option<usize>,
    pos: Option<usize>,
    z: Option<usize>,
}

impl Columns {
    fn from_header(fields: &[&str]) -> Result<Self, ParseError> {
        let find = |names: &[&str]| {
            fields
                .iter()
                .position(|f| names.contains(&f.trim().to_lowercase().as_str()))
        };

        let id = find(ID_COLUMNS).ok_or_else(|| {
            ParseError::MissingColumn(format!("identifier (one of {})", ID_COLUMNS.join(", ")))
        })?;

        Ok(Self {
            id,
            chrom: find(CHROM_COLUMNS),
            pos: find(POS_COLUMNS),
            z: find(Z_COLUMNS),
        })
    }
}

/// Pick the delimiter from the file name: comma for `.csv`/`.csv.gz`, tab otherwise
pub fn delimiter_for(path: &Path) -> char {
    let name = path.to_string_lossy().to_lowercase();
    let name = name
        .strip_suffix(".gz")
        .or_else(|| name.strip_suffix(".bgz"))
        .unwrap_or(&name);
    if name.ends_with(".csv") {
        ','
    } else {
        '\t'
    }
}

/// Parse a summary statistics file (plain or gzipped)
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, `ParseError::MissingColumn`
/// if no identifier column is found, or `ParseError::InvalidFormat` for
/// malformed rows.
pub fn parse_gwas_file(path: &Path, delimiter: char) -> Result<GwasDataset, ParseError> {
    let reader = open_text(path)?;
    parse_gwas_reader(reader, delimiter)
}

/// Parse summary statistics text
///
/// # Errors
///
/// See [`parse_gwas_file`].
pub fn parse_gwas_text(text: &str, delimiter: char) -> Result<GwasDataset, ParseError> {
    parse_gwas_reader(text.as_bytes(), delimiter)
}

/// Parse summary statistics from any buffered reader
///
/// # Errors
///
/// See [`parse_gwas_file`].
pub fn parse_gwas_reader<R: BufRead>(
    reader: R,
    delimiter: char,
) -> Result<GwasDataset, ParseError> {
    let mut columns: Option<Columns> = None;
    let mut records = Vec::new();

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim_end_matches('\r');
        // Line numbers in errors are 1-based for user friendliness
        let line_num = i + 1;

        if line.trim().is_empty() || line.starts_with("##") {
            continue;
        }

        let fields: Vec<&str> = line.split(delimiter).collect();

        let Some(cols) = columns else {
            // first non-comment line is the header, even if it starts with '#'
            columns = Some(Columns::from_header(&fields)?);
            continue;
        };

        if line.starts_with('#') {
            continue;
        }

        records.push(parse_row(&fields, cols, line_num)?);
    }

    if columns.is_none() {
        return Err(ParseError::InvalidFormat(
            "No header row found in summary statistics".to_string(),
        ));
    }

    debug!(records = records.len(), "Read summary statistics");
    Ok(GwasDataset::new(records))
}

fn parse_row(fields: &[&str], cols: Columns, line_num: usize) -> Result<GwasVariant, ParseError> {
    let field = |idx: usize| fields.get(idx).map(|s| s.trim());

    let id = field(cols.id).filter(|s| !s.is_empty()).ok_or_else(|| {
        ParseError::InvalidFormat(format!("Line {line_num} has no identifier"))
    })?;

    let chrom = cols
        .chrom
        .and_then(field)
        .filter(|s| !is_missing(s))
        .and_then(parse_chromosome);

    let pos = match cols.pos.and_then(field).filter(|s| !is_missing(s)) {
        Some(s) => Some(s.parse::<i64>().map_err(|_| {
            ParseError::InvalidFormat(format!("Invalid position on line {line_num}: '{s}'"))
        })?),
        None => None,
    };

    let chrpos = match (chrom, pos) {
        (Some(chrom), Some(pos)) if pos >= 0 => ChromPos::new(chrom, pos),
        _ => ChromPos::UNKNOWN,
    };

    let mut record = GwasVariant::new(id, chrpos);
    if let Some(z) = cols
        .z
        .and_then(field)
        .filter(|s| !is_missing(s))
        .and_then(|s| s.parse::<f64>().ok())
    {
        record = record.with_z(z);
    }

    Ok(record)
}

fn is_missing(s: &str) -> bool {
    s.is_empty() || s == "." || s.eq_ignore_ascii_case("na") || s.eq_ignore_ascii_case("nan")
}
