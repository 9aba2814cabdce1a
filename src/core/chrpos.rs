use serde::{Deserialize, Serialize};

/// Chromosome numbers scanned for tag SNPs (autosomes only)
pub const AUTOSOMES: std::ops::RangeInclusive<i32> = 1..=22;

/// A genomic coordinate: chromosome number and base-pair position.
///
/// Ordering is by chromosome first, then position. The derived `Ord` relies on the
/// field order below, so `chrom` must stay first.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct ChromPos {
    pub chrom: i32,
    pub pos: i64,
}

impl ChromPos {
    /// Sentinel for a record whose position could not be resolved.
    /// Sorts before every real coordinate.
    pub const UNKNOWN: ChromPos = ChromPos { chrom: -1, pos: -1 };

    #[must_use]
    pub const fn new(chrom: i32, pos: i64) -> Self {
        Self { chrom, pos }
    }

    /// Smallest possible coordinate on a chromosome
    #[must_use]
    pub const fn chrom_start(chrom: i32) -> Self {
        Self {
            chrom,
            pos: i64::MIN,
        }
    }

    /// Largest possible coordinate on a chromosome
    #[must_use]
    pub const fn chrom_end(chrom: i32) -> Self {
        Self {
            chrom,
            pos: i64::MAX,
        }
    }

    #[must_use]
    pub fn is_unknown(&self) -> bool {
        *self == Self::UNKNOWN
    }
}

impl std::fmt::Display for ChromPos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_unknown() {
            write!(f, "unknown")
        } else {
            write!(f, "{}:{}", self.chrom, self.pos)
        }
    }
}

/// Parse a chromosome name into its number.
///
/// Accepts both UCSC (`chr1`) and NCBI (`1`) styles. Sex chromosomes and the
/// mitochondrion map to 23 (X), 24 (Y) and 25 (MT). Anything else (alt contigs,
/// scaffolds) returns `None`.
#[must_use]
pub fn parse_chromosome(name: &str) -> Option<i32> {
    let name = name.trim();
    let bare = name
        .strip_prefix("chr")
        .or_else(|| name.strip_prefix("CHR"))
        .or_else(|| name.strip_prefix("Chr"))
        .unwrap_or(name);

    match bare {
        "X" | "x" => Some(23),
        "Y" | "y" => Some(24),
        "M" | "MT" | "m" | "mt" => Some(25),
        _ => match bare.parse::<i32>() {
            Ok(n) if (1..=25).contains(&n) => Some(n),
            _ => None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering_is_chromosome_then_position() {
        let mut v = vec![
            ChromPos::new(2, 5),
            ChromPos::new(1, 300),
            ChromPos::UNKNOWN,
            ChromPos::new(1, 7),
        ];
        v.sort();
        assert_eq!(
            v,
            vec![
                ChromPos::UNKNOWN,
                ChromPos::new(1, 7),
                ChromPos::new(1, 300),
                ChromPos::new(2, 5),
            ]
        );
    }

    #[test]
    fn test_chromosome_sentinels_bracket_positions() {
        let c = ChromPos::new(3, 0);
        assert!(ChromPos::chrom_start(3) < c);
        assert!(c < ChromPos::chrom_end(3));
        assert!(ChromPos::chrom_end(2) < ChromPos::chrom_start(3));
        // unknown never falls inside a real chromosome's bracket
        assert!(ChromPos::UNKNOWN < ChromPos::chrom_start(1));
    }

    #[test]
    fn test_parse_chromosome() {
        assert_eq!(parse_chromosome("1"), Some(1));
        assert_eq!(parse_chromosome("chr22"), Some(22));
        assert_eq!(parse_chromosome("chrX"), Some(23));
        assert_eq!(parse_chromosome("Y"), Some(24));
        assert_eq!(parse_chromosome("chrM"), Some(25));
        assert_eq!(parse_chromosome("MT"), Some(25));
        assert_eq!(parse_chromosome("chr1_KI270706v1_random"), None);
        assert_eq!(parse_chromosome("26"), None);
        assert_eq!(parse_chromosome("0"), None);
        assert_eq!(parse_chromosome(""), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(ChromPos::new(1, 100).to_string(), "1:100");
        assert_eq!(ChromPos::UNKNOWN.to_string(), "unknown");
    }
}
