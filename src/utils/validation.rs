//! Centralized validation helpers for input records.

use crate::core::chrpos::ChromPos;
use crate::parsing::ParseError;

/// Return the first coordinate that appears more than once in a sorted sequence.
///
/// # Examples
///
/// ```
/// use tag_scan::core::chrpos::ChromPos;
/// use tag_scan::utils::validation::first_duplicate;
///
/// let v = [ChromPos::new(1, 5), ChromPos::new(1, 9), ChromPos::new(1, 9)];
/// assert_eq!(first_duplicate(v.iter().copied()), Some(ChromPos::new(1, 9)));
/// assert_eq!(first_duplicate(v[..2].iter().copied()), None);
/// ```
#[must_use]
pub fn first_duplicate(sorted: impl IntoIterator<Item = ChromPos>) -> Option<ChromPos> {
    let mut prev: Option<ChromPos> = None;
    for chrpos in sorted {
        if prev == Some(chrpos) {
            return Some(chrpos);
        }
        prev = Some(chrpos);
    }
    None
}

/// Check that a sequence is ascending (non-decreasing).
/// Returns the first out-of-order pair, if any.
#[must_use]
pub fn first_unsorted(seq: impl IntoIterator<Item = ChromPos>) -> Option<(ChromPos, ChromPos)> {
    let mut prev: Option<ChromPos> = None;
    for chrpos in seq {
        if let Some(p) = prev {
            if chrpos < p {
                return Some((p, chrpos));
            }
        }
        prev = Some(chrpos);
    }
    None
}

/// Reject reference records with negative positions.
///
/// Windows start at position 0, so a negative position could never be scanned.
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` naming the coordinate.
pub fn check_non_negative(chrpos: ChromPos) -> Result<(), ParseError> {
    if chrpos.pos < 0 {
        return Err(ParseError::InvalidFormat(format!(
            "Negative position {} on chromosome {}",
            chrpos.pos, chrpos.chrom
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_duplicate() {
        let v = vec![
            ChromPos::new(1, 1),
            ChromPos::new(1, 2),
            ChromPos::new(2, 2),
            ChromPos::new(2, 2),
            ChromPos::new(3, 3),
            ChromPos::new(3, 3),
        ];
        assert_eq!(first_duplicate(v), Some(ChromPos::new(2, 2)));
        assert_eq!(first_duplicate(Vec::new()), None);
        // same position on different chromosomes is not a duplicate
        assert_eq!(
            first_duplicate(vec![ChromPos::new(1, 2), ChromPos::new(2, 2)]),
            None
        );
    }

    #[test]
    fn test_first_unsorted() {
        let sorted = vec![ChromPos::new(1, 1), ChromPos::new(1, 1), ChromPos::new(2, 0)];
        assert_eq!(first_unsorted(sorted), None);

        let unsorted = vec![ChromPos::new(2, 0), ChromPos::new(1, 5)];
        assert_eq!(
            first_unsorted(unsorted),
            Some((ChromPos::new(2, 0), ChromPos::new(1, 5)))
        );
    }

    #[test]
    fn test_check_non_negative() {
        assert!(check_non_negative(ChromPos::new(1, 0)).is_ok());
        assert!(check_non_negative(ChromPos::new(1, -1)).is_err());
    }
}
