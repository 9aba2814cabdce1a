use std::ops::Range;

use crate::core::chrpos::ChromPos;
use crate::parsing::ParseError;

/// Read-only, randomly indexable sequence sorted ascending by [`ChromPos`]
pub trait SortedView {
    /// Total number of records
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Coordinate of the record at `index`
    fn chrpos_at(&self, index: usize) -> ChromPos;

    /// First index in `range` whose coordinate is not less than `key`.
    ///
    /// Returns `range.end` when every record in the range is smaller.
    fn lower_bound(&self, range: Range<usize>, key: ChromPos) -> usize {
        let (mut lo, mut hi) = (range.start, range.end);
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            if self.chrpos_at(mid) < key {
                lo = mid + 1;
            } else {
                hi = mid;
            }
        }
        lo
    }
}

/// Reference panel records: positions, names and per-sample genotype calls
pub trait GenotypeSource: SortedView {
    fn id_at(&self, index: usize) -> &str;

    fn n_samples(&self) -> usize;

    /// Decode the genotype calls of every sample at `index`.
    ///
    /// This is the expensive operation; callers go through
    /// [`crate::scan::cache::GenotypeCache`] rather than calling it directly.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::InvalidFormat` if the stored genotype text is malformed.
    fn genotypes_at(&self, index: usize) -> Result<Vec<i8>, ParseError>;
}

/// Association (study) records, whose positions may be unknown until reconciled
pub trait AssociationSource: SortedView {
    fn id_at(&self, index: usize) -> &str;

    /// Overwrite the coordinate at `index`. The view is unsorted afterwards until
    /// [`AssociationSource::sort_entries`] is called.
    fn set_chrpos_at(&mut self, index: usize, chrpos: ChromPos);

    /// Restore ascending order after positions have been filled in
    fn sort_entries(&mut self);

    /// Number of records still carrying [`ChromPos::UNKNOWN`]
    fn count_unknown(&self) -> usize {
        (0..self.len())
            .filter(|&i| self.chrpos_at(i).is_unknown())
            .count()
    }
}

impl SortedView for [ChromPos] {
    fn len(&self) -> usize {
        <[ChromPos]>::len(self)
    }

    fn chrpos_at(&self, index: usize) -> ChromPos {
        self[index]
    }
}

impl SortedView for Vec<ChromPos> {
    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn chrpos_at(&self, index: usize) -> ChromPos {
        self[index]
    }
}

/// A forward-only position inside a sub-range of a [`SortedView`]
pub struct Cursor<'a, V: SortedView + ?Sized> {
    view: &'a V,
    index: usize,
    end: usize,
}

impl<'a, V: SortedView + ?Sized> Cursor<'a, V> {
    pub fn new(view: &'a V, range: Range<usize>) -> Self {
        debug_assert!(range.start <= range.end && range.end <= view.len());
        Self {
            view,
            index: range.start,
            end: range.end,
        }
    }

    /// Coordinate under the cursor, or `None` once the range is exhausted
    pub fn current(&self) -> Option<ChromPos> {
        (self.index < self.end).then(|| self.view.chrpos_at(self.index))
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn advance(&mut self) {
        if self.index < self.end {
            self.index += 1;
        }
    }

    /// Move to the first record at or after the cursor that is not less than `key`
    pub fn seek(&mut self, key: ChromPos) {
        self.index = self.view.lower_bound(self.index..self.end, key);
    }
}
