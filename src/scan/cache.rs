use serde::Serialize;
use std::collections::HashMap;
use std::ops::{AddAssign, Range};
use std::sync::Arc;

use tracing::debug;

use crate::core::chrpos::ChromPos;
use crate::panel::view::GenotypeSource;
#[cfg(test)]
use crate::panel::view::SortedView;
use crate::scan::window::chromosome_bounds;
use crate::scan::ScanError;

/// Hit and miss counts for a [`GenotypeCache`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

impl AddAssign for CacheStats {
    fn add_assign(&mut self, other: Self) {
        self.hits += other.hits;
        self.misses += other.misses;
    }
}

/// Memo of decoded reference genotypes for one chromosome.
///
/// A study that repeats a position asks for the same tag more than once. Each
/// coordinate is decoded at most once per chromosome. Looking up a coordinate on a
/// different chromosome clears the cache first, so memory stays bounded by one
/// chromosome's worth of genotypes.
pub struct GenotypeCache<'a, G: GenotypeSource + ?Sized> {
    source: &'a G,
    chrom: Option<i32>,
    bounds: Range<usize>,
    entries: HashMap<ChromPos, Arc<[i8]>>,
    stats: CacheStats,
}

impl<'a, G: GenotypeSource + ?Sized> GenotypeCache<'a, G> {
    pub fn new(source: &'a G) -> Self {
        Self {
            source,
            chrom: None,
            bounds: 0..0,
            entries: HashMap::new(),
            stats: CacheStats::default(),
        }
    }

    pub fn for_chromosome(source: &'a G, chrom: i32) -> Self {
        let mut cache = Self::new(source);
        cache.reset(chrom);
        cache
    }

    /// Drop every entry and bind the cache to `chrom`. Statistics are kept.
    pub fn reset(&mut self, chrom: i32) {
        if !self.entries.is_empty() {
            debug!(
                from = ?self.chrom,
                to = chrom,
                dropped = self.entries.len(),
                "Clearing genotype cache"
            );
        }
        self.entries.clear();
        self.chrom = Some(chrom);
        self.bounds = chromosome_bounds(self.source, chrom);
    }

    /// Chromosome the cache currently holds, if any lookup or reset has happened
    pub fn chromosome(&self) -> Option<i32> {
        self.chrom
    }

    /// Genotype calls for the reference record at `chrpos`.
    ///
    /// # Errors
    ///
    /// Returns `ScanError::MissingCoordinate` if the reference panel has no record
    /// at `chrpos`, or `ScanError::Genotype` if the record cannot be decoded.
    pub fn lookup(&mut self, chrpos: ChromPos) -> Result<Arc<[i8]>, ScanError> {
        if self.chrom != Some(chrpos.chrom) {
            self.reset(chrpos.chrom);
        }

        if let Some(genotypes) = self.entries.get(&chrpos) {
            self.stats.hits += 1;
            return Ok(Arc::clone(genotypes));
        }

        let index = self.source.lower_bound(self.bounds.clone(), chrpos);
        if index == self.bounds.end || self.source.chrpos_at(index) != chrpos {
            return Err(ScanError::MissingCoordinate(chrpos));
        }

        let genotypes: Arc<[i8]> = self.source.genotypes_at(index)?.into();
        self.stats.misses += 1;
        self.entries.insert(chrpos, Arc::clone(&genotypes));
        Ok(genotypes)
    }

    /// Look up several coordinates in order
    ///
    /// # Errors
    ///
    /// Stops at the first failed lookup; see [`GenotypeCache::lookup`].
    pub fn lookup_all(&mut self, chrpos: &[ChromPos]) -> Result<Vec<Arc<[i8]>>, ScanError> {
        chrpos.iter().map(|&c| self.lookup(c)).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }
}
