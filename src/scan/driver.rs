use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

use crate::core::chrpos::{ChromPos, AUTOSOMES};
use crate::panel::view::{GenotypeSource, SortedView};
use crate::scan::cache::{CacheStats, GenotypeCache};
use crate::scan::config::ScanConfig;
use crate::scan::intersect::intersect_window;
use crate::scan::window::{Window, WindowPartitioner};
use crate::scan::ScanError;
use crate::utils::validation::first_unsorted;

/// Counts for one non-empty window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WindowReport {
    pub chrom: i32,
    pub start: i64,
    pub end: i64,

    /// Reference SNPs inside `[start, end)`
    pub ref_snps: usize,

    /// Study SNPs inside the flanked window
    pub gwas_snps: usize,

    /// SNPs in both, usable as tags
    pub tag_snps: usize,
}

impl WindowReport {
    fn new(window: &Window, tag_snps: usize) -> Self {
        Self {
            chrom: window.chrom,
            start: window.start,
            end: window.end,
            ref_snps: window.n_ref(),
            gwas_snps: window.n_gwas(),
            tag_snps,
        }
    }
}

/// Tags of one window with their reference genotypes.
///
/// `genotypes[i]` holds one call per reference sample for `tags[i]`. Rows are
/// shared with the cache, so a repeated tag costs no second decode.
#[derive(Debug, Clone)]
pub struct TagBatch {
    pub report: WindowReport,
    pub tags: Vec<ChromPos>,
    pub genotypes: Vec<Arc<[i8]>>,
}

impl TagBatch {
    /// Matrix shape as (tags, samples)
    pub fn shape(&self) -> (usize, usize) {
        (self.tags.len(), self.genotypes.first().map_or(0, |row| row.len()))
    }
}

fn check_sorted<V: SortedView + ?Sized>(view: &V, name: &'static str) -> Result<(), ScanError> {
    match first_unsorted((0..view.len()).map(|i| view.chrpos_at(i))) {
        Some((before, after)) => Err(ScanError::Unsorted {
            view: name,
            before,
            after,
        }),
        None => Ok(()),
    }
}

/// Per-window statistics over chromosomes 1 to 22, without genotype lookups
pub struct RegionReporter<'a, R: SortedView + ?Sized, G: SortedView + ?Sized> {
    reference: &'a R,
    gwas: &'a G,
    config: ScanConfig,
}

impl<'a, R: SortedView + ?Sized, G: SortedView + ?Sized> RegionReporter<'a, R, G> {
    /// # Errors
    ///
    /// Returns `ScanError::Config` for an invalid config, or `ScanError::Unsorted`
    /// if either view is out of order.
    pub fn new(reference: &'a R, gwas: &'a G, config: ScanConfig) -> Result<Self, ScanError> {
        config.validate()?;
        check_sorted(reference, "reference panel")?;
        check_sorted(gwas, "study dataset")?;
        Ok(Self {
            reference,
            gwas,
            config,
        })
    }

    pub fn config(&self) -> ScanConfig {
        self.config
    }

    /// Reports for one chromosome, in window order
    ///
    /// # Errors
    ///
    /// Returns `ScanError::NegativePosition` if the chromosome starts below zero.
    pub fn chromosome_reports(&self, chrom: i32) -> Result<Vec<WindowReport>, ScanError> {
        let windows = WindowPartitioner::new(self.reference, self.gwas, chrom, self.config)?;
        Ok(windows
            .map(|w| {
                let tags = intersect_window(self.reference, self.gwas, &w);
                WindowReport::new(&w, tags.len())
            })
            .collect())
    }

    /// Hand every window report to `sink`, chromosome by chromosome
    ///
    /// # Errors
    ///
    /// See [`RegionReporter::chromosome_reports`].
    pub fn run(&self, mut sink: impl FnMut(WindowReport)) -> Result<(), ScanError> {
        for chrom in AUTOSOMES {
            let reports = self.chromosome_reports(chrom)?;
            if !reports.is_empty() {
                debug!(chrom, windows = reports.len(), "Scanned chromosome");
            }
            reports.into_iter().for_each(&mut sink);
        }
        Ok(())
    }

    /// # Errors
    ///
    /// See [`RegionReporter::chromosome_reports`].
    pub fn collect_reports(&self) -> Result<Vec<WindowReport>, ScanError> {
        let mut reports = Vec::new();
        self.run(|r| reports.push(r))?;
        Ok(reports)
    }
}

/// Walks the same windows as [`RegionReporter`] and assembles each window's tag
/// genotype matrix through a per-chromosome [`GenotypeCache`]
pub struct ImputationDriver<'a, R: GenotypeSource + ?Sized, G: SortedView + ?Sized> {
    reference: &'a R,
    gwas: &'a G,
    config: ScanConfig,
}

impl<'a, R: GenotypeSource + ?Sized, G: SortedView + ?Sized> ImputationDriver<'a, R, G> {
    /// # Errors
    ///
    /// See [`RegionReporter::new`].
    pub fn new(reference: &'a R, gwas: &'a G, config: ScanConfig) -> Result<Self, ScanError> {
        config.validate()?;
        check_sorted(reference, "reference panel")?;
        check_sorted(gwas, "study dataset")?;
        Ok(Self {
            reference,
            gwas,
            config,
        })
    }

    /// Hand every window's [`TagBatch`] to `sink` and return the summed cache
    /// statistics.
    ///
    /// # Errors
    ///
    /// Returns `ScanError::NegativePosition` for a chromosome starting below zero,
    /// or `ScanError::Genotype` if a tag's genotypes cannot be decoded.
    pub fn run(&self, mut sink: impl FnMut(TagBatch)) -> Result<CacheStats, ScanError> {
        let mut total = CacheStats::default();

        for chrom in AUTOSOMES {
            let windows = WindowPartitioner::new(self.reference, self.gwas, chrom, self.config)?;
            if windows.chrom_range().is_empty() {
                continue;
            }

            let mut cache = GenotypeCache::for_chromosome(self.reference, chrom);
            let mut n_windows = 0usize;

            for w in windows {
                let tags = intersect_window(self.reference, self.gwas, &w);
                let genotypes = cache.lookup_all(&tags)?;
                n_windows += 1;
                sink(TagBatch {
                    report: WindowReport::new(&w, tags.len()),
                    tags,
                    genotypes,
                });
            }

            let stats = cache.stats();
            debug!(
                chrom,
                windows = n_windows,
                cached = cache.len(),
                hits = stats.hits,
                misses = stats.misses,
                "Assembled tag genotypes"
            );
            total += stats;
        }

        Ok(total)
    }
}
