use std::ops::Range;

use crate::core::chrpos::ChromPos;
use crate::panel::view::SortedView;
use crate::scan::config::ScanConfig;
use crate::scan::ScanError;

/// Index range of one chromosome's records in a sorted view
pub fn chromosome_bounds<V: SortedView + ?Sized>(view: &V, chrom: i32) -> Range<usize> {
    let start = view.lower_bound(0..view.len(), ChromPos::chrom_start(chrom));
    let end = view.lower_bound(start..view.len(), ChromPos::chrom_end(chrom));
    start..end
}

/// One non-empty scanning window and its matching sub-ranges
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Window {
    pub chrom: i32,

    /// Window number along the chromosome, counting from 0
    pub index: i64,

    /// First base of the window (inclusive)
    pub start: i64,

    /// Last base of the window (exclusive)
    pub end: i64,

    /// Reference records with `start <= pos < end`
    pub ref_range: Range<usize>,

    /// Study records with `start - flank <= pos < end + flank`
    pub gwas_range: Range<usize>,
}

impl Window {
    pub fn n_ref(&self) -> usize {
        self.ref_range.len()
    }

    pub fn n_gwas(&self) -> usize {
        self.gwas_range.len()
    }
}

/// Iterator over the non-empty windows of one chromosome.
///
/// Both the region reporter and the imputation driver walk windows through this
/// type, so the two always see the same windows.
pub struct WindowPartitioner<'a, R: SortedView + ?Sized, G: SortedView + ?Sized> {
    reference: &'a R,
    gwas: &'a G,
    config: ScanConfig,
    chrom: i32,
    chrom_range: Range<usize>,
    next_index: i64,
    finished: bool,
}

impl<'a, R: SortedView + ?Sized, G: SortedView + ?Sized> WindowPartitioner<'a, R, G> {
    /// # Errors
    ///
    /// Returns `ScanError::Config` for an invalid config, or
    /// `ScanError::NegativePosition` if the chromosome's first reference record is
    /// below zero (windows start at 0 and could never reach it).
    pub fn new(
        reference: &'a R,
        gwas: &'a G,
        chrom: i32,
        config: ScanConfig,
    ) -> Result<Self, ScanError> {
        config.validate()?;

        let chrom_range = chromosome_bounds(reference, chrom);
        if !chrom_range.is_empty() {
            let first = reference.chrpos_at(chrom_range.start);
            if first.pos < 0 {
                return Err(ScanError::NegativePosition(first));
            }
        }

        Ok(Self {
            reference,
            gwas,
            config,
            chrom,
            chrom_range,
            next_index: 0,
            finished: false,
        })
    }

    /// Reference records on this chromosome
    pub fn chrom_range(&self) -> Range<usize> {
        self.chrom_range.clone()
    }

    pub fn chrom(&self) -> i32 {
        self.chrom
    }
}

impl<R: SortedView + ?Sized, G: SortedView + ?Sized> Iterator for WindowPartitioner<'_, R, G> {
    type Item = Window;

    fn next(&mut self) -> Option<Window> {
        let width = self.config.window_width;
        let flank = self.config.flanking_width;
        let chrom_end = self.chrom_range.end;

        while !self.finished {
            let index = self.next_index;
            let Some(start) = index.checked_mul(width) else {
                // past the last representable coordinate
                self.finished = true;
                break;
            };
            let end = start.checked_add(width);
            match end {
                Some(_) => self.next_index += 1,
                // no window can start after this one
                None => self.finished = true,
            }

            let w_begin = self
                .reference
                .lower_bound(self.chrom_range.clone(), ChromPos::new(self.chrom, start));
            if w_begin == chrom_end {
                self.finished = true;
                break;
            }
            let w_end = match end {
                Some(end) => self
                    .reference
                    .lower_bound(w_begin..chrom_end, ChromPos::new(self.chrom, end)),
                // the window reaches the end of the coordinate space
                None => chrom_end,
            };
            let end = end.unwrap_or(i64::MAX);

            if w_begin == w_end {
                // Empty window. Jump straight to the window holding the next
                // reference SNP; the windows in between are empty too.
                let next_pos = self.reference.chrpos_at(w_begin).pos;
                self.next_index = self.next_index.max(next_pos / width);
                continue;
            }

            let gwas_all = 0..self.gwas.len();
            let g_begin = self
                .gwas
                .lower_bound(
                    gwas_all.clone(),
                    ChromPos::new(self.chrom, start.saturating_sub(flank)),
                );
            let g_end = self.gwas.lower_bound(
                g_begin..gwas_all.end,
                ChromPos::new(self.chrom, end.saturating_add(flank)),
            );

            return Some(Window {
                chrom: self.chrom,
                index,
                start,
                end,
                ref_range: w_begin..w_end,
                gwas_range: g_begin..g_end,
            });
        }

        None
    }
}
