//! Intersection of two sorted sub-ranges.
//!
//! Both cursors only move forward. On a mismatch the lagging side jumps with a
//! lower-bound search instead of stepping one record at a time, so a small window
//! of reference SNPs against a dense study range costs `O(r log g)`.
//!
//! Reference coordinates are unique. The study side may repeat a coordinate, and
//! each repeat that matches the reference is emitted once.

use crate::core::chrpos::ChromPos;
use crate::panel::view::{Cursor, SortedView};
use crate::scan::window::Window;
use std::cmp::Ordering;

/// Coordinates present in both ranges, ascending
pub fn intersect<R, G>(mut reference: Cursor<'_, R>, mut gwas: Cursor<'_, G>) -> Vec<ChromPos>
where
    R: SortedView + ?Sized,
    G: SortedView + ?Sized,
{
    let mut tags = Vec::new();

    while let (Some(rc), Some(gc)) = (reference.current(), gwas.current()) {
        match rc.cmp(&gc) {
            Ordering::Equal => {
                tags.push(gc);
                gwas.advance();
            }
            Ordering::Less => reference.seek(gc),
            Ordering::Greater => gwas.seek(rc),
        }
    }

    tags
}

/// Tag SNPs of one window
pub fn intersect_window<R, G>(reference: &R, gwas: &G, window: &Window) -> Vec<ChromPos>
where
    R: SortedView + ?Sized,
    G: SortedView + ?Sized,
{
    intersect(
        Cursor::new(reference, window.ref_range.clone()),
        Cursor::new(gwas, window.gwas_range.clone()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn cp(chrom: i32, pos: i64) -> ChromPos {
        ChromPos::new(chrom, pos)
    }

    fn on_chr1(pos: &[i64]) -> Vec<ChromPos> {
        pos.iter().map(|&p| cp(1, p)).collect()
    }

    fn run(r: &[ChromPos], g: &[ChromPos]) -> Vec<ChromPos> {
        intersect(Cursor::new(r, 0..r.len()), Cursor::new(g, 0..g.len()))
    }

    #[test]
    fn test_basic_intersection() {
        let r = on_chr1(&[1, 3, 5, 7, 9]);
        let g = on_chr1(&[2, 3, 4, 9, 10]);
        assert_eq!(run(&r, &g), on_chr1(&[3, 9]));
    }

    #[test]
    fn test_empty_sides() {
        let r = on_chr1(&[1, 2, 3]);
        let empty: Vec<ChromPos> = Vec::new();
        assert!(run(&r, &empty).is_empty());
        assert!(run(&empty, &r).is_empty());
    }

    #[test]
    fn test_disjoint_chromosomes() {
        let r = vec![cp(1, 10), cp(1, 20)];
        let g = vec![cp(2, 10), cp(2, 20)];
        assert!(run(&r, &g).is_empty());
    }

    #[test]
    fn test_matches_set_intersection() {
        let r = on_chr1(&[0, 4, 8, 12, 16, 20, 24, 28, 32, 36, 40]);
        let g = on_chr1(&[1, 2, 3, 4, 5, 12, 13, 14, 15, 16, 39, 40, 41]);

        let expected: Vec<ChromPos> = r
            .iter()
            .copied()
            .collect::<BTreeSet<_>>()
            .intersection(&g.iter().copied().collect::<BTreeSet<_>>())
            .copied()
            .collect();
        assert_eq!(run(&r, &g), expected);
    }

    #[test]
    fn test_repeated_study_coordinate_emits_each_match() {
        let r = on_chr1(&[5, 10, 15]);
        let g = on_chr1(&[10, 10, 11, 15]);
        assert_eq!(run(&r, &g), on_chr1(&[10, 10, 15]));
    }

    #[test]
    fn test_sub_ranges_only() {
        let r = on_chr1(&[1, 2, 3, 4, 5]);
        let g = on_chr1(&[1, 2, 3, 4, 5]);
        let tags = intersect(Cursor::new(&r, 1..3), Cursor::new(&g, 2..5));
        assert_eq!(tags, on_chr1(&[3]));
    }

    #[test]
    fn test_intersect_window() {
        let r = vec![cp(1, 100), cp(1, 250), cp(1, 260), cp(2, 50)];
        let g = vec![cp(1, 100), cp(1, 205), cp(1, 400)];
        let window = Window {
            chrom: 1,
            index: 0,
            start: 0,
            end: 200,
            ref_range: 0..1,
            gwas_range: 0..2,
        };
        assert_eq!(intersect_window(&r, &g, &window), vec![cp(1, 100)]);
    }
}
