//! Sorted sequence views over the two input datasets.
//!
//! Everything downstream works against the traits in [`view`]:
//!
//! - [`SortedView`]: random access plus lower-bound search by coordinate
//! - [`GenotypeSource`]: the reference panel, with per-sample genotype decoding
//! - [`AssociationSource`]: the study dataset, whose positions can be filled in
//!   and re-sorted once
//! - [`Cursor`]: current/advance/seek over a sub-range of a view
//!
//! [`reference::ReferencePanel`] and [`gwas::GwasDataset`] are the in-memory
//! implementations built by the parsers.
//!
//! [`SortedView`]: view::SortedView
//! [`GenotypeSource`]: view::GenotypeSource
//! [`AssociationSource`]: view::AssociationSource
//! [`Cursor`]: view::Cursor

pub mod gwas;
pub mod reference;
pub mod view;
