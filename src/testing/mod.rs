//! Testing support for the review pipeline
//!
//! Provides:
//! - Seeded review / polarity generators
//! - Dataset writers for producing sample TSV files

pub mod generators;

pub use generators::{write_dataset, ReviewGenerator};
