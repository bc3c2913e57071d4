//! TriSplit Core Library
//!
//! Splits triples of position-aligned sequences (reference read, uncorrected
//! read, corrected read) into synchronized segments, cut at k-mers unique in
//! and shared by all three. Anchor selection, bounded-gap chaining, and the
//! record/shard I/O layer live here; the `trisplit` binary is a thin driver.

pub mod anchor;
pub mod chain;
pub mod index;
pub mod io;
pub mod kmer;
pub mod pipeline;
pub mod split;
pub mod types;

// Re-export commonly used types and functions
pub use kmer::{KmerEncoder, MAX_K};
pub use pipeline::{split_batch, split_triple, SplitError, SplitParams, SplitResult};
pub use types::{Anchor, Occurrence, Record, RecordTriple, SegmentSet};

/// Version information for the TriSplit core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
