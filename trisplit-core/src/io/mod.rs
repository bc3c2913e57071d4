//! Record and shard I/O
//!
//! Readers for the two-line (header + sequence) record format, a lockstep
//! reader driving the three input streams together, and round-robin shard
//! writers for the segment output. Plumbing only; the pipeline itself never
//! touches a file.

pub mod records;
pub mod shards;

pub use records::{RecordReader, TripleReader};
pub use shards::ShardWriter;

use thiserror::Error;

/// Errors from the record and shard I/O layer.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("truncated record in {stream}: header {header:?} has no sequence line")]
    TruncatedRecord { stream: String, header: String },

    #[error("malformed record in {stream}: header {header:?} is followed by a blank line")]
    EmptySequence { stream: String, header: String },

    #[error("desynchronized inputs at record {record}: {detail}")]
    Desynchronized { record: u64, detail: String },

    #[error("shard count must be at least 1")]
    InvalidShardCount,
}

pub type IoResult<T> = Result<T, RecordError>;
