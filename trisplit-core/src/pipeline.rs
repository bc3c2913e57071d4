//! Per-record splitting pipeline
//!
//! Composes encoder → cascaded indices → anchor builder → chain solver →
//! splitter into one pure function of the three input sequences. Records
//! are independent, so batches parallelize freely; only output writing
//! needs any ordering discipline.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::anchor::{collect_anchors, DEFAULT_MIN_SPACING};
use crate::chain::{best_chain, DEFAULT_MAX_GAP};
use crate::index::KmerIndex;
use crate::kmer::KmerEncoder;
use crate::split::split_at_anchors;
use crate::types::{RecordTriple, SegmentSet};

/// Errors from the splitting pipeline.
#[derive(Debug, Error)]
pub enum SplitError {
    #[error("invalid k-mer length {k}: must be between 1 and {max}")]
    InvalidKmerLength { k: usize, max: usize },

    #[error("sequence of length {len} is shorter than k = {k}")]
    UndersizedSequence { len: usize, k: usize },
}

pub type SplitResult<T> = Result<T, SplitError>;

/// Tunable parameters of the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplitParams {
    /// Anchor k-mer length.
    pub k: usize,
    /// Minimum reference distance between consecutive anchors.
    pub min_spacing: usize,
    /// Chain links must advance by less than this in every coordinate.
    pub max_gap: usize,
}

impl Default for SplitParams {
    fn default() -> Self {
        Self {
            k: 15,
            min_spacing: DEFAULT_MIN_SPACING,
            max_gap: DEFAULT_MAX_GAP,
        }
    }
}

/// Split one record triple into aligned segments.
///
/// Pure function of the inputs: identical sequences and parameters always
/// produce identical segments. Fails when `k` is out of range or any of the
/// three sequences is shorter than `k`.
pub fn split_triple(
    reference: &[u8],
    uncorrected: &[u8],
    corrected: &[u8],
    params: &SplitParams,
) -> SplitResult<SegmentSet> {
    let encoder = KmerEncoder::new(params.k)?;

    let ref_index = KmerIndex::build(reference, &encoder)?;
    let uncorr_index = KmerIndex::build_filtered(uncorrected, &encoder, &ref_index)?;
    let corr_index = KmerIndex::build_filtered(corrected, &encoder, &uncorr_index)?;

    let anchors = collect_anchors(
        reference,
        &encoder,
        &ref_index,
        &uncorr_index,
        &corr_index,
        params.min_spacing,
    )?;
    let chain = best_chain(&anchors, params.max_gap);
    log::debug!(
        "ref len {}: {} shared kmers, {} anchors, chain length {}",
        reference.len(),
        corr_index.len(),
        anchors.len(),
        chain.len()
    );

    Ok(split_at_anchors(
        reference,
        uncorrected,
        corrected,
        &anchors,
        &chain,
        params.k,
    ))
}

/// Split a batch of records in parallel, preserving record order.
pub fn split_batch(records: &[RecordTriple], params: &SplitParams) -> Vec<SplitResult<SegmentSet>> {
    records
        .par_iter()
        .map(|record| {
            split_triple(
                &record.reference.seq,
                &record.uncorrected.seq,
                &record.corrected.seq,
                params,
            )
        })
        .collect()
}
