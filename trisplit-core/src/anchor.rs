//! Anchor selection
//!
//! Intersects the three per-stream k-mer indices along the reference scan
//! order to produce the ordered anchor list fed to the chain solver. Anchors
//! are thinned so consecutive picks are spaced apart on the reference,
//! keeping the DP over them small on repetitive inputs.

use crate::index::{scan_windows, KmerIndex};
use crate::kmer::KmerEncoder;
use crate::pipeline::SplitResult;
use crate::types::Anchor;

/// Minimum reference distance between consecutive emitted anchors.
pub const DEFAULT_MIN_SPACING: usize = 16;

/// Collect anchors by scanning the reference left to right.
///
/// A window anchors when its key is unique in all three indices. The window
/// at position 0 is emitted unconditionally when eligible; any later window
/// only when more than `min_spacing` reference positions have elapsed since
/// the last emitted anchor. The result is strictly increasing in `ref_pos`.
pub fn collect_anchors(
    reference: &[u8],
    encoder: &KmerEncoder,
    ref_index: &KmerIndex,
    uncorr_index: &KmerIndex,
    corr_index: &KmerIndex,
    min_spacing: usize,
) -> SplitResult<Vec<Anchor>> {
    let mut anchors = Vec::new();
    let mut last_emitted = 0usize;
    scan_windows(reference, encoder, |code, pos| {
        // The corrected index is the end of the cascade, but uniqueness in
        // each individual stream is still required for the positions read
        // out here to be meaningful.
        let (Some(ref_pos), Some(uncorr_pos), Some(corr_pos)) = (
            ref_index.unique_pos(code),
            uncorr_index.unique_pos(code),
            corr_index.unique_pos(code),
        ) else {
            return;
        };
        debug_assert_eq!(ref_pos, pos);
        if pos == 0 || pos - last_emitted > min_spacing {
            anchors.push(Anchor::new(ref_pos, uncorr_pos, corr_pos));
            last_emitted = pos;
        }
    })?;
    Ok(anchors)
}
