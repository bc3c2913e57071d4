//! Segment emission
//!
//! Cuts the three sequences at the realized chain's anchors. Every chain
//! anchor except the last closes one segment per stream ending just past the
//! anchored k-mer; a final tail segment runs to the end of each sequence.
//! Per stream, segment boundaries advance monotonically and the segments
//! concatenate back to the input exactly.

use crate::types::{Anchor, SegmentSet};

/// Cut the three sequences along `chain`.
///
/// `chain` holds indices into `anchors` in traversal order. A chain of
/// length 0 or 1 yields a single segment per stream covering the whole
/// sequence; a chain of length L yields L segments per stream.
pub fn split_at_anchors(
    reference: &[u8],
    uncorrected: &[u8],
    corrected: &[u8],
    anchors: &[Anchor],
    chain: &[usize],
    k: usize,
) -> SegmentSet {
    let mut set = SegmentSet::default();
    let mut cut_ref = 0usize;
    let mut cut_uncorr = 0usize;
    let mut cut_corr = 0usize;

    // The last chain anchor does not cut; the tail segment covers it.
    let cuts = if chain.len() > 1 {
        &chain[..chain.len() - 1]
    } else {
        &[][..]
    };

    for &idx in cuts {
        let anchor = &anchors[idx];
        set.reference
            .push(reference[cut_ref..anchor.ref_pos + k].to_vec());
        cut_ref = anchor.ref_pos + k;
        set.uncorrected
            .push(uncorrected[cut_uncorr..anchor.uncorr_pos + k].to_vec());
        cut_uncorr = anchor.uncorr_pos + k;
        set.corrected
            .push(corrected[cut_corr..anchor.corr_pos + k].to_vec());
        cut_corr = anchor.corr_pos + k;
    }

    set.reference.push(reference[cut_ref..].to_vec());
    set.uncorrected.push(uncorrected[cut_uncorr..].to_vec());
    set.corrected.push(corrected[cut_corr..].to_vec());
    set
}

#[cfg(test)]
mod tests {
    use super::*;

    fn concat(segments: &[Vec<u8>]) -> Vec<u8> {
        segments.iter().flatten().copied().collect()
    }

    #[test]
    fn test_empty_chain_emits_whole_sequences() {
        let set = split_at_anchors(b"ACGTACGT", b"ACGTA", b"ACGTACG", &[], &[], 3);
        assert_eq!(set.len(), 1);
        assert_eq!(set.reference[0], b"ACGTACGT");
        assert_eq!(set.uncorrected[0], b"ACGTA");
        assert_eq!(set.corrected[0], b"ACGTACG");
    }

    #[test]
    fn test_single_anchor_chain_emits_tail_only() {
        let anchors = vec![Anchor::new(2, 1, 3)];
        let set = split_at_anchors(b"ACGTACGT", b"ACGTACGT", b"ACGTACGT", &anchors, &[0], 3);
        assert_eq!(set.len(), 1);
        assert_eq!(set.reference[0], b"ACGTACGT");
    }

    #[test]
    fn test_cuts_and_tail() {
        //            0123456789
        let reference = b"AACCGGTTAA";
        let anchors = vec![Anchor::new(1, 2, 0), Anchor::new(5, 6, 4)];
        let set = split_at_anchors(reference, b"CAACCGGTTA", b"CCGGTTAAGG", &anchors, &[0, 1], 2);
        // Both chain anchors present, only the first cuts.
        assert_eq!(set.len(), 2);
        assert_eq!(set.reference[0], b"AAC");
        assert_eq!(set.reference[1], b"CGGTTAA");
        assert_eq!(set.uncorrected[0], b"CAAC");
        assert_eq!(set.uncorrected[1], b"CGGTTA");
        assert_eq!(set.corrected[0], b"CC");
        assert_eq!(set.corrected[1], b"GGTTAAGG");
    }

    #[test]
    fn test_roundtrip_many_cuts() {
        let reference = b"AAACCCGGGTTTAAACCC";
        let anchors: Vec<Anchor> = (0..5).map(|i| Anchor::new(i * 3, i * 3, i * 3)).collect();
        let chain: Vec<usize> = (0..5).collect();
        let set = split_at_anchors(reference, reference, reference, &anchors, &chain, 3);
        assert_eq!(set.len(), 5);
        assert_eq!(concat(&set.reference), reference.to_vec());
        assert_eq!(concat(&set.uncorrected), reference.to_vec());
        assert_eq!(concat(&set.corrected), reference.to_vec());
    }

    #[test]
    fn test_boundaries_monotonic() {
        let reference = b"ACGGTCAATGCCGTAGCGAT";
        let anchors = vec![Anchor::new(0, 1, 2), Anchor::new(6, 7, 8), Anchor::new(12, 13, 14)];
        let set = split_at_anchors(reference, reference, reference, &anchors, &[0, 1, 2], 4);
        assert_eq!(set.len(), 3);
        let lens: Vec<usize> = set.reference.iter().map(|s| s.len()).collect();
        assert_eq!(lens.iter().sum::<usize>(), reference.len());
        assert!(set.reference.iter().all(|s| !s.is_empty()));
    }
}
