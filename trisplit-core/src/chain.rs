//! Bounded-gap anchor chaining
//!
//! Selects the longest subsequence of anchors whose consecutive picks
//! advance strictly, and by less than a gap bound, in all three coordinate
//! spaces. A bottom-up dynamic program over the ref-sorted anchor list: an
//! anchor's best chain depends only on later anchors, so one reverse pass
//! fills a (length, successor) table and the realized chain is read off by
//! following successor links from the global best start.

use crate::types::Anchor;

/// Consecutive chain anchors must advance by less than this in every
/// coordinate.
pub const DEFAULT_MAX_GAP: usize = 5000;

/// True when `b` is a valid chain successor of `a`.
fn links(a: &Anchor, b: &Anchor, max_gap: usize) -> bool {
    let forward = |from: usize, to: usize| to > from && to - from < max_gap;
    forward(a.ref_pos, b.ref_pos)
        && forward(a.uncorr_pos, b.uncorr_pos)
        && forward(a.corr_pos, b.corr_pos)
}

/// Compute the longest bounded-gap chain over `anchors`.
///
/// `anchors` must be sorted by `ref_pos` ascending (the builder guarantees
/// this); sortedness lets the successor scan stop at the first candidate
/// whose ref-distance reaches `max_gap`. Returns anchor indices in chain
/// order. Ties on chain length keep the earliest-starting chain. An empty
/// anchor list yields an empty chain.
pub fn best_chain(anchors: &[Anchor], max_gap: usize) -> Vec<usize> {
    let n = anchors.len();
    if n == 0 {
        return Vec::new();
    }
    debug_assert!(
        anchors.windows(2).all(|w| w[0].ref_pos <= w[1].ref_pos),
        "anchors must be sorted by ref_pos"
    );

    let mut length = vec![1usize; n];
    let mut successor: Vec<Option<usize>> = vec![None; n];

    for i in (0..n).rev() {
        for j in i + 1..n {
            if anchors[j].ref_pos - anchors[i].ref_pos >= max_gap {
                // Sorted by ref_pos: every later candidate is at least this
                // far away too. The other two coordinates give no such
                // guarantee and are checked per candidate.
                break;
            }
            if links(&anchors[i], &anchors[j], max_gap) && length[j] + 1 > length[i] {
                length[i] = length[j] + 1;
                successor[i] = Some(j);
            }
        }
    }

    let mut start = 0;
    for i in 1..n {
        if length[i] > length[start] {
            start = i;
        }
    }

    let mut chain = Vec::with_capacity(length[start]);
    let mut current = Some(start);
    while let Some(idx) = current {
        chain.push(idx);
        current = successor[idx];
    }
    chain
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diagonal(positions: &[usize]) -> Vec<Anchor> {
        positions
            .iter()
            .map(|&p| Anchor::new(p, p, p))
            .collect()
    }

    fn assert_valid_chain(anchors: &[Anchor], chain: &[usize], max_gap: usize) {
        for pair in chain.windows(2) {
            let (a, b) = (&anchors[pair[0]], &anchors[pair[1]]);
            assert!(links(a, b, max_gap), "invalid link {:?} -> {:?}", a, b);
        }
    }

    #[test]
    fn test_empty_and_singleton() {
        assert!(best_chain(&[], DEFAULT_MAX_GAP).is_empty());
        let one = diagonal(&[10]);
        assert_eq!(best_chain(&one, DEFAULT_MAX_GAP), vec![0]);
    }

    #[test]
    fn test_full_diagonal_chains() {
        let anchors = diagonal(&[0, 100, 200, 300]);
        let chain = best_chain(&anchors, DEFAULT_MAX_GAP);
        assert_eq!(chain, vec![0, 1, 2, 3]);
        assert_valid_chain(&anchors, &chain, DEFAULT_MAX_GAP);
    }

    #[test]
    fn test_gap_bound_excludes_far_anchor() {
        // 0 -> 6000 exceeds the bound; the best chain is the dense pair.
        let anchors = diagonal(&[0, 100, 6000]);
        let chain = best_chain(&anchors, DEFAULT_MAX_GAP);
        assert_eq!(chain, vec![0, 1]);
    }

    #[test]
    fn test_gap_bound_is_strict() {
        // A distance of exactly max_gap must not link.
        let anchors = diagonal(&[0, DEFAULT_MAX_GAP]);
        let chain = best_chain(&anchors, DEFAULT_MAX_GAP);
        assert_eq!(chain.len(), 1);
    }

    #[test]
    fn test_all_coordinates_must_advance() {
        // Ref and uncorrected advance but corrected goes backwards.
        let anchors = vec![Anchor::new(0, 0, 100), Anchor::new(50, 50, 20)];
        let chain = best_chain(&anchors, DEFAULT_MAX_GAP);
        assert_eq!(chain.len(), 1);

        // A stalled coordinate is just as invalid.
        let anchors = vec![Anchor::new(0, 0, 40), Anchor::new(50, 50, 40)];
        assert_eq!(best_chain(&anchors, DEFAULT_MAX_GAP).len(), 1);
    }

    #[test]
    fn test_off_diagonal_coordinate_checked_past_break() {
        // Ref distances stay small, so the prefix prune never fires, but the
        // uncorrected coordinate jump still disqualifies the middle anchor.
        let anchors = vec![
            Anchor::new(0, 0, 0),
            Anchor::new(10, 9000, 10),
            Anchor::new(20, 20, 20),
        ];
        let chain = best_chain(&anchors, DEFAULT_MAX_GAP);
        assert_eq!(chain, vec![0, 2]);
    }

    #[test]
    fn test_tie_keeps_earliest_start() {
        // Two disjoint chains of equal length; the earlier-indexed start
        // must win.
        let anchors = vec![
            Anchor::new(0, 0, 0),
            Anchor::new(10, 10, 10),
            Anchor::new(20000, 0, 0),
            Anchor::new(20010, 10, 10),
        ];
        let chain = best_chain(&anchors, DEFAULT_MAX_GAP);
        assert_eq!(chain, vec![0, 1]);
    }

    #[test]
    #[should_panic(expected = "sorted by ref_pos")]
    fn test_unsorted_anchors_rejected() {
        best_chain(&diagonal(&[100, 0]), DEFAULT_MAX_GAP);
    }

    #[test]
    fn test_longest_not_necessarily_from_first_anchor() {
        // The first anchor is isolated; the winning chain starts later.
        let anchors = vec![
            Anchor::new(0, 9000, 9000),
            Anchor::new(100, 100, 100),
            Anchor::new(200, 200, 200),
            Anchor::new(300, 300, 300),
        ];
        let chain = best_chain(&anchors, DEFAULT_MAX_GAP);
        assert_eq!(chain, vec![1, 2, 3]);
    }
}
