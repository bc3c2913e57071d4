//! Per-sequence k-mer occurrence index
//!
//! Maps every k-mer of a sequence to its first occurrence position, demoting
//! keys that recur to [`Occurrence::Ambiguous`]. A filtered build restricts
//! the index to keys still unique in a prior index, which is how the
//! reference → uncorrected → corrected cascade narrows the candidate set to
//! k-mers unique in, and shared by, every stream seen so far.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::kmer::KmerEncoder;
use crate::pipeline::{SplitError, SplitResult};
use crate::types::{KmerCode, Occurrence, SeqPos};

#[derive(Debug, Clone, Default)]
pub struct KmerIndex {
    map: HashMap<KmerCode, Occurrence>,
}

impl KmerIndex {
    /// Index every window of `seq`.
    pub fn build(seq: &[u8], encoder: &KmerEncoder) -> SplitResult<Self> {
        let mut index = Self::default();
        scan_windows(seq, encoder, |code, pos| index.observe(code, pos))?;
        Ok(index)
    }

    /// Index only the windows whose key is present and unique in `prior`.
    ///
    /// Keys ambiguous in `prior` never enter this index; keys unique in
    /// `prior` but repeated in `seq` are recorded here as ambiguous.
    pub fn build_filtered(
        seq: &[u8],
        encoder: &KmerEncoder,
        prior: &KmerIndex,
    ) -> SplitResult<Self> {
        let mut index = Self::default();
        scan_windows(seq, encoder, |code, pos| {
            if prior.get(code).is_some_and(|occ| occ.is_unique()) {
                index.observe(code, pos);
            }
        })?;
        Ok(index)
    }

    fn observe(&mut self, code: KmerCode, pos: SeqPos) {
        match self.map.entry(code) {
            Entry::Vacant(entry) => {
                entry.insert(Occurrence::Unique(pos));
            }
            Entry::Occupied(mut entry) => {
                entry.insert(Occurrence::Ambiguous);
            }
        }
    }

    pub fn get(&self, code: KmerCode) -> Option<Occurrence> {
        self.map.get(&code).copied()
    }

    /// Position of `code` if it occurs exactly once.
    pub fn unique_pos(&self, code: KmerCode) -> Option<SeqPos> {
        self.get(code).and_then(|occ| occ.unique_pos())
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Visit every k-length window of `seq` with its code and start position.
pub(crate) fn scan_windows(
    seq: &[u8],
    encoder: &KmerEncoder,
    mut visit: impl FnMut(KmerCode, SeqPos),
) -> SplitResult<()> {
    let k = encoder.k();
    if seq.len() < k {
        return Err(SplitError::UndersizedSequence { len: seq.len(), k });
    }
    let mut code = encoder.encode(&seq[..k]);
    visit(code, 0);
    for (offset, &base) in seq[k..].iter().enumerate() {
        code = encoder.roll(code, base);
        visit(code, offset + 1);
    }
    Ok(())
}
