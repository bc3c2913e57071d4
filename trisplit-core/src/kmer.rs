//! K-mer integer encoding
//!
//! Packs fixed-length nucleotide windows into 2-bit-per-base integer codes,
//! with an O(1) rolling update for left-to-right sequence scans.

use crate::pipeline::{SplitError, SplitResult};
use crate::types::KmerCode;

/// Largest supported k: 2*k bits must leave the shifted mask representable
/// in a `u64`.
pub const MAX_K: usize = 31;

/// Encode one nucleotide to its 2-bit code.
///
/// A=0, C=1, G=2, everything else 3. 'T' and non-ACGT bytes (e.g. 'N')
/// deliberately collapse to the same code; callers that care about exact
/// alphabet membership must check the input beforehand.
pub fn encode_base(base: u8) -> KmerCode {
    match base.to_ascii_uppercase() {
        b'A' => 0,
        b'C' => 1,
        b'G' => 2,
        _ => 3,
    }
}

/// Fixed-k window encoder.
#[derive(Debug, Clone)]
pub struct KmerEncoder {
    k: usize,
    mask: KmerCode,
}

impl KmerEncoder {
    /// Create an encoder for windows of length `k`.
    ///
    /// Fails with `InvalidKmerLength` when `k` is zero or exceeds [`MAX_K`];
    /// an oversized k would silently wrap the code and corrupt every
    /// downstream position.
    pub fn new(k: usize) -> SplitResult<Self> {
        if k == 0 || k > MAX_K {
            return Err(SplitError::InvalidKmerLength { k, max: MAX_K });
        }
        let mask = (1u64 << (2 * k)) - 1;
        Ok(Self { k, mask })
    }

    pub fn k(&self) -> usize {
        self.k
    }

    /// Encode a full window of exactly `k` bases, left to right.
    pub fn encode(&self, window: &[u8]) -> KmerCode {
        debug_assert_eq!(window.len(), self.k);
        let mut code: KmerCode = 0;
        for &base in window {
            code = (code << 2) | encode_base(base);
        }
        code
    }

    /// Slide the window one base to the right: drop the oldest base, append
    /// `next`.
    pub fn roll(&self, code: KmerCode, next: u8) -> KmerCode {
        ((code << 2) | encode_base(next)) & self.mask
    }
}
