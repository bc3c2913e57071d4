use serde::{Deserialize, Serialize};

/// 2-bit-per-base integer encoding of a k-mer.
pub type KmerCode = u64;

/// 0-based position within a sequence.
pub type SeqPos = usize;

/// Where a k-mer occurs within one sequence.
///
/// A key seen at exactly one position stays `Unique`; a second sighting
/// demotes it to `Ambiguous` permanently. Ambiguous keys are excluded from
/// anchoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Occurrence {
    Unique(SeqPos),
    Ambiguous,
}

impl Occurrence {
    /// The position if this occurrence is unique.
    pub fn unique_pos(&self) -> Option<SeqPos> {
        match self {
            Occurrence::Unique(pos) => Some(*pos),
            Occurrence::Ambiguous => None,
        }
    }

    pub fn is_unique(&self) -> bool {
        matches!(self, Occurrence::Unique(_))
    }
}

/// A k-mer occurring exactly once in each of the three sequences.
///
/// Positions are 0-based window starts. Anchor lists produced by the
/// builder are strictly increasing in `ref_pos`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Anchor {
    pub ref_pos: SeqPos,
    pub uncorr_pos: SeqPos,
    pub corr_pos: SeqPos,
}

impl Anchor {
    pub fn new(ref_pos: SeqPos, uncorr_pos: SeqPos, corr_pos: SeqPos) -> Self {
        Self {
            ref_pos,
            uncorr_pos,
            corr_pos,
        }
    }
}

/// Per-record output: the ordered segments of each stream.
///
/// Concatenating the segments of one stream reproduces that stream's input
/// sequence exactly. All three vectors have the same length.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SegmentSet {
    pub reference: Vec<Vec<u8>>,
    pub uncorrected: Vec<Vec<u8>>,
    pub corrected: Vec<Vec<u8>>,
}

impl SegmentSet {
    /// Number of segments per stream.
    pub fn len(&self) -> usize {
        self.reference.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reference.is_empty()
    }
}

/// One two-line record: header line plus sequence line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub header: String,
    pub seq: Vec<u8>,
}

impl Record {
    pub fn new(header: impl Into<String>, seq: impl Into<Vec<u8>>) -> Self {
        Self {
            header: header.into(),
            seq: seq.into(),
        }
    }
}

/// Records read in lockstep from the reference, uncorrected, and corrected
/// streams.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordTriple {
    pub reference: Record,
    pub uncorrected: Record,
    pub corrected: Record,
}
