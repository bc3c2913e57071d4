//! Two-line record readers
//!
//! Each record is a header line followed by a single sequence line, the
//! layout the upstream simulation and correction steps emit. Files ending
//! in `.gz` are decompressed transparently.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use flate2::read::GzDecoder;

use super::{IoResult, RecordError};
use crate::types::{Record, RecordTriple};

/// Reads two-line records from one stream.
pub struct RecordReader {
    stream: String,
    inner: Box<dyn BufRead + Send>,
}

impl RecordReader {
    /// Open `path`, decompressing gzip input by extension.
    pub fn open<P: AsRef<Path>>(path: P) -> IoResult<Self> {
        let stream = path.as_ref().display().to_string();
        let file = File::open(&path)?;
        let inner: Box<dyn BufRead + Send> = if stream.ends_with(".gz") {
            Box::new(BufReader::new(GzDecoder::new(file)))
        } else {
            Box::new(BufReader::new(file))
        };
        Ok(Self { stream, inner })
    }

    /// Wrap an arbitrary reader; `stream` names it in errors.
    pub fn from_reader<R: Read + Send + 'static>(stream: impl Into<String>, reader: R) -> Self {
        Self {
            stream: stream.into(),
            inner: Box::new(BufReader::new(reader)),
        }
    }

    /// Read the next record, or `None` at a clean end of stream.
    ///
    /// A header line without a following sequence line is a truncated
    /// record, and a header followed by a blank line is malformed; neither
    /// is an end of stream. Skipping blanks here would shift every later
    /// line by one and silently swap headers and sequences.
    pub fn next_record(&mut self) -> IoResult<Option<Record>> {
        let Some(header) = self.next_content_line()? else {
            return Ok(None);
        };
        let seq = match self.next_line()? {
            None => {
                return Err(RecordError::TruncatedRecord {
                    stream: self.stream.clone(),
                    header,
                })
            }
            Some(line) if line.is_empty() => {
                return Err(RecordError::EmptySequence {
                    stream: self.stream.clone(),
                    header,
                })
            }
            Some(line) => line,
        };
        Ok(Some(Record::new(header, seq.into_bytes())))
    }

    /// Next line with the terminator removed; `None` at end of stream.
    fn next_line(&mut self) -> IoResult<Option<String>> {
        let mut line = String::new();
        if self.inner.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        while line.ends_with('\n') || line.ends_with('\r') {
            line.pop();
        }
        Ok(Some(line))
    }

    /// Next non-blank line. Only valid at a record boundary, where blank
    /// lines between records or before end of stream carry no content.
    fn next_content_line(&mut self) -> IoResult<Option<String>> {
        loop {
            match self.next_line()? {
                None => return Ok(None),
                Some(line) if line.is_empty() => continue,
                Some(line) => return Ok(Some(line)),
            }
        }
    }
}

/// Drives the reference, uncorrected, and corrected readers in lockstep.
pub struct TripleReader {
    reference: RecordReader,
    uncorrected: RecordReader,
    corrected: RecordReader,
    record: u64,
}

impl TripleReader {
    pub fn open<P: AsRef<Path>>(reference: P, uncorrected: P, corrected: P) -> IoResult<Self> {
        Ok(Self {
            reference: RecordReader::open(reference)?,
            uncorrected: RecordReader::open(uncorrected)?,
            corrected: RecordReader::open(corrected)?,
            record: 0,
        })
    }

    pub fn from_readers(
        reference: RecordReader,
        uncorrected: RecordReader,
        corrected: RecordReader,
    ) -> Self {
        Self {
            reference,
            uncorrected,
            corrected,
            record: 0,
        }
    }

    /// Read the next triple.
    ///
    /// End-of-stream is symmetric: either all three streams end together
    /// (clean `None`) or the mismatch is an error, never a guess about
    /// which stream to trust.
    pub fn next_triple(&mut self) -> IoResult<Option<RecordTriple>> {
        let reference = self.reference.next_record()?;
        let uncorrected = self.uncorrected.next_record()?;
        let corrected = self.corrected.next_record()?;

        let triple = match (reference, uncorrected, corrected) {
            (None, None, None) => return Ok(None),
            (Some(reference), Some(uncorrected), Some(corrected)) => RecordTriple {
                reference,
                uncorrected,
                corrected,
            },
            (reference, uncorrected, corrected) => {
                let state = |r: &Option<Record>| if r.is_some() { "present" } else { "exhausted" };
                return Err(RecordError::Desynchronized {
                    record: self.record,
                    detail: format!(
                        "reference {}, uncorrected {}, corrected {}",
                        state(&reference),
                        state(&uncorrected),
                        state(&corrected)
                    ),
                });
            }
        };
        self.record += 1;
        Ok(Some(triple))
    }

    /// Read up to `max` triples; fewer only at end of input.
    pub fn read_batch(&mut self, max: usize) -> IoResult<Vec<RecordTriple>> {
        let mut batch = Vec::with_capacity(max);
        while batch.len() < max {
            match self.next_triple()? {
                Some(triple) => batch.push(triple),
                None => break,
            }
        }
        Ok(batch)
    }

    /// Triples yielded so far.
    pub fn records_read(&self) -> u64 {
        self.record
    }
}
