//! Read side of the journal.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::errors::JournalError;
use crate::format::{self, FrameHead, FILE_HEADER_LEN, FRAME_HEAD_LEN};
use crate::record::{self, TxJson};

/// How a reader treats a journal whose tail was cut mid-frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadMode {
    /// A torn tail is an error. Load paths that feed the ledger use this.
    Strict,
    /// A torn tail ends the stream after the last whole frame, the state a
    /// crashed append leaves behind.
    Permissive,
}

/// Streams committed transactions out of a `.eqj` journal file.
///
/// This is the load path: `TransactionLog` drains a reader front to back
/// when it opens, so the reader checks everything the log depends on as it
/// goes. Frames must parse as JSON, the payload's embedded `sequence` must
/// match the frame head, and sequences must strictly increase. Reading
/// stops cleanly at end of file; what happens at a torn tail depends on
/// the [`ReadMode`].
pub struct JournalReader {
    input: BufReader<File>,
    mode: ReadMode,
    offset: u64,
    last_sequence: u64,
    finished: bool,
}

impl JournalReader {
    /// Opens a journal file and validates its header.
    pub fn open<P: AsRef<Path>>(path: P, mode: ReadMode) -> Result<Self, JournalError> {
        let mut input = BufReader::new(File::open(path)?);
        let mut header = [0u8; FILE_HEADER_LEN];
        if fill(&mut input, &mut header)? < FILE_HEADER_LEN {
            return Err(JournalError::NotAJournal {
                reason: "file is shorter than the journal header".to_string(),
            });
        }
        format::check_file_header(&header)?;
        Ok(Self {
            input,
            mode,
            offset: FILE_HEADER_LEN as u64,
            last_sequence: 0,
            finished: false,
        })
    }

    /// Reads the next committed transaction, or `Ok(None)` at the end of
    /// the journal.
    ///
    /// Fails on corruption: an unparseable payload, a frame head that
    /// disagrees with its payload's sequence, or a sequence that does not
    /// strictly increase. A torn tail fails in [`ReadMode::Strict`] and
    /// ends the stream in [`ReadMode::Permissive`].
    pub fn read_transaction(&mut self) -> Result<Option<TxJson>, JournalError> {
        if self.finished {
            return Ok(None);
        }

        let mut head_bytes = [0u8; FRAME_HEAD_LEN];
        let got = fill(&mut self.input, &mut head_bytes)?;
        if got == 0 {
            self.finished = true;
            return Ok(None);
        }
        if got < FRAME_HEAD_LEN {
            return self.torn();
        }
        let head = FrameHead::decode(&head_bytes)?;

        let mut payload = vec![0u8; head.payload_len as usize];
        if fill(&mut self.input, &mut payload)? < payload.len() {
            return self.torn();
        }

        let tx: TxJson =
            serde_json::from_slice(&payload).map_err(|e| JournalError::MalformedPayload {
                sequence: head.sequence,
                detail: e.to_string(),
            })?;
        let embedded = record::sequence_of(&tx).ok_or(JournalError::MissingSequence)?;
        if embedded != head.sequence {
            return Err(JournalError::SequenceMismatch {
                framed: head.sequence,
                embedded,
            });
        }
        if head.sequence <= self.last_sequence {
            return Err(JournalError::NonMonotonicSequence {
                found: head.sequence,
                previous: self.last_sequence,
            });
        }

        self.last_sequence = head.sequence;
        self.offset += (FRAME_HEAD_LEN + payload.len()) as u64;
        Ok(Some(tx))
    }

    /// Last sequence returned so far, 0 before the first transaction.
    pub fn last_sequence(&self) -> u64 {
        self.last_sequence
    }

    fn torn(&mut self) -> Result<Option<TxJson>, JournalError> {
        self.finished = true;
        match self.mode {
            ReadMode::Strict => Err(JournalError::TornFrame {
                offset: self.offset,
            }),
            ReadMode::Permissive => Ok(None),
        }
    }
}

/// Reads until `buf` is full or the stream ends; returns bytes read.
fn fill<R: Read>(input: &mut R, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut read = 0;
    while read < buf.len() {
        let n = input.read(&mut buf[read..])?;
        if n == 0 {
            break;
        }
        read += n;
    }
    Ok(read)
}
