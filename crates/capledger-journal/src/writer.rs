//! Append side of the journal.

use std::fs::OpenOptions;
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;

use crate::errors::JournalError;
use crate::format::{self, FrameHead, FILE_HEADER_LEN, FRAME_HEAD_LEN, MAX_PAYLOAD_LEN};
use crate::record::{self, TxJson};

/// Options controlling how a journal is opened for writing.
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// Fsync after every append (default: false).
    pub sync: bool,
    /// Create the file if it does not exist (default: true).
    pub create: bool,
    /// Keep existing commits; `false` discards them and restarts the file
    /// from its header (default: true).
    pub append: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            sync: false,
            create: true,
            append: true,
        }
    }
}

/// Appends committed transactions to a `.eqj` journal file.
///
/// The writer owns the commit-order discipline at the file boundary: every
/// appended transaction must carry a `sequence` strictly greater than the
/// last one in the file. Opening an existing journal recovers that high
/// water mark by walking the frame heads, without parsing any payloads; a
/// file whose tail was cut mid-frame is refused rather than silently
/// appended past.
pub struct JournalWriter {
    file: std::fs::File,
    sync: bool,
    last_sequence: u64,
}

impl JournalWriter {
    /// Opens a journal file for appending, creating and initializing it if
    /// absent.
    ///
    /// Fails if the file exists but is not a journal, has a torn tail, or
    /// holds out-of-order sequences.
    pub fn open<P: AsRef<Path>>(path: P, options: WriteOptions) -> Result<Self, JournalError> {
        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(options.create)
            .open(path)?;

        let len = file.metadata()?.len();
        if len == 0 {
            file.write_all(&format::file_header())?;
            file.flush()?;
            if options.sync {
                file.sync_all()?;
            }
            return Ok(Self {
                file,
                sync: options.sync,
                last_sequence: 0,
            });
        }

        if len < FILE_HEADER_LEN as u64 {
            return Err(JournalError::NotAJournal {
                reason: "file is shorter than the journal header".to_string(),
            });
        }
        let mut header = [0u8; FILE_HEADER_LEN];
        file.seek(SeekFrom::Start(0))?;
        file.read_exact(&mut header)?;
        format::check_file_header(&header)?;

        if !options.append {
            file.set_len(FILE_HEADER_LEN as u64)?;
            file.seek(SeekFrom::Start(FILE_HEADER_LEN as u64))?;
            return Ok(Self {
                file,
                sync: options.sync,
                last_sequence: 0,
            });
        }

        let last_sequence = Self::scan_frames(&mut file, len)?;
        Ok(Self {
            file,
            sync: options.sync,
            last_sequence,
        })
    }

    /// Walks the frame heads of an existing file, seeking over payloads,
    /// and returns the last committed sequence. Leaves the cursor at the
    /// end of the last whole frame.
    fn scan_frames(file: &mut std::fs::File, len: u64) -> Result<u64, JournalError> {
        let mut offset = FILE_HEADER_LEN as u64;
        let mut last_sequence = 0u64;
        while offset < len {
            if len - offset < FRAME_HEAD_LEN as u64 {
                return Err(JournalError::TornFrame { offset });
            }
            let mut head_bytes = [0u8; FRAME_HEAD_LEN];
            file.read_exact(&mut head_bytes)?;
            let head = FrameHead::decode(&head_bytes)?;

            let end = offset + FRAME_HEAD_LEN as u64 + u64::from(head.payload_len);
            if end > len {
                return Err(JournalError::TornFrame { offset });
            }
            if head.sequence <= last_sequence {
                return Err(JournalError::NonMonotonicSequence {
                    found: head.sequence,
                    previous: last_sequence,
                });
            }
            last_sequence = head.sequence;
            offset = end;
            file.seek(SeekFrom::Start(offset))?;
        }
        Ok(last_sequence)
    }

    /// Last commit sequence in the file, 0 when the journal is empty.
    pub fn last_sequence(&self) -> u64 {
        self.last_sequence
    }

    /// Appends one committed transaction as a new frame.
    ///
    /// The transaction must embed a numeric `sequence` strictly greater
    /// than the file's last one; the same sequence is written into the
    /// frame head so readers can check the two against each other.
    pub fn append_transaction(&mut self, tx: &TxJson) -> Result<(), JournalError> {
        let sequence = record::sequence_of(tx).ok_or(JournalError::MissingSequence)?;
        if sequence <= self.last_sequence {
            return Err(JournalError::NonMonotonicSequence {
                found: sequence,
                previous: self.last_sequence,
            });
        }

        let payload = serde_json::to_vec(tx).map_err(|e| JournalError::MalformedPayload {
            sequence,
            detail: e.to_string(),
        })?;
        if payload.len() as u64 > u64::from(MAX_PAYLOAD_LEN) {
            return Err(JournalError::OversizedPayload {
                sequence,
                len: payload.len() as u64,
                max: MAX_PAYLOAD_LEN,
            });
        }

        let head = FrameHead {
            sequence,
            payload_len: payload.len() as u32,
        };
        self.file.write_all(&head.encode())?;
        self.file.write_all(&payload)?;
        self.file.flush()?;
        if self.sync {
            self.file.sync_data()?;
        }

        self.last_sequence = sequence;
        Ok(())
    }

    /// Flushes and closes the journal.
    pub fn finish(self) -> Result<(), JournalError> {
        // Drop handles the flush; surface sync failures explicitly here.
        if self.sync {
            self.file.sync_all()?;
        }
        Ok(())
    }
}

impl Drop for JournalWriter {
    fn drop(&mut self) {
        let _ = self.file.flush();
        if self.sync {
            let _ = self.file.sync_all();
        }
    }
}
