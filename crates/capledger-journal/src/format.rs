//! On-disk layout of a `.eqj` journal file.
//!
//! A journal is an 8-byte file header followed by frames. Each frame is a
//! 12-byte head carrying the commit sequence and payload length, then the
//! payload: the committed transaction as JSON bytes. Baking the sequence
//! into the frame head lets readers and writers enforce the strictly
//! increasing commit order without parsing payloads, and cross-check the
//! head against the sequence embedded in the JSON.

use crate::errors::JournalError;

/// First four bytes of every journal file.
pub(crate) const FILE_MAGIC: [u8; 4] = *b"EQL1";

/// On-disk format version, little-endian u16 after the magic.
pub(crate) const FORMAT_VERSION: u16 = 1;

/// File header length: magic, version, two reserved zero bytes.
pub(crate) const FILE_HEADER_LEN: usize = 8;

/// Frame head length: u64 commit sequence, u32 payload length, both LE.
pub(crate) const FRAME_HEAD_LEN: usize = 12;

/// Largest payload a single frame may carry.
pub(crate) const MAX_PAYLOAD_LEN: u32 = 16 * 1024 * 1024;

/// Encodes the fixed file header for a fresh journal.
pub(crate) fn file_header() -> [u8; FILE_HEADER_LEN] {
    let mut bytes = [0u8; FILE_HEADER_LEN];
    bytes[0..4].copy_from_slice(&FILE_MAGIC);
    bytes[4..6].copy_from_slice(&FORMAT_VERSION.to_le_bytes());
    bytes
}

/// Checks the leading bytes of a file against the journal header.
pub(crate) fn check_file_header(bytes: &[u8; FILE_HEADER_LEN]) -> Result<(), JournalError> {
    if bytes[0..4] != FILE_MAGIC {
        return Err(JournalError::NotAJournal {
            reason: format!("bad magic {:?}", &bytes[0..4]),
        });
    }
    let version = u16::from_le_bytes([bytes[4], bytes[5]]);
    if version != FORMAT_VERSION {
        return Err(JournalError::NotAJournal {
            reason: format!("unsupported format version {version}"),
        });
    }
    if bytes[6] != 0 || bytes[7] != 0 {
        return Err(JournalError::NotAJournal {
            reason: "reserved header bytes are not zero".to_string(),
        });
    }
    Ok(())
}

/// Decoded frame head: which commit this is and how long its payload is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FrameHead {
    /// Commit sequence of the framed transaction.
    pub(crate) sequence: u64,
    /// Payload length in bytes.
    pub(crate) payload_len: u32,
}

impl FrameHead {
    pub(crate) fn encode(&self) -> [u8; FRAME_HEAD_LEN] {
        let mut bytes = [0u8; FRAME_HEAD_LEN];
        bytes[0..8].copy_from_slice(&self.sequence.to_le_bytes());
        bytes[8..12].copy_from_slice(&self.payload_len.to_le_bytes());
        bytes
    }

    pub(crate) fn decode(bytes: &[u8; FRAME_HEAD_LEN]) -> Result<Self, JournalError> {
        let sequence = u64::from_le_bytes(bytes[0..8].try_into().expect("slice is 8 bytes"));
        let payload_len =
            u32::from_le_bytes(bytes[8..12].try_into().expect("slice is 4 bytes"));
        if payload_len > MAX_PAYLOAD_LEN {
            return Err(JournalError::OversizedPayload {
                sequence,
                len: u64::from(payload_len),
                max: MAX_PAYLOAD_LEN,
            });
        }
        Ok(Self {
            sequence,
            payload_len,
        })
    }
}
