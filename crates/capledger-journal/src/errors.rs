use thiserror::Error;

/// Errors raised while reading or writing a journal file.
///
/// Anything other than [`JournalError::Io`] means the file content itself
/// is wrong: it is not a journal, a frame is damaged, or the commit
/// sequence discipline was broken. Callers treat these as data corruption,
/// not transient failures.
#[derive(Debug, Error)]
pub enum JournalError {
    /// Underlying I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The file does not start with a valid journal header.
    #[error("not a capledger journal: {reason}")]
    NotAJournal {
        /// What was wrong with the header.
        reason: String,
    },
    /// A frame claims a payload larger than the format allows.
    #[error("frame for sequence {sequence} claims {len} payload bytes, cap is {max}")]
    OversizedPayload {
        /// Commit sequence from the frame head.
        sequence: u64,
        /// Claimed payload length.
        len: u64,
        /// Maximum payload length the format permits.
        max: u32,
    },
    /// The file ends inside a frame, typically from a crash mid-append.
    #[error("torn frame at offset {offset}")]
    TornFrame {
        /// Byte offset of the frame that was cut short.
        offset: u64,
    },
    /// A frame payload is not a valid JSON transaction.
    #[error("payload for sequence {sequence} is not valid transaction JSON: {detail}")]
    MalformedPayload {
        /// Commit sequence from the frame head.
        sequence: u64,
        /// Parse or serialization failure detail.
        detail: String,
    },
    /// A transaction payload carries no numeric `sequence` field.
    #[error("transaction carries no commit sequence")]
    MissingSequence,
    /// Commit sequences must strictly increase within one file.
    #[error("non-monotonic sequence: {found} after {previous}")]
    NonMonotonicSequence {
        /// Sequence of the offending transaction.
        found: u64,
        /// Highest sequence seen before it.
        previous: u64,
    },
    /// The frame head and its payload disagree about the commit sequence.
    #[error("frame head says sequence {framed}, payload says {embedded}")]
    SequenceMismatch {
        /// Sequence recorded in the frame head.
        framed: u64,
        /// Sequence embedded in the JSON payload.
        embedded: u64,
    },
    /// A transaction could not be checked against its content digest.
    #[error("transaction cannot be verified: {0}")]
    Unverifiable(String),
}
