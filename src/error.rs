use std::io;

use thiserror::Error;

/// Errors returned by a compression or decompression run.
///
/// Every kind is terminal for the run that produced it. Output written
/// before the failure must be treated as unusable.
#[derive(Debug, Error)]
pub enum HuffmanError {
    /// The input could not be opened or read.
    #[error("input unavailable: {0}")]
    SourceUnavailable(#[source] io::Error),
    /// The output could not be opened, written or seeked.
    #[error("output unavailable: {0}")]
    SinkUnavailable(#[source] io::Error),
    /// The input contained no bytes.
    #[error("input is empty, nothing to compress")]
    EmptyInput,
    /// The padding byte or serialized tree could not be read back.
    #[error("corrupt header: {0}")]
    CorruptHeader(&'static str),
    /// The payload ran out before its last code was complete.
    #[error("truncated payload after {decoded_bits} bits")]
    TruncatedPayload { decoded_bits: u64 },
    /// A payload bit did not lead anywhere in the tree.
    #[error("corrupt payload at bit {bit_offset}")]
    CorruptPayload { bit_offset: u64 },
}

pub type Result<T> = std::result::Result<T, HuffmanError>;

impl HuffmanError {
    /// Process exit code for this kind of failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            HuffmanError::SourceUnavailable(_) => 2,
            HuffmanError::SinkUnavailable(_) => 3,
            HuffmanError::EmptyInput => 4,
            HuffmanError::CorruptHeader(_)
            | HuffmanError::TruncatedPayload { .. }
            | HuffmanError::CorruptPayload { .. } => 5,
        }
    }

    /// True for the kinds that mean the compressed stream itself is bad.
    pub fn is_corrupt_stream(&self) -> bool {
        self.exit_code() == 5
    }
}
