//! Error types for compression and decompression.

use thiserror::Error;

use crate::min_heap::HeapErr;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, HuffmanError>;

#[derive(Debug, Error)]
pub enum HuffmanError {
    /// A tree was requested for a table with no symbols at all.
    #[error("cannot build a Huffman tree from an empty frequency table")]
    EmptyFrequencyTable,

    /// The header ended before a complete tree (and its terminator) was read.
    #[error("compressed header truncated at bit {bit_offset}")]
    TruncatedHeader { bit_offset: usize },

    /// The header is complete but describes something no encoder writes.
    #[error("malformed header at bit {bit_offset}: {reason}")]
    MalformedHeader {
        bit_offset: usize,
        reason: &'static str,
    },

    /// The payload ran out of bits before the end-of-stream marker.
    #[error("compressed payload ended at bit {bit_offset} without an end-of-stream marker")]
    CorruptPayload { bit_offset: usize },

    /// The encoder met a symbol the code table cannot encode.
    #[error("invalid code table: {0}")]
    InvalidCodeTable(String),

    #[error("heap error: {0}")]
    HeapError(#[from] HeapErr),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
