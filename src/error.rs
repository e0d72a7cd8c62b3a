//! Error types for Huffman coding.

use std::collections::TryReserveError;

use thiserror::Error;

/// Error variants for Huffman operations.
#[derive(Debug, Error)]
pub enum Error {
    /// No symbols were observed, so there is nothing to build a tree from.
    #[error("empty input: no symbols to build a tree from")]
    EmptyInput,

    /// A buffer or node allocation could not be satisfied.
    ///
    /// Callers should treat this as fatal for the current operation.
    #[error("allocation failure: {0}")]
    AllocationFailure(#[from] TryReserveError),

    /// The input contains a byte that has no code in the table.
    #[error("unknown symbol: byte {0:#04x} has no code")]
    UnknownSymbol(u8),

    /// The bit stream is malformed: truncated code, invalid bit, or no tree.
    #[error("corrupt stream: {0}")]
    CorruptStream(String),

    /// Frequencies sum past `u64::MAX`, so node weights cannot be represented.
    #[error("frequency overflow: counts sum past u64::MAX")]
    FrequencyOverflow,

    /// `extract_min` was called on an empty priority queue.
    #[error("priority queue is empty")]
    EmptyQueue,

    /// The input exceeds the configured size limit.
    #[error("input too large: {len} bytes exceeds limit of {max}")]
    InputTooLarge {
        /// Length of the rejected input.
        len: usize,
        /// Configured maximum.
        max: usize,
    },

    /// A configuration value is out of range or could not be parsed.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// An I/O error occurred while reading input.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn corrupt(reason: impl Into<String>) -> Self {
        Error::CorruptStream(reason.into())
    }
}

/// A specialized Result type for Huffman operations.
pub type Result<T> = std::result::Result<T, Error>;
