//! Wire errors
//!
//! Every error aborts the whole encode or decode call. There is no
//! partial-result mode.

use shardstat_core::UnknownStageCode;
use std::io;
use thiserror::Error;

/// Encode and decode errors
#[derive(Debug, Error)]
pub enum WireError {
    /// Stream ended before a field was complete
    #[error("truncated input: stream ended while reading {field} at offset {offset}")]
    TruncatedInput {
        /// Field being read
        field: &'static str,
        /// Bytes consumed before the read started
        offset: u64,
    },

    /// Stage byte outside the enumeration
    #[error(transparent)]
    UnknownStageCode(#[from] UnknownStageCode),

    /// Leading format version not understood by this decoder
    #[error("unsupported format version: {0}")]
    UnsupportedVersion(u8),

    /// Boolean or presence byte other than 0 or 1
    #[error("invalid flag byte {value} for {field}")]
    InvalidFlag {
        /// Field being read
        field: &'static str,
        /// The offending byte
        value: u8,
    },

    /// Variable-length integer wider than its target type
    #[error("variable-length integer overflows {field}")]
    VarIntOverflow {
        /// Field being read
        field: &'static str,
    },

    /// String bytes are not UTF-8
    #[error("invalid UTF-8 in {field}")]
    InvalidUtf8 {
        /// Field being read
        field: &'static str,
    },

    /// String length prefix above the configured limit
    #[error("string too long for {field}: {len} bytes (max {max})")]
    StringTooLong {
        /// Field being read
        field: &'static str,
        /// Declared length
        len: usize,
        /// Configured limit
        max: usize,
    },

    /// Bytes left over after a whole-buffer decode
    #[error("{0} trailing bytes after shard status")]
    TrailingBytes(usize),

    /// Underlying sink rejected a write
    #[error("stream write failed: {0}")]
    StreamWriteFailure(#[source] io::Error),

    /// Underlying source failed for a reason other than end of stream
    #[error("stream read failed: {0}")]
    StreamReadFailure(#[source] io::Error),
}

impl WireError {
    /// Whether the input ended early
    pub fn is_truncated(&self) -> bool {
        matches!(self, WireError::TruncatedInput { .. })
    }

    /// Whether the error points at producer and consumer disagreeing on the format
    pub fn is_version_mismatch(&self) -> bool {
        matches!(
            self,
            WireError::UnknownStageCode(_) | WireError::UnsupportedVersion(_)
        )
    }
}

/// Result type for wire operations
pub type Result<T> = std::result::Result<T, WireError>;
