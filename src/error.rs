//! Unified error type for shardstat.
//!
//! Wraps the wire layer's errors behind a small, stable surface.

use shardstat_wire::WireError;
use thiserror::Error;

/// All shardstat errors.
#[derive(Debug, Error)]
pub enum Error {
    /// Payload ended before the record was complete
    #[error("truncated status payload: {0}")]
    Truncated(WireError),

    /// Producer and consumer disagree on the format (version or stage codes)
    #[error("status format mismatch: {0}")]
    FormatMismatch(WireError),

    /// Payload is malformed in some other way
    #[error("malformed status payload: {0}")]
    Malformed(WireError),

    /// I/O error on the underlying stream
    #[error("I/O error: {0}")]
    Io(WireError),
}

/// Result type for shardstat operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<WireError> for Error {
    fn from(e: WireError) -> Self {
        match e {
            WireError::TruncatedInput { .. } => Error::Truncated(e),
            WireError::UnknownStageCode(_) | WireError::UnsupportedVersion(_) => {
                Error::FormatMismatch(e)
            }
            WireError::StreamWriteFailure(_) | WireError::StreamReadFailure(_) => Error::Io(e),
            WireError::InvalidFlag { .. }
            | WireError::VarIntOverflow { .. }
            | WireError::InvalidUtf8 { .. }
            | WireError::StringTooLong { .. }
            | WireError::TrailingBytes(_) => Error::Malformed(e),
        }
    }
}

impl Error {
    /// Check if the payload was cut short.
    pub fn is_truncated(&self) -> bool {
        matches!(self, Error::Truncated(_))
    }

    /// Check if this points at mismatched producer/consumer versions.
    pub fn is_version_mismatch(&self) -> bool {
        matches!(self, Error::FormatMismatch(_))
    }

    /// The underlying wire error.
    pub fn wire_error(&self) -> &WireError {
        match self {
            Error::Truncated(e) | Error::FormatMismatch(e) | Error::Malformed(e) | Error::Io(e) => e,
        }
    }
}
