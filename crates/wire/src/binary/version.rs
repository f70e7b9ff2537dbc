//! Format versioning and whole-record entry points
//!
//! Every payload starts with one format version byte, followed by the body
//! for that version. Decoders dispatch on the byte and reject versions they
//! do not know with [`WireError::UnsupportedVersion`].

use super::decode::StreamInput;
use super::encode::StreamOutput;
use super::error::{Result, WireError};
use super::record::Streamable;
use crate::config::WireConfig;
use shardstat_core::ShardStatus;
use std::io::{Read, Write};
use tracing::debug;

/// Known payload layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatVersion {
    /// Positional layout with presence flags
    V1,
}

impl FormatVersion {
    /// Version written by default
    pub const CURRENT: FormatVersion = FormatVersion::V1;

    /// Version byte
    pub fn code(self) -> u8 {
        match self {
            FormatVersion::V1 => 1,
        }
    }

    /// Resolve a version byte
    pub fn from_code(code: u8) -> Result<Self> {
        match code {
            1 => Ok(FormatVersion::V1),
            other => Err(WireError::UnsupportedVersion(other)),
        }
    }
}

/// Write the version byte and the body of `status`
pub fn write_shard_status<W: Write>(
    out: &mut StreamOutput<W>,
    status: &ShardStatus,
    version: FormatVersion,
) -> Result<()> {
    out.write_byte(version.code())?;
    match version {
        FormatVersion::V1 => status.write_to(out),
    }
}

/// Read a version byte and the body it announces
pub fn read_shard_status<R: Read>(input: &mut StreamInput<R>) -> Result<ShardStatus> {
    let version = FormatVersion::from_code(input.read_byte("format_version")?)?;
    match version {
        FormatVersion::V1 => ShardStatus::read_from(input),
    }
}

/// Encode `status` into a fresh buffer
pub fn encode_shard_status(status: &ShardStatus, config: &WireConfig) -> Result<Vec<u8>> {
    let mut out = StreamOutput::with_config(Vec::new(), config);
    write_shard_status(&mut out, status, config.format_version)?;
    let bytes = out.into_inner();
    debug!(
        shard = %status.shard_id(),
        version = config.format_version.code(),
        len = bytes.len(),
        "encoded shard status"
    );
    Ok(bytes)
}

/// Encode `status` into `sink`, returning the number of bytes written
pub fn encode_shard_status_into<W: Write>(
    status: &ShardStatus,
    sink: W,
    config: &WireConfig,
) -> Result<u64> {
    let mut out = StreamOutput::with_config(sink, config);
    write_shard_status(&mut out, status, config.format_version)?;
    out.flush()?;
    Ok(out.position())
}

/// Decode one status from a complete buffer
///
/// Bytes after the record are an error unless the config allows them.
pub fn decode_shard_status(bytes: &[u8], config: &WireConfig) -> Result<ShardStatus> {
    let mut input = StreamInput::with_config(bytes, config);
    let status = read_shard_status(&mut input)?;
    let remaining = input.into_inner().len();
    if remaining > 0 && !config.allow_trailing_bytes {
        return Err(WireError::TrailingBytes(remaining));
    }
    debug!(
        shard = %status.shard_id(),
        len = bytes.len() - remaining,
        "decoded shard status"
    );
    Ok(status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shardstat_core::{IndexShardState, ShardId};

    fn status() -> ShardStatus {
        ShardStatus::new(ShardId::new("orders", 2), IndexShardState::Started)
    }

    #[test]
    fn test_payload_starts_with_version() {
        let bytes = encode_shard_status(&status(), &WireConfig::default()).unwrap();
        assert_eq!(bytes[0], 1);
    }

    #[test]
    fn test_unknown_version_rejected() {
        let mut bytes = encode_shard_status(&status(), &WireConfig::default()).unwrap();
        bytes[0] = 2;
        let err = decode_shard_status(&bytes, &WireConfig::default()).unwrap_err();
        assert!(matches!(err, WireError::UnsupportedVersion(2)));
    }

    #[test]
    fn test_trailing_bytes() {
        let mut bytes = encode_shard_status(&status(), &WireConfig::default()).unwrap();
        bytes.extend_from_slice(&[0, 0]);

        let err = decode_shard_status(&bytes, &WireConfig::default()).unwrap_err();
        assert!(matches!(err, WireError::TrailingBytes(2)));

        let decoded = decode_shard_status(&bytes, &WireConfig::permissive()).unwrap();
        assert_eq!(decoded, status());
    }

    #[test]
    fn test_encode_into_sink_reports_length() {
        let mut sink = Vec::new();
        let written =
            encode_shard_status_into(&status(), &mut sink, &WireConfig::default()).unwrap();
        assert_eq!(written, sink.len() as u64);
        assert_eq!(
            sink,
            encode_shard_status(&status(), &WireConfig::default()).unwrap()
        );
    }

    #[test]
    fn test_over_limit_index_name_fails_to_encode() {
        let config = WireConfig::default();
        let long = ShardStatus::new(
            ShardId::new("x".repeat(config.max_string_len + 1), 0),
            IndexShardState::Started,
        );

        let err = encode_shard_status(&long, &config).unwrap_err();
        assert!(matches!(err, WireError::StringTooLong { field: "index", .. }));

        // Whatever encodes under a config also decodes under it
        let fits = ShardStatus::new(
            ShardId::new("x".repeat(config.max_string_len), 0),
            IndexShardState::Started,
        );
        let bytes = encode_shard_status(&fits, &config).unwrap();
        assert_eq!(decode_shard_status(&bytes, &config).unwrap(), fits);

        assert!(encode_shard_status(&fits, &WireConfig::strict()).is_err());
    }

    /// Accepts `capacity` bytes, then fails every write
    struct ShortSink {
        accepted: Vec<u8>,
        capacity: usize,
    }

    impl Write for ShortSink {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            let room = self.capacity - self.accepted.len();
            if room == 0 {
                return Err(std::io::Error::new(
                    std::io::ErrorKind::BrokenPipe,
                    "peer went away",
                ));
            }
            let n = room.min(buf.len());
            self.accepted.extend_from_slice(&buf[..n]);
            Ok(n)
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_sink_failure_mid_record_is_reported() {
        let status = status().with_translog(7, 42);
        let full = encode_shard_status(&status, &WireConfig::default()).unwrap();

        for capacity in [0, 1, 5, full.len() / 2, full.len() - 1] {
            let mut sink = ShortSink {
                accepted: Vec::new(),
                capacity,
            };
            let err =
                encode_shard_status_into(&status, &mut sink, &WireConfig::default()).unwrap_err();
            assert!(
                matches!(err, WireError::StreamWriteFailure(_)),
                "capacity {capacity}: {err:?}"
            );
            assert_eq!(sink.accepted, full[..capacity]);
        }
    }

    #[test]
    fn test_stream_of_records() {
        let first = status();
        let second = ShardStatus::new(ShardId::new("orders", 3), IndexShardState::Closed);

        let mut out = StreamOutput::new(Vec::new());
        write_shard_status(&mut out, &first, FormatVersion::V1).unwrap();
        write_shard_status(&mut out, &second, FormatVersion::V1).unwrap();
        let bytes = out.into_inner();

        let mut input = StreamInput::new(&bytes[..]);
        assert_eq!(read_shard_status(&mut input).unwrap(), first);
        assert_eq!(read_shard_status(&mut input).unwrap(), second);
        assert!(input.into_inner().is_empty());
    }
}
