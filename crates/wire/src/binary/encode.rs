//! Output stream primitives
//!
//! [`StreamOutput`] wraps any [`Write`] sink and provides the primitive
//! encodings the status layout is built from:
//!
//! | Primitive | Encoding |
//! |-----------|----------|
//! | byte, stage code | 1 byte |
//! | bool, presence flag | 1 byte, 0 or 1 |
//! | u32 / i64 | fixed width, big-endian |
//! | vint / vlong | 7 bits per byte, low group first, high bit = more |
//! | string | vint byte length, then UTF-8 bytes |

use super::error::{Result, WireError};
use crate::config::WireConfig;
use byteorder::{BigEndian, WriteBytesExt};
use shardstat_core::StageCode;
use std::io::Write;

/// Append-only binary output over a byte sink
pub struct StreamOutput<W> {
    inner: W,
    written: u64,
    max_string_len: usize,
}

impl<W: Write> StreamOutput<W> {
    /// Wrap a sink with the default configuration
    pub fn new(inner: W) -> Self {
        Self::with_config(inner, &WireConfig::default())
    }

    /// Wrap a sink, taking limits from `config`
    ///
    /// Encoders refuse what a decoder with the same config would reject.
    pub fn with_config(inner: W, config: &WireConfig) -> Self {
        StreamOutput {
            inner,
            written: 0,
            max_string_len: config.max_string_len,
        }
    }

    /// Bytes written so far
    pub fn position(&self) -> u64 {
        self.written
    }

    /// Unwrap the sink
    pub fn into_inner(self) -> W {
        self.inner
    }

    /// Flush the sink
    pub fn flush(&mut self) -> Result<()> {
        self.inner.flush().map_err(WireError::StreamWriteFailure)
    }

    /// Write one byte
    pub fn write_byte(&mut self, value: u8) -> Result<()> {
        self.inner
            .write_u8(value)
            .map_err(WireError::StreamWriteFailure)?;
        self.written += 1;
        Ok(())
    }

    /// Write a boolean as 0 or 1
    pub fn write_bool(&mut self, value: bool) -> Result<()> {
        self.write_byte(u8::from(value))
    }

    /// Write a stage code
    pub fn write_stage<S: StageCode>(&mut self, stage: S) -> Result<()> {
        self.write_byte(stage.code())
    }

    /// Write a fixed-width unsigned 32-bit integer
    pub fn write_u32(&mut self, value: u32) -> Result<()> {
        self.inner
            .write_u32::<BigEndian>(value)
            .map_err(WireError::StreamWriteFailure)?;
        self.written += 4;
        Ok(())
    }

    /// Write a fixed-width signed 64-bit integer
    pub fn write_i64(&mut self, value: i64) -> Result<()> {
        self.inner
            .write_i64::<BigEndian>(value)
            .map_err(WireError::StreamWriteFailure)?;
        self.written += 8;
        Ok(())
    }

    /// Write a variable-length unsigned 32-bit integer
    pub fn write_vint(&mut self, value: u32) -> Result<()> {
        self.write_varint(u64::from(value))
    }

    /// Write a variable-length unsigned 64-bit integer
    pub fn write_vlong(&mut self, value: u64) -> Result<()> {
        self.write_varint(value)
    }

    fn write_varint(&mut self, mut value: u64) -> Result<()> {
        while value >= 0x80 {
            self.write_byte((value as u8 & 0x7F) | 0x80)?;
            value >>= 7;
        }
        self.write_byte(value as u8)
    }

    /// Write a length-prefixed UTF-8 string
    pub fn write_string(&mut self, field: &'static str, value: &str) -> Result<()> {
        let bytes = value.as_bytes();
        let too_long = || WireError::StringTooLong {
            field,
            len: bytes.len(),
            max: self.max_string_len,
        };
        if bytes.len() > self.max_string_len {
            return Err(too_long());
        }
        let len = u32::try_from(bytes.len()).map_err(|_| too_long())?;
        self.write_vint(len)?;
        self.inner
            .write_all(bytes)
            .map_err(WireError::StreamWriteFailure)?;
        self.written += bytes.len() as u64;
        Ok(())
    }

    /// Write a presence flag, then the string if present
    pub fn write_optional_string(
        &mut self,
        field: &'static str,
        value: Option<&str>,
    ) -> Result<()> {
        match value {
            Some(s) => {
                self.write_bool(true)?;
                self.write_string(field, s)
            }
            None => self.write_bool(false),
        }
    }
}

/// Encoded length of a variable-length integer
pub fn varint_len(value: u64) -> usize {
    let bits = 64 - value.leading_zeros() as usize;
    (bits.max(1) + 6) / 7
}
