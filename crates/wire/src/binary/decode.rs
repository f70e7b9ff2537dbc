//! Input stream primitives
//!
//! [`StreamInput`] mirrors [`StreamOutput`](super::encode::StreamOutput)
//! read for read. Every read names the field it is reading so that a short
//! stream is reported as [`WireError::TruncatedInput`] with the field and
//! offset where it ran out.

use super::error::{Result, WireError};
use crate::config::WireConfig;
use byteorder::{BigEndian, ReadBytesExt};
use shardstat_core::StageCode;
use std::io::{self, Read};

/// Sequential binary input over a byte source
pub struct StreamInput<R> {
    inner: R,
    consumed: u64,
    max_string_len: usize,
}

impl<R: Read> StreamInput<R> {
    /// Wrap a source with the default configuration
    pub fn new(inner: R) -> Self {
        Self::with_config(inner, &WireConfig::default())
    }

    /// Wrap a source, taking limits from `config`
    pub fn with_config(inner: R, config: &WireConfig) -> Self {
        StreamInput {
            inner,
            consumed: 0,
            max_string_len: config.max_string_len,
        }
    }

    /// Bytes consumed so far
    pub fn position(&self) -> u64 {
        self.consumed
    }

    /// Unwrap the source
    pub fn into_inner(self) -> R {
        self.inner
    }

    fn fail(&self, field: &'static str, err: io::Error) -> WireError {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            WireError::TruncatedInput {
                field,
                offset: self.consumed,
            }
        } else {
            WireError::StreamReadFailure(err)
        }
    }

    /// Read one byte
    pub fn read_byte(&mut self, field: &'static str) -> Result<u8> {
        let value = self.inner.read_u8().map_err(|e| self.fail(field, e))?;
        self.consumed += 1;
        Ok(value)
    }

    /// Read a boolean; only 0 and 1 are accepted
    pub fn read_bool(&mut self, field: &'static str) -> Result<bool> {
        match self.read_byte(field)? {
            0 => Ok(false),
            1 => Ok(true),
            value => Err(WireError::InvalidFlag { field, value }),
        }
    }

    /// Read a stage code and resolve it against `S`
    pub fn read_stage<S: StageCode>(&mut self, field: &'static str) -> Result<S> {
        let code = self.read_byte(field)?;
        Ok(S::from_code(code)?)
    }

    /// Read a fixed-width unsigned 32-bit integer
    pub fn read_u32(&mut self, field: &'static str) -> Result<u32> {
        let value = self
            .inner
            .read_u32::<BigEndian>()
            .map_err(|e| self.fail(field, e))?;
        self.consumed += 4;
        Ok(value)
    }

    /// Read a fixed-width signed 64-bit integer
    pub fn read_i64(&mut self, field: &'static str) -> Result<i64> {
        let value = self
            .inner
            .read_i64::<BigEndian>()
            .map_err(|e| self.fail(field, e))?;
        self.consumed += 8;
        Ok(value)
    }

    /// Read a variable-length unsigned 32-bit integer
    pub fn read_vint(&mut self, field: &'static str) -> Result<u32> {
        self.read_varint(field, 32).map(|v| v as u32)
    }

    /// Read a variable-length unsigned 64-bit integer
    pub fn read_vlong(&mut self, field: &'static str) -> Result<u64> {
        self.read_varint(field, 64)
    }

    fn read_varint(&mut self, field: &'static str, bits: u32) -> Result<u64> {
        let mut result = 0u64;
        let mut shift = 0u32;
        loop {
            let byte = self.read_byte(field)?;
            let group = u64::from(byte & 0x7F);
            // The last group may only carry the bits left in the target type.
            if shift >= bits || (bits - shift < 7 && group >> (bits - shift) != 0) {
                return Err(WireError::VarIntOverflow { field });
            }
            result |= group << shift;
            if byte & 0x80 == 0 {
                return Ok(result);
            }
            shift += 7;
        }
    }

    /// Read a length-prefixed UTF-8 string
    pub fn read_string(&mut self, field: &'static str) -> Result<String> {
        let len = self.read_vint(field)? as usize;
        if len > self.max_string_len {
            return Err(WireError::StringTooLong {
                field,
                len,
                max: self.max_string_len,
            });
        }
        let mut buf = vec![0u8; len];
        self.inner
            .read_exact(&mut buf)
            .map_err(|e| self.fail(field, e))?;
        self.consumed += len as u64;
        String::from_utf8(buf).map_err(|_| WireError::InvalidUtf8 { field })
    }

    /// Read a presence flag, then the string if present
    pub fn read_optional_string(&mut self, field: &'static str) -> Result<Option<String>> {
        if self.read_bool(field)? {
            self.read_string(field).map(Some)
        } else {
            Ok(None)
        }
    }
}
