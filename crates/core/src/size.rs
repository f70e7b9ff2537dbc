//! Byte size values
//!
//! Sizes are always held as a canonical byte count. Units only exist for
//! construction and display.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;

const KB: u64 = 1024;
const MB: u64 = KB * 1024;
const GB: u64 = MB * 1024;
const TB: u64 = GB * 1024;
const PB: u64 = TB * 1024;

/// A size in bytes
///
/// # Examples
///
/// ```
/// use shardstat_core::ByteSize;
///
/// let size = ByteSize::kb(500);
/// assert_eq!(size.bytes(), 512_000);
/// assert_eq!(size.to_string(), "500kb");
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ByteSize(u64);

impl ByteSize {
    /// Zero bytes
    pub const ZERO: ByteSize = ByteSize(0);

    /// Size from a byte count
    pub const fn bytes_of(bytes: u64) -> Self {
        ByteSize(bytes)
    }

    /// Size from kibibytes (saturating)
    pub const fn kb(kb: u64) -> Self {
        ByteSize(kb.saturating_mul(KB))
    }

    /// Size from mebibytes (saturating)
    pub const fn mb(mb: u64) -> Self {
        ByteSize(mb.saturating_mul(MB))
    }

    /// Size from gibibytes (saturating)
    pub const fn gb(gb: u64) -> Self {
        ByteSize(gb.saturating_mul(GB))
    }

    /// Canonical byte count
    pub const fn bytes(self) -> u64 {
        self.0
    }

    /// Size in fractional kibibytes
    pub fn kb_frac(self) -> f64 {
        self.0 as f64 / KB as f64
    }

    /// Size in fractional mebibytes
    pub fn mb_frac(self) -> f64 {
        self.0 as f64 / MB as f64
    }
}

impl From<u64> for ByteSize {
    fn from(bytes: u64) -> Self {
        ByteSize(bytes)
    }
}

impl Add for ByteSize {
    type Output = ByteSize;

    fn add(self, rhs: ByteSize) -> ByteSize {
        ByteSize(self.0.saturating_add(rhs.0))
    }
}

impl std::iter::Sum for ByteSize {
    fn sum<I: Iterator<Item = ByteSize>>(iter: I) -> Self {
        iter.fold(ByteSize::ZERO, Add::add)
    }
}

impl fmt::Display for ByteSize {
    /// Largest unit the value reaches, one decimal unless integral
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (unit, suffix) = match self.0 {
            b if b >= PB => (PB, "pb"),
            b if b >= TB => (TB, "tb"),
            b if b >= GB => (GB, "gb"),
            b if b >= MB => (MB, "mb"),
            b if b >= KB => (KB, "kb"),
            _ => return write!(f, "{}b", self.0),
        };
        if self.0 % unit == 0 {
            write!(f, "{}{}", self.0 / unit, suffix)
        } else {
            write!(f, "{:.1}{}", self.0 as f64 / unit as f64, suffix)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_units_normalize_to_bytes() {
        assert_eq!(ByteSize::kb(1).bytes(), 1024);
        assert_eq!(ByteSize::mb(2).bytes(), 2 * 1024 * 1024);
        assert_eq!(ByteSize::gb(1).bytes(), 1 << 30);
        assert_eq!(ByteSize::kb(500), ByteSize::bytes_of(512_000));
    }

    #[test]
    fn test_display() {
        assert_eq!(ByteSize::bytes_of(0).to_string(), "0b");
        assert_eq!(ByteSize::bytes_of(1023).to_string(), "1023b");
        assert_eq!(ByteSize::bytes_of(512_000).to_string(), "500kb");
        assert_eq!(ByteSize::bytes_of(1536).to_string(), "1.5kb");
        assert_eq!(ByteSize::gb(3).to_string(), "3gb");
    }

    #[test]
    fn test_sum_saturates() {
        let total: ByteSize = [ByteSize::bytes_of(u64::MAX), ByteSize::kb(1)]
            .into_iter()
            .sum();
        assert_eq!(total.bytes(), u64::MAX);
    }

    #[test]
    fn test_fractional_views() {
        assert_eq!(ByteSize::kb(3).kb_frac(), 3.0);
        assert_eq!(ByteSize::bytes_of(512 * 1024).mb_frac(), 0.5);
    }
}
