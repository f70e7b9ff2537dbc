//! Codec configuration
//!
//! [`WireConfig`] controls which format version encoders emit and how
//! lenient decoders are. Presets follow the usual pattern:
//!
//! | Preset | Strings | Trailing bytes |
//! |--------|---------|----------------|
//! | `default()` | 64 KiB | rejected |
//! | `strict()` | 4 KiB | rejected |
//! | `permissive()` | 16 MiB | ignored |

use crate::binary::version::FormatVersion;

/// Encode/decode options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireConfig {
    /// Version written by encoders
    pub format_version: FormatVersion,
    /// Longest string a decoder will allocate for, in bytes
    pub max_string_len: usize,
    /// Whether a whole-buffer decode tolerates bytes after the record
    pub allow_trailing_bytes: bool,
}

impl Default for WireConfig {
    fn default() -> Self {
        WireConfig {
            format_version: FormatVersion::CURRENT,
            max_string_len: 64 * 1024,
            allow_trailing_bytes: false,
        }
    }
}

impl WireConfig {
    /// Tight limits for untrusted peers
    pub fn strict() -> Self {
        WireConfig {
            max_string_len: 4 * 1024,
            ..Default::default()
        }
    }

    /// Loose limits, e.g. for reading payloads embedded in larger buffers
    pub fn permissive() -> Self {
        WireConfig {
            max_string_len: 16 * 1024 * 1024,
            allow_trailing_bytes: true,
            ..Default::default()
        }
    }
}
