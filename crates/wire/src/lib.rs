//! Wire encoding for shard status records
//!
//! This crate implements the binary protocol a worker node uses to ship a
//! [`ShardStatus`](shardstat_core::ShardStatus) to the node aggregating it.
//!
//! ## Payload Layout
//!
//! | Field | Encoding |
//! |-------|----------|
//! | format version | 1 byte |
//! | shard routing | string, vint, i64, 2 optional strings, bool, 1 byte |
//! | local state | 1 byte |
//! | store size | flag + vlong |
//! | translog id | i64, -1 = not applicable |
//! | translog operations | i64, -1 = not applicable |
//! | docs | flag + 3 x u32 |
//! | peer recovery | flag + stage byte + 6 vlongs |
//! | gateway recovery | flag + stage byte + 6 vlongs |
//! | gateway snapshot | flag + stage byte + 3 vlongs + vint |
//!
//! Fixed-width integers are big-endian.
//!
//! ## Examples
//!
//! ```
//! use shardstat_core::{IndexShardState, ShardId, ShardStatus};
//! use shardstat_wire::{decode_shard_status, encode_shard_status, WireConfig};
//!
//! let status = ShardStatus::new(ShardId::new("orders", 2), IndexShardState::Started);
//! let config = WireConfig::default();
//!
//! let bytes = encode_shard_status(&status, &config).unwrap();
//! let decoded = decode_shard_status(&bytes, &config).unwrap();
//! assert_eq!(decoded, status);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod binary;
pub mod config;

// Re-export main types
pub use binary::{
    decode_shard_status, encode_shard_status, encode_shard_status_into, read_optional,
    read_shard_status, varint_len, write_optional, write_shard_status, FormatVersion, Result,
    StreamInput, StreamOutput, Streamable, WireError,
};
pub use config::WireConfig;
