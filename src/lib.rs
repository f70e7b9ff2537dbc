//! # Shardstat
//!
//! Point-in-time status snapshots of index shards, and the binary protocol
//! that carries them from the node owning a shard to the node reporting on it.
//!
//! ## Quick Start
//!
//! ```
//! use shardstat::prelude::*;
//!
//! // Producer: snapshot a shard and encode it
//! let status = ShardStatus::new(ShardId::new("orders", 2), IndexShardState::Started)
//!     .with_store_size(ByteSize::bytes_of(512_000))
//!     .with_translog(7, 42)
//!     .with_docs(DocsStatus::new(100, 110, 10));
//! let bytes = shardstat::encode(&status).unwrap();
//!
//! // Consumer: decode and aggregate
//! let mut report = StatusReport::new();
//! report.add_payload(ShardId::new("orders", 2), &bytes);
//! assert_eq!(report.index("orders").unwrap().docs().unwrap().num_docs, 100);
//! ```
//!
//! ## Layers
//!
//! - `shardstat-core` - the status model ([`ShardStatus`] and its sub-records)
//! - `shardstat-wire` - the binary encoding
//! - this crate - producer trait ([`ShardStateProvider`]), aggregation
//!   ([`StatusReport`]), and a unified [`Error`]

#![warn(missing_docs)]

mod aggregate;
mod error;
mod producer;
mod types;

pub mod prelude;

// Re-export main entry points
pub use aggregate::{IndexStatus, ShardFailure, StatusReport};
pub use error::{Error, Result};
pub use producer::{collect_status, encode_from_provider, ShardStateProvider, TranslogPosition};

// Re-export types
pub use types::*;

/// Encode a status with the default configuration.
pub fn encode(status: &ShardStatus) -> Result<Vec<u8>> {
    Ok(shardstat_wire::encode_shard_status(
        status,
        &WireConfig::default(),
    )?)
}

/// Decode a status with the default configuration.
pub fn decode(bytes: &[u8]) -> Result<ShardStatus> {
    Ok(shardstat_wire::decode_shard_status(
        bytes,
        &WireConfig::default(),
    )?)
}
