//! Core types for shard status snapshots
//!
//! This crate defines the status data model:
//! - [`stage`]: closed stage enumerations with frozen wire codes
//! - [`shard`]: shard identity and routing table entries
//! - [`size`]: byte size values
//! - [`status`]: [`ShardStatus`] and its optional sub-records
//!
//! Encoding lives in `shardstat-wire`.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod shard;
pub mod size;
pub mod stage;
pub mod status;

pub use shard::{ShardId, ShardRouting};
pub use size::ByteSize;
pub use stage::{
    IndexShardState, RecoveryStage, ShardRoutingState, SnapshotStage, StageCode,
    UnknownStageCode, UnknownStageName,
};
pub use status::{
    DocsStatus, RecoveryKind, RecoveryStatus, ShardStatus, SnapshotStatus,
    TRANSLOG_NOT_APPLICABLE,
};
