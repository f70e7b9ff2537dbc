//! Public types for the shardstat API.
//!
//! This module re-exports types from internal crates with a clean public interface.

// Identity and routing
pub use shardstat_core::{ShardId, ShardRouting};

// Stages
pub use shardstat_core::{
    IndexShardState, RecoveryStage, ShardRoutingState, SnapshotStage, StageCode,
};

// Status records
pub use shardstat_core::{
    ByteSize, DocsStatus, RecoveryKind, RecoveryStatus, ShardStatus, SnapshotStatus,
};

// Wire layer
pub use shardstat_wire::{FormatVersion, WireConfig, WireError};
