//! Producer side: building status records from live shard state.
//!
//! The node that owns a shard implements [`ShardStateProvider`] over its
//! routing table, store and recovery subsystems. [`collect_status`] turns
//! one such provider into a [`ShardStatus`] snapshot.

use crate::error::Result;
use shardstat_core::{
    ByteSize, DocsStatus, IndexShardState, RecoveryKind, RecoveryStatus, ShardRouting,
    ShardStatus, SnapshotStatus,
};
use shardstat_wire::{encode_shard_status, WireConfig};
use tracing::debug;

/// Position of a shard's transaction log
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TranslogPosition {
    /// Translog id
    pub id: i64,
    /// Operations currently held in the translog
    pub operations: i64,
}

/// Live state of one shard copy, as seen by the node holding it
///
/// Only identity and local state are mandatory. Every other probe defaults
/// to "not available", which leaves the matching field absent.
pub trait ShardStateProvider {
    /// Routing table entry of the copy
    fn routing(&self) -> ShardRouting;

    /// Local lifecycle state
    fn state(&self) -> IndexShardState;

    /// On-disk size of the shard index, `None` if it cannot be determined
    fn store_size(&self) -> Option<ByteSize> {
        None
    }

    /// Translog position, `None` if the shard has no open translog
    fn translog(&self) -> Option<TranslogPosition> {
        None
    }

    /// Document counters, `None` if no searcher is available
    fn docs(&self) -> Option<DocsStatus> {
        None
    }

    /// Ongoing or last peer recovery
    fn peer_recovery(&self) -> Option<RecoveryStatus> {
        None
    }

    /// Ongoing or last gateway recovery
    fn gateway_recovery(&self) -> Option<RecoveryStatus> {
        None
    }

    /// Ongoing or last gateway snapshot
    fn gateway_snapshot(&self) -> Option<SnapshotStatus> {
        None
    }
}

/// Snapshot the current state of `provider`
pub fn collect_status<P: ShardStateProvider + ?Sized>(provider: &P) -> ShardStatus {
    let mut status = ShardStatus::new(provider.routing(), provider.state());
    status.set_store_size(provider.store_size());
    if let Some(translog) = provider.translog() {
        status.set_translog_id(Some(translog.id));
        status.set_translog_operations(Some(translog.operations));
    }
    status.set_docs(provider.docs());
    status.set_recovery(RecoveryKind::Peer, provider.peer_recovery());
    status.set_recovery(RecoveryKind::Gateway, provider.gateway_recovery());
    status.set_gateway_snapshot(provider.gateway_snapshot());
    debug!(shard = %status.shard_id(), state = %status.state(), "collected shard status");
    status
}

/// Snapshot `provider` and encode the result
pub fn encode_from_provider<P: ShardStateProvider + ?Sized>(
    provider: &P,
    config: &WireConfig,
) -> Result<Vec<u8>> {
    let status = collect_status(provider);
    Ok(encode_shard_status(&status, config)?)
}
