//! Shard status records
//!
//! A [`ShardStatus`] is a point-in-time snapshot of one shard copy. Besides
//! the always-present identity and local state it carries four independently
//! optional sub-records:
//!
//! - [`DocsStatus`]: document counters of the shard index
//! - peer [`RecoveryStatus`]: recovery from another live copy
//! - gateway [`RecoveryStatus`]: recovery from the durable store
//! - [`SnapshotStatus`]: last or ongoing snapshot to the durable store
//!
//! Records are plain values. Nothing here validates the numbers handed in;
//! the producer is trusted to be internally consistent.

use crate::shard::{ShardId, ShardRouting};
use crate::size::ByteSize;
use crate::stage::{IndexShardState, RecoveryStage, SnapshotStage};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Literal value written for "not applicable" translog fields
pub const TRANSLOG_NOT_APPLICABLE: i64 = -1;

// ============================================================================
// DocsStatus
// ============================================================================

/// Document counters of a shard index
///
/// Conceptually `max_doc >= num_docs` and
/// `deleted_docs == max_doc - num_docs`; neither is enforced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocsStatus {
    /// Live documents
    pub num_docs: u32,
    /// Highest document number plus one, deletions included
    pub max_doc: u32,
    /// Deleted documents not yet merged away
    pub deleted_docs: u32,
}

impl DocsStatus {
    /// Create a docs status from all three counters
    pub fn new(num_docs: u32, max_doc: u32, deleted_docs: u32) -> Self {
        Self {
            num_docs,
            max_doc,
            deleted_docs,
        }
    }

    /// Create a docs status, deriving `deleted_docs`
    pub fn from_counts(num_docs: u32, max_doc: u32) -> Self {
        Self::new(num_docs, max_doc, max_doc.saturating_sub(num_docs))
    }

    /// Whether the counters agree with each other
    pub fn is_consistent(&self) -> bool {
        self.max_doc >= self.num_docs && self.deleted_docs == self.max_doc - self.num_docs
    }
}

// ============================================================================
// RecoveryStatus
// ============================================================================

/// Which recovery slot of a [`ShardStatus`] a [`RecoveryStatus`] lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecoveryKind {
    /// Copying data from another live copy
    Peer,
    /// Restoring from the durable store
    Gateway,
}

impl RecoveryKind {
    /// Both kinds, in wire order
    pub const ALL: [RecoveryKind; 2] = [RecoveryKind::Peer, RecoveryKind::Gateway];

    /// Lower-case name
    pub fn name(self) -> &'static str {
        match self {
            RecoveryKind::Peer => "peer",
            RecoveryKind::Gateway => "gateway",
        }
    }
}

/// Progress of a recovery, live while it runs and a summary once done
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecoveryStatus {
    /// Current stage
    pub stage: RecoveryStage,
    /// Start time, milliseconds since the Unix epoch
    pub start_time: u64,
    /// Elapsed time in milliseconds
    pub time: u64,
    /// Total size of the index being recovered, in bytes
    pub index_size: u64,
    /// Bytes reused from files already present locally
    pub reused_index_size: u64,
    /// Bytes recovered so far
    pub recovered_index_size: u64,
    /// Translog operations replayed so far
    pub recovered_translog_operations: u64,
}

impl RecoveryStatus {
    /// A recovery that just entered `stage` at `start_time`
    pub fn new(stage: RecoveryStage, start_time: u64) -> Self {
        Self {
            stage,
            start_time,
            time: 0,
            index_size: 0,
            reused_index_size: 0,
            recovered_index_size: 0,
            recovered_translog_operations: 0,
        }
    }

    /// Bytes that have to be transferred
    pub fn expected_recovered_index_size(&self) -> u64 {
        self.index_size.saturating_sub(self.reused_index_size)
    }

    /// Percentage of the expected bytes recovered so far
    ///
    /// A recovery that has nothing to transfer counts as complete.
    pub fn index_recovery_progress(&self) -> f64 {
        let expected = self.expected_recovered_index_size();
        if expected == 0 {
            return 100.0;
        }
        (self.recovered_index_size as f64 / expected as f64 * 100.0).min(100.0)
    }

    /// Elapsed time
    pub fn elapsed(&self) -> Duration {
        Duration::from_millis(self.time)
    }

    /// Whether the recovery has finished
    pub fn is_done(&self) -> bool {
        self.stage == RecoveryStage::Done
    }
}

// ============================================================================
// SnapshotStatus
// ============================================================================

/// Progress of the current snapshot to the gateway, or of the last one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SnapshotStatus {
    /// Current stage
    pub stage: SnapshotStage,
    /// Start time, milliseconds since the Unix epoch
    pub start_time: u64,
    /// Elapsed time in milliseconds
    pub time: u64,
    /// Bytes of index data in the snapshot
    pub index_size: u64,
    /// Translog operations expected in the snapshot
    pub expected_number_of_operations: u32,
}

impl SnapshotStatus {
    /// Create a snapshot status
    pub fn new(
        stage: SnapshotStage,
        start_time: u64,
        time: u64,
        index_size: u64,
        expected_number_of_operations: u32,
    ) -> Self {
        Self {
            stage,
            start_time,
            time,
            index_size,
            expected_number_of_operations,
        }
    }

    /// Elapsed time
    pub fn elapsed(&self) -> Duration {
        Duration::from_millis(self.time)
    }

    /// Whether the snapshot completed successfully
    pub fn is_done(&self) -> bool {
        self.stage == SnapshotStage::Done
    }

    /// Whether the snapshot failed
    pub fn is_failed(&self) -> bool {
        self.stage == SnapshotStage::Failure
    }
}

// ============================================================================
// ShardStatus
// ============================================================================

/// Point-in-time status of one shard copy
///
/// # Examples
///
/// ```
/// use shardstat_core::{ByteSize, DocsStatus, IndexShardState, ShardId, ShardStatus};
///
/// let status = ShardStatus::new(ShardId::new("orders", 2), IndexShardState::Started)
///     .with_store_size(ByteSize::bytes_of(512_000))
///     .with_translog(7, 42)
///     .with_docs(DocsStatus::new(100, 110, 10));
///
/// assert_eq!(status.translog_id(), Some(7));
/// assert!(status.peer_recovery().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ShardStatusFields")]
pub struct ShardStatus {
    routing: ShardRouting,
    state: IndexShardState,
    store_size: Option<ByteSize>,
    translog_id: Option<i64>,
    translog_operations: Option<i64>,
    docs: Option<DocsStatus>,
    peer_recovery: Option<RecoveryStatus>,
    gateway_recovery: Option<RecoveryStatus>,
    gateway_snapshot: Option<SnapshotStatus>,
}

/// Map the literal "not applicable" value to `None`
fn translog_field(value: Option<i64>) -> Option<i64> {
    value.filter(|v| *v != TRANSLOG_NOT_APPLICABLE)
}

/// Deserialized form of [`ShardStatus`], normalized on conversion
#[derive(Deserialize)]
struct ShardStatusFields {
    routing: ShardRouting,
    state: IndexShardState,
    store_size: Option<ByteSize>,
    translog_id: Option<i64>,
    translog_operations: Option<i64>,
    docs: Option<DocsStatus>,
    peer_recovery: Option<RecoveryStatus>,
    gateway_recovery: Option<RecoveryStatus>,
    gateway_snapshot: Option<SnapshotStatus>,
}

impl From<ShardStatusFields> for ShardStatus {
    fn from(fields: ShardStatusFields) -> Self {
        ShardStatus {
            routing: fields.routing,
            state: fields.state,
            store_size: fields.store_size,
            translog_id: translog_field(fields.translog_id),
            translog_operations: translog_field(fields.translog_operations),
            docs: fields.docs,
            peer_recovery: fields.peer_recovery,
            gateway_recovery: fields.gateway_recovery,
            gateway_snapshot: fields.gateway_snapshot,
        }
    }
}

impl ShardStatus {
    /// Status for `routing` in local `state`, every optional field absent
    pub fn new(routing: impl Into<ShardRouting>, state: IndexShardState) -> Self {
        Self {
            routing: routing.into(),
            state,
            store_size: None,
            translog_id: None,
            translog_operations: None,
            docs: None,
            peer_recovery: None,
            gateway_recovery: None,
            gateway_snapshot: None,
        }
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    /// Routing table entry of the shard copy
    pub fn routing(&self) -> &ShardRouting {
        &self.routing
    }

    /// Shard identity
    pub fn shard_id(&self) -> &ShardId {
        &self.routing.shard_id
    }

    /// Index name
    pub fn index(&self) -> &str {
        self.routing.index()
    }

    /// Local lifecycle state
    pub fn state(&self) -> IndexShardState {
        self.state
    }

    /// Size of the shard's index storage, `None` if it could not be determined
    pub fn store_size(&self) -> Option<ByteSize> {
        self.store_size
    }

    /// Transaction log id, `None` if not applicable
    pub fn translog_id(&self) -> Option<i64> {
        self.translog_id
    }

    /// Operations in the transaction log, `None` if not applicable
    pub fn translog_operations(&self) -> Option<i64> {
        self.translog_operations
    }

    /// Document counters, `None` if not applicable
    pub fn docs(&self) -> Option<&DocsStatus> {
        self.docs.as_ref()
    }

    /// Peer recovery status, `None` if the shard never peer-recovered
    pub fn peer_recovery(&self) -> Option<&RecoveryStatus> {
        self.peer_recovery.as_ref()
    }

    /// Gateway recovery status, `None` if the shard never gateway-recovered
    pub fn gateway_recovery(&self) -> Option<&RecoveryStatus> {
        self.gateway_recovery.as_ref()
    }

    /// Recovery status in the slot for `kind`
    pub fn recovery(&self, kind: RecoveryKind) -> Option<&RecoveryStatus> {
        match kind {
            RecoveryKind::Peer => self.peer_recovery(),
            RecoveryKind::Gateway => self.gateway_recovery(),
        }
    }

    /// Current snapshot to the gateway, or the last one if none is running
    pub fn gateway_snapshot(&self) -> Option<&SnapshotStatus> {
        self.gateway_snapshot.as_ref()
    }

    /// Whether any recovery slot holds an unfinished recovery
    pub fn is_recovering(&self) -> bool {
        RecoveryKind::ALL
            .iter()
            .filter_map(|kind| self.recovery(*kind))
            .any(|recovery| !recovery.is_done())
    }

    // ------------------------------------------------------------------------
    // Whole-value setters
    // ------------------------------------------------------------------------

    /// Replace the store size
    pub fn set_store_size(&mut self, store_size: Option<ByteSize>) {
        self.store_size = store_size;
    }

    /// Replace the translog id; the literal -1 means "not applicable"
    pub fn set_translog_id(&mut self, translog_id: Option<i64>) {
        self.translog_id = translog_field(translog_id);
    }

    /// Replace the translog operation count; the literal -1 means "not applicable"
    pub fn set_translog_operations(&mut self, translog_operations: Option<i64>) {
        self.translog_operations = translog_field(translog_operations);
    }

    /// Replace the document counters
    pub fn set_docs(&mut self, docs: Option<DocsStatus>) {
        self.docs = docs;
    }

    /// Replace the recovery status in the slot for `kind`
    pub fn set_recovery(&mut self, kind: RecoveryKind, recovery: Option<RecoveryStatus>) {
        match kind {
            RecoveryKind::Peer => self.peer_recovery = recovery,
            RecoveryKind::Gateway => self.gateway_recovery = recovery,
        }
    }

    /// Replace the gateway snapshot status
    pub fn set_gateway_snapshot(&mut self, snapshot: Option<SnapshotStatus>) {
        self.gateway_snapshot = snapshot;
    }

    // ------------------------------------------------------------------------
    // Builder-style setters
    // ------------------------------------------------------------------------

    /// With a known store size
    pub fn with_store_size(mut self, store_size: ByteSize) -> Self {
        self.set_store_size(Some(store_size));
        self
    }

    /// With translog id and operation count
    pub fn with_translog(mut self, translog_id: i64, translog_operations: i64) -> Self {
        self.set_translog_id(Some(translog_id));
        self.set_translog_operations(Some(translog_operations));
        self
    }

    /// With document counters
    pub fn with_docs(mut self, docs: DocsStatus) -> Self {
        self.set_docs(Some(docs));
        self
    }

    /// With a peer recovery status
    pub fn with_peer_recovery(mut self, recovery: RecoveryStatus) -> Self {
        self.set_recovery(RecoveryKind::Peer, Some(recovery));
        self
    }

    /// With a gateway recovery status
    pub fn with_gateway_recovery(mut self, recovery: RecoveryStatus) -> Self {
        self.set_recovery(RecoveryKind::Gateway, Some(recovery));
        self
    }

    /// With a gateway snapshot status
    pub fn with_gateway_snapshot(mut self, snapshot: SnapshotStatus) -> Self {
        self.set_gateway_snapshot(Some(snapshot));
        self
    }
}
