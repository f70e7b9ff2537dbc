//! Shared fixtures

use shardstat::prelude::*;

/// The reference record: shard ("orders", 2), started, 512000 bytes,
/// translog 7/42, docs {100, 110, 10}, no recovery or snapshot.
pub fn orders_shard() -> ShardStatus {
    ShardStatus::new(ShardId::new("orders", 2), IndexShardState::Started)
        .with_store_size(ByteSize::bytes_of(512_000))
        .with_translog(7, 42)
        .with_docs(DocsStatus::new(100, 110, 10))
}

pub fn recovery(stage: RecoveryStage) -> RecoveryStatus {
    RecoveryStatus {
        stage,
        start_time: 1_700_000_000_000,
        time: 2_500,
        index_size: 10 * 1024 * 1024,
        reused_index_size: 1024 * 1024,
        recovered_index_size: 4 * 1024 * 1024,
        recovered_translog_operations: 321,
    }
}

pub fn snapshot(stage: SnapshotStage) -> SnapshotStatus {
    SnapshotStatus::new(stage, 1_700_000_100_000, 800, 9 * 1024 * 1024, 77)
}

/// Every record reachable by toggling the seven optional fields of
/// `orders_shard` on and off.
pub fn all_presence_combinations() -> Vec<ShardStatus> {
    (0u8..128)
        .map(|mask| {
            let mut status =
                ShardStatus::new(ShardId::new("orders", 2), IndexShardState::Started);
            if mask & 1 != 0 {
                status.set_store_size(Some(ByteSize::bytes_of(512_000)));
            }
            if mask & 2 != 0 {
                status.set_translog_id(Some(7));
            }
            if mask & 4 != 0 {
                status.set_translog_operations(Some(42));
            }
            if mask & 8 != 0 {
                status.set_docs(Some(DocsStatus::new(100, 110, 10)));
            }
            if mask & 16 != 0 {
                status.set_recovery(RecoveryKind::Peer, Some(recovery(RecoveryStage::Index)));
            }
            if mask & 32 != 0 {
                status.set_recovery(RecoveryKind::Gateway, Some(recovery(RecoveryStage::Done)));
            }
            if mask & 64 != 0 {
                status.set_gateway_snapshot(Some(snapshot(SnapshotStage::Translog)));
            }
            status
        })
        .collect()
}
