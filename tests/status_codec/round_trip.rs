//! decode(encode(x)) == x

use crate::common::*;
use shardstat::prelude::*;
use shardstat::{decode, encode, ShardRoutingState, StageCode};

#[test]
fn test_every_presence_combination_round_trips() {
    for status in all_presence_combinations() {
        let bytes = encode(&status).unwrap();
        assert_eq!(decode(&bytes).unwrap(), status);
    }
}

#[test]
fn test_every_local_state_round_trips() {
    for state in IndexShardState::ALL {
        let status = ShardStatus::new(ShardId::new("orders", 0), *state);
        assert_eq!(decode(&encode(&status).unwrap()).unwrap().state(), *state);
    }
}

#[test]
fn test_every_recovery_stage_round_trips_in_both_slots() {
    for stage in RecoveryStage::ALL {
        for kind in RecoveryKind::ALL {
            let mut status = orders_shard();
            status.set_recovery(kind, Some(recovery(*stage)));
            let decoded = decode(&encode(&status).unwrap()).unwrap();
            assert_eq!(decoded.recovery(kind).map(|r| r.stage), Some(*stage));
            assert_eq!(decoded, status);
        }
    }
}

#[test]
fn test_every_snapshot_stage_round_trips() {
    for stage in SnapshotStage::ALL {
        let status = orders_shard().with_gateway_snapshot(snapshot(*stage));
        assert_eq!(decode(&encode(&status).unwrap()).unwrap(), status);
    }
}

#[test]
fn test_every_routing_state_round_trips() {
    for state in ShardRoutingState::ALL {
        let mut routing = ShardRouting::started(ShardId::new("orders", 4), "node-a", false);
        routing.state = *state;
        routing.relocating_node_id = Some("node-b".to_string());
        let status = ShardStatus::new(routing, IndexShardState::Relocated);
        assert_eq!(decode(&encode(&status).unwrap()).unwrap(), status);
    }
}

#[test]
fn test_extreme_magnitudes_round_trip() {
    let recovery = RecoveryStatus {
        stage: RecoveryStage::Finalize,
        start_time: u64::MAX,
        time: 0,
        index_size: u64::MAX,
        reused_index_size: 1,
        recovered_index_size: u64::MAX - 1,
        recovered_translog_operations: 0,
    };
    let status = orders_shard()
        .with_store_size(ByteSize::bytes_of(u64::MAX))
        .with_translog(i64::MIN, i64::MAX)
        .with_docs(DocsStatus::new(u32::MAX, u32::MAX, 0))
        .with_peer_recovery(recovery)
        .with_gateway_snapshot(SnapshotStatus::new(
            SnapshotStage::Failure,
            u64::MAX,
            u64::MAX,
            u64::MAX,
            u32::MAX,
        ));
    assert_eq!(decode(&encode(&status).unwrap()).unwrap(), status);
}

#[test]
fn test_unicode_index_names_round_trip() {
    let status = ShardStatus::new(ShardId::new("commandes-été", 1), IndexShardState::Closed);
    assert_eq!(decode(&encode(&status).unwrap()).unwrap(), status);
}
