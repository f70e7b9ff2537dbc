//! Presence flags and translog sentinels

use crate::common::*;
use shardstat::prelude::*;
use shardstat::{decode, encode};

#[test]
fn test_docs_only_payload_is_shorter_than_all_present() {
    let docs_only = ShardStatus::new(ShardId::new("orders", 2), IndexShardState::Started)
        .with_docs(DocsStatus::new(100, 110, 10));
    let all_present = docs_only
        .clone()
        .with_peer_recovery(recovery(RecoveryStage::Index))
        .with_gateway_recovery(recovery(RecoveryStage::Done))
        .with_gateway_snapshot(snapshot(SnapshotStage::Done));

    let short = encode(&docs_only).unwrap();
    let long = encode(&all_present).unwrap();
    assert!(short.len() < long.len());

    let decoded = decode(&short).unwrap();
    assert_eq!(decoded.docs(), Some(&DocsStatus::new(100, 110, 10)));
    assert!(decoded.peer_recovery().is_none());
    assert!(decoded.gateway_recovery().is_none());
    assert!(decoded.gateway_snapshot().is_none());
    assert!(decoded.store_size().is_none());
}

#[test]
fn test_each_sub_record_changes_only_its_own_presence() {
    let base = ShardStatus::new(ShardId::new("orders", 2), IndexShardState::Started);
    let base_len = encode(&base).unwrap().len();

    let with_docs = encode(&base.clone().with_docs(DocsStatus::default())).unwrap();
    assert_eq!(with_docs.len(), base_len + 12);

    let with_snapshot = encode(&base.clone().with_gateway_snapshot(SnapshotStatus::new(
        SnapshotStage::None,
        0,
        0,
        0,
        0,
    )))
    .unwrap();
    assert_eq!(with_snapshot.len(), base_len + 5);

    let with_peer = encode(&base.with_peer_recovery(RecoveryStatus::new(RecoveryStage::Init, 0)))
        .unwrap();
    assert_eq!(with_peer.len(), base_len + 7);
}

#[test]
fn test_sentinel_translog_round_trips_as_absent() {
    let mut status = orders_shard();
    status.set_translog_id(Some(-1));
    status.set_translog_operations(Some(-1));

    let decoded = decode(&encode(&status).unwrap()).unwrap();
    assert_eq!(decoded.translog_id(), None);
    assert_eq!(decoded.translog_operations(), None);
    assert_eq!(decoded, status);
}

#[test]
fn test_sentinel_is_distinguishable_from_zero() {
    let absent = ShardStatus::new(ShardId::new("orders", 2), IndexShardState::Started);
    let zero = absent.clone().with_translog(0, 0);

    let absent_bytes = encode(&absent).unwrap();
    let zero_bytes = encode(&zero).unwrap();
    assert_eq!(absent_bytes.len(), zero_bytes.len());
    assert_ne!(absent_bytes, zero_bytes);

    assert_eq!(decode(&zero_bytes).unwrap().translog_id(), Some(0));
    assert_eq!(decode(&absent_bytes).unwrap().translog_id(), None);
}
