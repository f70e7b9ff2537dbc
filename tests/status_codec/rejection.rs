//! Truncated and foreign payloads

use crate::common::*;
use shardstat::prelude::*;
use shardstat::{decode, encode, StageCode, WireError};

/// Offset of the local state byte in an encoded `orders_shard` payload
fn state_offset() -> usize {
    // version, routing: "orders" (1 + 6), shard vint, version i64,
    // two absent node ids, primary flag, routing state
    1 + 7 + 1 + 8 + 1 + 1 + 1 + 1
}

#[test]
fn test_every_prefix_fails_as_truncated() {
    for status in [
        orders_shard(),
        orders_shard()
            .with_peer_recovery(recovery(RecoveryStage::Translog))
            .with_gateway_recovery(recovery(RecoveryStage::Done))
            .with_gateway_snapshot(snapshot(SnapshotStage::Finalize)),
    ] {
        let bytes = encode(&status).unwrap();
        for len in 0..bytes.len() {
            let err = decode(&bytes[..len]).unwrap_err();
            assert!(err.is_truncated(), "prefix {len}: {err}");
        }
    }
}

#[test]
fn test_unknown_local_state_is_rejected() {
    let mut bytes = encode(&orders_shard()).unwrap();
    assert_eq!(bytes[state_offset()], IndexShardState::Started.code());
    bytes[state_offset()] = 17;

    let err = decode(&bytes).unwrap_err();
    assert!(err.is_version_mismatch());
    match err.wire_error() {
        WireError::UnknownStageCode(unknown) => {
            assert_eq!(unknown.stage, "index shard state");
            assert_eq!(unknown.code, 17);
        }
        other => panic!("expected UnknownStageCode, got {other:?}"),
    }
}

#[test]
fn test_unknown_recovery_stage_is_rejected() {
    let status = ShardStatus::new(ShardId::new("orders", 2), IndexShardState::Recovering)
        .with_peer_recovery(recovery(RecoveryStage::Index));
    let mut bytes = encode(&status).unwrap();

    // state, store flag, 2 x i64, docs flag, peer flag, then the stage byte
    let stage_at = state_offset() + 1 + 1 + 16 + 1 + 1;
    assert_eq!(bytes[stage_at], 1);
    bytes[stage_at] = 200;

    let err = decode(&bytes).unwrap_err();
    assert!(matches!(err.wire_error(), WireError::UnknownStageCode(u) if u.code == 200));
}

#[test]
fn test_unknown_snapshot_stage_is_rejected() {
    let status = ShardStatus::new(ShardId::new("orders", 2), IndexShardState::Started)
        .with_gateway_snapshot(snapshot(SnapshotStage::Done));
    let mut bytes = encode(&status).unwrap();

    // state, store flag, 2 x i64, docs/peer/gateway flags, snapshot flag
    let stage_at = state_offset() + 1 + 1 + 16 + 3 + 1;
    assert_eq!(bytes[stage_at], 4);
    bytes[stage_at] = 6;

    assert!(decode(&bytes).unwrap_err().is_version_mismatch());
}

#[test]
fn test_corrupt_presence_flag_is_malformed() {
    let mut bytes = encode(&orders_shard()).unwrap();
    bytes[state_offset() + 1] = 7;

    let err = decode(&bytes).unwrap_err();
    assert!(matches!(err, Error::Malformed(_)));
}

#[test]
fn test_future_version_is_a_mismatch() {
    let mut bytes = encode(&orders_shard()).unwrap();
    bytes[0] = 9;
    let err = decode(&bytes).unwrap_err();
    assert!(err.is_version_mismatch());
    assert!(matches!(err.wire_error(), WireError::UnsupportedVersion(9)));
}

#[test]
fn test_record_that_cannot_decode_is_not_encoded() {
    let status = ShardStatus::new(ShardId::new("x".repeat(70_000), 0), IndexShardState::Started);
    let err = encode(&status).unwrap_err();
    assert!(matches!(err, Error::Malformed(_)));
    assert!(matches!(
        err.wire_error(),
        WireError::StringTooLong { field: "index", len: 70_000, .. }
    ));
}
