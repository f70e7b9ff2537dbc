//! Reference scenario and end-to-end flows

use crate::common::*;
use shardstat::prelude::*;
use shardstat::{decode, encode, encode_from_provider};

#[test]
fn test_orders_shard_reference_scenario() {
    let status = orders_shard();
    let bytes = encode(&status).unwrap();
    let decoded = decode(&bytes).unwrap();

    assert_eq!(decoded, status);
    assert_eq!(decoded.shard_id(), &ShardId::new("orders", 2));
    assert_eq!(decoded.state(), IndexShardState::Started);
    assert_eq!(decoded.store_size(), Some(ByteSize::bytes_of(512_000)));
    assert_eq!(decoded.translog_id(), Some(7));
    assert_eq!(decoded.translog_operations(), Some(42));
    assert_eq!(decoded.docs(), Some(&DocsStatus::new(100, 110, 10)));
    assert!(decoded.peer_recovery().is_none());
    assert!(decoded.gateway_recovery().is_none());
    assert!(decoded.gateway_snapshot().is_none());
}

#[test]
fn test_decoded_records_are_shareable_across_threads() {
    let status = std::sync::Arc::new(decode(&encode(&orders_shard()).unwrap()).unwrap());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let status = std::sync::Arc::clone(&status);
            std::thread::spawn(move || status.docs().map(|d| d.num_docs))
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), Some(100));
    }
}

struct PrimaryOnNode {
    id: u32,
    docs: u32,
}

impl ShardStateProvider for PrimaryOnNode {
    fn routing(&self) -> ShardRouting {
        ShardRouting::started(ShardId::new("orders", self.id), "node-1", true)
    }

    fn state(&self) -> IndexShardState {
        IndexShardState::Started
    }

    fn store_size(&self) -> Option<ByteSize> {
        Some(ByteSize::kb(u64::from(self.docs)))
    }

    fn docs(&self) -> Option<DocsStatus> {
        Some(DocsStatus::from_counts(self.docs, self.docs))
    }
}

#[test]
fn test_producer_to_report_flow() {
    let config = WireConfig::default();
    let mut report = StatusReport::with_config(config.clone());

    for (id, docs) in [(0, 10), (1, 20), (2, 30)] {
        let provider = PrimaryOnNode { id, docs };
        let bytes = encode_from_provider(&provider, &config).unwrap();
        assert!(report.add_payload(ShardId::new("orders", id), &bytes));
    }
    // A shard that answered with garbage
    report.add_payload(ShardId::new("orders", 3), &[1, 0xFF]);

    assert_eq!(report.successful_shards(), 3);
    assert_eq!(report.failed_shards(), 1);

    let orders = report.index("orders").unwrap();
    assert_eq!(orders.docs().map(|d| d.num_docs), Some(60));
    assert_eq!(orders.store_size(), Some(ByteSize::kb(60)));
}
