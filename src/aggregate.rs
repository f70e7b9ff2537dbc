//! Consumer side: aggregating decoded status records.
//!
//! A [`StatusReport`] collects one entry per queried shard. A shard whose
//! payload cannot be decoded becomes a [`ShardFailure`] ("status unavailable
//! for this shard"); it never fails the report as a whole.
//!
//! ## Index Rollups
//!
//! | Rollup | Shards counted |
//! |--------|----------------|
//! | `store_size` | all copies reporting a size |
//! | `primary_store_size` | primaries reporting a size |
//! | `translog_operations` | primaries with a translog |
//! | `docs` | primaries with doc counters |

use crate::error::Error;
use shardstat_core::{ByteSize, DocsStatus, IndexShardState, ShardId, ShardStatus};
use shardstat_wire::{decode_shard_status, WireConfig};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// A shard whose status could not be obtained
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShardFailure {
    /// The shard that was queried
    pub shard: ShardId,
    /// Why its status is unavailable
    pub reason: String,
}

/// Status records gathered from many shards
#[derive(Debug, Clone, Default)]
pub struct StatusReport {
    config: WireConfig,
    statuses: Vec<ShardStatus>,
    failures: Vec<ShardFailure>,
}

impl StatusReport {
    /// Empty report decoding with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty report decoding with `config`
    pub fn with_config(config: WireConfig) -> Self {
        StatusReport {
            config,
            ..Default::default()
        }
    }

    /// Decode the payload returned for `shard`
    ///
    /// Returns whether the payload was accepted. Undecodable payloads, and
    /// payloads describing a different shard, are recorded as failures.
    pub fn add_payload(&mut self, shard: ShardId, bytes: &[u8]) -> bool {
        match decode_shard_status(bytes, &self.config) {
            Ok(status) if status.shard_id() == &shard => {
                self.add_status(status);
                true
            }
            Ok(status) => {
                let reason = format!("payload describes shard {}", status.shard_id());
                warn!(%shard, %reason, "status unavailable");
                self.failures.push(ShardFailure { shard, reason });
                false
            }
            Err(e) => {
                self.add_failure(shard, &Error::from(e));
                false
            }
        }
    }

    /// Record an already decoded status
    pub fn add_status(&mut self, status: ShardStatus) {
        debug!(shard = %status.shard_id(), state = %status.state(), "status added");
        self.statuses.push(status);
    }

    /// Record that `shard` produced no usable status
    pub fn add_failure(&mut self, shard: ShardId, error: &Error) {
        warn!(%shard, error = %error, "status unavailable");
        self.failures.push(ShardFailure {
            shard,
            reason: error.to_string(),
        });
    }

    /// All decoded statuses, in arrival order
    pub fn statuses(&self) -> &[ShardStatus] {
        &self.statuses
    }

    /// All failures, in arrival order
    pub fn failures(&self) -> &[ShardFailure] {
        &self.failures
    }

    /// Shards with a status
    pub fn successful_shards(&self) -> usize {
        self.statuses.len()
    }

    /// Shards without a status
    pub fn failed_shards(&self) -> usize {
        self.failures.len()
    }

    /// Shards queried
    pub fn total_shards(&self) -> usize {
        self.successful_shards() + self.failed_shards()
    }

    /// Statuses grouped per index, sorted by index name
    pub fn indices(&self) -> Vec<IndexStatus<'_>> {
        let mut grouped: BTreeMap<&str, Vec<&ShardStatus>> = BTreeMap::new();
        for status in &self.statuses {
            grouped.entry(status.index()).or_default().push(status);
        }
        grouped
            .into_iter()
            .map(|(index, shards)| IndexStatus { index, shards })
            .collect()
    }

    /// Rollup for one index, `None` if no shard of it reported
    pub fn index(&self, name: &str) -> Option<IndexStatus<'_>> {
        let shards: Vec<&ShardStatus> = self
            .statuses
            .iter()
            .filter(|s| s.index() == name)
            .collect();
        if shards.is_empty() {
            None
        } else {
            Some(IndexStatus {
                index: shards[0].index(),
                shards,
            })
        }
    }
}

/// Statuses of the shards of one index
#[derive(Debug, Clone)]
pub struct IndexStatus<'a> {
    index: &'a str,
    shards: Vec<&'a ShardStatus>,
}

impl<'a> IndexStatus<'a> {
    /// Index name
    pub fn index(&self) -> &'a str {
        self.index
    }

    /// Shard copies that reported
    pub fn shards(&self) -> &[&'a ShardStatus] {
        &self.shards
    }

    /// Number of shard copies that reported
    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }

    fn primaries(&self) -> impl Iterator<Item = &'a ShardStatus> + '_ {
        self.shards.iter().copied().filter(|s| s.routing().primary)
    }

    /// Total store size over all copies, `None` if none reported a size
    pub fn store_size(&self) -> Option<ByteSize> {
        sum_sizes(self.shards.iter().copied())
    }

    /// Store size over primaries, `None` if none reported a size
    pub fn primary_store_size(&self) -> Option<ByteSize> {
        sum_sizes(self.primaries())
    }

    /// Translog operations over primaries
    pub fn translog_operations(&self) -> i64 {
        self.primaries()
            .filter_map(|s| s.translog_operations())
            .fold(0i64, |acc, ops| acc.saturating_add(ops))
    }

    /// Document counters summed over primaries, `None` if none reported them
    pub fn docs(&self) -> Option<DocsStatus> {
        self.primaries()
            .filter_map(|s| s.docs().copied())
            .reduce(|acc, d| DocsStatus {
                num_docs: acc.num_docs.saturating_add(d.num_docs),
                max_doc: acc.max_doc.saturating_add(d.max_doc),
                deleted_docs: acc.deleted_docs.saturating_add(d.deleted_docs),
            })
    }

    /// Number of copies in local `state`
    pub fn count_in_state(&self, state: IndexShardState) -> usize {
        self.shards.iter().filter(|s| s.state() == state).count()
    }

    /// Copies with an unfinished recovery
    pub fn recovering(&self) -> impl Iterator<Item = &'a ShardStatus> + '_ {
        self.shards.iter().copied().filter(|s| s.is_recovering())
    }
}

fn sum_sizes<'a>(shards: impl Iterator<Item = &'a ShardStatus>) -> Option<ByteSize> {
    shards
        .filter_map(|s| s.store_size())
        .reduce(|acc, size| acc + size)
}
