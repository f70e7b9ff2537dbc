//! Shard identity and routing
//!
//! - [`ShardId`]: index name plus shard ordinal
//! - [`ShardRouting`]: a shard copy's entry in the routing table, which is
//!   the identity a status record is built for

use crate::stage::ShardRoutingState;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies one partition of an index
///
/// Ordered by index name, then ordinal.
///
/// # Examples
///
/// ```
/// use shardstat_core::ShardId;
///
/// let id = ShardId::new("orders", 2);
/// assert_eq!(id.to_string(), "[orders][2]");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ShardId {
    /// Name of the index this shard belongs to
    pub index: String,
    /// Ordinal of the shard within its index
    pub id: u32,
}

impl ShardId {
    /// Create a new shard identity
    pub fn new(index: impl Into<String>, id: u32) -> Self {
        Self {
            index: index.into(),
            id,
        }
    }
}

impl fmt::Display for ShardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}][{}]", self.index, self.id)
    }
}

/// Routing table entry for one shard copy
///
/// Carries the cluster-wide view of the copy (where it lives, whether it is
/// the primary, its allocation state). The local lifecycle state of the
/// shard lives on the status record instead.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShardRouting {
    /// Which shard this copy belongs to
    pub shard_id: ShardId,
    /// Node currently holding the copy, if assigned
    pub current_node_id: Option<String>,
    /// Node the copy is relocating to, if relocating
    pub relocating_node_id: Option<String>,
    /// Whether this copy is the primary
    pub primary: bool,
    /// Allocation state in the routing table
    pub state: ShardRoutingState,
    /// Routing table version this entry was taken from
    pub version: i64,
}

impl ShardRouting {
    /// An unassigned copy of `shard_id`
    pub fn unassigned(shard_id: ShardId, primary: bool) -> Self {
        Self {
            shard_id,
            current_node_id: None,
            relocating_node_id: None,
            primary,
            state: ShardRoutingState::Unassigned,
            version: 0,
        }
    }

    /// A started copy of `shard_id` living on `node_id`
    pub fn started(shard_id: ShardId, node_id: impl Into<String>, primary: bool) -> Self {
        Self {
            shard_id,
            current_node_id: Some(node_id.into()),
            relocating_node_id: None,
            primary,
            state: ShardRoutingState::Started,
            version: 0,
        }
    }

    /// Set the routing table version
    pub fn with_version(mut self, version: i64) -> Self {
        self.version = version;
        self
    }

    /// Name of the index the copy belongs to
    pub fn index(&self) -> &str {
        &self.shard_id.index
    }

    /// Ordinal of the shard
    pub fn id(&self) -> u32 {
        self.shard_id.id
    }

    /// Whether the copy is assigned to a node
    pub fn assigned(&self) -> bool {
        self.current_node_id.is_some()
    }

    /// Whether the copy is relocating to another node
    pub fn relocating(&self) -> bool {
        self.state == ShardRoutingState::Relocating
    }
}

impl From<ShardId> for ShardRouting {
    /// A bare identity becomes an unassigned primary
    fn from(shard_id: ShardId) -> Self {
        ShardRouting::unassigned(shard_id, true)
    }
}

impl fmt::Display for ShardRouting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, node[{}], ",
            self.shard_id,
            self.current_node_id.as_deref().unwrap_or("-")
        )?;
        if let Some(target) = &self.relocating_node_id {
            write!(f, "relocating [{}], ", target)?;
        }
        write!(
            f,
            "{}, s[{}]",
            if self.primary { "[P]" } else { "[R]" },
            self.state
        )
    }
}
