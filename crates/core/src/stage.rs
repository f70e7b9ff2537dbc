//! Lifecycle stage enumerations
//!
//! Every status kind carries its own closed enumeration of stages. Each member
//! maps to a stable single-byte code, which is what travels on the wire.
//!
//! ## Code Tables (format version 1)
//!
//! These codes are frozen. New members may be appended with new codes,
//! existing codes must never be reassigned.
//!
//! | Enumeration | Members |
//! |-------------|---------|
//! | IndexShardState | Created=0, Recovering=1, Started=2, Relocated=3, Closed=4 |
//! | RecoveryStage | Init=0, Index=1, Translog=2, Finalize=3, Done=4 |
//! | SnapshotStage | None=0, Index=1, Translog=2, Finalize=3, Done=4, Failure=5 |
//! | ShardRoutingState | Unassigned=1, Initializing=2, Started=3, Relocating=4 |

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A stage byte did not match any member of the enumeration being decoded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unknown {stage} code: {code}")]
pub struct UnknownStageCode {
    /// Name of the enumeration that rejected the code
    pub stage: &'static str,
    /// The offending code
    pub code: u8,
}

/// A stage name did not match any member of the enumeration being parsed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {stage} name: {name}")]
pub struct UnknownStageName {
    /// Name of the enumeration that rejected the name
    pub stage: &'static str,
    /// The offending name
    pub name: String,
}

/// Common contract of all stage enumerations
///
/// `code` and `from_code` are exact inverses over `ALL`.
pub trait StageCode: Copy + Sized + 'static {
    /// Enumeration name used in error messages
    const NAME: &'static str;

    /// Every member, in code order
    const ALL: &'static [Self];

    /// Stable wire code of this member
    fn code(self) -> u8;

    /// Lower-case display name of this member
    fn label(self) -> &'static str;

    /// Resolve a wire code, failing on codes outside the enumeration
    fn from_code(code: u8) -> Result<Self, UnknownStageCode> {
        Self::ALL
            .iter()
            .copied()
            .find(|member| member.code() == code)
            .ok_or(UnknownStageCode {
                stage: Self::NAME,
                code,
            })
    }

    /// Resolve a display name (case-insensitive)
    fn from_label(name: &str) -> Result<Self, UnknownStageName> {
        Self::ALL
            .iter()
            .copied()
            .find(|member| member.label().eq_ignore_ascii_case(name))
            .ok_or_else(|| UnknownStageName {
                stage: Self::NAME,
                name: name.to_string(),
            })
    }
}

// ============================================================================
// IndexShardState
// ============================================================================

/// Local lifecycle state of a shard on the node that owns it
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexShardState {
    /// Allocated, nothing recovered yet
    Created,
    /// Recovering from a peer or the gateway
    Recovering,
    /// Serving operations
    Started,
    /// Handed off to another node
    Relocated,
    /// Closed, no longer serving
    Closed,
}

impl StageCode for IndexShardState {
    const NAME: &'static str = "index shard state";

    const ALL: &'static [Self] = &[
        IndexShardState::Created,
        IndexShardState::Recovering,
        IndexShardState::Started,
        IndexShardState::Relocated,
        IndexShardState::Closed,
    ];

    fn code(self) -> u8 {
        match self {
            IndexShardState::Created => 0,
            IndexShardState::Recovering => 1,
            IndexShardState::Started => 2,
            IndexShardState::Relocated => 3,
            IndexShardState::Closed => 4,
        }
    }

    fn label(self) -> &'static str {
        match self {
            IndexShardState::Created => "created",
            IndexShardState::Recovering => "recovering",
            IndexShardState::Started => "started",
            IndexShardState::Relocated => "relocated",
            IndexShardState::Closed => "closed",
        }
    }
}

// ============================================================================
// RecoveryStage
// ============================================================================

/// Stage of a shard recovery
///
/// Shared by peer and gateway recovery; the two only differ in which
/// subsystem reports them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecoveryStage {
    /// Recovery scheduled, no files transferred
    Init,
    /// Copying index files
    Index,
    /// Replaying translog operations
    Translog,
    /// Final flush and refresh
    Finalize,
    /// Recovery finished
    Done,
}

impl StageCode for RecoveryStage {
    const NAME: &'static str = "recovery stage";

    const ALL: &'static [Self] = &[
        RecoveryStage::Init,
        RecoveryStage::Index,
        RecoveryStage::Translog,
        RecoveryStage::Finalize,
        RecoveryStage::Done,
    ];

    fn code(self) -> u8 {
        match self {
            RecoveryStage::Init => 0,
            RecoveryStage::Index => 1,
            RecoveryStage::Translog => 2,
            RecoveryStage::Finalize => 3,
            RecoveryStage::Done => 4,
        }
    }

    fn label(self) -> &'static str {
        match self {
            RecoveryStage::Init => "init",
            RecoveryStage::Index => "index",
            RecoveryStage::Translog => "translog",
            RecoveryStage::Finalize => "finalize",
            RecoveryStage::Done => "done",
        }
    }
}

// ============================================================================
// SnapshotStage
// ============================================================================

/// Stage of a snapshot to the gateway
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SnapshotStage {
    /// No snapshot taken yet
    None,
    /// Uploading index files
    Index,
    /// Uploading translog operations
    Translog,
    /// Writing the commit point
    Finalize,
    /// Snapshot completed
    Done,
    /// Snapshot failed
    Failure,
}

impl StageCode for SnapshotStage {
    const NAME: &'static str = "snapshot stage";

    const ALL: &'static [Self] = &[
        SnapshotStage::None,
        SnapshotStage::Index,
        SnapshotStage::Translog,
        SnapshotStage::Finalize,
        SnapshotStage::Done,
        SnapshotStage::Failure,
    ];

    fn code(self) -> u8 {
        match self {
            SnapshotStage::None => 0,
            SnapshotStage::Index => 1,
            SnapshotStage::Translog => 2,
            SnapshotStage::Finalize => 3,
            SnapshotStage::Done => 4,
            SnapshotStage::Failure => 5,
        }
    }

    fn label(self) -> &'static str {
        match self {
            SnapshotStage::None => "none",
            SnapshotStage::Index => "index",
            SnapshotStage::Translog => "translog",
            SnapshotStage::Finalize => "finalize",
            SnapshotStage::Done => "done",
            SnapshotStage::Failure => "failure",
        }
    }
}

// ============================================================================
// ShardRoutingState
// ============================================================================

/// Cluster-wide allocation state of a shard copy, as seen in the routing table
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShardRoutingState {
    /// Not allocated to any node
    Unassigned,
    /// Allocated and recovering
    Initializing,
    /// Allocated and active
    Started,
    /// Active and moving to another node
    Relocating,
}

impl StageCode for ShardRoutingState {
    const NAME: &'static str = "shard routing state";

    const ALL: &'static [Self] = &[
        ShardRoutingState::Unassigned,
        ShardRoutingState::Initializing,
        ShardRoutingState::Started,
        ShardRoutingState::Relocating,
    ];

    // Codes start at 1; 0 has never been assigned.
    fn code(self) -> u8 {
        match self {
            ShardRoutingState::Unassigned => 1,
            ShardRoutingState::Initializing => 2,
            ShardRoutingState::Started => 3,
            ShardRoutingState::Relocating => 4,
        }
    }

    fn label(self) -> &'static str {
        match self {
            ShardRoutingState::Unassigned => "unassigned",
            ShardRoutingState::Initializing => "initializing",
            ShardRoutingState::Started => "started",
            ShardRoutingState::Relocating => "relocating",
        }
    }
}

impl ShardRoutingState {
    /// Whether the copy is assigned to a node and serving or about to serve
    pub fn is_active(self) -> bool {
        matches!(
            self,
            ShardRoutingState::Started | ShardRoutingState::Relocating
        )
    }
}

macro_rules! impl_display_from_str {
    ($($ty:ty),*) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.label())
                }
            }

            impl FromStr for $ty {
                type Err = UnknownStageName;

                fn from_str(s: &str) -> Result<Self, Self::Err> {
                    <$ty as StageCode>::from_label(s)
                }
            }
        )*
    };
}

impl_display_from_str!(IndexShardState, RecoveryStage, SnapshotStage, ShardRoutingState);
