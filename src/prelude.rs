//! Convenient imports for shardstat.
//!
//! ```
//! use shardstat::prelude::*;
//!
//! let status = ShardStatus::new(ShardId::new("logs", 0), IndexShardState::Created);
//! assert!(status.docs().is_none());
//! ```

// Error handling
pub use crate::error::{Error, Result};

// Producer and consumer
pub use crate::aggregate::{IndexStatus, StatusReport};
pub use crate::producer::{collect_status, ShardStateProvider, TranslogPosition};

// Model
pub use crate::types::{
    ByteSize, DocsStatus, IndexShardState, RecoveryKind, RecoveryStage, RecoveryStatus,
    ShardId, ShardRouting, ShardStatus, SnapshotStage, SnapshotStatus,
};

// Wire configuration
pub use crate::types::WireConfig;
