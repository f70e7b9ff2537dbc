//! Version 1 layout of the status model
//!
//! Field order is fixed and no field names go on the wire; position defines
//! meaning. Optional values are preceded by a presence flag.
//!
//! ```text
//! ShardStatus
//!   routing               ShardRouting
//!   state                 u8
//!   store_size?           flag + vlong bytes
//!   translog_id           i64 (-1 = not applicable)
//!   translog_operations   i64 (-1 = not applicable)
//!   docs?                 flag + u32 num_docs, u32 max_doc, u32 deleted_docs
//!   peer_recovery?        flag + RecoveryStatus
//!   gateway_recovery?     flag + RecoveryStatus
//!   gateway_snapshot?     flag + SnapshotStatus
//!
//! ShardRouting
//!   index string, shard vint, version i64, current node? string,
//!   relocating node? string, primary bool, routing state u8
//!
//! RecoveryStatus
//!   stage u8, start_time, time, index_size, reused_index_size,
//!   recovered_index_size, recovered_translog_operations (all vlong)
//!
//! SnapshotStatus
//!   stage u8, start_time, time, index_size (vlong), expected ops (vint)
//! ```

use super::decode::StreamInput;
use super::encode::StreamOutput;
use super::error::Result;
use shardstat_core::{
    ByteSize, DocsStatus, IndexShardState, RecoveryKind, RecoveryStage, RecoveryStatus,
    ShardId, ShardRouting, ShardRoutingState, ShardStatus, SnapshotStage, SnapshotStatus,
    TRANSLOG_NOT_APPLICABLE,
};
use std::io::{Read, Write};

/// A value with a fixed binary layout
pub trait Streamable: Sized {
    /// Append this value to `out`
    fn write_to<W: Write>(&self, out: &mut StreamOutput<W>) -> Result<()>;

    /// Read a value from `input`
    fn read_from<R: Read>(input: &mut StreamInput<R>) -> Result<Self>;
}

/// Write a presence flag, then the value if present
pub fn write_optional<T: Streamable, W: Write>(
    out: &mut StreamOutput<W>,
    value: Option<&T>,
) -> Result<()> {
    match value {
        Some(v) => {
            out.write_bool(true)?;
            v.write_to(out)
        }
        None => out.write_bool(false),
    }
}

/// Read a presence flag, then the value if present
pub fn read_optional<T: Streamable, R: Read>(
    input: &mut StreamInput<R>,
    field: &'static str,
) -> Result<Option<T>> {
    if input.read_bool(field)? {
        T::read_from(input).map(Some)
    } else {
        Ok(None)
    }
}

impl Streamable for ShardId {
    fn write_to<W: Write>(&self, out: &mut StreamOutput<W>) -> Result<()> {
        out.write_string("index", &self.index)?;
        out.write_vint(self.id)
    }

    fn read_from<R: Read>(input: &mut StreamInput<R>) -> Result<Self> {
        let index = input.read_string("index")?;
        let id = input.read_vint("shard_id")?;
        Ok(ShardId { index, id })
    }
}

impl Streamable for ShardRouting {
    fn write_to<W: Write>(&self, out: &mut StreamOutput<W>) -> Result<()> {
        self.shard_id.write_to(out)?;
        out.write_i64(self.version)?;
        out.write_optional_string("current_node_id", self.current_node_id.as_deref())?;
        out.write_optional_string("relocating_node_id", self.relocating_node_id.as_deref())?;
        out.write_bool(self.primary)?;
        out.write_stage(self.state)
    }

    fn read_from<R: Read>(input: &mut StreamInput<R>) -> Result<Self> {
        let shard_id = ShardId::read_from(input)?;
        let version = input.read_i64("routing_version")?;
        let current_node_id = input.read_optional_string("current_node_id")?;
        let relocating_node_id = input.read_optional_string("relocating_node_id")?;
        let primary = input.read_bool("primary")?;
        let state = input.read_stage::<ShardRoutingState>("routing_state")?;
        Ok(ShardRouting {
            shard_id,
            current_node_id,
            relocating_node_id,
            primary,
            state,
            version,
        })
    }
}

impl Streamable for ByteSize {
    fn write_to<W: Write>(&self, out: &mut StreamOutput<W>) -> Result<()> {
        out.write_vlong(self.bytes())
    }

    fn read_from<R: Read>(input: &mut StreamInput<R>) -> Result<Self> {
        input.read_vlong("store_size").map(ByteSize::bytes_of)
    }
}

impl Streamable for DocsStatus {
    fn write_to<W: Write>(&self, out: &mut StreamOutput<W>) -> Result<()> {
        out.write_u32(self.num_docs)?;
        out.write_u32(self.max_doc)?;
        out.write_u32(self.deleted_docs)
    }

    fn read_from<R: Read>(input: &mut StreamInput<R>) -> Result<Self> {
        Ok(DocsStatus {
            num_docs: input.read_u32("num_docs")?,
            max_doc: input.read_u32("max_doc")?,
            deleted_docs: input.read_u32("deleted_docs")?,
        })
    }
}

impl Streamable for RecoveryStatus {
    fn write_to<W: Write>(&self, out: &mut StreamOutput<W>) -> Result<()> {
        out.write_stage(self.stage)?;
        out.write_vlong(self.start_time)?;
        out.write_vlong(self.time)?;
        out.write_vlong(self.index_size)?;
        out.write_vlong(self.reused_index_size)?;
        out.write_vlong(self.recovered_index_size)?;
        out.write_vlong(self.recovered_translog_operations)
    }

    fn read_from<R: Read>(input: &mut StreamInput<R>) -> Result<Self> {
        Ok(RecoveryStatus {
            stage: input.read_stage::<RecoveryStage>("recovery_stage")?,
            start_time: input.read_vlong("start_time")?,
            time: input.read_vlong("time")?,
            index_size: input.read_vlong("index_size")?,
            reused_index_size: input.read_vlong("reused_index_size")?,
            recovered_index_size: input.read_vlong("recovered_index_size")?,
            recovered_translog_operations: input.read_vlong("recovered_translog_operations")?,
        })
    }
}

impl Streamable for SnapshotStatus {
    fn write_to<W: Write>(&self, out: &mut StreamOutput<W>) -> Result<()> {
        out.write_stage(self.stage)?;
        out.write_vlong(self.start_time)?;
        out.write_vlong(self.time)?;
        out.write_vlong(self.index_size)?;
        out.write_vint(self.expected_number_of_operations)
    }

    fn read_from<R: Read>(input: &mut StreamInput<R>) -> Result<Self> {
        Ok(SnapshotStatus {
            stage: input.read_stage::<SnapshotStage>("snapshot_stage")?,
            start_time: input.read_vlong("start_time")?,
            time: input.read_vlong("time")?,
            index_size: input.read_vlong("index_size")?,
            expected_number_of_operations: input.read_vint("expected_number_of_operations")?,
        })
    }
}

impl Streamable for ShardStatus {
    fn write_to<W: Write>(&self, out: &mut StreamOutput<W>) -> Result<()> {
        self.routing().write_to(out)?;
        out.write_stage(self.state())?;
        write_optional(out, self.store_size().as_ref())?;
        out.write_i64(self.translog_id().unwrap_or(TRANSLOG_NOT_APPLICABLE))?;
        out.write_i64(self.translog_operations().unwrap_or(TRANSLOG_NOT_APPLICABLE))?;
        write_optional(out, self.docs())?;
        for kind in RecoveryKind::ALL {
            write_optional(out, self.recovery(kind))?;
        }
        write_optional(out, self.gateway_snapshot())
    }

    fn read_from<R: Read>(input: &mut StreamInput<R>) -> Result<Self> {
        let routing = ShardRouting::read_from(input)?;
        let state = input.read_stage::<IndexShardState>("state")?;
        let mut status = ShardStatus::new(routing, state);
        status.set_store_size(read_optional(input, "store_size")?);
        status.set_translog_id(Some(input.read_i64("translog_id")?));
        status.set_translog_operations(Some(input.read_i64("translog_operations")?));
        status.set_docs(read_optional(input, "docs")?);
        status.set_recovery(RecoveryKind::Peer, read_optional(input, "peer_recovery")?);
        status.set_recovery(
            RecoveryKind::Gateway,
            read_optional(input, "gateway_recovery")?,
        );
        status.set_gateway_snapshot(read_optional(input, "gateway_snapshot")?);
        Ok(status)
    }
}
