//! Binary wire encoding for shard status records
//!
//! - `encode` / `decode`: stream primitives (flags, fixed width, varints, strings)
//! - `record`: the version 1 layout of every model type
//! - `version`: leading format version byte and whole-record entry points
//! - `error`: [`WireError`]

mod decode;
mod encode;
mod error;
mod record;
pub(crate) mod version;

pub use decode::StreamInput;
pub use encode::{varint_len, StreamOutput};
pub use error::{Result, WireError};
pub use record::{read_optional, write_optional, Streamable};
pub use version::{
    decode_shard_status, encode_shard_status, encode_shard_status_into, read_shard_status,
    write_shard_status, FormatVersion,
};
