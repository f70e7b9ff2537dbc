//! Status Codec Integration Tests
//!
//! End-to-end tests for the shard status wire format through the public
//! `shardstat` API: round-trips, presence, sentinels, truncation, stage
//! rejection and the reference scenario.

mod common;

mod presence;
mod rejection;
mod round_trip;
mod scenarios;
