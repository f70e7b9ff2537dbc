//! Output formatting for decoded statuses.
//!
//! Human mode prints an indented block per file and a per-index summary.
//! JSON mode prints one object per line.

use std::path::Path;
use std::time::Duration;

use chrono::{SecondsFormat, TimeZone, Utc};
use serde_json::{json, Value};
use shardstat::{
    ByteSize, RecoveryKind, RecoveryStatus, ShardStatus, SnapshotStatus, StatusReport,
};

/// How results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
}

/// Format one decoded status.
pub fn format_status(path: &Path, status: &ShardStatus, mode: OutputMode) -> String {
    match mode {
        OutputMode::Human => format_status_human(path, status),
        OutputMode::Json => {
            let file = path.display().to_string();
            let value = match serde_json::to_value(status) {
                Ok(status) => json!({ "file": file, "status": status }),
                Err(e) => json!({ "file": file, "error": e.to_string() }),
            };
            to_line(&value)
        }
    }
}

/// Format a file whose status could not be obtained.
pub fn format_failure(path: &Path, reason: &str, mode: OutputMode) -> String {
    match mode {
        OutputMode::Human => format!("{}: status unavailable ({})", path.display(), reason),
        OutputMode::Json => to_line(&json!({
            "file": path.display().to_string(),
            "error": reason,
        })),
    }
}

/// Per-index rollup of everything decoded.
pub fn format_summary(report: &StatusReport, failed_files: usize) -> String {
    let mut lines = Vec::new();
    for index in report.indices() {
        let docs = index
            .docs()
            .map(|d| format!("{} docs", d.num_docs))
            .unwrap_or_else(|| "docs n/a".to_string());
        lines.push(format!(
            "{}: {} shard(s), store {}, primaries {}, {}, {} translog ops",
            index.index(),
            index.shard_count(),
            size_or_na(index.store_size()),
            size_or_na(index.primary_store_size()),
            docs,
            index.translog_operations(),
        ));
    }
    lines.push(format!(
        "{} decoded, {} unavailable",
        report.successful_shards(),
        failed_files
    ));
    lines.join("\n")
}

fn format_status_human(path: &Path, status: &ShardStatus) -> String {
    let mut lines = vec![
        format!("{}: {} {}", path.display(), status.shard_id(), status.state()),
        format!("  routing: {}", status.routing()),
        format!("  store: {}", size_or_na(status.store_size())),
    ];
    match (status.translog_id(), status.translog_operations()) {
        (None, None) => lines.push("  translog: n/a".to_string()),
        (id, ops) => lines.push(format!(
            "  translog: id {}, {} ops",
            opt_to_string(id),
            opt_to_string(ops)
        )),
    }
    if let Some(docs) = status.docs() {
        lines.push(format!(
            "  docs: {} live, max doc {}, {} deleted",
            docs.num_docs, docs.max_doc, docs.deleted_docs
        ));
    }
    for kind in RecoveryKind::ALL {
        if let Some(recovery) = status.recovery(kind) {
            lines.push(format!("  {} recovery: {}", kind.name(), format_recovery(recovery)));
        }
    }
    if let Some(snapshot) = status.gateway_snapshot() {
        lines.push(format!("  gateway snapshot: {}", format_snapshot(snapshot)));
    }
    lines.join("\n")
}

fn format_recovery(recovery: &RecoveryStatus) -> String {
    format!(
        "{}, {:.1}% of {} ({} reused), {} translog ops, started {}, took {}",
        recovery.stage,
        recovery.index_recovery_progress(),
        ByteSize::bytes_of(recovery.expected_recovered_index_size()),
        ByteSize::bytes_of(recovery.reused_index_size),
        recovery.recovered_translog_operations,
        format_timestamp(recovery.start_time),
        format_elapsed(recovery.elapsed()),
    )
}

fn format_snapshot(snapshot: &SnapshotStatus) -> String {
    format!(
        "{}, {}, {} ops, started {}, took {}",
        snapshot.stage,
        ByteSize::bytes_of(snapshot.index_size),
        snapshot.expected_number_of_operations,
        format_timestamp(snapshot.start_time),
        format_elapsed(snapshot.elapsed()),
    )
}

/// Epoch milliseconds as RFC 3339, or the raw number if out of range
fn format_timestamp(millis: u64) -> String {
    i64::try_from(millis)
        .ok()
        .and_then(|ms| Utc.timestamp_millis_opt(ms).single())
        .map(|t| t.to_rfc3339_opts(SecondsFormat::Millis, true))
        .unwrap_or_else(|| format!("{}ms", millis))
}

fn format_elapsed(elapsed: Duration) -> String {
    format!("{:.1}s", elapsed.as_secs_f64())
}

fn size_or_na(size: Option<ByteSize>) -> String {
    size.map(|s| s.to_string())
        .unwrap_or_else(|| "n/a".to_string())
}

fn opt_to_string(value: Option<i64>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| "n/a".to_string())
}

fn to_line(value: &Value) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| format!("{{\"error\":\"{}\"}}", e))
}
