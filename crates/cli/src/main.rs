//! Shardstat CLI: inspect shard status payloads.
//!
//! - `shardstat decode FILE... [--format human|json] [--profile NAME]`
//! - `shardstat sample OUT` writes an example payload
//!
//! Logging goes to stderr; `--verbose` or `RUST_LOG` turn it up.

mod commands;
mod format;
mod parse;

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::process;

use shardstat::{
    ByteSize, DocsStatus, Error, IndexShardState, ShardId, ShardStatus, StatusReport, WireConfig,
};
use shardstat_wire::{decode_shard_status, encode_shard_status_into};
use tracing::{debug, Level};
use tracing_subscriber::EnvFilter;

use commands::build_cli;
use format::{format_failure, format_status, format_summary, OutputMode};
use parse::{matches_to_action, CliAction};

fn main() {
    let matches = build_cli().get_matches();
    init_logging(matches.get_flag("verbose"));

    let exit_code = match matches_to_action(&matches) {
        Ok(CliAction::Decode {
            files,
            mode,
            config,
        }) => {
            let outcome = decode_files(&files, mode, &config);
            for line in &outcome.lines {
                println!("{}", line);
            }
            outcome.exit_code()
        }
        Ok(CliAction::Sample { out }) => match write_sample(&out) {
            Ok(written) => {
                println!("wrote {} bytes to {}", written, out.display());
                0
            }
            Err(e) => {
                eprintln!("(error) {}", e);
                1
            }
        },
        Err(e) => {
            eprintln!("(error) {}", e);
            1
        }
    };
    process::exit(exit_code);
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .init();
}

/// Printed lines plus per-file counts.
struct DecodeOutcome {
    lines: Vec<String>,
    decoded: usize,
    failed: usize,
}

impl DecodeOutcome {
    /// Non-zero only when no file produced a status.
    fn exit_code(&self) -> i32 {
        if self.decoded == 0 && self.failed > 0 {
            1
        } else {
            0
        }
    }
}

fn decode_files(files: &[PathBuf], mode: OutputMode, config: &WireConfig) -> DecodeOutcome {
    let mut report = StatusReport::with_config(config.clone());
    let mut lines = Vec::with_capacity(files.len() + 1);
    let mut failed = 0;

    for path in files {
        match decode_file(path, config) {
            Ok(status) => {
                lines.push(format_status(path, &status, mode));
                report.add_status(status);
            }
            Err(reason) => {
                failed += 1;
                lines.push(format_failure(path, &reason, mode));
            }
        }
    }

    if mode == OutputMode::Human {
        lines.push(format_summary(&report, failed));
    }
    DecodeOutcome {
        lines,
        decoded: report.successful_shards(),
        failed,
    }
}

fn decode_file(path: &Path, config: &WireConfig) -> Result<ShardStatus, String> {
    let bytes = std::fs::read(path).map_err(|e| format!("cannot read file: {}", e))?;
    debug!(file = %path.display(), len = bytes.len(), "decoding payload");
    decode_shard_status(&bytes, config).map_err(|e| Error::from(e).to_string())
}

/// Shard ("orders", 2), started, 500kb store, translog 7/42, 100 live docs.
fn sample_status() -> ShardStatus {
    ShardStatus::new(ShardId::new("orders", 2), IndexShardState::Started)
        .with_store_size(ByteSize::bytes_of(512_000))
        .with_translog(7, 42)
        .with_docs(DocsStatus::new(100, 110, 10))
}

fn write_sample(out: &Path) -> Result<u64, String> {
    let file = File::create(out).map_err(|e| format!("cannot create {}: {}", out.display(), e))?;
    encode_shard_status_into(&sample_status(), BufWriter::new(file), &WireConfig::default())
        .map_err(|e| Error::from(e).to_string())
}
