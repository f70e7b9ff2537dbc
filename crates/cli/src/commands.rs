//! clap command tree.

use std::path::PathBuf;

use clap::{value_parser, Arg, ArgAction, Command};

/// Build the `shardstat` command.
pub fn build_cli() -> Command {
    Command::new("shardstat")
        .about("Inspect shard status payloads")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Log codec activity to stderr"),
        )
        .subcommand(
            Command::new("decode")
                .about("Decode payload files and print the statuses they carry")
                .arg(
                    Arg::new("files")
                        .value_name("FILE")
                        .required(true)
                        .num_args(1..)
                        .value_parser(value_parser!(PathBuf)),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .value_parser(["human", "json"])
                        .default_value("human")
                        .help("Output format"),
                )
                .arg(
                    Arg::new("profile")
                        .long("profile")
                        .value_parser(["default", "strict", "permissive"])
                        .default_value("default")
                        .help("Decoder limits"),
                ),
        )
        .subcommand(
            Command::new("sample")
                .about("Write an example payload")
                .arg(
                    Arg::new("out")
                        .value_name("OUT")
                        .required(true)
                        .value_parser(value_parser!(PathBuf)),
                ),
        )
}
