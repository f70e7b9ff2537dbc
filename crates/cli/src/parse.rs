//! ArgMatches → CliAction conversion.

use std::path::PathBuf;

use clap::ArgMatches;
use shardstat::WireConfig;

use crate::format::OutputMode;

/// The result of parsing the command line.
#[derive(Debug)]
pub enum CliAction {
    /// Decode and print each payload file.
    Decode {
        files: Vec<PathBuf>,
        mode: OutputMode,
        config: WireConfig,
    },
    /// Write the example payload to `out`.
    Sample { out: PathBuf },
}

/// Convert clap ArgMatches into a CliAction.
pub fn matches_to_action(matches: &ArgMatches) -> Result<CliAction, String> {
    let (sub_name, sub_matches) = matches
        .subcommand()
        .ok_or_else(|| "No command provided".to_string())?;

    match sub_name {
        "decode" => parse_decode(sub_matches),
        "sample" => {
            let out = sub_matches
                .get_one::<PathBuf>("out")
                .ok_or("Missing output path")?
                .clone();
            Ok(CliAction::Sample { out })
        }
        other => Err(format!("Unknown command: {}", other)),
    }
}

fn parse_decode(matches: &ArgMatches) -> Result<CliAction, String> {
    let files: Vec<PathBuf> = matches
        .get_many::<PathBuf>("files")
        .ok_or("No payload files given")?
        .cloned()
        .collect();
    let mode = match matches.get_one::<String>("format").map(String::as_str) {
        Some("json") => OutputMode::Json,
        _ => OutputMode::Human,
    };
    let config = parse_profile(matches.get_one::<String>("profile").map(String::as_str))?;
    Ok(CliAction::Decode {
        files,
        mode,
        config,
    })
}

fn parse_profile(profile: Option<&str>) -> Result<WireConfig, String> {
    match profile {
        None | Some("default") => Ok(WireConfig::default()),
        Some("strict") => Ok(WireConfig::strict()),
        Some("permissive") => Ok(WireConfig::permissive()),
        Some(other) => Err(format!("Unknown profile: {}", other)),
    }
}
