#![warn(clippy::pedantic)]
#![cfg_attr(feature = "precommit-checks", deny(warnings, clippy::pedantic, clippy::dbg_macro))]
#![allow(clippy::collapsible_else_if)] // this is usually intentional
#![cfg_attr(not(feature = "precommit-checks"), allow(dead_code, unused_variables, unused_imports))]

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
struct Options {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Writes every builtin map into a directory.
    BuildAssets {
        #[arg(default_value = "assets/maps")]
        maps_dir: PathBuf,
    },
    /// Writes the JSON schema of map files.
    JsonSchema {
        output: PathBuf,
        /// Compress the output with gzip.
        #[arg(long)]
        gzip:   bool,
    },
    /// Converts a JSON map into a map file.
    FromJson { input: PathBuf, output: PathBuf },
    /// Converts a map file into JSON.
    ToJson { input: PathBuf, output: PathBuf },
}

fn main() -> Result<()> {
    match Options::parse().action {
        Action::BuildAssets { maps_dir } => blockdrive_maps::build_assets(&maps_dir),
        Action::JsonSchema { output, gzip } => blockdrive_maps::json_schema(&output, gzip),
        Action::FromJson { input, output } => blockdrive_maps::from_json(&input, &output),
        Action::ToJson { input, output } => blockdrive_maps::to_json(&input, &output),
    }
}
