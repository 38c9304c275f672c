// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the shimdb command-line interface.
//!
//! Four subcommands: `inspect` prints the tag tree of an `.sdb` file,
//! `verify` checks its structure, `find` lists every record with a given
//! tag, and `tags` prints the tag name table. Nothing here writes files.

pub mod commands;
pub mod display;

use clap::{ArgAction, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "shimdb",
    about = "Reader for shim application database (.sdb) files",
    version
)]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the header and tag tree of an .sdb file
    Inspect {
        /// Path to .sdb file
        file: String,

        /// Emit the tree as JSON instead of a box diagram
        #[arg(long)]
        json: bool,

        /// Maximum list nesting to descend into
        #[arg(short, long, default_value = "8")]
        depth: usize,

        /// Reject files whose header magic is not "sdbf"
        #[arg(long)]
        strict: bool,
    },

    /// Walk the whole tree and report structural problems
    Verify {
        /// Path to .sdb file
        file: String,

        /// Emit the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// List every record carrying a tag, at any depth
    Find {
        /// Path to .sdb file
        file: String,

        /// Tag name (e.g. NAME, TAG_EXE) or hex code (e.g. 0x6001)
        tag: String,
    },

    /// Print the known tag name table
    Tags,
}

/// Map `-v` occurrences to a tracing filter directive.
pub fn log_directive(verbose: u8) -> &'static str {
    match verbose {
        0 => "shimdb=warn",
        1 => "shimdb=debug",
        _ => "shimdb=trace",
    }
}
