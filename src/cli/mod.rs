// envkit: typed environment snapshots
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for envkit using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! envkit [global options] <command>
//! check [--format json|env]
//! validate <kind> <value>
//! schema
//! files
//! random <guid|string|int|bool>
//! version
//! ```

pub mod check;
pub mod global;
pub mod random;
pub mod validate;


use crate::cli::check::CheckArgs;
use crate::cli::global::GlobalOptions;
use crate::cli::random::RandomArgs;
use crate::cli::validate::ValidateArgs;
use clap::{Parser, Subcommand};

/// Typed environment snapshots.
///
/// Checks the process environment against a variable schema.
#[derive(Debug, Parser)]
#[command(
    name = "envkit",
    author,
    version,
    about = "Typed environment snapshots",
    long_about = "envkit Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Reads environment variables declared in a schema, parses each\n\
                  one with its declared kind and stops at the first failure.\n\n\
                  Invoking `envkit check` validates the current environment. See\n\
                  `envkit <command> --help` for more information about a command.",
    after_help = "SCHEMA FILES:\n\n\
                  By default, envkit loads `envkit.toml` from the current directory\n\
                  if it exists. Additional files can be given with --config; later\n\
                  files override earlier ones. ENVKIT_<SECTION>__<KEY> environment\n\
                  variables override file values. Use --no-default-config to only\n\
                  use --config."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shows the version.
    Version,

    /// Builds a snapshot from the schema and prints it.
    Check(CheckArgs),

    /// Validates or parses a single value.
    Validate(ValidateArgs),

    /// Prints the resolved variable schema.
    Schema,

    /// Lists the configuration files used.
    Files,

    /// Prints random values.
    Random(RandomArgs),
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Tries to parse command-line arguments, returning an error on failure.
///
/// # Errors
///
/// Returns a `clap::Error` if the arguments are invalid or if help/version
/// information was requested.
pub fn try_parse() -> Result<Cli, clap::Error> {
    Cli::try_parse()
}
