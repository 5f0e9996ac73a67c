// envkit: typed environment snapshots
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! The `check` command.
//!
//! ```text
//! Config.dotenv --source()--> ProcessEnv
//!        |
//!        v
//! Config::snapshot_from(source)   vars -> Registry -> build()
//!        |
//!        v
//! Snapshot --> render(json | env)
//! ```

use anyhow::Context;

use crate::cli::check::{CheckArgs, OutputFormat};
use crate::config::Config;
use crate::env::{EnvSource, Snapshot};
use crate::error::Result;

/// Run the check command against the process environment.
///
/// # Errors
///
/// Returns an error if the schema is invalid or a variable fails to parse.
pub fn run_check_command(args: &CheckArgs, config: &Config) -> Result<()> {
    let output = check_source(args, config, config.dotenv.source())?;
    println!("{output}");
    Ok(())
}

/// Builds a snapshot from `source` and renders it.
///
/// # Errors
///
/// Returns an error if the schema is invalid or a variable fails to parse.
pub fn check_source<S: EnvSource>(args: &CheckArgs, config: &Config, source: S) -> Result<String> {
    let logger = config.logger();
    if config.vars.is_empty() {
        logger.warn("no variables declared");
    }

    let snapshot = config
        .snapshot_from(source)
        .context("environment check failed")?;

    logger.success(&format!(
        "environment valid ({} variables)",
        snapshot.len()
    ));
    render(&snapshot, args.format)
}

/// Formats a snapshot for output.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn render(snapshot: &Snapshot, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(snapshot)?),
        OutputFormat::Env => Ok(snapshot
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect::<Vec<_>>()
            .join("\n")),
    }
}
