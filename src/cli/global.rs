// envkit: typed environment snapshots
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Global CLI options available for all commands.
//!
//! # Option Precedence
//!
//! ```text
//! --config FILE     ← Additional config files (can repeat)
//! --log-level N     ← Console verbosity (0-6)
//! --file-log-level  ← File verbosity (defaults to --log-level)
//! --log-file FILE   ← log.file override
//! --stage NAME      ← log.stage override
//! --dotenv FILE     ← dotenv.path override
//! --no-dotenv       ← dotenv.enabled = false
//!
//! Precedence: CLI flags > ENVKIT_* > --config > envkit.toml > defaults
//! ```

use clap::Args;
use std::path::PathBuf;

/// Global options available for all commands.
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalOptions {
    /// Path to additional TOML configuration file(s).
    /// Can be specified multiple times.
    #[arg(short = 'c', long = "config", value_name = "FILE", action = clap::ArgAction::Append)]
    pub configs: Vec<PathBuf>,

    /// Console log level (0=silent, 1=errors, 2=warnings, 3=info, 4=debug, 5=trace, 6=dump).
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL", value_parser = clap::value_parser!(u8).range(0..=6)
    )]
    pub log_level: Option<u8>,

    /// File log level, overrides --log-level for the log file.
    #[arg(long = "file-log-level", value_name = "LEVEL", value_parser = clap::value_parser!(u8).range(0..=6)
    )]
    pub file_log_level: Option<u8>,

    /// Path to log file.
    #[arg(long = "log-file", value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Deployment stage; debug messages are dropped under `pro`.
    #[arg(long = "stage", value_name = "NAME")]
    pub stage: Option<String>,

    /// Dotenv file merged before reading variables.
    #[arg(long = "dotenv", value_name = "FILE", conflicts_with = "no_dotenv")]
    pub dotenv: Option<PathBuf>,

    /// Do not merge any dotenv file.
    #[arg(long = "no-dotenv")]
    pub no_dotenv: bool,

    /// Disables auto loading of envkit.toml, only uses --config.
    #[arg(long = "no-default-config")]
    pub no_default_config: bool,
}

impl GlobalOptions {
    /// Converts command-line options to configuration overrides.
    #[must_use]
    pub fn to_config_overrides(&self) -> Vec<(&'static str, String)> {
        let mut overrides = Vec::new();

        if let Some(level) = self.log_level {
            overrides.push(("log.level", level.to_string()));
        }

        // file_log_level falls back to log_level if not specified
        if let Some(level) = self.file_log_level.or(self.log_level) {
            overrides.push(("log.file_level", level.to_string()));
        }

        if let Some(ref path) = self.log_file {
            overrides.push(("log.file", path.display().to_string()));
        }

        if let Some(ref stage) = self.stage {
            overrides.push(("log.stage", stage.clone()));
        }

        if let Some(ref path) = self.dotenv {
            overrides.push(("dotenv.path", path.display().to_string()));
        }

        if self.no_dotenv {
            overrides.push(("dotenv.enabled", "false".to_string()));
        }

        overrides
    }
}
