// envkit: typed environment snapshots
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Schema-related commands for envkit.

use crate::config::{Config, ConfigLoader};
use crate::error::Result;

/// Display the resolved variable schema.
///
/// # Errors
///
/// Returns an error if a variable declaration is invalid.
pub fn run_schema_command(config: &Config) -> Result<()> {
    let lines = config.format_schema()?;
    if lines.is_empty() {
        println!("No variables declared");
    }
    for line in lines {
        println!("{line}");
    }
    Ok(())
}

/// Display the configuration layers the loader will merge, in order.
pub fn run_files_command(loader: &ConfigLoader) {
    if loader.sources().is_empty() {
        println!("No configuration files loaded");
    }
    for line in loader.format_sources() {
        println!("{line}");
    }
}
