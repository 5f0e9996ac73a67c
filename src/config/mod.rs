// envkit: typed environment snapshots
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for envkit.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. envkit.toml (cwd, optional)
//! 3. --config (repeatable)
//! 4. ENVKIT_* env vars
//! 5. CLI overrides
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! ENVKIT_LOG__LEVEL=4           → log.level = 4
//! ENVKIT_LOG__STAGE=pro         → log.stage = "pro"
//! ENVKIT_DOTENV__ENABLED=false  → dotenv.enabled = false
//! ```
//!
//! # Schema
//!
//! ```toml
//! [[vars]]
//! name = "PORT"
//! kind = "int"
//!
//! [[vars]]
//! name = "NODE_ENV"
//! kind = "enum"
//! allowed = ["dev", "pro"]
//! ```

pub mod loader;
pub mod types;

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

use crate::env::{EnvSource, EnvironmentBuilder, Registry, Snapshot};
use crate::error::{ConfigError, EnvkitResult, Result};
use crate::logging::Logger;

pub use loader::{ConfigLoader, ConfigSource};
pub use types::{DotenvSettings, LogSettings, ParserKind, VarParser, VarSpec};

/// Default schema file, looked up in the current directory.
pub const CONFIG_FILE: &str = "envkit.toml";

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "ENVKIT";

/// Sections that environment overrides may target.
pub const ENV_SECTIONS: [&str; 2] = ["log", "dotenv"];

/// Complete application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Logging options.
    pub log: LogSettings,
    /// Dotenv options.
    pub dotenv: DotenvSettings,
    /// Variable schema, in declaration order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub vars: Vec<VarSpec>,
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use envkit::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file("envkit.toml")
    ///     .add_toml_file_optional("envkit.local.toml")
    ///     .with_env_prefix("ENVKIT")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a single TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid TOML, or
    /// does not describe a valid configuration.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::builder().add_toml_file(path).build()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not describe
    /// a valid configuration.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Checks every variable declaration.
    ///
    /// # Errors
    ///
    /// The first invalid declaration, or a name declared twice.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        self.resolve_vars().map(|_| ())
    }

    /// Resolves every declaration into a parser, in declaration order.
    ///
    /// # Errors
    ///
    /// The first invalid declaration, or a name declared twice.
    pub fn resolve_vars(&self) -> std::result::Result<Vec<(&str, VarParser)>, ConfigError> {
        let mut seen = BTreeSet::new();
        self.vars
            .iter()
            .map(|spec| {
                if !seen.insert(spec.name.as_str()) {
                    return Err(ConfigError::InvalidVariable {
                        variable: spec.name.clone(),
                        message: "declared more than once".to_string(),
                    });
                }
                spec.resolve().map(|parser| (spec.name.as_str(), parser))
            })
            .collect()
    }

    /// Builds a snapshot registry from the schema.
    ///
    /// # Errors
    ///
    /// Same as [`resolve_vars`](Self::resolve_vars).
    pub fn to_registry(&self) -> std::result::Result<Registry, ConfigError> {
        let mut registry = Registry::new();
        for (name, parser) in self.resolve_vars()? {
            registry.register_dyn(name, parser.into_dyn());
        }
        Ok(registry)
    }

    /// Builds a snapshot of `source` from the schema.
    ///
    /// # Errors
    ///
    /// [`EnvkitError::Config`](crate::error::EnvkitError::Config) for an
    /// invalid schema, [`EnvkitError::Parse`](crate::error::EnvkitError::Parse)
    /// for the first variable that fails to parse.
    pub fn snapshot_from<S: EnvSource>(&self, source: S) -> EnvkitResult<Snapshot> {
        let registry = self.to_registry()?;
        Ok(EnvironmentBuilder::with_source(source)
            .with_registry(registry)
            .build()?)
    }

    /// Logger bound to the configured stage.
    #[must_use]
    pub fn logger(&self) -> Logger {
        Logger::new(self.log.stage.clone())
    }

    /// Format the variable schema for display, one aligned line per variable.
    ///
    /// # Errors
    ///
    /// Same as [`resolve_vars`](Self::resolve_vars).
    pub fn format_schema(&self) -> std::result::Result<Vec<String>, ConfigError> {
        let vars = self.resolve_vars()?;
        let max_name_len = vars.iter().map(|(name, _)| name.len()).max().unwrap_or(0);

        Ok(vars
            .into_iter()
            .map(|(name, parser)| format!("{name:<max_name_len$} = {parser}"))
            .collect())
    }
}
