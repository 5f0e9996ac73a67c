// envkit: typed environment snapshots
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Layered loading of settings and the variable schema.
//!
//! ```text
//! ConfigLoader::new()
//!   .add_toml_file(path)           ConfigSource::File      (must exist)
//!   .add_toml_file_optional(path)  ConfigSource::Optional  (listed if present)
//!   .add_toml_str(toml)            ConfigSource::Inline
//!   .with_env_prefix("ENVKIT")     ENVKIT_LOG__* | ENVKIT_DOTENV__* only
//!   .set(key, value)               CLI overrides
//!        |
//!        v
//!   build() --> deserialize --> resolve [[vars]] --> Config
//! ```
//!
//! Environment overrides are scoped to the settings sections. Any other
//! variable sharing the prefix (`ENVKIT_HOME`, `ENVKIT_VARS__X`) is left
//! out of the merge.

use std::fmt;
use std::path::{Path, PathBuf};

use super::{Config, ENV_SECTIONS};
use crate::error::{ConfigError, Result};

/// One configuration layer, in load order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Required TOML file.
    File(PathBuf),
    /// Optional TOML file that was present when added.
    Optional(PathBuf),
    /// TOML text passed directly.
    Inline,
}

impl ConfigSource {
    /// Path of a file layer.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::File(path) | Self::Optional(path) => Some(path),
            Self::Inline => None,
        }
    }
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Optional(path) => write!(f, "{} (optional)", path.display()),
            Self::Inline => f.write_str("<inline>"),
        }
    }
}

/// Builds a [`Config`] from TOML layers, environment overrides and explicit
/// values, later layers winning.
pub struct ConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
    env_prefix: Option<String>,
    sources: Vec<ConfigSource>,
}

impl ConfigLoader {
    #[must_use]
    pub fn new() -> Self {
        Self {
            builder: config::Config::builder(),
            env_prefix: None,
            sources: Vec::new(),
        }
    }

    /// Adds a schema file that must exist when [`build`](Self::build) runs.
    #[must_use]
    pub fn add_toml_file<P: AsRef<Path>>(self, path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        self.layer(&path, true, ConfigSource::File(path.clone()))
    }

    /// Adds a schema file that is skipped when missing.
    #[must_use]
    pub fn add_toml_file_optional<P: AsRef<Path>>(mut self, path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        if path.exists() {
            return self.layer(&path, false, ConfigSource::Optional(path.clone()));
        }
        self.builder = self.builder.add_source(toml_file(&path, false));
        self
    }

    #[must_use]
    pub fn add_toml_str(mut self, content: &str) -> Self {
        self.builder = self.builder.add_source(config::File::from_str(
            content,
            config::FileFormat::Toml,
        ));
        self.sources.push(ConfigSource::Inline);
        self
    }

    /// Reads `<PREFIX>_LOG__<KEY>` and `<PREFIX>_DOTENV__<KEY>` variables at
    /// build time.
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_string());
        self
    }

    /// Sets a dotted key, such as `log.level`, above every other layer.
    ///
    /// # Errors
    ///
    /// Returns an error if the key cannot be parsed.
    pub fn set<T: Into<config::Value>>(mut self, key: &str, value: T) -> Result<Self> {
        self.builder = self
            .builder
            .set_override(key, value)
            .map_err(ConfigError::from)?;
        Ok(self)
    }

    /// Merges every layer and checks the variable schema.
    ///
    /// # Errors
    ///
    /// Returns an error if a required file is missing, a layer is not valid
    /// TOML, a settings value is invalid, or a `[[vars]]` entry does not
    /// resolve to a parser.
    pub fn build(self) -> Result<Config> {
        let builder = match &self.env_prefix {
            Some(prefix) => {
                let process_vars = std::env::vars_os().filter_map(|(key, value)| {
                    Some((key.into_string().ok()?, value.into_string().ok()?))
                });
                let overrides = scoped_env_vars(prefix, process_vars);
                self.builder.add_source(
                    config::Environment::with_prefix(prefix)
                        .prefix_separator("_")
                        .separator("__")
                        .try_parsing(true)
                        .source(Some(overrides)),
                )
            }
            None => self.builder,
        };

        let merged = builder.build().map_err(ConfigError::from)?;
        let config: Config = merged.try_deserialize().map_err(ConfigError::from)?;
        for (name, parser) in config.resolve_vars()? {
            tracing::trace!(name, %parser, "variable declared");
        }
        tracing::debug!(
            sources = self.sources.len(),
            vars = config.vars.len(),
            "configuration loaded"
        );
        Ok(config)
    }

    /// Layers added so far, in load order.
    #[must_use]
    pub fn sources(&self) -> &[ConfigSource] {
        &self.sources
    }

    /// Numbered source lines for display.
    #[must_use]
    pub fn format_sources(&self) -> Vec<String> {
        self.sources
            .iter()
            .enumerate()
            .map(|(i, source)| format!("{}. {source}", i + 1))
            .collect()
    }

    fn layer(mut self, path: &Path, required: bool, source: ConfigSource) -> Self {
        self.builder = self.builder.add_source(toml_file(path, required));
        self.sources.push(source);
        self
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn toml_file(
    path: &Path,
    required: bool,
) -> config::File<config::FileSourceFile, config::FileFormat> {
    config::File::from(path)
        .format(config::FileFormat::Toml)
        .required(required)
}

/// Keeps `<prefix>_<SECTION>__<KEY>` variables whose section is a settings
/// section, matching case-insensitively.
pub(crate) fn scoped_env_vars<I>(prefix: &str, vars: I) -> config::Map<String, String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let head = format!("{prefix}_").to_ascii_lowercase();
    vars.into_iter()
        .filter(|(key, _)| {
            let key = key.to_ascii_lowercase();
            let Some(rest) = key.strip_prefix(&head) else {
                return false;
            };
            let known = ENV_SECTIONS.iter().any(|section| {
                rest.strip_prefix(*section)
                    .is_some_and(|tail| tail.starts_with("__"))
            });
            if !known {
                tracing::debug!(
                    variable = %key,
                    "ignoring environment override outside settings sections"
                );
            }
            known
        })
        .collect()
}
