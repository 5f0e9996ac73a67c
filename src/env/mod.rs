// envkit: typed environment snapshots
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Environment sources and snapshot construction.
//!
//! # Architecture
//!
//! ```text
//! EnvSource (prepare + var)
//!   ProcessEnv   std::env, merges .env once on prepare()
//!   EnvMap       in-memory, copy-on-write
//!        |
//!        v
//! read_var(source, name, parser)   unset -> ""
//!        |
//!   +----+---------------------+
//!   v                          v
//! EnvironmentBuilder        env_snapshot! { struct .. }
//! Registry -> Snapshot      typed fields + getters
//! ```
//!
//! - **All-or-nothing**: the first parser error aborts the build
//! - **By value**: a snapshot never observes later environment changes

pub mod builder;
pub mod container;
pub mod macros;
pub mod value;


use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};

pub use builder::{EnvironmentBuilder, Registry, Snapshot};
pub use container::EnvMap;
pub use value::{EnvValue, FromEnvValue};

use crate::error::ParseError;

/// Default dotenv file name.
pub const DOTENV_FILE: &str = ".env";

/// Where raw environment values come from.
pub trait EnvSource {
    /// Runs once at the start of every build, before any [`var`](Self::var)
    /// call.
    fn prepare(&self) {}

    /// Raw value of `name`, or `None` when unset.
    fn var(&self, name: &str) -> Option<String>;
}

/// Which dotenv file [`ProcessEnv`] merges before reading.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Dotenv {
    /// `.env`, searched from the current directory upwards.
    #[default]
    Default,
    /// An explicit file.
    Path(PathBuf),
    /// Do not load any file.
    Disabled,
}

/// The live process environment.
#[derive(Debug, Clone, Default)]
pub struct ProcessEnv {
    dotenv: Dotenv,
}

impl ProcessEnv {
    /// Process environment with `.env` loading.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Process environment without any dotenv file.
    #[must_use]
    pub const fn without_dotenv() -> Self {
        Self {
            dotenv: Dotenv::Disabled,
        }
    }

    /// Process environment merged with a specific dotenv file.
    #[must_use]
    pub fn with_dotenv_path(path: impl Into<PathBuf>) -> Self {
        Self {
            dotenv: Dotenv::Path(path.into()),
        }
    }

    #[must_use]
    pub const fn dotenv(&self) -> &Dotenv {
        &self.dotenv
    }
}

impl EnvSource for ProcessEnv {
    fn prepare(&self) {
        match &self.dotenv {
            Dotenv::Default => {
                load_dotenv(None);
            }
            Dotenv::Path(path) => {
                load_dotenv(Some(path));
            }
            Dotenv::Disabled => {}
        }
    }

    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

/// Result of a [`load_dotenv`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DotenvOutcome {
    /// The file was merged into the process environment.
    Loaded(PathBuf),
    /// No file to load.
    NotFound,
    /// This file was already handled earlier in the process.
    AlreadyLoaded,
    /// The file exists but could not be read or parsed.
    Failed(String),
}

/// Merges a dotenv file into the process environment, once per file.
///
/// Variables already set in the process are not overridden. A missing file
/// is not an error; a malformed one is logged and skipped.
pub fn load_dotenv(path: Option<&Path>) -> DotenvOutcome {
    static LOADED: OnceLock<Mutex<BTreeSet<Option<PathBuf>>>> = OnceLock::new();

    let key = path.map(Path::to_path_buf);
    let mut loaded = LOADED
        .get_or_init(|| Mutex::new(BTreeSet::new()))
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner);
    if !loaded.insert(key) {
        return DotenvOutcome::AlreadyLoaded;
    }

    let result = match path {
        Some(path) => dotenvy::from_path(path).map(|()| path.to_path_buf()),
        None => dotenvy::dotenv(),
    };

    match result {
        Ok(file) => {
            tracing::debug!(path = %file.display(), "loaded dotenv file");
            DotenvOutcome::Loaded(file)
        }
        Err(e) if e.not_found() => {
            tracing::trace!("no dotenv file found");
            DotenvOutcome::NotFound
        }
        Err(e) => {
            tracing::warn!(error = %e, "failed to load dotenv file");
            DotenvOutcome::Failed(e.to_string())
        }
    }
}

/// Captures the current process environment by value.
///
/// Variables whose name or value is not valid Unicode are skipped.
#[must_use]
pub fn current_env() -> EnvMap {
    std::env::vars_os()
        .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
        .collect()
}

/// Reads `name` from `source` and runs `parser` on it.
///
/// An unset variable is passed to the parser as `""`.
///
/// # Errors
///
/// Whatever `parser` returns, unchanged.
pub fn read_var<S, T, F>(source: &S, name: &str, parser: F) -> Result<T, ParseError>
where
    S: EnvSource + ?Sized,
    F: FnOnce(&str) -> Result<T, ParseError>,
{
    let raw = source.var(name).unwrap_or_default();
    parser(&raw)
}
