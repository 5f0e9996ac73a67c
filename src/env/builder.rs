// envkit: typed environment snapshots
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Registry-driven snapshot builder.
//!
//! # Build Pipeline
//!
//! ```text
//! EnvironmentBuilder::new() / with_source(src)
//!   .var("PORT", parse_as_int)
//!   .var("DEBUG", parse_as_bool)
//!        |
//!        v
//!    build()
//!      source.prepare()            (.env merge for ProcessEnv)
//!      for (name, parser) in registry order:
//!          raw = source.var(name) or ""
//!          parser(raw)?            first error returned as-is
//!        |
//!        v
//!    Snapshot (Arc<BTreeMap<String, EnvValue>>, read-only)
//! ```

use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::sync::Arc;

use super::value::{EnvValue, FromEnvValue};
use super::{EnvSource, ProcessEnv, read_var};
use crate::error::{ParseError, SnapshotError};

/// A parser erased to the common snapshot value type.
pub type DynParser = Box<dyn Fn(&str) -> Result<EnvValue, ParseError> + Send + Sync>;

/// Variable names mapped to parsers, in registration order.
#[derive(Default)]
pub struct Registry {
    entries: Vec<(String, DynParser)>,
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a parser for `name`.
    ///
    /// Registering the same name again replaces its parser but keeps its
    /// original position.
    pub fn register<T, F>(&mut self, name: impl Into<String>, parser: F) -> &mut Self
    where
        T: Into<EnvValue>,
        F: Fn(&str) -> Result<T, ParseError> + Send + Sync + 'static,
    {
        let erased: DynParser = Box::new(move |raw| parser(raw).map(Into::into));
        self.register_dyn(name, erased)
    }

    /// Registers an already type-erased parser.
    pub fn register_dyn(&mut self, name: impl Into<String>, parser: DynParser) -> &mut Self {
        let name = name.into();
        if let Some(entry) = self.entries.iter_mut().find(|(n, _)| *n == name) {
            entry.1 = parser;
        } else {
            self.entries.push((name, parser));
        }
        self
    }

    /// Chainable form of [`register`](Self::register).
    #[must_use]
    pub fn with<T, F>(mut self, name: impl Into<String>, parser: F) -> Self
    where
        T: Into<EnvValue>,
        F: Fn(&str) -> Result<T, ParseError> + Send + Sync + 'static,
    {
        self.register(name, parser);
        self
    }

    /// Registered names in evaluation order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Builds a snapshot from `source`.
    ///
    /// # Errors
    ///
    /// The first parser error, unchanged. Later variables are not read.
    pub fn snapshot<S: EnvSource + ?Sized>(&self, source: &S) -> Result<Snapshot, ParseError> {
        source.prepare();

        let mut values = BTreeMap::new();
        for (name, parser) in &self.entries {
            let value = read_var(source, name, parser.as_ref()).inspect_err(|e| {
                tracing::debug!(variable = %name, expected = e.expected(), "environment variable rejected");
            })?;
            values.insert(name.clone(), value);
        }

        let snapshot = Snapshot::from_values(values);
        tracing::info!(variables = snapshot.len(), "loaded environment snapshot");
        Ok(snapshot)
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("names", &self.names().collect::<Vec<_>>())
            .finish()
    }
}

/// Builder for an immutable [`Snapshot`].
#[derive(Debug)]
pub struct EnvironmentBuilder<S = ProcessEnv> {
    source: S,
    registry: Registry,
}

impl EnvironmentBuilder<ProcessEnv> {
    /// Builder over the process environment, merging `.env` first.
    #[must_use]
    pub fn new() -> Self {
        Self::with_source(ProcessEnv::new())
    }
}

impl Default for EnvironmentBuilder<ProcessEnv> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: EnvSource> EnvironmentBuilder<S> {
    /// Builder over an explicit source.
    #[must_use]
    pub fn with_source(source: S) -> Self {
        Self {
            source,
            registry: Registry::new(),
        }
    }

    /// Declares a variable and its parser.
    #[must_use]
    pub fn var<T, F>(mut self, name: impl Into<String>, parser: F) -> Self
    where
        T: Into<EnvValue>,
        F: Fn(&str) -> Result<T, ParseError> + Send + Sync + 'static,
    {
        self.registry.register(name, parser);
        self
    }

    /// Replaces the registry wholesale.
    #[must_use]
    pub fn with_registry(mut self, registry: Registry) -> Self {
        self.registry = registry;
        self
    }

    #[must_use]
    pub const fn registry(&self) -> &Registry {
        &self.registry
    }

    #[must_use]
    pub const fn source(&self) -> &S {
        &self.source
    }

    /// Reads and parses every declared variable.
    ///
    /// # Errors
    ///
    /// The first parser error, unchanged. No snapshot is produced.
    pub fn build(&self) -> Result<Snapshot, ParseError> {
        self.registry.snapshot(&self.source)
    }
}

/// Frozen, by-value capture of parsed environment variables.
///
/// There is no way to change a snapshot after it is built. Clones share the
/// same data.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Snapshot {
    values: Arc<BTreeMap<String, EnvValue>>,
}

impl Snapshot {
    fn from_values(values: BTreeMap<String, EnvValue>) -> Self {
        Self {
            values: Arc::new(values),
        }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&EnvValue> {
        self.values.get(key)
    }

    /// Like [`get`](Self::get), with an error for unknown keys.
    ///
    /// # Errors
    ///
    /// [`SnapshotError::MissingKey`] when `key` was never registered.
    pub fn require(&self, key: &str) -> Result<&EnvValue, SnapshotError> {
        self.get(key).ok_or_else(|| SnapshotError::MissingKey {
            key: key.to_string(),
        })
    }

    /// Typed read.
    ///
    /// # Errors
    ///
    /// [`SnapshotError::MissingKey`] for unknown keys,
    /// [`SnapshotError::TypeMismatch`] when the stored kind differs.
    pub fn get_as<T: FromEnvValue>(&self, key: &str) -> Result<T, SnapshotError> {
        let value = self.require(key)?;
        T::from_env_value(value).ok_or_else(|| SnapshotError::TypeMismatch {
            key: key.to_string(),
            expected: T::KIND,
            actual: value.kind(),
        })
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Variable names in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Entries in sorted key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &EnvValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Serialize for Snapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.values.serialize(serializer)
    }
}
