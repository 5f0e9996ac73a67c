// envkit: typed environment snapshots
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! In-memory environment map with copy-on-write semantics.
//!
//! ```text
//! EnvMap
//! vars: Arc<BTreeMap<String, String>>
//! clone shares the Arc until set()/remove() (Arc::make_mut)
//! ```
//!
//! Keys are case-sensitive, as on Unix. Used both as an explicit source for
//! the snapshot builder and as a frozen capture of the process environment.

use std::collections::BTreeMap;
use std::sync::Arc;

use super::EnvSource;

/// A set of environment variables.
///
/// Cloning is cheap; data is copied on the first write to a shared map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvMap {
    vars: Arc<BTreeMap<String, String>>,
}

impl EnvMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an environment from a map of variables.
    #[must_use]
    pub fn from_map(vars: BTreeMap<String, String>) -> Self {
        Self {
            vars: Arc::new(vars),
        }
    }

    /// Sets a variable, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        Arc::make_mut(&mut self.vars).insert(key.into(), value.into());
        self
    }

    /// Gets a variable value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    /// Removes a variable.
    pub fn remove(&mut self, key: &str) -> &mut Self {
        if self.vars.contains_key(key) {
            Arc::make_mut(&mut self.vars).remove(key);
        }
        self
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.vars.contains_key(key)
    }

    /// Returns all variables as an owned map.
    #[must_use]
    pub fn to_map(&self) -> BTreeMap<String, String> {
        (*self.vars).clone()
    }

    /// Iterates variables in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// True while this map still shares its data with a clone.
    #[must_use]
    pub fn is_shared(&self) -> bool {
        Arc::strong_count(&self.vars) > 1
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for EnvMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_map(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl EnvSource for EnvMap {
    fn var(&self, name: &str) -> Option<String> {
        self.get(name).map(str::to_string)
    }
}
