// envkit: typed environment snapshots
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error reporting for application boundaries.
//!
//! ```text
//! handle(err)        --> "<Type> - <message>"           (error level)
//! handle_value(v)    --> "Unknown error object: <json>"
//!                    \-> "Unknown error: No serializable representation!"
//!
//! Mode::Handle     swallow after logging  -> Ok(())
//! Mode::Propagate  log, then hand back    -> Err(err)
//! ```

use serde::Serialize;

/// Message used when an error value cannot be serialized.
pub const UNSERIALIZABLE_ERROR: &str = "Unknown error: No serializable representation!";

/// What to do with an error once it has been logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Log and swallow.
    #[default]
    Handle,
    /// Log and return the error to the caller.
    Propagate,
}

/// Logs errors at error level and optionally hands them back.
#[derive(Debug, Clone, Copy, Default)]
pub struct ErrorReporter {
    mode: Mode,
}

impl ErrorReporter {
    #[must_use]
    pub const fn new(mode: Mode) -> Self {
        Self { mode }
    }

    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    /// Logs a displayable error.
    ///
    /// # Errors
    ///
    /// Returns the error unchanged in [`Mode::Propagate`].
    pub fn handle<E: std::fmt::Display>(&self, error: E) -> Result<(), E> {
        self.handle_with(error, || {})
    }

    /// Runs `before`, then logs the error.
    ///
    /// # Errors
    ///
    /// Returns the error unchanged in [`Mode::Propagate`].
    pub fn handle_with<E, F>(&self, error: E, before: F) -> Result<(), E>
    where
        E: std::fmt::Display,
        F: FnOnce(),
    {
        before();
        tracing::error!("{}", describe_error(&error));
        self.finish(error)
    }

    /// Logs an arbitrary error value by serializing it to JSON.
    ///
    /// Serialization failures never escape; the fallback message is logged
    /// instead.
    ///
    /// # Errors
    ///
    /// Returns the value unchanged in [`Mode::Propagate`].
    pub fn handle_value<T: Serialize>(&self, value: T) -> Result<(), T> {
        tracing::error!("{}", describe_value(&value));
        self.finish(value)
    }

    fn finish<T>(&self, value: T) -> Result<(), T> {
        match self.mode {
            Mode::Handle => Ok(()),
            Mode::Propagate => Err(value),
        }
    }
}

/// Formats an error as `<Type> - <message>`.
#[must_use]
pub fn describe_error<E: std::fmt::Display>(error: &E) -> String {
    format!("{} - {error}", short_type_name::<E>())
}

/// Formats a non-error value, falling back to [`UNSERIALIZABLE_ERROR`].
#[must_use]
pub fn describe_value<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value).map_or_else(
        |_| UNSERIALIZABLE_ERROR.to_string(),
        |json| format!("Unknown error object: {json}"),
    )
}

/// Last path segment of a type name, generics stripped.
fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}
