// envkit: typed environment snapshots
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!            EnvkitError (~24 bytes)
//!                     |
//!   +--------+--------+--------+---------+
//!   |        |        |        |         |
//!   v        v        v        v         v
//! Parse   Snapshot  Config     Fs     Io/Other
//!  Box      Box      Box      Box     Box<str>
//!
//! Sub-errors (unboxed internally):
//!   Parse     InvalidBoolean, InvalidInteger, InvalidJson, NotAllowed, ..
//!   Snapshot  MissingKey, TypeMismatch
//!   Config    ParseError, UnknownKind, InvalidVariable, InvalidValue
//!   Fs        MissingFile, IoError, InvalidJson, UnknownEncoding
//! ```
//!
//! [`ParseError`] is what the snapshot builder returns: the first failing
//! parser's error, passed through untouched.

pub mod handler;

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`EnvkitError`].
pub type EnvkitResult<T> = std::result::Result<T, EnvkitError>;

/// Top-level library error type.
///
/// All sub-errors are boxed to keep this enum at ~24 bytes on the stack.
#[derive(Debug, Error)]
pub enum EnvkitError {
    /// A raw value did not match the expected shape.
    #[error("parse error: {0}")]
    Parse(#[from] Box<ParseError>),

    /// Lookup on a built snapshot failed.
    #[error("snapshot error: {0}")]
    Snapshot(#[from] Box<SnapshotError>),

    /// Schema or settings error.
    #[error("config error: {0}")]
    Config(#[from] Box<ConfigError>),

    /// File helper error.
    #[error("filesystem error: {0}")]
    Fs(#[from] Box<FsError>),

    /// I/O error.
    #[error("io error: {0}")]
    Io(Box<std::io::Error>),

    /// Generic error with message.
    #[error("{0}")]
    Other(Box<str>),
}

macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for EnvkitError {
                fn from(err: $error) -> Self {
                    EnvkitError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    ParseError => Parse,
    SnapshotError => Snapshot,
    ConfigError => Config,
    FsError => Fs,
    std::io::Error => Io,
}

// --- Parse Errors ---

/// A raw string could not be converted into the requested type.
///
/// Every variant carries the offending raw value; the message names the
/// expected kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Invalid boolean: \"{value}\"")]
    InvalidBoolean { value: String },

    #[error("Invalid integer: \"{value}\"")]
    InvalidInteger { value: String },

    /// Digits only, but the value does not fit in an `i64`.
    #[error("Integer out of range: \"{value}\"")]
    IntegerOutOfRange { value: String },

    #[error("Invalid float: \"{value}\"")]
    InvalidFloat { value: String },

    #[error("Invalid date: \"{value}\"")]
    InvalidDate { value: String },

    #[error("Invalid JSON: \"{value}\" ({message})")]
    InvalidJson { value: String, message: String },

    #[error("Invalid GUID: \"{value}\"")]
    InvalidGuid { value: String },

    /// Value is not a member of the allowed set.
    #[error("Invalid value \"{value}\", allowed: {}", allowed.join(", "))]
    NotAllowed { value: String, allowed: Vec<String> },
}

impl ParseError {
    /// The raw input that failed to parse.
    #[must_use]
    pub fn value(&self) -> &str {
        match self {
            Self::InvalidBoolean { value }
            | Self::InvalidInteger { value }
            | Self::IntegerOutOfRange { value }
            | Self::InvalidFloat { value }
            | Self::InvalidDate { value }
            | Self::InvalidJson { value, .. }
            | Self::InvalidGuid { value }
            | Self::NotAllowed { value, .. } => value,
        }
    }

    /// Short name of the expected kind, e.g. `"integer"`.
    #[must_use]
    pub const fn expected(&self) -> &'static str {
        match self {
            Self::InvalidBoolean { .. } => "boolean",
            Self::InvalidInteger { .. } | Self::IntegerOutOfRange { .. } => "integer",
            Self::InvalidFloat { .. } => "float",
            Self::InvalidDate { .. } => "date",
            Self::InvalidJson { .. } => "json",
            Self::InvalidGuid { .. } => "guid",
            Self::NotAllowed { .. } => "enum",
        }
    }
}

// --- Snapshot Errors ---

/// Errors from reading a built snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnapshotError {
    /// The key was never registered.
    #[error("variable '{key}' is not part of the snapshot")]
    MissingKey { key: String },

    /// The stored value has a different type than requested.
    #[error("variable '{key}' holds a {actual} value, expected {expected}")]
    TypeMismatch {
        key: String,
        expected: &'static str,
        actual: &'static str,
    },
}

// --- Config Errors ---

/// Schema and settings errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse a configuration source.
    #[error("failed to parse config: {message}")]
    ParseError { message: String },

    /// A variable names a parser kind that does not exist.
    #[error("unknown parser kind '{kind}' for variable '{variable}'")]
    UnknownKind { variable: String, kind: String },

    /// A variable definition is incomplete or contradictory.
    #[error("invalid definition for variable '{variable}': {message}")]
    InvalidVariable { variable: String, message: String },

    /// Invalid settings value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        Self::ParseError {
            message: err.to_string(),
        }
    }
}

// --- Filesystem Errors ---

/// File helper errors.
#[derive(Debug, Error)]
pub enum FsError {
    /// File does not exist.
    #[error("Missing file at {0}")]
    MissingFile(String),

    /// General I/O error.
    #[error("I/O error on '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// File content is not valid JSON for the requested type.
    #[error("invalid JSON in '{path}': {source}")]
    InvalidJson {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// Encoding label not recognised.
    #[error("unknown encoding label '{0}'")]
    UnknownEncoding(String),
}

#[cfg(test)]
mod tests;
