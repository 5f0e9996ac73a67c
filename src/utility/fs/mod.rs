// envkit: typed environment snapshots
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! File read helpers.
//!
//! ```text
//! FileHandler::new("data.json")            resolved against cwd
//! FileHandler::with_base_dir(p, base)      resolved against base
//!   read_to_string()       / read_async()          UTF-8 (BOM aware)
//!   read_to_string_with(l) / read_async_with(l)    any WHATWG label
//!   read_json::<T>()       / read_json_async::<T>()
//! ```
//!
//! A file that does not exist is reported as [`FsError::MissingFile`] by
//! every read.

use encoding_rs::Encoding;
use serde::de::DeserializeOwned;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::FsError;

/// Label used when no encoding is given.
pub const DEFAULT_ENCODING: &str = "utf-8";

/// Reads one file, as text or JSON.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHandler {
    path: PathBuf,
}

impl FileHandler {
    /// Handler for `path`, resolved against the current directory.
    ///
    /// # Errors
    ///
    /// Returns [`FsError::IoError`] if the current directory is not available.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, FsError> {
        let cwd = std::env::current_dir().map_err(|source| FsError::IoError {
            path: ".".to_string(),
            source,
        })?;
        Ok(Self::with_base_dir(path, cwd))
    }

    /// Handler for `path`, resolved against `base_dir`. Absolute paths are
    /// kept as they are.
    pub fn with_base_dir(path: impl AsRef<Path>, base_dir: impl AsRef<Path>) -> Self {
        Self {
            path: base_dir.as_ref().join(path),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Reads the file as UTF-8.
    ///
    /// # Errors
    ///
    /// [`FsError::MissingFile`] or [`FsError::IoError`].
    pub fn read_to_string(&self) -> Result<String, FsError> {
        self.read_to_string_with(DEFAULT_ENCODING)
    }

    /// Reads the file and decodes it from the encoding named by `label`.
    ///
    /// Malformed sequences become U+FFFD.
    ///
    /// # Errors
    ///
    /// [`FsError::UnknownEncoding`] for unknown labels, otherwise as
    /// [`read_to_string`](Self::read_to_string).
    pub fn read_to_string_with(&self, label: &str) -> Result<String, FsError> {
        let encoding = encoding_for(label)?;
        let bytes = std::fs::read(&self.path).map_err(|e| self.io_error(e))?;
        Ok(decode(encoding, &bytes))
    }

    /// Async [`read_to_string`](Self::read_to_string).
    ///
    /// # Errors
    ///
    /// As [`read_to_string`](Self::read_to_string).
    pub async fn read_async(&self) -> Result<String, FsError> {
        self.read_async_with(DEFAULT_ENCODING).await
    }

    /// Async [`read_to_string_with`](Self::read_to_string_with).
    ///
    /// # Errors
    ///
    /// As [`read_to_string_with`](Self::read_to_string_with).
    pub async fn read_async_with(&self, label: &str) -> Result<String, FsError> {
        let encoding = encoding_for(label)?;
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|e| self.io_error(e))?;
        Ok(decode(encoding, &bytes))
    }

    /// Reads and deserializes the file as JSON.
    ///
    /// # Errors
    ///
    /// [`FsError::MissingFile`], [`FsError::IoError`] or
    /// [`FsError::InvalidJson`].
    pub fn read_json<T: DeserializeOwned>(&self) -> Result<T, FsError> {
        let text = self.read_to_string()?;
        self.parse_json(&text)
    }

    /// Async [`read_json`](Self::read_json).
    ///
    /// # Errors
    ///
    /// As [`read_json`](Self::read_json).
    pub async fn read_json_async<T: DeserializeOwned>(&self) -> Result<T, FsError> {
        let text = self.read_async().await?;
        self.parse_json(&text)
    }

    fn parse_json<T: DeserializeOwned>(&self, text: &str) -> Result<T, FsError> {
        serde_json::from_str(text).map_err(|source| FsError::InvalidJson {
            path: self.path.display().to_string(),
            source,
        })
    }

    fn io_error(&self, source: std::io::Error) -> FsError {
        let path = self.path.display().to_string();
        if source.kind() == ErrorKind::NotFound {
            FsError::MissingFile(path)
        } else {
            FsError::IoError { path, source }
        }
    }
}

fn encoding_for(label: &str) -> Result<&'static Encoding, FsError> {
    Encoding::for_label(label.trim().as_bytes())
        .ok_or_else(|| FsError::UnknownEncoding(label.to_string()))
}

fn decode(encoding: &'static Encoding, bytes: &[u8]) -> String {
    let (text, _, had_errors) = encoding.decode(bytes);
    if had_errors {
        tracing::debug!(encoding = encoding.name(), "replaced malformed input while decoding");
    }
    text.into_owned()
}
