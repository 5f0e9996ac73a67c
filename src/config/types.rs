// envkit: typed environment snapshots
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration types for envkit.
//!
//! # Variable Declarations
//!
//! ```text
//! [[vars]]                          VarSpec
//! name = "PORTS"                      name
//! kind = "array"                      kind ----+
//! item = "int"                        item     |  resolve(name)
//! delimiter = ";"                     delimiter|
//!                                              v
//!                          VarParser::Array { item: Int, delimiter: ';' }
//!                                              |
//!                                              v
//!                                  DynParser for the Registry
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::env::builder::DynParser;
use crate::env::{EnvValue, ProcessEnv};
use crate::error::{ConfigError, ParseError};
use crate::logging::LogLevel;
use crate::parser::{
    DEFAULT_DELIMITER, parse_as_array_with, parse_as_bool, parse_as_csv_with, parse_as_date,
    parse_as_enum, parse_as_float, parse_as_guid, parse_as_int, parse_as_json, parse_as_string,
};

/// Parser kinds a variable can be declared with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParserKind {
    Bool,
    Int,
    Float,
    Date,
    Json,
    Csv,
    String,
    Guid,
    Enum,
    Array,
}

impl ParserKind {
    pub const ALL: [Self; 10] = [
        Self::Bool,
        Self::Int,
        Self::Float,
        Self::Date,
        Self::Json,
        Self::Csv,
        Self::String,
        Self::Guid,
        Self::Enum,
        Self::Array,
    ];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Float => "float",
            Self::Date => "date",
            Self::Json => "json",
            Self::Csv => "csv",
            Self::String => "string",
            Self::Guid => "guid",
            Self::Enum => "enum",
            Self::Array => "array",
        }
    }

    /// Looks a kind up by name, case-insensitively.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(name.trim()))
    }
}

impl std::fmt::Display for ParserKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One `[[vars]]` entry as written in the schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VarSpec {
    /// Environment variable name, case preserved.
    pub name: String,
    /// Parser kind name, see [`ParserKind`].
    pub kind: String,
    /// Allowed values for `enum`, or for `enum` items of an `array`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allowed: Vec<String>,
    /// Item kind for `array`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item: Option<String>,
    /// Single-character delimiter for `csv` and `array`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delimiter: Option<String>,
}

impl VarSpec {
    /// Shorthand for a spec with only a name and a kind.
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            allowed: Vec::new(),
            item: None,
            delimiter: None,
        }
    }

    /// Checks the declaration and turns it into a parser.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::UnknownKind`] for `kind` or `item` names that do not exist.
    /// - [`ConfigError::InvalidVariable`] for an `enum` without `allowed`, a
    ///   missing or nested array `item`, a delimiter that is not exactly one
    ///   character, or options the kind does not take.
    pub fn resolve(&self) -> Result<VarParser, ConfigError> {
        let kind = self.kind_named(&self.kind)?;
        match kind {
            ParserKind::Array => {
                let item_name = self
                    .item
                    .as_deref()
                    .ok_or_else(|| self.invalid("kind 'array' requires 'item'"))?;
                let item = self.kind_named(item_name)?;
                if matches!(item, ParserKind::Array | ParserKind::Csv) {
                    return Err(self.invalid("nested lists are not supported"));
                }
                Ok(VarParser::Array {
                    item: Box::new(self.scalar(item)?),
                    delimiter: self.delimiter()?,
                })
            }
            ParserKind::Csv => {
                self.reject_item()?;
                Ok(VarParser::Csv {
                    delimiter: self.delimiter()?,
                })
            }
            _ => {
                self.reject_item()?;
                if self.delimiter.is_some() {
                    return Err(self.invalid(&format!("kind '{kind}' does not take 'delimiter'")));
                }
                self.scalar(kind)
            }
        }
    }

    fn scalar(&self, kind: ParserKind) -> Result<VarParser, ConfigError> {
        Ok(match kind {
            ParserKind::Bool => VarParser::Bool,
            ParserKind::Int => VarParser::Int,
            ParserKind::Float => VarParser::Float,
            ParserKind::Date => VarParser::Date,
            ParserKind::Json => VarParser::Json,
            ParserKind::String => VarParser::String,
            ParserKind::Guid => VarParser::Guid,
            ParserKind::Enum => {
                if self.allowed.is_empty() {
                    return Err(self.invalid("kind 'enum' requires a non-empty 'allowed' list"));
                }
                VarParser::Enum {
                    allowed: self.allowed.clone(),
                }
            }
            ParserKind::Csv | ParserKind::Array => {
                return Err(self.invalid("nested lists are not supported"));
            }
        })
    }

    fn kind_named(&self, name: &str) -> Result<ParserKind, ConfigError> {
        ParserKind::from_name(name).ok_or_else(|| ConfigError::UnknownKind {
            variable: self.name.clone(),
            kind: name.to_string(),
        })
    }

    fn delimiter(&self) -> Result<char, ConfigError> {
        let Some(raw) = self.delimiter.as_deref() else {
            return Ok(DEFAULT_DELIMITER);
        };
        let mut chars = raw.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(c),
            _ => Err(self.invalid(&format!(
                "delimiter must be a single character, got '{raw}'"
            ))),
        }
    }

    fn reject_item(&self) -> Result<(), ConfigError> {
        if self.item.is_some() {
            return Err(self.invalid(&format!("kind '{}' does not take 'item'", self.kind)));
        }
        Ok(())
    }

    fn invalid(&self, message: &str) -> ConfigError {
        ConfigError::InvalidVariable {
            variable: self.name.clone(),
            message: message.to_string(),
        }
    }
}

/// A checked variable parser, ready to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VarParser {
    Bool,
    Int,
    Float,
    Date,
    Json,
    String,
    Guid,
    Csv { delimiter: char },
    Enum { allowed: Vec<String> },
    Array { item: Box<VarParser>, delimiter: char },
}

impl VarParser {
    /// Parses one raw value.
    ///
    /// # Errors
    ///
    /// The underlying parser's error.
    pub fn parse(&self, raw: &str) -> Result<EnvValue, ParseError> {
        match self {
            Self::Bool => parse_as_bool(raw).map(EnvValue::from),
            Self::Int => parse_as_int(raw).map(EnvValue::from),
            Self::Float => parse_as_float(raw).map(EnvValue::from),
            Self::Date => parse_as_date(raw).map(EnvValue::from),
            Self::Json => parse_as_json::<serde_json::Value>(raw).map(EnvValue::from),
            Self::String => parse_as_string(raw).map(EnvValue::from),
            Self::Guid => parse_as_guid(raw).map(EnvValue::from),
            Self::Csv { delimiter } => parse_as_csv_with(raw, *delimiter).map(EnvValue::from),
            Self::Enum { allowed } => {
                let allowed: Vec<&str> = allowed.iter().map(String::as_str).collect();
                parse_as_enum(raw, &allowed).map(EnvValue::from)
            }
            Self::Array { item, delimiter } => {
                parse_as_array_with(raw, *delimiter, |token| item.parse(token))
                    .map(EnvValue::List)
            }
        }
    }

    /// Type-erased form for [`Registry::register_dyn`](crate::env::Registry::register_dyn).
    #[must_use]
    pub fn into_dyn(self) -> DynParser {
        Box::new(move |raw| self.parse(raw))
    }
}

impl std::fmt::Display for VarParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bool => f.write_str("bool"),
            Self::Int => f.write_str("int"),
            Self::Float => f.write_str("float"),
            Self::Date => f.write_str("date"),
            Self::Json => f.write_str("json"),
            Self::String => f.write_str("string"),
            Self::Guid => f.write_str("guid"),
            Self::Csv { delimiter } => write!(f, "csv('{delimiter}')"),
            Self::Enum { allowed } => write!(f, "enum({})", allowed.join("|")),
            Self::Array { item, delimiter } => write!(f, "array<{item}>('{delimiter}')"),
        }
    }
}

/// `[log]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogSettings {
    /// Console log level (0-6).
    pub level: LogLevel,
    /// File log level (0-6).
    pub file_level: LogLevel,
    /// Log file; no file logging when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    /// Deployment stage; debug messages are dropped under `pro`.
    pub stage: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: LogLevel::INFO,
            file_level: LogLevel::TRACE,
            file: None,
            stage: "dev".to_string(),
        }
    }
}

/// `[dotenv]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DotenvSettings {
    /// Merge a dotenv file before reading variables.
    pub enabled: bool,
    /// Explicit dotenv file; `.env` lookup when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl Default for DotenvSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            path: None,
        }
    }
}

impl DotenvSettings {
    /// Process environment source matching these settings.
    #[must_use]
    pub fn source(&self) -> ProcessEnv {
        match (&self.path, self.enabled) {
            (_, false) => ProcessEnv::without_dotenv(),
            (Some(path), true) => ProcessEnv::with_dotenv_path(path),
            (None, true) => ProcessEnv::new(),
        }
    }
}
