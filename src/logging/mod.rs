// envkit: typed environment snapshots
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Logging on top of `tracing`.
//!
//! ```text
//! [log] level/file_level/file  --> LogConfig --> init_logging()
//!                                                  |
//!                                 +----------------+----------------+
//!                                 v                                 v
//!                         stderr (ANSI)                   log file (non_blocking)
//!                         keeps stdout for                 spans closed, targets
//!                         check/schema output              shown, no ANSI
//!                                                  |
//!                                                  v
//!                                      LogGuard (flushes the file on drop)
//!
//! Logger { stage }  info | warn | error | success | debug (silent under "pro")
//! ```
//!
//! | level | filter                    |
//! |-------|---------------------------|
//! | 0     | off                       |
//! | 1-4   | error, warn, info, debug  |
//! | 5     | `warn,envkit=trace`       |
//! | 6     | trace, dependencies too   |

use anyhow::Context;
use bon::Builder;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

use crate::error::{ConfigError, Result};

/// Verbosity from 0 (silent) to 6 (everything, dependencies included).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogLevel(u8);

impl Default for LogLevel {
    fn default() -> Self {
        Self::INFO
    }
}

impl LogLevel {
    pub const SILENT: Self = Self(0);
    pub const ERROR: Self = Self(1);
    pub const WARN: Self = Self(2);
    pub const INFO: Self = Self(3);
    pub const DEBUG: Self = Self(4);
    /// envkit's own trace output, dependencies at warn.
    pub const TRACE: Self = Self(5);
    pub const DUMP: Self = Self(6);

    /// # Errors
    ///
    /// [`ConfigError::InvalidValue`] above 6.
    pub fn new(level: u8) -> std::result::Result<Self, ConfigError> {
        Self::from_u8(level).ok_or_else(|| ConfigError::InvalidValue {
            section: "log".to_string(),
            key: "level".to_string(),
            message: format!("log level must be 0-6, got {level}"),
        })
    }

    #[must_use]
    pub const fn from_u8(level: u8) -> Option<Self> {
        if level <= 6 { Some(Self(level)) } else { None }
    }

    /// `EnvFilter` directives for this level.
    #[must_use]
    pub const fn to_filter_string(self) -> &'static str {
        match self.0 {
            0 => "off",
            1 => "error",
            2 => "warn",
            3 => "info",
            4 => "debug",
            5 => "warn,envkit=trace",
            _ => "trace",
        }
    }
}

impl Serialize for LogLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.0)
    }
}

impl<'de> Deserialize<'de> for LogLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = u8::deserialize(deserializer)?;
        Self::new(value).map_err(serde::de::Error::custom)
    }
}

/// Sinks and levels for [`init_logging`].
#[derive(Debug, Clone, Builder)]
pub struct LogConfig {
    #[builder(setters(name = with_console_level), default = LogLevel::INFO)]
    console_level: LogLevel,
    #[builder(setters(name = with_file_level), default = LogLevel::TRACE)]
    file_level: LogLevel,
    #[builder(setters(name = with_log_file), into)]
    log_file: Option<PathBuf>,
    /// Module path on console lines.
    #[builder(setters(name = with_show_target), default = false)]
    show_target: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl LogConfig {
    #[must_use]
    pub const fn console_level(&self) -> LogLevel {
        self.console_level
    }

    #[must_use]
    pub const fn file_level(&self) -> LogLevel {
        self.file_level
    }

    #[must_use]
    pub fn log_file(&self) -> Option<&Path> {
        self.log_file.as_deref()
    }

    #[must_use]
    pub const fn show_target(&self) -> bool {
        self.show_target
    }
}

/// Keeps the file writer alive; pending lines are flushed on drop.
pub struct LogGuard {
    _file_guard: Option<WorkerGuard>,
}

/// Installs the global subscriber: console lines on stderr and, when
/// configured, a log file. Call once per process.
///
/// # Errors
///
/// Returns an error if the log directory or file cannot be created.
///
/// # Example
///
/// ```no_run
/// use envkit::logging::{init_logging, LogConfig, LogLevel};
///
/// let config = LogConfig::builder()
///     .with_console_level(LogLevel::WARN)
///     .with_log_file("logs/envkit.log")
///     .build();
///
/// let _guard = init_logging(&config)?;
/// tracing::warn!("console and file");
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn init_logging(config: &LogConfig) -> Result<LogGuard> {
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(config.show_target())
        .with_ansi(true)
        .with_filter(EnvFilter::new(config.console_level().to_filter_string()));

    let (file_layer, file_guard) = match config.log_file() {
        Some(log_path) => {
            let (writer, guard) = tracing_appender::non_blocking(create_log_file(log_path)?);
            let layer = fmt::layer()
                .with_writer(writer)
                .with_target(true)
                .with_ansi(false)
                .with_span_events(FmtSpan::CLOSE)
                .with_filter(EnvFilter::new(config.file_level().to_filter_string()));
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();

    Ok(LogGuard {
        _file_guard: file_guard,
    })
}

fn create_log_file(path: &Path) -> Result<std::fs::File> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create log directory {}", parent.display()))?;
    }
    std::fs::File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))
}

/// Production stage name; [`Logger::debug`] is silent under it.
pub const PRODUCTION_STAGE: &str = "pro";

/// Severity of a [`Logger`] message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warn,
    Error,
    /// Reported at info level, tagged `SUCCESS`.
    Success,
    Debug,
}

impl Severity {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
            Self::Success => "SUCCESS",
            Self::Debug => "DEBUG",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

macro_rules! emit {
    ($level:ident, $stage:expr, $severity:expr, $msg:expr, $trace:expr) => {
        match $trace {
            Some(trace) => tracing::$level!(
                stage = %$stage,
                severity = $severity.as_str(),
                trace,
                "{}",
                $msg
            ),
            None => tracing::$level!(stage = %$stage, severity = $severity.as_str(), "{}", $msg),
        }
    };
}

/// Leveled message facade bound to a deployment stage.
///
/// Messages go through `tracing`, so where they end up depends on
/// [`init_logging`]. The optional `trace` is attached as a field.
///
/// ```text
/// Logger::new("dev").debug("x")   -> DEBUG event
/// Logger::new("pro").debug("x")   -> nothing
/// Logger::new(_).success("x")     -> INFO event, severity=SUCCESS
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Logger {
    stage: String,
}

impl Logger {
    pub fn new(stage: impl Into<String>) -> Self {
        Self {
            stage: stage.into(),
        }
    }

    #[must_use]
    pub fn stage(&self) -> &str {
        &self.stage
    }

    #[must_use]
    pub fn is_production(&self) -> bool {
        self.stage == PRODUCTION_STAGE
    }

    /// Whether a message of `severity` would be emitted at all.
    #[must_use]
    pub fn enabled(&self, severity: Severity) -> bool {
        severity != Severity::Debug || !self.is_production()
    }

    pub fn info(&self, msg: &str) {
        self.log(Severity::Info, msg, None);
    }

    pub fn warn(&self, msg: &str) {
        self.log(Severity::Warn, msg, None);
    }

    pub fn error(&self, msg: &str) {
        self.log(Severity::Error, msg, None);
    }

    pub fn success(&self, msg: &str) {
        self.log(Severity::Success, msg, None);
    }

    pub fn debug(&self, msg: &str) {
        self.log(Severity::Debug, msg, None);
    }

    /// Emits `msg` and returns whether it was emitted.
    pub fn log(&self, severity: Severity, msg: &str, trace: Option<&str>) -> bool {
        if !self.enabled(severity) {
            return false;
        }
        match severity {
            Severity::Info | Severity::Success => emit!(info, self.stage, severity, msg, trace),
            Severity::Warn => emit!(warn, self.stage, severity, msg, trace),
            Severity::Error => emit!(error, self.stage, severity, msg, trace),
            Severity::Debug => emit!(debug, self.stage, severity, msg, trace),
        }
        true
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new("dev")
    }
}
