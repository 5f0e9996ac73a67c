// envkit: typed environment snapshots
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Arguments for the `validate` command.
//!
//! ```text
//! envkit validate email user@example.com   → valid
//! envkit validate int 42                   → 42
//! envkit validate int 4.2                  → Error: Invalid integer: "4.2"
//! ```

use clap::{Args, ValueEnum};

/// Arguments for the `validate` command.
#[derive(Debug, Clone, Args)]
pub struct ValidateArgs {
    #[arg(value_name = "KIND")]
    pub kind: ValidateKind,

    #[arg(value_name = "VALUE", allow_hyphen_values = true)]
    pub value: String,
}

/// Validators and parsers reachable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ValidateKind {
    /// GUID check.
    Guid,
    /// Email check.
    Email,
    /// ISO 8601 date check.
    IsoDate,
    /// Finite number check.
    Number,
    /// Non-blank string check.
    NonEmpty,
    /// Boolean parser.
    Bool,
    /// Integer parser.
    Int,
    /// Float parser.
    Float,
    /// Date parser.
    Date,
    /// JSON parser.
    Json,
    /// Comma-separated list parser.
    Csv,
    /// String parser.
    String,
}
