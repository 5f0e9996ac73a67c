// envkit: typed environment snapshots
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! The `validate` command.

use anyhow::anyhow;

use crate::cli::validate::{ValidateArgs, ValidateKind};
use crate::env::EnvValue;
use crate::error::{ParseError, Result};
use crate::parser::{
    parse_as_bool, parse_as_csv, parse_as_date, parse_as_float, parse_as_int, parse_as_json,
    parse_as_string,
};
use crate::validator::Validator;

/// Result of checking one value.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// A validator accepted the value.
    Valid,
    /// A validator rejected the value.
    Invalid,
    /// A parser accepted the value.
    Parsed(EnvValue),
    /// A parser rejected the value.
    Rejected(ParseError),
}

impl Outcome {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Valid | Self::Parsed(_))
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Valid => f.write_str("valid"),
            Self::Invalid => f.write_str("invalid"),
            Self::Parsed(value) => match serde_json::to_string(value) {
                Ok(json) => f.write_str(&json),
                Err(_) => write!(f, "{value}"),
            },
            Self::Rejected(err) => write!(f, "{err}"),
        }
    }
}

/// Runs the validator or parser named by `kind` on `value`.
#[must_use]
pub fn evaluate(kind: ValidateKind, value: &str) -> Outcome {
    let check = |ok: bool| if ok { Outcome::Valid } else { Outcome::Invalid };
    let parsed = |result: std::result::Result<EnvValue, ParseError>| {
        result.map_or_else(Outcome::Rejected, Outcome::Parsed)
    };

    match kind {
        ValidateKind::Guid => check(Validator::is_guid(value)),
        ValidateKind::Email => check(Validator::is_email(value)),
        ValidateKind::IsoDate => check(Validator::is_iso_date(value)),
        ValidateKind::Number => check(Validator::is_number_str(value)),
        ValidateKind::NonEmpty => check(Validator::is_non_empty_string(value)),
        ValidateKind::Bool => parsed(parse_as_bool(value).map(EnvValue::from)),
        ValidateKind::Int => parsed(parse_as_int(value).map(EnvValue::from)),
        ValidateKind::Float => parsed(parse_as_float(value).map(EnvValue::from)),
        ValidateKind::Date => parsed(parse_as_date(value).map(EnvValue::from)),
        ValidateKind::Json => {
            parsed(parse_as_json::<serde_json::Value>(value).map(EnvValue::from))
        }
        ValidateKind::Csv => parsed(parse_as_csv(value).map(EnvValue::from)),
        ValidateKind::String => parsed(parse_as_string(value).map(EnvValue::from)),
    }
}

/// Run the validate command.
///
/// # Errors
///
/// Returns an error if the value is invalid or fails to parse.
pub fn run_validate_command(args: &ValidateArgs) -> Result<()> {
    let outcome = evaluate(args.kind, &args.value);
    tracing::debug!(kind = ?args.kind, success = outcome.is_success(), "validated value");
    if outcome.is_success() {
        println!("{outcome}");
        Ok(())
    } else {
        Err(anyhow!("{outcome}"))
    }
}
