// envkit: typed environment snapshots
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Structural validators for common string shapes.
//!
//! ```text
//! is_guid            8-4-4-4-12 hex groups
//! is_email           one '@', local <= 64, domain <= 255, dotted domain
//! is_number          finite f64
//! is_non_empty_string  non-empty after trim
//! is_iso_date        YYYY-MM-DD[THH:MM:SS[.f](Z|+HH:MM)] + calendar check
//! ```
//!
//! All checks are non-failing: they answer `true` or `false`.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use crate::error::ParseError;

const EMAIL_MAX_LEN: usize = 320;
const EMAIL_LOCAL_MAX_LEN: usize = 64;
const EMAIL_DOMAIN_MAX_LEN: usize = 255;

fn guid_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$",
        )
        .expect("GUID pattern is valid")
    })
}

fn iso_date_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"^([0-9]{4})-([0-9]{2})-([0-9]{2})(?:T([0-9]{2}):([0-9]{2}):([0-9]{2})(?:\.[0-9]+)?(?:Z|[+-][0-9]{2}:[0-9]{2}))?$",
        )
        .expect("ISO date pattern is valid")
    })
}

/// Namespace for the validation helpers.
pub struct Validator;

impl Validator {
    /// Checks the `8-4-4-4-12` hexadecimal GUID shape. Version bits are not
    /// inspected.
    #[must_use]
    pub fn is_guid(value: &str) -> bool {
        guid_pattern().is_match(value)
    }

    /// Simple structural email check.
    #[must_use]
    pub fn is_email(value: &str) -> bool {
        if value.len() > EMAIL_MAX_LEN || value.chars().any(char::is_whitespace) {
            return false;
        }
        let Some((local, domain)) = value.split_once('@') else {
            return false;
        };
        if local.is_empty() || domain.is_empty() || domain.contains('@') {
            return false;
        }
        if local.len() > EMAIL_LOCAL_MAX_LEN || domain.len() > EMAIL_DOMAIN_MAX_LEN {
            return false;
        }
        domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
    }

    /// True for finite numbers.
    #[must_use]
    pub const fn is_number(value: f64) -> bool {
        value.is_finite()
    }

    /// True when the text parses as a finite `f64`.
    #[must_use]
    pub fn is_number_str(value: &str) -> bool {
        value.parse::<f64>().is_ok_and(Self::is_number)
    }

    #[must_use]
    pub fn is_non_empty_string(value: &str) -> bool {
        !value.trim().is_empty()
    }

    /// ISO-8601 date or date-time with calendar validation.
    ///
    /// A time of day must carry a timezone designator (`Z` or `±HH:MM`).
    #[must_use]
    pub fn is_iso_date(value: &str) -> bool {
        let Some(caps) = iso_date_pattern().captures(value) else {
            return false;
        };
        let field = |i: usize| caps.get(i).and_then(|m| m.as_str().parse::<u32>().ok());

        let (Some(year), Some(month), Some(day)) = (field(1), field(2), field(3)) else {
            return false;
        };
        if !(1..=12).contains(&month) || day < 1 || day > days_in_month(year, month) {
            return false;
        }

        match (field(4), field(5), field(6)) {
            (None, None, None) => true,
            (Some(hour), Some(minute), Some(second)) => hour <= 23 && minute <= 59 && second <= 59,
            _ => false,
        }
    }
}

const fn is_leap_year(year: u32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

const fn days_in_month(year: u32, month: u32) -> u32 {
    match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// A string known to have the GUID shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Guid(String);

impl Guid {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::str::FromStr for Guid {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if Validator::is_guid(s) {
            Ok(Self(s.to_string()))
        } else {
            Err(ParseError::InvalidGuid {
                value: s.to_string(),
            })
        }
    }
}

impl TryFrom<String> for Guid {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if Validator::is_guid(&value) {
            Ok(Self(value))
        } else {
            Err(ParseError::InvalidGuid { value })
        }
    }
}

impl From<Guid> for String {
    fn from(guid: Guid) -> Self {
        guid.0
    }
}

impl AsRef<str> for Guid {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Guid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
