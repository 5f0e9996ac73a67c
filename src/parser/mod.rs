// envkit: typed environment snapshots
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Fail-fast parsers from raw strings to typed values.
//!
//! ```text
//! raw &str --> parse_as_*() --> Ok(T)
//!                          \--> Err(ParseError { value, expected kind })
//!
//! bool    1|true|0|false (any case)
//! int     ^-?[0-9]+$            -> i64
//! float   ^-?[0-9]+(\.[0-9]+)?$ -> f64
//! date    RFC 3339 | RFC 2822 | YYYY-MM-DD[(T| )HH:MM[:SS[.f]][Z|±HH:MM]]
//!         | YYYY-MM | YYYY
//! json    serde_json -> T
//! csv     split on delimiter, trim each token
//! array   csv + item parser (item error passes through)
//! enum    member of an allowed list
//! guid    8-4-4-4-12 hex
//! string  identity
//! ```
//!
//! Every parser shares the shape `fn(&str) -> Result<T, ParseError>`, so any
//! of them can be handed to the snapshot builder. Numeric parsers check the
//! literal shape before converting: `+10`, `4.`, `1e5` and ` 1` are rejected
//! even though `str::parse` would take some of them.

use regex::Regex;
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::sync::OnceLock;
use time::format_description::BorrowedFormatItem;
use time::format_description::well_known::{Rfc2822, Rfc3339};
use time::macros::format_description;
use time::{Date, Month, OffsetDateTime, PrimitiveDateTime, UtcOffset};

use crate::error::ParseError;
use crate::validator::Guid;

/// Delimiter used by [`parse_as_csv`] and [`parse_as_array`].
pub const DEFAULT_DELIMITER: char = ',';

const DATE_ONLY: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");
const LOCAL_DATE_TIME_FORMATS: [&[BorrowedFormatItem<'static>]; 3] = [
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond]"),
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
    format_description!("[year]-[month]-[day]T[hour]:[minute]"),
];
const OFFSET: &[BorrowedFormatItem<'static>] =
    format_description!("[offset_hour sign:mandatory]:[offset_minute]");

fn int_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^-?[0-9]+$").expect("integer pattern is valid"))
}

fn float_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^-?[0-9]+(\.[0-9]+)?$").expect("float pattern is valid")
    })
}

/// Parses `1`/`true` and `0`/`false`, case-insensitively.
///
/// # Errors
///
/// [`ParseError::InvalidBoolean`] for anything else, including `""`.
pub fn parse_as_bool(value: &str) -> Result<bool, ParseError> {
    if value == "1" || value.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if value == "0" || value.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(ParseError::InvalidBoolean {
            value: value.to_string(),
        })
    }
}

/// Parses a base-10 integer with an optional leading `-`.
///
/// # Errors
///
/// [`ParseError::InvalidInteger`] when the literal shape is wrong,
/// [`ParseError::IntegerOutOfRange`] when it does not fit in an `i64`.
pub fn parse_as_int(value: &str) -> Result<i64, ParseError> {
    if !int_pattern().is_match(value) {
        return Err(ParseError::InvalidInteger {
            value: value.to_string(),
        });
    }
    value
        .parse::<i64>()
        .map_err(|_| ParseError::IntegerOutOfRange {
            value: value.to_string(),
        })
}

/// Parses a decimal number with `.` as separator. A trailing bare `.` is
/// rejected.
///
/// # Errors
///
/// [`ParseError::InvalidFloat`] when the literal shape is wrong.
pub fn parse_as_float(value: &str) -> Result<f64, ParseError> {
    let invalid = || ParseError::InvalidFloat {
        value: value.to_string(),
    };
    if !float_pattern().is_match(value) {
        return Err(invalid());
    }
    value.parse::<f64>().map_err(|_| invalid())
}

/// Parses a date or date-time into an instant.
///
/// Offset-less forms are taken as UTC.
///
/// # Errors
///
/// [`ParseError::InvalidDate`] when no accepted form matches.
pub fn parse_as_date(value: &str) -> Result<OffsetDateTime, ParseError> {
    parse_instant(value.trim()).ok_or_else(|| ParseError::InvalidDate {
        value: value.to_string(),
    })
}

fn parse_instant(value: &str) -> Option<OffsetDateTime> {
    if value.is_empty() {
        return None;
    }
    if let Ok(instant) = OffsetDateTime::parse(value, &Rfc3339) {
        return Some(instant);
    }
    if let Ok(instant) = OffsetDateTime::parse(value, &Rfc2822) {
        return Some(instant);
    }
    if let Ok(date) = Date::parse(value, DATE_ONLY) {
        return Some(date.midnight().assume_utc());
    }
    if let Some(instant) = parse_date_time(value) {
        return Some(instant);
    }
    parse_partial_date(value).map(|date| date.midnight().assume_utc())
}

/// `YYYY-MM-DD(T| )HH:MM[:SS[.f]]`, then an optional `Z` or `±HH:MM`.
/// Without a suffix the time is UTC.
fn parse_date_time(value: &str) -> Option<OffsetDateTime> {
    let (local, offset) = split_offset(value);
    let local = match local.as_bytes().get(10) {
        Some(b' ') => Cow::Owned(local.replacen(' ', "T", 1)),
        _ => Cow::Borrowed(local),
    };
    LOCAL_DATE_TIME_FORMATS
        .iter()
        .find_map(|format| PrimitiveDateTime::parse(&local, *format).ok())
        .map(|instant| instant.assume_offset(offset))
}

fn split_offset(value: &str) -> (&str, UtcOffset) {
    if let Some(local) = value.strip_suffix('Z') {
        return (local, UtcOffset::UTC);
    }
    if let Some(split) = value.len().checked_sub(6)
        && value.is_char_boundary(split)
    {
        let (local, suffix) = value.split_at(split);
        if let Ok(offset) = UtcOffset::parse(suffix, OFFSET) {
            return (local, offset);
        }
    }
    (value, UtcOffset::UTC)
}

/// `YYYY-MM` or `YYYY`, resolved to the first day.
fn parse_partial_date(value: &str) -> Option<Date> {
    let (year, month) = value.split_once('-').unwrap_or((value, "01"));
    if year.len() != 4 || month.len() != 2 {
        return None;
    }
    if !year.bytes().chain(month.bytes()).all(|b| b.is_ascii_digit()) {
        return None;
    }
    let month = Month::try_from(month.parse::<u8>().ok()?).ok()?;
    Date::from_calendar_date(year.parse().ok()?, month, 1).ok()
}

/// Parses JSON text into `T`.
///
/// # Errors
///
/// [`ParseError::InvalidJson`] for malformed JSON or a shape `T` rejects.
pub fn parse_as_json<T: DeserializeOwned>(value: &str) -> Result<T, ParseError> {
    serde_json::from_str(value).map_err(|e| ParseError::InvalidJson {
        value: value.to_string(),
        message: e.to_string(),
    })
}

/// Splits on `,` and trims each token.
///
/// # Errors
///
/// Never fails; the `Result` keeps the common parser shape.
pub fn parse_as_csv(value: &str) -> Result<Vec<String>, ParseError> {
    parse_as_csv_with(value, DEFAULT_DELIMITER)
}

/// Splits on `delimiter` and trims each token.
///
/// # Errors
///
/// Never fails; the `Result` keeps the common parser shape.
pub fn parse_as_csv_with(value: &str, delimiter: char) -> Result<Vec<String>, ParseError> {
    Ok(split_trimmed(value, delimiter).map(str::to_string).collect())
}

fn split_trimmed(value: &str, delimiter: char) -> impl Iterator<Item = &str> {
    value.split(delimiter).map(str::trim)
}

/// Splits on `,` and parses each token with `item_parser`.
///
/// # Errors
///
/// The first error `item_parser` returns, unchanged.
pub fn parse_as_array<T, E, F>(value: &str, item_parser: F) -> Result<Vec<T>, E>
where
    F: FnMut(&str) -> Result<T, E>,
{
    parse_as_array_with(value, DEFAULT_DELIMITER, item_parser)
}

/// Splits on `delimiter` and parses each token with `item_parser`.
///
/// # Errors
///
/// The first error `item_parser` returns, unchanged.
pub fn parse_as_array_with<T, E, F>(value: &str, delimiter: char, item_parser: F) -> Result<Vec<T>, E>
where
    F: FnMut(&str) -> Result<T, E>,
{
    split_trimmed(value, delimiter).map(item_parser).collect()
}

/// Returns the input unchanged.
///
/// # Errors
///
/// Never fails; the `Result` keeps the common parser shape.
pub fn parse_as_string(value: &str) -> Result<String, ParseError> {
    Ok(value.to_string())
}

/// Accepts only members of `allowed`, returning the matching entry.
///
/// # Errors
///
/// [`ParseError::NotAllowed`] listing the admissible values.
pub fn parse_as_enum<'a>(value: &str, allowed: &'a [&'a str]) -> Result<&'a str, ParseError> {
    allowed
        .iter()
        .copied()
        .find(|candidate| *candidate == value)
        .ok_or_else(|| ParseError::NotAllowed {
            value: value.to_string(),
            allowed: allowed.iter().map(|s| (*s).to_string()).collect(),
        })
}

/// Parses a GUID (strict hexadecimal groups).
///
/// # Errors
///
/// [`ParseError::InvalidGuid`] for any other shape.
pub fn parse_as_guid(value: &str) -> Result<Guid, ParseError> {
    value.parse()
}

// --- Parser constructors ---
//
// Closures with the common parser shape, for places that take a single
// `Fn(&str) -> Result<T, ParseError>` (the snapshot builder, `env_snapshot!`).

/// [`parse_as_csv_with`] bound to a delimiter.
pub fn csv_with(delimiter: char) -> impl Fn(&str) -> Result<Vec<String>, ParseError> + Clone {
    move |value| parse_as_csv_with(value, delimiter)
}

/// [`parse_as_array`] bound to an item parser.
pub fn array_of<T, F>(item_parser: F) -> impl Fn(&str) -> Result<Vec<T>, ParseError> + Clone
where
    F: Fn(&str) -> Result<T, ParseError> + Clone,
{
    array_of_with(DEFAULT_DELIMITER, item_parser)
}

/// [`parse_as_array_with`] bound to a delimiter and an item parser.
pub fn array_of_with<T, F>(
    delimiter: char,
    item_parser: F,
) -> impl Fn(&str) -> Result<Vec<T>, ParseError> + Clone
where
    F: Fn(&str) -> Result<T, ParseError> + Clone,
{
    move |value| parse_as_array_with(value, delimiter, &item_parser)
}

/// [`parse_as_enum`] bound to a static allowed list.
pub fn one_of(
    allowed: &'static [&'static str],
) -> impl Fn(&str) -> Result<&'static str, ParseError> + Clone {
    move |value| parse_as_enum(value, allowed)
}
