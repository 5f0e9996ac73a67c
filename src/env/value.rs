// envkit: typed environment snapshots
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Dynamically typed snapshot values.
//!
//! ```text
//! parser output T --Into--> EnvValue --FromEnvValue--> T
//! bool i64 f64 OffsetDateTime Guid String serde_json::Value Vec<T>
//! ```

use serde::{Serialize, Serializer};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::validator::Guid;

/// One parsed environment value.
#[derive(Debug, Clone, PartialEq)]
pub enum EnvValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Date(OffsetDateTime),
    Guid(Guid),
    Json(serde_json::Value),
    String(String),
    List(Vec<EnvValue>),
}

impl EnvValue {
    /// Short name of the stored type.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Date(_) => "date",
            Self::Guid(_) => "guid",
            Self::Json(_) => "json",
            Self::String(_) => "string",
            Self::List(_) => "list",
        }
    }

    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Float value; integers widen.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub const fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            Self::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_date(&self) -> Option<OffsetDateTime> {
        match self {
            Self::Date(d) => Some(*d),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_guid(&self) -> Option<&Guid> {
        match self {
            Self::Guid(g) => Some(g),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Json(v) => Some(v),
            _ => None,
        }
    }

    /// String value; GUIDs are strings too.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            Self::Guid(g) => Some(g.as_str()),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_list(&self) -> Option<&[Self]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }
}

impl std::fmt::Display for EnvValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Date(d) => match d.format(&Rfc3339) {
                Ok(s) => f.write_str(&s),
                Err(_) => write!(f, "{d}"),
            },
            Self::Guid(g) => write!(f, "{g}"),
            Self::Json(v) => write!(f, "{v}"),
            Self::String(s) => f.write_str(s),
            Self::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{item}")?;
                }
                Ok(())
            }
        }
    }
}

impl Serialize for EnvValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Int(i) => serializer.serialize_i64(*i),
            Self::Float(x) => serializer.serialize_f64(*x),
            Self::Date(d) => {
                let formatted = d.format(&Rfc3339).map_err(serde::ser::Error::custom)?;
                serializer.serialize_str(&formatted)
            }
            Self::Guid(g) => serializer.serialize_str(g.as_str()),
            Self::Json(v) => v.serialize(serializer),
            Self::String(s) => serializer.serialize_str(s),
            Self::List(items) => items.serialize(serializer),
        }
    }
}

// --- Parser output -> EnvValue ---

macro_rules! impl_into_env_value {
    ($($ty:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$ty> for EnvValue {
                fn from(value: $ty) -> Self {
                    Self::$variant(value)
                }
            }
        )+
    };
}

impl_into_env_value! {
    bool => Bool,
    i64 => Int,
    f64 => Float,
    OffsetDateTime => Date,
    Guid => Guid,
    serde_json::Value => Json,
    String => String,
}

impl From<&str> for EnvValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl<T: Into<EnvValue>> From<Vec<T>> for EnvValue {
    fn from(items: Vec<T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

// --- EnvValue -> typed ---

/// Types that can be read back out of an [`EnvValue`].
pub trait FromEnvValue: Sized {
    /// Kind name used in mismatch errors.
    const KIND: &'static str;

    fn from_env_value(value: &EnvValue) -> Option<Self>;
}

impl FromEnvValue for bool {
    const KIND: &'static str = "bool";

    fn from_env_value(value: &EnvValue) -> Option<Self> {
        value.as_bool()
    }
}

impl FromEnvValue for i64 {
    const KIND: &'static str = "int";

    fn from_env_value(value: &EnvValue) -> Option<Self> {
        value.as_int()
    }
}

impl FromEnvValue for f64 {
    const KIND: &'static str = "float";

    fn from_env_value(value: &EnvValue) -> Option<Self> {
        value.as_float()
    }
}

impl FromEnvValue for OffsetDateTime {
    const KIND: &'static str = "date";

    fn from_env_value(value: &EnvValue) -> Option<Self> {
        value.as_date()
    }
}

impl FromEnvValue for Guid {
    const KIND: &'static str = "guid";

    fn from_env_value(value: &EnvValue) -> Option<Self> {
        value.as_guid().cloned()
    }
}

impl FromEnvValue for serde_json::Value {
    const KIND: &'static str = "json";

    fn from_env_value(value: &EnvValue) -> Option<Self> {
        value.as_json().cloned()
    }
}

impl FromEnvValue for String {
    const KIND: &'static str = "string";

    fn from_env_value(value: &EnvValue) -> Option<Self> {
        value.as_str().map(str::to_string)
    }
}

impl<T: FromEnvValue> FromEnvValue for Vec<T> {
    const KIND: &'static str = "list";

    fn from_env_value(value: &EnvValue) -> Option<Self> {
        value.as_list()?.iter().map(T::from_env_value).collect()
    }
}
