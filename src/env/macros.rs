// envkit: typed environment snapshots
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Typed snapshot structs.
//!
//! ```text
//! env_snapshot! {
//!     pub struct AppEnv {
//!         port: i64 = "PORT" => parse_as_int,
//!     }
//! }
//!        |
//!        v
//! struct AppEnv { port: i64 }          private fields
//! AppEnv::from_env()                   ProcessEnv (.env merged)
//! AppEnv::from_source(&src)            any EnvSource
//! app_env.port() -> &i64               read-only getter
//! AppEnv::VARIABLES                    ["PORT"]
//! ```

/// Declares a struct whose fields are read from environment variables.
///
/// Each field names its variable and a parser; the field type must be the
/// parser's output type. Fields are read in declaration order and the first
/// parser error is returned as-is, so a value of the struct only exists when
/// every variable parsed. Fields are private and exposed through getters
/// only; the constructors, getters and `VARIABLES` take the struct's
/// visibility.
///
/// # Example
///
/// ```no_run
/// use envkit::env_snapshot;
/// use envkit::parser::{one_of, parse_as_bool, parse_as_int};
///
/// env_snapshot! {
///     /// Settings read at startup.
///     pub struct AppEnv {
///         port: i64 = "PORT" => parse_as_int,
///         debug: bool = "DEBUG" => parse_as_bool,
///         mode: &'static str = "NODE_ENV" => one_of(&["dev", "pro"]),
///     }
/// }
///
/// let env = AppEnv::from_env()?;
/// println!("listening on {}", env.port());
/// # Ok::<(), envkit::error::ParseError>(())
/// ```
#[macro_export]
macro_rules! env_snapshot {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field:ident : $ty:ty = $var:literal => $parser:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        $vis struct $name {
            $( $field: $ty, )+
        }

        impl $name {
            /// Environment variable names, in read order.
            $vis const VARIABLES: &'static [&'static str] = &[$( $var ),+];

            /// Reads the process environment, merging `.env` first.
            ///
            /// # Errors
            ///
            /// The first parser error.
            $vis fn from_env() -> ::std::result::Result<Self, $crate::error::ParseError> {
                Self::from_source(&$crate::env::ProcessEnv::new())
            }

            /// Reads from an explicit source.
            ///
            /// # Errors
            ///
            /// The first parser error.
            $vis fn from_source<S>(source: &S) -> ::std::result::Result<Self, $crate::error::ParseError>
            where
                S: $crate::env::EnvSource + ?Sized,
            {
                $crate::env::EnvSource::prepare(source);
                let snapshot = Self {
                    $( $field: $crate::env::read_var(source, $var, $parser)?, )+
                };
                $crate::env::macros::log_loaded(stringify!($name), Self::VARIABLES.len());
                Ok(snapshot)
            }

            $(
                $(#[$field_meta])*
                #[must_use]
                $vis const fn $field(&self) -> &$ty {
                    &self.$field
                }
            )+
        }
    };
}

#[doc(hidden)]
pub fn log_loaded(name: &str, variables: usize) {
    tracing::info!(snapshot = name, variables, "loaded environment snapshot");
}
