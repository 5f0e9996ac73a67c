// envkit: typed environment snapshots
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Arguments for the `random` command.

use clap::{Args, ValueEnum};

/// Arguments for the `random` command.
#[derive(Debug, Clone, Args)]
pub struct RandomArgs {
    #[arg(value_name = "KIND")]
    pub kind: RandomKind,

    /// String length.
    #[arg(long, default_value_t = 16)]
    pub length: usize,

    /// Lower integer bound (inclusive).
    #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
    pub min: i64,

    /// Upper integer bound (inclusive).
    #[arg(long, default_value_t = 10_000, allow_negative_numbers = true)]
    pub max: i64,

    /// Number of values to print.
    #[arg(short = 'n', long, default_value_t = 1)]
    pub count: usize,
}

/// Kinds of random values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RandomKind {
    Guid,
    String,
    Int,
    Bool,
}
