// envkit: typed environment snapshots
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! The `random` command.

use anyhow::anyhow;
use rand::Rng;

use crate::cli::random::{RandomArgs, RandomKind};
use crate::error::Result;
use crate::utility::random::RandomGenerator;

/// Generates the values requested by `args`.
///
/// # Errors
///
/// Returns an error if `--min` is greater than `--max`.
pub fn generate<R: Rng>(args: &RandomArgs, random: &mut RandomGenerator<R>) -> Result<Vec<String>> {
    (0..args.count)
        .map(|_| -> Result<String> {
            Ok(match args.kind {
                RandomKind::Guid => random.guid()?.to_string(),
                RandomKind::String => random.string(args.length),
                RandomKind::Int => random
                    .int(args.min, args.max)
                    .ok_or_else(|| {
                        anyhow!("--min ({}) is greater than --max ({})", args.min, args.max)
                    })?
                    .to_string(),
                RandomKind::Bool => random.bool().to_string(),
            })
        })
        .collect()
}

/// Run the random command.
///
/// # Errors
///
/// Returns an error if the arguments describe an empty range.
pub fn run_random_command(args: &RandomArgs) -> Result<()> {
    for value in generate(args, &mut RandomGenerator::new())? {
        println!("{value}");
    }
    Ok(())
}
