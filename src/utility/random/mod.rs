// envkit: typed environment snapshots
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Random values for fixtures and generated defaults.
//!
//! Not suitable for secrets: the default source is the thread-local PRNG.

use rand::distributions::Alphanumeric;
use rand::rngs::{StdRng, ThreadRng};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::ops::RangeInclusive;

use crate::error::ParseError;
use crate::validator::Guid;

/// Range used by [`RandomGenerator::default_int`].
pub const DEFAULT_INT_RANGE: RangeInclusive<i64> = 1..=10_000;

/// Random helper over any [`Rng`].
#[derive(Debug, Clone)]
pub struct RandomGenerator<R = ThreadRng> {
    rng: R,
}

impl RandomGenerator<ThreadRng> {
    #[must_use]
    pub fn new() -> Self {
        Self::from_rng(rand::thread_rng())
    }
}

impl Default for RandomGenerator<ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomGenerator<StdRng> {
    /// Deterministic generator.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomGenerator<R> {
    pub const fn from_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Uniformly picks one element; `None` for an empty slice.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        items.choose(&mut self.rng)
    }

    pub fn bool(&mut self) -> bool {
        self.rng.r#gen()
    }

    /// Alphanumeric string of `len` characters.
    pub fn string(&mut self, len: usize) -> String {
        (&mut self.rng)
            .sample_iter(&Alphanumeric)
            .take(len)
            .map(char::from)
            .collect()
    }

    /// Integer in `min..=max`, or `None` when `min > max`.
    pub fn int(&mut self, min: i64, max: i64) -> Option<i64> {
        (min <= max).then(|| self.rng.gen_range(min..=max))
    }

    /// Integer in [`DEFAULT_INT_RANGE`].
    pub fn default_int(&mut self) -> i64 {
        self.rng.gen_range(DEFAULT_INT_RANGE)
    }

    /// Random version 4 GUID, lowercase.
    ///
    /// # Errors
    ///
    /// [`ParseError::InvalidGuid`] if the generated text fails the GUID check.
    pub fn guid(&mut self) -> Result<Guid, ParseError> {
        let mut bytes: [u8; 16] = self.rng.r#gen();
        bytes[6] = (bytes[6] & 0x0f) | 0x40;
        bytes[8] = (bytes[8] & 0x3f) | 0x80;

        let hex: String = bytes.iter().map(|b| format!("{b:02x}")).collect();
        let text = format!(
            "{}-{}-{}-{}-{}",
            &hex[0..8],
            &hex[8..12],
            &hex[12..16],
            &hex[16..20],
            &hex[20..32]
        );
        Guid::try_from(text)
    }
}

#[cfg(test)]
mod tests;
