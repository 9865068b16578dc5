//! Deterministic pseudo-random generation via a linear congruential generator.
//!
//! RULE: The seed initializes state only. It is never emitted.
//! The first generated value is X[1] = (a * seed + c) mod m.
//! Changing this shifts every day's demand by one position.
//!
//! An `LcgSequence` is a pure function of (params, count):
//!   - No state is shared between sequences.
//!   - Cloning a sequence before consuming it restarts it.

use crate::error::{SimError, SimResult};
use serde::{Deserialize, Serialize};
use std::iter::FusedIterator;

/// Largest f64 strictly below 1.0.
const MAX_UNIFORM: f64 = 1.0 - f64::EPSILON / 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LcgParams {
    pub seed: u64,
    pub multiplier: u64,
    pub increment: u64,
    pub modulus: u64,
}

impl LcgParams {
    pub fn new(seed: u64, multiplier: u64, increment: u64, modulus: u64) -> Self {
        Self {
            seed,
            multiplier,
            increment,
            modulus,
        }
    }

    /// The recurrence is undefined for a modulus below 2.
    pub fn validate(&self) -> SimResult<()> {
        if self.modulus < 2 {
            return Err(SimError::invalid_params(format!(
                "modulus must be >= 2, got {}",
                self.modulus
            )));
        }
        Ok(())
    }

    /// One step of the recurrence. Widened to u128 so no u64 input overflows.
    pub fn next_state(&self, x: u64) -> u64 {
        let next = (self.multiplier as u128 * x as u128 + self.increment as u128)
            % self.modulus as u128;
        next as u64
    }

    /// Scale a raw value into [0, 1).
    pub fn to_uniform(&self, x: u64) -> f64 {
        // x < modulus, but for moduli beyond 2^53 the division can round up to 1.0.
        (x as f64 / self.modulus as f64).min(MAX_UNIFORM)
    }
}

/// Lazy, finite LCG output. Yields exactly `count` values.
#[derive(Debug, Clone)]
pub struct LcgSequence {
    params: LcgParams,
    state: u64,
    remaining: usize,
}

impl LcgSequence {
    pub fn params(&self) -> &LcgParams {
        &self.params
    }

    /// Pair every raw value with its uniform.
    pub fn with_uniforms(self) -> impl Iterator<Item = (u64, f64)> {
        let params = self.params;
        self.map(move |x| (x, params.to_uniform(x)))
    }
}

impl Iterator for LcgSequence {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        self.state = self.params.next_state(self.state);
        Some(self.state)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for LcgSequence {}
impl FusedIterator for LcgSequence {}

/// Build a sequence of `count` values. Nothing is computed until iterated.
pub fn generate(params: LcgParams, count: usize) -> SimResult<LcgSequence> {
    params.validate()?;
    Ok(LcgSequence {
        params,
        state: params.seed,
        remaining: count,
    })
}

/// Eager form of [`generate`].
pub fn generate_values(params: LcgParams, count: usize) -> SimResult<Vec<u64>> {
    Ok(generate(params, count)?.collect())
}
