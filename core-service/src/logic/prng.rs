//! Deterministic jitter source.
//!
//! RULE: nothing in the model may call a platform RNG or read the clock.
//! All randomness flows through a [`JitterRng`] seeded purely from the
//! scenario, so identical inputs always produce identical metrics.
//!
//! **Not for security.** This is a 31-bit linear congruential generator with
//! public constants. Its output is trivially predictable; never use it for
//! keys, tokens, ids or anything an attacker could benefit from guessing.

use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::constants::{LCG_INCREMENT, LCG_MODULUS, LCG_MULTIPLIER};
use crate::logic::scenario::{ScenarioInput, Severity};

/// Duration multiplier in the seed
const DURATION_WEIGHT: u64 = 37;

/// Region-name length multiplier in the seed
const REGION_LEN_WEIGHT: u64 = 13;

/// AZ-count multiplier in the seed
const AZ_WEIGHT: u64 = 7;

/// Linear congruential generator parameters.
///
/// Only constructible with a non-zero modulus, including through serde.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawLcgParams")]
pub struct LcgParams {
    multiplier: u64,
    increment: u64,
    modulus: u64,
}

#[derive(Deserialize)]
struct RawLcgParams {
    multiplier: u64,
    increment: u64,
    modulus: u64,
}

impl TryFrom<RawLcgParams> for LcgParams {
    type Error = &'static str;

    fn try_from(raw: RawLcgParams) -> Result<Self, Self::Error> {
        LcgParams::new(raw.multiplier, raw.increment, raw.modulus).ok_or("LCG modulus must be non-zero")
    }
}

impl LcgParams {
    /// `None` when `modulus` is zero
    pub fn new(multiplier: u64, increment: u64, modulus: u64) -> Option<Self> {
        (modulus != 0).then_some(Self {
            multiplier,
            increment,
            modulus,
        })
    }

    pub fn multiplier(&self) -> u64 {
        self.multiplier
    }

    pub fn increment(&self) -> u64 {
        self.increment
    }

    pub fn modulus(&self) -> u64 {
        self.modulus
    }
}

impl Default for LcgParams {
    fn default() -> Self {
        Self {
            multiplier: LCG_MULTIPLIER,
            increment: LCG_INCREMENT,
            modulus: LCG_MODULUS,
        }
    }
}

/// Fixed per-severity weight mixed into the seed
pub fn severity_seed_weight(severity: Severity) -> u64 {
    match severity {
        Severity::Minor => 11,
        Severity::Major => 17,
        Severity::Critical => 29,
    }
}

/// Derive the seed from scenario fields only
pub fn scenario_seed(input: &ScenarioInput) -> u64 {
    u64::from(input.duration_min()) * DURATION_WEIGHT
        + severity_seed_weight(input.severity())
        + input.region().len() as u64 * REGION_LEN_WEIGHT
        + u64::from(input.az_count().get()) * AZ_WEIGHT
}

/// Seeded LCG: `state = (a * state + c) mod m`, draws are `state / m`.
#[derive(Debug, Clone)]
pub struct JitterRng {
    state: u64,
    params: LcgParams,
}

impl JitterRng {
    pub fn new(seed: u64) -> Self {
        Self::with_params(seed, LcgParams::default())
    }

    pub fn with_params(seed: u64, params: LcgParams) -> Self {
        Self {
            state: seed % params.modulus,
            params,
        }
    }

    /// Generator for one model run
    pub fn for_scenario(input: &ScenarioInput, params: LcgParams) -> Self {
        Self::with_params(scenario_seed(input), params)
    }

    fn step(&mut self) -> u64 {
        // u128 keeps a*state + c exact for any u64 params
        let next = (u128::from(self.params.multiplier) * u128::from(self.state)
            + u128::from(self.params.increment))
            % u128::from(self.params.modulus);
        self.state = next as u64;
        self.state
    }

    /// Next draw in `[0, 1)`
    pub fn next_f64(&mut self) -> f64 {
        self.step() as f64 / self.params.modulus as f64
    }
}

impl RngCore for JitterRng {
    /// One state carries 31 bits; the top bit of a second state fills bit 0
    fn next_u32(&mut self) -> u32 {
        let hi = self.step();
        let lo = self.step();
        ((hi << 1) ^ (lo >> 30)) as u32
    }

    fn next_u64(&mut self) -> u64 {
        (u64::from(self.next_u32()) << 32) | u64::from(self.next_u32())
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.next_u32().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}
