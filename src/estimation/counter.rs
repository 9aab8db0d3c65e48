//! Fixed-point bookkeeping of estimated true entropy.

use super::bitmath::{FRAC_BITS, SCALE};

/// Running estimate of the true (Shannon) entropy resident in the pool.
///
/// The count is kept scaled by [`FRAC_BITS`] so fractional credits from
/// the timing analyzer are not lost to rounding. It never exceeds the
/// declared pool capacity and never goes negative: credits saturate
/// high, consumption saturates at zero. Whatever this counter says, the
/// cryptographic strength of the pool output is unaffected; the
/// estimate only gates when long-lived secrets may be derived.
#[derive(Debug, Clone)]
pub struct EntropyEstimator {
    /// Estimated entropy in 1/16-bit units.
    scaled: u32,
    /// Declared pool capacity in whole bits.
    capacity_bits: u32,
}

impl EntropyEstimator {
    /// Creates an estimator for a pool of `capacity_bits` declared
    /// capacity, starting at zero.
    pub fn new(capacity_bits: u32) -> Self {
        Self {
            scaled: 0,
            capacity_bits,
        }
    }

    /// Returns the estimate in 1/16-bit units.
    pub fn scaled(&self) -> u32 {
        self.scaled
    }

    /// Returns the estimate in whole bits, truncating the fraction.
    ///
    /// Gating and user-facing display both use this: a fraction of a
    /// bit is never rounded up into a claim of entropy we do not have.
    pub fn whole_bits(&self) -> u32 {
        self.scaled >> FRAC_BITS
    }

    /// Returns the capacity this estimator saturates at, in whole bits.
    pub fn capacity_bits(&self) -> u32 {
        self.capacity_bits
    }

    /// Adds `scaled` 1/16-bit units, saturating at pool capacity.
    pub fn credit(&mut self, scaled: u32) {
        let cap = self.capacity_bits.saturating_mul(SCALE);
        self.scaled = self.scaled.saturating_add(scaled).min(cap);
    }

    /// Subtracts `bits` whole bits explicitly consumed for key
    /// material, saturating at zero.
    pub fn consume_bits(&mut self, bits: u32) {
        self.scaled = self.scaled.saturating_sub(bits.saturating_mul(SCALE));
        tracing::debug!(bits, remaining = self.whole_bits(), "entropy consumed");
    }

    /// Resets the estimate to zero.
    pub fn reset(&mut self) {
        self.scaled = 0;
    }
}
