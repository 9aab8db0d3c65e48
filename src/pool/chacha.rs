//! ChaCha-backed random pool.
//!
//! Wraps the standard ChaCha20 CSPRNG with BLAKE3 state mixing so that
//! externally sourced bytes can be folded into the pool and so the pool
//! can be run forward irreversibly.
//!
//! # Mixing Model
//!
//! Both `add_bytes` and `stir` derive a new seed by hashing:
//! - Retained seed material (NOT the ChaCha internal state)
//! - The new input (for `stir`, fresh generator output)
//! - A domain separator and a mix counter
//!
//! This follows NIST SP 800-90A style DRBG reseeding logic: non-linear
//! mixing via a cryptographic hash ensures that biased or partially
//! predictable inputs cannot degrade security, and rekeying from the
//! generator's own output makes prior states irretrievable.

use super::RandomPool;
use blake3::Hasher;
use rand_chacha::ChaCha20Rng;
use rand_core::{RngCore, SeedableRng};

/// Domain separator for mixing externally sourced bytes.
const ADD_DOMAIN: &[u8] = b"keystroke-entropy-add-v1";

/// Domain separator for stirring the pool forward.
const STIR_DOMAIN: &[u8] = b"keystroke-entropy-stir-v1";

/// Default declared entropy capacity in bits.
///
/// The 256-bit ChaCha key is the honest upper bound on what this
/// backend can hold, however much is mixed in.
pub const DEFAULT_CAPACITY_BITS: u32 = 256;

/// A pseudo-random byte pool backed by ChaCha20.
///
/// The pool is initialized from OS entropy; timed-event entropy and
/// command digests *supplement* that initial seed, they never replace
/// it. Compromising only the external inputs cannot predict outputs.
pub struct ChaChaPool {
    /// The underlying ChaCha20 CSPRNG.
    inner: ChaCha20Rng,
    /// Retained seed material for mixing. NOT the ChaCha internal state.
    seed_material: [u8; 32],
    /// Mix operations performed (domain-separates successive rekeys).
    mix_count: u64,
    /// Declared entropy capacity in bits.
    capacity_bits: u32,
}

impl ChaChaPool {
    /// Creates a pool seeded from the OS entropy source with the
    /// default declared capacity.
    pub fn from_os_entropy() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY_BITS)
    }

    /// Creates an OS-seeded pool with an explicit declared capacity.
    ///
    /// The capacity is a trust bound used by the entropy bookkeeping,
    /// not a buffer size; declaring more than [`DEFAULT_CAPACITY_BITS`]
    /// overstates what this backend can actually hold.
    pub fn with_capacity(capacity_bits: u32) -> Self {
        let mut seed_material = [0u8; 32];
        rand_core::OsRng.fill_bytes(&mut seed_material);

        Self {
            inner: ChaCha20Rng::from_seed(seed_material),
            seed_material,
            mix_count: 0,
            capacity_bits,
        }
    }

    /// Creates a pool from a known seed (for testing only).
    #[cfg(test)]
    pub(crate) fn from_seed_for_testing(seed: [u8; 32], capacity_bits: u32) -> Self {
        Self {
            inner: ChaCha20Rng::from_seed(seed),
            seed_material: seed,
            mix_count: 0,
            capacity_bits,
        }
    }

    /// Derives a new seed from the retained material and `input`, and
    /// rekeys the generator from it.
    fn rekey(&mut self, domain: &[u8], input: &[u8]) {
        let mut hasher = Hasher::new();
        hasher.update(domain);
        hasher.update(&self.mix_count.to_le_bytes());
        hasher.update(&self.seed_material);
        hasher.update(input);

        let new_seed: [u8; 32] = *hasher.finalize().as_bytes();
        self.seed_material = new_seed;
        self.inner = ChaCha20Rng::from_seed(new_seed);
        self.mix_count += 1;
    }

    /// Returns the number of mix operations performed.
    pub fn mix_count(&self) -> u64 {
        self.mix_count
    }
}

impl RandomPool for ChaChaPool {
    fn get_bytes(&mut self, buf: &mut [u8]) {
        self.inner.fill_bytes(buf);
    }

    fn add_bytes(&mut self, bytes: &[u8]) {
        self.rekey(ADD_DOMAIN, bytes);
        tracing::trace!(len = bytes.len(), "mixed bytes into pool");
    }

    fn stir(&mut self) {
        // Rekey from the generator's own output: running forward is
        // what severs the link to prior states.
        let mut burn = [0u8; 32];
        self.inner.fill_bytes(&mut burn);
        self.rekey(STIR_DOMAIN, &burn);
        burn.fill(0);
        tracing::debug!(mix_count = self.mix_count, "pool stirred");
    }

    fn capacity_bits(&self) -> u32 {
        self.capacity_bits
    }
}

impl std::fmt::Debug for ChaChaPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChaChaPool")
            .field("mix_count", &self.mix_count)
            .field("capacity_bits", &self.capacity_bits)
            .finish_non_exhaustive()
    }
}
