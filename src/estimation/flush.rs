//! Pool scrubbing around sensitive operations.

use super::EntropyEstimator;
use crate::pool::RandomPool;

/// Stir passes performed by [`flush`]. One is sufficient; the rest are
/// deliberate redundancy for the most carefully guarded secrets.
const STIR_PASSES: usize = 3;

/// Runs the pool forward and zeroes the entropy estimate so random
/// numbers handed out earlier can no longer be reconstructed from
/// residual state.
///
/// This does not wipe the pool to a fixed value (its entropy stays
/// useful for future output); it only severs the link to prior states.
/// Called before and after operations on long-lived secret material.
pub fn flush<P: RandomPool>(pool: &mut P, estimator: &mut EntropyEstimator) {
    for _ in 0..STIR_PASSES {
        pool.stir();
    }
    estimator.reset();
    tracing::debug!("pool flushed, entropy estimate cleared");
}
