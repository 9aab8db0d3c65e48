//! Entropy accumulation gating.

use crate::estimation::{EntropyEstimator, TimingAnalyzer};
use crate::pool::RandomPool;

/// Outcome of feeding one timed event to an [`Accumulator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedResult {
    /// Entropy credited for this event, in 1/16-bit units.
    pub credited: u32,
    /// Whole bits still needed to reach the target.
    pub remaining_bits: u32,
    /// True once the target has been reached.
    pub done: bool,
}

/// Accumulates timed-event entropy until a target bit count is reached.
///
/// This is the cancellable, resumable core of the interactive loop: the
/// caller supplies one timed event per [`feed_event`] call and decides
/// how to solicit input and report progress. Synchronous callers can
/// wrap it with [`drive`](super::drive) instead.
///
/// The gate compares whole bits; fractional credit never rounds up.
///
/// [`feed_event`]: Accumulator::feed_event
#[derive(Debug)]
pub struct Accumulator {
    target_bits: u32,
    analyzer: TimingAnalyzer,
}

impl Accumulator {
    /// Creates an accumulator targeting `target_bits` whole bits of
    /// true entropy. Targets beyond the estimator's capacity are
    /// clamped: the pool cannot hold more.
    pub fn new(target_bits: u32, estimator: &EntropyEstimator) -> Self {
        Self::with_analyzer(target_bits, estimator, TimingAnalyzer::new())
    }

    /// Like [`new`](Accumulator::new) but reusing an analyzer whose
    /// event history should carry over from an earlier run. Stale
    /// history only makes crediting more conservative.
    pub fn with_analyzer(
        target_bits: u32,
        estimator: &EntropyEstimator,
        analyzer: TimingAnalyzer,
    ) -> Self {
        let clamped = target_bits.min(estimator.capacity_bits());
        if clamped < target_bits {
            tracing::warn!(target_bits, clamped, "target clamped to pool capacity");
        }
        Self {
            target_bits: clamped,
            analyzer,
        }
    }

    /// Returns the (possibly clamped) target in whole bits.
    pub fn target_bits(&self) -> u32 {
        self.target_bits
    }

    /// Returns true once the estimator holds at least the target.
    pub fn is_satisfied(&self, estimator: &EntropyEstimator) -> bool {
        estimator.whole_bits() >= self.target_bits
    }

    /// Returns the whole bits still needed.
    pub fn remaining_bits(&self, estimator: &EntropyEstimator) -> u32 {
        self.target_bits.saturating_sub(estimator.whole_bits())
    }

    /// Feeds one timed event through the timing analyzer.
    pub fn feed_event<P: RandomPool>(
        &mut self,
        pool: &mut P,
        estimator: &mut EntropyEstimator,
        event_id: u32,
        delta: u32,
    ) -> FeedResult {
        let credited = self.analyzer.observe(pool, estimator, event_id, delta);
        let remaining_bits = self.remaining_bits(estimator);
        FeedResult {
            credited,
            remaining_bits,
            done: remaining_bits == 0,
        }
    }
}
