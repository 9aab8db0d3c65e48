//! Keystroke timing analysis and entropy crediting.
//!
//! Truly random bits are difficult to get and must be carefully
//! hoarded. Every timed event is mixed into the pool, but an event only
//! *credits* the estimator after two suspicion filters:
//!
//! - Three identical event identifiers in a row are treated as
//!   something periodic like key repeat and credit nothing.
//! - The estimate is derived not from the timing interval itself but
//!   from the minimum of it and the second-order delta (the absolute
//!   difference from the previous interval). Evenly spaced events have
//!   a small second-order delta even when the interval itself is large
//!   and predictable, so the minimum never over-credits.
//!
//! All degenerate input resolves to zero credit, never an error: the
//! safe failure mode for an entropy estimate is under-estimation.

use super::bitmath::log2_fixed;
use super::EntropyEstimator;
use crate::pool::RandomPool;

/// Fixed derating penalty: 2.5 bits in 1/16-bit units.
///
/// Compensates for model uncertainty in the log2 estimate. Calibrated
/// against the four fraction bits produced by
/// [`log2_fixed`](super::log2_fixed).
pub const DERATING: u32 = 0x28;

/// Estimates the entropy contributed by timed discrete events.
///
/// Keeps the last two event identifiers and the previous inter-event
/// delta. Stale history from an earlier session only lowers credits,
/// never inflates them, so the analyzer need not be reset between
/// accumulation runs.
#[derive(Debug, Default)]
pub struct TimingAnalyzer {
    /// Most recent event identifier.
    event1: u32,
    /// Second most recent event identifier.
    event2: u32,
    /// Previous first-order timing delta.
    prev_delta: u32,
}

impl TimingAnalyzer {
    /// Creates an analyzer with zeroed history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one timed event, mixing its identity into the pool and
    /// crediting the estimator with a conservative entropy estimate.
    ///
    /// Returns the credited amount in 1/16-bit units; zero means the
    /// event was rejected as predictable. The event bytes reach the
    /// pool even when no credit is given.
    pub fn observe<P: RandomPool>(
        &mut self,
        pool: &mut P,
        estimator: &mut EntropyEstimator,
        event_id: u32,
        delta: u32,
    ) -> u32 {
        pool.add_bytes(&event_id.to_le_bytes());

        // Double events are fine; three in a row looks like key repeat.
        // Remember the delta either way.
        if event_id == self.event1 && event_id == self.event2 {
            self.prev_delta = delta;
            tracing::trace!(event_id, "triple event, no credit");
            return 0;
        }

        self.event2 = self.event1;
        self.event1 = event_id;

        let second_order = delta.abs_diff(self.prev_delta);
        self.prev_delta = delta;
        let effective = delta.min(second_order);

        // Zero interval carries no timing information (and would feed a
        // logarithm of zero).
        if effective == 0 {
            return 0;
        }

        let raw = log2_fixed(effective);
        if raw <= DERATING {
            tracing::trace!(event_id, delta, "estimate below derating, no credit");
            return 0;
        }

        let credited = raw - DERATING;
        estimator.credit(credited);
        tracing::trace!(
            event_id,
            delta,
            effective,
            credited,
            total_bits = estimator.whole_bits(),
            "event credited"
        );
        credited
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::MockPool;

    fn setup() -> (MockPool, EntropyEstimator, TimingAnalyzer) {
        (
            MockPool::new(Vec::new()),
            EntropyEstimator::new(1024),
            TimingAnalyzer::new(),
        )
    }

    #[test]
    fn test_triple_event_credits_nothing() {
        let (mut pool, mut est, mut analyzer) = setup();

        analyzer.observe(&mut pool, &mut est, 42, 1000);
        analyzer.observe(&mut pool, &mut est, 42, 3000);
        let credited = analyzer.observe(&mut pool, &mut est, 42, 7000);

        assert_eq!(credited, 0);
    }

    #[test]
    fn test_rejected_event_still_reaches_pool() {
        let (mut pool, mut est, mut analyzer) = setup();

        analyzer.observe(&mut pool, &mut est, 9, 1000);
        analyzer.observe(&mut pool, &mut est, 9, 2000);
        analyzer.observe(&mut pool, &mut est, 9, 3000);

        // Three events, four bytes of identifier each.
        assert_eq!(pool.absorbed().len(), 12);
    }

    #[test]
    fn test_zero_delta_credits_nothing() {
        let (mut pool, mut est, mut analyzer) = setup();
        assert_eq!(analyzer.observe(&mut pool, &mut est, 1, 0), 0);
        assert_eq!(est.scaled(), 0);
    }

    #[test]
    fn test_identical_deltas_credit_nothing() {
        let (mut pool, mut est, mut analyzer) = setup();

        analyzer.observe(&mut pool, &mut est, 1, 5000);
        // Same interval again: second-order delta is zero.
        let credited = analyzer.observe(&mut pool, &mut est, 2, 5000);

        assert_eq!(credited, 0);
    }

    #[test]
    fn test_credits_match_derated_log2() {
        let (mut pool, mut est, mut analyzer) = setup();

        // First event: previous delta is zero, so the second-order
        // delta equals the interval and the full log2 applies.
        let credited = analyzer.observe(&mut pool, &mut est, 1, 1000);
        assert_eq!(credited, log2_fixed(1000) - DERATING);
    }

    #[test]
    fn test_estimator_totals_sum_of_credits() {
        let (mut pool, mut est, mut analyzer) = setup();

        let deltas = [1000u32, 2000, 500, 4000];
        let mut sum = 0u32;
        for (i, &delta) in deltas.iter().enumerate() {
            let credited = analyzer.observe(&mut pool, &mut est, i as u32 + 1, delta);
            sum += credited;
        }

        assert!(sum > 0);
        assert_eq!(est.scaled(), sum);
    }

    #[test]
    fn test_credit_saturates_at_capacity() {
        let mut pool = MockPool::new(Vec::new());
        let mut est = EntropyEstimator::new(4);
        let mut analyzer = TimingAnalyzer::new();

        for i in 0..50u32 {
            analyzer.observe(&mut pool, &mut est, i + 1, 1000 + 977 * i);
        }

        assert_eq!(est.whole_bits(), 4);
    }

    #[test]
    fn test_small_interval_below_derating() {
        let (mut pool, mut est, mut analyzer) = setup();

        // log2(5) = 2.32 bits < 2.5-bit derating.
        assert_eq!(analyzer.observe(&mut pool, &mut est, 1, 5), 0);
        assert_eq!(est.scaled(), 0);
    }
}
