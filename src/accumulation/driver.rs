//! Blocking interactive accumulation loop.
//!
//! Wraps the step-function [`Accumulator`] in the classic synchronous
//! shape: prompt, wait for a keystroke, credit, repeat. The loop has no
//! timeout; absent input blocks indefinitely by design, because true
//! randomness cannot be rushed. An abort flag checked between events is
//! the only early exit.

use super::{Accumulator, FeedResult};
use crate::estimation::EntropyEstimator;
use crate::events::{DeltaTimer, EventSource};
use crate::pool::RandomPool;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;

/// Errors terminating the blocking accumulation loop early.
#[derive(Debug, Error)]
pub enum AccumError {
    /// The event source failed while waiting or draining.
    #[error("event source failed: {0}")]
    Source(#[from] io::Error),
    /// The abort flag was set before the target was reached.
    #[error("accumulation aborted before the target was reached")]
    Aborted,
}

/// Progress notifications emitted by [`drive`].
///
/// Formatting is left to the caller; the loop itself produces no
/// output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// Interaction is starting; `needed_bits` more are required.
    Started {
        /// Whole bits still missing from the target.
        needed_bits: u32,
    },
    /// About to block waiting for the next event.
    Awaiting {
        /// Whole bits still missing from the target.
        remaining_bits: u32,
    },
    /// An event arrived; `credited` is false when it earned nothing.
    Event {
        /// Whether the event contributed any entropy credit.
        credited: bool,
        /// Whole bits still missing from the target.
        remaining_bits: u32,
    },
    /// The target has been reached.
    Completed,
}

/// Drives `accumulator` to completion against a blocking event source.
///
/// Establishes a timing baseline, then alternates backlog drain,
/// blocking wait and timing analysis until the estimator clears the
/// target. Queued input is drained before every wait because backlog
/// carries no trustworthy timing; a final aggressive drain absorbs
/// trailing keystrokes so they do not corrupt the caller's input.
///
/// Returns immediately, without touching the source, when the gate is
/// already satisfied. `abort` is checked before each wait; setting it
/// makes the loop return [`AccumError::Aborted`] after restoring
/// cooked mode.
pub fn drive<P, S, T>(
    accumulator: &mut Accumulator,
    pool: &mut P,
    estimator: &mut EntropyEstimator,
    source: &mut S,
    timer: &mut T,
    abort: &AtomicBool,
    mut report: impl FnMut(Progress),
) -> Result<(), AccumError>
where
    P: RandomPool,
    S: EventSource,
    T: DeltaTimer,
{
    // Baseline so the first event measures a real interval.
    timer.sample_delta();

    if accumulator.is_satisfied(estimator) {
        return Ok(());
    }

    source.set_raw(true)?;
    report(Progress::Started {
        needed_bits: accumulator.remaining_bits(estimator),
    });

    let result = run_loop(accumulator, pool, estimator, source, timer, abort, &mut report);

    // Best-effort cleanup on every exit path.
    if result.is_ok() {
        source.flush_backlog(true)?;
        source.set_raw(false)?;
    } else {
        let _ = source.flush_backlog(true);
        let _ = source.set_raw(false);
    }

    result
}

fn run_loop<P, S, T>(
    accumulator: &mut Accumulator,
    pool: &mut P,
    estimator: &mut EntropyEstimator,
    source: &mut S,
    timer: &mut T,
    abort: &AtomicBool,
    report: &mut impl FnMut(Progress),
) -> Result<(), AccumError>
where
    P: RandomPool,
    S: EventSource,
    T: DeltaTimer,
{
    loop {
        report(Progress::Awaiting {
            remaining_bits: accumulator.remaining_bits(estimator),
        });

        if abort.load(Ordering::Relaxed) {
            tracing::warn!("accumulation aborted by caller");
            return Err(AccumError::Aborted);
        }

        source.flush_backlog(false)?;
        let event_id = source.wait_event()?;
        let delta = timer.sample_delta();

        let FeedResult {
            credited,
            remaining_bits,
            done,
        } = accumulator.feed_event(pool, estimator, event_id, delta);

        report(Progress::Event {
            credited: credited > 0,
            remaining_bits,
        });

        if done {
            tracing::info!(
                target_bits = accumulator.target_bits(),
                "entropy target reached"
            );
            report(Progress::Completed);
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{MockEventSource, MockTimer};
    use crate::pool::MockPool;
    use crate::estimation::SCALE;

    fn no_abort() -> AtomicBool {
        AtomicBool::new(false)
    }

    #[test]
    fn test_satisfied_gate_requests_no_events() {
        let mut pool = MockPool::new(Vec::new());
        let mut est = EntropyEstimator::new(1024);
        est.credit(16 * SCALE);

        let mut acc = Accumulator::new(8, &est);
        let mut source = MockEventSource::new([]);
        let mut timer = MockTimer::new([0]);
        let abort = no_abort();

        drive(
            &mut acc, &mut pool, &mut est, &mut source, &mut timer, &abort, |_| {},
        )
        .unwrap();

        assert_eq!(source.events_consumed(), 0);
        assert!(!source.is_raw());
    }

    #[test]
    fn test_end_to_end_accumulation() {
        // Pool capacity 1024 bits, target 8: realistic scripted
        // keystrokes with irregular deltas must terminate the loop.
        let mut pool = MockPool::with_capacity(Vec::new(), 1024);
        let mut est = EntropyEstimator::new(1024);
        let mut acc = Accumulator::new(8, &est);

        let ids = (1..=20u32).collect::<Vec<_>>();
        let mut deltas = vec![0u32]; // baseline sample
        deltas.extend([1000, 2000, 500, 4000].iter().cycle().take(20));

        let mut source = MockEventSource::new(ids);
        let mut timer = MockTimer::new(deltas);
        let abort = no_abort();

        let mut completed = false;
        drive(
            &mut acc,
            &mut pool,
            &mut est,
            &mut source,
            &mut timer,
            &abort,
            |p| {
                if p == Progress::Completed {
                    completed = true;
                }
            },
        )
        .unwrap();

        assert!(completed);
        assert!(est.whole_bits() >= 8);
        assert!(source.events_consumed() <= 20);
        // Trailing input absorbed, cooked mode restored.
        assert_eq!(source.aggressive_flushes(), 1);
        assert!(!source.is_raw());
    }

    #[test]
    fn test_rejected_events_are_reported() {
        let mut pool = MockPool::new(Vec::new());
        let mut est = EntropyEstimator::new(1024);
        let mut acc = Accumulator::new(16, &est);

        // Same id three times: the third is suppressed as key repeat;
        // a fresh id then finishes the run.
        let mut source = MockEventSource::new([7, 7, 7, 8, 9]);
        let mut timer = MockTimer::new([0, 900, 2100, 800, 3700, 1500]);
        let abort = no_abort();

        let mut rejected = 0;
        let mut credited = 0;
        drive(
            &mut acc,
            &mut pool,
            &mut est,
            &mut source,
            &mut timer,
            &abort,
            |p| {
                if let Progress::Event { credited: c, .. } = p {
                    if c {
                        credited += 1;
                    } else {
                        rejected += 1;
                    }
                }
            },
        )
        .unwrap();

        assert!(rejected >= 1);
        assert!(credited >= 1);
    }

    #[test]
    fn test_abort_flag_stops_loop() {
        let mut pool = MockPool::new(Vec::new());
        let mut est = EntropyEstimator::new(1024);
        let mut acc = Accumulator::new(64, &est);

        let mut source = MockEventSource::new([1, 2, 3]);
        let mut timer = MockTimer::new([0]);
        let abort = AtomicBool::new(true);

        let result = drive(
            &mut acc, &mut pool, &mut est, &mut source, &mut timer, &abort, |_| {},
        );

        assert!(matches!(result, Err(AccumError::Aborted)));
        assert_eq!(source.events_consumed(), 0);
        // Cooked mode restored even on the abort path.
        assert!(!source.is_raw());
    }

    #[test]
    fn test_source_failure_propagates() {
        let mut pool = MockPool::new(Vec::new());
        let mut est = EntropyEstimator::new(1024);
        let mut acc = Accumulator::new(64, &est);

        // Only one scripted event for a target that needs many.
        let mut source = MockEventSource::new([1]);
        let mut timer = MockTimer::new([0, 1000]);
        let abort = no_abort();

        let result = drive(
            &mut acc, &mut pool, &mut est, &mut source, &mut timer, &abort, |_| {},
        );

        assert!(matches!(result, Err(AccumError::Source(_))));
    }
}
