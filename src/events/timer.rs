//! Inter-event timing measurement.

use std::collections::VecDeque;
use std::time::Instant;

/// Measures the interval between consecutive samples.
///
/// Implementations return the delta since the previous call in their
/// own fixed unit. Only differences between events carry information,
/// so the unit itself does not matter as long as it is fine-grained
/// relative to human input.
pub trait DeltaTimer {
    /// Returns the time since the previous call, in timer units.
    fn sample_delta(&mut self) -> u32;
}

/// Host timer with microsecond resolution.
pub struct InstantTimer {
    last: Instant,
}

impl InstantTimer {
    /// Creates a timer; the first sample measures from this moment.
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
        }
    }
}

impl Default for InstantTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl DeltaTimer for InstantTimer {
    fn sample_delta(&mut self) -> u32 {
        let now = Instant::now();
        let micros = now.duration_since(self.last).as_micros();
        self.last = now;
        // Intervals beyond ~71 minutes saturate; by then the exact
        // value carries no extra usable information anyway.
        u32::try_from(micros).unwrap_or(u32::MAX)
    }
}

/// Scripted timer for testing that replays fixed deltas, then zeros.
#[derive(Debug, Default)]
pub struct MockTimer {
    deltas: VecDeque<u32>,
}

impl MockTimer {
    /// Creates a timer replaying `deltas` in order.
    pub fn new(deltas: impl IntoIterator<Item = u32>) -> Self {
        Self {
            deltas: deltas.into_iter().collect(),
        }
    }
}

impl DeltaTimer for MockTimer {
    fn sample_delta(&mut self) -> u32 {
        self.deltas.pop_front().unwrap_or(0)
    }
}
