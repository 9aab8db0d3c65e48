//! Entropy estimation and bookkeeping.
//!
//! This module keeps a conservative, fixed-point count of the true
//! (Shannon) entropy believed to reside in the pool: the timing
//! analyzer credits it from inter-event deltas, consumption and
//! flushing debit it. The estimate gates long-lived key derivation;
//! it is never allowed to be optimistic.

mod bitmath;
mod counter;
mod flush;
mod timing;

pub use bitmath::{log2_fixed, FRAC_BITS, SCALE};
pub use counter::EntropyEstimator;
pub use flush::flush;
pub use timing::{TimingAnalyzer, DERATING};
