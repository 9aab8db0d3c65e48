//! Keystroke Entropy Library
//!
//! Entropy accumulation and estimation for a cryptographic
//! random-number subsystem. Turns a pseudo-random byte pool plus
//! externally timed physical events (keystrokes) into unbiased random
//! integers and a conservative, auditable count of true-entropy bits,
//! gating when enough real randomness exists to derive long-lived
//! secret key material.
//!
//! # Architecture
//!
//! ```text
//! events (timing) → estimation (credit) → accumulation (gate)
//!                         ↓
//!            pool (mixing) → sampling (output)
//! ```
//!
//! # Design Principles
//!
//! - **Never optimistic**: degenerate timing, repeated events and
//!   stale history all resolve to zero credit, never extra credit
//! - **Credit is bookkeeping only**: the pool's cryptographic strength
//!   does not depend on the estimate being right
//! - **Exact sampling**: range draws use rejection, not modulo, so no
//!   value is over-represented
//! - **Integer arithmetic throughout**: the fixed-point logarithm gives
//!   identical estimates on every host
//!
//! # Example
//!
//! ```
//! use keystroke_entropy::{
//!     estimation::{EntropyEstimator, TimingAnalyzer},
//!     pool::{ChaChaPool, RandomPool},
//!     sampling::sample_range,
//! };
//!
//! let mut pool = ChaChaPool::from_os_entropy();
//! let mut estimator = EntropyEstimator::new(pool.capacity_bits());
//! let mut analyzer = TimingAnalyzer::new();
//!
//! // Feed a few timed events (identifier, microsecond delta).
//! for (id, delta) in [(10, 15_000), (24, 9_400), (7, 21_750)] {
//!     analyzer.observe(&mut pool, &mut estimator, id, delta);
//! }
//! assert!(estimator.whole_bits() > 0);
//!
//! // Ordinary randomness: an unbiased die roll.
//! let roll = sample_range(&mut pool, 6).unwrap() + 1;
//! assert!((1..=6).contains(&roll));
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod accumulation;
pub mod config;
pub mod estimation;
pub mod events;
pub mod mixing;
pub mod pool;
pub mod sampling;

// Re-export commonly used types at crate root
pub use accumulation::{drive, AccumError, Accumulator, FeedResult, Progress};
pub use estimation::{flush, log2_fixed, EntropyEstimator, TimingAnalyzer, FRAC_BITS};
pub use events::{DeltaTimer, EventSource, InstantTimer, MockEventSource, MockTimer, StdinEvents};
pub use pool::{ChaChaPool, MockPool, RandomPool};
pub use sampling::{sample_range, RangeError};

#[cfg(unix)]
pub use mixing::{mix_from_command, DigestAlgorithm, MixError};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
