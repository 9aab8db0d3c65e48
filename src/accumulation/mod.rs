//! Interactive entropy accumulation.
//!
//! This module gates long-lived key derivation on the entropy estimate:
//! the [`Accumulator`] step function consumes one timed event per call
//! until the estimator clears a target, and [`drive`] wraps it in a
//! blocking loop for synchronous, keyboard-driven callers.

mod controller;
mod driver;

pub use controller::{Accumulator, FeedResult};
pub use driver::{drive, AccumError, Progress};
