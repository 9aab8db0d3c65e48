//! Unbiased integer sampling backed by the random pool.
//!
//! Rejection sampling avoids the modulo bias a naive reduction would
//! introduce. The sampler covers ranges up to 16 bits; wider draws are
//! the caller's responsibility.

mod range;

pub use range::{sample_range, RangeError, MAX_RANGE};
