//! Pseudo-random byte pool.
//!
//! This module provides the pool abstraction all randomness flows
//! through, plus a ChaCha20-backed implementation with BLAKE3 state
//! mixing. The pool is treated as an opaque byte source; the entropy
//! bookkeeping elsewhere in the crate only relies on its contract.

mod chacha;
mod source;

pub use chacha::{ChaChaPool, DEFAULT_CAPACITY_BITS};
pub use source::{MockPool, RandomPool};
