//! Supplementary, uncounted seed sources.
//!
//! Contributions here strengthen the pool without ever moving the
//! entropy estimate; only timed physical events earn credit.

#[cfg(unix)]
mod command;

#[cfg(unix)]
pub use command::{mix_from_command, DigestAlgorithm, MixError};
