//! Timed external event input.
//!
//! This module provides the collaborator contracts the accumulation
//! loop is driven by: a blocking source of discrete events and a timer
//! measuring the interval between them. Both come with scripted
//! implementations for testing.

mod source;
mod stdin;
mod timer;

pub use source::{EventSource, MockEventSource};
pub use stdin::StdinEvents;
pub use timer::{DeltaTimer, InstantTimer, MockTimer};
