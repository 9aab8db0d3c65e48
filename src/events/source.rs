//! Discrete event input abstraction.
//!
//! This module provides a trait-based abstraction over interactive
//! event input (typically a keyboard), allowing both real terminal
//! input and scripted implementations for testing.

use std::collections::VecDeque;
use std::io;

/// Blocking source of discrete external events.
///
/// The trait mirrors what an interactive terminal offers: a blocking
/// wait for the next event, a way to discard queued backlog, and
/// raw/cooked delivery toggles. Backlog must be discardable because
/// queued input carries no trustworthy timing.
pub trait EventSource {
    /// Blocks until the next discrete event and returns its identifier.
    fn wait_event(&mut self) -> io::Result<u32>;

    /// Discards any queued input. `aggressive` requests a more thorough
    /// drain, used once after accumulation so trailing keystrokes do
    /// not leak into the caller's input stream.
    fn flush_backlog(&mut self, aggressive: bool) -> io::Result<()>;

    /// Switches the source between raw (per-event) and cooked delivery.
    fn set_raw(&mut self, enabled: bool) -> io::Result<()>;
}

/// Scripted event source for testing.
#[derive(Debug, Default)]
pub struct MockEventSource {
    events: VecDeque<u32>,
    waits: u32,
    flushes: u32,
    aggressive_flushes: u32,
    raw: bool,
}

impl MockEventSource {
    /// Creates a source replaying `events` in order.
    pub fn new(events: impl IntoIterator<Item = u32>) -> Self {
        Self {
            events: events.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Returns the number of events handed out.
    pub fn events_consumed(&self) -> u32 {
        self.waits
    }

    /// Returns the number of ordinary backlog flushes observed.
    pub fn flushes(&self) -> u32 {
        self.flushes
    }

    /// Returns the number of aggressive backlog flushes observed.
    pub fn aggressive_flushes(&self) -> u32 {
        self.aggressive_flushes
    }

    /// Returns true while raw delivery is enabled.
    pub fn is_raw(&self) -> bool {
        self.raw
    }
}

impl EventSource for MockEventSource {
    fn wait_event(&mut self) -> io::Result<u32> {
        self.waits += 1;
        self.events.pop_front().ok_or_else(|| {
            io::Error::new(io::ErrorKind::UnexpectedEof, "scripted events exhausted")
        })
    }

    fn flush_backlog(&mut self, aggressive: bool) -> io::Result<()> {
        if aggressive {
            self.aggressive_flushes += 1;
        } else {
            self.flushes += 1;
        }
        Ok(())
    }

    fn set_raw(&mut self, enabled: bool) -> io::Result<()> {
        self.raw = enabled;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_source_replays_events() {
        let mut source = MockEventSource::new([5, 6]);
        assert_eq!(source.wait_event().unwrap(), 5);
        assert_eq!(source.wait_event().unwrap(), 6);
        assert!(source.wait_event().is_err());
        assert_eq!(source.events_consumed(), 3);
    }

    #[test]
    fn test_mock_source_tracks_modes_and_flushes() {
        let mut source = MockEventSource::new([]);
        source.set_raw(true).unwrap();
        assert!(source.is_raw());
        source.flush_backlog(false).unwrap();
        source.flush_backlog(true).unwrap();
        source.set_raw(false).unwrap();
        assert!(!source.is_raw());
        assert_eq!(source.flushes(), 1);
        assert_eq!(source.aggressive_flushes(), 1);
    }
}
