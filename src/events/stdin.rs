//! Stdin-backed event source for the demo binary.
//!
//! Reads one byte per event from the process's standard input. The
//! terminal stays in cooked mode, so events arrive a line at a time;
//! good enough for demonstration. Real integrations supply an event
//! source with raw keyboard access and genuine backlog control.

use super::EventSource;
use std::io::{self, Read};

/// Event source reading single bytes from standard input.
pub struct StdinEvents {
    stdin: io::Stdin,
}

impl StdinEvents {
    /// Creates a source over the process's standard input.
    pub fn new() -> Self {
        Self { stdin: io::stdin() }
    }
}

impl Default for StdinEvents {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSource for StdinEvents {
    fn wait_event(&mut self) -> io::Result<u32> {
        let mut byte = [0u8; 1];
        loop {
            match self.stdin.read(&mut byte) {
                Ok(0) => {
                    return Err(io::Error::new(
                        io::ErrorKind::UnexpectedEof,
                        "standard input closed",
                    ))
                }
                Ok(_) => return Ok(u32::from(byte[0])),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }

    fn flush_backlog(&mut self, _aggressive: bool) -> io::Result<()> {
        // Cooked stdin offers no non-blocking drain; queued bytes are
        // consumed as ordinary (zero-credit) events instead.
        Ok(())
    }

    fn set_raw(&mut self, enabled: bool) -> io::Result<()> {
        tracing::debug!(enabled, "raw mode not available on cooked stdin");
        Ok(())
    }
}
