//! Sink endpoint.
//!
//! Accepts messages from an input port and compares each one against the next
//! expected value. A mismatch is fatal: the run stops with the cycle, the index
//! and both values. Once the sequence is exhausted `ready` stays low; a transfer
//! forced past the end is reported rather than dropped.

use tracing::{debug, warn};

use super::port::StreamPort;
use super::stall::StallModel;
use crate::common::{Bits, ConfigError, SimError};

/// Checks an incoming valid/ready stream against a fixed expected sequence.
#[derive(Clone, Debug)]
pub struct SinkStream {
    nbits: u32,
    expected: Vec<Bits>,
    cursor: usize,
    stall: StallModel,
    stalled: bool,
    last: Option<Bits>,
}

impl SinkStream {
    /// Creates a sink of `nbits`-wide messages.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidWidth`] for a width outside `1..=64` and
    /// [`ConfigError::WidthMismatch`] if any expected value has a different width.
    pub fn new(nbits: u32, expected: Vec<Bits>, stall: StallModel) -> Result<Self, ConfigError> {
        let _ = Bits::new(nbits, 0)?;
        if let Some((index, msg)) = expected
            .iter()
            .enumerate()
            .find(|(_, m)| m.nbits() != nbits)
        {
            return Err(ConfigError::WidthMismatch {
                stream: "sink",
                index,
                expected: nbits,
                actual: msg.nbits(),
            });
        }
        Ok(Self {
            nbits,
            expected,
            cursor: 0,
            stall,
            stalled: false,
            last: None,
        })
    }

    /// Drives `ready` on `input` for this tick.
    pub fn drive(&mut self, cycle: u64, input: &mut StreamPort) {
        self.stalled = false;
        if self.done() {
            input.ready = false;
            return;
        }
        self.stalled = self.stall.should_stall(cycle);
        input.ready = !self.stalled;
    }

    /// Commits this tick's handshake outcome and checks any received message.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Mismatch`] when the received message differs from the
    /// expected one and [`SimError::Unexpected`] when a message arrives after the
    /// whole sequence has been received.
    pub fn commit(&mut self, cycle: u64, input: &StreamPort) -> Result<(), SimError> {
        self.last = None;
        if !input.fire() {
            return Ok(());
        }
        let actual = input.msg;
        self.last = Some(actual);
        let Some(&expected) = self.expected.get(self.cursor) else {
            warn!(cycle, %actual, "sink received past end of sequence");
            return Err(SimError::Unexpected {
                cycle,
                index: self.cursor,
                actual,
            });
        };
        if actual != expected {
            warn!(cycle, index = self.cursor, %expected, %actual, "sink mismatch");
            return Err(SimError::Mismatch {
                cycle,
                index: self.cursor,
                expected,
                actual,
            });
        }
        debug!(cycle, index = self.cursor, msg = %actual, "sink received");
        self.cursor += 1;
        Ok(())
    }

    /// Returns `true` once every expected message has arrived.
    pub fn done(&self) -> bool {
        self.cursor == self.expected.len()
    }

    /// Index of the next expected message.
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Total number of expected messages.
    pub fn len(&self) -> usize {
        self.expected.len()
    }

    /// Returns `true` if nothing is expected.
    pub fn is_empty(&self) -> bool {
        self.expected.is_empty()
    }

    /// Message width.
    pub const fn nbits(&self) -> u32 {
        self.nbits
    }

    /// Returns `true` if this tick's `ready` was withheld by a stall.
    pub const fn stalled(&self) -> bool {
        self.stalled
    }

    /// Message accepted on the most recent tick, if any.
    pub const fn last_received(&self) -> Option<Bits> {
        self.last
    }

    /// Stall model driving this sink.
    pub const fn stall_model(&self) -> &StallModel {
        &self.stall
    }
}
