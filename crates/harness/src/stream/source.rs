//! Source endpoint.
//!
//! Replays `msgs[0..N)` onto an output port in order. Once a message has been
//! offered it is held on the port, unchanged, until the consumer accepts it; stalls
//! are only drawn while nothing is being offered.

use tracing::debug;

use super::port::StreamPort;
use super::stall::StallModel;
use crate::common::{Bits, ConfigError};

/// Replays a fixed message sequence onto a valid/ready output.
#[derive(Clone, Debug)]
pub struct SourceStream {
    nbits: u32,
    msgs: Vec<Bits>,
    cursor: usize,
    stall: StallModel,
    /// A message was offered last tick and not yet accepted.
    holding: bool,
    /// Stall decision taken in the current tick.
    stalled: bool,
}

impl SourceStream {
    /// Creates a source of `nbits`-wide messages.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidWidth`] for a width outside `1..=64` and
    /// [`ConfigError::WidthMismatch`] if any message has a different width.
    pub fn new(nbits: u32, msgs: Vec<Bits>, stall: StallModel) -> Result<Self, ConfigError> {
        let _ = Bits::new(nbits, 0)?;
        if let Some((index, msg)) = msgs.iter().enumerate().find(|(_, m)| m.nbits() != nbits) {
            return Err(ConfigError::WidthMismatch {
                stream: "source",
                index,
                expected: nbits,
                actual: msg.nbits(),
            });
        }
        Ok(Self {
            nbits,
            msgs,
            cursor: 0,
            stall,
            holding: false,
            stalled: false,
        })
    }

    /// Drives `valid` and `msg` on `out` for this tick.
    pub fn drive(&mut self, cycle: u64, out: &mut StreamPort) {
        self.stalled = false;
        let Some(&msg) = self.msgs.get(self.cursor) else {
            out.valid = false;
            return;
        };
        if !self.holding && self.stall.should_stall(cycle) {
            self.stalled = true;
            out.valid = false;
            return;
        }
        out.send(msg);
    }

    /// Commits this tick's handshake outcome.
    pub fn commit(&mut self, out: &StreamPort) {
        if out.fire() {
            debug!(index = self.cursor, msg = %out.msg, "source sent");
            self.cursor += 1;
            self.holding = false;
        } else {
            self.holding = out.valid;
        }
    }

    /// Returns `true` once every message has been accepted.
    pub fn done(&self) -> bool {
        self.cursor == self.msgs.len()
    }

    /// Index of the next message to send.
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Total number of messages.
    pub fn len(&self) -> usize {
        self.msgs.len()
    }

    /// Returns `true` if the source has nothing to send.
    pub fn is_empty(&self) -> bool {
        self.msgs.is_empty()
    }

    /// Message width.
    pub const fn nbits(&self) -> u32 {
        self.nbits
    }

    /// Returns `true` if this tick's output was withheld by a stall.
    pub const fn stalled(&self) -> bool {
        self.stalled
    }

    /// Stall model driving this source.
    pub const fn stall_model(&self) -> &StallModel {
        &self.stall
    }
}
