//! Per-tick signals of one valid/ready channel.

use crate::common::Bits;

/// Signals of one valid/ready channel for the current tick.
///
/// The producer drives `valid` and `msg`, the consumer drives `ready`. A transfer
/// happens exactly when both are asserted in the same tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StreamPort {
    /// Producer has a message on `msg`.
    pub valid: bool,
    /// Consumer will accept a message this tick.
    pub ready: bool,
    /// Payload; only meaningful while `valid` is set.
    pub msg: Bits,
}

impl StreamPort {
    /// Creates an idle port carrying `nbits`-wide messages.
    pub const fn new(nbits: u32) -> Self {
        Self {
            valid: false,
            ready: false,
            msg: Bits::zero(nbits),
        }
    }

    /// Deasserts both handshake signals ahead of a new drive phase.
    #[inline]
    pub const fn reset(&mut self) {
        self.valid = false;
        self.ready = false;
    }

    /// Returns `true` when a transfer completes this tick.
    #[inline]
    pub const fn fire(&self) -> bool {
        self.valid && self.ready
    }

    /// Sets `msg` and asserts `valid`.
    #[inline]
    pub const fn send(&mut self, msg: Bits) {
        self.msg = msg;
        self.valid = true;
    }

    /// One-column line-trace rendering of this port, padded to the message width.
    ///
    /// Shows the message on a transfer, `#` when the producer is held off by
    /// backpressure, `.` when the producer is idle and blank when the consumer
    /// waits with nothing offered.
    pub fn trace(&self) -> String {
        let width = self.msg.hex_width();
        match (self.valid, self.ready) {
            (true, true) => self.msg.to_string(),
            (true, false) => format!("{:width$}", "#"),
            (false, true) => " ".repeat(width),
            (false, false) => format!("{:width$}", "."),
        }
    }
}
