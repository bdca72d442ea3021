//! Configuration and simulation error definitions.
//!
//! This module defines the failure taxonomy of the harness. It provides:
//! 1. **Configuration Errors:** Raised while building streams, devices and cases; never mid-run.
//! 2. **Simulation Errors:** A sink mismatch or an extra response (wrong answer) and a
//!    watchdog expiry (hung run), kept distinct so reports can tell them apart.

use thiserror::Error;

use super::bits::Bits;

/// Invalid parameters detected while constructing a harness or its inputs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A stall delay below zero was supplied.
    #[error("stall delay must be non-negative, got {0}")]
    NegativeDelay(i64),

    /// A stall delay too large to represent was supplied.
    #[error("stall delay {0} is out of range")]
    DelayOutOfRange(i64),

    /// A bit width outside `1..=64` was requested.
    #[error("bit width must be in 1..=64, got {0}")]
    InvalidWidth(u32),

    /// A queued message does not match the width of the stream carrying it.
    #[error("{stream} message {index} is {actual} bits wide, stream carries {expected}-bit values")]
    WidthMismatch {
        /// Which stream rejected the message (`"source"` or `"sink"`).
        stream: &'static str,
        /// Position of the offending message.
        index: usize,
        /// Width declared for the stream.
        expected: u32,
        /// Width of the offending message.
        actual: u32,
    },

    /// A test case pairs a different number of requests and responses.
    #[error("case `{name}` has {requests} requests but {responses} expected responses")]
    LengthMismatch {
        /// Case name.
        name: String,
        /// Number of requests.
        requests: usize,
        /// Number of expected responses.
        responses: usize,
    },

    /// A device was configured with no buffering at all.
    #[error("device queue capacity must be at least 1")]
    ZeroCapacity,

    /// A test case name was not found in the table.
    #[error("unknown test case `{0}`")]
    UnknownCase(String),

    /// A configuration document could not be parsed.
    #[error("failed to parse configuration: {0}")]
    Parse(String),

    /// A configuration file could not be read.
    #[error("failed to read configuration `{path}`: {reason}")]
    Io {
        /// Path that was being read.
        path: String,
        /// Underlying I/O error message.
        reason: String,
    },
}

/// Fatal outcome of a simulation run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimError {
    /// The sink received a value that differs from the expected one.
    #[error(
        "cycle {cycle}: sink message {index} mismatch: expected {expected} ({}), actual {actual} ({})",
        .expected.as_signed(),
        .actual.as_signed()
    )]
    Mismatch {
        /// Cycle on which the transfer happened.
        cycle: u64,
        /// Cursor position of the failing comparison.
        index: usize,
        /// Expected value.
        expected: Bits,
        /// Value actually received.
        actual: Bits,
    },

    /// The sink received a value after every expected value had arrived.
    #[error("cycle {cycle}: sink received unexpected message {index}: {actual} ({})", .actual.as_signed())]
    Unexpected {
        /// Cycle on which the transfer happened.
        cycle: u64,
        /// Position the extra value would have had in the sequence.
        index: usize,
        /// Value received.
        actual: Bits,
    },

    /// The driver watchdog fired before the harness reported done.
    #[error(
        "watchdog expired after {max_cycles} cycles: sent {sent}, received {received} of {expected}"
    )]
    Timeout {
        /// Cycle budget that was exhausted.
        max_cycles: u64,
        /// Requests accepted by the device.
        sent: usize,
        /// Responses checked by the sink.
        received: usize,
        /// Responses the sink was waiting for in total.
        expected: usize,
    },

    /// The run could not be set up.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl SimError {
    /// Returns `true` for a wrong-answer failure, including an extra response.
    pub const fn is_mismatch(&self) -> bool {
        matches!(self, Self::Mismatch { .. } | Self::Unexpected { .. })
    }

    /// Returns `true` for a hung-run failure.
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}
