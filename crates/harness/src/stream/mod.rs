//! Valid/ready stream endpoints.
//!
//! This module implements the two test-side ends of a latency-insensitive channel:
//! 1. **Ports:** The `valid`, `ready` and `msg` signals of one channel for the current tick.
//! 2. **Stalls:** Seeded random idle-cycle injection per port.
//! 3. **Source:** Replays a fixed request sequence onto an output port.
//! 4. **Sink:** Accepts responses from an input port and checks them in order.
//!
//! Every endpoint is split into a `drive` phase that only sets its own output signals
//! and a `commit` phase that updates registered state from the frozen port values.

/// Per-tick channel signals.
pub mod port;

/// Sink endpoint with in-order checking.
pub mod sink;

/// Source endpoint replaying a fixed sequence.
pub mod source;

/// Random stall injection.
pub mod stall;

pub use port::StreamPort;
pub use sink::SinkStream;
pub use source::SourceStream;
pub use stall::StallModel;
