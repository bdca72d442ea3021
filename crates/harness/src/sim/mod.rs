//! Harness composition and the simulation loop.
//!
//! Provides the `Harness` that wires a source, a device and a sink together, and the
//! driver that ticks it to completion under a cycle watchdog.

/// Simulation loop with watchdog and line tracing.
pub mod driver;

/// Source -> device -> sink composition.
pub mod harness;

pub use driver::{RunReport, run_case, run_sim};
pub use harness::Harness;
