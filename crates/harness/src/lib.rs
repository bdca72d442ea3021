//! Latency-injecting stream test harness.
//!
//! This crate drives a device under test through a cycle-level valid/ready test bench:
//! 1. **Streams:** A source replaying requests and a sink checking responses, both with
//!    seeded random stall injection.
//! 2. **Devices:** The `Device` contract plus a functional-level integer multiplier and a
//!    pass-through wire.
//! 3. **Simulation:** The harness tick (drive, then commit) and a driver loop with a
//!    cycle watchdog.
//! 4. **Cases:** Directed and random multiplier case tables.
//! 5. **Configuration & statistics:** JSON-loadable settings and per-run counters.

/// Multiplier test-case table.
pub mod cases;
/// Common types (bit vectors, errors).
pub mod common;
/// Harness configuration (defaults, device selection, case specs).
pub mod config;
/// Devices under test (trait, multiplier, pass-through, message packing).
pub mod device;
/// Harness composition and driver loop.
pub mod sim;
/// Per-run statistics.
pub mod stats;
/// Source and sink endpoints, ports and stall models.
pub mod stream;

/// Root configuration type; use `Config::default()` or parse from JSON.
pub use crate::config::Config;
/// Error types; configuration problems and fatal run failures.
pub use crate::common::{Bits, ConfigError, SimError};
/// Device contract implemented by every device under test.
pub use crate::device::Device;
/// Top-level harness; construct with `Harness::new` or `Harness::from_case`.
pub use crate::sim::{Harness, RunReport, run_case, run_sim};
