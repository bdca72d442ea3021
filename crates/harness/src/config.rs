//! Configuration system for the stream harness.
//!
//! This module defines all configuration structures and enums used to parameterize a
//! run. It provides:
//! 1. **Defaults:** Baseline seed, watchdog budget and device buffering.
//! 2. **Structures:** Simulation, device and test-case configuration.
//! 3. **Enums:** Device selection.
//!
//! Configuration is supplied as JSON (`Config::from_json_str`, `Config::from_file`) or
//! use `Config::default()` for the built-in case table.

use std::path::Path;

use serde::Deserialize;

use crate::cases::TestCase;
use crate::common::ConfigError;
use crate::device::msg::{mk_req, mk_resp};

/// Default configuration constants for the harness.
mod defaults {
    /// Seed for stall generators and random case tables.
    pub const SEED: u64 = 0xdead_beef;

    /// Watchdog budget: cycles a run may take before it is declared hung.
    pub const MAX_CYCLES: u64 = 10_000;

    /// Settle cycles ticked after the harness reports done.
    pub const EXTRA_CYCLES: u64 = 3;

    /// Output queue depth of buffered devices.
    pub const QUEUE_CAPACITY: usize = 2;
}

/// Device-under-test selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeviceKind {
    /// Functional-level integer multiplier.
    #[default]
    #[serde(alias = "IntMulFl", alias = "imul")]
    IntMulFl,
    /// Zero-latency wire from request to response.
    #[serde(alias = "PassThrough")]
    PassThrough,
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Simulation loop settings
    #[serde(default)]
    pub sim: SimConfig,

    /// Device under test
    #[serde(default)]
    pub device: DeviceConfig,

    /// Extra test cases appended to the built-in table
    #[serde(default)]
    pub cases: Vec<CaseSpec>,
}

impl Config {
    /// Parses a configuration from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when the document is malformed.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Reads and parses a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read and
    /// [`ConfigError::Parse`] if it is malformed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_json_str(&json)
    }
}

/// Simulation loop settings.
#[derive(Debug, Clone, Deserialize)]
pub struct SimConfig {
    /// Seed for stall generators and random case tables
    #[serde(default = "SimConfig::default_seed")]
    pub seed: u64,

    /// Watchdog budget in cycles
    #[serde(default = "SimConfig::default_max_cycles")]
    pub max_cycles: u64,

    /// Settle cycles ticked after completion
    #[serde(default = "SimConfig::default_extra_cycles")]
    pub extra_cycles: u64,

    /// Collect and log a line trace every cycle
    #[serde(default)]
    pub line_trace: bool,
}

impl SimConfig {
    /// Returns the default seed.
    fn default_seed() -> u64 {
        defaults::SEED
    }

    /// Returns the default watchdog budget.
    fn default_max_cycles() -> u64 {
        defaults::MAX_CYCLES
    }

    /// Returns the default number of settle cycles.
    fn default_extra_cycles() -> u64 {
        defaults::EXTRA_CYCLES
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: defaults::SEED,
            max_cycles: defaults::MAX_CYCLES,
            extra_cycles: defaults::EXTRA_CYCLES,
            line_trace: false,
        }
    }
}

/// Device-under-test configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DeviceConfig {
    /// Which device to instantiate
    #[serde(default)]
    pub kind: DeviceKind,

    /// Output queue depth for buffered devices
    #[serde(default = "DeviceConfig::default_queue_capacity")]
    pub queue_capacity: usize,
}

impl DeviceConfig {
    /// Returns the default output queue depth.
    fn default_queue_capacity() -> usize {
        defaults::QUEUE_CAPACITY
    }
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            kind: DeviceKind::default(),
            queue_capacity: defaults::QUEUE_CAPACITY,
        }
    }
}

/// A multiplier test case as written in a configuration file.
///
/// Expected responses default to the reference product of each operand pair.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CaseSpec {
    /// Case name
    pub name: String,

    /// Operand pairs `[a, b]`
    pub msgs: Vec<[i64; 2]>,

    /// Explicit expected responses, one per operand pair
    #[serde(default)]
    pub expected: Option<Vec<i64>>,

    /// Source stall delay (signed so negative values are reported, not rejected by the parser)
    #[serde(default)]
    pub src_delay: i64,

    /// Sink stall delay
    #[serde(default)]
    pub sink_delay: i64,
}

impl CaseSpec {
    /// Converts this entry into a runnable test case.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::LengthMismatch`] when explicit expectations do not
    /// pair up with the operands.
    pub fn into_case(self) -> Result<TestCase, ConfigError> {
        let requests = self.msgs.iter().map(|&[a, b]| mk_req(a, b)).collect();
        let responses = match self.expected {
            Some(expected) => expected.into_iter().map(mk_resp).collect(),
            None => self
                .msgs
                .iter()
                .map(|&[a, b]| mk_resp(a.wrapping_mul(b)))
                .collect(),
        };
        TestCase::new(
            self.name,
            requests,
            responses,
            self.src_delay,
            self.sink_delay,
        )
    }
}
