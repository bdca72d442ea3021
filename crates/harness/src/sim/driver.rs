//! Simulation driver.
//!
//! Ticks a harness until it reports done, enforcing a cycle watchdog so a device that
//! never answers is reported as hung rather than looping forever. After completion a
//! few settle cycles are ticked so the device drains its registered state. The sink
//! holds `ready` low by then, so late responses are not accepted or checked.

use tracing::{info, trace, warn};

use super::harness::Harness;
use crate::cases::TestCase;
use crate::common::SimError;
use crate::config::{DeviceConfig, SimConfig};
use crate::device::{self, Device};
use crate::stats::HarnessStats;

/// Outcome of a completed run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RunReport {
    /// Cycle count at which the harness first reported done.
    pub cycles: u64,
    /// Number of responses checked by the sink.
    pub transfers: usize,
    /// Counters over the whole run, settle cycles included.
    pub stats: HarnessStats,
    /// One line-trace entry per tick, when tracing was enabled.
    pub trace: Vec<String>,
}

/// Runs `harness` to completion.
///
/// # Errors
///
/// Returns [`SimError::Mismatch`] on the first wrong response,
/// [`SimError::Unexpected`] on a response accepted beyond the expected sequence and
/// [`SimError::Timeout`] when `config.max_cycles` elapse before the harness is done.
pub fn run_sim<D: Device>(
    harness: &mut Harness<D>,
    config: &SimConfig,
) -> Result<RunReport, SimError> {
    let collect = config.line_trace || cfg!(feature = "always-trace");
    let mut lines = Vec::new();

    while !harness.done() {
        if harness.cycle() >= config.max_cycles {
            let err = SimError::Timeout {
                max_cycles: config.max_cycles,
                sent: harness.source().cursor(),
                received: harness.sink().cursor(),
                expected: harness.sink().len(),
            };
            warn!(device = harness.device().name(), %err, "watchdog expired");
            return Err(err);
        }
        harness.tick()?;
        record_trace(harness, collect, &mut lines);
    }
    let cycles = harness.cycle();

    for _ in 0..config.extra_cycles {
        harness.tick()?;
        record_trace(harness, collect, &mut lines);
    }

    info!(
        device = harness.device().name(),
        cycles,
        transfers = harness.sink().len(),
        "harness done"
    );
    Ok(RunReport {
        cycles,
        transfers: harness.sink().cursor(),
        stats: harness.stats().clone(),
        trace: lines,
    })
}

fn record_trace<D: Device>(harness: &Harness<D>, collect: bool, lines: &mut Vec<String>) {
    if !collect {
        return;
    }
    let line = format!("{:>4}: {}", harness.cycle() - 1, harness.line_trace());
    trace!("{line}");
    lines.push(line);
}

/// Builds the configured device and runs `case` on it.
///
/// # Errors
///
/// Returns [`SimError::Config`] if the device or case is misconfigured, otherwise
/// whatever [`run_sim`] returns.
pub fn run_case(
    case: &TestCase,
    device: &DeviceConfig,
    config: &SimConfig,
) -> Result<RunReport, SimError> {
    let dut = device::build(device)?;
    let mut harness = Harness::from_case(dut, case, config.seed)?;
    let report = run_sim(&mut harness, config)?;
    report.stats.log_summary(&case.name);
    Ok(report)
}
