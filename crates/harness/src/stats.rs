//! Harness statistics collection and reporting.
//!
//! This module tracks per-run counters for the stream harness. It provides:
//! 1. **Progress:** Total cycles and transfers on each port.
//! 2. **Stalls:** Cycles in which the source or sink withheld its handshake signal.
//! 3. **Backpressure:** Cycles in which an offered message was not accepted.

use std::fmt;

use tracing::info;

use crate::stream::StreamPort;

/// Counters accumulated over one harness run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HarnessStats {
    /// Total cycles ticked.
    pub cycles: u64,
    /// Requests accepted by the device.
    pub requests_sent: u64,
    /// Responses accepted by the sink.
    pub responses_received: u64,
    /// Cycles in which the source held back a pending request.
    pub src_stall_cycles: u64,
    /// Cycles in which the sink held back `ready`.
    pub sink_stall_cycles: u64,
    /// Cycles with a valid request that the device did not accept.
    pub req_backpressure_cycles: u64,
    /// Cycles with a valid response that the sink did not accept.
    pub resp_backpressure_cycles: u64,
}

impl HarnessStats {
    /// Folds one settled tick into the counters.
    pub(crate) const fn record(
        &mut self,
        req: &StreamPort,
        resp: &StreamPort,
        src_stalled: bool,
        sink_stalled: bool,
    ) {
        self.cycles += 1;
        if req.fire() {
            self.requests_sent += 1;
        }
        if resp.fire() {
            self.responses_received += 1;
        }
        if src_stalled {
            self.src_stall_cycles += 1;
        }
        if sink_stalled {
            self.sink_stall_cycles += 1;
        }
        if req.valid && !req.ready {
            self.req_backpressure_cycles += 1;
        }
        if resp.valid && !resp.ready {
            self.resp_backpressure_cycles += 1;
        }
    }

    /// Responses per cycle over the whole run.
    pub fn throughput(&self) -> f64 {
        if self.cycles == 0 {
            0.0
        } else {
            self.responses_received as f64 / self.cycles as f64
        }
    }

    /// Logs the counters at `info` level under `case`.
    pub fn log_summary(&self, case: &str) {
        info!(
            case,
            cycles = self.cycles,
            sent = self.requests_sent,
            received = self.responses_received,
            src_stalls = self.src_stall_cycles,
            sink_stalls = self.sink_stall_cycles,
            req_backpressure = self.req_backpressure_cycles,
            resp_backpressure = self.resp_backpressure_cycles,
            "run complete"
        );
    }
}

impl fmt::Display for HarnessStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cyc = self.cycles.max(1) as f64;
        let pct = |n: u64| (n as f64 / cyc) * 100.0;
        writeln!(f, "sim_cycles               {}", self.cycles)?;
        writeln!(f, "xfer.req                 {}", self.requests_sent)?;
        writeln!(f, "xfer.resp                {}", self.responses_received)?;
        writeln!(f, "xfer.throughput          {:.4}", self.throughput())?;
        writeln!(
            f,
            "stalls.src               {} ({:.2}%)",
            self.src_stall_cycles,
            pct(self.src_stall_cycles)
        )?;
        writeln!(
            f,
            "stalls.sink              {} ({:.2}%)",
            self.sink_stall_cycles,
            pct(self.sink_stall_cycles)
        )?;
        writeln!(
            f,
            "backpressure.req         {} ({:.2}%)",
            self.req_backpressure_cycles,
            pct(self.req_backpressure_cycles)
        )?;
        write!(
            f,
            "backpressure.resp        {} ({:.2}%)",
            self.resp_backpressure_cycles,
            pct(self.resp_backpressure_cycles)
        )
    }
}
