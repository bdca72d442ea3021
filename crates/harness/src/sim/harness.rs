//! Harness: owns the source, the device under test and the sink side-by-side.
//!
//! Each tick runs in two phases. In the drive phase the source and sink set their own
//! handshake signals and the device fills in the rest from its registered state. The
//! device may read the endpoint signals but cannot override them: `req.valid`,
//! `req.msg` and `resp.ready` are put back after it drives. In the commit phase every
//! component updates from the same settled ports, so no component observes another's
//! post-tick state within the tick.

use crate::cases::TestCase;
use crate::common::{ConfigError, SimError};
use crate::device::Device;
use crate::stats::HarnessStats;
use crate::stream::stall::{SINK_STREAM, SOURCE_STREAM};
use crate::stream::{SinkStream, SourceStream, StallModel, StreamPort};

/// Source -> device -> sink test harness.
#[derive(Debug)]
pub struct Harness<D: Device> {
    src: SourceStream,
    dut: D,
    sink: SinkStream,
    req: StreamPort,
    resp: StreamPort,
    cycle: u64,
    stats: HarnessStats,
}

impl<D: Device> Harness<D> {
    /// Wires `src` to the device request port and the device response port to `sink`.
    pub fn new(src: SourceStream, dut: D, sink: SinkStream) -> Self {
        let req = StreamPort::new(src.nbits());
        let resp = StreamPort::new(sink.nbits());
        Self {
            src,
            dut,
            sink,
            req,
            resp,
            cycle: 0,
            stats: HarnessStats::default(),
        }
    }

    /// Builds a harness for `case`, seeding both stall models from `seed`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] for negative delays, mismatched sequence lengths or
    /// messages whose width differs from the case's stream widths.
    pub fn from_case(dut: D, case: &TestCase, seed: u64) -> Result<Self, ConfigError> {
        if case.requests.len() != case.responses.len() {
            return Err(ConfigError::LengthMismatch {
                name: case.name.clone(),
                requests: case.requests.len(),
                responses: case.responses.len(),
            });
        }
        let src = SourceStream::new(
            case.req_nbits,
            case.requests.clone(),
            StallModel::seeded(case.src_delay, seed, SOURCE_STREAM)?,
        )?;
        let sink = SinkStream::new(
            case.resp_nbits,
            case.responses.clone(),
            StallModel::seeded(case.sink_delay, seed, SINK_STREAM)?,
        )?;
        Ok(Self::new(src, dut, sink))
    }

    /// Advances the harness by one clock cycle.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Mismatch`] when the sink receives a wrong value and
    /// [`SimError::Unexpected`] when it receives more values than expected.
    pub fn tick(&mut self) -> Result<(), SimError> {
        let cycle = self.cycle;

        self.req.reset();
        self.resp.reset();
        self.src.drive(cycle, &mut self.req);
        self.sink.drive(cycle, &mut self.resp);
        let offered = (self.req.valid, self.req.msg);
        let accepting = self.resp.ready;

        self.dut.drive(&mut self.req, &mut self.resp);
        (self.req.valid, self.req.msg) = offered;
        self.resp.ready = accepting;

        self.stats.record(
            &self.req,
            &self.resp,
            self.src.stalled(),
            self.sink.stalled(),
        );
        self.cycle += 1;

        self.src.commit(&self.req);
        self.dut.commit(&self.req, &self.resp);
        self.sink.commit(cycle, &self.resp)
    }

    /// Returns `true` once the source has sent and the sink has checked everything.
    pub fn done(&self) -> bool {
        self.src.done() && self.sink.done()
    }

    /// Source, device and sink state of the most recent tick.
    pub fn line_trace(&self) -> String {
        format!(
            "{} > {} > {}",
            self.req.trace(),
            self.dut.line_trace(),
            self.resp.trace()
        )
    }

    /// Number of ticks run so far.
    pub const fn cycle(&self) -> u64 {
        self.cycle
    }

    /// Counters accumulated so far.
    pub const fn stats(&self) -> &HarnessStats {
        &self.stats
    }

    /// The source endpoint.
    pub const fn source(&self) -> &SourceStream {
        &self.src
    }

    /// The sink endpoint.
    pub const fn sink(&self) -> &SinkStream {
        &self.sink
    }

    /// The device under test.
    pub const fn device(&self) -> &D {
        &self.dut
    }

    /// Consumes the harness and returns the device under test.
    pub fn into_device(self) -> D {
        self.dut
    }
}
