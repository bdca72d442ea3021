use imulsim_core::config::SimConfig;
use imulsim_core::stream::stall::{SINK_STREAM, SOURCE_STREAM};
use imulsim_core::stream::{SinkStream, SourceStream, StallModel};
use imulsim_core::{Bits, Device, Harness};
use tracing_subscriber::EnvFilter;

/// Width used by the 32-bit benches.
pub const WORD: u32 = 32;

/// Routes `tracing` output through the test writer; honours `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
}

/// Wraps each value as a 32-bit message.
pub fn words(values: &[u32]) -> Vec<Bits> {
    values.iter().map(|&v| Bits::from_u32(v)).collect()
}

/// Builds a 32-bit in, 32-bit out harness around `dut`.
pub fn bench<D: Device>(
    dut: D,
    msgs: &[u32],
    expected: &[u32],
    src_delay: i64,
    sink_delay: i64,
    seed: u64,
) -> Harness<D> {
    init_tracing();
    let src = SourceStream::new(
        WORD,
        words(msgs),
        StallModel::seeded(src_delay, seed, SOURCE_STREAM).unwrap(),
    )
    .unwrap();
    let sink = SinkStream::new(
        WORD,
        words(expected),
        StallModel::seeded(sink_delay, seed, SINK_STREAM).unwrap(),
    )
    .unwrap();
    Harness::new(src, dut, sink)
}

/// Driver settings with a generous watchdog and no settle cycles.
pub fn sim_config() -> SimConfig {
    SimConfig {
        max_cycles: 100_000,
        extra_cycles: 0,
        ..SimConfig::default()
    }
}
