//! Random stall injection.
//!
//! A `StallModel` decides, once per cycle, whether its port withholds `valid` (source)
//! or `ready` (sink). The decision is drawn from a generator the model owns, seeded
//! explicitly by whoever builds the harness, so a run replays identically for the
//! same seed.
//!
//! Stall probability for delay `d` is `d / (d + 2)`. It rises monotonically with `d`
//! and never reaches 1, so a port always makes progress eventually. The expected
//! number of idle cycles before each attempt works out to `d / 2`, the mean of a
//! uniform `[0, d]` delay.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::trace;

use crate::common::ConfigError;

/// Generator stream used by the source stall model.
pub const SOURCE_STREAM: u64 = 0;

/// Generator stream used by the sink stall model.
pub const SINK_STREAM: u64 = 1;

/// Returns the per-cycle stall probability for a delay parameter.
pub fn stall_probability(delay: u32) -> f64 {
    let d = f64::from(delay);
    d / (d + 2.0)
}

/// Per-port stall decision process.
#[derive(Clone, Debug)]
pub struct StallModel {
    delay: u32,
    probability: f64,
    rng: ChaCha8Rng,
    stalls: u64,
}

impl StallModel {
    /// Creates a stall model for `delay` driven by `rng`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NegativeDelay`] for a negative delay and
    /// [`ConfigError::DelayOutOfRange`] for one that does not fit in `u32`.
    pub fn new(delay: i64, rng: ChaCha8Rng) -> Result<Self, ConfigError> {
        if delay < 0 {
            return Err(ConfigError::NegativeDelay(delay));
        }
        let delay = u32::try_from(delay).map_err(|_| ConfigError::DelayOutOfRange(delay))?;
        Ok(Self {
            delay,
            probability: stall_probability(delay),
            rng,
            stalls: 0,
        })
    }

    /// Creates a stall model whose generator is `seed` on the given ChaCha stream.
    ///
    /// Source and sink share one seed and differ only in `stream`, which keeps their
    /// decisions independent without a second seed.
    pub fn seeded(delay: i64, seed: u64, stream: u64) -> Result<Self, ConfigError> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        rng.set_stream(stream);
        Self::new(delay, rng)
    }

    /// A model that never stalls.
    pub fn never() -> Self {
        Self {
            delay: 0,
            probability: 0.0,
            rng: ChaCha8Rng::seed_from_u64(0),
            stalls: 0,
        }
    }

    /// Configured delay parameter.
    pub const fn delay(&self) -> u32 {
        self.delay
    }

    /// Per-cycle stall probability.
    pub const fn probability(&self) -> f64 {
        self.probability
    }

    /// Number of stalls injected so far.
    pub const fn stalls(&self) -> u64 {
        self.stalls
    }

    /// Decides whether the port stalls on `cycle`.
    ///
    /// A zero delay never stalls and leaves the generator untouched.
    pub fn should_stall(&mut self, cycle: u64) -> bool {
        if self.delay == 0 {
            return false;
        }
        let stall = self.rng.gen_bool(self.probability);
        if stall {
            self.stalls += 1;
            trace!(cycle, delay = self.delay, "stall injected");
        }
        stall
    }
}
