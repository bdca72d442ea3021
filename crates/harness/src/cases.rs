//! Multiplier test-case table.
//!
//! Each case pairs a request sequence with the expected response sequence and the
//! source/sink stall delays to run it with. The built-in table covers directed
//! boundary cases (signs, zero, one, `i32::MAX`, bit-position patterns) and random
//! cases generated from the run seed, so a given seed always yields the same table.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::common::{Bits, ConfigError};
use crate::device::msg::{REQ_NBITS, RESP_NBITS, mk_req, mk_resp};

/// Number of messages in every random case.
pub const RANDOM_CASE_LEN: usize = 50;

/// One named request/response table plus its stall delays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCase {
    /// Case name.
    pub name: String,
    /// Request width in bits.
    pub req_nbits: u32,
    /// Requests, in send order.
    pub requests: Vec<Bits>,
    /// Response width in bits.
    pub resp_nbits: u32,
    /// Expected responses, in arrival order.
    pub responses: Vec<Bits>,
    /// Source stall delay.
    pub src_delay: i64,
    /// Sink stall delay.
    pub sink_delay: i64,
}

impl TestCase {
    /// Creates a multiplier case (64-bit requests, 32-bit responses).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::LengthMismatch`] when the two sequences differ in length.
    pub fn new(
        name: impl Into<String>,
        requests: Vec<Bits>,
        responses: Vec<Bits>,
        src_delay: i64,
        sink_delay: i64,
    ) -> Result<Self, ConfigError> {
        let name = name.into();
        if requests.len() != responses.len() {
            return Err(ConfigError::LengthMismatch {
                name,
                requests: requests.len(),
                responses: responses.len(),
            });
        }
        Ok(Self {
            name,
            req_nbits: REQ_NBITS,
            requests,
            resp_nbits: RESP_NBITS,
            responses,
            src_delay,
            sink_delay,
        })
    }

    /// Builds a multiplier case from `(request, response)` pairs.
    pub fn from_pairs(
        name: impl Into<String>,
        msgs: &[(Bits, Bits)],
        src_delay: i64,
        sink_delay: i64,
    ) -> Self {
        let (requests, responses) = msgs.iter().copied().unzip();
        Self {
            name: name.into(),
            req_nbits: REQ_NBITS,
            requests,
            resp_nbits: RESP_NBITS,
            responses,
            src_delay,
            sink_delay,
        }
    }

    /// Overrides the stream widths, for devices other than the multiplier.
    #[must_use]
    pub const fn with_widths(mut self, req_nbits: u32, resp_nbits: u32) -> Self {
        self.req_nbits = req_nbits;
        self.resp_nbits = resp_nbits;
        self
    }

    /// Overrides both stall delays.
    #[must_use]
    pub const fn with_delays(mut self, src_delay: i64, sink_delay: i64) -> Self {
        self.src_delay = src_delay;
        self.sink_delay = sink_delay;
        self
    }

    /// Number of transfers in this case.
    pub fn len(&self) -> usize {
        self.requests.len()
    }

    /// Returns `true` for an empty case.
    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }
}

/// Builds a case from `(a, b, product)` rows.
fn directed(name: &str, rows: &[(i64, i64, i64)], src_delay: i64, sink_delay: i64) -> TestCase {
    let msgs: Vec<_> = rows
        .iter()
        .map(|&(a, b, p)| (mk_req(a, b), mk_resp(p)))
        .collect();
    TestCase::from_pairs(name, &msgs, src_delay, sink_delay)
}

/// Builds a case whose responses are the products of generated operand pairs.
fn generated(
    name: &str,
    rng: &mut ChaCha8Rng,
    src_delay: i64,
    sink_delay: i64,
    mut operands: impl FnMut(&mut ChaCha8Rng) -> (i64, i64),
) -> TestCase {
    let msgs: Vec<_> = (0..RANDOM_CASE_LEN)
        .map(|_| {
            let (a, b) = operands(rng);
            (mk_req(a, b), mk_resp(a.wrapping_mul(b)))
        })
        .collect();
    TestCase::from_pairs(name, &msgs, src_delay, sink_delay)
}

/// Sum of `count` random powers of two with exponents in `0..=25`.
fn sum_of_powers(rng: &mut ChaCha8Rng, count: usize) -> i64 {
    (0..count).map(|_| 1i64 << rng.gen_range(0..=25u32)).sum()
}

/// Directed cases.
pub fn directed_cases() -> Vec<TestCase> {
    vec![
        directed(
            "small_pos_pos",
            &[(2, 3, 6), (4, 5, 20), (3, 4, 12), (10, 13, 130), (8, 7, 56)],
            0,
            0,
        ),
        directed(
            "zero_one_neg_one",
            &[
                (0, 1, 0),
                (0, 0, 0),
                (0, -1, 0),
                (1, 1, 1),
                (1, 0, 0),
                (1, -1, -1),
                (-1, -1, 1),
                (-1, 0, 0),
            ],
            20,
            40,
        ),
        directed(
            "small_neg_pos",
            &[(-2, 3, -6), (-4, 5, -20), (-3, 4, -12), (-10, 13, -130), (-8, 7, -56)],
            40,
            20,
        ),
        directed(
            "small_pos_neg",
            &[(2, -3, -6), (4, -5, -20), (3, -4, -12), (10, -13, -130), (8, -7, -56)],
            0,
            0,
        ),
        directed(
            "small_neg_neg",
            &[(-2, -3, 6), (-4, -5, 20), (-3, -4, 12), (-10, -13, 130), (-8, -7, 56)],
            15,
            30,
        ),
        directed(
            "large_pos_pos",
            &[
                (50, 112, 5600),
                (145, 342, 49590),
                (1234, 123, 151782),
                (34, 4568, 155312),
                (10342, 13, 134446),
                (2147483647, 1, 2147483647),
                (1, 2147483647, 2147483647),
                (10000, 100000, 1000000000),
            ],
            50,
            50,
        ),
        directed(
            "large_pos_neg",
            &[
                (50, -112, -5600),
                (145, -342, -49590),
                (1234, -123, -151782),
                (34, -4568, -155312),
                (10342, -13, -134446),
                (-2147483647, 1, -2147483647),
                (1, -2147483647, -2147483647),
                (10000, -100000, -1000000000),
            ],
            100,
            0,
        ),
        directed(
            "large_neg_pos",
            &[
                (-50, 112, -5600),
                (-145, 342, -49590),
                (-1234, 123, -151782),
                (-34, 4568, -155312),
                (-10342, 13, -134446),
                (-10000, 100000, -1000000000),
            ],
            0,
            100,
        ),
        directed(
            "large_neg_neg",
            &[
                (-50, -112, 5600),
                (-145, -342, 49590),
                (-1234, -123, 151782),
                (-34, -4568, 155312),
                (-10342, -13, 134446),
                (-10000, -100000, 1000000000),
            ],
            50,
            20,
        ),
        directed(
            "low_order_bits",
            &[
                (131072, 64, 8388608),
                (64, 131072, 8388608),
                (1, 536870912, 536870912),
                (536870912, 1, 536870912),
            ],
            20,
            40,
        ),
        directed(
            "middle_order_bits",
            &[
                (67, 7687, 515029),
                (7687, 67, 515029),
                (5, 16515079, 82575395),
                (16515079, 5, 82575395),
            ],
            20,
            40,
        ),
        directed(
            "sparse_zeros",
            &[
                (76, 33825, 2570700),
                (33825, 76, 2570700),
                (1296, 67860, 87946560),
                (67860, 1296, 87946560),
            ],
            20,
            40,
        ),
        directed(
            "dense_ones",
            &[
                (2031, 128635, 261257685),
                (128635, 2031, 261257685),
                (94, 24573, 2309862),
                (24573, 94, 2309862),
            ],
            20,
            40,
        ),
    ]
}

/// Random cases drawn from `seed`.
pub fn random_cases(seed: u64) -> Vec<TestCase> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    vec![
        generated("random_small", &mut rng, 0, 0, |r| {
            (r.gen_range(0..=100), r.gen_range(0..=100))
        }),
        generated("random_large", &mut rng, 20, 40, |r| {
            (r.gen_range(0..=46340), r.gen_range(-45000..=46340))
        }),
        generated("random_lo_mask", &mut rng, 20, 40, |r| {
            let e = r.gen_range(20..=30u32);
            (r.gen_range(1..=9), (1i64 << 30) + (1i64 << e))
        }),
        generated("random_lohi_mask", &mut rng, 20, 40, |r| {
            let e = r.gen_range(10..=15u32);
            let f = r.gen_range(10..=15u32);
            (r.gen_range(1..=200), (1i64 << e) + (1i64 << f))
        }),
        generated("random_hi_mask", &mut rng, 20, 40, |r| {
            (r.gen_range(1..=15), r.gen_range(1..=15))
        }),
        generated("random_sparse", &mut rng, 20, 40, |r| {
            let acc = sum_of_powers(r, 6);
            (r.gen_range(0..=300), acc)
        }),
        generated("random_dense", &mut rng, 20, 40, |r| {
            let acc = sum_of_powers(r, 20);
            (acc, r.gen_range(0..=300))
        }),
    ]
}

/// The full built-in table: directed cases followed by random cases from `seed`.
pub fn builtin_cases(seed: u64) -> Vec<TestCase> {
    let mut cases = directed_cases();
    cases.extend(random_cases(seed));
    cases
}

/// Looks up a case by name.
///
/// # Errors
///
/// Returns [`ConfigError::UnknownCase`] when no case has that name.
pub fn find_case<'a>(cases: &'a [TestCase], name: &str) -> Result<&'a TestCase, ConfigError> {
    cases
        .iter()
        .find(|c| c.name == name)
        .ok_or_else(|| ConfigError::UnknownCase(name.to_owned()))
}
