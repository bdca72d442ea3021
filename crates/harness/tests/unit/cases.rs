//! Case table tests.

use imulsim_core::cases::{self, RANDOM_CASE_LEN, TestCase};
use imulsim_core::device::IntMulFl;
use imulsim_core::device::msg::{mk_req, mk_resp, unpack_req};
use imulsim_core::{Bits, ConfigError};
use pretty_assertions::assert_eq;

#[test]
fn builtin_table_lists_directed_then_random_cases() {
    let names: Vec<_> = cases::builtin_cases(0)
        .into_iter()
        .map(|c| (c.name, c.src_delay, c.sink_delay))
        .collect();
    let expected = [
        ("small_pos_pos", 0, 0),
        ("zero_one_neg_one", 20, 40),
        ("small_neg_pos", 40, 20),
        ("small_pos_neg", 0, 0),
        ("small_neg_neg", 15, 30),
        ("large_pos_pos", 50, 50),
        ("large_pos_neg", 100, 0),
        ("large_neg_pos", 0, 100),
        ("large_neg_neg", 50, 20),
        ("low_order_bits", 20, 40),
        ("middle_order_bits", 20, 40),
        ("sparse_zeros", 20, 40),
        ("dense_ones", 20, 40),
        ("random_small", 0, 0),
        ("random_large", 20, 40),
        ("random_lo_mask", 20, 40),
        ("random_lohi_mask", 20, 40),
        ("random_hi_mask", 20, 40),
        ("random_sparse", 20, 40),
        ("random_dense", 20, 40),
    ]
    .map(|(n, s, k)| (n.to_owned(), s, k));
    assert_eq!(names, expected.to_vec());
}

#[test]
fn every_response_is_the_product_of_its_request() {
    for case in cases::builtin_cases(7) {
        assert_eq!(case.requests.len(), case.responses.len(), "{}", case.name);
        for (req, resp) in case.requests.iter().zip(&case.responses) {
            assert_eq!(IntMulFl::multiply(*req), *resp, "{}", case.name);
        }
    }
}

#[test]
fn random_cases_depend_only_on_the_seed() {
    let a = cases::random_cases(11);
    let b = cases::random_cases(11);
    let c = cases::random_cases(12);
    assert_eq!(a, b);
    assert_ne!(a, c);
    assert!(a.iter().all(|case| case.len() == RANDOM_CASE_LEN));
}

#[test]
fn directed_rows_are_packed_as_signed_operands() {
    let table = cases::directed_cases();
    let case = cases::find_case(&table, "small_neg_pos").unwrap();
    let (a, b) = unpack_req(case.requests[0]);
    assert!((a as i32) < 0);
    assert!((b as i32) > 0);
    assert_eq!(case.responses[0], mk_resp(i64::from(a as i32) * i64::from(b as i32)));
}

#[test]
fn request_packs_a_in_the_high_half() {
    assert_eq!(mk_req(2, 3), Bits::from_u64(0x0000_0002_0000_0003));
    assert_eq!(mk_req(-1, 0), Bits::from_u64(0xffff_ffff_0000_0000));
    assert_eq!(mk_resp(-1), Bits::from_u32(u32::MAX));
}

#[test]
fn unknown_case_is_reported_by_name() {
    let table = cases::builtin_cases(0);
    assert_eq!(
        cases::find_case(&table, "no_such_case").unwrap_err(),
        ConfigError::UnknownCase("no_such_case".to_owned())
    );
}

#[test]
fn case_lengths_must_agree() {
    let err = TestCase::new("short", vec![mk_req(1, 1)], Vec::new(), 0, 0).unwrap_err();
    assert_eq!(
        err,
        ConfigError::LengthMismatch {
            name: "short".to_owned(),
            requests: 1,
            responses: 0,
        }
    );
}

#[test]
fn delay_override_keeps_messages() {
    let original = cases::directed_cases().remove(0);
    let slowed = original.clone().with_delays(9, 8);
    assert_eq!(slowed.requests, original.requests);
    assert_eq!((slowed.src_delay, slowed.sink_delay), (9, 8));
}
