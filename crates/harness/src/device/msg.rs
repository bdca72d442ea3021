//! Multiplier request and response messages.
//!
//! A request is a 64-bit word with operand `a` in bits `[32, 64)` and operand `b` in
//! bits `[0, 32)`. A response is the low 32 bits of the signed product. Operands wider
//! than 32 bits are truncated, so `mk_req(-1, 0)` carries `0xffff_ffff` in the high
//! half.

use crate::common::Bits;

/// Width of a multiplier request.
pub const REQ_NBITS: u32 = 64;

/// Width of a multiplier response.
pub const RESP_NBITS: u32 = 32;

/// Bit offset of operand `a` within a request.
const A_SHIFT: u32 = 32;

/// Builds a request word from two operands, truncating each to 32 bits.
pub const fn mk_req(a: i64, b: i64) -> Bits {
    let hi = (a as u32 as u64) << A_SHIFT;
    let lo = b as u32 as u64;
    Bits::from_u64(hi | lo)
}

/// Builds a response word, truncating to 32 bits.
pub const fn mk_resp(value: i64) -> Bits {
    Bits::from_u32(value as u32)
}

/// Splits a request word into its `(a, b)` operands.
pub const fn unpack_req(msg: Bits) -> (u32, u32) {
    let raw = msg.value();
    ((raw >> A_SHIFT) as u32, raw as u32)
}

/// Reference product: low 32 bits of the signed product of both operands.
pub const fn reference_product(a: u32, b: u32) -> u32 {
    (a as i32).wrapping_mul(b as i32) as u32
}
