//! Fixed-width bit vectors.
//!
//! A `Bits` value is the opaque payload of one stream transfer. The harness never
//! interprets its contents; it only moves values between ports and compares them
//! bit-for-bit. Constructors truncate the supplied value to the declared width, the
//! same way a hardware signal of that width would.

use std::fmt;

use super::error::ConfigError;

/// Widest value a single stream can carry.
pub const MAX_NBITS: u32 = 64;

/// Fixed-width bit vector of 1 to 64 bits.
///
/// Two values are equal only when both the width and every bit match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Bits {
    nbits: u32,
    value: u64,
}

impl Bits {
    /// Creates a value of `nbits` bits, truncating `value` to that width.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidWidth`] when `nbits` is outside `1..=64`.
    pub fn new(nbits: u32, value: u64) -> Result<Self, ConfigError> {
        if nbits == 0 || nbits > MAX_NBITS {
            return Err(ConfigError::InvalidWidth(nbits));
        }
        Ok(Self {
            nbits,
            value: value & Self::mask(nbits),
        })
    }

    /// Creates a value from a signed integer, keeping its two's-complement low bits.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidWidth`] when `nbits` is outside `1..=64`.
    pub fn from_i64(nbits: u32, value: i64) -> Result<Self, ConfigError> {
        Self::new(nbits, value as u64)
    }

    /// Creates a 64-bit value.
    #[inline]
    pub const fn from_u64(value: u64) -> Self {
        Self { nbits: 64, value }
    }

    /// Creates a 32-bit value.
    #[inline]
    pub const fn from_u32(value: u32) -> Self {
        Self {
            nbits: 32,
            value: value as u64,
        }
    }

    /// All-zero value used to fill idle ports. Out-of-range widths are clamped into `1..=64`.
    #[inline]
    pub(crate) const fn zero(nbits: u32) -> Self {
        let nbits = if nbits == 0 {
            1
        } else if nbits > MAX_NBITS {
            MAX_NBITS
        } else {
            nbits
        };
        Self { nbits, value: 0 }
    }

    /// Width of this value in bits.
    #[inline]
    pub const fn nbits(&self) -> u32 {
        self.nbits
    }

    /// Raw (zero-extended) value.
    #[inline]
    pub const fn value(&self) -> u64 {
        self.value
    }

    /// Value sign-extended from its top bit.
    pub const fn as_signed(&self) -> i64 {
        let shift = 64 - self.nbits;
        ((self.value << shift) as i64) >> shift
    }

    /// Number of hex digits needed to print a value of this width.
    #[inline]
    pub const fn hex_width(&self) -> usize {
        self.nbits.div_ceil(4) as usize
    }

    #[inline]
    const fn mask(nbits: u32) -> u64 {
        if nbits >= MAX_NBITS {
            u64::MAX
        } else {
            (1u64 << nbits) - 1
        }
    }
}

impl fmt::Display for Bits {
    /// Formats the value as zero-padded hex, one digit per nibble of width.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:0width$x}", self.value, width = self.hex_width())
    }
}
