//! Truncating bfloat16
//!
//! `BF16` keeps the upper half of an IEEE-754 binary32 pattern. Encoding drops
//! the low 16 mantissa bits without rounding, so `BF16::from_f32(x).to_f32()`
//! is `x` with its low half cleared. This differs from `half::bf16`, which
//! rounds to nearest even.

use bytemuck::{Pod, Zeroable};

use super::narrow::impl_narrow_float;

/// 16-bit brain float: 1 sign, 8 exponent, 7 mantissa bits.
#[derive(Copy, Clone, Default)]
#[repr(transparent)]
pub struct BF16(pub u16);

// Safety: BF16 is a transparent wrapper around u16, which is Pod
unsafe impl Pod for BF16 {}
unsafe impl Zeroable for BF16 {}

impl BF16 {
    /// Zero value
    pub const ZERO: Self = Self(0x0000);
    /// One value
    pub const ONE: Self = Self(0x3F80);
    /// Negative one
    pub const NEG_ONE: Self = Self(0xBF80);
    /// Positive infinity
    pub const INFINITY: Self = Self(0x7F80);
    /// Negative infinity
    pub const NEG_INFINITY: Self = Self(0xFF80);
    /// Quiet NaN
    pub const NAN: Self = Self(0x7FC0);

    /// Create from raw bits
    #[inline]
    pub const fn from_bits(bits: u16) -> Self {
        Self(bits)
    }

    /// Get raw bits
    #[inline]
    pub const fn to_bits(self) -> u16 {
        self.0
    }

    /// Encode by keeping the high 16 bits of the f32 pattern.
    #[inline]
    pub const fn from_f32(x: f32) -> Self {
        Self((x.to_bits() >> 16) as u16)
    }

    /// Decode into the high half of an f32; the low mantissa bits are zero.
    #[inline]
    pub const fn to_f32(self) -> f32 {
        f32::from_bits((self.0 as u32) << 16)
    }
}

impl_narrow_float!(BF16);
