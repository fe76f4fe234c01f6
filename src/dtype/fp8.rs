//! FP8 (8-bit floating point) types
//!
//! Two finite-only E4M3 encodings (1 sign + 4 exponent + 3 mantissa bits):
//!
//! - **FP8E4M3FN**: bias 7, range [-448, 448], signed zero,
//!   NaN is `S.1111.111`.
//! - **FP8E4M3FNUZ**: bias 8, range [-240, 240], a single zero `0x00`,
//!   NaN is `0x80` (the would-be negative zero).
//!
//! Neither format has infinities. Encoding rounds to nearest even and
//! saturates out-of-range magnitudes (including infinities) to the largest
//! finite value of the matching sign.
//!
//! # Example
//!
//! ```
//! use hostops::dtype::{FP8E4M3FN, FP8E4M3FNUZ};
//!
//! assert_eq!(FP8E4M3FN::from_f32(1.0).to_bits(), 0x38);
//! assert_eq!(FP8E4M3FNUZ::from_f32(1.0).to_bits(), 0x40);
//! assert_eq!(FP8E4M3FN::from_f32(1000.0).to_f32(), 448.0);
//! ```

use bytemuck::{Pod, Zeroable};

use super::narrow::impl_narrow_float;

/// Bit layout parameters for an E4M3 variant
struct E4M3Format {
    /// Exponent bias
    bias: i32,
    /// Largest finite code (positive, without sign bit)
    max_code: u8,
    /// Largest finite magnitude
    max_value: f32,
    /// Code produced for NaN input
    nan: u8,
    /// Whether negative zero folds into `0x00`
    unsigned_zero: bool,
}

const FN: E4M3Format = E4M3Format {
    bias: 7,
    max_code: 0x7E,
    max_value: 448.0,
    nan: 0x7F,
    unsigned_zero: false,
};

const FNUZ: E4M3Format = E4M3Format {
    bias: 8,
    max_code: 0x7F,
    max_value: 240.0,
    nan: 0x80,
    unsigned_zero: true,
};

const MANTISSA_BITS: i32 = 3;

/// Encode an f32 into an E4M3 code, rounding to nearest even and saturating.
fn encode_e4m3(x: f32, format: &E4M3Format) -> u8 {
    if x.is_nan() {
        return format.nan;
    }
    let sign = if x.is_sign_negative() { 0x80u8 } else { 0 };
    let magnitude = x.abs();

    let code = if magnitude >= format.max_value {
        format.max_code
    } else {
        let min_normal_exp = 1 - format.bias;
        let exp = if magnitude == 0.0 {
            min_normal_exp
        } else {
            // unbiased exponent of the f32; f32 subnormals are far below the
            // fp8 subnormal range and only ever round to zero
            (((magnitude.to_bits() >> 23) & 0xFF) as i32 - 127).max(min_normal_exp)
        };
        // scaling by a power of two is exact, so the only rounding is here
        let quantum = 2f32.powi(exp - MANTISSA_BITS);
        let steps = (magnitude / quantum).round_ties_even() as u32;

        if exp == min_normal_exp && steps < 8 {
            // subnormal: exponent field 0
            steps as u8
        } else {
            let (exp, steps) = if steps >= 16 { (exp + 1, 8) } else { (exp, steps) };
            let exp_field = (exp + format.bias) as u32;
            let code = (exp_field << MANTISSA_BITS) | (steps - 8);
            code.min(format.max_code as u32) as u8
        }
    };

    if code == 0 && format.unsigned_zero {
        0
    } else {
        sign | code
    }
}

/// Decode an E4M3 code into f32.
fn decode_e4m3(bits: u8, format: &E4M3Format) -> f32 {
    let is_nan = if format.unsigned_zero {
        bits == format.nan
    } else {
        bits & 0x7F == format.nan
    };
    if is_nan {
        return f32::NAN;
    }

    let exp_field = ((bits >> MANTISSA_BITS) & 0x0F) as i32;
    let mantissa = (bits & 0x07) as f32;
    let magnitude = if exp_field == 0 {
        mantissa * 2f32.powi(1 - format.bias - MANTISSA_BITS)
    } else {
        (8.0 + mantissa) * 2f32.powi(exp_field - format.bias - MANTISSA_BITS)
    };

    if bits & 0x80 != 0 { -magnitude } else { magnitude }
}

// ============================================================================
// FP8E4M3FN Type
// ============================================================================

/// 8-bit float, E4M3, finite only with a signed zero.
///
/// Format: 1 sign + 4 exponent + 3 mantissa
/// - Bias: 7
/// - Range: [-448, 448]
/// - Smallest positive subnormal: 2^-9
#[derive(Copy, Clone, Default)]
#[repr(transparent)]
pub struct FP8E4M3FN(pub u8);

// Safety: FP8E4M3FN is a transparent wrapper around u8, which is Pod
unsafe impl Pod for FP8E4M3FN {}
unsafe impl Zeroable for FP8E4M3FN {}

impl FP8E4M3FN {
    /// Zero value
    pub const ZERO: Self = Self(0x00);
    /// One value (exp=0111, mant=000)
    pub const ONE: Self = Self(0x38);
    /// Largest finite value, 448
    pub const MAX: Self = Self(0x7E);
    /// Smallest positive normal, 2^-6
    pub const MIN_POSITIVE: Self = Self(0x08);
    /// NaN (exp=1111, mant=111)
    pub const NAN: Self = Self(0x7F);

    /// Create from raw bits
    #[inline]
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    /// Get raw bits
    #[inline]
    pub const fn to_bits(self) -> u8 {
        self.0
    }

    /// Encode with round-to-nearest-even, saturating at ±448
    #[inline]
    pub fn from_f32(x: f32) -> Self {
        Self(encode_e4m3(x, &FN))
    }

    /// Decode to f32
    #[inline]
    pub fn to_f32(self) -> f32 {
        decode_e4m3(self.0, &FN)
    }
}

impl_narrow_float!(FP8E4M3FN);

// ============================================================================
// FP8E4M3FNUZ Type
// ============================================================================

/// 8-bit float, E4M3, finite only with a single unsigned zero.
///
/// Format: 1 sign + 4 exponent + 3 mantissa
/// - Bias: 8
/// - Range: [-240, 240]
/// - `0x80` is NaN, `-0.0` encodes as `0x00`
#[derive(Copy, Clone, Default)]
#[repr(transparent)]
pub struct FP8E4M3FNUZ(pub u8);

// Safety: FP8E4M3FNUZ is a transparent wrapper around u8, which is Pod
unsafe impl Pod for FP8E4M3FNUZ {}
unsafe impl Zeroable for FP8E4M3FNUZ {}

impl FP8E4M3FNUZ {
    /// Zero value
    pub const ZERO: Self = Self(0x00);
    /// One value (exp=1000, mant=000)
    pub const ONE: Self = Self(0x40);
    /// Largest finite value, 240
    pub const MAX: Self = Self(0x7F);
    /// Smallest positive normal, 2^-7
    pub const MIN_POSITIVE: Self = Self(0x08);
    /// The only NaN encoding
    pub const NAN: Self = Self(0x80);

    /// Create from raw bits
    #[inline]
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    /// Get raw bits
    #[inline]
    pub const fn to_bits(self) -> u8 {
        self.0
    }

    /// Encode with round-to-nearest-even, saturating at ±240
    #[inline]
    pub fn from_f32(x: f32) -> Self {
        Self(encode_e4m3(x, &FNUZ))
    }

    /// Decode to f32
    #[inline]
    pub fn to_f32(self) -> f32 {
        decode_e4m3(self.0, &FNUZ)
    }
}

impl_narrow_float!(FP8E4M3FNUZ);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fn_constants() {
        assert_eq!(FP8E4M3FN::ZERO.to_f32(), 0.0);
        assert_eq!(FP8E4M3FN::ONE.to_f32(), 1.0);
        assert_eq!(FP8E4M3FN::MAX.to_f32(), 448.0);
        assert_eq!(FP8E4M3FN::MIN_POSITIVE.to_f32(), 0.015625);
        assert!(FP8E4M3FN::NAN.is_nan());
        assert!(FP8E4M3FN::from_bits(0xFF).is_nan());
    }

    #[test]
    fn test_fnuz_constants() {
        assert_eq!(FP8E4M3FNUZ::ZERO.to_f32(), 0.0);
        assert_eq!(FP8E4M3FNUZ::ONE.to_f32(), 1.0);
        assert_eq!(FP8E4M3FNUZ::MAX.to_f32(), 240.0);
        assert_eq!(FP8E4M3FNUZ::MIN_POSITIVE.to_f32(), 0.0078125);
        assert!(FP8E4M3FNUZ::NAN.is_nan());
        // 0xFF is an ordinary finite value in the fnuz layout
        assert_eq!(FP8E4M3FNUZ::from_bits(0xFF).to_f32(), -240.0);
    }

    #[test]
    fn test_exact_values_round_trip() {
        for &v in &[0.5f32, 1.0, 1.5, 2.0, 3.0, 12.0, -0.75, -6.0, 240.0] {
            assert_eq!(FP8E4M3FN::from_f32(v).to_f32(), v, "fn {v}");
            assert_eq!(FP8E4M3FNUZ::from_f32(v).to_f32(), v, "fnuz {v}");
        }
    }

    #[test]
    fn test_every_code_decodes_and_re_encodes() {
        for bits in 0..=u8::MAX {
            let fn_val = FP8E4M3FN::from_bits(bits);
            if !fn_val.is_nan() {
                assert_eq!(FP8E4M3FN::from_f32(fn_val.to_f32()).to_bits(), bits);
            }
            let fnuz_val = FP8E4M3FNUZ::from_bits(bits);
            if !fnuz_val.is_nan() {
                assert_eq!(FP8E4M3FNUZ::from_f32(fnuz_val.to_f32()).to_bits(), bits);
            }
        }
    }

    #[test]
    fn test_round_to_nearest_even() {
        // halfway between 1.0 and 1.125 goes to the even mantissa (1.0)
        assert_eq!(FP8E4M3FN::from_f32(1.0625).to_f32(), 1.0);
        // halfway between 1.125 and 1.25 goes to 1.25
        assert_eq!(FP8E4M3FN::from_f32(1.1875).to_f32(), 1.25);
        // just above halfway rounds up
        assert_eq!(FP8E4M3FNUZ::from_f32(1.07).to_f32(), 1.125);
        // mantissa overflow carries into the exponent
        assert_eq!(FP8E4M3FN::from_f32(1.97).to_f32(), 2.0);
    }

    #[test]
    fn test_subnormals() {
        assert_eq!(FP8E4M3FN::from_f32(2f32.powi(-9)).to_bits(), 0x01);
        assert_eq!(FP8E4M3FNUZ::from_f32(2f32.powi(-10)).to_bits(), 0x01);
        assert_eq!(FP8E4M3FN::from_bits(0x07).to_f32(), 7.0 * 2f32.powi(-9));
        // below half the smallest subnormal flushes to zero
        assert_eq!(FP8E4M3FN::from_f32(2f32.powi(-11)).to_bits(), 0x00);
        // the largest subnormal rounds up into the first normal
        assert_eq!(FP8E4M3FN::from_f32(7.8 * 2f32.powi(-9)).to_bits(), 0x08);
    }

    #[test]
    fn test_saturation() {
        assert_eq!(FP8E4M3FN::from_f32(1000.0).to_bits(), 0x7E);
        assert_eq!(FP8E4M3FN::from_f32(-1000.0).to_bits(), 0xFE);
        assert_eq!(FP8E4M3FN::from_f32(460.0).to_f32(), 448.0);
        assert_eq!(FP8E4M3FN::from_f32(f32::INFINITY).to_f32(), 448.0);
        assert_eq!(FP8E4M3FNUZ::from_f32(1000.0).to_f32(), 240.0);
        assert_eq!(FP8E4M3FNUZ::from_f32(f32::NEG_INFINITY).to_f32(), -240.0);
    }

    #[test]
    fn test_zero_and_nan_encoding() {
        assert_eq!(FP8E4M3FN::from_f32(-0.0).to_bits(), 0x80);
        assert_eq!(FP8E4M3FNUZ::from_f32(-0.0).to_bits(), 0x00);
        assert_eq!(FP8E4M3FNUZ::from_f32(-1e-9).to_bits(), 0x00);
        assert_eq!(FP8E4M3FN::from_f32(f32::NAN).to_bits(), 0x7F);
        assert_eq!(FP8E4M3FNUZ::from_f32(f32::NAN).to_bits(), 0x80);
    }

    #[test]
    fn test_arithmetic_and_compare() {
        let a = FP8E4M3FN::from(2);
        let b = FP8E4M3FN::from(0.5f32);
        assert_eq!((a * b).to_f32(), 1.0);
        assert_eq!((a / b).to_f32(), 4.0);
        let mut c = FP8E4M3FNUZ::from(200u8);
        c += FP8E4M3FNUZ::from(200u8);
        assert_eq!(c.to_f32(), 240.0);
        assert!(FP8E4M3FNUZ::from(-1) < FP8E4M3FNUZ::ZERO);
        assert_eq!(FP8E4M3FN::ZERO, FP8E4M3FN::from_f32(-0.0));
        assert_ne!(FP8E4M3FN::NAN, FP8E4M3FN::NAN);
        assert_eq!(-FP8E4M3FNUZ::ZERO, FP8E4M3FNUZ::ZERO);
    }

    #[test]
    fn test_rounding_ops() {
        assert_eq!(FP8E4M3FN::from_f32(2.5).round().to_f32(), 3.0);
        assert_eq!(FP8E4M3FNUZ::from_f32(-2.5).round().to_f32(), -3.0);
        assert_eq!(FP8E4M3FN::from_f32(1.25).ceil().to_f32(), 2.0);
        assert_eq!(FP8E4M3FNUZ::from_f32(-1.25).floor().to_f32(), -2.0);
        assert_eq!(FP8E4M3FN::from_f32(-1.75).trunc().to_f32(), -1.0);
    }

    #[test]
    fn test_bytemuck_cast() {
        let values = [FP8E4M3FN::ONE, FP8E4M3FN::MAX];
        let bytes: &[u8] = bytemuck::cast_slice(&values);
        assert_eq!(bytes, &[0x38, 0x7E]);
    }
}
