//! Element trait for mapping Rust types to DType

use super::{BF16, DType, FP8E4M3FN, FP8E4M3FNUZ};
use bytemuck::{Pod, Zeroable};
use half::f16;
use std::fmt::Debug;
use std::ops::{Add, Div, Mul, Sub};

/// Trait for types that can be elements of a device array
///
/// Connects a Rust element type to its runtime [`DType`]. Every dtype a kernel
/// can be instantiated for has exactly one implementor.
///
/// # Bounds
/// - `Pod + Zeroable` - dense buffers are reinterpreted with bytemuck
/// - `Add + Sub + Mul + Div` - native arithmetic (Output = Self)
/// - `PartialOrd` - comparison for argmax/argpartition
pub trait Element:
    Copy
    + Send
    + Sync
    + Pod
    + Zeroable
    + Debug
    + 'static
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + PartialOrd
{
    /// The corresponding DType for this Rust type
    const DTYPE: DType;

    /// Convert to f64 for generic numeric operations
    fn to_f64(self) -> f64;

    /// Convert from f64 to this type
    ///
    /// Integers use `as` semantics: truncate toward zero, saturate at the
    /// bounds, NaN becomes 0. Narrow floats encode through f32.
    fn from_f64(v: f64) -> Self;

    /// Integer value; floats truncate toward zero and saturate
    fn to_i128(self) -> i128;

    /// Convert from an integer value
    ///
    /// Integers keep the low bits (wrapping like `as`), floats round to the
    /// nearest representable value.
    fn from_i128(v: i128) -> Self;

    /// Addition that wraps on integer overflow
    fn wrapping_add(self, rhs: Self) -> Self;

    /// Subtraction that wraps on integer overflow
    fn wrapping_sub(self, rhs: Self) -> Self;

    /// Multiplication that wraps on integer overflow
    fn wrapping_mul(self, rhs: Self) -> Self;

    /// Division that wraps on integer overflow
    ///
    /// Integer division by zero yields zero; callers reject zero divisors
    /// before dispatching.
    fn wrapping_div(self, rhs: Self) -> Self;

    /// Zero value
    fn zero() -> Self;

    /// One value
    fn one() -> Self;
}

/// Static numeric cast between two element types
///
/// Integer sources go through `i128`: integer targets keep the low bits and
/// float targets round once. Float sources go through f64.
#[inline]
pub fn cast<S: Element, D: Element>(value: S) -> D {
    if S::DTYPE.is_int() {
        D::from_i128(value.to_i128())
    } else {
        D::from_f64(value.to_f64())
    }
}

macro_rules! impl_int_element {
    ($($ty:ty => $dtype:ident),* $(,)?) => {
        $(
            impl Element for $ty {
                const DTYPE: DType = DType::$dtype;

                #[inline]
                fn to_f64(self) -> f64 {
                    self as f64
                }

                #[inline]
                fn from_f64(v: f64) -> Self {
                    v as $ty
                }

                #[inline]
                fn to_i128(self) -> i128 {
                    self as i128
                }

                #[inline]
                fn from_i128(v: i128) -> Self {
                    v as $ty
                }

                #[inline]
                fn wrapping_add(self, rhs: Self) -> Self {
                    <$ty>::wrapping_add(self, rhs)
                }

                #[inline]
                fn wrapping_sub(self, rhs: Self) -> Self {
                    <$ty>::wrapping_sub(self, rhs)
                }

                #[inline]
                fn wrapping_mul(self, rhs: Self) -> Self {
                    <$ty>::wrapping_mul(self, rhs)
                }

                #[inline]
                fn wrapping_div(self, rhs: Self) -> Self {
                    if rhs == 0 { 0 } else { <$ty>::wrapping_div(self, rhs) }
                }

                #[inline]
                fn zero() -> Self {
                    0
                }

                #[inline]
                fn one() -> Self {
                    1
                }
            }
        )*
    };
}

impl_int_element!(
    i64 => I64,
    i32 => I32,
    i16 => I16,
    i8 => I8,
    u64 => U64,
    u32 => U32,
    u16 => U16,
    u8 => U8,
);

/// Floats whose arithmetic operators already have IEEE semantics
macro_rules! impl_float_element {
    ($($ty:ty => $dtype:ident, $to_f64:expr, $from_f64:expr, $from_i128:expr, $zero:expr, $one:expr);* $(;)?) => {
        $(
            impl Element for $ty {
                const DTYPE: DType = DType::$dtype;

                #[inline]
                fn to_f64(self) -> f64 {
                    ($to_f64)(self)
                }

                #[inline]
                fn from_f64(v: f64) -> Self {
                    ($from_f64)(v)
                }

                #[inline]
                fn to_i128(self) -> i128 {
                    self.to_f64() as i128
                }

                #[inline]
                fn from_i128(v: i128) -> Self {
                    ($from_i128)(v)
                }

                #[inline]
                fn wrapping_add(self, rhs: Self) -> Self {
                    self + rhs
                }

                #[inline]
                fn wrapping_sub(self, rhs: Self) -> Self {
                    self - rhs
                }

                #[inline]
                fn wrapping_mul(self, rhs: Self) -> Self {
                    self * rhs
                }

                #[inline]
                fn wrapping_div(self, rhs: Self) -> Self {
                    self / rhs
                }

                #[inline]
                fn zero() -> Self {
                    $zero
                }

                #[inline]
                fn one() -> Self {
                    $one
                }
            }
        )*
    };
}

impl_float_element!(
    f64 => F64, |x: f64| x, |v: f64| v, |v: i128| v as f64, 0.0, 1.0;
    f32 => F32, |x: f32| x as f64, |v: f64| v as f32, |v: i128| v as f32, 0.0, 1.0;
    f16 => F16, |x: f16| x.to_f64(), f16::from_f64, |v: i128| f16::from_f64(v as f64), f16::ZERO, f16::ONE;
    BF16 => BF16, BF16::to_f64, BF16::from_f64, |v: i128| BF16::from_f64(v as f64), BF16::ZERO, BF16::ONE;
    FP8E4M3FN => FP8E4M3FN, FP8E4M3FN::to_f64, FP8E4M3FN::from_f64, |v: i128| FP8E4M3FN::from_f64(v as f64), FP8E4M3FN::ZERO, FP8E4M3FN::ONE;
    FP8E4M3FNUZ => FP8E4M3FNUZ, FP8E4M3FNUZ::to_f64, FP8E4M3FNUZ::from_f64, |v: i128| FP8E4M3FNUZ::from_f64(v as f64), FP8E4M3FNUZ::ZERO, FP8E4M3FNUZ::ONE;
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dtype_tags() {
        assert_eq!(<f32 as Element>::DTYPE, DType::F32);
        assert_eq!(<f16 as Element>::DTYPE, DType::F16);
        assert_eq!(<BF16 as Element>::DTYPE, DType::BF16);
        assert_eq!(<FP8E4M3FNUZ as Element>::DTYPE, DType::FP8E4M3FNUZ);
        assert_eq!(<u16 as Element>::DTYPE, DType::U16);
    }

    #[test]
    fn test_float_to_int_saturates() {
        assert_eq!(<u8 as Element>::from_f64(300.0), 255);
        assert_eq!(<i8 as Element>::from_f64(-300.0), -128);
        assert_eq!(<i32 as Element>::from_f64(f64::NAN), 0);
        assert_eq!(<i32 as Element>::from_f64(-1.7), -1);
    }

    #[test]
    fn test_cast_int_to_int_wraps() {
        assert_eq!(cast::<i32, u8>(257), 1);
        assert_eq!(cast::<i16, u16>(-1), u16::MAX);
        assert_eq!(cast::<u64, i64>(u64::MAX), -1);
        // large values survive without a detour through f64
        assert_eq!(cast::<i64, u64>(i64::MAX), i64::MAX as u64);
    }

    #[test]
    fn test_cast_through_float() {
        assert_eq!(cast::<f32, i32>(3.9), 3);
        assert_eq!(cast::<i32, f32>(-7), -7.0);
        assert_eq!(cast::<f32, BF16>(1.0).to_bits(), 0x3F80);
        assert_eq!(cast::<FP8E4M3FN, f16>(FP8E4M3FN::MAX), f16::from_f32(448.0));
    }

    #[test]
    fn test_cast_wide_int_to_f32_rounds_once() {
        // 2^61 + 2^37 + 1 sits just above an f32 tie; an f64 hop lands on the tie
        let v: i64 = (1 << 61) + (1 << 37) + 1;
        assert_eq!(cast::<i64, f32>(v), v as f32);
        assert_eq!(cast::<i64, f32>(v), ((1u64 << 61) + (1u64 << 38)) as f32);
        assert_eq!(cast::<u64, f32>(v as u64), v as f32);
        assert_eq!(cast::<i64, f64>(v), v as f64);
    }

    #[test]
    fn test_wrapping_arithmetic() {
        assert_eq!(Element::wrapping_add(250u8, 10u8), 4);
        assert_eq!(Element::wrapping_sub(0u32, 1u32), u32::MAX);
        assert_eq!(Element::wrapping_mul(i8::MAX, 2i8), -2);
        assert_eq!(Element::wrapping_div(i32::MIN, -1i32), i32::MIN);
        assert_eq!(Element::wrapping_div(7i64, 0i64), 0);
        assert_eq!(Element::wrapping_div(1.0f32, 0.0f32), f32::INFINITY);
    }
}
