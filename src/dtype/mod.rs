//! Data type system for host arrays
//!
//! This module provides the `DType` enum describing every element encoding the
//! engine understands, the narrow float value types that back some of them, and
//! the promotion rule used by mixed-type arithmetic.

mod bf16;
mod element;
pub mod fp8;
mod narrow;
mod promotion;

pub use bf16::BF16;
pub use element::{Element, cast};
pub use fp8::{FP8E4M3FN, FP8E4M3FNUZ};
pub use promotion::{promote, promotion_rank};

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

// ============================================================================
// DType Enum
// ============================================================================

/// Element types a device array can hold
///
/// # Discriminant Values (Serialization Stability)
///
/// The discriminant values are **stable**:
/// - Floats: 0-9 (F64=0, F32=1, F16=2, BF16=3, FP8E4M3FN=4, FP8E4M3FNUZ=5)
/// - Signed ints: 10-19 (I64=10, I32=11, I16=12, I8=13, I4=14)
/// - Unsigned ints: 20-29 (U64=20, U32=21, U16=22, U8=23, U4=24)
/// - Bool: 30
/// - Complex: 40-49 (Complex64=40, Complex128=41)
///
/// All discriminants stay below 64 so that [`DTypeSet`] fits in one word.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
#[repr(u8)]
pub enum DType {
    // Floating point types (0-9)
    /// 64-bit floating point
    F64 = 0,
    /// 32-bit floating point
    F32 = 1,
    /// 16-bit floating point (IEEE 754)
    F16 = 2,
    /// 16-bit brain floating point, truncating encode
    BF16 = 3,
    /// 8-bit float, 4 exponent / 3 mantissa bits, finite only, range [-448, 448]
    FP8E4M3FN = 4,
    /// 8-bit float, 4 exponent / 3 mantissa bits, unsigned zero, range [-240, 240]
    FP8E4M3FNUZ = 5,

    // Signed integer types
    /// 64-bit signed integer
    I64 = 10,
    /// 32-bit signed integer
    I32 = 11,
    /// 16-bit signed integer
    I16 = 12,
    /// 8-bit signed integer
    I8 = 13,
    /// 4-bit signed integer, stored one per byte
    I4 = 14,

    // Unsigned integer types
    /// 64-bit unsigned integer
    U64 = 20,
    /// 32-bit unsigned integer
    U32 = 21,
    /// 16-bit unsigned integer
    U16 = 22,
    /// 8-bit unsigned integer
    U8 = 23,
    /// 4-bit unsigned integer, stored one per byte
    U4 = 24,

    /// Boolean type (8-bit storage)
    Bool = 30,

    // Complex types
    /// 64-bit complex (two f32: re, im)
    Complex64 = 40,
    /// 128-bit complex (two f64: re, im)
    Complex128 = 41,
}

/// Numeric category of a dtype, ordered by promotion strength
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DTypeCategory {
    /// Boolean
    Bool,
    /// Signed or unsigned integer
    Integer,
    /// Floating point, including narrow floats
    Float,
    /// Complex floating point
    Complex,
}

impl DTypeCategory {
    /// Weight added to the bit count when ranking dtypes for promotion
    #[inline]
    pub const fn promotion_weight(self) -> u32 {
        match self {
            Self::Bool => 1000,
            Self::Integer => 2000,
            Self::Float => 4000,
            Self::Complex => 8000,
        }
    }
}

impl DType {
    /// Every dtype, in discriminant order
    pub const ALL: [DType; 19] = [
        Self::F64,
        Self::F32,
        Self::F16,
        Self::BF16,
        Self::FP8E4M3FN,
        Self::FP8E4M3FNUZ,
        Self::I64,
        Self::I32,
        Self::I16,
        Self::I8,
        Self::I4,
        Self::U64,
        Self::U32,
        Self::U16,
        Self::U8,
        Self::U4,
        Self::Bool,
        Self::Complex64,
        Self::Complex128,
    ];

    /// Width of one element in bits
    #[inline]
    pub const fn bit_count(self) -> usize {
        match self {
            Self::Complex128 => 128,
            Self::F64 | Self::I64 | Self::U64 | Self::Complex64 => 64,
            Self::F32 | Self::I32 | Self::U32 => 32,
            Self::F16 | Self::BF16 | Self::I16 | Self::U16 => 16,
            Self::FP8E4M3FN | Self::FP8E4M3FNUZ | Self::I8 | Self::U8 | Self::Bool => 8,
            Self::I4 | Self::U4 => 4,
        }
    }

    /// Size of one element in bytes (dense byte count, rounded up)
    #[inline]
    pub const fn size_in_bytes(self) -> usize {
        self.bit_count().div_ceil(8)
    }

    /// Returns true if elements are whole 1, 2, 4 or 8 byte cells
    #[inline]
    pub const fn is_byte_aligned(self) -> bool {
        self.bit_count() % 8 == 0 && matches!(self.size_in_bytes(), 1 | 2 | 4 | 8)
    }

    /// Numeric category
    #[inline]
    pub const fn category(self) -> DTypeCategory {
        match self {
            Self::Bool => DTypeCategory::Bool,
            Self::I64
            | Self::I32
            | Self::I16
            | Self::I8
            | Self::I4
            | Self::U64
            | Self::U32
            | Self::U16
            | Self::U8
            | Self::U4 => DTypeCategory::Integer,
            Self::F64
            | Self::F32
            | Self::F16
            | Self::BF16
            | Self::FP8E4M3FN
            | Self::FP8E4M3FNUZ => DTypeCategory::Float,
            Self::Complex64 | Self::Complex128 => DTypeCategory::Complex,
        }
    }

    /// Returns true if this is a floating point type
    #[inline]
    pub const fn is_float(self) -> bool {
        matches!(self.category(), DTypeCategory::Float)
    }

    /// Returns true if this is a complex number type
    #[inline]
    pub const fn is_complex(self) -> bool {
        matches!(self.category(), DTypeCategory::Complex)
    }

    /// Returns true if this is a signed integer type
    #[inline]
    pub const fn is_signed_int(self) -> bool {
        matches!(self, Self::I64 | Self::I32 | Self::I16 | Self::I8 | Self::I4)
    }

    /// Returns true if this is an unsigned integer type
    #[inline]
    pub const fn is_unsigned_int(self) -> bool {
        matches!(self, Self::U64 | Self::U32 | Self::U16 | Self::U8 | Self::U4)
    }

    /// Returns true if this is any integer type (signed or unsigned)
    #[inline]
    pub const fn is_int(self) -> bool {
        self.is_signed_int() || self.is_unsigned_int()
    }

    /// Returns true if this is a boolean type
    #[inline]
    pub const fn is_bool(self) -> bool {
        matches!(self, Self::Bool)
    }

    /// Smallest and largest value of an integer dtype
    pub const fn int_bounds(self) -> Option<(i128, i128)> {
        match self {
            Self::I64 => Some((i64::MIN as i128, i64::MAX as i128)),
            Self::I32 => Some((i32::MIN as i128, i32::MAX as i128)),
            Self::I16 => Some((i16::MIN as i128, i16::MAX as i128)),
            Self::I8 => Some((i8::MIN as i128, i8::MAX as i128)),
            Self::I4 => Some((-8, 7)),
            Self::U64 => Some((0, u64::MAX as i128)),
            Self::U32 => Some((0, u32::MAX as i128)),
            Self::U16 => Some((0, u16::MAX as i128)),
            Self::U8 => Some((0, u8::MAX as i128)),
            Self::U4 => Some((0, 15)),
            _ => None,
        }
    }

    /// Symbolic name (e.g. "float32", "float8_e4m3fnuz")
    pub const fn name(self) -> &'static str {
        match self {
            Self::F64 => "float64",
            Self::F32 => "float32",
            Self::F16 => "float16",
            Self::BF16 => "bfloat16",
            Self::FP8E4M3FN => "float8_e4m3fn",
            Self::FP8E4M3FNUZ => "float8_e4m3fnuz",
            Self::I64 => "int64",
            Self::I32 => "int32",
            Self::I16 => "int16",
            Self::I8 => "int8",
            Self::I4 => "int4",
            Self::U64 => "uint64",
            Self::U32 => "uint32",
            Self::U16 => "uint16",
            Self::U8 => "uint8",
            Self::U4 => "uint4",
            Self::Bool => "bool8",
            Self::Complex64 => "complex64",
            Self::Complex128 => "complex128",
        }
    }

    /// Look a dtype up by its symbolic name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|dtype| dtype.name() == name)
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s)
            .ok_or_else(|| Error::invalid_argument("dtype", format!("unknown dtype name '{s}'")))
    }
}

// ============================================================================
// DType Sets
// ============================================================================

/// Set of dtypes for efficient membership testing
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DTypeSet {
    bits: u64,
}

impl DTypeSet {
    /// Empty set
    pub const EMPTY: Self = Self { bits: 0 };

    /// Narrow floats: bfloat16 and both 8-bit variants
    pub const NARROW_FLOATS: Self = Self::EMPTY
        .with(DType::BF16)
        .with(DType::FP8E4M3FN)
        .with(DType::FP8E4M3FNUZ);

    /// Narrow floats plus float16 and float32
    pub const REDUCED_FLOATS: Self = Self::NARROW_FLOATS.with(DType::F16).with(DType::F32);

    /// All floating point types with a host element type
    pub const FLOATS: Self = Self::REDUCED_FLOATS.with(DType::F64);

    /// Byte-aligned signed integers
    pub const SIGNED_INTS: Self = Self::EMPTY
        .with(DType::I64)
        .with(DType::I32)
        .with(DType::I16)
        .with(DType::I8);

    /// Byte-aligned unsigned integers
    pub const UNSIGNED_INTS: Self = Self::EMPTY
        .with(DType::U64)
        .with(DType::U32)
        .with(DType::U16)
        .with(DType::U8);

    /// Byte-aligned integers
    pub const INTS: Self = Self::SIGNED_INTS.union(Self::UNSIGNED_INTS);

    /// Floats plus byte-aligned integers
    pub const NUMERIC: Self = Self::FLOATS.union(Self::INTS);

    /// Create a set containing a single dtype
    #[inline]
    pub const fn single(dtype: DType) -> Self {
        Self {
            bits: 1 << dtype as u8,
        }
    }

    /// Copy of this set with `dtype` added
    #[inline]
    pub const fn with(self, dtype: DType) -> Self {
        self.union(Self::single(dtype))
    }

    /// Check if the set contains a dtype
    #[inline]
    pub const fn contains(self, dtype: DType) -> bool {
        self.bits & (1 << dtype as u8) != 0
    }

    /// Union of two sets
    #[inline]
    pub const fn union(self, other: Self) -> Self {
        Self {
            bits: self.bits | other.bits,
        }
    }

    /// Check if set is empty
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.bits == 0
    }

    /// Members of the set in discriminant order
    pub fn iter(self) -> impl Iterator<Item = DType> {
        DType::ALL.into_iter().filter(move |d| self.contains(*d))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dtype_size() {
        assert_eq!(DType::F64.size_in_bytes(), 8);
        assert_eq!(DType::BF16.size_in_bytes(), 2);
        assert_eq!(DType::FP8E4M3FNUZ.size_in_bytes(), 1);
        assert_eq!(DType::Bool.size_in_bytes(), 1);
        assert_eq!(DType::Complex128.size_in_bytes(), 16);
        // sub-byte types still occupy a whole byte
        assert_eq!(DType::I4.size_in_bytes(), 1);
    }

    #[test]
    fn test_byte_alignment() {
        assert!(DType::U8.is_byte_aligned());
        assert!(DType::F64.is_byte_aligned());
        assert!(DType::Complex64.is_byte_aligned());
        assert!(!DType::I4.is_byte_aligned());
        assert!(!DType::U4.is_byte_aligned());
        assert!(!DType::Complex128.is_byte_aligned());
    }

    #[test]
    fn test_dtype_categories() {
        assert_eq!(DType::FP8E4M3FN.category(), DTypeCategory::Float);
        assert_eq!(DType::U4.category(), DTypeCategory::Integer);
        assert_eq!(DType::Bool.category(), DTypeCategory::Bool);
        assert!(DType::I32.is_signed_int());
        assert!(DType::U32.is_unsigned_int());
        assert!(!DType::F32.is_int());
        assert!(DTypeCategory::Bool < DTypeCategory::Integer);
        assert!(DTypeCategory::Float < DTypeCategory::Complex);
    }

    #[test]
    fn test_names_round_trip() {
        for dtype in DType::ALL {
            assert_eq!(DType::from_name(dtype.name()), Some(dtype));
            assert_eq!(dtype.to_string().parse::<DType>().ok(), Some(dtype));
        }
        assert!("float128".parse::<DType>().is_err());
    }

    #[test]
    fn test_int_bounds() {
        assert_eq!(DType::U8.int_bounds(), Some((0, 255)));
        assert_eq!(DType::I16.int_bounds(), Some((-32768, 32767)));
        assert_eq!(DType::F32.int_bounds(), None);
    }

    #[test]
    fn test_dtype_set() {
        assert!(DTypeSet::REDUCED_FLOATS.contains(DType::FP8E4M3FNUZ));
        assert!(!DTypeSet::REDUCED_FLOATS.contains(DType::F64));
        assert!(DTypeSet::NUMERIC.contains(DType::U64));
        assert!(!DTypeSet::NUMERIC.contains(DType::Bool));
        assert!(!DTypeSet::NUMERIC.contains(DType::I4));
        assert_eq!(DTypeSet::NARROW_FLOATS.iter().count(), 3);
        assert!(DTypeSet::EMPTY.is_empty());
    }
}
