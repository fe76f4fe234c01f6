//! Shared operator surface for the narrow float value types
//!
//! Every narrow float is a plain bit cell with an f32 codec. Arithmetic,
//! comparison and rounding decode both sides to f32, compute there and
//! re-encode, so the types can be dropped into generic kernels next to the
//! native floats.

/// Implement the f32-mediated operator set for a narrow float type.
///
/// The type must provide `from_f32(f32) -> Self` and `to_f32(self) -> f32`.
macro_rules! impl_narrow_float {
    ($name:ident) => {
        impl $name {
            /// Convert from f64 (through f32)
            #[inline]
            pub fn from_f64(x: f64) -> Self {
                Self::from_f32(x as f32)
            }

            /// Convert to f64
            #[inline]
            pub fn to_f64(self) -> f64 {
                self.to_f32() as f64
            }

            /// Check if this value is NaN
            #[inline]
            pub fn is_nan(self) -> bool {
                self.to_f32().is_nan()
            }

            /// Round half away from zero
            #[inline]
            pub fn round(self) -> Self {
                Self::from_f32(self.to_f32().round())
            }

            /// Round toward positive infinity
            #[inline]
            pub fn ceil(self) -> Self {
                Self::from_f32(self.to_f32().ceil())
            }

            /// Round toward negative infinity
            #[inline]
            pub fn floor(self) -> Self {
                Self::from_f32(self.to_f32().floor())
            }

            /// Round toward zero
            #[inline]
            pub fn trunc(self) -> Self {
                Self::from_f32(self.to_f32().trunc())
            }
        }

        impl ::std::fmt::Debug for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                write!(f, "{}({})", stringify!($name), self.to_f32())
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                write!(f, "{}", self.to_f32())
            }
        }

        impl PartialEq for $name {
            #[inline]
            fn eq(&self, other: &Self) -> bool {
                self.to_f32() == other.to_f32()
            }
        }

        impl PartialOrd for $name {
            #[inline]
            fn partial_cmp(&self, other: &Self) -> Option<::std::cmp::Ordering> {
                self.to_f32().partial_cmp(&other.to_f32())
            }
        }

        impl ::std::ops::Neg for $name {
            type Output = Self;
            #[inline]
            fn neg(self) -> Self {
                Self::from_f32(-self.to_f32())
            }
        }

        impl_narrow_float!(@binary $name, Add, add, AddAssign, add_assign, +);
        impl_narrow_float!(@binary $name, Sub, sub, SubAssign, sub_assign, -);
        impl_narrow_float!(@binary $name, Mul, mul, MulAssign, mul_assign, *);
        impl_narrow_float!(@binary $name, Div, div, DivAssign, div_assign, /);

        impl From<$name> for f32 {
            #[inline]
            fn from(x: $name) -> f32 {
                x.to_f32()
            }
        }

        impl From<$name> for f64 {
            #[inline]
            fn from(x: $name) -> f64 {
                x.to_f64()
            }
        }

        impl From<f32> for $name {
            #[inline]
            fn from(x: f32) -> Self {
                Self::from_f32(x)
            }
        }

        impl From<::half::f16> for $name {
            #[inline]
            fn from(x: ::half::f16) -> Self {
                Self::from_f32(x.to_f32())
            }
        }

        impl From<bool> for $name {
            #[inline]
            fn from(x: bool) -> Self {
                Self::from_f32(u8::from(x) as f32)
            }
        }

        impl_narrow_float!(@from_host $name, f64, i8, i16, i32, i64, u8, u16, u32, u64);
    };

    (@binary $name:ident, $op:ident, $method:ident, $assign:ident, $assign_method:ident, $sym:tt) => {
        impl ::std::ops::$op for $name {
            type Output = Self;
            #[inline]
            fn $method(self, rhs: Self) -> Self {
                Self::from_f32(self.to_f32() $sym rhs.to_f32())
            }
        }

        impl ::std::ops::$assign for $name {
            #[inline]
            fn $assign_method(&mut self, rhs: Self) {
                *self = Self::from_f32(self.to_f32() $sym rhs.to_f32());
            }
        }
    };

    (@from_host $name:ident, $($host:ty),*) => {
        $(
            impl From<$host> for $name {
                #[inline]
                fn from(x: $host) -> Self {
                    Self::from_f32(x as f32)
                }
            }
        )*
    };
}

pub(crate) use impl_narrow_float;
