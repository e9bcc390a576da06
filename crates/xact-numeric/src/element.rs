//! Numeric kinds
//!
//! The scalar contract every array, view and expression is generic over.
//! Arithmetic is only defined between values of the same kind; moving a value
//! to another kind goes through [`cast`], which reports values the target
//! cannot represent.
//!
//! # Kinds
//!
//! | Kind | Rust type | Integral | Real |
//! |------|-----------|----------|------|
//! | `Int8`..`Int64` | `i8`..`i64` | yes | no |
//! | `UInt8`..`UInt64` | `u8`..`u64` | yes | no |
//! | `Float32`, `Float64` | `f32`, `f64` | no | yes |
//!
//! Modulo and shifts require [`Integral`]; fused multiply-add,
//! transcendentals and the compensated algorithms require [`Real`].

use std::fmt;

use num_traits::{Float, Num, NumCast, PrimInt};

use crate::error::{NumericError, Result};

/// Numeric kind tags.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Kind {
    /// 8-bit signed integer.
    Int8,
    /// 16-bit signed integer.
    Int16,
    /// 32-bit signed integer.
    Int32,
    /// 64-bit signed integer.
    Int64,
    /// 8-bit unsigned integer.
    UInt8,
    /// 16-bit unsigned integer.
    UInt16,
    /// 32-bit unsigned integer.
    UInt32,
    /// 64-bit unsigned integer.
    UInt64,
    /// 32-bit floating point.
    Float32,
    /// 64-bit floating point.
    Float64,
}

impl Kind {
    /// Returns the size in bytes of one value.
    #[must_use]
    pub const fn size_bytes(self) -> usize {
        match self {
            Self::Int8 | Self::UInt8 => 1,
            Self::Int16 | Self::UInt16 => 2,
            Self::Int32 | Self::UInt32 | Self::Float32 => 4,
            Self::Int64 | Self::UInt64 | Self::Float64 => 8,
        }
    }

    /// Returns true for floating-point kinds.
    #[must_use]
    pub const fn is_float(self) -> bool {
        matches!(self, Self::Float32 | Self::Float64)
    }

    /// Returns true for integer kinds.
    #[must_use]
    pub const fn is_integer(self) -> bool {
        !self.is_float()
    }

    /// Returns true for kinds that can hold negative values.
    #[must_use]
    pub const fn is_signed(self) -> bool {
        !matches!(
            self,
            Self::UInt8 | Self::UInt16 | Self::UInt32 | Self::UInt64
        )
    }

    /// Short name of the kind, as spelled in Rust.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Int8 => "i8",
            Self::Int16 => "i16",
            Self::Int32 => "i32",
            Self::Int64 => "i64",
            Self::UInt8 => "u8",
            Self::UInt16 => "u16",
            Self::UInt32 => "u32",
            Self::UInt64 => "u64",
            Self::Float32 => "f32",
            Self::Float64 => "f64",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A numeric value usable as an array element.
pub trait Element:
    Copy + PartialOrd + fmt::Debug + fmt::Display + Num + NumCast + Send + Sync + 'static
{
    /// Kind tag of the implementing type.
    const KIND: Kind;

    /// Absolute value; the identity on unsigned kinds.
    fn magnitude(self) -> Self;
}

/// Integer kinds: modulo and shifts are defined.
pub trait Integral: Element + PrimInt {}

/// Floating-point kinds: fused multiply-add, transcendentals and the
/// compensated algorithms are defined.
pub trait Real: Element + Float {
    /// Converts an element count into this kind for averaging.
    fn from_count(n: usize) -> Self;
}

macro_rules! impl_signed {
    ($($t:ty => $kind:ident),* $(,)?) => {
        $(
            impl Element for $t {
                const KIND: Kind = Kind::$kind;

                #[inline]
                fn magnitude(self) -> Self {
                    self.abs()
                }
            }

            impl Integral for $t {}
        )*
    };
}

macro_rules! impl_unsigned {
    ($($t:ty => $kind:ident),* $(,)?) => {
        $(
            impl Element for $t {
                const KIND: Kind = Kind::$kind;

                #[inline]
                fn magnitude(self) -> Self {
                    self
                }
            }

            impl Integral for $t {}
        )*
    };
}

macro_rules! impl_real {
    ($($t:ty => $kind:ident),* $(,)?) => {
        $(
            impl Element for $t {
                const KIND: Kind = Kind::$kind;

                #[inline]
                fn magnitude(self) -> Self {
                    self.abs()
                }
            }

            impl Real for $t {
                #[inline]
                fn from_count(n: usize) -> Self {
                    n as $t
                }
            }
        )*
    };
}

impl_signed!(i8 => Int8, i16 => Int16, i32 => Int32, i64 => Int64);
impl_unsigned!(u8 => UInt8, u16 => UInt16, u32 => UInt32, u64 => UInt64);
impl_real!(f32 => Float32, f64 => Float64);

/// Explicitly converts a value to another kind.
///
/// Fails with [`NumericError::CastOverflow`] when the value has no
/// representation in the target kind (out of range, or NaN to an integer).
/// Float to integer conversion truncates toward zero.
pub fn cast<T: Element, U: Element>(value: T) -> Result<U> {
    <U as NumCast>::from(value).ok_or(NumericError::CastOverflow {
        from: T::KIND,
        to: U::KIND,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_sizes() {
        assert_eq!(Kind::Int8.size_bytes(), 1);
        assert_eq!(Kind::UInt16.size_bytes(), 2);
        assert_eq!(Kind::Float32.size_bytes(), 4);
        assert_eq!(Kind::Float64.size_bytes(), 8);
    }

    #[test]
    fn test_kind_classes() {
        assert!(Kind::Float64.is_float());
        assert!(!Kind::Float64.is_integer());
        assert!(Kind::UInt32.is_integer());
        assert!(!Kind::UInt32.is_signed());
        assert!(Kind::Int32.is_signed());
        assert!(Kind::Float32.is_signed());
    }

    #[test]
    fn test_kind_tags() {
        assert_eq!(<i32 as Element>::KIND, Kind::Int32);
        assert_eq!(<u64 as Element>::KIND, Kind::UInt64);
        assert_eq!(<f32 as Element>::KIND, Kind::Float32);
        assert_eq!(Kind::Float64.to_string(), "f64");
    }

    #[test]
    fn test_magnitude() {
        assert_eq!((-3i32).magnitude(), 3);
        assert_eq!(7u8.magnitude(), 7);
        assert_eq!((-2.5f64).magnitude(), 2.5);
    }

    #[test]
    fn test_cast_in_range() {
        let v: i8 = cast(42i64).unwrap();
        assert_eq!(v, 42);

        let v: f64 = cast(3i32).unwrap();
        assert_eq!(v, 3.0);

        let v: i32 = cast(2.75f64).unwrap();
        assert_eq!(v, 2);
    }

    #[test]
    fn test_cast_overflow() {
        let err = cast::<i64, i8>(300).unwrap_err();
        assert_eq!(
            err,
            NumericError::CastOverflow {
                from: Kind::Int64,
                to: Kind::Int8,
            }
        );

        assert!(cast::<i32, u32>(-1).is_err());
        assert!(cast::<f64, i64>(f64::NAN).is_err());
    }

    #[test]
    fn test_from_count() {
        assert_eq!(f64::from_count(6), 6.0);
        assert_eq!(f32::from_count(3), 3.0);
    }
}
