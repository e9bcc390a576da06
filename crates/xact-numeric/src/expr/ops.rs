//! Elementwise operators.
//!
//! Each operator is a small `Copy` value implementing [`BinaryOp`] or
//! [`UnaryOp`] for the element kinds it supports. The operator is fixed when
//! a node is built, so dispatch is static; [`OpTag`] names it at run time for
//! inspection and logging.

use std::fmt;
use std::ops::Neg;

use num_traits::Float;

use crate::eft::two_power;
use crate::element::{Element, Integral, Real};

/// Run-time name of an operator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OpTag {
    /// `a + b`
    Add,
    /// `a - b`
    Sub,
    /// `a * b`
    Mul,
    /// `a / b`
    Div,
    /// `a % b` (integers)
    Rem,
    /// `a << b` (integers)
    Shl,
    /// `a >> b` (integers)
    Shr,
    /// `-a`
    Neg,
    /// `|a|`
    Abs,
    /// Square root.
    Sqrt,
    /// Natural exponential.
    Exp,
    /// Natural logarithm.
    Ln,
    /// Sine.
    Sin,
    /// Cosine.
    Cos,
    /// Tangent.
    Tan,
    /// Hyperbolic tangent.
    Tanh,
    /// Integer power.
    Powi(i32),
    /// Rounded part of an error-free product.
    ProdHigh,
    /// Rounding residual of an error-free product.
    ProdLow,
    /// Rounded part of an error-free power.
    PowHigh(u32),
    /// Rounding residual of an error-free power.
    PowLow(u32),
}

impl OpTag {
    /// Returns true for the operators used internally by the compensated
    /// algorithms.
    #[must_use]
    pub const fn is_eft(self) -> bool {
        matches!(
            self,
            Self::ProdHigh | Self::ProdLow | Self::PowHigh(_) | Self::PowLow(_)
        )
    }
}

impl fmt::Display for OpTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Add => f.write_str("+"),
            Self::Sub => f.write_str("-"),
            Self::Mul => f.write_str("*"),
            Self::Div => f.write_str("/"),
            Self::Rem => f.write_str("%"),
            Self::Shl => f.write_str("<<"),
            Self::Shr => f.write_str(">>"),
            Self::Neg => f.write_str("neg"),
            Self::Abs => f.write_str("abs"),
            Self::Sqrt => f.write_str("sqrt"),
            Self::Exp => f.write_str("exp"),
            Self::Ln => f.write_str("ln"),
            Self::Sin => f.write_str("sin"),
            Self::Cos => f.write_str("cos"),
            Self::Tan => f.write_str("tan"),
            Self::Tanh => f.write_str("tanh"),
            Self::Powi(p) => write!(f, "powi({p})"),
            Self::ProdHigh => f.write_str("prod_high"),
            Self::ProdLow => f.write_str("prod_low"),
            Self::PowHigh(p) => write!(f, "pow_high({p})"),
            Self::PowLow(p) => write!(f, "pow_low({p})"),
        }
    }
}

/// An operator combining two elements of kind `T`.
pub trait BinaryOp<T>: Copy {
    /// Name of the operator.
    fn tag(&self) -> OpTag;

    /// Applies the operator.
    fn apply(&self, a: T, b: T) -> T;
}

/// An operator transforming one element of kind `T`.
pub trait UnaryOp<T>: Copy {
    /// Name of the operator.
    fn tag(&self) -> OpTag;

    /// Applies the operator.
    fn apply(&self, a: T) -> T;
}

// ============================================================================
// Arithmetic
// ============================================================================

macro_rules! binary_op {
    ($(#[$doc:meta])* $name:ident, $bound:ident, $tag:ident, |$a:ident, $b:ident| $body:expr) => {
        $(#[$doc])*
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
        pub struct $name;

        impl<T: $bound> BinaryOp<T> for $name {
            #[inline]
            fn tag(&self) -> OpTag {
                OpTag::$tag
            }

            #[inline]
            fn apply(&self, $a: T, $b: T) -> T {
                $body
            }
        }
    };
}

binary_op!(
    /// Addition.
    AddOp, Element, Add, |a, b| a + b
);
binary_op!(
    /// Subtraction.
    SubOp, Element, Sub, |a, b| a - b
);
binary_op!(
    /// Multiplication.
    MulOp, Element, Mul, |a, b| a * b
);
binary_op!(
    /// Remainder.
    RemOp, Integral, Rem, |a, b| a % b
);
binary_op!(
    /// Left shift by `b` bits.
    ShlOp, Integral, Shl, |a, b| a << shift_amount(b)
);
binary_op!(
    /// Right shift by `b` bits; arithmetic on signed kinds.
    ShrOp, Integral, Shr, |a, b| a >> shift_amount(b)
);

/// Division.
///
/// With the `checked-div` feature, a zero divisor fails a debug assertion.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DivOp;

impl<T: Element> BinaryOp<T> for DivOp {
    #[inline]
    fn tag(&self) -> OpTag {
        OpTag::Div
    }

    #[inline]
    fn apply(&self, a: T, b: T) -> T {
        #[cfg(feature = "checked-div")]
        debug_assert!(b != T::zero(), "division by zero");
        a / b
    }
}

#[inline]
fn shift_amount<T: Integral>(b: T) -> usize {
    let bits = T::zero().count_zeros();
    let n = b.to_u32().unwrap_or(bits);
    debug_assert!(n < bits, "shift amount {} out of range for {}", b, T::KIND);
    n as usize
}

// ============================================================================
// Unary operators
// ============================================================================

/// Negation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NegOp;

impl<T: Element + Neg<Output = T>> UnaryOp<T> for NegOp {
    #[inline]
    fn tag(&self) -> OpTag {
        OpTag::Neg
    }

    #[inline]
    fn apply(&self, a: T) -> T {
        -a
    }
}

/// Absolute value; the identity on unsigned kinds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AbsOp;

impl<T: Element> UnaryOp<T> for AbsOp {
    #[inline]
    fn tag(&self) -> OpTag {
        OpTag::Abs
    }

    #[inline]
    fn apply(&self, a: T) -> T {
        a.magnitude()
    }
}

macro_rules! real_op {
    ($($(#[$doc:meta])* $name:ident => $tag:ident, $method:ident;)*) => {
        $(
            $(#[$doc])*
            #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
            pub struct $name;

            impl<T: Real> UnaryOp<T> for $name {
                #[inline]
                fn tag(&self) -> OpTag {
                    OpTag::$tag
                }

                #[inline]
                fn apply(&self, a: T) -> T {
                    Float::$method(a)
                }
            }
        )*
    };
}

real_op! {
    /// Square root.
    SqrtOp => Sqrt, sqrt;
    /// Natural exponential.
    ExpOp => Exp, exp;
    /// Natural logarithm.
    LnOp => Ln, ln;
    /// Sine.
    SinOp => Sin, sin;
    /// Cosine.
    CosOp => Cos, cos;
    /// Tangent.
    TanOp => Tan, tan;
    /// Hyperbolic tangent.
    TanhOp => Tanh, tanh;
}

/// Integer power.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PowiOp {
    /// The exponent.
    pub exponent: i32,
}

impl<T: Real> UnaryOp<T> for PowiOp {
    #[inline]
    fn tag(&self) -> OpTag {
        OpTag::Powi(self.exponent)
    }

    #[inline]
    fn apply(&self, a: T) -> T {
        a.powi(self.exponent)
    }
}

// ============================================================================
// Error-free transformation parts
// ============================================================================

/// Rounded product `fl(a * b)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ProdHigh;

impl<T: Real> BinaryOp<T> for ProdHigh {
    #[inline]
    fn tag(&self) -> OpTag {
        OpTag::ProdHigh
    }

    #[inline]
    fn apply(&self, a: T, b: T) -> T {
        a * b
    }
}

/// Residual `a * b - fl(a * b)`, exact through one fused multiply-add.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ProdLow;

impl<T: Real> BinaryOp<T> for ProdLow {
    #[inline]
    fn tag(&self) -> OpTag {
        OpTag::ProdLow
    }

    #[inline]
    fn apply(&self, a: T, b: T) -> T {
        a.mul_add(b, -(a * b))
    }
}

/// Rounded part of the error-free split of `x^exponent`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PowHigh {
    /// The exponent.
    pub exponent: u32,
}

impl<T: Real> UnaryOp<T> for PowHigh {
    #[inline]
    fn tag(&self) -> OpTag {
        OpTag::PowHigh(self.exponent)
    }

    #[inline]
    fn apply(&self, a: T) -> T {
        two_power(a, self.exponent).value
    }
}

/// Residual of the error-free split of `x^exponent`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PowLow {
    /// The exponent.
    pub exponent: u32,
}

impl<T: Real> UnaryOp<T> for PowLow {
    #[inline]
    fn tag(&self) -> OpTag {
        OpTag::PowLow(self.exponent)
    }

    #[inline]
    fn apply(&self, a: T) -> T {
        two_power(a, self.exponent).residual
    }
}
