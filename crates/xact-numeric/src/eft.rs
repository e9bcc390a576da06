//! Error-free transformations
//!
//! Each function here splits one floating-point operation into a pair
//! `(value, residual)` where `value` is the correctly rounded result and
//! `value + residual` equals the exact result in infinite precision (for the
//! power split, up to second-order terms). The compensated reductions in
//! [`crate::compensated`] are built from these pairs.
//!
//! | Function | Splits | Cost |
//! |----------|--------|------|
//! | [`two_sum`] | `a + b` | 6 flops |
//! | [`fast_two_sum`] | `a + b` with `|a| >= |b|` | 3 flops |
//! | [`two_product`] | `a * b` | 1 mul + 1 fma |
//! | [`two_power`] | `x^p` | O(log p) products |
//!
//! [`two_prod`] and [`two_pow`] lift the product and power splits to whole
//! operands, returning a (high, low) pair of lazy nodes.

use crate::element::Real;
use crate::expr::ops::{PowHigh, PowLow, ProdHigh, ProdLow};
use crate::expr::{BinaryExpr, UnaryExpr};
use crate::operand::{ArrayLike, Operand};

/// A rounded result and its rounding residual.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EftPair<T> {
    /// Correctly rounded result.
    pub value: T,
    /// What rounding discarded.
    pub residual: T,
}

impl<T: Real> EftPair<T> {
    /// Creates a pair.
    pub fn new(value: T, residual: T) -> Self {
        Self { value, residual }
    }

    /// `value + residual`, rounded once.
    pub fn total(&self) -> T {
        self.value + self.residual
    }
}

/// Splits `a + b` for any ordering of magnitudes.
#[inline]
pub fn two_sum<T: Real>(a: T, b: T) -> EftPair<T> {
    let s = a + b;
    let bb = s - a;
    let err = (a - (s - bb)) + (b - bb);
    EftPair::new(s, err)
}

/// Splits `a + b` when `|a| >= |b|`.
#[inline]
pub fn fast_two_sum<T: Real>(a: T, b: T) -> EftPair<T> {
    debug_assert!(
        a.abs() >= b.abs() || a.is_nan() || b.is_nan(),
        "fast_two_sum requires |a| >= |b|"
    );
    let s = a + b;
    let err = b - (s - a);
    EftPair::new(s, err)
}

/// Splits `a * b` with one fused multiply-add.
#[inline]
pub fn two_product<T: Real>(a: T, b: T) -> EftPair<T> {
    let r = a * b;
    let s = a.mul_add(b, -r);
    EftPair::new(r, s)
}

/// Splits `x^p` for a non-negative integer exponent.
///
/// Exponents up to 5 use unrolled product chains. Larger exponents square
/// the split of `x^(p/2)`, carrying the cross term `2*h*s + s^2` of
/// `(h + s)^2` into the residual, and fold one more factor of `x` when `p`
/// is odd. The residual stays accurate to second order in the unit
/// roundoff; the final pair is renormalized so `value` is the rounded sum.
pub fn two_power<T: Real>(x: T, p: u32) -> EftPair<T> {
    let raw = match p {
        0 => return EftPair::new(T::one(), T::zero()),
        1 => return EftPair::new(x, T::zero()),
        2 => return two_product(x, x),
        3 => {
            let sq = two_product(x, x);
            let cube = two_product(sq.value, x);
            EftPair::new(cube.value, cube.residual + sq.residual * x)
        }
        4 => {
            let sq = two_product(x, x);
            let (h, l) = (sq.value, sq.residual);
            let fourth = two_product(h, h);
            EftPair::new(fourth.value, fourth.residual + (h + h) * l + l * l)
        }
        5 => {
            let fourth = two_power(x, 4);
            let fifth = two_product(fourth.value, x);
            EftPair::new(fifth.value, fifth.residual + fourth.residual * x)
        }
        _ => {
            let half = two_power(x, p / 2);
            let (h, s) = (half.value, half.residual);
            let even = two_product(h, h);
            let even = EftPair::new(even.value, even.residual + (h + h) * s + s * s);
            if p % 2 == 0 {
                even
            } else {
                let odd = two_product(even.value, x);
                EftPair::new(odd.value, odd.residual + even.residual * x)
            }
        }
    };
    fast_two_sum(raw.value, raw.residual)
}

/// Elementwise product split over whole operands: `(a * b, residual)`.
///
/// Both nodes read the same operands, which must be cheap to clone
/// (references, views and scalars are).
pub fn two_prod<A, B>(a: A, b: B) -> (BinaryExpr<ProdHigh, A, B>, BinaryExpr<ProdLow, A, B>)
where
    A: Operand + Clone,
    B: Operand<Elem = A::Elem> + Clone,
    A::Elem: Real,
{
    let high = BinaryExpr::new(ProdHigh, a.clone(), b.clone());
    let low = BinaryExpr::new(ProdLow, a, b);
    (high, low)
}

/// Elementwise power split over a whole operand: `(x^p, residual)`.
pub fn two_pow<A>(x: A, exponent: u32) -> (UnaryExpr<PowHigh, A>, UnaryExpr<PowLow, A>)
where
    A: ArrayLike + Clone,
    A::Elem: Real,
{
    let high = UnaryExpr::new(PowHigh { exponent }, x.clone());
    let low = UnaryExpr::new(PowLow { exponent }, x);
    (high, low)
}
