//! Compensated reductions
//!
//! Floating-point reductions that carry the rounding error of every step
//! alongside the running result, giving results close to what twice the
//! working precision would produce:
//!
//! - [`stable_sum`]: Neumaier's variant of Kahan summation; the error bound
//!   does not grow with the number of terms.
//! - [`stable_dot_prod`]: each product is split with [`two_prod`] and the
//!   rounded parts and residuals are summed with [`stable_sum`].
//! - [`stable_polynomial`]: each power is split with [`two_power`] and the
//!   result is a compensated dot product against the coefficients.
//!
//! All of them require a non-empty operand.
//!
//! # Example
//!
//! ```
//! use xact_numeric::prelude::*;
//!
//! let terms: Array<f64> = [1.0e17, 1.0, -1.0e17].repeat(1000).into();
//! assert_eq!(sum(&terms), 0.0);
//! assert_eq!(stable_sum(&terms), 1000.0);
//! ```

use num_traits::Float;

use crate::array::Array;
use crate::eft::{two_power, two_prod};
use crate::element::Real;
use crate::error::{violated, NumericError};
use crate::expr::abs;
use crate::operand::ArrayLike;
use crate::reduce::term_count;
use crate::slice::concat;

/// Compensated sum.
///
/// An empty operand is a precondition violation; release builds return zero.
#[track_caller]
pub fn stable_sum<A>(a: A) -> A::Elem
where
    A: ArrayLike,
    A::Elem: Real,
{
    if a.is_empty() {
        violated(&NumericError::EmptyOperand { op: "stable_sum" });
        return num_traits::zero();
    }
    tracing::trace!(len = a.len(), "stable_sum");

    let mut s: A::Elem = num_traits::zero();
    let mut c: A::Elem = num_traits::zero();
    for t in a.iter() {
        let tmp = s + t;
        // Past an infinity the correction is inf - inf.
        if tmp.is_finite() {
            let z = if s.abs() >= t.abs() {
                (s - tmp) + t
            } else {
                (t - tmp) + s
            };
            c = c + z;
        }
        s = tmp;
    }
    if s.is_finite() {
        s + c
    } else {
        s
    }
}

/// Compensated arithmetic mean.
#[track_caller]
pub fn stable_mean<A>(a: A) -> A::Elem
where
    A: ArrayLike,
    A::Elem: Real,
{
    if a.is_empty() {
        violated(&NumericError::EmptyOperand { op: "stable_mean" });
        return num_traits::zero();
    }
    stable_sum(&a) / <A::Elem as Real>::from_count(a.len())
}

/// Compensated inner product of two equal-length operands.
#[track_caller]
pub fn stable_dot_prod<A, B>(a: A, b: B) -> A::Elem
where
    A: ArrayLike,
    B: ArrayLike<Elem = A::Elem>,
    A::Elem: Real,
{
    if a.is_empty() || b.is_empty() {
        violated(&NumericError::EmptyOperand {
            op: "stable_dot_prod",
        });
        return num_traits::zero();
    }
    tracing::trace!(len = a.len(), "stable_dot_prod");

    let (high, low) = two_prod(&a, &b);
    stable_sum(&high) + stable_sum(&low)
}

/// Compensated sum of magnitudes.
#[track_caller]
pub fn stable_norm1<A>(a: A) -> A::Elem
where
    A: ArrayLike,
    A::Elem: Real,
{
    stable_sum(abs(a))
}

/// Euclidean norm from a compensated sum of squares.
#[track_caller]
pub fn stable_norm2<A>(a: A) -> A::Elem
where
    A: ArrayLike,
    A::Elem: Real,
{
    stable_dot_prod(&a, &a).sqrt()
}

/// Compensated evaluation of `sum(coef[i] * points[i]^exps[i])`.
///
/// Each power is split into a rounded value and residual; the coefficients
/// are laid end to end with themselves and dotted against the values
/// followed by the residuals.
#[track_caller]
pub fn stable_polynomial<C, P, E>(coef: C, points: P, exps: E) -> C::Elem
where
    C: ArrayLike,
    P: ArrayLike<Elem = C::Elem>,
    E: ArrayLike<Elem = u32>,
    C::Elem: Real,
{
    let n = term_count(coef.len(), points.len(), exps.len());
    if n == 0 {
        violated(&NumericError::EmptyOperand {
            op: "stable_polynomial",
        });
        return num_traits::zero();
    }
    tracing::debug!(terms = n, "stable_polynomial");

    let (high, low): (Vec<_>, Vec<_>) = (0..n)
        .map(|i| {
            let pair = two_power(points.at(i), exps.at(i));
            (pair.value, pair.residual)
        })
        .unzip();
    let (high, low) = (Array::from_vec(high), Array::from_vec(low));
    let coef = coef.slice(0..n);
    stable_dot_prod(concat(&coef, &coef), concat(&high, &low))
}
