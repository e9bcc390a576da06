//! Reductions and predicates
//!
//! Plain reductions walk their operand once, reading every element through
//! [`ArrayLike::at`], so an expression tree is evaluated exactly once per
//! position without being materialized. Accumulation is ordinary
//! working-precision arithmetic: exact for integer kinds, subject to
//! cancellation for floating kinds (see [`crate::compensated`]).

use std::cmp::Ordering;

use num_traits::{Float, Zero};

use crate::element::Real;
use crate::error::{violated, NumericError};
use crate::expr::ops::MulOp;
use crate::expr::{abs, BinaryExpr};
use crate::operand::ArrayLike;

/// Sum of all elements; zero for an empty operand.
pub fn sum<A: ArrayLike>(a: A) -> A::Elem {
    a.iter().fold(num_traits::zero(), |acc, x| acc + x)
}

/// Arithmetic mean.
///
/// An empty operand is a precondition violation; release builds return zero.
#[track_caller]
pub fn mean<A>(a: A) -> A::Elem
where
    A: ArrayLike,
    A::Elem: Real,
{
    if a.is_empty() {
        violated(&NumericError::EmptyOperand { op: "mean" });
        return num_traits::zero();
    }
    sum(&a) / <A::Elem as Real>::from_count(a.len())
}

/// Smallest element, or `None` when empty. NaNs are skipped unless every
/// element is NaN.
pub fn min<A: ArrayLike>(a: A) -> Option<A::Elem> {
    min_index(&a).map(|i| a.at(i))
}

/// Largest element, or `None` when empty. NaNs are skipped unless every
/// element is NaN.
pub fn max<A: ArrayLike>(a: A) -> Option<A::Elem> {
    max_index(&a).map(|i| a.at(i))
}

/// Position of the first smallest element.
pub fn min_index<A: ArrayLike>(a: A) -> Option<usize> {
    extreme_index(&a, Ordering::Less)
}

/// Position of the first largest element.
pub fn max_index<A: ArrayLike>(a: A) -> Option<usize> {
    extreme_index(&a, Ordering::Greater)
}

fn extreme_index<A: ArrayLike>(a: &A, wanted: Ordering) -> Option<usize> {
    let mut best: Option<(usize, A::Elem)> = None;
    for (i, x) in a.iter().enumerate() {
        best = match best {
            None => Some((i, x)),
            Some((_, b)) if b.partial_cmp(&b).is_none() && x.partial_cmp(&x).is_some() => {
                Some((i, x))
            }
            Some((_, b)) if x.partial_cmp(&b) == Some(wanted) => Some((i, x)),
            keep => keep,
        };
    }
    best.map(|(i, _)| i)
}

/// Inner product of two equal-length operands.
#[track_caller]
pub fn dot_prod<A, B>(a: A, b: B) -> A::Elem
where
    A: ArrayLike,
    B: ArrayLike<Elem = A::Elem>,
{
    sum(BinaryExpr::new(MulOp, a, b))
}

/// Sum of magnitudes.
pub fn norm1<A: ArrayLike>(a: A) -> A::Elem {
    sum(abs(a))
}

/// Euclidean norm.
pub fn norm2<A>(a: A) -> A::Elem
where
    A: ArrayLike,
    A::Elem: Real,
{
    dot_prod(&a, &a).sqrt()
}

/// Largest magnitude; zero for an empty operand.
pub fn norm_inf<A: ArrayLike>(a: A) -> A::Elem {
    max(abs(a)).unwrap_or_else(num_traits::zero)
}

/// [`norm1`] computed on values scaled by the largest magnitude, so partial
/// sums cannot overflow before the final rescale.
pub fn scaled_norm1<A>(a: A) -> A::Elem
where
    A: ArrayLike,
    A::Elem: Real,
{
    let m = norm_inf(&a);
    if m.is_zero() || !m.is_finite() {
        return norm1(&a);
    }
    m * a.iter().fold(num_traits::zero(), |acc: A::Elem, x| acc + x.abs() / m)
}

/// [`norm2`] computed on values scaled by the largest magnitude, so squares
/// of large elements cannot overflow and squares of tiny ones cannot
/// underflow to zero.
pub fn scaled_norm2<A>(a: A) -> A::Elem
where
    A: ArrayLike,
    A::Elem: Real,
{
    let m = norm_inf(&a);
    if m.is_zero() || !m.is_finite() {
        return norm2(&a);
    }
    let squares = a.iter().fold(num_traits::zero(), |acc: A::Elem, x| {
        let y = x / m;
        acc + y * y
    });
    m * squares.sqrt()
}

/// Evaluates `sum(coef[i] * points[i]^exps[i])`.
///
/// The three operands must have equal lengths; release builds use the
/// shortest one.
#[track_caller]
pub fn polynomial<C, P, E>(coef: C, points: P, exps: E) -> C::Elem
where
    C: ArrayLike,
    P: ArrayLike<Elem = C::Elem>,
    E: ArrayLike<Elem = u32>,
{
    let n = term_count(coef.len(), points.len(), exps.len());
    (0..n).fold(num_traits::zero(), |acc: C::Elem, i| {
        acc + coef.at(i) * num_traits::pow(points.at(i), exps.at(i) as usize)
    })
}

/// Checks the parallel operands of a polynomial and returns the number of
/// terms to evaluate.
#[track_caller]
pub(crate) fn term_count(coef: usize, points: usize, exps: usize) -> usize {
    if coef != points {
        violated(&NumericError::LengthMismatch {
            left: coef,
            right: points,
        });
    } else if coef != exps {
        violated(&NumericError::LengthMismatch {
            left: coef,
            right: exps,
        });
    }
    coef.min(points).min(exps)
}

// ============================================================================
// Predicates
// ============================================================================

/// Returns true when every element is strictly positive (vacuously true for
/// an empty operand).
pub fn all_positive<A: ArrayLike>(a: A) -> bool {
    let zero: A::Elem = num_traits::zero();
    a.iter().all(|x| x > zero)
}

/// Returns true when at least one element satisfies `pred`.
pub fn any_satisfy<A, F>(a: A, pred: F) -> bool
where
    A: ArrayLike,
    F: Fn(A::Elem) -> bool,
{
    a.iter().any(pred)
}

/// Returns true when every element satisfies `pred`.
pub fn all_satisfy<A, F>(a: A, pred: F) -> bool
where
    A: ArrayLike,
    F: Fn(A::Elem) -> bool,
{
    a.iter().all(pred)
}

/// Returns true when some element equals zero.
pub fn has_zero<A: ArrayLike>(a: A) -> bool {
    a.iter().any(|x| x.is_zero())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::array::Array;
    use crate::slice::{even, reverse};

    #[test]
    fn test_sum_and_mean() {
        let a = Array::from_vec(vec![1.0, 2.0, 3.0, 4.0]);
        assert_eq!(sum(&a), 10.0);
        assert_eq!(mean(&a), 2.5);

        let ints = Array::from_vec(vec![1u64, 2, 3]);
        assert_eq!(sum(&ints), 6);

        let empty: Array<i32> = Array::from_vec(vec![]);
        assert_eq!(sum(&empty), 0);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "`mean` requires a non-empty operand")]
    fn test_mean_of_empty() {
        let empty: Array<f64> = Array::from_vec(vec![]);
        let _ = mean(&empty);
    }

    #[test]
    fn test_sum_of_expression() {
        let a = Array::from_vec(vec![1, 2, 3]);
        let b = Array::from_vec(vec![10, 20, 30]);
        assert_eq!(sum(&a + &b), sum(&a) + sum(&b));
    }

    #[test]
    fn test_min_max() {
        let a = Array::from_vec(vec![3, -1, 4, -1, 5]);
        assert_eq!(min(&a), Some(-1));
        assert_eq!(max(&a), Some(5));
        assert_eq!(min_index(&a), Some(1));
        assert_eq!(max_index(&a), Some(4));

        let empty: Array<u8> = Array::from_vec(vec![]);
        assert_eq!(min(&empty), None);
        assert_eq!(max_index(&empty), None);
    }

    #[test]
    fn test_min_max_skip_nan() {
        let a = Array::from_vec(vec![f64::NAN, 2.0, -3.0, f64::NAN]);
        assert_eq!(min(&a), Some(-3.0));
        assert_eq!(max_index(&a), Some(1));

        let all_nan = Array::from_vec(vec![f64::NAN]);
        assert!(max(&all_nan).is_some_and(f64::is_nan));
    }

    #[test]
    fn test_dot_prod() {
        let a = Array::from_vec(vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(dot_prod(&a, reverse(&a)), 56);
        assert_eq!(dot_prod(a.slice(even()), a.slice(even())), 1 + 9 + 25);
    }

    #[test]
    fn test_norms() {
        let a = Array::from_vec(vec![3.0, -4.0]);
        assert_eq!(norm1(&a), 7.0);
        assert_eq!(norm2(&a), 5.0);
        assert_eq!(norm_inf(&a), 4.0);
        assert_eq!(scaled_norm1(&a), 7.0);
        assert_eq!(scaled_norm2(&a), 5.0);

        let ints = Array::from_vec(vec![-2i32, 1]);
        assert_eq!(norm1(&ints), 3);
        assert_eq!(norm_inf(&ints), 2);
    }

    #[test]
    fn test_scaled_norm2_avoids_overflow() {
        let a = Array::from_vec(vec![3.0e200, 4.0e200]);
        assert!(norm2(&a).is_infinite());
        let n = scaled_norm2(&a);
        assert!((n - 5.0e200).abs() <= 5.0e200 * 1.0e-15);

        let tiny = Array::from_vec(vec![3.0e-200, 4.0e-200]);
        assert_eq!(norm2(&tiny), 0.0);
        assert!((scaled_norm2(&tiny) - 5.0e-200).abs() <= 5.0e-200 * 1.0e-15);
    }

    #[test]
    fn test_norms_of_zero_vector() {
        let z: Array<f64> = Array::new(3);
        assert_eq!(scaled_norm1(&z), 0.0);
        assert_eq!(scaled_norm2(&z), 0.0);
    }

    #[test]
    fn test_polynomial() {
        let coef = Array::from_vec(vec![2.0, 3.0]);
        let points = Array::from_vec(vec![10.0, 10.0]);
        let exps = Array::from_vec(vec![1u32, 2]);
        assert_eq!(polynomial(&coef, &points, &exps), 320.0);

        let icoef = Array::from_vec(vec![1i64, 1, 1]);
        let ipoints = Array::from_vec(vec![2i64, 2, 2]);
        let iexps = Array::from_vec(vec![0u32, 1, 10]);
        assert_eq!(polynomial(&icoef, &ipoints, &iexps), 1 + 2 + 1024);
    }

    #[test]
    fn test_predicates() {
        let a = Array::from_vec(vec![1, 2, 3]);
        assert!(all_positive(&a));
        assert!(!has_zero(&a));
        assert!(any_satisfy(&a, |x| x % 2 == 0));
        assert!(all_satisfy(&a, |x| x < 4));

        let b = Array::from_vec(vec![0.0, 1.0]);
        assert!(!all_positive(&b));
        assert!(has_zero(&b));
        assert!(has_zero(&b - 1.0));
        assert!(!any_satisfy(&b, f64::is_nan));
    }
}
