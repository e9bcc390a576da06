//! Lazy elementwise expressions
//!
//! Arithmetic on array-like operands builds a tree of [`BinaryExpr`] and
//! [`UnaryExpr`] nodes instead of computing anything. Reading element `i` of
//! a node recomputes `op(lhs[i], rhs[i])` from its operands every time; a
//! result persists only once it is materialized with
//! [`to_array`](crate::ArrayLike::to_array) or assigned into an array.
//!
//! # Ownership
//!
//! Each operand slot records how it is held (see [`Capture`]):
//!
//! ```
//! use xact_numeric::prelude::*;
//! use xact_numeric::Capture;
//!
//! let a = Array::from_vec(vec![1.0, 2.0, 3.0]);
//! let b = Array::from_vec(vec![4.0, 5.0, 6.0]);
//!
//! let node = (&a + &b) * 2.0;
//! // the inner sum is moved into the node, the scalar is copied
//! assert_eq!(node.captures(), (Capture::Inline, Capture::Inline));
//! assert_eq!((&a + &b).captures(), (Capture::Borrowed, Capture::Borrowed));
//! ```
//!
//! # Kinds
//!
//! Both sides of an operator must share one element kind. `%`, `<<` and `>>`
//! exist only for [`Integral`](crate::Integral) kinds; the transcendental
//! functions only for [`Real`] kinds.

mod arith;
pub mod ops;

use crate::array::Array;
use crate::element::Real;
use crate::error::{violated, NumericError, Result};
use crate::operand::{ArrayLike, Capture, Operand};

use ops::{
    AbsOp, BinaryOp, CosOp, DivOp, ExpOp, LnOp, OpTag, PowiOp, SinOp, SqrtOp, TanOp, TanhOp,
    UnaryOp,
};

// ============================================================================
// Binary nodes
// ============================================================================

/// A pending elementwise binary operation.
#[derive(Clone, Debug)]
pub struct BinaryExpr<O, L, R> {
    op: O,
    lhs: L,
    rhs: R,
    len: usize,
}

impl<O, L, R> BinaryExpr<O, L, R>
where
    L: Operand,
    R: Operand<Elem = L::Elem>,
    O: BinaryOp<L::Elem>,
{
    /// Builds a node over two operands.
    ///
    /// Operands of different lengths are a precondition violation; release
    /// builds truncate to the shorter one. A node over two scalars is empty.
    #[track_caller]
    pub fn new(op: O, lhs: L, rhs: R) -> Self {
        let len = match Self::extent_of(&lhs, &rhs) {
            Ok(len) => len,
            Err(err) => {
                violated(&err);
                lhs.extent().unwrap_or(0).min(rhs.extent().unwrap_or(0))
            }
        };
        Self { op, lhs, rhs, len }
    }

    /// Builds a node, reporting operands of different lengths.
    pub fn try_new(op: O, lhs: L, rhs: R) -> Result<Self> {
        let len = Self::extent_of(&lhs, &rhs)?;
        Ok(Self { op, lhs, rhs, len })
    }

    fn extent_of(lhs: &L, rhs: &R) -> Result<usize> {
        match (lhs.extent(), rhs.extent()) {
            (Some(left), Some(right)) if left != right => {
                Err(NumericError::LengthMismatch { left, right })
            }
            (Some(n), _) | (None, Some(n)) => Ok(n),
            (None, None) => Ok(0),
        }
    }

    /// How the left and right operands are held.
    pub fn captures(&self) -> (Capture, Capture) {
        (L::CAPTURE, R::CAPTURE)
    }

    /// The operator.
    pub fn tag(&self) -> OpTag {
        self.op.tag()
    }

    /// The left operand.
    pub fn lhs(&self) -> &L {
        &self.lhs
    }

    /// The right operand.
    pub fn rhs(&self) -> &R {
        &self.rhs
    }
}

impl<O, L, R> ArrayLike for BinaryExpr<O, L, R>
where
    L: Operand,
    R: Operand<Elem = L::Elem>,
    O: BinaryOp<L::Elem>,
{
    type Elem = L::Elem;

    const CAPTURE: Capture = Capture::Inline;

    #[inline]
    fn len(&self) -> usize {
        self.len
    }

    #[inline]
    fn at(&self, index: usize) -> L::Elem {
        self.op.apply(self.lhs.value(index), self.rhs.value(index))
    }
}

// ============================================================================
// Unary nodes
// ============================================================================

/// A pending elementwise unary operation.
#[derive(Clone, Debug)]
pub struct UnaryExpr<O, A> {
    op: O,
    arg: A,
}

impl<O, A> UnaryExpr<O, A>
where
    A: ArrayLike,
    O: UnaryOp<A::Elem>,
{
    /// Builds a node over one operand.
    pub fn new(op: O, arg: A) -> Self {
        Self { op, arg }
    }

    /// How the operand is held.
    pub fn captures(&self) -> Capture {
        A::CAPTURE
    }

    /// The operator.
    pub fn tag(&self) -> OpTag {
        self.op.tag()
    }

    /// The operand.
    pub fn arg(&self) -> &A {
        &self.arg
    }
}

impl<O, A> ArrayLike for UnaryExpr<O, A>
where
    A: ArrayLike,
    O: UnaryOp<A::Elem>,
{
    type Elem = A::Elem;

    const CAPTURE: Capture = Capture::Inline;

    #[inline]
    fn len(&self) -> usize {
        self.arg.len()
    }

    #[inline]
    fn at(&self, index: usize) -> A::Elem {
        self.op.apply(self.arg.at(index))
    }
}

// ============================================================================
// Elementwise functions
// ============================================================================

/// Elementwise absolute value.
pub fn abs<A: ArrayLike>(a: A) -> UnaryExpr<AbsOp, A> {
    UnaryExpr::new(AbsOp, a)
}

macro_rules! real_fn {
    ($($(#[$doc:meta])* $name:ident => $op:ident;)*) => {
        $(
            $(#[$doc])*
            pub fn $name<A>(a: A) -> UnaryExpr<$op, A>
            where
                A: ArrayLike,
                A::Elem: Real,
            {
                UnaryExpr::new($op, a)
            }
        )*
    };
}

real_fn! {
    /// Elementwise square root.
    sqrt => SqrtOp;
    /// Elementwise natural exponential.
    exp => ExpOp;
    /// Elementwise natural logarithm.
    ln => LnOp;
    /// Elementwise sine.
    sin => SinOp;
    /// Elementwise cosine.
    cos => CosOp;
    /// Elementwise tangent.
    tan => TanOp;
    /// Elementwise hyperbolic tangent.
    tanh => TanhOp;
}

/// Elementwise integer power.
pub fn powi<A>(a: A, exponent: i32) -> UnaryExpr<PowiOp, A>
where
    A: ArrayLike,
    A::Elem: Real,
{
    UnaryExpr::new(PowiOp { exponent }, a)
}

/// Divides elementwise into a new array, reporting the first zero divisor.
///
/// Integer division by zero is reported instead of panicking; for floats the
/// check replaces the infinities and NaNs a plain division would produce.
pub fn checked_div<L, R>(lhs: L, rhs: R) -> Result<Array<L::Elem>>
where
    L: Operand,
    R: Operand<Elem = L::Elem>,
{
    let quotient = BinaryExpr::try_new(DivOp, lhs, rhs)?;
    let divisor = quotient.rhs();
    let zero = <L::Elem as num_traits::Zero>::zero();
    if let Some(index) = (0..quotient.len()).find(|&i| divisor.value(i) == zero) {
        return Err(NumericError::DivisionByZero { index });
    }
    Ok(quotient.to_array())
}
