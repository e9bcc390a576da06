//! Operator overloads.
//!
//! Every array-like type gets `+ - * /` against any same-kind operand
//! (array-like or scalar), `% << >>` for integer kinds and unary `-`. A bare
//! scalar may also stand on the left of `+ - * /`. Arrays and mutable views
//! get the compound assignments, which write through immediately.

use std::ops::{
    Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Rem, RemAssign, Shl, Shr, Sub, SubAssign,
};

use super::ops::{AddOp, DivOp, MulOp, NegOp, RemOp, ShlOp, ShrOp, SubOp};
use super::{BinaryExpr, UnaryExpr};
use crate::array::Array;
use crate::element::{Element, Integral};
use crate::operand::{ArrayLike, ArrayLikeMut, Operand};
use crate::slice::{Complement, Concat, IndexView, IndexViewMut, Reversed, Slice, SliceMut};

// ============================================================================
// Array-like on the left
// ============================================================================

macro_rules! impl_operators {
    (@binary [$($g:tt)*] $lhs:ty, $trait:ident, $method:ident, $op:ident, $bound:ident) => {
        impl<$($g)*, Rhs> $trait<Rhs> for $lhs
        where
            $lhs: ArrayLike,
            <$lhs as ArrayLike>::Elem: $bound,
            Rhs: Operand<Elem = <$lhs as ArrayLike>::Elem>,
        {
            type Output = BinaryExpr<$op, $lhs, Rhs>;

            #[inline]
            #[track_caller]
            fn $method(self, rhs: Rhs) -> Self::Output {
                BinaryExpr::new($op, self, rhs)
            }
        }
    };
    (@neg [$($g:tt)*] $lhs:ty) => {
        impl<$($g)*> Neg for $lhs
        where
            $lhs: ArrayLike,
            <$lhs as ArrayLike>::Elem: Neg<Output = <$lhs as ArrayLike>::Elem>,
        {
            type Output = UnaryExpr<NegOp, $lhs>;

            #[inline]
            fn neg(self) -> Self::Output {
                UnaryExpr::new(NegOp, self)
            }
        }
    };
    ($([$($g:tt)*] $lhs:ty;)*) => {
        $(
            impl_operators!(@binary [$($g)*] $lhs, Add, add, AddOp, Element);
            impl_operators!(@binary [$($g)*] $lhs, Sub, sub, SubOp, Element);
            impl_operators!(@binary [$($g)*] $lhs, Mul, mul, MulOp, Element);
            impl_operators!(@binary [$($g)*] $lhs, Div, div, DivOp, Element);
            impl_operators!(@binary [$($g)*] $lhs, Rem, rem, RemOp, Integral);
            impl_operators!(@binary [$($g)*] $lhs, Shl, shl, ShlOp, Integral);
            impl_operators!(@binary [$($g)*] $lhs, Shr, shr, ShrOp, Integral);
            impl_operators!(@neg [$($g)*] $lhs);
        )*
    };
}

impl_operators! {
    ['a, T: Element] &'a Array<T>;
    [O, L, R] BinaryExpr<O, L, R>;
    ['a, O, L, R] &'a BinaryExpr<O, L, R>;
    [O, A] UnaryExpr<O, A>;
    ['a, O, A] &'a UnaryExpr<O, A>;
    [B] Slice<B>;
    ['a, B] &'a Slice<B>;
    [B] IndexView<B>;
    ['a, B] &'a IndexView<B>;
    [B] Complement<B>;
    ['a, B] &'a Complement<B>;
    [B] Reversed<B>;
    ['a, B] &'a Reversed<B>;
    [A, B] Concat<A, B>;
    ['a, A, B] &'a Concat<A, B>;
    ['b, 'a, T: Element] &'b SliceMut<'a, T>;
    ['b, 'a, T: Element] &'b IndexViewMut<'a, T>;
}

// ============================================================================
// Scalar on the left
// ============================================================================

macro_rules! impl_scalar_lhs {
    (@op $s:ty, [$($g:tt)*] $rhs:ty, $trait:ident, $method:ident, $op:ident) => {
        impl<$($g)*> $trait<$rhs> for $s
        where
            $rhs: ArrayLike<Elem = $s>,
        {
            type Output = BinaryExpr<$op, $s, $rhs>;

            #[inline]
            #[track_caller]
            fn $method(self, rhs: $rhs) -> Self::Output {
                BinaryExpr::new($op, self, rhs)
            }
        }
    };
    (@rhs $s:ty, [$($g:tt)*] $rhs:ty) => {
        impl_scalar_lhs!(@op $s, [$($g)*] $rhs, Add, add, AddOp);
        impl_scalar_lhs!(@op $s, [$($g)*] $rhs, Sub, sub, SubOp);
        impl_scalar_lhs!(@op $s, [$($g)*] $rhs, Mul, mul, MulOp);
        impl_scalar_lhs!(@op $s, [$($g)*] $rhs, Div, div, DivOp);
    };
    (@kind $s:ty) => {
        impl_scalar_lhs!(@rhs $s, ['a] &'a Array<$s>);
        impl_scalar_lhs!(@rhs $s, [O, L, R] BinaryExpr<O, L, R>);
        impl_scalar_lhs!(@rhs $s, ['a, O, L, R] &'a BinaryExpr<O, L, R>);
        impl_scalar_lhs!(@rhs $s, [O, A] UnaryExpr<O, A>);
        impl_scalar_lhs!(@rhs $s, ['a, O, A] &'a UnaryExpr<O, A>);
        impl_scalar_lhs!(@rhs $s, [B] Slice<B>);
        impl_scalar_lhs!(@rhs $s, ['a, B] &'a Slice<B>);
        impl_scalar_lhs!(@rhs $s, [B] IndexView<B>);
        impl_scalar_lhs!(@rhs $s, ['a, B] &'a IndexView<B>);
        impl_scalar_lhs!(@rhs $s, [B] Complement<B>);
        impl_scalar_lhs!(@rhs $s, ['a, B] &'a Complement<B>);
        impl_scalar_lhs!(@rhs $s, [B] Reversed<B>);
        impl_scalar_lhs!(@rhs $s, ['a, B] &'a Reversed<B>);
        impl_scalar_lhs!(@rhs $s, [A, B] Concat<A, B>);
        impl_scalar_lhs!(@rhs $s, ['a, A, B] &'a Concat<A, B>);
        impl_scalar_lhs!(@rhs $s, ['b, 'a] &'b SliceMut<'a, $s>);
        impl_scalar_lhs!(@rhs $s, ['b, 'a] &'b IndexViewMut<'a, $s>);
    };
    ($($s:ty),* $(,)?) => {
        $(impl_scalar_lhs!(@kind $s);)*
    };
}

impl_scalar_lhs!(i8, i16, i32, i64, u8, u16, u32, u64, f32, f64);

// ============================================================================
// Compound assignment
// ============================================================================

macro_rules! impl_compound_assign {
    (@assign [$($g:tt)*] $target:ty, $trait:ident, $method:ident, $bound:ident, |$x:ident, $y:ident| $body:expr) => {
        impl<$($g)*, Rhs> $trait<Rhs> for $target
        where
            <$target as ArrayLikeMut>::Elem: $bound,
            Rhs: Operand<Elem = <$target as ArrayLikeMut>::Elem>,
        {
            #[inline]
            #[track_caller]
            fn $method(&mut self, rhs: Rhs) {
                self.update(rhs, |$x, $y| $body);
            }
        }
    };
    ($([$($g:tt)*] $target:ty;)*) => {
        $(
            impl_compound_assign!(@assign [$($g)*] $target, AddAssign, add_assign, Element, |x, y| x + y);
            impl_compound_assign!(@assign [$($g)*] $target, SubAssign, sub_assign, Element, |x, y| x - y);
            impl_compound_assign!(@assign [$($g)*] $target, MulAssign, mul_assign, Element, |x, y| x * y);
            impl_compound_assign!(@assign [$($g)*] $target, DivAssign, div_assign, Element, |x, y| x / y);
            impl_compound_assign!(@assign [$($g)*] $target, RemAssign, rem_assign, Integral, |x, y| x % y);
        )*
    };
}

impl_compound_assign! {
    [T: Element] Array<T>;
    ['a, T: Element] SliceMut<'a, T>;
    ['a, T: Element] IndexViewMut<'a, T>;
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;
    use crate::slice::{odd, reverse, without_ind, IndexList};

    #[test]
    fn test_array_with_array() {
        let a = Array::from_vec(vec![1, 2, 3]);
        let b = Array::from_vec(vec![3, 2, 1]);
        assert_eq!((&a + &b).to_array().as_slice(), &[4, 4, 4]);
        assert_eq!((&a - &b).to_array().as_slice(), &[-2, 0, 2]);
        assert_eq!((&a * &b).to_array().as_slice(), &[3, 4, 3]);
        assert_eq!((&a / &b).to_array().as_slice(), &[0, 1, 3]);
    }

    #[test]
    fn test_materialize_matches_elementwise() {
        let a = Array::from_vec(vec![0.5, -1.25, 3.0, 8.0]);
        let b = Array::from_vec(vec![2.0, 4.0, -0.5, 1.0]);
        let c = (&a + &b).to_array();
        for i in 0..a.len() {
            assert_eq!(c[i], a[i] + b[i]);
        }
    }

    #[test]
    fn test_chained_expression() {
        let a = Array::from_vec(vec![1.0, 2.0, 3.0]);
        let b = Array::from_vec(vec![2.0, 2.0, 2.0]);
        let node = (&a * &b + 1.0) / (&b - 1.0) - &a;
        assert_eq!(node.to_array().as_slice(), &[2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_scalar_left_over_views_and_nodes() {
        let a = Array::from_vec(vec![1.0f32, 2.0, 4.0]);
        let node = 8.0f32 / &a;
        assert_eq!(node.to_array().as_slice(), &[8.0, 4.0, 2.0]);
        assert_eq!((1.0f32 - node).to_array().as_slice(), &[-7.0, -3.0, -1.0]);
        assert_eq!((2.0f32 * reverse(&a)).to_array().as_slice(), &[8.0, 4.0, 2.0]);
    }

    #[test]
    fn test_ops_on_every_view() {
        let a = Array::from_vec(vec![1i64, 2, 3, 4]);
        let removed = IndexList::new([1, 2]).unwrap();
        assert_eq!((without_ind(&a, removed) * 10i64).to_array().as_slice(), &[10, 40]);
        assert_eq!((a.select(IndexList::new([3]).unwrap()) - 1i64).to_array().as_slice(), &[3]);
        assert_eq!((a.slice(odd()) + a.slice(odd())).to_array().as_slice(), &[4, 8]);
        assert_eq!((-a.slice(odd()).concat(&a)).len(), 6);
        assert_eq!((a.slice(odd()) % 3i64).to_array().as_slice(), &[2, 1]);
    }

    #[test]
    fn test_borrowed_node_reused() {
        let a = Array::from_vec(vec![1, 2]);
        let sq = &a * &a;
        let twice = &sq + &sq;
        let plus = &sq + 1;
        assert_eq!(twice.to_array().as_slice(), &[2, 8]);
        assert_eq!(plus.to_array().as_slice(), &[2, 5]);
    }

    #[test]
    fn test_compound_assign_through_index_view() {
        let mut a = Array::from_vec(vec![1u8, 2, 3, 4]);
        let mut v = a.select_mut(IndexList::new([0, 3]).unwrap());
        v *= 3u8;
        v += 1u8;
        assert_eq!(a.as_slice(), &[4, 2, 3, 13]);
    }

    #[test]
    fn test_compound_assign_with_expression() {
        let mut acc: Array<f64> = Array::new(3);
        let x = Array::from_vec(vec![1.0, 2.0, 3.0]);
        acc += &x * &x;
        acc -= &x;
        acc /= 2.0;
        assert_eq!(acc.as_slice(), &[0.0, 1.0, 3.0]);
    }
}
