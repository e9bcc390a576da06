//! Xact Numeric
//!
//! Exact-kind 1-D numeric arrays with lazy elementwise expressions and
//! compensated reductions.
//!
//! # Architecture
//!
//! Arithmetic over arrays and views builds a tree of expression nodes;
//! nothing is computed until the tree is read by a reduction, materialized
//! into an [`Array`], or assigned through a mutable view.
//!
//! | Layer | Module | Role |
//! |-------|--------|------|
//! | Kinds | [`element`] | scalar contract, explicit casts |
//! | Storage | [`array`] | the only owner of element buffers |
//! | Contract | [`operand`] | `ArrayLike`, `Operand`, `ArrayLikeMut` |
//! | Expressions | [`expr`] | lazy unary/binary nodes, operator overloads |
//! | Views | [`slice`] | strided, indexed, complement, reversed, concatenated |
//! | EFT | [`eft`] | two-sum, two-product, power splits |
//! | Reductions | [`reduce`], [`compensated`] | plain and compensated |
//!
//! # Kinds
//!
//! No value ever changes kind implicitly: `&a + &b` only type-checks when `a`
//! and `b` hold the same element type, and [`cast`] is the one way across.
//!
//! # Errors
//!
//! Programmer errors (mismatched lengths, empty reductions, views outside
//! their base) panic in debug builds and are logged through `tracing` in
//! release builds. The `try_*` constructors, [`cast`] and [`checked_div`]
//! return [`NumericError`] instead.
//!
//! # FFI Exports
//!
//! - `xact_stable_sum_f64`, `xact_stable_sum_f32` - Compensated sum
//! - `xact_stable_dot_f64`, `xact_stable_dot_f32` - Compensated dot product
//! - `xact_two_prod_f64`, `xact_two_prod_f32` - Error-free product
//! - `xact_stable_polynomial_f64` - Compensated polynomial
//!
//! # Features
//!
//! - **checked-div**: debug assertion on zero divisors in `/`
//! - **serde**: serialization of arrays, kinds, descriptors and EFT pairs
//!
//! # Example
//!
//! ```
//! use xact_numeric::prelude::*;
//! use xact_numeric::slice::even;
//!
//! let mut a = Array::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
//! assert_eq!(stable_dot_prod(&a, reverse(&a)), 56.0);
//! assert_eq!(a.slice(even()).to_array().as_slice(), &[1.0, 3.0, 5.0]);
//!
//! a.slice_mut(even()).assign(-1.0);
//! assert_eq!(a.as_slice(), &[-1.0, 2.0, -1.0, 4.0, -1.0, 6.0]);
//! ```

#![warn(missing_docs)]
#![allow(unsafe_code)] // FFI exports read raw caller buffers

pub mod array;
pub mod compensated;
pub mod eft;
pub mod element;
pub mod error;
pub mod expr;
pub mod ffi;
pub mod operand;
pub mod reduce;
pub mod slice;

pub use array::Array;
pub use compensated::{
    stable_dot_prod, stable_mean, stable_norm1, stable_norm2, stable_polynomial, stable_sum,
};
pub use eft::{fast_two_sum, two_pow, two_power, two_prod, two_product, two_sum, EftPair};
pub use element::{cast, Element, Integral, Kind, Real};
pub use error::{NumericError, Result};
pub use expr::ops::OpTag;
pub use expr::{
    abs, checked_div, cos, exp, ln, powi, sin, sqrt, tan, tanh, BinaryExpr, UnaryExpr,
};
pub use operand::{ArrayLike, ArrayLikeMut, Capture, Elements, Operand};
pub use reduce::{
    all_positive, all_satisfy, any_satisfy, dot_prod, has_zero, max, max_index, mean, min,
    min_index, norm1, norm2, norm_inf, polynomial, scaled_norm1, scaled_norm2, sum,
};
pub use slice::{
    concat, reverse, without_ind, IndexList, IndexView, IndexViewMut, Pos, Slice, SliceMut,
    SliceSpec, Strided,
};

/// Everything needed to build and reduce expressions.
pub mod prelude {
    pub use crate::array::Array;
    pub use crate::compensated::{
        stable_dot_prod, stable_mean, stable_norm1, stable_norm2, stable_polynomial, stable_sum,
    };
    pub use crate::element::{Element, Integral, Real};
    pub use crate::operand::{ArrayLike, ArrayLikeMut, Operand};
    pub use crate::reduce::{
        all_positive, all_satisfy, any_satisfy, dot_prod, has_zero, max, max_index, mean, min,
        min_index, norm1, norm2, norm_inf, polynomial, scaled_norm1, scaled_norm2, sum,
    };
    pub use crate::slice::{concat, reverse, without_ind, IndexList};
}
