//! 1-D numeric arrays
//!
//! `Array<T>` owns a contiguous buffer of one numeric kind. It is the only
//! type in the crate that allocates element storage: expression nodes and
//! views read through to an array (or to each other) and a result persists
//! only once it is materialized into an `Array`.
//!
//! # Example
//!
//! ```
//! use xact_numeric::prelude::*;
//!
//! let a = Array::from_vec(vec![1.0, 2.0, 3.0]);
//! let b = Array::from_vec(vec![4.0, 5.0, 6.0]);
//!
//! // No arithmetic happens until the node is read.
//! let c = (&a + &b) * 2.0;
//! assert_eq!(c.to_array().as_slice(), &[10.0, 14.0, 18.0]);
//! ```

use std::fmt;
use std::ops::{Index, IndexMut};

use crate::element::{cast, Element};
use crate::error::{NumericError, Result};
use crate::operand::{ArrayLike, ArrayLikeMut, Capture};
use crate::slice::{IndexList, IndexViewMut, SliceMut, SliceSpec};

/// A contiguous 1-D numeric array.
#[derive(Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Array<T> {
    data: Vec<T>,
}

impl<T> Array<T> {
    /// Create an array from a Vec
    pub fn from_vec(data: Vec<T>) -> Self {
        Self { data }
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the array is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Slice of the elements
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Mutable slice of the elements
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Iterate over the elements
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    /// Convert into the underlying Vec
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }
}

impl<T: Element> Array<T> {
    /// Create an array of `len` zeros
    pub fn new(len: usize) -> Self {
        Self::filled(len, T::zero())
    }

    /// Create an array filled with a single value
    pub fn filled(len: usize, value: T) -> Self {
        Self {
            data: vec![value; len],
        }
    }

    /// Create from a slice
    pub fn from_slice(values: &[T]) -> Self {
        Self {
            data: values.to_vec(),
        }
    }

    /// Element at `index`, or `None` when out of range
    pub fn get(&self, index: usize) -> Option<T> {
        self.data.get(index).copied()
    }

    /// Bounds-checked read
    pub fn try_get(&self, index: usize) -> Result<T> {
        self.get(index).ok_or(NumericError::IndexOutOfRange {
            index,
            len: self.len(),
        })
    }

    /// Bounds-checked write
    pub fn try_set(&mut self, index: usize, value: T) -> Result<()> {
        let len = self.len();
        let slot = self
            .data
            .get_mut(index)
            .ok_or(NumericError::IndexOutOfRange { index, len })?;
        *slot = value;
        Ok(())
    }

    /// Resize to `len`, keeping the common prefix and zero-filling the rest.
    ///
    /// The new buffer is built before the old one is released, so a failed
    /// allocation leaves the array untouched.
    pub fn resize(&mut self, len: usize) {
        let keep = self.len().min(len);
        let mut data = Vec::with_capacity(len);
        data.extend_from_slice(&self.data[..keep]);
        data.resize(len, T::zero());
        tracing::debug!(from = self.len(), to = len, "resizing array");
        self.data = data;
    }

    /// Remove every position listed in `removed` with a single reallocation.
    ///
    /// The surviving elements keep their relative order.
    pub fn erase(&mut self, removed: &IndexList) {
        let kept: Self = self.without(removed.clone()).to_array();
        tracing::debug!(
            removed = removed.len(),
            remaining = kept.len(),
            "bulk removal"
        );
        *self = kept;
    }

    /// Writable strided view.
    pub fn slice_mut(&mut self, spec: impl Into<SliceSpec>) -> SliceMut<'_, T> {
        SliceMut::new(&mut self.data, spec)
    }

    /// Writable strided view, reporting descriptors outside the array.
    pub fn try_slice_mut(&mut self, spec: impl Into<SliceSpec>) -> Result<SliceMut<'_, T>> {
        SliceMut::try_new(&mut self.data, spec)
    }

    /// Writable view of the listed positions.
    pub fn select_mut(&mut self, indices: IndexList) -> IndexViewMut<'_, T> {
        IndexViewMut::new(&mut self.data, indices)
    }

    /// Writable index view, reporting positions outside the array.
    pub fn try_select_mut(&mut self, indices: IndexList) -> Result<IndexViewMut<'_, T>> {
        IndexViewMut::try_new(&mut self.data, indices)
    }

    /// Convert every element to kind `U`.
    ///
    /// Fails on the first value `U` cannot represent.
    pub fn cast<U: Element>(&self) -> Result<Array<U>> {
        self.data.iter().map(|&x| cast(x)).collect()
    }
}

impl<'a, T: Element> ArrayLike for &'a Array<T> {
    type Elem = T;

    const CAPTURE: Capture = Capture::Borrowed;

    #[inline]
    fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    fn at(&self, index: usize) -> T {
        self.data[index]
    }
}

impl<T: Element> ArrayLikeMut for Array<T> {
    type Elem = T;

    #[inline]
    fn target_len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    fn slot_mut(&mut self, index: usize) -> &mut T {
        &mut self.data[index]
    }
}

// ============================================================
// Trait Implementations
// ============================================================

impl<T> From<Vec<T>> for Array<T> {
    fn from(data: Vec<T>) -> Self {
        Self::from_vec(data)
    }
}

impl<T: Element> From<&[T]> for Array<T> {
    fn from(values: &[T]) -> Self {
        Self::from_slice(values)
    }
}

impl<T> FromIterator<T> for Array<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            data: iter.into_iter().collect(),
        }
    }
}

impl<T> Index<usize> for Array<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        &self.data[index]
    }
}

impl<T> IndexMut<usize> for Array<T> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.data[index]
    }
}

impl<T: fmt::Debug> fmt::Debug for Array<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Array({:?})", self.data)
    }
}

impl<T: fmt::Display> fmt::Display for Array<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, x) in self.data.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", x)?;
        }
        write!(f, "]")
    }
}
