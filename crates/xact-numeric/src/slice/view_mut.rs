//! Views that write through to a mutable buffer.

use super::{IndexList, SliceSpec, Strided};
use crate::element::Element;
use crate::error::{violated, Result};
use crate::operand::{ArrayLike, ArrayLikeMut, Capture};

/// Strided view with write access to the underlying elements.
#[derive(Debug)]
pub struct SliceMut<'a, T> {
    data: &'a mut [T],
    strided: Strided,
}

impl<'a, T: Element> SliceMut<'a, T> {
    /// Creates a writable view; an out-of-range descriptor is a precondition
    /// violation and yields an empty view in release builds.
    #[track_caller]
    pub fn new(data: &'a mut [T], spec: impl Into<SliceSpec>) -> Self {
        let strided = spec.into().resolve_or_empty(data.len());
        Self { data, strided }
    }

    /// Creates a writable view, reporting out-of-range descriptors.
    pub fn try_new(data: &'a mut [T], spec: impl Into<SliceSpec>) -> Result<Self> {
        let strided = spec.into().resolve(data.len())?;
        Ok(Self { data, strided })
    }

    /// Number of positions in the view.
    pub fn len(&self) -> usize {
        self.strided.count()
    }

    /// Returns true when the view selects nothing.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The resolved descriptor, relative to the underlying buffer.
    pub fn strided(&self) -> Strided {
        self.strided
    }

    /// Writable slice of this view, reborrowing the same buffer.
    #[track_caller]
    pub fn slice_mut(&mut self, spec: impl Into<SliceSpec>) -> SliceMut<'_, T> {
        let inner = spec.into().resolve_or_empty(self.len());
        SliceMut {
            strided: self.strided.compose(&inner),
            data: &mut *self.data,
        }
    }

    /// Writable selection of positions within this view.
    #[track_caller]
    pub fn select_mut(&mut self, indices: IndexList) -> IndexViewMut<'_, T> {
        let indices = match indices.validate(self.len()) {
            Ok(()) => indices,
            Err(err) => {
                violated(&err);
                IndexList::default()
            }
        };
        let strided = self.strided;
        let positions = indices
            .as_slice()
            .iter()
            .map(|&k| strided.position(k))
            .collect();
        IndexViewMut {
            data: &mut *self.data,
            indices: IndexList::from_sorted(positions),
        }
    }
}

impl<'b, 'a, T: Element> ArrayLike for &'b SliceMut<'a, T> {
    type Elem = T;

    const CAPTURE: Capture = Capture::Borrowed;

    #[inline]
    fn len(&self) -> usize {
        self.strided.count()
    }

    #[inline]
    fn at(&self, index: usize) -> T {
        debug_assert!(index < self.strided.count(), "slice index out of range");
        self.data[self.strided.position(index)]
    }
}

impl<T: Element> ArrayLikeMut for SliceMut<'_, T> {
    type Elem = T;

    #[inline]
    fn target_len(&self) -> usize {
        self.strided.count()
    }

    #[inline]
    fn slot_mut(&mut self, index: usize) -> &mut T {
        debug_assert!(index < self.strided.count(), "slice index out of range");
        &mut self.data[self.strided.position(index)]
    }
}

/// Index view with write access to the underlying elements.
#[derive(Debug)]
pub struct IndexViewMut<'a, T> {
    data: &'a mut [T],
    indices: IndexList,
}

impl<'a, T: Element> IndexViewMut<'a, T> {
    /// Creates a writable index view; positions outside the buffer are a
    /// precondition violation and yield an empty view in release builds.
    #[track_caller]
    pub fn new(data: &'a mut [T], indices: IndexList) -> Self {
        match indices.validate(data.len()) {
            Ok(()) => Self { data, indices },
            Err(err) => {
                violated(&err);
                Self {
                    data,
                    indices: IndexList::default(),
                }
            }
        }
    }

    /// Creates a writable index view, reporting positions outside the buffer.
    pub fn try_new(data: &'a mut [T], indices: IndexList) -> Result<Self> {
        indices.validate(data.len())?;
        Ok(Self { data, indices })
    }

    /// Number of positions in the view.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Returns true when the view selects nothing.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Selected positions of the underlying buffer.
    pub fn indices(&self) -> &IndexList {
        &self.indices
    }

    /// Writable slice of this view.
    #[track_caller]
    pub fn slice_mut(&mut self, spec: impl Into<SliceSpec>) -> IndexViewMut<'_, T> {
        let inner = spec.into().resolve_or_empty(self.len());
        IndexViewMut {
            indices: self.indices.compose_strided(&inner),
            data: &mut *self.data,
        }
    }

    /// Writable sub-selection of this view.
    #[track_caller]
    pub fn select_mut(&mut self, indices: IndexList) -> IndexViewMut<'_, T> {
        let indices = match self.indices.compose(&indices) {
            Ok(composed) => composed,
            Err(err) => {
                violated(&err);
                IndexList::default()
            }
        };
        IndexViewMut {
            data: &mut *self.data,
            indices,
        }
    }
}

impl<'b, 'a, T: Element> ArrayLike for &'b IndexViewMut<'a, T> {
    type Elem = T;

    const CAPTURE: Capture = Capture::Borrowed;

    #[inline]
    fn len(&self) -> usize {
        self.indices.len()
    }

    #[inline]
    fn at(&self, index: usize) -> T {
        self.data[self.indices.as_slice()[index]]
    }
}

impl<T: Element> ArrayLikeMut for IndexViewMut<'_, T> {
    type Elem = T;

    #[inline]
    fn target_len(&self) -> usize {
        self.indices.len()
    }

    #[inline]
    fn slot_mut(&mut self, index: usize) -> &mut T {
        &mut self.data[self.indices.as_slice()[index]]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::array::Array;
    use crate::error::NumericError;
    use crate::slice::{even, odd, range, skip};

    #[test]
    fn test_assign_scalar_through_parity_view() {
        let mut a = Array::from_vec(vec![1, 2, 3, 4, 5, 6]);
        a.slice_mut(even()).assign(-1);
        assert_eq!(a.as_slice(), &[-1, 2, -1, 4, -1, 6]);
    }

    #[test]
    fn test_assign_expression_through_view() {
        let src = Array::from_vec(vec![10.0, 20.0, 30.0]);
        let mut a: Array<f64> = Array::new(6);
        a.slice_mut(odd()).assign(&src + 1.0);
        assert_eq!(a.as_slice(), &[0.0, 11.0, 0.0, 21.0, 0.0, 31.0]);
    }

    #[test]
    fn test_fill_and_copy() {
        let mut a: Array<u8> = Array::new(5);
        a.slice_mut(skip(1, 2)).fill(7);
        assert_eq!(a.as_slice(), &[0, 7, 0, 7, 0]);

        a.slice_mut(range(2, 4)).copy_from_slice(&[1, 2, 3]);
        assert_eq!(a.as_slice(), &[0, 7, 1, 2, 3]);
    }

    #[test]
    fn test_nested_mutable_views() {
        let mut a = Array::from_vec(vec![0i64; 10]);
        {
            let mut evens = a.slice_mut(even());
            // evens covers 0,2,4,6,8; its odd positions are 2 and 6
            evens.slice_mut(odd()).assign(5i64);
        }
        assert_eq!(a.as_slice(), &[0, 0, 5, 0, 0, 0, 5, 0, 0, 0]);

        let mut evens = a.slice_mut(even());
        evens
            .select_mut(IndexList::new([0, 4]).unwrap())
            .assign(9i64);
        assert_eq!(a.as_slice(), &[9, 0, 5, 0, 0, 0, 5, 0, 9, 0]);
    }

    #[test]
    fn test_index_view_mut() {
        let mut a = Array::from_vec(vec![1.0f32, 2.0, 3.0, 4.0, 5.0]);
        let mut v = a.select_mut(IndexList::new([0, 2, 3, 4]).unwrap());
        assert_eq!((&v).to_array().as_slice(), &[1.0, 3.0, 4.0, 5.0]);

        // odd positions of the view are base positions 2 and 4
        v.slice_mut(odd()).assign(0.0f32);
        assert_eq!(a.as_slice(), &[1.0, 2.0, 0.0, 4.0, 0.0]);

        let mut v = a.select_mut(IndexList::new([1, 4]).unwrap());
        v.select_mut(IndexList::new([1]).unwrap()).assign(-1.0f32);
        assert_eq!(a.as_slice(), &[1.0, 2.0, 0.0, 4.0, -1.0]);
    }

    #[test]
    fn test_try_new_rejects_out_of_range() {
        let mut a: Array<i32> = Array::new(3);
        assert!(matches!(
            a.try_slice_mut(range(1, 3)),
            Err(NumericError::SliceOutOfRange { .. })
        ));
        assert!(a.try_select_mut(IndexList::new([3]).unwrap()).is_err());
        assert!(a.try_slice_mut(range(1, 2)).is_ok());
    }

    #[test]
    fn test_read_back_through_mutable_view() {
        let mut a = Array::from_vec(vec![1, 2, 3, 4]);
        let v = a.slice_mut(odd());
        let doubled = (&v * 2).to_array();
        assert_eq!(doubled.as_slice(), &[4, 8]);
    }
}
