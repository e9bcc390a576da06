//! The array-like contract
//!
//! Arrays, views and expression nodes all expose the same read contract,
//! [`ArrayLike`]: a length and elementwise access by position. Everything
//! else (views, reductions, materialization) is written once against that
//! trait.
//!
//! # Capture
//!
//! When an operand is placed into an expression node it is captured in one
//! of two ways, reported by [`Capture`]:
//!
//! | Operand | Capture | Why it is safe |
//! |---------|---------|----------------|
//! | `&Array`, `&view`, `&node` | `Borrowed` | the borrow checker keeps the base alive |
//! | unnamed node or view | `Inline` | moved into the parent node |
//! | scalar | `Inline` | copied |
//!
//! A persistent operand is never copied and a temporary can never dangle.

use crate::array::Array;
use crate::element::Element;
use crate::error::{violated, NumericError, Result};
use crate::slice::{Complement, Concat, IndexList, IndexView, Reversed, Slice, SliceSpec};

/// How an operand is held by the node or view that consumes it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Capture {
    /// Held by reference; the referent is owned by the caller.
    Borrowed,
    /// Held by value inside the consuming node.
    Inline,
}

/// Read access shared by arrays, views and expression nodes.
pub trait ArrayLike {
    /// Element type.
    type Elem: Element;

    /// How this operand is held when consumed by a node or view.
    const CAPTURE: Capture;

    /// Number of elements.
    fn len(&self) -> usize;

    /// Element at `index`, recomputed on every call for expression nodes.
    ///
    /// # Panics
    ///
    /// Panics if `index` is outside the underlying storage.
    fn at(&self, index: usize) -> Self::Elem;

    /// Returns true when there are no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bounds-checked element access.
    fn try_at(&self, index: usize) -> Result<Self::Elem> {
        if index < self.len() {
            Ok(self.at(index))
        } else {
            Err(NumericError::IndexOutOfRange {
                index,
                len: self.len(),
            })
        }
    }

    /// Iterates over the elements from first to last.
    fn iter(&self) -> Elements<'_, Self>
    where
        Self: Sized,
    {
        Elements {
            source: self,
            front: 0,
            back: self.len(),
        }
    }

    /// Evaluates every element into a new array.
    fn to_array(&self) -> Array<Self::Elem>
    where
        Self: Sized,
    {
        tracing::trace!(len = self.len(), "materializing");
        self.iter().collect()
    }

    /// Strided view over this operand.
    fn slice(self, spec: impl Into<SliceSpec>) -> Slice<Self>
    where
        Self: Sized,
    {
        Slice::new(self, spec)
    }

    /// Strided view, reporting descriptors that reach outside this operand.
    fn try_slice(self, spec: impl Into<SliceSpec>) -> Result<Slice<Self>>
    where
        Self: Sized,
    {
        Slice::try_new(self, spec)
    }

    /// View of the positions listed in `indices`.
    fn select(self, indices: IndexList) -> IndexView<Self>
    where
        Self: Sized,
    {
        IndexView::new(self, indices)
    }

    /// Index view, reporting positions outside this operand.
    fn try_select(self, indices: IndexList) -> Result<IndexView<Self>>
    where
        Self: Sized,
    {
        IndexView::try_new(self, indices)
    }

    /// View of every position not listed in `removed`.
    fn without(self, removed: IndexList) -> Complement<Self>
    where
        Self: Sized,
    {
        Complement::new(self, removed)
    }

    /// View in reverse order.
    fn reversed(self) -> Reversed<Self>
    where
        Self: Sized,
    {
        Reversed::new(self)
    }

    /// View of this operand followed by `tail`.
    fn concat<B>(self, tail: B) -> Concat<Self, B>
    where
        Self: Sized,
        B: ArrayLike<Elem = Self::Elem>,
    {
        Concat::new(self, tail)
    }
}

/// One side of an elementwise operator: any [`ArrayLike`] or a bare scalar.
pub trait Operand {
    /// Element type.
    type Elem: Element;

    /// How this operand is held by the node.
    const CAPTURE: Capture;

    /// Number of elements, or `None` for a broadcast scalar.
    fn extent(&self) -> Option<usize>;

    /// Value at `index`; scalars ignore the position.
    fn value(&self, index: usize) -> Self::Elem;
}

impl<A: ArrayLike> Operand for A {
    type Elem = A::Elem;

    const CAPTURE: Capture = <A as ArrayLike>::CAPTURE;

    #[inline]
    fn extent(&self) -> Option<usize> {
        Some(self.len())
    }

    #[inline]
    fn value(&self, index: usize) -> Self::Elem {
        self.at(index)
    }
}

macro_rules! impl_scalar_operand {
    ($($t:ty),* $(,)?) => {
        $(
            impl Operand for $t {
                type Elem = $t;

                const CAPTURE: Capture = Capture::Inline;

                #[inline]
                fn extent(&self) -> Option<usize> {
                    None
                }

                #[inline]
                fn value(&self, _index: usize) -> $t {
                    *self
                }
            }
        )*
    };
}

impl_scalar_operand!(i8, i16, i32, i64, u8, u16, u32, u64, f32, f64);

impl<'a, A: ArrayLike> ArrayLike for &'a A {
    type Elem = A::Elem;

    const CAPTURE: Capture = Capture::Borrowed;

    #[inline]
    fn len(&self) -> usize {
        (**self).len()
    }

    #[inline]
    fn at(&self, index: usize) -> Self::Elem {
        (**self).at(index)
    }
}

impl<'a, T: Element> ArrayLike for &'a [T] {
    type Elem = T;

    const CAPTURE: Capture = Capture::Borrowed;

    #[inline]
    fn len(&self) -> usize {
        <[T]>::len(self)
    }

    #[inline]
    fn at(&self, index: usize) -> T {
        self[index]
    }
}

/// Write access shared by arrays and mutable views.
///
/// Assignment walks the source once per position, so any expression can be
/// written through a view without materializing it first.
pub trait ArrayLikeMut {
    /// Element type.
    type Elem: Element;

    /// Number of writable positions.
    fn target_len(&self) -> usize;

    /// Mutable slot at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is outside the underlying storage.
    fn slot_mut(&mut self, index: usize) -> &mut Self::Elem;

    /// Writes `source` elementwise; a scalar source fills every position.
    #[track_caller]
    fn assign<R>(&mut self, source: R)
    where
        Self: Sized,
        R: Operand<Elem = Self::Elem>,
    {
        self.update(source, |_, incoming| incoming);
    }

    /// Checked [`assign`](Self::assign).
    fn try_assign<R>(&mut self, source: R) -> Result<()>
    where
        Self: Sized,
        R: Operand<Elem = Self::Elem>,
    {
        check_target(self.target_len(), source.extent())?;
        self.assign(source);
        Ok(())
    }

    /// Sets every position to `value`.
    fn fill(&mut self, value: Self::Elem) {
        for i in 0..self.target_len() {
            *self.slot_mut(i) = value;
        }
    }

    /// Copies a list of values, one per position.
    #[track_caller]
    fn copy_from_slice(&mut self, values: &[Self::Elem]) {
        if values.len() != self.target_len() {
            violated(&NumericError::LengthMismatch {
                left: self.target_len(),
                right: values.len(),
            });
        }
        let n = self.target_len().min(values.len());
        for (i, &v) in values.iter().take(n).enumerate() {
            *self.slot_mut(i) = v;
        }
    }

    /// Replaces each element `x` with `f(x, source[i])`.
    #[track_caller]
    fn update<R, F>(&mut self, source: R, f: F)
    where
        Self: Sized,
        R: Operand<Elem = Self::Elem>,
        F: Fn(Self::Elem, Self::Elem) -> Self::Elem,
    {
        let n = match check_target(self.target_len(), source.extent()) {
            Ok(()) => self.target_len(),
            Err(err) => {
                violated(&err);
                self.target_len().min(source.extent().unwrap_or(0))
            }
        };
        for i in 0..n {
            let slot = self.slot_mut(i);
            *slot = f(*slot, source.value(i));
        }
    }
}

fn check_target(target: usize, extent: Option<usize>) -> Result<()> {
    match extent {
        Some(n) if n != target => Err(NumericError::LengthMismatch {
            left: target,
            right: n,
        }),
        _ => Ok(()),
    }
}

/// Iterator over the elements of an [`ArrayLike`].
#[derive(Debug)]
pub struct Elements<'a, A> {
    source: &'a A,
    front: usize,
    back: usize,
}

impl<A: ArrayLike> Iterator for Elements<'_, A> {
    type Item = A::Elem;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.front < self.back {
            let v = self.source.at(self.front);
            self.front += 1;
            Some(v)
        } else {
            None
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.back - self.front;
        (n, Some(n))
    }
}

impl<A: ArrayLike> DoubleEndedIterator for Elements<'_, A> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front < self.back {
            self.back -= 1;
            Some(self.source.at(self.back))
        } else {
            None
        }
    }
}

impl<A: ArrayLike> ExactSizeIterator for Elements<'_, A> {}
