//! Slices and views
//!
//! A view aliases a base operand through a descriptor and never owns
//! element storage. Descriptors come in two families:
//!
//! - [`SliceSpec`]: a length-relative description (closed range, parity,
//!   skip-N, last-relative positions) resolved against the base length each
//!   time it is applied, producing a [`Strided`] `(start, count, stride)`.
//! - [`IndexList`]: an explicit, strictly increasing list of positions.
//!
//! Every view is itself [`ArrayLike`](crate::ArrayLike), so views compose
//! over arrays, other views and expression nodes alike. Views over a mutable
//! buffer ([`SliceMut`], [`IndexViewMut`]) also write through to it.
//!
//! # Example
//!
//! ```
//! use xact_numeric::prelude::*;
//! use xact_numeric::slice::{even, range, last};
//!
//! let mut a = Array::from_vec(vec![1, 2, 3, 4, 5, 6]);
//! assert_eq!(a.slice(even()).to_array().as_slice(), &[1, 3, 5]);
//! assert_eq!(a.slice(range(1, last())).to_array().as_slice(), &[2, 3, 4, 5, 6]);
//!
//! a.slice_mut(even()).assign(-1);
//! assert_eq!(a.as_slice(), &[-1, 2, -1, 4, -1, 6]);
//! ```

mod view;
mod view_mut;

pub use view::{concat, reverse, without_ind, Complement, Concat, IndexView, Reversed, Slice};
pub use view_mut::{IndexViewMut, SliceMut};

use smallvec::SmallVec;

use crate::error::{violated, NumericError, Result};

// ============================================================================
// Positions
// ============================================================================

/// A position, either absolute or counted back from the last element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Pos {
    /// Absolute position.
    At(usize),
    /// `n` positions before the last element (`FromLast(0)` is the last).
    FromLast(usize),
}

impl Pos {
    /// Resolves against a base of length `len`.
    ///
    /// Returns `None` when a last-relative position falls before the start.
    #[must_use]
    pub fn resolve(self, len: usize) -> Option<usize> {
        match self {
            Self::At(n) => Some(n),
            Self::FromLast(n) => len.checked_sub(n + 1),
        }
    }
}

impl From<usize> for Pos {
    fn from(n: usize) -> Self {
        Self::At(n)
    }
}

/// The last position of whatever base the descriptor is applied to.
#[must_use]
pub const fn last() -> Pos {
    Pos::FromLast(0)
}

/// The position `n` before the last one.
#[must_use]
pub const fn last_minus(n: usize) -> Pos {
    Pos::FromLast(n)
}

// ============================================================================
// Strided descriptor
// ============================================================================

/// A resolved `(start, count, stride)` descriptor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Strided {
    start: usize,
    count: usize,
    stride: usize,
}

impl Strided {
    /// Creates a descriptor touching `start + i * stride` for `i < count`.
    #[must_use]
    pub const fn new(start: usize, count: usize, stride: usize) -> Self {
        Self {
            start,
            count,
            stride,
        }
    }

    /// The descriptor selecting nothing.
    #[must_use]
    pub const fn empty() -> Self {
        Self::new(0, 0, 1)
    }

    /// First position.
    #[must_use]
    pub const fn start(&self) -> usize {
        self.start
    }

    /// Number of positions.
    #[must_use]
    pub const fn count(&self) -> usize {
        self.count
    }

    /// Distance between consecutive positions.
    #[must_use]
    pub const fn stride(&self) -> usize {
        self.stride
    }

    /// Base position of the `i`-th element.
    #[inline]
    #[must_use]
    pub const fn position(&self, i: usize) -> usize {
        self.start + i * self.stride
    }

    /// Last touched position, if any; saturates at `usize::MAX`.
    #[must_use]
    pub const fn last_position(&self) -> Option<usize> {
        if self.count == 0 {
            None
        } else {
            Some(
                self.start
                    .saturating_add((self.count - 1).saturating_mul(self.stride)),
            )
        }
    }

    /// Checks the descriptor against a base of length `len`.
    pub fn validate(&self, len: usize) -> Result<()> {
        if self.stride == 0 {
            return Err(NumericError::InvalidSlice {
                reason: "stride must be at least 1",
            });
        }
        if self.count == 0 {
            return Ok(());
        }
        let last = (self.count - 1)
            .checked_mul(self.stride)
            .and_then(|offset| offset.checked_add(self.start));
        match last {
            Some(last) if self.start < len && last < len => Ok(()),
            last => Err(NumericError::SliceOutOfRange {
                first: self.start,
                last: last.unwrap_or(usize::MAX),
                len,
            }),
        }
    }

    /// The single descriptor equivalent to applying `inner` to a view made
    /// with `self`.
    /// Saturates, since an empty `inner` may carry any start.
    #[must_use]
    pub const fn compose(&self, inner: &Strided) -> Strided {
        Strided {
            start: self
                .start
                .saturating_add(inner.start.saturating_mul(self.stride)),
            count: inner.count,
            stride: self.stride.saturating_mul(inner.stride),
        }
    }
}

// ============================================================================
// Length-relative descriptors
// ============================================================================

/// A slice description resolved against the base length at use time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SliceSpec {
    /// Every position.
    All,
    /// An explicit `(start, count, stride)` triple.
    Strided(Strided),
    /// Closed range `first..=last` stepping by `stride`.
    Range {
        /// First position.
        first: Pos,
        /// Last position (inclusive upper bound).
        last: Pos,
        /// Step between positions.
        stride: usize,
    },
    /// Positions `0, 2, 4, ...`.
    Even,
    /// Positions `1, 3, 5, ...`.
    Odd,
    /// Positions `start, start + stride, ...` up to the end of the base.
    Skip {
        /// First position.
        start: usize,
        /// Step between positions.
        stride: usize,
    },
}

impl SliceSpec {
    /// Normalizes to a [`Strided`] descriptor for a base of length `len`,
    /// checking that every touched position lies in `0..len`.
    pub fn resolve(&self, len: usize) -> Result<Strided> {
        let strided = match *self {
            Self::All => Strided::new(0, len, 1),
            Self::Strided(s) => s,
            Self::Range {
                first,
                last,
                stride,
            } => {
                if stride == 0 {
                    return Err(NumericError::InvalidSlice {
                        reason: "stride must be at least 1",
                    });
                }
                let (first, last) = match (first.resolve(len), last.resolve(len)) {
                    (Some(f), Some(l)) => (f, l),
                    _ => {
                        return Err(NumericError::InvalidSlice {
                            reason: "last-relative position precedes the first element",
                        })
                    }
                };
                if last < first {
                    return Err(NumericError::InvalidSlice {
                        reason: "range ends before it starts",
                    });
                }
                Strided::new(first, (last - first) / stride + 1, stride)
            }
            Self::Even => Strided::new(0, (len + 1) / 2, 2),
            Self::Odd => Strided::new(1, len / 2, 2),
            Self::Skip { start, stride } => {
                if stride == 0 {
                    return Err(NumericError::InvalidSlice {
                        reason: "stride must be at least 1",
                    });
                }
                let count = if start < len {
                    (len - start - 1) / stride + 1
                } else {
                    0
                };
                Strided::new(start, count, stride)
            }
        };
        strided.validate(len)?;
        Ok(strided)
    }

    /// Like [`resolve`](Self::resolve), treating a bad descriptor as a
    /// precondition violation and falling back to an empty selection.
    #[track_caller]
    pub(crate) fn resolve_or_empty(&self, len: usize) -> Strided {
        match self.resolve(len) {
            Ok(s) => s,
            Err(err) => {
                violated(&err);
                Strided::empty()
            }
        }
    }
}

impl From<Strided> for SliceSpec {
    fn from(s: Strided) -> Self {
        Self::Strided(s)
    }
}

impl From<std::ops::Range<usize>> for SliceSpec {
    fn from(r: std::ops::Range<usize>) -> Self {
        Self::Strided(Strided::new(r.start, r.end.saturating_sub(r.start), 1))
    }
}

impl From<std::ops::RangeInclusive<usize>> for SliceSpec {
    fn from(r: std::ops::RangeInclusive<usize>) -> Self {
        range(*r.start(), *r.end())
    }
}

impl From<std::ops::RangeFull> for SliceSpec {
    fn from(_: std::ops::RangeFull) -> Self {
        Self::All
    }
}

/// Every position.
#[must_use]
pub const fn all() -> SliceSpec {
    SliceSpec::All
}

/// Closed range `first..=last`.
#[must_use]
pub fn range(first: impl Into<Pos>, last: impl Into<Pos>) -> SliceSpec {
    range_by(first, last, 1)
}

/// Closed range `first..=last` stepping by `stride`.
#[must_use]
pub fn range_by(first: impl Into<Pos>, last: impl Into<Pos>, stride: usize) -> SliceSpec {
    SliceSpec::Range {
        first: first.into(),
        last: last.into(),
        stride,
    }
}

/// Even positions.
#[must_use]
pub const fn even() -> SliceSpec {
    SliceSpec::Even
}

/// Odd positions.
#[must_use]
pub const fn odd() -> SliceSpec {
    SliceSpec::Odd
}

/// `start, start + stride, ...` through the end of the base.
#[must_use]
pub const fn skip(start: usize, stride: usize) -> SliceSpec {
    SliceSpec::Skip { start, stride }
}

/// An explicit `(start, count, stride)` triple.
#[must_use]
pub const fn strided(start: usize, count: usize, stride: usize) -> SliceSpec {
    SliceSpec::Strided(Strided::new(start, count, stride))
}

// ============================================================================
// Explicit index lists
// ============================================================================

/// A strictly increasing list of positions.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IndexList(SmallVec<[usize; 8]>);

impl IndexList {
    /// Builds a list, rejecting duplicate or descending entries.
    pub fn new(indices: impl IntoIterator<Item = usize>) -> Result<Self> {
        let list: SmallVec<[usize; 8]> = indices.into_iter().collect();
        if let Some(position) = list.windows(2).position(|w| w[0] >= w[1]) {
            return Err(NumericError::UnsortedIndices {
                position: position + 1,
            });
        }
        Ok(Self(list))
    }

    /// Wraps positions already known to be strictly increasing.
    pub(crate) fn from_sorted(list: SmallVec<[usize; 8]>) -> Self {
        debug_assert!(list.windows(2).all(|w| w[0] < w[1]));
        Self(list)
    }

    /// Number of positions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true when the list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The positions.
    #[must_use]
    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    /// Largest position, if any.
    #[must_use]
    pub fn last(&self) -> Option<usize> {
        self.0.last().copied()
    }

    /// Returns true when `pos` is listed.
    #[must_use]
    pub fn contains(&self, pos: usize) -> bool {
        self.0.binary_search(&pos).is_ok()
    }

    /// Checks every position against a base of length `len`.
    pub fn validate(&self, len: usize) -> Result<()> {
        match (self.0.first(), self.last()) {
            (Some(&first), Some(last)) if last >= len => {
                Err(NumericError::SliceOutOfRange { first, last, len })
            }
            _ => Ok(()),
        }
    }

    /// The list equivalent to selecting `inner` from a view made with `self`.
    pub fn compose(&self, inner: &IndexList) -> Result<IndexList> {
        inner.validate(self.len())?;
        Ok(Self::from_sorted(
            inner.0.iter().map(|&k| self.0[k]).collect(),
        ))
    }

    /// The positions of `strided` applied to a view made with `self`.
    pub(crate) fn compose_strided(&self, strided: &Strided) -> IndexList {
        Self::from_sorted(
            (0..strided.count())
                .map(|k| self.0[strided.position(k)])
                .collect(),
        )
    }
}

impl TryFrom<Vec<usize>> for IndexList {
    type Error = NumericError;

    fn try_from(v: Vec<usize>) -> Result<Self> {
        Self::new(v)
    }
}

impl TryFrom<&[usize]> for IndexList {
    type Error = NumericError;

    fn try_from(v: &[usize]) -> Result<Self> {
        Self::new(v.iter().copied())
    }
}
