//! Read-only views.

use smallvec::SmallVec;

use super::{IndexList, SliceSpec, Strided};
use crate::error::{violated, Result};
use crate::operand::{ArrayLike, Capture};

// ============================================================================
// Strided slice
// ============================================================================

/// Strided view of a base operand.
#[derive(Clone, Debug)]
pub struct Slice<B> {
    base: B,
    strided: Strided,
}

impl<B: ArrayLike> Slice<B> {
    /// Creates a view, resolving `spec` against the current base length.
    ///
    /// A descriptor reaching outside the base is a precondition violation;
    /// release builds fall back to an empty view.
    #[track_caller]
    pub fn new(base: B, spec: impl Into<SliceSpec>) -> Self {
        let strided = spec.into().resolve_or_empty(base.len());
        Self { base, strided }
    }

    /// Creates a view, reporting descriptors that reach outside the base.
    pub fn try_new(base: B, spec: impl Into<SliceSpec>) -> Result<Self> {
        let strided = spec.into().resolve(base.len())?;
        Ok(Self { base, strided })
    }

    /// The viewed operand.
    pub fn base(&self) -> &B {
        &self.base
    }

    /// The resolved descriptor.
    pub fn strided(&self) -> Strided {
        self.strided
    }

    /// Slices this view again, composing both descriptors into one so the
    /// result still reads the base directly.
    #[track_caller]
    pub fn narrow(self, spec: impl Into<SliceSpec>) -> Self {
        let inner = spec.into().resolve_or_empty(self.strided.count());
        Self {
            strided: self.strided.compose(&inner),
            base: self.base,
        }
    }
}

impl<B: ArrayLike> ArrayLike for Slice<B> {
    type Elem = B::Elem;

    const CAPTURE: Capture = Capture::Inline;

    #[inline]
    fn len(&self) -> usize {
        self.strided.count()
    }

    #[inline]
    fn at(&self, index: usize) -> B::Elem {
        debug_assert!(index < self.strided.count(), "slice index out of range");
        self.base.at(self.strided.position(index))
    }
}

// ============================================================================
// Index view
// ============================================================================

/// View of the positions in an [`IndexList`].
#[derive(Clone, Debug)]
pub struct IndexView<B> {
    base: B,
    indices: IndexList,
}

impl<B: ArrayLike> IndexView<B> {
    /// Creates a view; listed positions outside the base are a precondition
    /// violation and fall back to an empty view in release builds.
    #[track_caller]
    pub fn new(base: B, indices: IndexList) -> Self {
        match indices.validate(base.len()) {
            Ok(()) => Self { base, indices },
            Err(err) => {
                violated(&err);
                Self {
                    base,
                    indices: IndexList::default(),
                }
            }
        }
    }

    /// Creates a view, reporting positions outside the base.
    pub fn try_new(base: B, indices: IndexList) -> Result<Self> {
        indices.validate(base.len())?;
        Ok(Self { base, indices })
    }

    /// The viewed operand.
    pub fn base(&self) -> &B {
        &self.base
    }

    /// The selected positions.
    pub fn indices(&self) -> &IndexList {
        &self.indices
    }
}

impl<B: ArrayLike> ArrayLike for IndexView<B> {
    type Elem = B::Elem;

    const CAPTURE: Capture = Capture::Inline;

    #[inline]
    fn len(&self) -> usize {
        self.indices.len()
    }

    #[inline]
    fn at(&self, index: usize) -> B::Elem {
        self.base.at(self.indices.as_slice()[index])
    }
}

// ============================================================================
// Complement
// ============================================================================

/// View of every base position except those in an [`IndexList`].
#[derive(Clone, Debug)]
pub struct Complement<B> {
    base: B,
    removed: IndexList,
    // removed[j] - j; the view position where the j-th gap takes effect
    gaps: SmallVec<[usize; 8]>,
}

impl<B: ArrayLike> Complement<B> {
    /// Creates the complement view. Removed positions past the end of the
    /// base are a precondition violation and are ignored in release builds.
    #[track_caller]
    pub fn new(base: B, removed: IndexList) -> Self {
        let removed = match removed.validate(base.len()) {
            Ok(()) => removed,
            Err(err) => {
                violated(&err);
                let len = base.len();
                IndexList::from_sorted(
                    removed
                        .as_slice()
                        .iter()
                        .copied()
                        .filter(|&r| r < len)
                        .collect(),
                )
            }
        };
        let gaps = removed
            .as_slice()
            .iter()
            .enumerate()
            .map(|(j, &r)| r - j)
            .collect();
        Self {
            base,
            removed,
            gaps,
        }
    }

    /// The viewed operand.
    pub fn base(&self) -> &B {
        &self.base
    }

    /// The excluded positions.
    pub fn removed(&self) -> &IndexList {
        &self.removed
    }
}

impl<B: ArrayLike> ArrayLike for Complement<B> {
    type Elem = B::Elem;

    const CAPTURE: Capture = Capture::Inline;

    #[inline]
    fn len(&self) -> usize {
        self.base.len() - self.removed.len()
    }

    #[inline]
    fn at(&self, index: usize) -> B::Elem {
        let skipped = self.gaps.partition_point(|&g| g <= index);
        self.base.at(index + skipped)
    }
}

/// View of `base` without the positions in `removed`.
#[track_caller]
pub fn without_ind<B: ArrayLike>(base: B, removed: IndexList) -> Complement<B> {
    Complement::new(base, removed)
}

// ============================================================================
// Reversal and concatenation
// ============================================================================

/// View of a base operand in reverse order.
#[derive(Clone, Debug)]
pub struct Reversed<B> {
    base: B,
}

impl<B: ArrayLike> Reversed<B> {
    /// Creates the reversed view.
    pub fn new(base: B) -> Self {
        Self { base }
    }

    /// The viewed operand.
    pub fn base(&self) -> &B {
        &self.base
    }
}

impl<B: ArrayLike> ArrayLike for Reversed<B> {
    type Elem = B::Elem;

    const CAPTURE: Capture = Capture::Inline;

    #[inline]
    fn len(&self) -> usize {
        self.base.len()
    }

    #[inline]
    fn at(&self, index: usize) -> B::Elem {
        self.base.at(self.base.len() - 1 - index)
    }
}

/// `base` in reverse order.
pub fn reverse<B: ArrayLike>(base: B) -> Reversed<B> {
    Reversed::new(base)
}

/// View of one operand followed by another of the same kind.
#[derive(Clone, Debug)]
pub struct Concat<A, B> {
    head: A,
    tail: B,
}

impl<A, B> Concat<A, B>
where
    A: ArrayLike,
    B: ArrayLike<Elem = A::Elem>,
{
    /// Creates the concatenated view.
    pub fn new(head: A, tail: B) -> Self {
        Self { head, tail }
    }

    /// The leading operand.
    pub fn head(&self) -> &A {
        &self.head
    }

    /// The trailing operand.
    pub fn tail(&self) -> &B {
        &self.tail
    }
}

impl<A, B> ArrayLike for Concat<A, B>
where
    A: ArrayLike,
    B: ArrayLike<Elem = A::Elem>,
{
    type Elem = A::Elem;

    const CAPTURE: Capture = Capture::Inline;

    #[inline]
    fn len(&self) -> usize {
        self.head.len() + self.tail.len()
    }

    #[inline]
    fn at(&self, index: usize) -> A::Elem {
        let split = self.head.len();
        if index < split {
            self.head.at(index)
        } else {
            self.tail.at(index - split)
        }
    }
}

/// `head` followed by `tail`.
pub fn concat<A, B>(head: A, tail: B) -> Concat<A, B>
where
    A: ArrayLike,
    B: ArrayLike<Elem = A::Elem>,
{
    Concat::new(head, tail)
}
