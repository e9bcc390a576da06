//! Error types for recoverable faults.
//!
//! Misuse that can be detected before release (mismatched operand lengths,
//! empty reductions, views that reach outside their base) is a precondition
//! violation: it panics in debug builds with the caller's location and is
//! reported through `tracing` in release builds. The checked entry points
//! (`try_*`, `cast`, `checked_div`) return [`NumericError`] instead.

use crate::element::Kind;

/// Errors reported by the checked entry points of the crate.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum NumericError {
    /// Element access outside `0..len`.
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange {
        /// The requested position.
        index: usize,
        /// Length of the accessed object.
        len: usize,
    },

    /// Elementwise operands of different lengths.
    #[error("operand lengths differ: {left} vs {right}")]
    LengthMismatch {
        /// Length of the left operand.
        left: usize,
        /// Length of the right operand.
        right: usize,
    },

    /// A view whose first or last touched position lies outside its base.
    #[error("view touches positions {first}..={last} of a base with length {len}")]
    SliceOutOfRange {
        /// First touched position.
        first: usize,
        /// Last touched position.
        last: usize,
        /// Length of the base.
        len: usize,
    },

    /// A descriptor that cannot be normalized (zero stride, reversed range).
    #[error("invalid slice: {reason}")]
    InvalidSlice {
        /// What is wrong with the descriptor.
        reason: &'static str,
    },

    /// Explicit index list with a duplicate or descending entry.
    #[error("index list is not strictly increasing at position {position}")]
    UnsortedIndices {
        /// Position of the offending entry in the list.
        position: usize,
    },

    /// Explicit conversion of a value the target kind cannot represent.
    #[error("value is not representable when casting {from} to {to}")]
    CastOverflow {
        /// Source kind.
        from: Kind,
        /// Target kind.
        to: Kind,
    },

    /// Reduction over an empty operand.
    #[error("`{op}` requires a non-empty operand")]
    EmptyOperand {
        /// Name of the operation.
        op: &'static str,
    },

    /// Zero divisor found by a checked division.
    #[error("division by zero at element {index}")]
    DivisionByZero {
        /// Position of the zero divisor.
        index: usize,
    },
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, NumericError>;

/// Reports a violated precondition.
///
/// Panics in debug builds; release builds log the violation and let the
/// caller continue with its fallback.
#[track_caller]
pub(crate) fn violated(err: &NumericError) {
    if cfg!(debug_assertions) {
        panic!("precondition violated: {err}");
    }
    tracing::warn!(error = %err, "precondition violated");
}
