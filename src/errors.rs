//! Error types for poslib
//!
//! Every failure in this crate is local and immediate: matrix shape problems,
//! missing checkpoint or frame state, and malformed flat buffers.

use thiserror::Error;

/// Main error type for poslib operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PoslibError {
    /// Operand shapes are incompatible for the requested matrix operation
    #[error("Shape mismatch in {op}: {left:?} vs {right:?}")]
    ShapeMismatch {
        /// The operation that was attempted
        op: &'static str,
        /// (height, width) of the left operand
        left: (usize, usize),
        /// (height, width) of the right operand
        right: (usize, usize),
    },

    /// The output buffer handed to an allocation-free operation has the wrong shape
    #[error("Invalid output matrix: expected {expected:?}, found {found:?}")]
    InvalidOutput {
        /// Required (height, width)
        expected: (usize, usize),
        /// Actual (height, width) of the buffer
        found: (usize, usize),
    },

    /// `revert` was called on a position that never set a checkpoint
    #[error("No checkpoint has been set")]
    NoCheckpoint,

    /// `unrelative` was called on a position that is not in relative mode
    #[error("Position is not in relative mode")]
    NotRelative,

    /// A flat buffer carried a coordinate system tag that is not 0, 1 or 2
    #[error("Unknown coordinate system tag: {0}")]
    UnknownSystem(f64),

    /// A flat buffer is too short for the requested index
    #[error("Buffer too short: need {expected} values, found {found}")]
    BufferLength {
        /// Minimum length required
        expected: usize,
        /// Actual length
        found: usize,
    },
}

/// Result type for poslib operations
pub type Result<T> = std::result::Result<T, PoslibError>;
