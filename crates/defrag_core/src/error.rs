//! Error types for the compaction core.

use std::io;
use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur while decoding or compacting a layout.
///
/// A file with no fit is not an error: it simply stays where it is.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The input stream is not a valid layout.
    #[error("malformed input at byte {offset}: {message}")]
    MalformedInput {
        /// Byte offset of the offending token.
        offset: usize,
        /// Description of the problem.
        message: String,
    },

    /// A layout invariant was violated.
    ///
    /// This indicates an accounting defect in the move logic, never a
    /// property of the input. The pass is aborted.
    #[error("corrupt layout: {message}")]
    CorruptLayout {
        /// Description of the violated invariant.
        message: String,
    },

    /// I/O error while reading a layout.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl CoreError {
    /// Creates a malformed input error.
    pub fn malformed_input(offset: usize, message: impl Into<String>) -> Self {
        Self::MalformedInput {
            offset,
            message: message.into(),
        }
    }

    /// Creates a corrupt layout error.
    pub fn corrupt_layout(message: impl Into<String>) -> Self {
        Self::CorruptLayout {
            message: message.into(),
        }
    }

    /// Returns true for decode-time errors.
    #[must_use]
    pub fn is_malformed_input(&self) -> bool {
        matches!(self, Self::MalformedInput { .. })
    }

    /// Returns true for invariant violations.
    #[must_use]
    pub fn is_corrupt_layout(&self) -> bool {
        matches!(self, Self::CorruptLayout { .. })
    }
}
