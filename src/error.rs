//! Error types for user-facing tour operations.
//!
//! Engine preconditions (out-of-bounds squares) are asserted rather than
//! reported. "No move" and "search exhausted" are ordinary return values.

use crate::position::Position;
use crate::session::{Mode, Status};

/// Errors raised by parsing, session play and tour validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TourError {
    /// Text that does not name a square on the board
    #[error("invalid square: {0:?}")]
    InvalidSquare(String),

    /// Target is not a knight move away or was already visited
    #[error("illegal move from {from} to {to}")]
    IllegalMove { from: Position, to: Position },

    /// Operation not allowed in the session's current status
    #[error("expected status {expected}, session is {actual}")]
    WrongStatus { expected: Status, actual: Status },

    /// Operation not allowed in the session's play mode
    #[error("operation not available in {mode} mode")]
    WrongMode { mode: Mode },

    /// Path fails a tour invariant at the given index
    #[error("invalid tour at index {index}: {reason}")]
    InvalidTour { index: usize, reason: String },
}

/// Result type alias for tour operations
pub type TourResult<T> = Result<T, TourError>;
