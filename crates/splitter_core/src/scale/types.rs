//! Scale ladder error definitions and tick classification.

use std::time::Duration;

use thiserror::Error;

/// Errors that can occur while mapping a duration onto the scale ladder.
#[derive(Error, Debug)]
pub enum ScaleError {
    /// The timeline has no length yet; the ladder walk is undefined.
    #[error("Cannot derive a zoom level for a zero-length timeline")]
    ZeroDuration,

    /// The available display width is unusable.
    #[error("Available width must be positive and finite, got {0}")]
    InvalidWidth(f64),

    /// No ladder rung brackets the given duration.
    ///
    /// Recoverable: callers may clamp to the nearest zoom extreme.
    #[error("No ladder rung fits a duration of {duration:?}")]
    LadderExhausted { duration: Duration },
}

/// Result type for scale operations.
pub type ScaleResult<T> = Result<T, ScaleError>;

/// Visual weight of a ruler tick.
///
/// The three-level density is a fixed contract: every
/// `units-per-tick * label-interval`-th line is major, every
/// `units-per-tick`-th is mid, the rest are minor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickKind {
    /// Short tick between mids.
    Minor,
    /// Medium tick on a unit boundary.
    Mid,
    /// Tall tick on a label boundary.
    Major,
}
