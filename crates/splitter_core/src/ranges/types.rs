//! Range set outcomes and error definitions.

use std::time::Duration;

use thiserror::Error;

use crate::models::RangeId;

/// Errors that can occur during range set operations.
///
/// Every error is rejected at the boundary: the set is never mutated when
/// one of these is returned.
#[derive(Error, Debug)]
pub enum RangeError {
    /// A split position fell outside the timeline.
    #[error("Position {position:?} is outside the timeline [0, {duration:?}]")]
    PositionOutOfBounds {
        position: Duration,
        duration: Duration,
    },

    /// A split interval was zero.
    #[error("Split interval must be greater than zero")]
    InvalidInterval,

    /// An operation referenced a range that is not in the set.
    #[error("Unknown range id {0:?}")]
    UnknownRange(RangeId),
}

/// Result type for range set operations.
pub type RangeResult<T> = Result<T, RangeError>;

/// A single observable mutation applied to a range set.
///
/// Mutation methods return these instead of pushing through a notification
/// bus, so the caller decides what to propagate to its collaborators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeEvent {
    /// A range was created.
    Added(RangeId),
    /// A range's boundaries changed.
    Resized(RangeId),
    /// A range was removed from the set.
    Removed(RangeId),
    /// A range was relocated to keep ascending-start order.
    Moved {
        id: RangeId,
        from: usize,
        to: usize,
    },
}

/// Outcome of [`RangeSet::join`](super::RangeSet::join).
///
/// The guard cases are silent no-ops by design; they are reported here so
/// the caller can observe that nothing happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinOutcome {
    /// Fewer than two ranges were selected; nothing to join.
    TooFewRanges,
    /// The anchors were in reverse time order; the set is unchanged.
    MisorderedAnchors,
    /// The first anchor now extends to the last anchor's end.
    Joined {
        extended: RangeId,
        removed: Vec<RangeId>,
    },
}

/// Outcome of [`RangeSet::split_uniform`](super::RangeSet::split_uniform).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UniformSplitOutcome {
    /// The interval does not fit beneath the epsilon guard; the set is
    /// unchanged.
    IntervalTooLarge,
    /// The target span was replaced by uniform chunks.
    Applied {
        created: Vec<RangeId>,
        removed: Vec<RangeId>,
    },
}
