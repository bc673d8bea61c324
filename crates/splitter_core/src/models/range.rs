//! Split-range data structures.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Stable identity of a split range.
///
/// The id persists across boundary edits and reordering for the lifetime of
/// the range, so external collaborators (rendered sections) can be associated
/// 1:1 with it. Ids are allocated by the owning `RangeSet` and never reused
/// within a set's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RangeId(u64);

impl RangeId {
    pub(crate) fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the raw numeric id.
    pub fn raw(self) -> u64 {
        self.0
    }
}

/// A contiguous time interval `[start, end]` representing one media segment.
///
/// The `start <= end` invariant is enforced by normalization in the owning
/// `RangeSet`, not by construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitRange {
    id: RangeId,
    /// Segment start position on the timeline.
    pub start: Duration,
    /// Segment end position on the timeline.
    pub end: Duration,
}

impl SplitRange {
    pub(crate) fn new(id: RangeId, start: Duration, end: Duration) -> Self {
        Self { id, start, end }
    }

    /// Get the stable identity of this range.
    pub fn id(&self) -> RangeId {
        self.id
    }

    /// Get the segment length.
    pub fn length(&self) -> Duration {
        self.end.saturating_sub(self.start)
    }

    /// Format the segment length for display, bucketed by magnitude.
    ///
    /// More than an hour renders as hours, more than a minute as minutes,
    /// everything else as seconds, one decimal place each.
    pub fn length_label(&self) -> String {
        let secs = self.length().as_secs_f64();
        let hours = secs / 3600.0;
        if hours > 1.0 {
            return format!("{:.1}h", hours);
        }
        let minutes = secs / 60.0;
        if minutes > 1.0 {
            return format!("{:.1}m", minutes);
        }
        format!("{:.1}s", secs)
    }
}
