//! Interval segmentation model.
//!
//! This module maintains an ordered collection of split ranges covering a
//! media timeline:
//!
//! - **Splitting**: cut at a playback position, or carve a span into
//!   uniform intervals with a closing remainder
//! - **Joining**: merge a selection of ranges between two anchors
//! - **Normalization**: swap inverted bounds and clamp into the timeline
//! - **Reordering**: single-pass ascending-start correction after an edit
//!
//! Ranges produced solely by split operations tile `[0, duration]` without
//! gaps. Direct boundary edits (interactive resize) may transiently overlap;
//! the model repairs order and bounds only, never overlap.
//!
//! # Usage
//!
//! ```ignore
//! use splitter_core::ranges::RangeSet;
//!
//! let mut set = RangeSet::new(Duration::from_secs(60));
//! set.split_at(Duration::from_secs(20))?;
//! set.split_uniform(Duration::from_secs(5), None)?;
//! ```

mod set;
mod types;

// Re-export types
pub use types::{JoinOutcome, RangeError, RangeEvent, RangeResult, UniformSplitOutcome};

// Re-export the collection
pub use set::{RangeSet, SPLIT_EPSILON};
