//! Session types and error definitions.

use thiserror::Error;

use crate::models::{RangeId, SplitRange};
use crate::ranges::RangeError;
use crate::scale::ScaleError;

/// Numeric position and extent of a rendered section, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionGeometry {
    /// Distance from the track's left edge.
    pub left: f64,
    /// Section width.
    pub width: f64,
}

/// Type alias for the renderer callback.
///
/// Invoked after a range is created or repositioned so the collaborator can
/// place its visual representation. The flag is `true` for newly created
/// ranges.
pub type SectionObserver = Box<dyn Fn(&SplitRange, SectionGeometry, bool) + Send + Sync>;

/// Errors that can occur during editing session operations.
#[derive(Error, Debug)]
pub enum SessionError {
    /// The media duration is zero or not known yet.
    #[error("Media duration is not known yet")]
    ZeroDuration,

    /// An operation referenced a range with no live association.
    #[error("Unknown range id {0:?}")]
    UnknownRange(RangeId),

    /// A zoom percentage was not a finite number.
    #[error("Zoom percent must be finite, got {0}")]
    InvalidZoom(f64),

    /// Drag geometry was unusable for conversion back to durations.
    #[error(
        "Section geometry must be finite with a positive track width: \
         left={left}, width={width}, track width={track_width}"
    )]
    NonFiniteGeometry {
        left: f64,
        width: f64,
        track_width: f64,
    },

    /// Preview panel or video geometry was unusable.
    #[error(
        "Preview geometry must be positive and finite: \
         panel {panel_width}x{panel_height}, video {video_width}x{video_height}"
    )]
    InvalidPreviewGeometry {
        panel_width: f64,
        panel_height: f64,
        video_width: f64,
        video_height: f64,
    },

    /// A range set operation failed.
    #[error(transparent)]
    Range(#[from] RangeError),

    /// A scale ladder operation failed.
    #[error(transparent)]
    Scale(#[from] ScaleError),
}

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;
