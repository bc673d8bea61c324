//! The editing session: glue between the core model and its collaborators.
//!
//! An [`EditSession`] owns the range set and the resolved scale selection,
//! and exposes the narrow interfaces the external world talks through:
//!
//! - **Renderer callback**: the session reports numeric section geometry
//!   after every create/reposition; it never draws
//! - **Duration provider**: media duration changes re-derive the initial
//!   zoom (zero duration is rejected, not processed)
//! - **Zoom control**: external percent writes pass a stability threshold
//!   before re-resolving the scale
//! - **Drag-resize completion**: pixel geometry is converted back to
//!   durations, normalized, and reordered
//! - **Thumbnail provider**: the session supplies evenly spaced time points
//!   and image geometry, nothing else
//!
//! # Usage
//!
//! ```ignore
//! use splitter_core::session::EditSession;
//!
//! let mut session: EditSession<SectionHandle> = EditSession::new(settings);
//! session.set_duration(duration, available_width)?;
//! session.split_at_position(playhead)?;
//! ```

mod editor;
mod previews;
mod types;

// Re-export types
pub use types::{SectionGeometry, SectionObserver, SessionError, SessionResult};

// Re-export the session and preview plan
pub use editor::{EditSession, ZOOM_STABILITY_THRESHOLD};
pub use previews::PreviewPlan;
