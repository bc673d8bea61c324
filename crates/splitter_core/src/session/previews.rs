//! Preview strip sampling plan.
//!
//! The core only decides *where* thumbnails go: image geometry derived from
//! the video aspect and evenly spaced time points across the duration.
//! Decoding frames and producing images belongs to an external provider.

use std::time::Duration;

use super::types::{SessionError, SessionResult};

/// Geometry and sampling plan for the preview (thumbnail) strip.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewPlan {
    /// Width of one preview image in pixels.
    pub image_width: f64,
    /// Height of one preview image in pixels.
    pub image_height: f64,
    /// Number of previews filling the panel.
    pub count: usize,
    /// Spacing between sampled time points.
    pub interval: Duration,
}

impl PreviewPlan {
    /// Iterate over the sampled time points, starting at zero.
    pub fn time_points(&self) -> impl Iterator<Item = Duration> + '_ {
        (0..self.count).map(|index| self.interval * index as u32)
    }
}

/// Compute the preview plan for a panel of the given width.
///
/// Image width preserves the video aspect at the configured panel height;
/// the panel is filled left to right, the last image clipped by the panel
/// edge.
pub(crate) fn plan(
    duration: Duration,
    panel_width: f64,
    panel_height: f64,
    video_width: f64,
    video_height: f64,
) -> SessionResult<PreviewPlan> {
    let usable = |value: f64| value.is_finite() && value > 0.0;
    if duration.is_zero() {
        return Err(SessionError::ZeroDuration);
    }
    if !usable(panel_width) || !usable(panel_height) || !usable(video_width) || !usable(video_height)
    {
        return Err(SessionError::InvalidPreviewGeometry {
            panel_width,
            panel_height,
            video_width,
            video_height,
        });
    }

    let image_width = video_width / video_height * panel_height;
    let per_panel = panel_width / image_width;
    let count = per_panel.ceil() as usize;
    let interval = duration.div_f64(per_panel);
    tracing::debug!(count, image_width, ?interval, "preview plan computed");

    Ok(PreviewPlan {
        image_width,
        image_height: panel_height,
        count,
        interval,
    })
}
