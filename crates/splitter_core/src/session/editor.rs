//! The editing session.

use std::collections::HashMap;
use std::time::Duration;

use crate::config::Settings;
use crate::models::{RangeId, SplitRange};
use crate::ranges::{JoinOutcome, RangeEvent, RangeSet, UniformSplitOutcome};
use crate::scale::{initial_zoom_percent, resolve, RulerLayout, ScaleError, ScaleState};

use super::previews::{self, PreviewPlan};
use super::types::{SectionGeometry, SectionObserver, SessionError, SessionResult};

/// Zoom percent changes at or below this are ignored, so the session's own
/// derived writes cannot feed back into re-resolution.
pub const ZOOM_STABILITY_THRESHOLD: f64 = 0.005;

/// Owns the range set and scale selection for one media file being edited.
///
/// `S` is the collaborator's section handle type, associated 1:1 with a
/// range for its lifetime and dropped exactly when the range is removed.
pub struct EditSession<S> {
    ranges: RangeSet,
    settings: Settings,
    state: Option<ScaleState>,
    prev_zoom_percent: Option<f64>,
    sections: HashMap<RangeId, S>,
    observer: Option<SectionObserver>,
}

impl<S> EditSession<S> {
    /// Create a session with no media loaded yet.
    pub fn new(settings: Settings) -> Self {
        Self {
            ranges: RangeSet::new(Duration::ZERO),
            settings,
            state: None,
            prev_zoom_percent: None,
            sections: HashMap::new(),
            observer: None,
        }
    }

    /// Set the renderer callback.
    pub fn with_observer(mut self, observer: SectionObserver) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Get the range set.
    pub fn ranges(&self) -> &RangeSet {
        &self.ranges
    }

    /// Get the media duration (zero until the provider supplies one).
    pub fn duration(&self) -> Duration {
        self.ranges.duration()
    }

    /// Get the resolved scale selection, if a duration is known.
    pub fn scale_state(&self) -> Option<ScaleState> {
        self.state
    }

    /// Get the current zoom percentage.
    pub fn zoom_percent(&self) -> f64 {
        self.prev_zoom_percent.unwrap_or(0.0)
    }

    /// Supply a new media duration from the metadata provider.
    ///
    /// Derives the initial zoom for the available display width, resolves
    /// the scale selection, and repositions live sections. A duration the
    /// ladder cannot bracket clamps to the nearest zoom extreme; a zero
    /// duration is rejected outright.
    pub fn set_duration(&mut self, duration: Duration, available_width: f64) -> SessionResult<()> {
        if duration.is_zero() {
            return Err(SessionError::ZeroDuration);
        }
        self.ranges.set_duration(duration);
        let percent = match initial_zoom_percent(duration, available_width) {
            Ok(percent) => percent,
            Err(ScaleError::LadderExhausted { .. }) => {
                tracing::warn!(?duration, "ladder exhausted, clamping zoom to the fine extreme");
                100.0
            }
            Err(err) => return Err(err.into()),
        };
        self.apply_zoom(percent.clamp(0.0, 100.0));
        Ok(())
    }

    /// Write the zoom percentage from the zoom control.
    ///
    /// Returns whether the change was applied; changes within the stability
    /// threshold are ignored.
    pub fn set_zoom_percent(&mut self, percent: f64) -> SessionResult<bool> {
        if !percent.is_finite() {
            return Err(SessionError::InvalidZoom(percent));
        }
        self.require_duration()?;
        Ok(self.apply_zoom(percent.clamp(0.0, 100.0)))
    }

    fn apply_zoom(&mut self, percent: f64) -> bool {
        let stable = self
            .prev_zoom_percent
            .is_some_and(|prev| (prev - percent).abs() <= ZOOM_STABILITY_THRESHOLD);
        if stable && self.state.is_some() {
            tracing::trace!(percent, "zoom change within stability threshold, ignored");
            return false;
        }
        self.prev_zoom_percent = Some(percent);
        self.state = Some(resolve(percent));
        self.reposition_all();
        true
    }

    /// Get the ruler layout for the current duration and zoom.
    pub fn ruler(&self) -> SessionResult<RulerLayout> {
        let state = self.state.ok_or(SessionError::ZeroDuration)?;
        Ok(RulerLayout::new(
            self.ranges.duration(),
            state,
            &self.settings.ruler,
        ))
    }

    /// Split the timeline at the playhead position.
    pub fn split_at_position(&mut self, position: Duration) -> SessionResult<Vec<RangeEvent>> {
        self.require_duration()?;
        let events = self.ranges.split_at(position)?;
        self.apply_events(&events);
        Ok(events)
    }

    /// Carve the timeline (or one range of it) into uniform intervals.
    pub fn split_uniform(
        &mut self,
        interval: Duration,
        target: Option<RangeId>,
    ) -> SessionResult<UniformSplitOutcome> {
        self.require_duration()?;
        let outcome = self.ranges.split_uniform(interval, target)?;
        if let UniformSplitOutcome::Applied { created, removed } = &outcome {
            for id in removed {
                self.sections.remove(id);
            }
            for id in created {
                self.notify(*id, true);
            }
        }
        Ok(outcome)
    }

    /// Join a selection of ranges between its first and last anchors.
    pub fn join_sections(&mut self, selection: &[RangeId]) -> SessionResult<JoinOutcome> {
        self.require_duration()?;
        let outcome = self.ranges.join(selection)?;
        if let JoinOutcome::Joined { extended, removed } = &outcome {
            for id in removed {
                self.sections.remove(id);
            }
            self.notify(*extended, false);
        }
        Ok(outcome)
    }

    /// Apply the result of a completed drag or resize gesture.
    ///
    /// Converts the section's pixel geometry back into durations against
    /// the given track width, then normalizes and restores ordering before
    /// returning, so every subsequent read observes ascending starts.
    pub fn update_from_drag(
        &mut self,
        id: RangeId,
        left_px: f64,
        width_px: f64,
        track_width_px: f64,
    ) -> SessionResult<Vec<RangeEvent>> {
        self.require_duration()?;
        if !left_px.is_finite()
            || !width_px.is_finite()
            || !track_width_px.is_finite()
            || track_width_px <= 0.0
        {
            return Err(SessionError::NonFiniteGeometry {
                left: left_px,
                width: width_px,
                track_width: track_width_px,
            });
        }
        let duration_secs = self.ranges.duration().as_secs_f64();
        let start_secs = (left_px / track_width_px * duration_secs).max(0.0);
        let end_secs = ((left_px + width_px) / track_width_px * duration_secs).max(0.0);
        let events = self.ranges.set_bounds(
            id,
            Duration::from_secs_f64(start_secs),
            Duration::from_secs_f64(end_secs),
        )?;
        self.apply_events(&events);
        Ok(events)
    }

    /// Remove one range and its section association.
    pub fn remove_range(&mut self, id: RangeId) -> SessionResult<SplitRange> {
        let range = self.ranges.remove(id)?;
        self.sections.remove(&id);
        Ok(range)
    }

    /// Remove every range and section association.
    pub fn clear_ranges(&mut self) {
        for id in self.ranges.clear() {
            self.sections.remove(&id);
        }
    }

    /// Associate a collaborator's section handle with a range.
    pub fn attach_section(&mut self, id: RangeId, handle: S) -> SessionResult<()> {
        if self.ranges.get(id).is_none() {
            return Err(SessionError::UnknownRange(id));
        }
        self.sections.insert(id, handle);
        Ok(())
    }

    /// Get the section handle associated with a range.
    pub fn section(&self, id: RangeId) -> Option<&S> {
        self.sections.get(&id)
    }

    /// Get the section handle to raise above its siblings.
    ///
    /// A range with no live association is a lookup miss, not a crash.
    pub fn bring_section_to_front(&self, id: RangeId) -> SessionResult<&S> {
        self.sections.get(&id).ok_or(SessionError::UnknownRange(id))
    }

    /// Compute the preview strip plan for the given panel width and video
    /// frame size.
    pub fn preview_plan(
        &self,
        panel_width: f64,
        video_width: f64,
        video_height: f64,
    ) -> SessionResult<PreviewPlan> {
        previews::plan(
            self.ranges.duration(),
            panel_width,
            self.settings.previews.panel_height,
            video_width,
            video_height,
        )
    }

    fn require_duration(&self) -> SessionResult<()> {
        if self.ranges.duration().is_zero() {
            return Err(SessionError::ZeroDuration);
        }
        Ok(())
    }

    fn apply_events(&mut self, events: &[RangeEvent]) {
        for event in events {
            match *event {
                RangeEvent::Added(id) => self.notify(id, true),
                RangeEvent::Resized(id) => self.notify(id, false),
                RangeEvent::Removed(id) => {
                    self.sections.remove(&id);
                }
                RangeEvent::Moved { .. } => {}
            }
        }
    }

    fn notify(&self, id: RangeId, is_new: bool) {
        let Some(observer) = &self.observer else {
            return;
        };
        let Some(layout) = self.layout() else {
            return;
        };
        let Some(range) = self.ranges.get(id) else {
            return;
        };
        observer(range, self.geometry_for(range, layout.track_width()), is_new);
    }

    fn reposition_all(&self) {
        let Some(observer) = &self.observer else {
            return;
        };
        let Some(layout) = self.layout() else {
            return;
        };
        let track_width = layout.track_width();
        for range in self.ranges.iter() {
            observer(range, self.geometry_for(range, track_width), false);
        }
    }

    fn layout(&self) -> Option<RulerLayout> {
        self.state
            .map(|state| RulerLayout::new(self.ranges.duration(), state, &self.settings.ruler))
    }

    fn geometry_for(&self, range: &SplitRange, track_width: f64) -> SectionGeometry {
        let duration_secs = self.ranges.duration().as_secs_f64();
        SectionGeometry {
            left: range.start.as_secs_f64() / duration_secs * track_width,
            width: range.length().as_secs_f64() / duration_secs * track_width,
        }
    }
}
