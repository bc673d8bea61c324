//! Ruler tick and label geometry.
//!
//! A pure function of the media duration and a resolved scale selection:
//! produces lazy, finite, restartable sequences of line and label
//! descriptors for an external renderer to draw. No pixels are measured or
//! painted here.

use std::time::Duration;

use crate::config::RulerSettings;

use super::ladder::{ScaleState, UNITS_PER_TICK};
use super::types::TickKind;

/// One ruler tick line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickLine {
    /// 1-based line index.
    pub index: u64,
    /// Horizontal position in pixels.
    pub x: f64,
    /// Visual weight.
    pub kind: TickKind,
}

/// One ruler label.
#[derive(Debug, Clone, PartialEq)]
pub struct TickLabel {
    /// 1-based label index.
    pub index: u64,
    /// Horizontal center position in pixels.
    pub x: f64,
    /// Timeline position this label marks.
    pub time: Duration,
    /// Preformatted clock text.
    pub text: String,
}

/// Tick/label geometry for one `(duration, scale selection)` pair.
#[derive(Debug, Clone, Copy)]
pub struct RulerLayout {
    duration: Duration,
    state: ScaleState,
    line_offset: f64,
    trailing_margin: f64,
}

impl RulerLayout {
    /// Lay out the ruler for the given duration and resolved scale.
    pub fn new(duration: Duration, state: ScaleState, settings: &RulerSettings) -> Self {
        let layout = Self {
            duration,
            state,
            line_offset: settings.line_offset,
            trailing_margin: settings.trailing_margin,
        };
        tracing::debug!(
            labels = layout.num_labels(),
            lines = layout.num_lines(),
            width = layout.width(),
            "ruler laid out"
        );
        layout
    }

    /// Number of labels drawn: one per started label span.
    pub fn num_labels(&self) -> u64 {
        let span_secs = self.state.label_span().as_secs_f64();
        (self.duration.as_secs_f64() / span_secs).ceil() as u64
    }

    /// Number of tick lines drawn.
    pub fn num_lines(&self) -> u64 {
        self.num_labels() * u64::from(self.state.label_interval()) * u64::from(UNITS_PER_TICK)
    }

    /// Total ruler width in pixels, including the trailing margin.
    pub fn width(&self) -> f64 {
        self.num_lines() as f64 * self.state.scale + self.line_offset + self.trailing_margin
    }

    /// Width of the section/progress strip in pixels.
    ///
    /// Unlike [`width`](Self::width) this covers the exact duration, not
    /// whole label spans, so sections and the seeker position against it.
    pub fn track_width(&self) -> f64 {
        let span_secs = self.state.label_span().as_secs_f64();
        let single_span_width =
            f64::from(self.state.label_interval() * UNITS_PER_TICK) * self.state.scale;
        self.duration.as_secs_f64() / span_secs * single_span_width + self.line_offset
    }

    /// Iterate over the tick lines.
    pub fn lines(&self) -> impl Iterator<Item = TickLine> {
        let scale = self.state.scale;
        let line_offset = self.line_offset;
        let per_mid = u64::from(UNITS_PER_TICK);
        let per_major = per_mid * u64::from(self.state.label_interval());
        (1..=self.num_lines()).map(move |index| {
            let kind = if index % per_major == 0 {
                TickKind::Major
            } else if index % per_mid == 0 {
                TickKind::Mid
            } else {
                TickKind::Minor
            };
            TickLine {
                index,
                x: (index as f64 * scale).round() + line_offset,
                kind,
            }
        })
    }

    /// Iterate over the labels.
    pub fn labels(&self) -> impl Iterator<Item = TickLabel> {
        let scale = self.state.scale;
        let label_interval = self.state.label_interval();
        let span = self.state.label_span();
        (1..=self.num_labels()).map(move |index| {
            let x = index as f64 * scale * f64::from(UNITS_PER_TICK) * f64::from(label_interval);
            let time = span * index as u32;
            TickLabel {
                index,
                x,
                time,
                text: format_clock(time),
            }
        })
    }
}

/// Format a timeline position as HH:MM:SS.
pub fn format_clock(time: Duration) -> String {
    let total_secs = time.as_secs();
    let secs = total_secs % 60;
    let total_mins = total_secs / 60;
    let mins = total_mins % 60;
    let hours = total_mins / 60;
    format!("{:02}:{:02}:{:02}", hours, mins, secs)
}
