//! The scale ladder: zoom percentage to ruler granularity and back.
//!
//! The ladder is a fixed table of 15 label spans grouped into 5 segments of
//! 3. Within a segment the label interval steps through 4, 2, 1 ticks per
//! label while the pixel scale climbs through sub-increment buckets of 10,
//! 15, 20 steps of 0.5 px. Walking the table coarse-to-fine finds the
//! coarsest span whose rendered width brackets the media duration.

use std::time::Duration;

use super::types::{ScaleError, ScaleResult};

/// Pixel scale at the first sub-increment.
pub const MINIMUM_SCALE: f64 = 5.0;

/// Pixel scale gained per sub-increment.
pub const INCREMENT_STEP: f64 = 0.5;

/// Minor ticks per label-interval unit.
pub const UNITS_PER_TICK: u32 = 5;

/// Sub-increment bucket sizes per segment position.
pub const INCREMENT_COUNTS: [u32; 3] = [10, 15, 20];

/// Ticks per label at each segment position.
pub const LABEL_INTERVALS: [u32; 3] = [4, 2, 1];

/// Candidate label spans, coarsest to finest, 5 segments of 3.
pub const LABEL_SPANS: [Duration; 15] = [
    Duration::from_secs(3600),
    Duration::from_secs(1800),
    Duration::from_secs(900),
    //
    Duration::from_secs(600),
    Duration::from_secs(300),
    Duration::from_secs(150),
    //
    Duration::from_secs(120),
    Duration::from_secs(60),
    Duration::from_secs(30),
    //
    Duration::from_secs(20),
    Duration::from_secs(10),
    Duration::from_secs(5),
    //
    Duration::from_secs(4),
    Duration::from_secs(2),
    Duration::from_secs(1),
];

/// The ladder selection for one zoom percentage.
///
/// Exactly one consistent triple of scale, span, and label interval
/// corresponds to a given percent through [`resolve`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleState {
    /// Zoom position along the ladder, 0-100.
    pub zoom_percent: f64,
    /// Pixels per minor tick unit.
    pub scale: f64,
    /// Active entry in [`LABEL_SPANS`].
    pub span_index: usize,
    /// Active segment position, 0-2.
    pub label_pos_index: usize,
}

impl ScaleState {
    /// The active label span.
    pub fn label_span(&self) -> Duration {
        LABEL_SPANS[self.span_index]
    }

    /// The active label interval (ticks per label).
    pub fn label_interval(&self) -> u32 {
        LABEL_INTERVALS[self.label_pos_index]
    }
}

fn scale_at(increments: u32) -> f64 {
    MINIMUM_SCALE + f64::from(increments) * INCREMENT_STEP
}

fn percent_per_segment() -> f64 {
    let segments = LABEL_SPANS.len() / INCREMENT_COUNTS.len();
    100.0 / segments as f64
}

/// Pick the zoom percentage whose rendered ruler best fills the available
/// width for the given media duration.
///
/// Walks the spans coarse-to-fine. The first span whose rendered width
/// range brackets the duration is refined by a nearest-fit scan over its
/// segment's sub-increments; a span whose whole range falls short backs up
/// one ladder step instead (the result can then sit just below zero, for
/// the caller to clamp). Durations no rung can bracket are a
/// [`ScaleError::LadderExhausted`].
pub fn initial_zoom_percent(duration: Duration, available_width: f64) -> ScaleResult<f64> {
    if duration.is_zero() {
        return Err(ScaleError::ZeroDuration);
    }
    if !available_width.is_finite() || available_width <= 0.0 {
        return Err(ScaleError::InvalidWidth(available_width));
    }
    let duration_secs = duration.as_secs_f64();

    // Pixel units per span second at each segment position's first and
    // last sub-increment.
    let mut unit_ranges = [(0.0_f64, 0.0_f64); INCREMENT_COUNTS.len()];
    let mut preceding: u32 = 0;
    for (pos, &count) in INCREMENT_COUNTS.iter().enumerate() {
        let label_interval = f64::from(LABEL_INTERVALS[pos]);
        let first = available_width
            / (scale_at(preceding) * label_interval * f64::from(UNITS_PER_TICK));
        let last = available_width
            / (scale_at(preceding + count) * label_interval * f64::from(UNITS_PER_TICK));
        unit_ranges[pos] = (first, last);
        preceding += count;
    }

    let increment_total = f64::from(INCREMENT_COUNTS.iter().sum::<u32>());
    let mut percent_covered = 0.0;
    for (index, span) in LABEL_SPANS.iter().enumerate() {
        let span_secs = span.as_secs_f64();
        let pos = index % INCREMENT_COUNTS.len();
        let (first, last) = unit_ranges[pos];
        let span_start = span_secs * first;
        let span_end = span_secs * last;

        if span_start >= duration_secs && span_end <= duration_secs {
            let chosen = nearest_increment(pos, span_secs, duration_secs, available_width);
            let percent =
                percent_covered + f64::from(chosen) / increment_total * percent_per_segment();
            tracing::debug!(span_index = index, increment = chosen, percent, "ladder rung fits");
            return Ok(percent);
        }
        if span_start <= duration_secs && span_end <= duration_secs {
            // Duration overshoots every width this rung covers: back up one
            // ladder step.
            let percent = percent_covered - 1.0 / increment_total * percent_per_segment();
            tracing::debug!(span_index = index, percent, "duration overshoots rung");
            return Ok(percent);
        }

        if pos == INCREMENT_COUNTS.len() - 1 {
            percent_covered += percent_per_segment();
        }
    }

    tracing::warn!(?duration, available_width, "no ladder rung fits");
    Err(ScaleError::LadderExhausted { duration })
}

/// Scan every sub-increment of a segment position for the rendered width
/// closest to the duration. First minimal difference wins.
fn nearest_increment(
    label_pos: usize,
    span_secs: f64,
    duration_secs: f64,
    available_width: f64,
) -> u32 {
    let label_interval = f64::from(LABEL_INTERVALS[label_pos]);
    let start: u32 = INCREMENT_COUNTS[..label_pos].iter().sum();
    let end = start + INCREMENT_COUNTS[label_pos];
    let mut best = start;
    let mut best_difference = f64::INFINITY;
    for increment in start..=end {
        let unit =
            available_width / (scale_at(increment) * label_interval * f64::from(UNITS_PER_TICK));
        let rendered = unit * span_secs;
        let difference = (rendered - duration_secs).abs();
        if difference < best_difference {
            best_difference = difference;
            best = increment;
        }
    }
    best
}

/// Resolve a zoom percentage into its ladder selection.
///
/// Inverse of [`initial_zoom_percent`] up to the truncation below: the
/// round trip lands on the nearest ladder rung, not necessarily the same
/// percent.
pub fn resolve(percent: f64) -> ScaleState {
    let per_segment = percent_per_segment();
    let chosen_segment = (percent / per_segment) as usize;
    let remainder = percent % per_segment;

    let increment_total = f64::from(INCREMENT_COUNTS.iter().sum::<u32>());
    let mut chosen_bucket = 0;
    let mut how_many_increments: u32 = 0;
    let mut running: u32 = 0;
    let mut previous_ratio = 0.0;
    for (bucket, &count) in INCREMENT_COUNTS.iter().enumerate() {
        running += count;
        let ratio = f64::from(running) / increment_total * per_segment;
        if remainder > ratio {
            previous_ratio = ratio;
            continue;
        }
        chosen_bucket = bucket;
        how_many_increments =
            ((remainder - previous_ratio) / (ratio - previous_ratio) * f64::from(count)) as u32;
        break;
    }

    let preceding: u32 = INCREMENT_COUNTS[..chosen_bucket].iter().sum();
    let scale = MINIMUM_SCALE + f64::from(preceding + how_many_increments) * INCREMENT_STEP;
    let span_index =
        (chosen_segment * INCREMENT_COUNTS.len() + chosen_bucket).min(LABEL_SPANS.len() - 1);
    tracing::trace!(percent, scale, span_index, "resolved zoom");

    ScaleState {
        zoom_percent: percent,
        scale,
        span_index,
        label_pos_index: chosen_bucket,
    }
}
