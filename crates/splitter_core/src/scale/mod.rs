//! Adaptive ruler scaling.
//!
//! This module keeps the timeline ruler legible at any zoom level:
//!
//! - **Ladder**: a fixed table of label spans and sub-increment buckets
//!   mapping a continuous zoom percentage (0-100) to a discrete pixel scale,
//!   label span, and label interval, and back
//! - **Ruler layout**: pure tick/label geometry for a renderer to draw,
//!   with a fixed major/mid/minor tick density contract
//!
//! # Usage
//!
//! ```ignore
//! use splitter_core::scale::{initial_zoom_percent, resolve, RulerLayout};
//!
//! let percent = initial_zoom_percent(duration, available_width)?;
//! let state = resolve(percent.clamp(0.0, 100.0));
//! let layout = RulerLayout::new(duration, state, &settings.ruler);
//! for line in layout.lines() { /* draw */ }
//! ```

mod ladder;
mod ruler;
mod types;

// Re-export types
pub use types::{ScaleError, ScaleResult, TickKind};

// Re-export the ladder and layout
pub use ladder::{
    initial_zoom_percent, resolve, ScaleState, INCREMENT_COUNTS, INCREMENT_STEP, LABEL_INTERVALS,
    LABEL_SPANS, MINIMUM_SCALE, UNITS_PER_TICK,
};
pub use ruler::{format_clock, RulerLayout, TickLabel, TickLine};
