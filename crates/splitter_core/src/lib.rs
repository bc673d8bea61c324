//! Splitter Core - Backend logic for Media Splitter
//!
//! This crate contains the timeline editing model with zero UI dependencies:
//! the split-range collection, the adaptive scale ladder, and the ruler
//! layout. Rendering, pointer handling, playback, and thumbnail extraction
//! live in external collaborators that talk to this crate through the
//! interfaces in [`session`].

pub mod config;
pub mod logging;
pub mod models;
pub mod ranges;
pub mod scale;
pub mod session;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
