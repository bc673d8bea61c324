//! Configuration management for Media Splitter.
//!
//! This module provides:
//! - TOML-based configuration with logical sections
//! - Atomic file writes (write to temp, then rename)
//! - Section-level updates (only changed section is modified)
//! - Validation on load with automatic defaults
//!
//! # Example
//!
//! ```no_run
//! use splitter_core::config::{ConfigManager, ConfigSection};
//!
//! // Create manager and load (or create default) config
//! let mut config = ConfigManager::new(".config/settings.toml");
//! config.load_or_create().unwrap();
//!
//! // Read settings
//! println!("Preview height: {}", config.settings().previews.panel_height);
//!
//! // Modify a setting
//! config.settings_mut().ruler.trailing_margin = 24.0;
//!
//! // Save just the ruler section atomically
//! config.update_section(ConfigSection::Ruler).unwrap();
//! ```

mod manager;
mod settings;

pub use manager::{ConfigError, ConfigManager, ConfigResult};
pub use settings::{ConfigSection, LoggingSettings, PreviewSettings, RulerSettings, Settings};
