//! Settings struct with TOML-based sections.
//!
//! Settings are organized into logical sections that map to TOML tables.
//! Each section can be updated independently for atomic section-level
//! updates. Only presentation knobs live here; algorithmic invariants
//! (the ladder table, the split epsilon, the zoom stability threshold)
//! are constants in their owning modules.

use serde::{Deserialize, Serialize};

use crate::logging::LogLevel;

/// Root settings structure containing all configuration sections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Preview strip geometry.
    #[serde(default)]
    pub previews: PreviewSettings,

    /// Ruler drawing margins.
    #[serde(default)]
    pub ruler: RulerSettings,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Preview strip configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewSettings {
    /// Whether the preview strip is requested at all.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Height of the preview strip in pixels; image widths derive from the
    /// video aspect at this height.
    #[serde(default = "default_panel_height")]
    pub panel_height: f64,
}

fn default_panel_height() -> f64 {
    70.0
}

impl Default for PreviewSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            panel_height: default_panel_height(),
        }
    }
}

/// Ruler drawing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RulerSettings {
    /// Horizontal offset added to every tick line position.
    #[serde(default = "default_line_offset")]
    pub line_offset: f64,

    /// Extra width after the last tick so the final label stays readable.
    #[serde(default = "default_trailing_margin")]
    pub trailing_margin: f64,
}

fn default_line_offset() -> f64 {
    0.5
}

fn default_trailing_margin() -> f64 {
    40.0
}

impl Default for RulerSettings {
    fn default() -> Self {
        Self {
            line_offset: default_line_offset(),
            trailing_margin: default_trailing_margin(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Minimum level for the tracing subscriber.
    #[serde(default)]
    pub level: LogLevel,

    /// Show timestamps in log output.
    #[serde(default = "default_true")]
    pub show_timestamps: bool,
}

fn default_true() -> bool {
    true
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: LogLevel::default(),
            show_timestamps: true,
        }
    }
}

/// Identifies a settings section for atomic section-level updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSection {
    Previews,
    Ruler,
    Logging,
}

impl ConfigSection {
    /// The TOML table name for this section.
    pub fn table_name(&self) -> &'static str {
        match self {
            ConfigSection::Previews => "previews",
            ConfigSection::Ruler => "ruler",
            ConfigSection::Logging => "logging",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_editor_constants() {
        let settings = Settings::default();
        assert_eq!(settings.previews.panel_height, 70.0);
        assert_eq!(settings.ruler.line_offset, 0.5);
        assert_eq!(settings.ruler.trailing_margin, 40.0);
        assert!(settings.previews.enabled);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let settings: Settings = toml::from_str("[ruler]\ntrailing_margin = 24.0\n").unwrap();
        assert_eq!(settings.ruler.trailing_margin, 24.0);
        assert_eq!(settings.ruler.line_offset, 0.5);
        assert_eq!(settings.previews.panel_height, 70.0);
    }

    #[test]
    fn settings_round_trip_through_toml() {
        let mut settings = Settings::default();
        settings.previews.panel_height = 90.0;
        settings.logging.level = LogLevel::Debug;
        let text = toml::to_string_pretty(&settings).unwrap();
        let back: Settings = toml::from_str(&text).unwrap();
        assert_eq!(back.previews.panel_height, 90.0);
        assert_eq!(back.logging.level, LogLevel::Debug);
    }

    #[test]
    fn section_table_names() {
        assert_eq!(ConfigSection::Previews.table_name(), "previews");
        assert_eq!(ConfigSection::Ruler.table_name(), "ruler");
        assert_eq!(ConfigSection::Logging.table_name(), "logging");
    }
}
