//! Library configuration types
//!
//! Only the two knobs the core actually needs live here. Anything about pages,
//! dataset locations or terminal geometry belongs to the application layer.

use serde::{Deserialize, Serialize};

/// Configuration for the active-section tracker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Sections that overlap the viewport by no more than this amount at the
    /// top or bottom edge are treated as not visible
    #[serde(default = "default_visibility_padding")]
    pub visibility_padding: f64,
}

fn default_visibility_padding() -> f64 {
    12.0
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            visibility_padding: default_visibility_padding(),
        }
    }
}

impl TrackerConfig {
    /// Create a tracker configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the edge padding
    pub fn with_visibility_padding(mut self, padding: f64) -> Self {
        self.visibility_padding = padding;
        self
    }
}

/// Configuration for the dual-time formatter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatterConfig {
    /// Year assumed for date labels written as `MM/DD`
    #[serde(default = "default_fallback_year")]
    pub fallback_year: i32,
}

fn default_fallback_year() -> i32 {
    2025
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            fallback_year: default_fallback_year(),
        }
    }
}

impl FormatterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the fallback year
    pub fn with_fallback_year(mut self, year: i32) -> Self {
        self.fallback_year = year;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        assert_eq!(TrackerConfig::new().visibility_padding, 12.0);
        assert_eq!(FormatterConfig::new().fallback_year, 2025);
    }

    #[test]
    fn test_builders() {
        let tracker = TrackerConfig::new().with_visibility_padding(1.0);
        assert_eq!(tracker.visibility_padding, 1.0);

        let formatter = FormatterConfig::new().with_fallback_year(2026);
        assert_eq!(formatter.fallback_year, 2026);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let tracker: TrackerConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(tracker, TrackerConfig::default());

        let formatter: FormatterConfig = serde_json::from_str(r#"{"fallback_year": 2030}"#).unwrap();
        assert_eq!(formatter.fallback_year, 2030);
    }
}
