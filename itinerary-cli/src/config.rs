//! Configuration loading and parsing

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main application configuration (loaded from itinerary.toml)
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub viewport: ViewportConfig,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DataConfig {
    /// Dataset to load instead of the bundled one
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DisplayConfig {
    /// Year assumed for `MM/DD` date labels
    #[serde(default = "default_fallback_year")]
    pub fallback_year: i32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            fallback_year: default_fallback_year(),
        }
    }
}

fn default_fallback_year() -> i32 {
    2025
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ViewportConfig {
    /// Visible page rows
    #[serde(default = "default_height")]
    pub height: usize,
    /// Rows at the top and bottom edge that don't count as visible
    #[serde(default = "default_padding")]
    pub padding: f64,
    /// Rows per step when tracing a scroll
    #[serde(default = "default_scroll_step")]
    pub scroll_step: usize,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            height: default_height(),
            padding: default_padding(),
            scroll_step: default_scroll_step(),
        }
    }
}

fn default_height() -> usize {
    24
}

fn default_padding() -> f64 {
    1.0
}

fn default_scroll_step() -> usize {
    3
}

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: AppConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    if config.viewport.height == 0 {
        anyhow::bail!("viewport.height must be at least 1 in {:?}", path);
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_config_deserialization() {
        let toml_content = r#"
            [data]
            path = "trip.json"

            [viewport]
            height = 40
        "#;

        let config: AppConfig = toml::from_str(toml_content).unwrap();
        assert_eq!(config.data.path, Some(PathBuf::from("trip.json")));
        assert_eq!(config.viewport.height, 40);
        assert_eq!(config.viewport.padding, 1.0);
        assert_eq!(config.display.fallback_year, 2025);
    }

    #[test]
    fn test_empty_config() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert!(config.data.path.is_none());
        assert_eq!(config.viewport.scroll_step, 3);
    }

    #[test]
    fn test_load_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[display]\nfallback_year = 2026").unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.display.fallback_year, 2026);
    }

    #[test]
    fn test_zero_height_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[viewport]\nheight = 0").unwrap();

        assert!(load_config(file.path()).is_err());
    }
}
