// GUI configuration module
pub mod theme;

use serde::Deserialize;
use shared::utils::clamp_years;

use theme::{Theme, ThemePalette};

/// Mirrors `assets/config/default.json`. Missing keys fall back to the defaults below.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub version: String,
    pub app: AppSettings,
    pub chart: ChartConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct AppSettings {
    pub title: String,
    pub theme: Theme,
    pub window_width: u32,
    pub window_height: u32,
    /// Initial position of the years slider.
    pub default_years: u32,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ChartConfig {
    /// Width used when a chart does not fix its own.
    pub width: u32,
    pub height: u32,
    /// Height of each panel of the components chart.
    pub component_height: u32,
    pub line_width: f64,
    pub marker_radius: f64,
    pub grid: GridStyle,
    pub axis_color: String,
    pub font_size: u32,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct GridStyle {
    pub color: String,
    pub enabled: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: "1.0.0".to_string(),
            app: AppSettings::default(),
            chart: ChartConfig::default(),
        }
    }
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            title: "Market Dashboard".to_string(),
            theme: Theme::Light,
            window_width: 1280,
            window_height: 960,
            default_years: 1,
        }
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 960,
            height: 440,
            component_height: 260,
            line_width: 2.0,
            marker_radius: 2.5,
            grid: GridStyle::default(),
            axis_color: "#444444".to_string(),
            font_size: 11,
        }
    }
}

impl Default for GridStyle {
    fn default() -> Self {
        Self {
            color: "#e5ecf6".to_string(),
            enabled: true,
        }
    }
}

impl AppConfig {
    /// Parses the configuration embedded in the binary.
    pub fn load_default() -> Result<Self, anyhow::Error> {
        let config_str = include_str!("../../assets/config/default.json");
        Self::from_json(config_str)
    }

    pub fn from_json(json: &str) -> Result<Self, anyhow::Error> {
        let mut config: AppConfig = serde_json::from_str(json)?;
        config.app.default_years = clamp_years(config.app.default_years);
        Ok(config)
    }

    /// Embedded configuration, or built-in defaults if it cannot be parsed.
    pub fn load_or_default() -> Self {
        match Self::load_default() {
            Ok(cfg) => cfg,
            Err(e) => {
                tracing::error!(error = %e, "Failed to parse embedded configuration, using defaults");
                Self::default()
            }
        }
    }

    pub fn palette(&self) -> ThemePalette {
        ThemePalette::for_theme(self.app.theme)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_config_parses() {
        let config = AppConfig::load_default().unwrap();
        assert_eq!(config.app.title, "Market Dashboard");
        assert_eq!(config.app.default_years, 1);
        assert_eq!(config.app.theme, Theme::Light);
        assert!(config.chart.grid.enabled);
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config = AppConfig::from_json(r#"{ "app": { "theme": "dark", "default_years": 40 } }"#).unwrap();
        assert_eq!(config.app.theme, Theme::Dark);
        assert_eq!(config.app.default_years, 10);
        assert_eq!(config.chart, ChartConfig::default());
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(AppConfig::from_json("{ nope").is_err());
    }
}
