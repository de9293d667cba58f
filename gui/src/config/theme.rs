// Theme specific configurations (colors, fonts, styles)
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Dark,
    Light,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemePalette {
    pub background: String,
    pub foreground: String,
    pub primary: String,
    pub secondary: String,
    pub border: String,
    // Alert boxes
    pub warning_background: String,
    pub warning_foreground: String,
    pub error_background: String,
    pub error_foreground: String,
    pub font_family: String,
}

impl ThemePalette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self::default_dark(),
            Theme::Light => Self::default_light(),
        }
    }

    pub fn default_dark() -> Self {
        Self {
            background: "#0e1117".to_string(),
            foreground: "#fafafa".to_string(),
            primary: "#ff4b4b".to_string(),
            secondary: "#262730".to_string(),
            border: "#3d3f4b".to_string(),
            warning_background: "#3a3520".to_string(),
            warning_foreground: "#ffffc2".to_string(),
            error_background: "#3e2428".to_string(),
            error_foreground: "#ffdede".to_string(),
            font_family: "sans-serif".to_string(),
        }
    }

    pub fn default_light() -> Self {
        Self {
            background: "#ffffff".to_string(),
            foreground: "#31333f".to_string(),
            primary: "#ff4b4b".to_string(),
            secondary: "#f0f2f6".to_string(),
            border: "#d6d6d9".to_string(),
            warning_background: "#fffce7".to_string(),
            warning_foreground: "#926c05".to_string(),
            error_background: "#ffecec".to_string(),
            error_foreground: "#7d353b".to_string(),
            font_family: "sans-serif".to_string(),
        }
    }

    /// Page-level stylesheet for the palette.
    pub fn stylesheet(&self) -> String {
        format!(
            r#"
body {{ margin: 0; background: {bg}; color: {fg}; font-family: {font}; }}
.dashboard {{ max-width: 1000px; margin: 0 auto; padding: 24px 32px; }}
.controls label {{ display: block; margin: 12px 0 4px; font-size: 14px; }}
.controls input[type=text] {{ width: 100%; padding: 8px; border: 1px solid {border}; border-radius: 6px; background: {secondary}; color: {fg}; }}
.controls input[type=range] {{ width: 100%; accent-color: {primary}; }}
.tab-bar {{ display: flex; gap: 24px; border-bottom: 1px solid {border}; margin-top: 24px; }}
.tab-bar button {{ background: none; border: none; padding: 8px 0; color: {fg}; cursor: pointer; font-size: 15px; }}
.tab-bar button.active {{ color: {primary}; border-bottom: 2px solid {primary}; }}
.alert {{ padding: 12px 16px; border-radius: 6px; margin: 16px 0; }}
.alert.warning {{ background: {warn_bg}; color: {warn_fg}; }}
.alert.error {{ background: {err_bg}; color: {err_fg}; }}
.spinner {{ margin: 16px 0; opacity: 0.8; }}
.data-table {{ border-collapse: collapse; font-size: 13px; margin: 8px 0 16px; }}
.data-table th, .data-table td {{ border: 1px solid {border}; padding: 4px 8px; text-align: right; }}
.data-table th {{ background: {secondary}; }}
.chart {{ margin: 8px 0 16px; }}
.range-slider {{ display: flex; gap: 8px; align-items: center; font-size: 12px; }}
.range-slider input {{ flex: 1; }}
"#,
            bg = self.background,
            fg = self.foreground,
            font = self.font_family,
            border = self.border,
            secondary = self.secondary,
            primary = self.primary,
            warn_bg = self.warning_background,
            warn_fg = self.warning_foreground,
            err_bg = self.error_background,
            err_fg = self.error_foreground,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_names_deserialize_lowercase() {
        let theme: Theme = serde_json::from_str("\"dark\"").unwrap();
        assert_eq!(theme, Theme::Dark);
        assert_eq!(ThemePalette::for_theme(Theme::Light), ThemePalette::default_light());
    }

    #[test]
    fn test_stylesheet_uses_palette_colors() {
        let palette = ThemePalette::default_dark();
        let css = palette.stylesheet();
        assert!(css.contains(&palette.background));
        assert!(css.contains(&palette.error_background));
    }
}
