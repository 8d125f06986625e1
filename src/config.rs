//! Generator configuration.
//!
//! Page content comes from the admin snapshot; `site.toml` only controls how
//! the generator renders it. The file is optional and sparse: stock defaults
//! are serialized to a TOML table, the user file is merged on top table by
//! table, and the merged value is deserialized and validated.
//!
//! ## Config File Location
//!
//! Place `site.toml` next to the snapshot JSON files:
//!
//! ```text
//! snapshot/
//! ├── site.toml               # Optional generator config
//! ├── config.json
//! ├── contact-settings.json
//! ├── footer-settings.json
//! └── photo-carousel.json
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [site]
//! lang = "pt-BR"              # <html lang>
//! # title = "..."             # <title>; omit to use "<name> | <professional title>"
//!
//! [carousel]
//! autoplay_interval_ms = 5000 # Time between automatic advances
//! resume_after_ms = 4000      # Autoplay pause after manual navigation
//! swipe_threshold_px = 50.0   # Horizontal travel that counts as a swipe
//!
//! [theme]
//! font_display = "'Playfair Display', Georgia, serif"
//! font_body = "'Inter', system-ui, sans-serif"
//!
//! [theme.colors]
//! background = "#ffffff"
//! surface = "#f9fafb"
//! text = "#374151"
//! text_muted = "#6b7280"
//! footer_background = "#0f172a"
//! footer_text = "#d1d5db"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::carousel::CarouselTiming;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// File name looked up in the snapshot directory.
pub const CONFIG_FILE: &str = "site.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Generator configuration loaded from `site.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Document-level settings.
    pub site: PageConfig,
    /// Carousel timing and gesture settings.
    pub carousel: CarouselConfig,
    /// Fonts and colors.
    pub theme: ThemeConfig,
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.carousel.autoplay_interval_ms == 0 {
            return Err(ConfigError::Validation(
                "carousel.autoplay_interval_ms must be non-zero".into(),
            ));
        }
        if self.carousel.resume_after_ms == 0 {
            return Err(ConfigError::Validation(
                "carousel.resume_after_ms must be non-zero".into(),
            ));
        }
        let threshold = self.carousel.swipe_threshold_px;
        if !threshold.is_finite() || threshold <= 0.0 {
            return Err(ConfigError::Validation(
                "carousel.swipe_threshold_px must be a positive number".into(),
            ));
        }
        if self.site.lang.trim().is_empty() {
            return Err(ConfigError::Validation("site.lang must not be empty".into()));
        }
        for (name, value) in self.theme.colors.named() {
            if value.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "theme.colors.{name} must not be empty"
                )));
            }
        }
        Ok(())
    }
}

/// Document-level settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PageConfig {
    /// `<title>`. When absent the title is built from the resolved content.
    pub title: Option<String>,
    /// `<html lang>` attribute.
    pub lang: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            title: None,
            lang: "pt-BR".to_string(),
        }
    }
}

/// Carousel timing, mirrored into the page as data attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CarouselConfig {
    pub autoplay_interval_ms: u64,
    pub resume_after_ms: u64,
    pub swipe_threshold_px: f64,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        let timing = CarouselTiming::default();
        Self {
            autoplay_interval_ms: timing.autoplay_interval_ms,
            resume_after_ms: timing.resume_after_ms,
            swipe_threshold_px: timing.swipe_threshold_px,
        }
    }
}

impl CarouselConfig {
    pub fn timing(&self) -> CarouselTiming {
        CarouselTiming {
            autoplay_interval_ms: self.autoplay_interval_ms,
            resume_after_ms: self.resume_after_ms,
            swipe_threshold_px: self.swipe_threshold_px,
        }
    }
}

/// Fonts and colors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeConfig {
    /// Font stack for headings and the display name.
    pub font_display: String,
    /// Font stack for body text.
    pub font_body: String,
    pub colors: ThemeColors,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            font_display: "'Playfair Display', Georgia, serif".to_string(),
            font_body: "'Inter', system-ui, sans-serif".to_string(),
            colors: ThemeColors::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeColors {
    pub background: String,
    /// Background of cards and alternating sections.
    pub surface: String,
    pub text: String,
    /// Subtitles, captions, CRP line.
    pub text_muted: String,
    pub footer_background: String,
    pub footer_text: String,
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            background: "#ffffff".to_string(),
            surface: "#f9fafb".to_string(),
            text: "#374151".to_string(),
            text_muted: "#6b7280".to_string(),
            footer_background: "#0f172a".to_string(),
            footer_text: "#d1d5db".to_string(),
        }
    }
}

impl ThemeColors {
    fn named(&self) -> [(&'static str, &str); 6] {
        [
            ("background", &self.background),
            ("surface", &self.surface),
            ("text", &self.text),
            ("text_muted", &self.text_muted),
            ("footer_background", &self.footer_background),
            ("footer_text", &self.footer_text),
        ]
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Stock settings as a TOML table, the base every `site.toml` is laid over.
pub fn stock_defaults_table() -> Result<toml::Table, ConfigError> {
    Ok(toml::Table::try_from(SiteConfig::default())?)
}

/// Lay the keys of a parsed `site.toml` over `settings` in place.
///
/// Sections combine key by key, so a file that only sets
/// `[theme.colors] text` keeps the stock value of every other color. A file
/// value that is not a table replaces whatever the settings held for that key.
pub fn overlay_settings(settings: &mut toml::Table, file: toml::Table) {
    for (key, value) in file {
        let combined = match (settings.remove(&key), value) {
            (Some(toml::Value::Table(mut section)), toml::Value::Table(keys)) => {
                overlay_settings(&mut section, keys);
                toml::Value::Table(section)
            }
            (_, value) => value,
        };
        settings.insert(key, combined);
    }
}

/// Read `site.toml` from the snapshot directory.
///
/// A snapshot without the file yields `Ok(None)`.
pub fn read_site_toml(dir: &Path) -> Result<Option<toml::Table>, ConfigError> {
    match fs::read_to_string(dir.join(CONFIG_FILE)) {
        Ok(content) => Ok(Some(toml::from_str(&content)?)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Effective settings: stock defaults, then the optional `site.toml` table.
/// Unknown keys and out-of-range values are errors.
pub fn settings_from(file: Option<toml::Table>) -> Result<SiteConfig, ConfigError> {
    let mut settings = stock_defaults_table()?;
    if let Some(file) = file {
        overlay_settings(&mut settings, file);
    }
    let config: SiteConfig = settings.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load `site.toml` from `dir`, falling back to stock defaults.
pub fn load_config(dir: &Path) -> Result<SiteConfig, ConfigError> {
    settings_from(read_site_toml(dir)?)
}

/// Returns a fully-commented stock `site.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# psi-site generator configuration
# =================================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Page text, photos and section toggles come from the admin snapshot,
# not from this file. Place it next to the snapshot JSON files.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Document
# ---------------------------------------------------------------------------
[site]
# Value of <html lang>.
lang = "pt-BR"

# Page <title>. Omit to use "<name> | <professional title>".
# title = "Dra. Adrielle Benhossi | Psicóloga Clínica"

# ---------------------------------------------------------------------------
# Photo carousel
# ---------------------------------------------------------------------------
[carousel]
# Milliseconds between automatic advances.
autoplay_interval_ms = 5000

# Milliseconds autoplay stays off after the visitor navigates manually.
resume_after_ms = 4000

# Horizontal touch travel, in pixels, that counts as a swipe.
swipe_threshold_px = 50.0

# ---------------------------------------------------------------------------
# Theme
# ---------------------------------------------------------------------------
[theme]
# Font stack for headings and the display name.
font_display = "'Playfair Display', Georgia, serif"

# Font stack for body text.
font_body = "'Inter', system-ui, sans-serif"

[theme.colors]
background = "#ffffff"
surface = "#f9fafb"          # Cards and alternating sections
text = "#374151"
text_muted = "#6b7280"       # Subtitles, captions, CRP line
footer_background = "#0f172a"
footer_text = "#d1d5db"
"##
}

/// Generate CSS custom properties from theme config.
pub fn generate_theme_css(theme: &ThemeConfig) -> String {
    let c = &theme.colors;
    format!(
        r#":root {{
    --font-display: {font_display};
    --font-body: {font_body};
    --color-bg: {background};
    --color-surface: {surface};
    --color-text: {text};
    --color-text-muted: {text_muted};
    --color-footer-bg: {footer_background};
    --color-footer-text: {footer_text};
}}"#,
        font_display = theme.font_display,
        font_body = theme.font_body,
        background = c.background,
        surface = c.surface,
        text = c.text,
        text_muted = c.text_muted,
        footer_background = c.footer_background,
        footer_text = c.footer_text,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_matches_carousel_timing() {
        let config = SiteConfig::default();
        assert_eq!(config.carousel.timing(), CarouselTiming::default());
        assert_eq!(config.carousel.autoplay_interval_ms, 5000);
        assert_eq!(config.carousel.resume_after_ms, 4000);
        assert_eq!(config.carousel.swipe_threshold_px, 50.0);
    }

    #[test]
    fn default_config_passes_validation() {
        assert!(SiteConfig::default().validate().is_ok());
    }

    #[test]
    fn parse_partial_config() {
        let config: SiteConfig = toml::from_str(
            r##"
[theme.colors]
background = "#fafafa"
"##,
        )
        .unwrap();
        assert_eq!(config.theme.colors.background, "#fafafa");
        assert_eq!(config.theme.colors.text, "#374151");
        assert_eq!(config.carousel.autoplay_interval_ms, 5000);
        assert_eq!(config.site.lang, "pt-BR");
    }

    #[test]
    fn stock_toml_parses_back_to_defaults() {
        let parsed: SiteConfig = toml::from_str(stock_config_toml()).unwrap();
        assert_eq!(parsed, SiteConfig::default());
    }

    #[test]
    fn stock_settings_without_file_are_defaults() {
        assert_eq!(settings_from(None).unwrap(), SiteConfig::default());
    }

    #[test]
    fn generate_theme_css_includes_all_variables() {
        let css = generate_theme_css(&ThemeConfig::default());
        for var in [
            "--font-display:",
            "--font-body:",
            "--color-bg: #ffffff",
            "--color-surface:",
            "--color-text:",
            "--color-text-muted:",
            "--color-footer-bg: #0f172a",
            "--color-footer-text:",
        ] {
            assert!(css.contains(var), "missing {var}");
        }
    }

    // =========================================================================
    // overlay_settings
    // =========================================================================

    #[test]
    fn overlay_keeps_unset_carousel_keys() {
        let mut settings: toml::Table = toml::from_str(
            r#"
[carousel]
autoplay_interval_ms = 5000
resume_after_ms = 4000
"#,
        )
        .unwrap();
        let file: toml::Table = toml::from_str("[carousel]\nresume_after_ms = 2500\n").unwrap();
        overlay_settings(&mut settings, file);
        let carousel = settings["carousel"].as_table().unwrap();
        assert_eq!(carousel["resume_after_ms"].as_integer(), Some(2500));
        assert_eq!(carousel["autoplay_interval_ms"].as_integer(), Some(5000));
    }

    #[test]
    fn overlay_reaches_nested_theme_colors() {
        let file: toml::Table =
            toml::from_str("[theme.colors]\ntext = \"#111111\"\n").unwrap();
        let config = settings_from(Some(file)).unwrap();
        assert_eq!(config.theme.colors.text, "#111111");
        assert_eq!(config.theme.colors.background, "#ffffff");
        assert_eq!(config.theme.font_body, ThemeConfig::default().font_body);
    }

    #[test]
    fn overlay_scalar_replaces_section() {
        let mut settings: toml::Table = toml::from_str("a = { b = 1 }").unwrap();
        let file: toml::Table = toml::from_str("a = 2").unwrap();
        overlay_settings(&mut settings, file);
        assert_eq!(settings["a"].as_integer(), Some(2));
    }

    // =========================================================================
    // load_config
    // =========================================================================

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(load_config(tmp.path()).unwrap(), SiteConfig::default());
    }

    #[test]
    fn load_config_overlays_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILE),
            r##"
[site]
title = "Consultório"

[carousel]
autoplay_interval_ms = 8000
"##,
        )
        .unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.site.title.as_deref(), Some("Consultório"));
        assert_eq!(config.carousel.autoplay_interval_ms, 8000);
        assert_eq!(config.carousel.resume_after_ms, 4000);
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE), "[carousel\n").unwrap();
        assert!(matches!(load_config(tmp.path()), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn unknown_key_rejected() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILE),
            "[carousel]\nautoplay_interval = 3000\n",
        )
        .unwrap();
        let err = load_config(tmp.path()).unwrap_err().to_string();
        assert!(err.contains("unknown field"), "{err}");
    }

    #[test]
    fn unknown_section_rejected() {
        let result: Result<SiteConfig, _> = toml::from_str("[images]\nquality = 90\n");
        assert!(result.is_err());
    }

    // =========================================================================
    // validate
    // =========================================================================

    #[test]
    fn validate_zero_interval() {
        let mut config = SiteConfig::default();
        config.carousel.autoplay_interval_ms = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("autoplay_interval_ms"));

        let mut config = SiteConfig::default();
        config.carousel.resume_after_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_swipe_threshold() {
        for bad in [0.0, -10.0, f64::NAN, f64::INFINITY] {
            let mut config = SiteConfig::default();
            config.carousel.swipe_threshold_px = bad;
            assert!(config.validate().is_err(), "{bad} accepted");
        }
    }

    #[test]
    fn validate_empty_color() {
        let mut config = SiteConfig::default();
        config.theme.colors.text_muted = "  ".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("text_muted"));
    }

    #[test]
    fn load_config_validates_values() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILE),
            "[carousel]\nswipe_threshold_px = 0.0\n",
        )
        .unwrap();
        assert!(matches!(
            load_config(tmp.path()),
            Err(ConfigError::Validation(_))
        ));
    }
}
