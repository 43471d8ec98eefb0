//! Serializable style profile.
//!
//! An [`IconStyle`] captures every tunable of the icon (colors, content
//! scale, corner ratio and per-layer toggles) in a JSON-friendly format.
//! Missing fields fall back to the built-in design, so `{}` is a valid
//! profile that renders the default icon.
//!
//! # Example
//!
//! ```
//! use appicon_renderer::{Color, IconStyle};
//!
//! let style = IconStyle::default()
//!     .with_content_scale(0.9)
//!     .with_gradient("#000000".parse().unwrap(), Color::rgb(255, 255, 255));
//!
//! let json = style.to_json().unwrap();
//! let restored = IconStyle::from_json(&json).unwrap();
//! assert_eq!(restored.content_scale, 0.9);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::RenderError;
use crate::layer::{BackgroundConfig, GlyphConfig, GlyphPalette, HighlightConfig};

fn default_scale() -> f64 {
    GlyphConfig::DEFAULT_SCALE
}

// ============================================================================
// Layer Settings (Serializable)
// ============================================================================

/// Serializable settings for the background layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase", default)]
pub struct BackgroundSettings {
    /// Gradient color of the top row.
    pub start: Color,

    /// Gradient color of the bottom row.
    pub end: Color,

    /// Corner radius as a fraction of the canvas size (0.0-0.5).
    pub corner_radius_ratio: f64,

    /// Whether this layer is enabled.
    pub enabled: bool,
}

impl Default for BackgroundSettings {
    fn default() -> Self {
        let config = BackgroundConfig::default();
        Self {
            start: config.start,
            end: config.end,
            corner_radius_ratio: config.corner_radius_ratio,
            enabled: true,
        }
    }
}

/// Serializable settings for the highlight layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase", default)]
pub struct HighlightSettings {
    /// Ellipse color; the alpha sets how strongly it brightens the background.
    pub color: Color,

    /// Whether this layer is enabled.
    pub enabled: bool,
}

impl Default for HighlightSettings {
    fn default() -> Self {
        Self {
            color: HighlightConfig::default().color,
            enabled: true,
        }
    }
}

/// Serializable settings for the glyph layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase", default)]
pub struct GlyphSettings {
    pub input_outer: Color,
    pub input_inner: Color,
    pub router_outer: Color,
    pub router_inner: Color,
    pub arrow: Color,
    pub output: Color,
    pub link: Color,

    /// Whether this layer is enabled.
    pub enabled: bool,
}

impl From<&GlyphSettings> for GlyphPalette {
    fn from(s: &GlyphSettings) -> Self {
        Self {
            input_outer: s.input_outer,
            input_inner: s.input_inner,
            router_outer: s.router_outer,
            router_inner: s.router_inner,
            arrow: s.arrow,
            output: s.output,
            link: s.link,
        }
    }
}

impl GlyphSettings {
    pub(crate) fn from_palette(p: &GlyphPalette, enabled: bool) -> Self {
        Self {
            input_outer: p.input_outer,
            input_inner: p.input_inner,
            router_outer: p.router_outer,
            router_inner: p.router_inner,
            arrow: p.arrow,
            output: p.output,
            link: p.link,
            enabled,
        }
    }
}

impl Default for GlyphSettings {
    fn default() -> Self {
        Self::from_palette(&GlyphPalette::default(), true)
    }
}

// ============================================================================
// IconStyle
// ============================================================================

/// A serializable profile containing all style settings.
///
/// # JSON Format
///
/// ```json
/// {
///   "contentScale": 0.84,
///   "background": {
///     "start": "#764ba2",
///     "end": "#667eea",
///     "cornerRadiusRatio": 0.2237,
///     "enabled": true
///   },
///   "highlight": { "color": "#ffffff19", "enabled": true },
///   "glyph": { "arrow": "#667eea", "enabled": true }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct IconStyle {
    /// Fraction of the canvas the glyph may use (0.0-1.0).
    #[serde(default = "default_scale")]
    pub content_scale: f64,

    #[serde(default)]
    pub background: BackgroundSettings,

    #[serde(default)]
    pub highlight: HighlightSettings,

    #[serde(default)]
    pub glyph: GlyphSettings,
}

impl Default for IconStyle {
    fn default() -> Self {
        Self {
            content_scale: default_scale(),
            background: BackgroundSettings::default(),
            highlight: HighlightSettings::default(),
            glyph: GlyphSettings::default(),
        }
    }
}

impl IconStyle {
    /// Creates the built-in style.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the content scale.
    pub fn with_content_scale(mut self, scale: f64) -> Self {
        self.content_scale = scale;
        self
    }

    /// Sets both gradient stops.
    pub fn with_gradient(mut self, start: Color, end: Color) -> Self {
        self.background.start = start;
        self.background.end = end;
        self
    }

    /// Enables or disables the highlight layer.
    pub fn with_highlight(mut self, enabled: bool) -> Self {
        self.highlight.enabled = enabled;
        self
    }

    /// Enables or disables the glyph layer.
    pub fn with_glyph(mut self, enabled: bool) -> Self {
        self.glyph.enabled = enabled;
        self
    }

    /// Serializes the style to a JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serializes the style to a pretty-printed JSON string.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserializes a style from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Reads, parses and validates a style profile from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RenderError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| RenderError::StyleRead {
            path: path.to_path_buf(),
            source,
        })?;
        let style = Self::from_json(&json)?;
        style.validate()?;
        Ok(style)
    }

    /// Checks the numeric settings.
    ///
    /// The content scale must be a finite value in 0.0-1.0 and the corner
    /// ratio must be finite; out-of-range ratios are clamped when applied.
    pub fn validate(&self) -> Result<(), RenderError> {
        let scale = self.content_scale;
        if !(0.0..=1.0).contains(&scale) {
            return Err(RenderError::InvalidStyle(format!(
                "content scale {scale} is not within 0.0-1.0"
            )));
        }
        let ratio = self.background.corner_radius_ratio;
        if !ratio.is_finite() {
            return Err(RenderError::InvalidStyle(format!(
                "corner radius ratio {ratio} is not a finite number"
            )));
        }
        Ok(())
    }

    /// Returns the JSON schema describing a style profile.
    #[cfg(feature = "jsonschema")]
    pub fn json_schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(IconStyle)
    }
}

// ============================================================================
// Tests
// ============================================================================
