//! Icon rendering engine.

use std::path::Path;

use crate::error::RenderError;
use crate::icon::{IconImage, ICON_SIZE};
use crate::layer::{BackgroundConfig, GlyphConfig, HighlightConfig, LayerPipeline};
use crate::style::{BackgroundSettings, GlyphSettings, HighlightSettings, IconStyle};

/// Default output location, relative to the working directory.
pub const DEFAULT_OUTPUT: &str = "build/appicon.png";

// ============================================================================
// Configurable Trait
// ============================================================================

/// Trait for types that can be configured from an [`IconStyle`].
pub trait Configurable {
    /// Applies a style's settings to this instance.
    fn apply_style(&mut self, style: &IconStyle);

    /// Exports the current settings as a style.
    fn export_style(&self) -> IconStyle;
}

// ============================================================================
// IconRenderer
// ============================================================================

/// Renders the application icon.
///
/// The renderer owns a [`LayerPipeline`] (background, highlight, glyph) and
/// draws it onto a fresh 1024×1024 canvas on every call. Rendering is
/// deterministic: the same style always produces the same pixels.
///
/// # Example
///
/// ```
/// use appicon_renderer::IconRenderer;
///
/// let renderer = IconRenderer::new();
/// let icon = renderer.render().unwrap();
/// assert_eq!(icon.data.dimensions(), (1024, 1024));
/// assert_eq!(icon.data.get_pixel(0, 0).0[3], 0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct IconRenderer {
    /// The layer pipeline. Access layers directly to configure them.
    pub pipeline: LayerPipeline,
}

impl IconRenderer {
    /// Creates a renderer for the built-in style.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a renderer for a custom style.
    pub fn with_style(style: &IconStyle) -> Self {
        let mut renderer = Self::new();
        renderer.apply_style(style);
        renderer
    }

    /// Content scale the glyph is drawn with.
    pub fn content_scale(&self) -> f64 {
        self.pipeline.content_scale()
    }

    /// Renders the icon in memory.
    pub fn render(&self) -> Result<IconImage, RenderError> {
        log::debug!("rendering {ICON_SIZE}x{ICON_SIZE} icon, scale {}", self.content_scale());
        self.pipeline.render(ICON_SIZE)
    }

    /// Renders the icon and writes it as PNG to `path`.
    ///
    /// Fails with [`RenderError::Io`] when the parent directory is missing or
    /// not writable.
    pub fn render_to_path(&self, path: impl AsRef<Path>) -> Result<IconImage, RenderError> {
        let icon = self.render()?;
        icon.save_png(path)?;
        Ok(icon)
    }
}

impl Configurable for IconRenderer {
    fn apply_style(&mut self, style: &IconStyle) {
        let bg = &style.background;
        self.pipeline.background.set_config(Some(BackgroundConfig::new(
            bg.start,
            bg.end,
            bg.corner_radius_ratio,
        )));
        self.pipeline.background.set_enabled(bg.enabled);

        let highlight = HighlightConfig {
            color: style.highlight.color,
            ..HighlightConfig::default()
        };
        self.pipeline.highlight.set_config(Some(highlight));
        self.pipeline.highlight.set_enabled(style.highlight.enabled);

        self.pipeline.glyph.set_config(Some(GlyphConfig::new(
            style.content_scale,
            (&style.glyph).into(),
        )));
        self.pipeline.glyph.set_enabled(style.glyph.enabled);
    }

    fn export_style(&self) -> IconStyle {
        let p = &self.pipeline;

        let background = p.background.config().cloned().unwrap_or_default();
        let highlight = p.highlight.config().cloned().unwrap_or_default();
        let glyph = p.glyph.config().cloned().unwrap_or_default();

        IconStyle {
            content_scale: glyph.content_scale,
            background: BackgroundSettings {
                start: background.start,
                end: background.end,
                corner_radius_ratio: background.corner_radius_ratio,
                enabled: p.background.is_active(),
            },
            highlight: HighlightSettings {
                color: highlight.color,
                enabled: p.highlight.is_active(),
            },
            glyph: GlyphSettings::from_palette(&glyph.palette, p.glyph.is_active()),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
