//! Layer infrastructure for icon rendering.
//!
//! Each layer pairs an optional configuration with an enabled flag, so a
//! layer can be switched off without losing its settings. Layer configs
//! implement [`LayerEffect`], which draws the layer onto the icon.
//!
//! # Pipeline
//!
//! ```text
//! Transparent canvas
//!     │
//!     ▼
//! ┌────────────┐
//! │ Background │ ◄── gradient clipped to the rounded square
//! └─────┬──────┘
//!       │
//!       ▼
//! ┌────────────┐
//! │ Highlight  │ ◄── blended source-over
//! └─────┬──────┘
//!       │
//!       ▼
//! ┌────────────┐
//! │   Glyph    │ ◄── shapes replace the pixels they cover
//! └────────────┘
//! ```

pub mod background;
pub mod glyph;
pub mod highlight;

pub use background::BackgroundConfig;
pub use glyph::{GlyphConfig, GlyphGeometry, GlyphPalette};
pub use highlight::HighlightConfig;

use crate::error::RenderError;
use crate::icon::IconImage;

// ============================================================================
// Layer Traits
// ============================================================================

/// Trait for layer configurations that know how to draw themselves.
pub trait LayerEffect: Clone {
    /// Short name used in log output.
    const NAME: &'static str;

    /// Draws the layer onto `icon`.
    fn transform(&self, icon: &mut IconImage) -> Result<(), RenderError>;
}

// ============================================================================
// Generic Layer
// ============================================================================

/// A layer slot with an optional configuration and an enabled flag.
#[derive(Debug, Clone)]
pub struct Layer<C> {
    config: Option<C>,
    enabled: bool,
}

impl<C> Default for Layer<C> {
    fn default() -> Self {
        Self {
            config: None,
            enabled: true,
        }
    }
}

impl<C> Layer<C> {
    /// Creates an enabled layer with the given configuration.
    pub fn with_config(config: C) -> Self {
        Self {
            config: Some(config),
            enabled: true,
        }
    }

    /// Returns the current configuration, if any.
    pub fn config(&self) -> Option<&C> {
        self.config.as_ref()
    }

    /// Returns true if this layer is active (has config AND is enabled).
    pub fn is_active(&self) -> bool {
        self.enabled && self.config.is_some()
    }

    /// Returns true if the layer has a configuration set.
    pub fn has_config(&self) -> bool {
        self.config.is_some()
    }

    /// Returns whether the layer is enabled.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Sets whether the layer is enabled.
    ///
    /// Returns true if the enabled state changed.
    pub fn set_enabled(&mut self, enabled: bool) -> bool {
        let changed = self.enabled != enabled;
        self.enabled = enabled;
        changed
    }

    /// Replaces the configuration.
    pub fn set_config(&mut self, config: Option<C>) {
        self.config = config;
    }
}

impl<C: LayerEffect> Layer<C> {
    /// Draws this layer onto `icon` if it is active.
    pub fn apply(&self, icon: &mut IconImage) -> Result<(), RenderError> {
        let Some(config) = self.config.as_ref().filter(|_| self.enabled) else {
            log::debug!("skipping {} layer", C::NAME);
            return Ok(());
        };

        log::debug!("drawing {} layer", C::NAME);
        config.transform(icon)
    }
}

// ============================================================================
// Layer Pipeline
// ============================================================================

/// The ordered set of layers that make up the icon.
#[derive(Debug, Clone)]
pub struct LayerPipeline {
    /// Rounded-square gradient.
    pub background: Layer<BackgroundConfig>,

    /// Translucent highlight near the top.
    pub highlight: Layer<HighlightConfig>,

    /// Node/router glyph.
    pub glyph: Layer<GlyphConfig>,
}

impl Default for LayerPipeline {
    fn default() -> Self {
        Self {
            background: Layer::with_config(BackgroundConfig::default()),
            highlight: Layer::with_config(HighlightConfig::default()),
            glyph: Layer::with_config(GlyphConfig::default()),
        }
    }
}

impl LayerPipeline {
    /// Content scale of the glyph layer, or the default when it has no config.
    pub fn content_scale(&self) -> f64 {
        self.glyph
            .config()
            .map_or(GlyphConfig::DEFAULT_SCALE, |g| g.content_scale)
    }

    /// Renders all active layers, in order, onto a fresh transparent canvas.
    pub fn render(&self, size: u32) -> Result<IconImage, RenderError> {
        let mut icon = IconImage::blank(size, self.content_scale());

        self.background.apply(&mut icon)?;
        self.highlight.apply(&mut icon)?;
        self.glyph.apply(&mut icon)?;

        Ok(icon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layer_toggle_without_losing_config() {
        let mut layer = Layer::with_config(HighlightConfig::default());
        assert!(layer.is_active());

        assert!(layer.set_enabled(false));
        assert!(!layer.is_active());
        assert!(layer.has_config());

        assert!(!layer.set_enabled(false));
        assert!(layer.set_enabled(true));
        assert_eq!(layer.config(), Some(&HighlightConfig::default()));
    }

    #[test]
    fn empty_layer_is_inactive() {
        let layer: Layer<GlyphConfig> = Layer::default();
        assert!(layer.is_enabled());
        assert!(!layer.has_config());
        assert!(!layer.is_active());
    }

    #[test]
    fn disabled_layers_are_skipped() {
        let mut pipeline = LayerPipeline::default();
        pipeline.background.set_enabled(false);
        pipeline.highlight.set_enabled(false);
        pipeline.glyph.set_config(None);

        let icon = pipeline.render(32).unwrap();
        assert!(icon.data.pixels().all(|p| p.0 == [0, 0, 0, 0]));
        assert_eq!(icon.content_scale, GlyphConfig::DEFAULT_SCALE);
    }

    #[test]
    fn highlight_only_brightens_background() {
        let mut plain = LayerPipeline::default();
        plain.highlight.set_enabled(false);
        plain.glyph.set_enabled(false);
        let mut lit = LayerPipeline::default();
        lit.glyph.set_enabled(false);

        let plain = plain.render(1024).unwrap();
        let lit = lit.render(1024).unwrap();

        // Inside the highlight ellipse
        let (a, b) = (plain.data.get_pixel(512, 200), lit.data.get_pixel(512, 200));
        assert!(b[0] > a[0] && b[1] > a[1] && b[2] > a[2]);
        assert_eq!(b[3], 255);
        // Below it
        assert_eq!(plain.data.get_pixel(512, 900), lit.data.get_pixel(512, 900));
    }
}
