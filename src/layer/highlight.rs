//! Soft elliptical highlight near the top of the icon.

use image::RgbaImage;

use super::LayerEffect;
use crate::canvas::{composite_over, Canvas};
use crate::color::Color;
use crate::error::RenderError;
use crate::icon::{IconImage, RectPx};

/// Configuration for the highlight.
///
/// The ellipse is drawn on a transparent overlay the size of the canvas and
/// then composited source-over onto the image, so it brightens the gradient
/// instead of replacing it.
#[derive(Debug, Clone, PartialEq)]
pub struct HighlightConfig {
    /// Inclusive bounding box of the ellipse.
    pub bounds: RectPx,

    /// Fill color of the ellipse; its alpha is the blend weight.
    pub color: Color,
}

impl HighlightConfig {
    pub fn new(bounds: RectPx, color: Color) -> Self {
        Self { bounds, color }
    }
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self::new(RectPx::from_corners(112, 0, 912, 400), Color::white(25))
    }
}

impl LayerEffect for HighlightConfig {
    const NAME: &'static str = "highlight";

    fn transform(&self, icon: &mut IconImage) -> Result<(), RenderError> {
        if self.color.a == 0 {
            return Ok(());
        }

        let mut overlay = RgbaImage::new(icon.data.width(), icon.data.height());
        Canvas::new(&mut overlay).fill_ellipse(self.bounds, self.color)?;
        composite_over(&mut icon.data, &overlay, 0, 0);
        Ok(())
    }
}
