//! Gradient background clipped to a rounded square.

use super::LayerEffect;
use crate::color::Color;
use crate::error::RenderError;
use crate::icon::IconImage;

// ============================================================================
// BackgroundConfig
// ============================================================================

/// Configuration for the rounded-square gradient background.
///
/// Every row gets one color, interpolated from `start` (top) to `end`
/// (bottom) by `y / size`. Pixels outside the rounded square stay
/// transparent; everything inside is fully opaque.
#[derive(Debug, Clone, PartialEq)]
pub struct BackgroundConfig {
    /// Color of the first row.
    pub start: Color,

    /// Color the gradient approaches at the last row.
    pub end: Color,

    /// Corner radius as a fraction of the canvas size (0.0-0.5).
    pub corner_radius_ratio: f64,
}

impl BackgroundConfig {
    /// macOS Big Sur style corner radius.
    pub const DEFAULT_CORNER_RATIO: f64 = 0.2237;

    /// Creates a new background config.
    ///
    /// The corner ratio is clamped to 0.0-0.5.
    pub fn new(start: Color, end: Color, corner_radius_ratio: f64) -> Self {
        Self {
            start: start.with_alpha(255),
            end: end.with_alpha(255),
            corner_radius_ratio: corner_radius_ratio.clamp(0.0, 0.5),
        }
    }

    /// Returns the corner radius in pixels for a canvas of `size`.
    pub fn corner_radius(&self, size: u32) -> u32 {
        (size as f64 * self.corner_radius_ratio) as u32
    }

    /// Returns the gradient color for row `y`.
    pub fn row_color(&self, y: u32, size: u32) -> Color {
        let ratio = y as f64 / size as f64;
        self.start.lerp_rgb(self.end, ratio)
    }
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self::new(
            Color::rgb(118, 75, 162),
            Color::rgb(102, 126, 234),
            Self::DEFAULT_CORNER_RATIO,
        )
    }
}

impl LayerEffect for BackgroundConfig {
    const NAME: &'static str = "background";

    fn transform(&self, icon: &mut IconImage) -> Result<(), RenderError> {
        let size = icon.data.width().min(icon.data.height());
        let radius = self.corner_radius(size);

        for y in 0..size {
            let px = self.row_color(y, size).to_rgba();
            for x in 0..size {
                if in_rounded_square(x, y, size, radius) {
                    icon.data.put_pixel(x, y, px);
                }
            }
        }
        Ok(())
    }
}

// ============================================================================
// Mask
// ============================================================================

/// Tests whether pixel `(x, y)` lies inside a `size`-sided square whose
/// corners are rounded with `radius`.
///
/// Corner zones are `x < radius` / `x >= size - radius` (same for `y`), with
/// arc centers at `radius` and `size - radius`. A pixel exactly `radius` away
/// from its arc center is inside.
pub fn in_rounded_square(x: u32, y: u32, size: u32, radius: u32) -> bool {
    let far = size.saturating_sub(radius);

    let cx = if x < radius {
        radius
    } else if x >= far {
        far
    } else {
        return true;
    };
    let cy = if y < radius {
        radius
    } else if y >= far {
        far
    } else {
        return true;
    };

    let dx = x as i64 - cx as i64;
    let dy = y as i64 - cy as i64;
    let r = radius as i64;
    dx * dx + dy * dy <= r * r
}
