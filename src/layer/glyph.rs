//! Node/router iconography drawn on top of the background.
//!
//! The glyph is an input node on the left, a router box with a forwarding
//! arrow in the middle, three output nodes on the right and the links between
//! them. All geometry is derived from fixed base offsets multiplied by the
//! content scale and truncated toward zero, so the same scale always yields
//! the same pixels.

use super::LayerEffect;
use crate::canvas::Canvas;
use crate::color::Color;
use crate::error::RenderError;
use crate::icon::{IconImage, RectPx};

const INPUT_OFFSET: f64 = 280.0;
const INPUT_OUTER_RADIUS: f64 = 54.0;
const INPUT_INNER_RADIUS: f64 = 36.0;
const ROUTER_OUTER_HALF: f64 = 80.0;
const ROUTER_OUTER_CORNER: f64 = 30.0;
const ROUTER_INNER_HALF: f64 = 60.0;
const ROUTER_INNER_CORNER: f64 = 20.0;
const ARROW_RATIO: f64 = 0.8;
const OUTPUT_OFFSET: f64 = 280.0;
const OUTPUT_RADIUS: f64 = 35.0;
const OUTPUT_SPACING: f64 = 80.0;
const LINK_WIDTH: f64 = 8.0;
const LINK_FAN: f64 = 40.0;

/// Scales a base offset and truncates toward zero.
fn scaled(base: f64, scale: f64) -> i32 {
    (base * scale) as i32
}

// ============================================================================
// GlyphPalette
// ============================================================================

/// Fill colors of the individual glyph shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphPalette {
    pub input_outer: Color,
    pub input_inner: Color,
    pub router_outer: Color,
    pub router_inner: Color,
    pub arrow: Color,
    pub output: Color,
    pub link: Color,
}

impl Default for GlyphPalette {
    fn default() -> Self {
        Self {
            input_outer: Color::white(100),
            input_inner: Color::white(180),
            router_outer: Color::white(50),
            router_inner: Color::white(240),
            arrow: Color::rgb(102, 126, 234),
            output: Color::white(130),
            link: Color::white(150),
        }
    }
}

// ============================================================================
// GlyphGeometry
// ============================================================================

/// Pixel geometry of every glyph shape for one canvas size and scale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphGeometry {
    pub input_outer: RectPx,
    pub input_inner: RectPx,
    pub router_outer: RectPx,
    pub router_outer_radius: i32,
    pub router_inner: RectPx,
    pub router_inner_radius: i32,
    pub arrow: [(i32, i32); 7],
    pub outputs: [RectPx; 3],
    pub links: [((i32, i32), (i32, i32)); 4],
    pub link_width: u32,
}

impl GlyphGeometry {
    /// Computes the geometry centered on a `size`-sided canvas.
    pub fn new(size: u32, scale: f64) -> Self {
        let c = (size / 2) as i32;
        let s = |base: f64| scaled(base, scale);

        let input_x = c - s(INPUT_OFFSET);
        let input_inner_r = s(INPUT_INNER_RADIUS);
        let router_outer = s(ROUTER_OUTER_HALF);
        let router_inner = s(ROUTER_INNER_HALF);

        let a = |base: f64| scaled(base, scale * ARROW_RATIO);
        let arrow = [
            (c - a(30.0), c - a(10.0)),
            (c + a(10.0), c - a(10.0)),
            (c + a(10.0), c - a(30.0)),
            (c + a(50.0), c),
            (c + a(10.0), c + a(30.0)),
            (c + a(10.0), c + a(10.0)),
            (c - a(30.0), c + a(10.0)),
        ];

        let output_x = c + s(OUTPUT_OFFSET);
        let output_r = s(OUTPUT_RADIUS);
        let spacing = [s(-OUTPUT_SPACING), 0, s(OUTPUT_SPACING)];
        let outputs = spacing.map(|dy| RectPx::around(output_x, c + dy, output_r));

        let link_from = c - router_inner;
        let link_to = output_x - output_r;
        let box_right = c + router_inner;
        let fan = s(LINK_FAN);
        let links = [
            ((input_x + input_inner_r, c), (link_from, c)),
            ((box_right, c - fan), (link_to, c + spacing[0])),
            ((box_right, c), (link_to, c)),
            ((box_right, c + fan), (link_to, c + spacing[2])),
        ];

        Self {
            input_outer: RectPx::around(input_x, c, s(INPUT_OUTER_RADIUS)),
            input_inner: RectPx::around(input_x, c, input_inner_r),
            router_outer: RectPx::around(c, c, router_outer),
            router_outer_radius: s(ROUTER_OUTER_CORNER),
            router_inner: RectPx::around(c, c, router_inner),
            router_inner_radius: s(ROUTER_INNER_CORNER),
            arrow,
            outputs,
            links,
            link_width: s(LINK_WIDTH).max(1) as u32,
        }
    }
}

// ============================================================================
// GlyphConfig
// ============================================================================

/// Configuration for the glyph layer.
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphConfig {
    /// Content scale factor (0.0-1.0).
    pub content_scale: f64,

    /// Shape colors.
    pub palette: GlyphPalette,
}

impl GlyphConfig {
    /// Default margin: the glyph uses 84% of the canvas.
    pub const DEFAULT_SCALE: f64 = 0.84;

    /// Creates a new glyph config.
    ///
    /// The scale is clamped to 0.0-1.0.
    pub fn new(content_scale: f64, palette: GlyphPalette) -> Self {
        Self {
            content_scale: content_scale.clamp(0.0, 1.0),
            palette,
        }
    }

    /// Returns the geometry for a canvas of `size`.
    pub fn geometry(&self, size: u32) -> GlyphGeometry {
        GlyphGeometry::new(size, self.content_scale)
    }
}

impl Default for GlyphConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SCALE, GlyphPalette::default())
    }
}

impl LayerEffect for GlyphConfig {
    const NAME: &'static str = "glyph";

    fn transform(&self, icon: &mut IconImage) -> Result<(), RenderError> {
        let size = icon.data.width().min(icon.data.height());
        let geo = self.geometry(size);
        let p = &self.palette;

        // Below this the arrow collapses to a line.
        if scaled(10.0, self.content_scale * ARROW_RATIO) == 0 {
            log::warn!("content scale {} leaves no room for the glyph", self.content_scale);
            return Ok(());
        }

        let mut canvas = Canvas::new(&mut icon.data);

        canvas.fill_ellipse(geo.input_outer, p.input_outer)?;
        canvas.fill_ellipse(geo.input_inner, p.input_inner)?;

        canvas.fill_rounded_rect(geo.router_outer, geo.router_outer_radius, p.router_outer)?;
        canvas.fill_rounded_rect(geo.router_inner, geo.router_inner_radius, p.router_inner)?;
        canvas.fill_polygon(&geo.arrow, p.arrow)?;

        for node in geo.outputs {
            canvas.fill_ellipse(node, p.output)?;
        }

        for (from, to) in geo.links {
            canvas.draw_line(from, to, geo.link_width, p.link)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::icon::ICON_SIZE;

    #[test]
    fn default_geometry_matches_base_offsets() {
        let geo = GlyphGeometry::new(ICON_SIZE, 0.84);

        // trunc(280 * 0.84) = 235, radii 45 / 30
        assert_eq!(geo.input_outer, RectPx::from_corners(232, 467, 322, 557));
        assert_eq!(geo.input_inner, RectPx::from_corners(247, 482, 307, 542));
        // trunc(80 * 0.84) = 67, trunc(60 * 0.84) = 50
        assert_eq!(geo.router_outer, RectPx::from_corners(445, 445, 579, 579));
        assert_eq!(geo.router_inner, RectPx::from_corners(462, 462, 562, 562));
        assert_eq!(geo.router_outer_radius, 25);
        assert_eq!(geo.router_inner_radius, 16);
        assert_eq!(geo.link_width, 6);
    }

    #[test]
    fn arrow_vertices() {
        let geo = GlyphGeometry::new(ICON_SIZE, 0.84);
        // arrow scale 0.672: 30a -> 20, 10a -> 6, 50a -> 33
        assert_eq!(
            geo.arrow,
            [
                (492, 506),
                (518, 506),
                (518, 492),
                (545, 512),
                (518, 532),
                (518, 518),
                (492, 518),
            ]
        );
    }

    #[test]
    fn outputs_and_links() {
        let geo = GlyphGeometry::new(ICON_SIZE, 0.84);
        // x = 512 + 235, r = 29, dy = -67 / 0 / 67
        assert_eq!(geo.outputs[0], RectPx::around(747, 445, 29));
        assert_eq!(geo.outputs[1], RectPx::around(747, 512, 29));
        assert_eq!(geo.outputs[2], RectPx::around(747, 579, 29));

        assert_eq!(geo.links[0], ((307, 512), (462, 512)));
        assert_eq!(geo.links[1], ((562, 479), (718, 445)));
        assert_eq!(geo.links[2], ((562, 512), (718, 512)));
        assert_eq!(geo.links[3], ((562, 545), (718, 579)));
    }

    #[test]
    fn scale_is_clamped() {
        assert_eq!(GlyphConfig::new(3.0, GlyphPalette::default()).content_scale, 1.0);
        assert_eq!(GlyphConfig::new(-1.0, GlyphPalette::default()).content_scale, 0.0);
    }

    #[test]
    fn glyph_shapes_replace_pixels() {
        let config = GlyphConfig::default();
        let mut icon = IconImage::blank(ICON_SIZE, config.content_scale);
        config.transform(&mut icon).unwrap();

        let p = config.palette;
        let at = |x: u32, y: u32| Color::from(*icon.data.get_pixel(x, y));

        assert_eq!(at(512, 512), p.arrow);
        assert_eq!(at(512, 472), p.router_inner);
        assert_eq!(at(512, 450), p.router_outer);
        assert_eq!(at(277, 512), p.input_inner);
        assert_eq!(at(277, 470), p.input_outer);
        assert_eq!(at(747, 445), p.output);
        assert_eq!(at(747, 580), p.output);
        assert_eq!(at(400, 512), p.link);
        assert_eq!(at(0, 0), Color::rgba(0, 0, 0, 0));
    }

    #[test]
    fn arrow_fill_includes_its_outline() {
        let config = GlyphConfig::default();
        let geo = config.geometry(ICON_SIZE);
        let mut icon = IconImage::blank(ICON_SIZE, config.content_scale);
        config.transform(&mut icon).unwrap();

        let arrow = config.palette.arrow;
        let is_arrow = |x: u32, y: u32| Color::from(*icon.data.get_pixel(x, y)) == arrow;

        for (x, y) in geo.arrow {
            assert!(is_arrow(x as u32, y as u32), "vertex ({x}, {y})");
        }

        // Shaft is 13 rows, centered on the canvas middle
        let rows: Vec<u32> = (440..590).filter(|&y| is_arrow(500, y)).collect();
        assert_eq!(rows, (506..=518).collect::<Vec<_>>());

        // From the tail to the tip along the center row
        let cols: Vec<u32> = (440..600).filter(|&x| is_arrow(x, 512)).collect();
        assert_eq!(cols, (492..=545).collect::<Vec<_>>());

        // Head spans the full 492..=532 height at its base
        let head: Vec<u32> = (440..590).filter(|&y| is_arrow(518, y)).collect();
        assert_eq!(head, (492..=532).collect::<Vec<_>>());
    }

    #[test]
    fn zero_scale_draws_nothing() {
        let config = GlyphConfig::new(0.0, GlyphPalette::default());
        let mut icon = IconImage::blank(64, 0.0);
        config.transform(&mut icon).unwrap();
        assert!(icon.data.pixels().all(|p| p.0[3] == 0));
    }
}
