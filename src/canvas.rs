//! Shape rasterization onto an RGBA buffer.
//!
//! Shapes are built as `tiny_skia` paths and filled into a coverage
//! [`Mask`] without anti-aliasing. Every covered pixel is then overwritten
//! with the shape color, alpha included. Drawing a translucent shape therefore
//! *replaces* what was underneath instead of blending with it; use
//! [`composite_over`] when blending is wanted.
//!
//! Coordinates follow the usual raster convention: an inclusive bounding box
//! `[x0, x1]` covers pixels `x0..=x1`, and line endpoints given as pixel
//! indices refer to the pixel centers (even-width lines are kept on pixel
//! edges instead). Polygons are filled inclusively: a pixel is covered when
//! its index lies inside the polygon or on its outline, so every vertex pixel
//! is painted.

use image::{Rgba, RgbaImage};
use resvg::tiny_skia::{FillRule, LineCap, Mask, Path, PathBuilder, Rect, Stroke, Transform};

use crate::color::Color;
use crate::error::RenderError;
use crate::icon::RectPx;

/// Cubic Bézier handle length for a quarter circle of radius 1.
const KAPPA: f32 = 0.552_284_8;

// ============================================================================
// Canvas
// ============================================================================

/// A drawing surface borrowing an [`RgbaImage`].
pub struct Canvas<'a> {
    target: &'a mut RgbaImage,
}

impl<'a> Canvas<'a> {
    pub fn new(target: &'a mut RgbaImage) -> Self {
        Self { target }
    }

    /// Fills the ellipse inscribed in the inclusive box `bounds`.
    pub fn fill_ellipse(&mut self, bounds: RectPx, color: Color) -> Result<(), RenderError> {
        let rect = to_rect(bounds)?;
        let path = PathBuilder::from_oval(rect).ok_or(RenderError::Raster("degenerate ellipse"))?;
        self.fill_path(&path, color, Transform::identity())
    }

    /// Fills a rectangle with circular corners of the given radius.
    ///
    /// The radius is clamped to half the shorter side.
    pub fn fill_rounded_rect(
        &mut self,
        bounds: RectPx,
        radius: i32,
        color: Color,
    ) -> Result<(), RenderError> {
        let rect = to_rect(bounds)?;
        let path = rounded_rect_path(rect, radius as f32)
            .ok_or(RenderError::Raster("degenerate rounded rectangle"))?;
        self.fill_path(&path, color, Transform::identity())
    }

    /// Fills the polygon through `points` (implicitly closed), outline included.
    ///
    /// Vertices are pixel indices. Coverage is decided exactly on the integer
    /// lattice, so the result does not depend on sampling rules.
    pub fn fill_polygon(&mut self, points: &[(i32, i32)], color: Color) -> Result<(), RenderError> {
        if points.len() < 3 {
            return Err(RenderError::Raster("polygon needs 3 points"));
        }
        let max_x = self.target.width() as i32 - 1;
        let max_y = self.target.height() as i32 - 1;
        let (x0, x1) = span(points.iter().map(|p| p.0), max_x);
        let (y0, y1) = span(points.iter().map(|p| p.1), max_y);

        let px = color.to_rgba();
        for y in y0..=y1 {
            for x in x0..=x1 {
                if polygon_covers(points, x, y) {
                    self.target.put_pixel(x as u32, y as u32, px);
                }
            }
        }
        Ok(())
    }

    /// Draws a straight segment with butt caps.
    pub fn draw_line(
        &mut self,
        from: (i32, i32),
        to: (i32, i32),
        width: u32,
        color: Color,
    ) -> Result<(), RenderError> {
        let mut pb = PathBuilder::new();
        pb.move_to(from.0 as f32, from.1 as f32);
        pb.line_to(to.0 as f32, to.1 as f32);
        let line = pb.finish().ok_or(RenderError::Raster("degenerate line"))?;

        let stroke = Stroke {
            width: width.max(1) as f32,
            line_cap: LineCap::Butt,
            ..Stroke::default()
        };
        let outline = line
            .stroke(&stroke, 1.0)
            .ok_or(RenderError::Raster("line could not be stroked"))?;
        // Even widths keep the outline on pixel edges.
        let transform = if stroke.width as u32 % 2 == 0 {
            Transform::identity()
        } else {
            pixel_centers()
        };
        self.fill_path(&outline, color, transform)
    }

    /// Overwrites every pixel covered by `path` with `color`.
    pub fn fill_path(
        &mut self,
        path: &Path,
        color: Color,
        transform: Transform,
    ) -> Result<(), RenderError> {
        let width = self.target.width();
        let height = self.target.height();
        let mut mask = Mask::new(width, height).ok_or(RenderError::Raster("empty canvas"))?;
        mask.fill_path(path, FillRule::Winding, false, transform);

        let px = color.to_rgba();
        for (i, _) in mask.data().iter().enumerate().filter(|(_, c)| **c > 0) {
            let x = i as u32 % width;
            let y = i as u32 / width;
            self.target.put_pixel(x, y, px);
        }
        Ok(())
    }
}

// ============================================================================
// Path Helpers
// ============================================================================

/// Maps pixel indices onto pixel centers.
fn pixel_centers() -> Transform {
    Transform::from_translate(0.5, 0.5)
}

fn to_rect(bounds: RectPx) -> Result<Rect, RenderError> {
    Rect::from_xywh(
        bounds.x as f32,
        bounds.y as f32,
        bounds.width as f32,
        bounds.height as f32,
    )
    .ok_or(RenderError::Raster("empty bounding box"))
}

fn rounded_rect_path(rect: Rect, radius: f32) -> Option<Path> {
    let r = radius.clamp(0.0, rect.width().min(rect.height()) / 2.0);
    if r == 0.0 {
        return Some(PathBuilder::from_rect(rect));
    }

    let (l, t, rt, b) = (rect.left(), rect.top(), rect.right(), rect.bottom());
    let k = KAPPA * r;

    let mut pb = PathBuilder::new();
    pb.move_to(l + r, t);
    pb.line_to(rt - r, t);
    pb.cubic_to(rt - r + k, t, rt, t + r - k, rt, t + r);
    pb.line_to(rt, b - r);
    pb.cubic_to(rt, b - r + k, rt - r + k, b, rt - r, b);
    pb.line_to(l + r, b);
    pb.cubic_to(l + r - k, b, l, b - r + k, l, b - r);
    pb.line_to(l, t + r);
    pb.cubic_to(l, t + r - k, l + r - k, t, l + r, t);
    pb.close();
    pb.finish()
}

/// Range of `coords` clipped to `0..=max`; empty (`1..=0`) when off canvas.
fn span(coords: impl Iterator<Item = i32> + Clone, max: i32) -> (i32, i32) {
    let lo = coords.clone().min().unwrap_or(0).max(0);
    let hi = coords.max().unwrap_or(-1).min(max);
    if lo > hi { (1, 0) } else { (lo, hi) }
}

/// Even-odd point-in-polygon test that counts the outline as inside.
fn polygon_covers(points: &[(i32, i32)], x: i32, y: i32) -> bool {
    let (x, y) = (x as i64, y as i64);
    let mut inside = false;

    for (i, &(ax, ay)) in points.iter().enumerate() {
        let (bx, by) = points[(i + 1) % points.len()];
        let (ax, ay, bx, by) = (ax as i64, ay as i64, bx as i64, by as i64);

        let cross = (bx - ax) * (y - ay) - (by - ay) * (x - ax);
        let on_segment =
            (ax.min(bx)..=ax.max(bx)).contains(&x) && (ay.min(by)..=ay.max(by)).contains(&y);
        if cross == 0 && on_segment {
            return true;
        }

        if (ay > y) != (by > y) {
            // Edge crosses the row; toggle when the crossing lies right of x.
            let lhs = (x - ax) * (by - ay);
            let rhs = (y - ay) * (bx - ax);
            if (by > ay && lhs < rhs) || (by < ay && lhs > rhs) {
                inside = !inside;
            }
        }
    }
    inside
}

// ============================================================================
// Compositing
// ============================================================================

/// Composites a source image onto a destination image at the specified position.
///
/// Uses standard alpha blending (source over destination).
pub fn composite_over(dest: &mut RgbaImage, src: &RgbaImage, x: i32, y: i32) {
    let dest_width = dest.width() as i32;
    let dest_height = dest.height() as i32;

    for sy in 0..src.height() {
        for sx in 0..src.width() {
            let dx = x + sx as i32;
            let dy = y + sy as i32;

            // Skip if outside destination bounds
            if dx < 0 || dy < 0 || dx >= dest_width || dy >= dest_height {
                continue;
            }

            let src_pixel = src.get_pixel(sx, sy);
            if src_pixel[3] == 0 {
                continue;
            }
            let dst_pixel = dest.get_pixel(dx as u32, dy as u32);
            let blended = alpha_blend(*src_pixel, *dst_pixel);
            dest.put_pixel(dx as u32, dy as u32, blended);
        }
    }
}

/// Alpha blends two RGBA pixels (source over destination).
pub fn alpha_blend(src: Rgba<u8>, dst: Rgba<u8>) -> Rgba<u8> {
    let sa = src[3] as f32 / 255.0;
    let da = dst[3] as f32 / 255.0;

    let out_a = sa + da * (1.0 - sa);

    if out_a == 0.0 {
        return Rgba([0, 0, 0, 0]);
    }

    let blend = |s: u8, d: u8| -> u8 {
        let sf = s as f32 / 255.0;
        let df = d as f32 / 255.0;
        let out = (sf * sa + df * da * (1.0 - sa)) / out_a;
        (out * 255.0).round() as u8
    };

    Rgba([
        blend(src[0], dst[0]),
        blend(src[1], dst[1]),
        blend(src[2], dst[2]),
        (out_a * 255.0).round() as u8,
    ])
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Color = Color::rgb(255, 0, 0);

    fn covered(img: &RgbaImage) -> usize {
        img.pixels().filter(|p| p.0[3] > 0).count()
    }

    #[test]
    fn ellipse_stays_inside_its_box() {
        let mut img = RgbaImage::new(64, 64);
        let bounds = RectPx::around(32, 32, 10);
        Canvas::new(&mut img).fill_ellipse(bounds, RED).unwrap();

        assert_eq!(img.get_pixel(32, 32).0, [255, 0, 0, 255]);
        for (x, y, p) in img.enumerate_pixels() {
            if p.0[3] > 0 {
                assert!((22..=42).contains(&x) && (22..=42).contains(&y), "({x}, {y}) outside box");
            }
        }
        // Box corners are outside the inscribed ellipse
        assert_eq!(img.get_pixel(22, 22).0[3], 0);
    }

    #[test]
    fn fill_replaces_instead_of_blending() {
        let mut img = RgbaImage::from_pixel(16, 16, Rgba([0, 0, 255, 255]));
        let translucent = Color::white(100);
        Canvas::new(&mut img)
            .fill_rounded_rect(RectPx::from_corners(2, 2, 13, 13), 3, translucent)
            .unwrap();

        assert_eq!(img.get_pixel(8, 8).0, [255, 255, 255, 100]);
        assert_eq!(img.get_pixel(0, 0).0, [0, 0, 255, 255]);
    }

    #[test]
    fn rounded_rect_clips_corners() {
        let mut img = RgbaImage::new(40, 40);
        Canvas::new(&mut img)
            .fill_rounded_rect(RectPx::from_corners(0, 0, 39, 39), 12, RED)
            .unwrap();

        assert_eq!(img.get_pixel(0, 0).0[3], 0);
        assert_eq!(img.get_pixel(39, 39).0[3], 0);
        assert_eq!(img.get_pixel(20, 0).0[3], 255);
        assert_eq!(img.get_pixel(0, 20).0[3], 255);
    }

    #[test]
    fn zero_radius_rounded_rect_is_a_rect() {
        let mut img = RgbaImage::new(20, 20);
        Canvas::new(&mut img)
            .fill_rounded_rect(RectPx::from_corners(5, 5, 14, 14), 0, RED)
            .unwrap();
        assert_eq!(covered(&img), 100);
    }

    #[test]
    fn polygon_fills_interior() {
        let mut img = RgbaImage::new(32, 32);
        let square = [(4, 4), (20, 4), (20, 20), (4, 20)];
        Canvas::new(&mut img).fill_polygon(&square, RED).unwrap();

        assert_eq!(img.get_pixel(12, 12).0[3], 255);
        assert_eq!(img.get_pixel(25, 25).0[3], 0);
        assert!(Canvas::new(&mut img).fill_polygon(&[(0, 0), (1, 1)], RED).is_err());
    }

    #[test]
    fn polygon_covers_its_outline() {
        let mut img = RgbaImage::new(32, 32);
        let square = [(4, 4), (20, 4), (20, 20), (4, 20)];
        Canvas::new(&mut img).fill_polygon(&square, RED).unwrap();

        // 4..=20 on both axes
        assert_eq!(covered(&img), 17 * 17);
        for (x, y) in square {
            assert_eq!(img.get_pixel(x as u32, y as u32).0[3], 255, "vertex ({x}, {y})");
        }
        assert_eq!(img.get_pixel(3, 12).0[3], 0);
        assert_eq!(img.get_pixel(21, 12).0[3], 0);
    }

    #[test]
    fn slanted_polygon_edges_are_exact() {
        let mut img = RgbaImage::new(16, 16);
        let triangle = [(0, 0), (10, 0), (0, 10)];
        Canvas::new(&mut img).fill_polygon(&triangle, RED).unwrap();

        for (x, y, p) in img.enumerate_pixels() {
            assert_eq!(p.0[3] > 0, x + y <= 10, "({x}, {y})");
        }
    }

    #[test]
    fn polygon_is_clipped_to_the_canvas() {
        let mut img = RgbaImage::new(8, 8);
        let square = [(-5, -5), (3, -5), (3, 3), (-5, 3)];
        Canvas::new(&mut img).fill_polygon(&square, RED).unwrap();
        assert_eq!(covered(&img), 16);

        let mut img = RgbaImage::new(8, 8);
        let offscreen = [(20, 20), (30, 20), (30, 30)];
        Canvas::new(&mut img).fill_polygon(&offscreen, RED).unwrap();
        assert_eq!(covered(&img), 0);
    }

    #[test]
    fn horizontal_line_has_requested_width() {
        let mut img = RgbaImage::new(32, 32);
        Canvas::new(&mut img)
            .draw_line((4, 16), (27, 16), 6, RED)
            .unwrap();

        let column: Vec<u32> = (0..32).filter(|&y| img.get_pixel(10, y).0[3] > 0).collect();
        assert_eq!(column.len(), 6);
        // Butt caps: nothing drawn before the start point
        assert_eq!(img.get_pixel(2, 16).0[3], 0);
    }

    #[test]
    fn composite_simple() {
        let mut dest = RgbaImage::from_pixel(10, 10, Rgba([255, 0, 0, 255]));
        let src = RgbaImage::from_pixel(4, 4, Rgba([0, 0, 255, 255]));

        composite_over(&mut dest, &src, 3, 3);

        assert_eq!(dest.get_pixel(5, 5).0, [0, 0, 255, 255]);
        assert_eq!(dest.get_pixel(0, 0).0, [255, 0, 0, 255]);
    }

    #[test]
    fn composite_with_transparency() {
        let mut dest = RgbaImage::from_pixel(10, 10, Rgba([255, 0, 0, 255]));
        let src = RgbaImage::from_pixel(4, 4, Rgba([0, 0, 255, 128]));

        composite_over(&mut dest, &src, 0, 0);

        let pixel = dest.get_pixel(0, 0);
        assert!(pixel[0] > 0, "Should have some red");
        assert!(pixel[2] > 0, "Should have some blue");
        assert_eq!(pixel[3], 255);
    }

    #[test]
    fn blend_over_opaque_base_matches_weighted_sum() {
        let base = Rgba([100, 150, 200, 255]);
        let overlay = Rgba([255, 255, 255, 25]);
        let out = alpha_blend(overlay, base);

        let a = 25.0 / 255.0;
        let expect = |b: f32| (255.0 * a + b * (1.0 - a)).round() as u8;
        assert_eq!(out.0, [expect(100.0), expect(150.0), expect(200.0), 255]);
    }

    #[test]
    fn blend_over_transparent_base_keeps_source() {
        let out = alpha_blend(Rgba([255, 255, 255, 25]), Rgba([0, 0, 0, 0]));
        assert_eq!(out.0, [255, 255, 255, 25]);
    }
}
