//! Rendered icon types.
//!
//! This module provides the pixel rectangle used to describe shape bounds and
//! the [`IconImage`] produced by the renderer, along with PNG persistence.

use std::fs::File;
use std::io::{BufWriter, Cursor, Write};
use std::path::Path;

use image::{ImageFormat, RgbaImage};

use crate::error::RenderError;

/// Width and height of the generated icon in pixels.
pub const ICON_SIZE: u32 = 1024;

/// A rectangle defined in pixel coordinates.
///
/// Shape descriptors use inclusive boxes (`[x0, y0, x1, y1]` covers both
/// edges), so a box built with [`RectPx::from_corners`] has
/// `width = x1 - x0 + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RectPx {
    /// X offset from the left edge of the image
    pub x: i32,
    /// Y offset from the top edge of the image
    pub y: i32,
    /// Width of the rectangle
    pub width: u32,
    /// Height of the rectangle
    pub height: u32,
}

impl RectPx {
    /// Creates a rectangle from inclusive corner coordinates.
    ///
    /// Corners given in the wrong order are swapped.
    pub fn from_corners(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        let (left, right) = (x0.min(x1), x0.max(x1));
        let (top, bottom) = (y0.min(y1), y0.max(y1));
        Self {
            x: left,
            y: top,
            width: (right - left + 1) as u32,
            height: (bottom - top + 1) as u32,
        }
    }

    /// Creates the inclusive bounding box of a circle.
    pub fn around(cx: i32, cy: i32, radius: i32) -> Self {
        Self::from_corners(cx - radius, cy - radius, cx + radius, cy + radius)
    }
}

/// A 2D size in pixel units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SizePx {
    pub width: u32,
    pub height: u32,
}

impl SizePx {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// A rendered icon with its associated metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct IconImage {
    /// The image data in RGBA format.
    pub data: RgbaImage,

    /// The content scale factor the foreground glyph was drawn with.
    ///
    /// `1.0` lets the glyph use the whole canvas; the default `0.84` leaves an
    /// 8% margin on every side.
    pub content_scale: f64,
}

impl IconImage {
    /// Creates a new icon image with the given data and metadata.
    pub fn new(data: RgbaImage, content_scale: f64) -> Self {
        Self { data, content_scale }
    }

    /// Allocates a fully transparent square canvas.
    pub fn blank(size: u32, content_scale: f64) -> Self {
        Self::new(RgbaImage::new(size, size), content_scale)
    }

    /// Returns the pixel dimensions of the image.
    pub fn dimensions(&self) -> SizePx {
        SizePx::new(self.data.width(), self.data.height())
    }

    /// Returns the margin left around the content, as a whole percentage.
    pub fn margin_percent(&self) -> u32 {
        ((1.0 - self.content_scale) * 100.0) as u32
    }

    /// Encodes the image as PNG into memory.
    pub fn encode_png(&self) -> Result<Vec<u8>, RenderError> {
        let mut cursor = Cursor::new(Vec::new());
        self.data.write_to(&mut cursor, ImageFormat::Png)?;
        Ok(cursor.into_inner())
    }

    /// Encodes the image as PNG and writes it to `path`.
    ///
    /// The parent directory must already exist; it is not created.
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<(), RenderError> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| RenderError::io(path, e))?;
        let mut writer = BufWriter::new(file);

        self.data.write_to(&mut writer, ImageFormat::Png).map_err(|e| match e {
            image::ImageError::IoError(source) => RenderError::io(path, source),
            other => RenderError::Encode(other),
        })?;
        writer.flush().map_err(|e| RenderError::io(path, e))?;

        log::info!("wrote {} ({}x{})", path.display(), self.data.width(), self.data.height());
        Ok(())
    }
}
