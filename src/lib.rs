//! appicon-renderer: procedural application icon generator
//!
//! This crate renders a single, fixed icon design: a rounded-square gradient
//! background with a soft highlight and a simple node/router glyph. The
//! result is a 1024×1024 RGBA image that can be written as PNG.
//!
//! # Example
//!
//! ```no_run
//! use appicon_renderer::{IconRenderer, DEFAULT_OUTPUT};
//!
//! let icon = IconRenderer::new().render_to_path(DEFAULT_OUTPUT)?;
//! println!("{}x{}", icon.data.width(), icon.data.height());
//! # Ok::<(), appicon_renderer::RenderError>(())
//! ```
//!
//! # Styles
//!
//! Colors, the content scale and the layer toggles can be adjusted through
//! an [`IconStyle`], which round-trips through JSON:
//!
//! ```
//! use appicon_renderer::{Configurable, IconRenderer, IconStyle};
//!
//! let style = IconStyle::from_json(r#"{ "contentScale": 0.75 }"#).unwrap();
//! let renderer = IconRenderer::with_style(&style);
//! assert_eq!(renderer.export_style().content_scale, 0.75);
//! ```

mod canvas;
mod color;
mod error;
mod icon;
mod layer;
mod renderer;
mod style;

pub use canvas::{alpha_blend, composite_over, Canvas};
pub use color::{Color, ParseColorError};
pub use error::RenderError;
pub use icon::{IconImage, RectPx, SizePx, ICON_SIZE};
pub use layer::background::in_rounded_square;
pub use layer::{
    BackgroundConfig, GlyphConfig, GlyphGeometry, GlyphPalette, HighlightConfig, Layer,
    LayerEffect, LayerPipeline,
};
pub use renderer::{Configurable, IconRenderer, DEFAULT_OUTPUT};
pub use style::{BackgroundSettings, GlyphSettings, HighlightSettings, IconStyle};
