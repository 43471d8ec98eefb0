//! Error type shared by the renderer and the CLI.

use std::path::PathBuf;

/// Errors that can occur while rendering or persisting an icon.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The output file could not be created, written or flushed.
    #[error("cannot write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The PNG encoder rejected the image.
    #[error("failed to encode PNG: {0}")]
    Encode(#[from] image::ImageError),

    /// A style profile could not be read from disk.
    #[error("cannot read style profile {}: {source}", path.display())]
    StyleRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A style profile is not valid JSON for [`IconStyle`](crate::IconStyle).
    #[error("invalid style profile: {0}")]
    StyleParse(#[from] serde_json::Error),

    /// A style value is outside the range the renderer can draw.
    #[error("invalid style: {0}")]
    InvalidStyle(String),

    /// A shape could not be rasterized (degenerate path or zero-sized mask).
    #[error("rasterization failed: {0}")]
    Raster(&'static str),
}

impl RenderError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
