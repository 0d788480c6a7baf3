use thiserror::Error;

use crate::layout::Layout;

#[derive(Error, Debug)]
pub enum CollageError {
    #[error("Please upload at least 2 images (got {found})")]
    NotEnoughImages { found: usize },
    #[error("Invalid custom size format. Use WIDTHxHEIGHT (e.g., 800x600): {0:?}")]
    InvalidSize(String),
    #[error("Target size must be at least 1x1")]
    ZeroDimension,
    #[error("Tiles passed to a layout must all share the same dimensions")]
    MismatchedTiles,
    #[error("Canvas for {layout} layout of {count} images exceeds the maximum image size")]
    CanvasTooLarge { layout: Layout, count: usize },
    #[error("Image error: {0}")]
    Image(image::ImageError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// File-system failures surfaced by the codecs are reported as [`CollageError::Io`].
impl From<image::ImageError> for CollageError {
    fn from(err: image::ImageError) -> Self {
        match err {
            image::ImageError::IoError(io) => Self::Io(io),
            other => Self::Image(other),
        }
    }
}

pub type Result<T> = std::result::Result<T, CollageError>;
