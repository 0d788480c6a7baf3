//! Target tile dimensions.

use std::fmt;
use std::str::FromStr;

use image::RgbImage;

use crate::error::CollageError;

/// Width and height every source image is scaled to before layout.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TargetSize {
    pub width: u32,
    pub height: u32,
}

impl TargetSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Largest width and largest height across `images`, taken independently.
    ///
    /// Returns `None` for an empty slice.
    pub fn from_images(images: &[RgbImage]) -> Option<Self> {
        let width = images.iter().map(|img| img.width()).max()?;
        let height = images.iter().map(|img| img.height()).max()?;
        Some(Self { width, height })
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl fmt::Display for TargetSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Parses `WIDTHxHEIGHT`, e.g. `800x600`.
impl FromStr for TargetSize {
    type Err = CollageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CollageError::InvalidSize(s.to_string());

        let mut parts = s.trim().split('x');
        let (Some(w), Some(h), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(invalid());
        };
        let width: u32 = w.trim().parse().map_err(|_| invalid())?;
        let height: u32 = h.trim().parse().map_err(|_| invalid())?;

        let size = Self { width, height };
        if size.is_empty() {
            return Err(invalid());
        }
        Ok(size)
    }
}
