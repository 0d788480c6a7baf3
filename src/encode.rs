//! Output encoding.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::codecs::webp::{WebPEncoder, WebPQuality};
use image::{ColorType, RgbImage};

use crate::error::Result;

pub const JPEG_QUALITY: u8 = 85;
pub const WEBP_QUALITY: u8 = 80;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    #[default]
    Jpeg,
    Webp,
}

impl OutputFormat {
    /// `webp` selects WebP, anything else JPEG.
    pub fn from_name(name: &str) -> Self {
        if name.trim().eq_ignore_ascii_case("webp") {
            Self::Webp
        } else {
            Self::Jpeg
        }
    }

    pub const fn mime_type(self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Webp => "image/webp",
        }
    }

    pub const fn extension(self) -> &'static str {
        match self {
            Self::Jpeg => "jpg",
            Self::Webp => "webp",
        }
    }
}

/// Encode `img` as lossy JPEG (quality 85) or WebP (quality 80).
pub fn encode(img: &RgbImage, format: OutputFormat) -> Result<Vec<u8>> {
    let mut out = Cursor::new(Vec::new());
    let (w, h) = img.dimensions();

    match format {
        OutputFormat::Jpeg => {
            let mut encoder = JpegEncoder::new_with_quality(&mut out, JPEG_QUALITY);
            encoder.encode(img.as_raw(), w, h, ColorType::Rgb8)?;
        }
        OutputFormat::Webp => {
            let encoder = WebPEncoder::new_with_quality(&mut out, WebPQuality::lossy(WEBP_QUALITY));
            encoder.encode(img.as_raw(), w, h, ColorType::Rgb8)?;
        }
    }

    Ok(out.into_inner())
}
