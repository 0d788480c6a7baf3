//! Scaling source images to a common tile size.

use image::imageops::{self, FilterType};
use image::RgbImage;
use log::warn;

use crate::error::{CollageError, Result};
use crate::size::TargetSize;

/// How a source image is resized into its tile.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ScaleMode {
    /// Resize straight to the tile size.
    ///
    /// Note: this does not preserve aspect ratio. It currently behaves exactly
    /// like [`Stretch`](Self::Stretch).
    #[default]
    Fit,
    /// Cover the tile preserving aspect ratio, centered, overflow clipped.
    Fill,
    /// Resize straight to the tile size, distorting aspect ratio.
    Stretch,
}

impl ScaleMode {
    /// Unknown names behave as [`Stretch`](Self::Stretch).
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "fit" => Self::Fit,
            "fill" => Self::Fill,
            "stretch" => Self::Stretch,
            other => {
                warn!("Unknown scale mode {other:?}, stretching instead");
                Self::Stretch
            }
        }
    }
}

const FILTER: FilterType = FilterType::Lanczos3;

/// Produce a new image of exactly `target` dimensions. `img` is left untouched.
pub fn scale_image(img: &RgbImage, target: TargetSize, mode: ScaleMode) -> Result<RgbImage> {
    if target.is_empty() || img.width() == 0 || img.height() == 0 {
        return Err(CollageError::ZeroDimension);
    }

    let scaled = match mode {
        ScaleMode::Fit | ScaleMode::Stretch => {
            imageops::resize(img, target.width, target.height, FILTER)
        }
        ScaleMode::Fill => fill(img, target),
    };
    Ok(scaled)
}

/// Dimensions that cover `target` while keeping the source aspect ratio.
/// One axis matches the target exactly, the other is at least as large.
pub fn cover_dimensions(source_w: u32, source_h: u32, target: TargetSize) -> (u32, u32) {
    let img_ratio = source_w as f64 / source_h as f64;
    let target_ratio = target.width as f64 / target.height as f64;

    if img_ratio > target_ratio {
        let w = (target.height as f64 * img_ratio) as u32;
        (w.max(target.width), target.height)
    } else {
        let h = (target.width as f64 / img_ratio) as u32;
        (target.width, h.max(target.height))
    }
}

/// Source window `(x, y, width, height)` that a cover resize followed by a
/// centered clip would keep. Offsets round toward the top-left.
pub fn cover_crop(source_w: u32, source_h: u32, target: TargetSize) -> (u32, u32, u32, u32) {
    let (new_w, new_h) = cover_dimensions(source_w, source_h, target);
    let (x, w) = window(source_w, new_w, target.width);
    let (y, h) = window(source_h, new_h, target.height);
    (x, y, w, h)
}

/// Map the centered `visible` span of a `scaled`-long axis back to `source` pixels.
fn window(source: u32, scaled: u32, visible: u32) -> (u32, u32) {
    let (source, scaled, visible) = (source as u64, scaled as u64, visible as u64);
    let offset = (scaled - visible) / 2;
    let len = ((visible * source + scaled / 2) / scaled).clamp(1, source);
    let start = (offset * source / scaled).min(source - len);
    (start as u32, len as u32)
}

fn fill(img: &RgbImage, target: TargetSize) -> RgbImage {
    // Crop first so the intermediate never exceeds the source.
    let (x, y, w, h) = cover_crop(img.width(), img.height(), target);
    let window = imageops::crop_imm(img, x, y, w, h).to_image();
    imageops::resize(&window, target.width, target.height, FILTER)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn solid(w: u32, h: u32, color: [u8; 3]) -> RgbImage {
        RgbImage::from_pixel(w, h, Rgb(color))
    }

    #[test]
    fn fit_and_stretch_hit_exact_target() {
        let img = solid(640, 480, [200, 10, 10]);
        for mode in [ScaleMode::Fit, ScaleMode::Stretch] {
            for (w, h) in [(1, 1), (100, 100), (33, 700), (1280, 17)] {
                let out = scale_image(&img, TargetSize::new(w, h), mode).unwrap();
                assert_eq!(out.dimensions(), (w, h), "{mode:?} to {w}x{h}");
            }
        }
    }

    #[test]
    fn fit_matches_stretch() {
        let img = solid(90, 30, [1, 2, 3]);
        let target = TargetSize::new(40, 40);
        let fit = scale_image(&img, target, ScaleMode::Fit).unwrap();
        let stretch = scale_image(&img, target, ScaleMode::Stretch).unwrap();
        assert_eq!(fit, stretch);
    }

    #[test]
    fn fill_covers_the_whole_tile() {
        // Wide and tall sources both leave no black pixels behind.
        for (w, h) in [(400, 100), (100, 400), (250, 250)] {
            let img = solid(w, h, [255, 255, 255]);
            let out = scale_image(&img, TargetSize::new(120, 80), ScaleMode::Fill).unwrap();
            assert_eq!(out.dimensions(), (120, 80));
            assert!(
                out.pixels().all(|p| p.0.iter().all(|&c| c > 0)),
                "source {w}x{h} left an unfilled region"
            );
        }
    }

    #[test]
    fn fill_crops_centered() {
        // Left third red, middle third green, right third blue.
        let mut img = RgbImage::new(300, 100);
        for (x, _, p) in img.enumerate_pixels_mut() {
            *p = match x {
                0..100 => Rgb([255, 0, 0]),
                100..200 => Rgb([0, 255, 0]),
                _ => Rgb([0, 0, 255]),
            };
        }
        let out = scale_image(&img, TargetSize::new(50, 50), ScaleMode::Fill).unwrap();
        let center = out.get_pixel(25, 25);
        assert!(center[1] > 200 && center[0] < 50 && center[2] < 50, "got {center:?}");
    }

    #[test]
    fn cover_dimensions_keep_aspect() {
        assert_eq!(cover_dimensions(400, 100, TargetSize::new(100, 100)), (400, 100));
        assert_eq!(cover_dimensions(100, 400, TargetSize::new(100, 100)), (100, 400));
        assert_eq!(cover_dimensions(200, 100, TargetSize::new(50, 100)), (200, 100));
        assert_eq!(cover_dimensions(100, 100, TargetSize::new(80, 60)), (80, 80));
    }

    #[test]
    fn cover_crop_keeps_the_centered_window() {
        assert_eq!(cover_crop(300, 100, TargetSize::new(50, 50)), (100, 0, 100, 100));
        assert_eq!(cover_crop(100, 400, TargetSize::new(100, 100)), (0, 150, 100, 100));
        assert_eq!(cover_crop(80, 60, TargetSize::new(80, 60)), (0, 0, 80, 60));
    }

    #[test]
    fn panorama_fill_crops_before_resizing() {
        // Resizing first would need a 160000x8000 intermediate.
        assert_eq!(cover_dimensions(8000, 400, TargetSize::new(8000, 8000)), (160000, 8000));
        assert_eq!(cover_crop(8000, 400, TargetSize::new(8000, 8000)), (3800, 0, 400, 400));

        let img = solid(2000, 10, [90, 90, 90]);
        let out = scale_image(&img, TargetSize::new(300, 300), ScaleMode::Fill).unwrap();
        assert_eq!(out.dimensions(), (300, 300));
        assert!(out.pixels().all(|p| p.0.iter().all(|&c| c.abs_diff(90) <= 2)));
    }

    #[test]
    fn input_is_not_mutated() {
        let img = solid(64, 48, [7, 8, 9]);
        let before = img.clone();
        let _ = scale_image(&img, TargetSize::new(10, 10), ScaleMode::Fill).unwrap();
        assert_eq!(img, before);
    }

    #[test]
    fn zero_target_is_rejected() {
        let img = solid(10, 10, [0, 0, 0]);
        let err = scale_image(&img, TargetSize::new(0, 10), ScaleMode::Fit).unwrap_err();
        assert!(matches!(err, CollageError::ZeroDimension));
    }

    #[test_log::test]
    fn unknown_mode_stretches() {
        assert_eq!(ScaleMode::from_name("squash"), ScaleMode::Stretch);
        assert_eq!(ScaleMode::from_name(" FILL "), ScaleMode::Fill);
        assert_eq!(ScaleMode::from_name("fit"), ScaleMode::Fit);
        assert_eq!(ScaleMode::default(), ScaleMode::Fit);
    }
}
