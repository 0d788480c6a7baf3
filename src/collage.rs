//! Collage composer: scale every image to a shared tile size, then lay them out.

use std::path::Path;

use image::RgbImage;
use log::{debug, info, warn};
use rand::Rng;

use crate::error::{CollageError, Result};
use crate::layout::{self, Layout};
use crate::scale::{self, ScaleMode};
use crate::size::TargetSize;

/// Fewest images a collage can be built from.
pub const MIN_IMAGES: usize = 2;

/// Input file extensions the loader accepts.
pub const ALLOWED_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "gif", "webp"];

/// Build one collage image.
///
/// When `target` is `None` the tile size is the largest width and the largest
/// height found among `images`. Inputs are only read.
pub fn create_collage<R: Rng + ?Sized>(
    images: &[RgbImage],
    layout: Layout,
    scale_mode: ScaleMode,
    target: Option<TargetSize>,
    rng: &mut R,
) -> Result<RgbImage> {
    if images.len() < MIN_IMAGES {
        return Err(CollageError::NotEnoughImages { found: images.len() });
    }

    let target = match target {
        Some(size) => size,
        None => {
            let derived = TargetSize::from_images(images).ok_or(CollageError::ZeroDimension)?;
            debug!("No target size given, using {derived}");
            derived
        }
    };

    let tiles = images
        .iter()
        .map(|img| scale::scale_image(img, target, scale_mode))
        .collect::<Result<Vec<_>>>()?;

    let composition = layout::compose(layout, &tiles, rng)?;
    debug!("Placements: {:?}", composition.placements);
    info!(
        "Composed {} images ({target} tiles, {scale_mode:?}) into {layout} canvas {}x{}",
        images.len(),
        composition.canvas.width(),
        composition.canvas.height()
    );
    Ok(composition.canvas)
}

/// Whether `path` has one of [`ALLOWED_EXTENSIONS`], ignoring case.
pub fn is_allowed(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ALLOWED_EXTENSIONS.iter().any(|ok| ok.eq_ignore_ascii_case(ext)))
}

/// Decode every allowed file in `paths` to RGB, skipping the rest.
///
/// Fails if fewer than [`MIN_IMAGES`] files survive the extension filter.
pub fn load_images<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<RgbImage>> {
    let mut images = Vec::with_capacity(paths.len());
    for path in paths {
        let path = path.as_ref();
        if !is_allowed(path) {
            warn!("Skipping {}: unsupported file type", path.display());
            continue;
        }
        let img = image::open(path)?.to_rgb8();
        debug!("Loaded {} ({}x{})", path.display(), img.width(), img.height());
        images.push(img);
    }

    if images.len() < MIN_IMAGES {
        return Err(CollageError::NotEnoughImages { found: images.len() });
    }
    Ok(images)
}
