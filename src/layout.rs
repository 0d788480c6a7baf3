//! Placement strategies that arrange equally sized tiles on a black canvas.
//!
//! Every strategy takes tiles that all share one size (the output of
//! [`scale_image`](crate::scale::scale_image)) and returns a freshly allocated
//! canvas plus the top-left offset each tile was pasted at. Offsets are signed
//! and may fall partly outside the canvas; pasting clips to the canvas bounds.
//!
//! | Layout | Canvas | Tile `i` |
//! |---|---|---|
//! | grid | `cols·w × rows·h`, `cols = ⌊√n⌋` | `(i mod cols, i div cols)` |
//! | horizontal | `n·w × h` | `(i·w, 0)` |
//! | vertical | `w × n·h` | `(0, i·h)` |
//! | diagonal | `n·w × n·h` | `(i·w, i·h)` |
//! | random | `⌊√n⌋·max(w,h)` square | first black spot in 50 tries, else last try |
//! | circular | `2·⌊√n⌋·max(w,h)` square | on a ring around the center |

use std::f64::consts::PI;
use std::fmt;

use image::imageops;
use image::RgbImage;
use log::{debug, warn};
use rand::Rng;

use crate::error::{CollageError, Result};

/// Tries per tile before the random layout gives up looking for free space.
pub const RANDOM_ATTEMPTS: usize = 50;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Layout {
    #[default]
    Grid,
    Horizontal,
    Vertical,
    Random,
    Diagonal,
    Circular,
}

impl Layout {
    pub const ALL: [Layout; 6] = [
        Layout::Grid,
        Layout::Horizontal,
        Layout::Vertical,
        Layout::Random,
        Layout::Diagonal,
        Layout::Circular,
    ];

    /// Unknown names fall back to [`Grid`](Self::Grid).
    pub fn from_name(name: &str) -> Self {
        let wanted = name.trim().to_ascii_lowercase();
        match Self::ALL.into_iter().find(|layout| layout.name() == wanted) {
            Some(layout) => layout,
            None => {
                warn!("Unknown layout {name:?}, using grid");
                Self::Grid
            }
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Layout::Grid => "grid",
            Layout::Horizontal => "horizontal",
            Layout::Vertical => "vertical",
            Layout::Random => "random",
            Layout::Diagonal => "diagonal",
            Layout::Circular => "circular",
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Top-left corner of a pasted tile, in canvas pixels.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Placement {
    pub x: i64,
    pub y: i64,
}

impl Placement {
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

/// A composed canvas and where each tile landed, in input order.
#[derive(Clone, Debug)]
pub struct Composition {
    pub canvas: RgbImage,
    pub placements: Vec<Placement>,
}

/// Arrange `tiles` according to `layout`.
///
/// `rng` is only consulted by [`Layout::Random`].
pub fn compose<R: Rng + ?Sized>(layout: Layout, tiles: &[RgbImage], rng: &mut R) -> Result<Composition> {
    let Some(first) = tiles.first() else {
        return Err(CollageError::NotEnoughImages { found: 0 });
    };
    let (w, h) = first.dimensions();
    if tiles.iter().any(|t| t.dimensions() != (w, h)) {
        return Err(CollageError::MismatchedTiles);
    }

    let n = tiles.len();
    let too_large = || CollageError::CanvasTooLarge { layout, count: n };

    let (canvas_w, canvas_h, placements) = match layout {
        Layout::Grid => grid(n, w, h).ok_or_else(too_large)?,
        Layout::Horizontal => {
            let placements = (0..n).map(|i| Placement::new(i as i64 * w as i64, 0)).collect();
            (span(n, w).ok_or_else(too_large)?, h, placements)
        }
        Layout::Vertical => {
            let placements = (0..n).map(|i| Placement::new(0, i as i64 * h as i64)).collect();
            (w, span(n, h).ok_or_else(too_large)?, placements)
        }
        Layout::Diagonal => {
            let placements = (0..n)
                .map(|i| Placement::new(i as i64 * w as i64, i as i64 * h as i64))
                .collect();
            (
                span(n, w).ok_or_else(too_large)?,
                span(n, h).ok_or_else(too_large)?,
                placements,
            )
        }
        Layout::Circular => circular(n, w, h).ok_or_else(too_large)?,
        Layout::Random => {
            let side = span(n.isqrt(), w.max(h)).ok_or_else(too_large)?;
            return Ok(random(tiles, side, rng));
        }
    };

    let mut canvas = RgbImage::new(canvas_w, canvas_h);
    for (tile, at) in tiles.iter().zip(&placements) {
        imageops::replace(&mut canvas, tile, at.x, at.y);
    }
    Ok(Composition { canvas, placements })
}

/// `count * tile`, or `None` if it does not fit in a `u32`.
fn span(count: usize, tile: u32) -> Option<u32> {
    u32::try_from(count).ok()?.checked_mul(tile)
}

fn grid(n: usize, w: u32, h: u32) -> Option<(u32, u32, Vec<Placement>)> {
    let cols = n.isqrt().max(1);
    let rows = n.div_ceil(cols);
    let placements = (0..n)
        .map(|i| Placement::new((i % cols) as i64 * w as i64, (i / cols) as i64 * h as i64))
        .collect();
    Some((span(cols, w)?, span(rows, h)?, placements))
}

fn circular(n: usize, w: u32, h: u32) -> Option<(u32, u32, Vec<Placement>)> {
    let side = span(n.isqrt(), w.max(h))?.checked_mul(2)?;
    let center = (side / 2) as f64;
    let radius = ((side / 2) as i64 - w.max(h) as i64).min((side / 3) as i64) as f64;

    let placements = (0..n)
        .map(|i| {
            let angle = 2.0 * PI * i as f64 / n as f64;
            let x = center + radius * angle.cos() - (w / 2) as f64;
            let y = center + radius * angle.sin() - (h / 2) as f64;
            Placement::new(x as i64, y as i64)
        })
        .collect();
    Some((side, side, placements))
}

fn random<R: Rng + ?Sized>(tiles: &[RgbImage], side: u32, rng: &mut R) -> Composition {
    scatter(tiles, side, |w, h| (rng.gen_range(0..=side - w), rng.gen_range(0..=side - h)))
}

/// Best-effort scatter: each tile takes the first spot whose region is still
/// pure black, or overlaps at the last attempted spot once the tries run out.
///
/// `next_spot` receives the tile size and returns a top-left corner that keeps
/// the tile inside the `side × side` canvas.
fn scatter<F>(tiles: &[RgbImage], side: u32, mut next_spot: F) -> Composition
where
    F: FnMut(u32, u32) -> (u32, u32),
{
    let mut canvas = RgbImage::new(side, side);
    let mut placements = Vec::with_capacity(tiles.len());

    for (i, tile) in tiles.iter().enumerate() {
        let (w, h) = tile.dimensions();
        let mut spot = (0, 0);
        let mut free = false;

        for _ in 0..RANDOM_ATTEMPTS {
            spot = next_spot(w, h);
            if is_black(&canvas, spot.0, spot.1, w, h) {
                free = true;
                break;
            }
        }
        if !free {
            debug!("No free spot for tile {i} after {RANDOM_ATTEMPTS} tries, overlapping at {spot:?}");
        }

        imageops::replace(&mut canvas, tile, spot.0 as i64, spot.1 as i64);
        placements.push(Placement::new(spot.0 as i64, spot.1 as i64));
    }

    Composition { canvas, placements }
}

fn is_black(canvas: &RgbImage, x: u32, y: u32, w: u32, h: u32) -> bool {
    (y..y + h).all(|py| (x..x + w).all(|px| canvas.get_pixel(px, py).0 == [0, 0, 0]))
}
