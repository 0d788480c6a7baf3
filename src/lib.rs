//! Compose several photos into a single collage image.
//!
//! # Modules
//!
//! - [`size`] — Target tile size and `WIDTHxHEIGHT` parsing
//! - [`scale`] — Scale modes (fit, fill, stretch) and the image scaler
//! - [`layout`] — Placement strategies (grid, horizontal, vertical, random, diagonal, circular)
//! - [`collage`] — The composer entry point and input loading
//! - [`encode`] — JPEG/WebP output

#![forbid(unsafe_code)]

pub mod collage;
pub mod encode;
pub mod error;
pub mod layout;
pub mod scale;
pub mod size;

pub use collage::{create_collage, load_images};
pub use encode::{OutputFormat, encode};
pub use error::{CollageError, Result};
pub use layout::{Composition, Layout, Placement, compose};
pub use scale::{ScaleMode, scale_image};
pub use size::TargetSize;
