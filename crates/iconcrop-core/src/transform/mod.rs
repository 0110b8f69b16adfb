//! Pixel-level transforms shared by the renderer and the exporter.
//!
//! # Coordinate System
//!
//! - Rectangles are in source-image pixels and may be fractional
//! - Edges are rounded to the nearest pixel before copying
//! - Origin is top-left corner

mod crop;

pub use crop::{apply_crop, pixel_bounds, PixelBounds};
