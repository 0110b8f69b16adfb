//! Rectangular crops of RGBA images.
//!
//! The selection is tracked in fractional preview coordinates, so after
//! scaling into source space its edges rarely land on whole pixels. This
//! module snaps such a rectangle to the pixel grid and copies it out.

use crate::decode::DecodedImage;
use crate::preview::SourceRect;

/// A whole-pixel rectangle inside an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelBounds {
    pub left: u32,
    pub top: u32,
    pub width: u32,
    pub height: u32,
}

/// Snap `rect` to the pixel grid of a `width` x `height` image.
///
/// # Behavior
///
/// - Each edge is rounded to the nearest pixel independently
/// - The result is clamped to the image bounds
/// - Minimum output dimension is 1x1 pixels
pub fn pixel_bounds(rect: &SourceRect, width: u32, height: u32) -> PixelBounds {
    let snap = |v: f64, max: u32| -> u32 {
        if v.is_nan() {
            0
        } else {
            v.round().clamp(0.0, max as f64) as u32
        }
    };

    let left = snap(rect.x, width.saturating_sub(1));
    let top = snap(rect.y, height.saturating_sub(1));
    let right = snap(rect.x + rect.width, width);
    let bottom = snap(rect.y + rect.height, height);

    PixelBounds {
        left,
        top,
        width: right.saturating_sub(left).max(1),
        height: bottom.saturating_sub(top).max(1),
    }
}

/// Copy the pixels under `rect` into a new image.
///
/// # Example
///
/// ```ignore
/// // Crop a 50x50 block starting at (25, 25)
/// let rect = SourceRect { x: 25.0, y: 25.0, width: 50.0, height: 50.0 };
/// let cropped = apply_crop(&image, &rect);
/// ```
pub fn apply_crop(image: &DecodedImage, rect: &SourceRect) -> DecodedImage {
    let bounds = pixel_bounds(rect, image.width, image.height);

    // Fast path: full crop returns a clone
    if bounds.left == 0
        && bounds.top == 0
        && bounds.width == image.width
        && bounds.height == image.height
    {
        return image.clone();
    }

    const CH: usize = DecodedImage::CHANNELS;
    let src_stride = image.width as usize * CH;
    let row_len = bounds.width as usize * CH;
    let mut output = Vec::with_capacity(row_len * bounds.height as usize);

    // Copy pixel data row by row
    for y in 0..bounds.height as usize {
        let src_start = (bounds.top as usize + y) * src_stride + bounds.left as usize * CH;
        output.extend_from_slice(&image.pixels[src_start..src_start + row_len]);
    }

    DecodedImage {
        width: bounds.width,
        height: bounds.height,
        pixels: output,
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
