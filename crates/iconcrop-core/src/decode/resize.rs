//! Image resizing for the preview surface and the exported icon.
//!
//! Provides resize operations using the `image` crate's algorithms.
//! All functions return new `DecodedImage` instances without modifying the input.

use super::{DecodeError, DecodedImage, FilterType};

/// Resize an image to exact dimensions.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if a target dimension is zero, and
/// `DecodeError::CorruptedFile` if the source buffer does not match its
/// dimensions.
pub fn resize(
    image: &DecodedImage,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Result<DecodedImage, DecodeError> {
    if width == 0 || height == 0 {
        return Err(DecodeError::InvalidFormat);
    }

    // Fast path: if dimensions match, just clone
    if image.width == width && image.height == height {
        return Ok(image.clone());
    }

    let rgba_image = image
        .to_rgba_image()
        .ok_or_else(|| DecodeError::CorruptedFile("Failed to create RgbaImage".to_string()))?;

    let resized = image::imageops::resize(&rgba_image, width, height, filter.to_image_filter());

    Ok(DecodedImage::from_rgba_image(resized))
}

/// Calculate dimensions to fit within `max_edge` while preserving aspect ratio.
///
/// The longer edge becomes exactly `max_edge`; the shorter edge is derived from
/// the source ratio and rounded to the nearest pixel (never below 1). Inputs
/// that already fit are returned unchanged.
pub fn calculate_fit_dimensions(width: u32, height: u32, max_edge: u32) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (0, 0);
    }

    if width <= max_edge && height <= max_edge {
        return (width, height);
    }

    let (w, h, edge) = (width as f64, height as f64, max_edge as f64);

    if width >= height {
        // Landscape or square: constrain by width
        let new_height = (edge * h / w).round() as u32;
        (max_edge, new_height.max(1))
    } else {
        // Portrait: constrain by height
        let new_width = (edge * w / h).round() as u32;
        (new_width.max(1), max_edge)
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: the longer edge never exceeds the cap.
        #[test]
        fn prop_fit_within_cap(
            width in 1u32..=10_000,
            height in 1u32..=10_000,
            cap in 1u32..=2_000,
        ) {
            let (w, h) = calculate_fit_dimensions(width, height, cap);
            prop_assert!(w.max(h) <= cap);
            prop_assert!(w >= 1 && h >= 1);
        }

        /// Property: inputs that already fit are returned unchanged.
        #[test]
        fn prop_fit_identity_when_small(
            cap in 1u32..=2_000,
            (width, height) in (1u32..=2_000, 1u32..=2_000),
        ) {
            prop_assume!(width.max(height) <= cap);
            prop_assert_eq!(calculate_fit_dimensions(width, height, cap), (width, height));
        }

        /// Property: aspect ratio is preserved within one pixel of rounding.
        #[test]
        fn prop_fit_preserves_ratio(
            width in 1u32..=10_000,
            height in 1u32..=10_000,
            cap in 50u32..=2_000,
        ) {
            let (w, h) = calculate_fit_dimensions(width, height, cap);
            if width >= height {
                let exact = w as f64 * height as f64 / width as f64;
                prop_assert!((h as f64 - exact).abs() <= 0.5 || h == 1);
            } else {
                let exact = h as f64 * width as f64 / height as f64;
                prop_assert!((w as f64 - exact).abs() <= 0.5 || w == 1);
            }
        }
    }
}
