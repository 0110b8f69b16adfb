//! PNG encoding, the default icon format.

use image::codecs::png::PngEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;
use std::io::Cursor;

use super::{validate_rgba, EncodeError};

/// Encode RGBA pixel data to PNG bytes.
///
/// # Arguments
///
/// * `pixels` - RGBA pixel data (4 bytes per pixel, row-major order)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
pub fn encode_png(pixels: &[u8], width: u32, height: u32) -> Result<Vec<u8>, EncodeError> {
    validate_rgba(pixels, width, height)?;

    let mut buffer = Cursor::new(Vec::new());
    PngEncoder::new(&mut buffer)
        .write_image(pixels, width, height, ExtendedColorType::Rgba8)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    #[test]
    fn test_encode_png_signature() {
        let pixels = vec![200u8; 10 * 10 * 4];
        let png = encode_png(&pixels, 10, 10).unwrap();
        assert_eq!(&png[0..8], &PNG_SIGNATURE);
    }

    #[test]
    fn test_encode_png_keeps_transparency() {
        let mut pixels = vec![255u8; 2 * 2 * 4];
        pixels[3] = 0;
        let png = encode_png(&pixels, 2, 2).unwrap();

        let decoded = image::load_from_memory(&png).unwrap().into_rgba8();
        assert_eq!(decoded.get_pixel(0, 0).0[3], 0);
        assert_eq!(decoded.get_pixel(1, 1).0[3], 255);
    }

    #[test]
    fn test_encode_png_invalid_length() {
        let result = encode_png(&[0u8; 10], 2, 2);
        assert!(matches!(
            result,
            Err(EncodeError::InvalidPixelData {
                expected: 16,
                actual: 10
            })
        ));
    }

    #[test]
    fn test_encode_png_zero_dimensions() {
        assert!(matches!(
            encode_png(&[], 0, 5),
            Err(EncodeError::InvalidDimensions { width: 0, height: 5 })
        ));
    }
}
