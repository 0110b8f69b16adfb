//! Raster decoding with EXIF orientation handling.
//!
//! Any format the `image` crate was built with is accepted; the format is
//! sniffed from the bytes rather than trusted from the declared MIME type.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::DynamicImage;
use image::ImageReader;

use super::{DecodeError, DecodedImage, Orientation, RawImage};

/// Decode a user-selected image, applying EXIF orientation correction.
///
/// # Errors
///
/// Returns `DecodeError::UnsupportedType` if the declared type is not an image,
/// `DecodeError::InvalidFormat` if the format cannot be recognized,
/// `DecodeError::CorruptedFile` if decoding fails, and
/// `DecodeError::EmptyImage` if the result has no pixels.
pub fn decode_image(raw: &RawImage) -> Result<DecodedImage, DecodeError> {
    if !raw.declares_image() {
        return Err(DecodeError::UnsupportedType(raw.mime_type.clone()));
    }

    let orientation = extract_orientation(&raw.bytes);
    let img = decode_dynamic(&raw.bytes)?;
    let oriented = apply_orientation(img, orientation);

    let decoded = DecodedImage::from_rgba_image(oriented.into_rgba8());
    if decoded.is_empty() {
        return Err(DecodeError::EmptyImage);
    }

    log::debug!(
        "decoded {}x{} image ({:?})",
        decoded.width,
        decoded.height,
        orientation
    );
    Ok(decoded)
}

/// Decode image bytes without applying EXIF orientation.
pub fn decode_image_no_orientation(bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
    let img = decode_dynamic(bytes)?;
    let decoded = DecodedImage::from_rgba_image(img.into_rgba8());
    if decoded.is_empty() {
        return Err(DecodeError::EmptyImage);
    }
    Ok(decoded)
}

fn decode_dynamic(bytes: &[u8]) -> Result<DynamicImage, DecodeError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    if reader.format().is_none() {
        return Err(DecodeError::InvalidFormat);
    }

    reader
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))
}

/// Extract EXIF orientation from image bytes.
///
/// Returns `Orientation::Normal` if no EXIF data is found or orientation
/// cannot be determined.
fn extract_orientation(bytes: &[u8]) -> Orientation {
    let exif_reader = Reader::new();
    let mut cursor = Cursor::new(bytes);

    match exif_reader.read_from_container(&mut cursor) {
        Ok(exif) => exif
            .get_field(Tag::Orientation, In::PRIMARY)
            .and_then(|field| field.value.get_uint(0))
            .map(Orientation::from)
            .unwrap_or_default(),
        Err(_) => Orientation::Normal,
    }
}

/// Apply EXIF orientation transformation to an image.
fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}
