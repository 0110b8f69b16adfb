//! Icon encoding.
//!
//! This module provides functionality for:
//! - Encoding RGBA pixels to PNG (lossless, keeps transparency)
//! - Encoding RGBA pixels to JPEG with configurable quality
//! - Wrapping encoded bytes in an embeddable `data:` URL
//!
//! # Examples
//!
//! ```ignore
//! use iconcrop_core::encode::{encode_png, to_data_url};
//!
//! let pixels = vec![128u8; 200 * 200 * 4];
//! let png = encode_png(&pixels, 200, 200).unwrap();
//! let url = to_data_url("image/png", &png);
//! assert!(url.starts_with("data:image/png;base64,"));
//! ```

mod data_url;
mod jpeg;
mod png;

use thiserror::Error;

pub use data_url::{parse_data_url, to_data_url};
pub use jpeg::encode_jpeg;
pub use png::encode_png;

/// Errors that can occur during encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 4), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The encoder failed
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),

    /// A string is not a base64 `data:` URL
    #[error("Malformed data URL: {0}")]
    MalformedDataUrl(String),
}

/// Check dimensions and buffer length of an RGBA image.
pub(crate) fn validate_rgba(pixels: &[u8], width: u32, height: u32) -> Result<(), EncodeError> {
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected = (width as usize) * (height as usize) * 4;
    if pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: pixels.len(),
        });
    }
    Ok(())
}
