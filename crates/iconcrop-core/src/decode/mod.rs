//! Image decoding pipeline.
//!
//! This module provides functionality for:
//! - Decoding the user-selected file into an upright RGBA source image
//! - Computing preview dimensions capped on the longer edge
//! - Resizing images for preview and export
//!
//! # Architecture
//!
//! Decoding is a separate step from starting a crop session: a session is only
//! created from an already decoded image, so callers may decode off the UI
//! thread (e.g. in a Web Worker) and start the session when it completes.

mod resize;
mod source;
mod types;

pub use resize::{calculate_fit_dimensions, resize};
pub use source::{decode_image, decode_image_no_orientation};
pub use types::{DecodeError, DecodedImage, FilterType, Orientation, RawImage};
