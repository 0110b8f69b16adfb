//! The icon shown before the user has cropped anything.
//!
//! A page normally ships a default avatar file. If that file is missing or
//! does not decode, a simple face is drawn instead: a diagonal brown
//! gradient, a white disc, two dark eyes and a smile. The drawing is laid out
//! on a 200px canvas and resampled to the configured output size.

use image::{Rgba, RgbaImage};

use crate::config::CropConfig;
use crate::decode::{decode_image_no_orientation, resize, DecodeError, DecodedImage, FilterType};
use crate::error::CropError;
use crate::export::{encode_icon, EncodedIcon};

/// Edge of the canvas the generated avatar is laid out on.
const CANVAS: u32 = 200;

const GRADIENT_START: [u8; 3] = [0x8B, 0x45, 0x13];
const GRADIENT_END: [u8; 3] = [0xD2, 0x69, 0x1E];
const FACE: [u8; 3] = [0xFF, 0xFF, 0xFF];
const FEATURE: [u8; 3] = [0x33, 0x33, 0x33];

const FACE_CENTER: (f64, f64) = (100.0, 100.0);
const FACE_RADIUS: f64 = 60.0;
const EYES: [(f64, f64); 2] = [(80.0, 90.0), (120.0, 90.0)];
const EYE_RADIUS: f64 = 8.0;
const SMILE_RADIUS: f64 = 30.0;
const SMILE_WIDTH: f64 = 3.0;

/// Draw the fallback avatar at `size` x `size`.
pub fn generated_avatar(size: u32) -> Result<DecodedImage, DecodeError> {
    let canvas = RgbaImage::from_fn(CANVAS, CANVAS, |x, y| {
        // Sample at pixel centers
        let (px, py) = (x as f64 + 0.5, y as f64 + 0.5);
        Rgba(avatar_color(px, py))
    });
    let avatar = DecodedImage::from_rgba_image(canvas);

    if size == CANVAS {
        Ok(avatar)
    } else {
        resize(&avatar, size, size, FilterType::Bilinear)
    }
}

fn avatar_color(px: f64, py: f64) -> [u8; 4] {
    let dist = |(cx, cy): (f64, f64)| ((px - cx).powi(2) + (py - cy).powi(2)).sqrt();

    let from_center = dist(FACE_CENTER);
    let on_eye = EYES.iter().any(|&eye| dist(eye) <= EYE_RADIUS);
    // Lower half of the ring only
    let on_smile = py >= FACE_CENTER.1 && (from_center - SMILE_RADIUS).abs() <= SMILE_WIDTH / 2.0;

    let rgb = if on_eye || on_smile {
        FEATURE
    } else if from_center <= FACE_RADIUS {
        FACE
    } else {
        let t = (px + py) / (2.0 * CANVAS as f64);
        lerp(GRADIENT_START, GRADIENT_END, t)
    };
    [rgb[0], rgb[1], rgb[2], 255]
}

fn lerp(a: [u8; 3], b: [u8; 3], t: f64) -> [u8; 3] {
    let t = t.clamp(0.0, 1.0);
    let mix = |i: usize| (a[i] as f64 + (b[i] as f64 - a[i] as f64) * t).round() as u8;
    [mix(0), mix(1), mix(2)]
}

/// Build the default icon.
///
/// `bytes` is the page's default avatar file, if it has one. It is stretched
/// to the output square; when it is absent or fails to decode the generated
/// avatar is used.
pub fn default_icon(bytes: Option<&[u8]>, config: &CropConfig) -> Result<EncodedIcon, CropError> {
    let size = config.output_size;
    let image = match bytes.map(decode_image_no_orientation) {
        Some(Ok(decoded)) => resize(&decoded, size, size, config.export_filter)?,
        Some(Err(e)) => {
            log::warn!("default avatar did not decode ({}); drawing one instead", e);
            generated_avatar(size)?
        }
        None => generated_avatar(size)?,
    };
    Ok(encode_icon(&image, config.output_format)?)
}
