//! Preview surface rendering.
//!
//! Every region change redraws the whole surface, back to front:
//!
//! 1. the source image at preview scale
//! 2. a translucent black overlay over everything outside the selection
//! 3. a solid border around the selection
//! 4. rule-of-thirds guides inside the selection, translucent
//!
//! The selection is never resampled here: the preview-scale base already
//! holds its pixels, so the overlay simply skips that window. A redraw costs
//! one copy of the preview plus the overlay pass, whatever the source size.
//!
//! [`render_frame`] is a pure function of its inputs; it keeps no state
//! between calls and never touches the region.

use image::{Rgba, RgbaImage};

use crate::config::CropConfig;
use crate::decode::{resize, DecodeError, DecodedImage, FilterType};
use crate::preview::PreviewFrame;
use crate::region::CropRegion;

const OVERLAY_COLOR: [u8; 3] = [0, 0, 0];
const BORDER_COLOR: [u8; 3] = [255, 255, 255];
const GUIDE_COLOR: [u8; 3] = [255, 255, 255];

/// Visual parameters for the preview surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderStyle {
    pub overlay_alpha: f32,
    pub border_width: u32,
    pub guide_alpha: f32,
}

impl RenderStyle {
    pub fn from_config(config: &CropConfig) -> Self {
        Self {
            overlay_alpha: config.overlay_alpha,
            border_width: config.border_width,
            guide_alpha: config.guide_alpha,
        }
    }
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self::from_config(&CropConfig::default())
    }
}

/// Scale the source to the preview size. Computed once per session and used
/// as the first layer of every frame.
pub fn preview_base(source: &DecodedImage, frame: &PreviewFrame) -> Result<RgbaImage, DecodeError> {
    let scaled = resize(source, frame.width(), frame.height(), FilterType::Bilinear)?;
    scaled
        .to_rgba_image()
        .ok_or_else(|| DecodeError::CorruptedFile("preview buffer size mismatch".to_string()))
}

/// Draw one frame of the crop surface over `base`, the output of
/// [`preview_base`] for the session.
pub fn render_frame(base: &RgbaImage, region: &CropRegion, style: &RenderStyle) -> RgbaImage {
    let mut canvas = base.clone();
    let (width, height) = canvas.dimensions();
    let (width, height) = (width as i64, height as i64);

    let left = region.x().round() as i64;
    let top = region.y().round() as i64;
    let side = ((region.x() + region.size()).round() as i64 - left)
        .min((region.y() + region.size()).round() as i64 - top);

    let overlay = style.overlay_alpha;
    if side <= 0 {
        // Nothing selected: dimmed image only
        fill_rect(&mut canvas, 0, 0, width, height, OVERLAY_COLOR, overlay);
        return canvas;
    }

    let (right, bottom) = (left + side, top + side);
    fill_rect(&mut canvas, 0, 0, width, top, OVERLAY_COLOR, overlay);
    fill_rect(&mut canvas, 0, bottom, width, height, OVERLAY_COLOR, overlay);
    fill_rect(&mut canvas, 0, top, left, bottom, OVERLAY_COLOR, overlay);
    fill_rect(&mut canvas, right, top, width, bottom, OVERLAY_COLOR, overlay);

    draw_border(&mut canvas, left, top, side, style.border_width);
    draw_guides(&mut canvas, left, top, side, style.guide_alpha);

    canvas
}

/// Solid border centered on the selection edge.
fn draw_border(canvas: &mut RgbaImage, left: i64, top: i64, side: i64, width: u32) {
    if width == 0 {
        return;
    }
    let w = width as i64;
    let inset = w / 2;
    let (x0, y0) = (left - inset, top - inset);
    let (x1, y1) = (left + side + (w - inset), top + side + (w - inset));

    fill_rect(canvas, x0, y0, x1, y0 + w, BORDER_COLOR, 1.0);
    fill_rect(canvas, x0, y1 - w, x1, y1, BORDER_COLOR, 1.0);
    fill_rect(canvas, x0, y0 + w, x0 + w, y1 - w, BORDER_COLOR, 1.0);
    fill_rect(canvas, x1 - w, y0 + w, x1, y1 - w, BORDER_COLOR, 1.0);
}

/// Two vertical and two horizontal 1px lines at thirds of the selection.
fn draw_guides(canvas: &mut RgbaImage, left: i64, top: i64, side: i64, alpha: f32) {
    for i in 1..3 {
        let offset = (side as f64 * i as f64 / 3.0).round() as i64;
        let (x, y) = (left + offset, top + offset);
        fill_rect(canvas, x, top, x + 1, top + side, GUIDE_COLOR, alpha);
        fill_rect(canvas, left, y, left + side, y + 1, GUIDE_COLOR, alpha);
    }
}

/// Paint `color` at `alpha` over the half-open rectangle `[x0, x1) x [y0, y1)`,
/// clipped to the canvas.
///
/// Only the color channels are mixed; each pixel keeps its own alpha, so an
/// opaque base stays opaque under the overlay and the guides. A fully opaque
/// `color` replaces the pixel outright.
fn fill_rect(
    canvas: &mut RgbaImage,
    x0: i64,
    y0: i64,
    x1: i64,
    y1: i64,
    color: [u8; 3],
    alpha: f32,
) {
    let (width, height) = canvas.dimensions();
    let x0 = x0.clamp(0, width as i64) as u32;
    let x1 = x1.clamp(0, width as i64) as u32;
    let y0 = y0.clamp(0, height as i64) as u32;
    let y1 = y1.clamp(0, height as i64) as u32;

    let a = (alpha.clamp(0.0, 1.0) * 255.0).round() as u16;
    if a == 0 {
        return;
    }

    for y in y0..y1 {
        for x in x0..x1 {
            let px = canvas.get_pixel_mut(x, y);
            if a == 255 {
                *px = Rgba([color[0], color[1], color[2], u8::MAX]);
                continue;
            }
            for (channel, &paint) in px.0.iter_mut().zip(color.iter()) {
                let mixed = u16::from(*channel) * (255 - a) + u16::from(paint) * a;
                *channel = ((mixed + 127) / 255) as u8;
            }
        }
    }
}
