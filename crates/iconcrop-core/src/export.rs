//! Final resampling of the selection into the output icon.
//!
//! The selection lives in preview space. On confirm it is mapped back onto
//! the full-resolution source with the session's scale factors, cut out, and
//! resampled to a fixed square (200x200 by default) no matter how large the
//! selection was. The result is encoded and wrapped in a `data:` URL, the
//! form the icon store keeps.

use crate::config::{CropConfig, OutputFormat};
use crate::decode::{decode_image_no_orientation, resize, DecodeError, DecodedImage};
use crate::encode::{encode_jpeg, encode_png, parse_data_url, to_data_url, EncodeError};
use crate::error::CropError;
use crate::preview::PreviewFrame;
use crate::region::CropRegion;
use crate::transform::apply_crop;

/// An encoded icon, held as a `data:` URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedIcon {
    data_url: String,
}

impl EncodedIcon {
    /// Wrap already-encoded image bytes.
    pub fn from_bytes(mime_type: &str, bytes: &[u8]) -> Self {
        Self {
            data_url: to_data_url(mime_type, bytes),
        }
    }

    /// Accept a stored `data:` URL, checking that it is well formed.
    pub fn from_data_url(url: impl Into<String>) -> Result<Self, EncodeError> {
        let data_url = url.into();
        parse_data_url(&data_url)?;
        Ok(Self { data_url })
    }

    pub fn as_data_url(&self) -> &str {
        &self.data_url
    }

    pub fn into_data_url(self) -> String {
        self.data_url
    }

    /// MIME type declared in the URL.
    pub fn mime_type(&self) -> &str {
        self.data_url
            .strip_prefix("data:")
            .and_then(|rest| rest.split(';').next())
            .unwrap_or_default()
    }

    /// Decode the icon back into pixels.
    pub fn to_image(&self) -> Result<DecodedImage, DecodeError> {
        let (_, bytes) = parse_data_url(&self.data_url)
            .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;
        decode_image_no_orientation(&bytes)
    }
}

/// Resample the source pixels under `region` into an `output_size` square.
pub fn render_icon(
    source: &DecodedImage,
    frame: &PreviewFrame,
    region: &CropRegion,
    config: &CropConfig,
) -> Result<DecodedImage, DecodeError> {
    let rect = frame.to_source(region);
    let window = apply_crop(source, &rect);
    resize(&window, config.output_size, config.output_size, config.export_filter)
}

/// Encode pixels in the configured output format.
pub fn encode_icon(
    image: &DecodedImage,
    format: OutputFormat,
) -> Result<EncodedIcon, EncodeError> {
    let bytes = match format {
        OutputFormat::Png => encode_png(&image.pixels, image.width, image.height)?,
        OutputFormat::Jpeg { quality } => {
            encode_jpeg(&image.pixels, image.width, image.height, quality)?
        }
    };
    Ok(EncodedIcon::from_bytes(format.mime_type(), &bytes))
}

/// Produce the final icon for `region`.
///
/// Rejects selections smaller than `config.min_selection_size` instead of
/// stretching a handful of pixels into a blurry icon. On previews whose short
/// edge is below that size, a selection spanning the short edge is enough.
pub fn export_region(
    source: &DecodedImage,
    frame: &PreviewFrame,
    region: &CropRegion,
    config: &CropConfig,
) -> Result<EncodedIcon, CropError> {
    let min = config.min_selection_size.min(frame.short_edge()).max(1.0);
    if region.size() < min {
        return Err(CropError::SelectionTooSmall {
            size: region.size(),
            min,
        });
    }

    let pixels = render_icon(source, frame, region, config)?;
    let icon = encode_icon(&pixels, config.output_format)?;

    log::debug!(
        "exported {}x{} {} icon from source rect {:?}",
        pixels.width,
        pixels.height,
        icon.mime_type(),
        frame.to_source(region)
    );
    Ok(icon)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preview::Point;

    /// Four solid quadrants: red, green / blue, white.
    fn quadrants(width: u32, height: u32) -> DecodedImage {
        let mut pixels = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                let px = match (x < width / 2, y < height / 2) {
                    (true, true) => [255, 0, 0, 255],
                    (false, true) => [0, 255, 0, 255],
                    (true, false) => [0, 0, 255, 255],
                    (false, false) => [255, 255, 255, 255],
                };
                pixels.extend_from_slice(&px);
            }
        }
        DecodedImage::new(width, height, pixels)
    }

    #[test]
    fn test_icon_has_fixed_size() {
        let source = quadrants(800, 600);
        let frame = PreviewFrame::fit(800, 600, 400);
        let config = CropConfig::default();

        for region in [
            CropRegion::centered(&frame, 0.8),
            CropRegion::centered(&frame, 0.05),
            CropRegion::centered(&frame, 1.0),
        ] {
            let icon = render_icon(&source, &frame, &region, &config).unwrap();
            assert_eq!((icon.width, icon.height), (200, 200));
        }
    }

    #[test]
    fn test_icon_samples_mapped_source_rect() {
        let source = quadrants(800, 600);
        let frame = PreviewFrame::fit(800, 600, 400);
        // Preview square (20, 20, 100) lies in the red quadrant; in source
        // space that is (40, 40, 200, 200)
        let region =
            CropRegion::from_drag(&frame, Point::new(20.0, 20.0), Point::new(120.0, 120.0));
        let icon = render_icon(&source, &frame, &region, &CropConfig::default()).unwrap();

        assert_eq!(&icon.pixels[0..4], &[255, 0, 0, 255]);
        let last = icon.pixels.len() - 4;
        assert_eq!(&icon.pixels[last..], &[255, 0, 0, 255]);
    }

    #[test]
    fn test_icon_from_bottom_right_quadrant() {
        let source = quadrants(800, 600);
        let frame = PreviewFrame::fit(800, 600, 400);
        let region =
            CropRegion::from_drag(&frame, Point::new(250.0, 200.0), Point::new(400.0, 300.0));
        let icon = render_icon(&source, &frame, &region, &CropConfig::default()).unwrap();

        assert_eq!(&icon.pixels[0..4], &[255, 255, 255, 255]);
    }

    #[test]
    fn test_export_png_data_url() {
        let source = quadrants(400, 300);
        let frame = PreviewFrame::fit(400, 300, 400);
        let region = CropRegion::centered(&frame, 0.8);

        let icon = export_region(&source, &frame, &region, &CropConfig::default()).unwrap();

        assert!(icon.as_data_url().starts_with("data:image/png;base64,"));
        assert_eq!(icon.mime_type(), "image/png");
        let decoded = icon.to_image().unwrap();
        assert_eq!((decoded.width, decoded.height), (200, 200));
    }

    #[test]
    fn test_export_jpeg_data_url() {
        let source = quadrants(400, 300);
        let frame = PreviewFrame::fit(400, 300, 400);
        let mut config = CropConfig::default();
        config.output_format = OutputFormat::Jpeg { quality: 85 };
        config.output_size = 64;

        let region = CropRegion::centered(&frame, 0.8);
        let icon = export_region(&source, &frame, &region, &config).unwrap();

        assert_eq!(icon.mime_type(), "image/jpeg");
        let decoded = icon.to_image().unwrap();
        assert_eq!((decoded.width, decoded.height), (64, 64));
    }

    #[test]
    fn test_export_rejects_degenerate_region() {
        let source = quadrants(400, 300);
        let frame = PreviewFrame::fit(400, 300, 400);
        let point = Point::new(100.0, 100.0);
        let region = CropRegion::from_drag(&frame, point, point);

        let result = export_region(&source, &frame, &region, &CropConfig::default());
        assert!(matches!(
            result,
            Err(CropError::SelectionTooSmall { size, min }) if size == 0.0 && min == 10.0
        ));
    }

    #[test]
    fn test_export_accepts_region_at_minimum() {
        let source = quadrants(400, 300);
        let frame = PreviewFrame::fit(400, 300, 400);
        let region = CropRegion::from_drag(&frame, Point::new(0.0, 0.0), Point::new(10.0, 10.0));

        assert!(export_region(&source, &frame, &region, &CropConfig::default()).is_ok());
    }

    #[test]
    fn test_tiny_source_full_selection_is_accepted() {
        // 8x8 preview: its short edge is below the default minimum of 10
        let source = quadrants(8, 8);
        let frame = PreviewFrame::fit(8, 8, 400);
        let config = CropConfig::default();

        let full = CropRegion::from_drag(&frame, Point::new(0.0, 0.0), Point::new(8.0, 8.0));
        assert_eq!(full.size(), 8.0);
        let icon = export_region(&source, &frame, &full, &config).unwrap();
        let decoded = icon.to_image().unwrap();
        assert_eq!((decoded.width, decoded.height), (200, 200));
        assert_eq!(&decoded.pixels[0..4], &[255, 0, 0, 255]);

        let half = CropRegion::from_drag(&frame, Point::new(0.0, 0.0), Point::new(4.0, 4.0));
        assert!(matches!(
            export_region(&source, &frame, &half, &config),
            Err(CropError::SelectionTooSmall { size, min }) if size == 4.0 && min == 8.0
        ));
    }

    #[test]
    fn test_export_maps_axes_with_their_own_scale() {
        // 6000x4000 previews at 400x267, so the axes scale by 15 and 4000/267
        let frame = PreviewFrame::fit(6000, 4000, 400);
        assert_eq!((frame.width(), frame.height()), (400, 267));
        assert_eq!(frame.scale_x(), 15.0);
        assert!((frame.scale_y() - 4000.0 / 267.0).abs() < 1e-12);

        let region =
            CropRegion::from_drag(&frame, Point::new(100.0, 100.0), Point::new(200.0, 200.0));
        let rect = frame.to_source(&region);
        assert_eq!((rect.x, rect.width), (1500.0, 1500.0));
        assert!((rect.y - 1498.127).abs() < 1e-3);
        assert!((rect.height - 1498.127).abs() < 1e-3);
        assert_eq!(
            crate::transform::pixel_bounds(&rect, 6000, 4000),
            crate::transform::PixelBounds {
                left: 1500,
                top: 1498,
                width: 1500,
                height: 1498,
            }
        );

        // Same shape at 1200x800 (preview 400x267, scales 3 and 800/267),
        // small enough to check pixels. Preview square (100, 100, 100) maps
        // to source columns 300..600 and rows 300..599; a single factor of 3
        // would also pick up row 599.
        let (width, height) = (1200, 800);
        let mut pixels = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                let inside = (300..600).contains(&x) && (300..599).contains(&y);
                let px = if inside { [0, 255, 0, 255] } else { [255, 0, 0, 255] };
                pixels.extend_from_slice(&px);
            }
        }
        let source = DecodedImage::new(width, height, pixels);
        let frame = PreviewFrame::fit(width, height, 400);
        assert_eq!((frame.width(), frame.height()), (400, 267));
        let region =
            CropRegion::from_drag(&frame, Point::new(100.0, 100.0), Point::new(200.0, 200.0));

        let icon = render_icon(&source, &frame, &region, &CropConfig::default()).unwrap();
        assert_eq!((icon.width, icon.height), (200, 200));
        assert!(icon.pixels.chunks_exact(4).all(|px| px == [0, 255, 0, 255]));
    }

    #[test]
    fn test_encoded_icon_accessors() {
        let icon = EncodedIcon::from_bytes("image/png", b"abc");
        assert_eq!(icon.as_data_url(), "data:image/png;base64,YWJj");
        assert_eq!(icon.mime_type(), "image/png");
        assert!(EncodedIcon::from_data_url("not a url").is_err());
        assert!(icon.to_image().is_err());
    }
}
