//! Preview surface geometry.
//!
//! The crop UI never shows the source image at full resolution. It draws a
//! preview whose longer edge is capped (400px by default) and maps every
//! selection back to source pixels through two scale factors:
//!
//! ```text
//! sx = source_width  / preview_width
//! sy = source_height / preview_height
//! ```
//!
//! # Coordinate System
//!
//! - Origin is the top-left corner of the preview surface
//! - Units are preview pixels, fractional values allowed
//! - "Display" space is the on-screen size of the surface element, which may
//!   differ from the preview size when the page scales it with CSS

use crate::decode::calculate_fit_dimensions;
use crate::region::CropRegion;

/// A point in preview (or display) coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle in source-image pixels (fractional).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SourceRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Preview dimensions and scale factors for one crop session.
///
/// Computed once when the session starts and immutable afterward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreviewFrame {
    source_width: u32,
    source_height: u32,
    width: u32,
    height: u32,
    scale_x: f64,
    scale_y: f64,
}

impl PreviewFrame {
    /// Fit a `source_width` x `source_height` image under `cap`.
    ///
    /// Images whose longer edge is already within the cap keep their natural
    /// size (scale factors of exactly 1.0); larger images are scaled down so
    /// the longer edge equals `cap`.
    ///
    /// Zero-sized sources produce a zero-sized frame with unit scale factors;
    /// the decoder never hands such an image to a session.
    pub fn fit(source_width: u32, source_height: u32, cap: u32) -> Self {
        let (width, height) = calculate_fit_dimensions(source_width, source_height, cap);

        let scale = |source: u32, preview: u32| {
            if preview == 0 {
                1.0
            } else {
                source as f64 / preview as f64
            }
        };

        Self {
            source_width,
            source_height,
            width,
            height,
            scale_x: scale(source_width, width),
            scale_y: scale(source_height, height),
        }
    }

    /// Preview width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Preview height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn source_width(&self) -> u32 {
        self.source_width
    }

    pub fn source_height(&self) -> u32 {
        self.source_height
    }

    /// Horizontal preview-to-source factor (`sx`).
    pub fn scale_x(&self) -> f64 {
        self.scale_x
    }

    /// Vertical preview-to-source factor (`sy`).
    pub fn scale_y(&self) -> f64 {
        self.scale_y
    }

    /// Length of the shorter preview edge; the largest square that fits.
    pub fn short_edge(&self) -> f64 {
        self.width.min(self.height) as f64
    }

    /// Clamp a point onto the preview surface.
    pub fn clamp_point(&self, point: Point) -> Point {
        Point::new(
            point.x.clamp(0.0, self.width as f64),
            point.y.clamp(0.0, self.height as f64),
        )
    }

    /// Convert a point from display space into preview space.
    ///
    /// `display_width`/`display_height` are the on-screen size of the surface.
    /// Non-positive display sizes leave the point untouched.
    pub fn map_display_point(
        &self,
        point: Point,
        display_width: f64,
        display_height: f64,
    ) -> Point {
        let factor = |preview: u32, display: f64| {
            if display > 0.0 {
                preview as f64 / display
            } else {
                1.0
            }
        };
        Point::new(
            point.x * factor(self.width, display_width),
            point.y * factor(self.height, display_height),
        )
    }

    /// Map a preview-space square onto the source image.
    ///
    /// Each axis uses its own factor: `(x·sx, y·sy, size·sx, size·sy)`.
    pub fn to_source(&self, region: &CropRegion) -> SourceRect {
        SourceRect {
            x: region.x() * self.scale_x,
            y: region.y() * self.scale_y,
            width: region.size() * self.scale_x,
            height: region.size() * self.scale_y,
        }
    }
}
