//! The square crop selection and its geometry rules.
//!
//! A [`CropRegion`] is `(x, y, size)` in preview coordinates and is always a
//! square lying entirely on the preview surface:
//!
//! ```text
//! size >= 0
//! 0 <= x <= preview_width  - size
//! 0 <= y <= preview_height - size
//! ```
//!
//! Every constructor here takes the [`PreviewFrame`] and finishes by clamping
//! `x`/`y` into range, so no operation can produce a region that violates the
//! invariant. Clamping only ever moves the square; it never changes its size.

use serde::Serialize;

use crate::preview::{Point, PreviewFrame};

/// Square selection in preview coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CropRegion {
    x: f64,
    y: f64,
    size: f64,
}

impl CropRegion {
    /// Centered square whose side is `fraction` of the preview's short edge.
    ///
    /// Sessions start with `fraction = 0.8` on desktop and `0.6` on mobile.
    pub fn centered(frame: &PreviewFrame, fraction: f64) -> Self {
        let size = (frame.short_edge() * fraction).clamp(0.0, frame.short_edge());
        let x = (frame.width() as f64 - size) / 2.0;
        let y = (frame.height() as f64 - size) / 2.0;
        Self { x, y, size }.clamped(frame)
    }

    /// Square derived from a drag between `anchor` and `current`.
    ///
    /// Both points are first clamped onto the surface. The drag rectangle's
    /// shorter side becomes the square's size and the square keeps the
    /// rectangle's top-left corner; it is not re-centered on the drag.
    pub fn from_drag(frame: &PreviewFrame, anchor: Point, current: Point) -> Self {
        let a = frame.clamp_point(anchor);
        let b = frame.clamp_point(current);

        let x = a.x.min(b.x);
        let y = a.y.min(b.y);
        let size = (b.x - a.x).abs().min((b.y - a.y).abs());

        Self { x, y, size }.clamped(frame)
    }

    /// Resize to `size` around the current center (mobile slider).
    ///
    /// `size` is limited to `[0, short_edge]`; the caller applies the slider's
    /// own lower bound.
    pub fn resized(&self, frame: &PreviewFrame, size: f64) -> Self {
        let size = size.clamp(0.0, frame.short_edge());
        let center = self.center();
        Self {
            x: center.x - size / 2.0,
            y: center.y - size / 2.0,
            size,
        }
        .clamped(frame)
    }

    /// Center the square on `point` keeping its size (mobile tap).
    pub fn moved_to(&self, frame: &PreviewFrame, point: Point) -> Self {
        Self {
            x: point.x - self.size / 2.0,
            y: point.y - self.size / 2.0,
            size: self.size,
        }
        .clamped(frame)
    }

    /// Pull `x`/`y` back into `[0, dim - size]`.
    fn clamped(self, frame: &PreviewFrame) -> Self {
        Self {
            x: clamp_axis(self.x, self.size, frame.width() as f64),
            y: clamp_axis(self.y, self.size, frame.height() as f64),
            size: self.size,
        }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn size(&self) -> f64 {
        self.size
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.size / 2.0, self.y + self.size / 2.0)
    }

    /// Whether the square lies fully on `frame`.
    pub fn fits(&self, frame: &PreviewFrame) -> bool {
        const EPS: f64 = 1e-9;
        self.size >= 0.0
            && self.x >= 0.0
            && self.y >= 0.0
            && self.x + self.size <= frame.width() as f64 + EPS
            && self.y + self.size <= frame.height() as f64 + EPS
    }
}

#[inline]
fn clamp_axis(value: f64, size: f64, dim: f64) -> f64 {
    value.min(dim - size).max(0.0)
}


// ============================================================================
// Property-Based Tests
// ============================================================================
