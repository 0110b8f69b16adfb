//! Tunable parameters for a crop session.
//!
//! Every constant the engine uses lives in [`CropConfig`] so the page (or a
//! test) can override it. The defaults reproduce the avatar editor's behavior:
//! a 400px preview, a 200x200 PNG icon, and a 768px mobile breakpoint.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decode::FilterType;

/// Errors raised by [`CropConfig::validate`].
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("preview_cap must be non-zero")]
    ZeroPreviewCap,

    #[error("output_size must be non-zero")]
    ZeroOutputSize,

    #[error("{field} must be in (0, 1], got {value}")]
    InitialFraction { field: &'static str, value: f64 },

    #[error("{field} must be in [0, 1], got {value}")]
    Alpha { field: &'static str, value: f32 },

    #[error("min_selection_size must be at least 1, got {0}")]
    MinSelectionSize(f64),

    #[error("slider_min must be at least 1, got {0}")]
    SliderMin(f64),

    #[error("JPEG quality must be 1-100, got {0}")]
    JpegQuality(u8),
}

/// Encoding of the exported icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum OutputFormat {
    /// Lossless PNG, keeps transparency.
    #[default]
    Png,
    /// JPEG at the given quality (1-100). Transparency is flattened.
    Jpeg { quality: u8 },
}

impl OutputFormat {
    /// MIME type used in the `data:` URL.
    pub fn mime_type(self) -> &'static str {
        match self {
            OutputFormat::Png => "image/png",
            OutputFormat::Jpeg { .. } => "image/jpeg",
        }
    }
}

/// Crop engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CropConfig {
    /// Longest edge of the preview surface in pixels.
    pub preview_cap: u32,
    /// Edge length of the square output icon in pixels.
    pub output_size: u32,
    /// Initial selection side as a fraction of the preview's short edge (desktop).
    pub desktop_initial_fraction: f64,
    /// Initial selection side as a fraction of the preview's short edge (mobile).
    pub mobile_initial_fraction: f64,
    /// Smallest size the mobile slider offers, in preview pixels.
    pub slider_min: f64,
    /// Viewports at or below this width are treated as mobile.
    pub mobile_breakpoint: u32,
    /// Smallest selection accepted on confirm, in preview pixels. Previews
    /// with a shorter edge lower it to that edge.
    pub min_selection_size: f64,
    /// Opacity of the dark overlay outside the selection.
    pub overlay_alpha: f32,
    /// Selection border thickness in preview pixels.
    pub border_width: u32,
    /// Opacity of the rule-of-thirds guides.
    pub guide_alpha: f32,
    /// Filter used to resample the selection into the output icon.
    pub export_filter: FilterType,
    /// Encoding of the output icon.
    pub output_format: OutputFormat,
}

impl Default for CropConfig {
    fn default() -> Self {
        Self {
            preview_cap: 400,
            output_size: 200,
            desktop_initial_fraction: 0.8,
            mobile_initial_fraction: 0.6,
            slider_min: 50.0,
            mobile_breakpoint: 768,
            min_selection_size: 10.0,
            overlay_alpha: 0.5,
            border_width: 2,
            guide_alpha: 0.5,
            export_filter: FilterType::Bilinear,
            output_format: OutputFormat::Png,
        }
    }
}

impl CropConfig {
    /// Check that every field is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.preview_cap == 0 {
            return Err(ConfigError::ZeroPreviewCap);
        }
        if self.output_size == 0 {
            return Err(ConfigError::ZeroOutputSize);
        }
        for (field, value) in [
            ("desktop_initial_fraction", self.desktop_initial_fraction),
            ("mobile_initial_fraction", self.mobile_initial_fraction),
        ] {
            if !(value > 0.0 && value <= 1.0) {
                return Err(ConfigError::InitialFraction { field, value });
            }
        }
        for (field, value) in [
            ("overlay_alpha", self.overlay_alpha),
            ("guide_alpha", self.guide_alpha),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Alpha { field, value });
            }
        }
        if !(self.min_selection_size >= 1.0) {
            return Err(ConfigError::MinSelectionSize(self.min_selection_size));
        }
        if !(self.slider_min >= 1.0) {
            return Err(ConfigError::SliderMin(self.slider_min));
        }
        if let OutputFormat::Jpeg { quality } = self.output_format {
            if !(1..=100).contains(&quality) {
                return Err(ConfigError::JpegQuality(quality));
            }
        }
        Ok(())
    }
}
