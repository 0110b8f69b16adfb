//! Iconcrop Core - square avatar crop engine
//!
//! This crate turns a user-selected image into a fixed-size square icon:
//! it decodes the file, fits a capped preview, lets the user pick a square
//! by dragging (desktop) or with a slider and taps (touch devices), redraws
//! the preview after every change, and resamples the selection to the output
//! size on confirm.
//!
//! # Module Structure
//!
//! - `decode` - Image decoding with EXIF orientation, resampling helpers
//! - `preview` - Preview fitting and preview/source coordinate mapping
//! - `region` - The square selection and its clamping rules
//! - `interaction` - Desktop drag and mobile slider/tap strategies
//! - `render` - Preview frame rendering (overlay, selection, border, guides)
//! - `export` - Resampling the selection into the encoded output icon
//! - `session` - One crop operation from open to confirm/cancel
//! - `cropper` - Session lifecycle and the icon store hand-off
//!
//! # Usage
//!
//! ```ignore
//! use iconcrop_core::{
//!     CropConfig, Cropper, DeviceSignal, InputEvent, MemoryIconStore, Point, RawImage,
//! };
//!
//! let mut cropper = Cropper::new(MemoryIconStore::new(), CropConfig::default())?;
//! cropper.open(&RawImage::new(bytes, "image/jpeg"), &DeviceSignal::new(Some(1280), None))?;
//! cropper.handle(InputEvent::PointerDown(Point::new(40.0, 40.0)))?;
//! cropper.handle(InputEvent::PointerMove(Point::new(240.0, 200.0)))?;
//! cropper.handle(InputEvent::PointerUp)?;
//! let icon = cropper.confirm()?;
//! ```

pub mod config;
pub mod cropper;
pub mod decode;
pub mod default_icon;
pub mod encode;
pub mod error;
pub mod export;
pub mod icon_store;
pub mod interaction;
pub mod preview;
pub mod region;
pub mod render;
pub mod session;
pub mod transform;

pub use config::{ConfigError, CropConfig, OutputFormat};
pub use cropper::Cropper;
pub use decode::{DecodeError, DecodedImage, FilterType, RawImage};
pub use encode::EncodeError;
pub use error::CropError;
pub use export::{export_region, EncodedIcon};
pub use icon_store::{IconStore, IconStoreError, MemoryIconStore};
pub use interaction::{
    DeviceSignal, EventOutcome, InputEvent, InteractionMode, InteractionStrategy, SliderRange,
};
pub use preview::{Point, PreviewFrame, SourceRect};
pub use region::CropRegion;
pub use render::{render_frame, RenderStyle};
pub use session::CropSession;
