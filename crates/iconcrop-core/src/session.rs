//! One crop operation, from a decoded image to confirm or cancel.
//!
//! A [`CropSession`] owns everything that lives for the duration of a crop:
//! the source pixels, the preview geometry, the current region, the
//! interaction strategy chosen at start, and the last rendered frame. The
//! strategy is the only thing that mutates the region; the session redraws
//! the full frame after every change.

use std::fmt;

use image::RgbaImage;

use crate::config::CropConfig;
use crate::decode::DecodedImage;
use crate::error::CropError;
use crate::export::{export_region, EncodedIcon};
use crate::interaction::{
    strategy_for, DeviceSignal, EventOutcome, InputEvent, InteractionMode, InteractionStrategy,
    SliderRange,
};
use crate::preview::PreviewFrame;
use crate::region::CropRegion;
use crate::render::{preview_base, render_frame, RenderStyle};

pub struct CropSession {
    source: DecodedImage,
    frame: PreviewFrame,
    base: RgbaImage,
    region: CropRegion,
    strategy: Box<dyn InteractionStrategy>,
    style: RenderStyle,
    config: CropConfig,
    canvas: RgbaImage,
    redraws: u64,
}

impl CropSession {
    /// Start a session on an already decoded image.
    ///
    /// The device is classified once here; the resulting mode holds until the
    /// session ends.
    pub fn start(
        source: DecodedImage,
        signal: &DeviceSignal,
        config: CropConfig,
    ) -> Result<Self, CropError> {
        let mode = InteractionMode::detect(signal, config.mobile_breakpoint);
        log::debug!("device classified as {} ({:?})", mode.as_str(), signal);
        Self::with_mode(source, mode, config)
    }

    /// Start a session with an explicit interaction mode.
    pub fn with_mode(
        source: DecodedImage,
        mode: InteractionMode,
        config: CropConfig,
    ) -> Result<Self, CropError> {
        config.validate()?;
        if source.is_empty() {
            return Err(crate::decode::DecodeError::EmptyImage.into());
        }

        let frame = PreviewFrame::fit(source.width, source.height, config.preview_cap);
        let base = preview_base(&source, &frame)?;
        let (strategy, region) = strategy_for(mode, &frame, &config);
        let style = RenderStyle::from_config(&config);
        let canvas = render_frame(&base, &region, &style);

        log::debug!(
            "session started: {}x{} source, {}x{} preview, region ({:.1}, {:.1}, {:.1})",
            frame.source_width(),
            frame.source_height(),
            frame.width(),
            frame.height(),
            region.x(),
            region.y(),
            region.size()
        );

        Ok(Self {
            source,
            frame,
            base,
            region,
            strategy,
            style,
            config,
            canvas,
            redraws: 1,
        })
    }

    /// Route an input event to the strategy, redrawing if the region changed.
    pub fn handle(&mut self, event: InputEvent) -> EventOutcome {
        let outcome = self.strategy.handle(&event, &mut self.region, &self.frame);
        if outcome.region_changed {
            self.redraw();
        }
        outcome
    }

    fn redraw(&mut self) {
        self.canvas = render_frame(&self.base, &self.region, &self.style);
        self.redraws += 1;
    }

    /// Resample the current selection into the output icon.
    ///
    /// Leaves the session untouched; ending it is the caller's decision.
    pub fn export(&self) -> Result<EncodedIcon, CropError> {
        export_region(&self.source, &self.frame, &self.region, &self.config)
    }

    pub fn region(&self) -> CropRegion {
        self.region
    }

    pub fn frame(&self) -> &PreviewFrame {
        &self.frame
    }

    pub fn mode(&self) -> InteractionMode {
        self.strategy.mode()
    }

    pub fn slider_range(&self) -> Option<SliderRange> {
        self.strategy.slider_range()
    }

    pub fn is_dragging(&self) -> bool {
        self.strategy.is_dragging()
    }

    /// The last rendered frame, at preview size.
    pub fn canvas(&self) -> &RgbaImage {
        &self.canvas
    }

    /// How many frames have been rendered, the first one included.
    pub fn redraw_count(&self) -> u64 {
        self.redraws
    }

    pub fn config(&self) -> &CropConfig {
        &self.config
    }
}

impl fmt::Debug for CropSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CropSession")
            .field("frame", &self.frame)
            .field("region", &self.region)
            .field("strategy", &self.strategy)
            .field("redraws", &self.redraws)
            .finish_non_exhaustive()
    }
}
