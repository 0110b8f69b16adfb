//! Slider-and-tap selection for touch devices.

use serde::Serialize;

use super::{EventOutcome, InputEvent, InteractionMode, InteractionStrategy};
use crate::preview::PreviewFrame;
use crate::region::CropRegion;

/// Bounds and current value of the size slider, in preview pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SliderRange {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub value: f64,
}

/// Resize with a slider, reposition with a tap.
///
/// Dragging on a phone fights with page scrolling, so this strategy has no
/// drag state at all: slider input resizes around the current center and a
/// tap centers the square on the tapped point. Pointer and touch events are
/// left to the browser.
#[derive(Debug, Clone)]
pub struct MobileSliderTap {
    range: SliderRange,
}

impl MobileSliderTap {
    /// Slider spans `[slider_min, short_edge]`; on previews smaller than
    /// `slider_min` the lower bound drops to the short edge.
    pub fn new(frame: &PreviewFrame, slider_min: f64, initial: f64) -> Self {
        let max = frame.short_edge();
        let min = slider_min.min(max);
        Self {
            range: SliderRange {
                min,
                max,
                step: 1.0,
                value: initial,
            },
        }
    }
}

impl InteractionStrategy for MobileSliderTap {
    fn mode(&self) -> InteractionMode {
        InteractionMode::Mobile
    }

    fn handle(
        &mut self,
        event: &InputEvent,
        region: &mut CropRegion,
        frame: &PreviewFrame,
    ) -> EventOutcome {
        match *event {
            InputEvent::SliderInput(value) => {
                if !value.is_finite() {
                    log::warn!("ignoring non-finite slider value");
                    return EventOutcome::IGNORED;
                }
                let size = value.clamp(self.range.min, self.range.max);
                *region = region.resized(frame, size);
                self.range.value = region.size();
                EventOutcome::changed()
            }
            InputEvent::Tap(point) => {
                *region = region.moved_to(frame, point);
                EventOutcome::changed()
            }
            InputEvent::PointerDown(_)
            | InputEvent::PointerMove(_)
            | InputEvent::PointerUp
            | InputEvent::TouchStart(_)
            | InputEvent::TouchMove(_)
            | InputEvent::TouchEnd => EventOutcome::IGNORED,
        }
    }

    fn slider_range(&self) -> Option<SliderRange> {
        Some(self.range)
    }
}
