//! Input handling for the crop surface.
//!
//! A session picks exactly one [`InteractionStrategy`] when it starts and
//! keeps it until it ends:
//!
//! - **Desktop** ([`DesktopDrag`]): press, drag and release to draw a square.
//!   `Idle → pointer-down → Dragging → pointer-up → Idle`. Touch events follow
//!   the same transitions.
//! - **Mobile** ([`MobileSliderTap`]): a slider sets the size around the
//!   current center and a tap re-centers the square. There is no in-progress
//!   state; every event applies immediately.
//!
//! Strategies only translate events into [`CropRegion`] updates. Redrawing is
//! the session's job: it re-renders whenever [`EventOutcome::region_changed`]
//! is set.

mod desktop;
mod device;
mod mobile;

use crate::config::CropConfig;
use crate::preview::{Point, PreviewFrame};
use crate::region::CropRegion;

pub use desktop::DesktopDrag;
pub use device::{DeviceSignal, InteractionMode};
pub use mobile::{MobileSliderTap, SliderRange};

/// A raw input event, with coordinates already in preview space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerDown(Point),
    PointerMove(Point),
    PointerUp,
    TouchStart(Point),
    TouchMove(Point),
    TouchEnd,
    /// New value of the mobile size slider, in preview pixels.
    SliderInput(f64),
    Tap(Point),
}

/// What handling an event did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EventOutcome {
    /// The region was replaced and the surface must be redrawn.
    pub region_changed: bool,
    /// The page must suppress the browser's default action (scrolling).
    pub prevent_default: bool,
}

impl EventOutcome {
    /// The event did not apply to this strategy or state.
    pub const IGNORED: Self = Self {
        region_changed: false,
        prevent_default: false,
    };

    pub(crate) fn changed() -> Self {
        Self {
            region_changed: true,
            prevent_default: false,
        }
    }

    pub(crate) fn prevent_default(mut self) -> Self {
        self.prevent_default = true;
        self
    }
}

/// The sole mutator of a session's crop region.
pub trait InteractionStrategy: std::fmt::Debug {
    /// Which device mode this strategy implements.
    fn mode(&self) -> InteractionMode;

    /// Apply `event` to `region`.
    fn handle(
        &mut self,
        event: &InputEvent,
        region: &mut CropRegion,
        frame: &PreviewFrame,
    ) -> EventOutcome;

    /// Range for the size slider, if this strategy has one.
    fn slider_range(&self) -> Option<SliderRange> {
        None
    }

    /// Whether a drag is in progress.
    fn is_dragging(&self) -> bool {
        false
    }
}

/// Build the strategy for `mode` together with its initial region.
pub fn strategy_for(
    mode: InteractionMode,
    frame: &PreviewFrame,
    config: &CropConfig,
) -> (Box<dyn InteractionStrategy>, CropRegion) {
    match mode {
        InteractionMode::Desktop => {
            let region = CropRegion::centered(frame, config.desktop_initial_fraction);
            (Box::new(DesktopDrag::new()), region)
        }
        InteractionMode::Mobile => {
            let region = CropRegion::centered(frame, config.mobile_initial_fraction);
            let strategy = MobileSliderTap::new(frame, config.slider_min, region.size());
            (Box::new(strategy), region)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_for_desktop() {
        let frame = PreviewFrame::fit(800, 600, 400);
        let (strategy, region) =
            strategy_for(InteractionMode::Desktop, &frame, &CropConfig::default());

        assert_eq!(strategy.mode(), InteractionMode::Desktop);
        assert!(strategy.slider_range().is_none());
        assert_eq!((region.x(), region.y(), region.size()), (80.0, 30.0, 240.0));
    }

    #[test]
    fn test_strategy_for_mobile() {
        let frame = PreviewFrame::fit(800, 600, 400);
        let (strategy, region) =
            strategy_for(InteractionMode::Mobile, &frame, &CropConfig::default());

        assert_eq!(strategy.mode(), InteractionMode::Mobile);
        assert_eq!(region.size(), 180.0);
        let range = strategy.slider_range().unwrap();
        assert_eq!((range.min, range.max, range.value), (50.0, 300.0, 180.0));
    }

    #[test]
    fn test_outcome_builders() {
        assert_eq!(EventOutcome::default(), EventOutcome::IGNORED);
        let outcome = EventOutcome::changed().prevent_default();
        assert!(outcome.region_changed);
        assert!(outcome.prevent_default);
    }
}
