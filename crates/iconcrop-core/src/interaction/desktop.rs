//! Pointer-drag selection for desktop browsers.

use super::{EventOutcome, InputEvent, InteractionMode, InteractionStrategy};
use crate::preview::{Point, PreviewFrame};
use crate::region::CropRegion;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
enum DragState {
    #[default]
    Idle,
    Dragging {
        anchor: Point,
    },
}

/// Draw a square by dragging from one corner to the other.
///
/// Pointer-down records the anchor and leaves the current region alone, so a
/// click without a move keeps the previous selection. Each move while
/// dragging squares the anchor/pointer rectangle on its shorter side,
/// anchored at the rectangle's top-left corner. Pointer-up ends the drag and
/// leaves the last region in place.
#[derive(Debug, Default)]
pub struct DesktopDrag {
    state: DragState,
}

impl DesktopDrag {
    pub fn new() -> Self {
        Self::default()
    }

    fn begin(&mut self, point: Point, frame: &PreviewFrame) -> EventOutcome {
        let anchor = frame.clamp_point(point);
        self.state = DragState::Dragging { anchor };
        log::debug!("drag started at ({:.1}, {:.1})", anchor.x, anchor.y);
        EventOutcome::IGNORED
    }

    fn update(
        &mut self,
        point: Point,
        region: &mut CropRegion,
        frame: &PreviewFrame,
    ) -> EventOutcome {
        match self.state {
            DragState::Dragging { anchor } => {
                *region = CropRegion::from_drag(frame, anchor, point);
                EventOutcome::changed()
            }
            DragState::Idle => EventOutcome::IGNORED,
        }
    }

    fn end(&mut self) -> EventOutcome {
        if let DragState::Dragging { .. } = self.state {
            log::debug!("drag ended");
        }
        self.state = DragState::Idle;
        EventOutcome::IGNORED
    }
}

impl InteractionStrategy for DesktopDrag {
    fn mode(&self) -> InteractionMode {
        InteractionMode::Desktop
    }

    fn handle(
        &mut self,
        event: &InputEvent,
        region: &mut CropRegion,
        frame: &PreviewFrame,
    ) -> EventOutcome {
        match *event {
            InputEvent::PointerDown(point) => self.begin(point, frame),
            InputEvent::PointerMove(point) => self.update(point, region, frame),
            InputEvent::PointerUp => self.end(),
            // Touch drives the same machine; the page must not scroll while
            // the finger is drawing the selection.
            InputEvent::TouchStart(point) => self.begin(point, frame).prevent_default(),
            InputEvent::TouchMove(point) => {
                let outcome = self.update(point, region, frame);
                if outcome.region_changed {
                    outcome.prevent_default()
                } else {
                    outcome
                }
            }
            InputEvent::TouchEnd => self.end(),
            InputEvent::SliderInput(_) | InputEvent::Tap(_) => EventOutcome::IGNORED,
        }
    }

    fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }
}
