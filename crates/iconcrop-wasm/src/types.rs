//! Conversions between JavaScript values and core types.

use iconcrop_core::{CropConfig, Point, PreviewFrame};
use wasm_bindgen::prelude::*;

/// Turn any displayable error into a JS string value.
pub(crate) fn js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Read a config object; `undefined`/`null` means defaults.
///
/// Missing fields take their default values, so `{ output_size: 128 }` style
/// partial objects are accepted.
pub(crate) fn config_from_js(value: JsValue) -> Result<CropConfig, JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok(CropConfig::default());
    }
    serde_wasm_bindgen::from_value(value).map_err(js_error)
}

/// On-screen size of the crop surface element, as reported by the page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct DisplaySize {
    pub width: f64,
    pub height: f64,
}

impl DisplaySize {
    /// Convert an event position relative to the element into preview space.
    ///
    /// Without a display size the page is assumed to draw the surface 1:1.
    pub fn to_preview(display: Option<Self>, frame: &PreviewFrame, x: f64, y: f64) -> Point {
        let point = Point::new(x, y);
        match display {
            Some(size) => frame.map_display_point(point, size.width, size.height),
            None => point,
        }
    }
}
