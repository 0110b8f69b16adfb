//! Crop controller bindings.
//!
//! # Example
//!
//! ```typescript
//! import { JsCropper } from '@iconcrop/wasm';
//!
//! const store = {
//!   get: () => localStorage.getItem('icon'),
//!   set: (url: string) => localStorage.setItem('icon', url),
//! };
//! const cropper = new JsCropper(store);
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! cropper.open(bytes, file.type, window.innerWidth, navigator.userAgent);
//! canvas.width = cropper.frameWidth();
//! canvas.height = cropper.frameHeight();
//! cropper.setDisplaySize(canvas.clientWidth, canvas.clientHeight);
//!
//! const draw = () => ctx.putImageData(
//!   new ImageData(cropper.framePixels(), cropper.frameWidth(), cropper.frameHeight()), 0, 0);
//! canvas.onmousemove = (e) => { if (cropper.pointerMove(e.offsetX, e.offsetY)) draw(); };
//! // ...
//! avatar.src = cropper.confirm();
//! ```

use iconcrop_core::{
    CropConfig, CropError, Cropper, DeviceSignal, EncodedIcon, EventOutcome, IconStore,
    InputEvent, Point, RawImage,
};
use wasm_bindgen::prelude::*;

use crate::store::{IconStoreHandle, JsIconStore};
use crate::types::{config_from_js, js_error, DisplaySize};

/// Cropper state shared by the JS wrapper and native tests.
#[derive(Debug)]
pub(crate) struct CropperBridge<S: IconStore> {
    cropper: Cropper<S>,
    display: Option<DisplaySize>,
    /// Icon produced by a confirm whose store write failed.
    pending: Option<EncodedIcon>,
}

impl<S: IconStore> CropperBridge<S> {
    pub fn new(
        store: S,
        config: CropConfig,
        default_image: Option<&[u8]>,
    ) -> Result<Self, CropError> {
        Ok(Self {
            cropper: Cropper::with_default_image(store, config, default_image)?,
            display: None,
            pending: None,
        })
    }

    pub fn open(
        &mut self,
        bytes: Vec<u8>,
        mime_type: String,
        viewport_width: Option<u32>,
        user_agent: Option<String>,
    ) -> Result<(), CropError> {
        let raw = RawImage::new(bytes, mime_type);
        let signal = DeviceSignal::new(viewport_width, user_agent);
        self.cropper.open(&raw, &signal)?;
        self.display = None;
        Ok(())
    }

    pub fn set_display_size(&mut self, width: f64, height: f64) {
        self.display = Some(DisplaySize { width, height });
    }

    fn point(&self, x: f64, y: f64) -> Point {
        match self.cropper.session() {
            Some(session) => DisplaySize::to_preview(self.display, session.frame(), x, y),
            None => Point::new(x, y),
        }
    }

    /// Handle a positional event given in display coordinates.
    pub fn pointer_event(
        &mut self,
        make: fn(Point) -> InputEvent,
        x: f64,
        y: f64,
    ) -> Result<EventOutcome, CropError> {
        let point = self.point(x, y);
        self.cropper.handle(make(point))
    }

    pub fn event(&mut self, event: InputEvent) -> Result<EventOutcome, CropError> {
        self.cropper.handle(event)
    }

    pub fn confirm(&mut self) -> Result<String, CropError> {
        match self.cropper.confirm() {
            Ok(icon) => {
                self.pending = None;
                Ok(icon.into_data_url())
            }
            Err(CropError::StoreWrite { icon, source }) => {
                self.pending = Some(icon.clone());
                Err(CropError::StoreWrite { icon, source })
            }
            Err(e) => Err(e),
        }
    }

    /// Write the pending icon again. `Ok(None)` when nothing is pending.
    pub fn retry_store(&mut self) -> Result<Option<String>, CropError> {
        let Some(icon) = self.pending.take() else {
            return Ok(None);
        };
        let url = icon.as_data_url().to_string();
        match self.cropper.adopt_icon(icon) {
            Ok(()) => Ok(Some(url)),
            Err(CropError::StoreWrite { icon, source }) => {
                self.pending = Some(icon.clone());
                Err(CropError::StoreWrite { icon, source })
            }
            Err(e) => Err(e),
        }
    }

    pub fn cropper(&self) -> &Cropper<S> {
        &self.cropper
    }

    pub fn cancel(&mut self) -> bool {
        self.display = None;
        self.cropper.cancel()
    }

    pub fn current_icon(&self) -> Option<String> {
        self.cropper.current_icon().map(EncodedIcon::into_data_url)
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }
}

/// Square avatar cropper for a `<canvas>`-based page.
///
/// All coordinates are relative to the surface element's top-left corner.
/// When the page draws the surface at a different CSS size than
/// `frameWidth() x frameHeight()`, call `setDisplaySize` so positions are
/// rescaled.
#[wasm_bindgen]
pub struct JsCropper {
    inner: CropperBridge<JsIconStore>,
}

#[wasm_bindgen]
impl JsCropper {
    /// Create a cropper over the page's icon store.
    ///
    /// # Arguments
    ///
    /// * `store` - Object with `get()` and `set(dataUrl)`
    /// * `config` - Optional partial config object (snake_case fields)
    /// * `default_image` - Optional bytes of the page's default avatar, used
    ///   when the store is empty
    #[wasm_bindgen(constructor)]
    pub fn new(
        store: IconStoreHandle,
        config: JsValue,
        default_image: Option<Vec<u8>>,
    ) -> Result<JsCropper, JsValue> {
        let config = config_from_js(config)?;
        let inner = CropperBridge::new(JsIconStore::new(store), config, default_image.as_deref())
            .map_err(js_error)?;
        Ok(Self { inner })
    }

    /// Decode a selected file and start a crop session on it.
    ///
    /// Replaces any open session. On error the previous session (if any)
    /// is left as it was.
    pub fn open(
        &mut self,
        bytes: Vec<u8>,
        mime_type: String,
        viewport_width: Option<u32>,
        user_agent: Option<String>,
    ) -> Result<(), JsValue> {
        self.inner
            .open(bytes, mime_type, viewport_width, user_agent)
            .map_err(js_error)
    }

    /// Report the on-screen size of the surface element.
    #[wasm_bindgen(js_name = setDisplaySize)]
    pub fn set_display_size(&mut self, width: f64, height: f64) {
        self.inner.set_display_size(width, height);
    }

    #[wasm_bindgen(js_name = pointerDown)]
    pub fn pointer_down(&mut self, x: f64, y: f64) -> Result<bool, JsValue> {
        changed(self.inner.pointer_event(InputEvent::PointerDown, x, y))
    }

    #[wasm_bindgen(js_name = pointerMove)]
    pub fn pointer_move(&mut self, x: f64, y: f64) -> Result<bool, JsValue> {
        changed(self.inner.pointer_event(InputEvent::PointerMove, x, y))
    }

    #[wasm_bindgen(js_name = pointerUp)]
    pub fn pointer_up(&mut self) -> Result<bool, JsValue> {
        changed(self.inner.event(InputEvent::PointerUp))
    }

    /// Returns `true` when the page must call `preventDefault()`.
    #[wasm_bindgen(js_name = touchStart)]
    pub fn touch_start(&mut self, x: f64, y: f64) -> Result<bool, JsValue> {
        prevent(self.inner.pointer_event(InputEvent::TouchStart, x, y))
    }

    /// Returns `true` when the page must call `preventDefault()`.
    #[wasm_bindgen(js_name = touchMove)]
    pub fn touch_move(&mut self, x: f64, y: f64) -> Result<bool, JsValue> {
        prevent(self.inner.pointer_event(InputEvent::TouchMove, x, y))
    }

    #[wasm_bindgen(js_name = touchEnd)]
    pub fn touch_end(&mut self) -> Result<bool, JsValue> {
        prevent(self.inner.event(InputEvent::TouchEnd))
    }

    /// New slider value, in preview pixels.
    #[wasm_bindgen(js_name = sliderInput)]
    pub fn slider_input(&mut self, value: f64) -> Result<bool, JsValue> {
        changed(self.inner.event(InputEvent::SliderInput(value)))
    }

    pub fn tap(&mut self, x: f64, y: f64) -> Result<bool, JsValue> {
        changed(self.inner.pointer_event(InputEvent::Tap, x, y))
    }

    /// Current region as `{ x, y, size }` in preview pixels.
    pub fn region(&self) -> Result<JsValue, JsValue> {
        let session = self.inner.cropper().session().ok_or_else(|| js_error(CropError::NoSession))?;
        serde_wasm_bindgen::to_value(&session.region()).map_err(js_error)
    }

    /// Slider bounds `{ min, max, step, value }`, or `undefined` outside
    /// mobile mode.
    #[wasm_bindgen(js_name = sliderRange)]
    pub fn slider_range(&self) -> Result<JsValue, JsValue> {
        let range = self.inner.cropper().session().and_then(|s| s.slider_range());
        serde_wasm_bindgen::to_value(&range).map_err(js_error)
    }

    /// `"desktop"`, `"mobile"`, or `undefined` with no session.
    pub fn mode(&self) -> Option<String> {
        self.inner
            .cropper()
            .session()
            .map(|s| s.mode().as_str().to_string())
    }

    #[wasm_bindgen(js_name = frameWidth)]
    pub fn frame_width(&self) -> u32 {
        self.inner.cropper().session().map_or(0, |s| s.frame().width())
    }

    #[wasm_bindgen(js_name = frameHeight)]
    pub fn frame_height(&self) -> u32 {
        self.inner.cropper().session().map_or(0, |s| s.frame().height())
    }

    /// RGBA pixels of the last rendered frame, ready for `new ImageData(...)`.
    ///
    /// Note: this copies the frame into JS memory on every call.
    #[wasm_bindgen(js_name = framePixels)]
    pub fn frame_pixels(&self) -> Option<js_sys::Uint8ClampedArray> {
        self.inner
            .cropper()
            .session()
            .map(|s| js_sys::Uint8ClampedArray::from(s.canvas().as_raw().as_slice()))
    }

    /// Finish the crop. Returns the new icon as a `data:` URL.
    ///
    /// If the store throws, the session is still closed and the icon is kept;
    /// call `retryStore()` to write it again.
    pub fn confirm(&mut self) -> Result<String, JsValue> {
        self.inner.confirm().map_err(js_error)
    }

    /// Write the icon from a failed `confirm()` again. Returns its `data:`
    /// URL, or `undefined` when there is nothing to retry.
    #[wasm_bindgen(js_name = retryStore)]
    pub fn retry_store(&mut self) -> Result<Option<String>, JsValue> {
        self.inner.retry_store().map_err(js_error)
    }

    #[wasm_bindgen(js_name = hasPendingIcon)]
    pub fn has_pending_icon(&self) -> bool {
        self.inner.has_pending()
    }

    /// Discard the open session without touching the store.
    pub fn cancel(&mut self) -> bool {
        self.inner.cancel()
    }

    #[wasm_bindgen(js_name = isOpen)]
    pub fn is_open(&self) -> bool {
        self.inner.cropper().is_open()
    }

    #[wasm_bindgen(js_name = currentIcon)]
    pub fn current_icon(&self) -> Option<String> {
        self.inner.current_icon()
    }
}

fn changed(outcome: Result<EventOutcome, CropError>) -> Result<bool, JsValue> {
    outcome.map(|o| o.region_changed).map_err(js_error)
}

fn prevent(outcome: Result<EventOutcome, CropError>) -> Result<bool, JsValue> {
    outcome.map(|o| o.prevent_default).map_err(js_error)
}
