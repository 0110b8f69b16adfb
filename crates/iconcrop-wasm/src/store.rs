//! Icon store backed by a JavaScript object.
//!
//! The page passes any object shaped like
//!
//! ```typescript
//! interface IconStore {
//!   get(): string | null | undefined;   // current icon as a data: URL
//!   set(dataUrl: string): void;         // may throw
//! }
//! ```
//!
//! e.g. a thin wrapper around `localStorage` or an `<img>` element's `src`.

use iconcrop_core::{EncodedIcon, IconStore, IconStoreError};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    /// The page's icon store object.
    #[wasm_bindgen(typescript_type = "IconStore")]
    pub type IconStoreHandle;

    #[wasm_bindgen(method, catch, js_name = get)]
    fn get_icon(this: &IconStoreHandle) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(method, catch, js_name = set)]
    fn set_icon(this: &IconStoreHandle, data_url: &str) -> Result<(), JsValue>;
}

/// [`IconStore`] over an [`IconStoreHandle`].
pub(crate) struct JsIconStore {
    handle: IconStoreHandle,
}

impl JsIconStore {
    pub fn new(handle: IconStoreHandle) -> Self {
        Self { handle }
    }
}

impl std::fmt::Debug for JsIconStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsIconStore").finish_non_exhaustive()
    }
}

impl IconStore for JsIconStore {
    fn get(&self) -> Option<EncodedIcon> {
        let value = match self.handle.get_icon() {
            Ok(value) => value,
            Err(e) => {
                log::warn!("icon store get() threw: {}", describe(&e));
                return None;
            }
        };
        let url = value.as_string()?;
        EncodedIcon::from_data_url(url)
            .inspect_err(|e| log::warn!("ignoring stored icon: {}", e))
            .ok()
    }

    fn set(&mut self, icon: &EncodedIcon) -> Result<(), IconStoreError> {
        self.handle
            .set_icon(icon.as_data_url())
            .map_err(|e| IconStoreError::WriteFailed(describe(&e)))
    }
}

/// Best-effort text for a thrown JS value.
fn describe(value: &JsValue) -> String {
    if let Some(text) = value.as_string() {
        return text;
    }
    match value.dyn_ref::<js_sys::Error>() {
        Some(error) => String::from(error.message()),
        None => format!("{:?}", value),
    }
}
