//! Iconcrop WASM - WebAssembly bindings for the avatar crop engine
//!
//! This crate exposes iconcrop-core to a browser page as a stateful
//! [`JsCropper`]: the page feeds it the selected file and raw input events,
//! paints the frames it renders, and gets the final icon back as a `data:`
//! URL.
//!
//! # Module Structure
//!
//! - `cropper` - The `JsCropper` class
//! - `store` - Icon store backed by a JS object with `get`/`set`
//! - `logger` - `log` output to the browser console
//! - `types` - Config and coordinate conversions
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsCropper, setLogLevel } from '@iconcrop/wasm';
//!
//! await init();
//! setLogLevel('debug');
//! const cropper = new JsCropper(store, { output_size: 256 });
//! ```

use wasm_bindgen::prelude::*;

mod cropper;
mod logger;
mod store;
mod types;

pub use cropper::JsCropper;
pub use logger::set_log_level;
pub use store::IconStoreHandle;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    logger::install(log::LevelFilter::Info);
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
