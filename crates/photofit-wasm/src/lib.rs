//! Photofit WASM - WebAssembly bindings for Photofit
//!
//! This crate exposes the photofit-core compressor to the JavaScript client
//! that picks and uploads photos.
//!
//! # Module Structure
//!
//! - `compress` - Compression bindings (`compress_image`, `compress_image_notify`)
//! - `types` - WASM-compatible result wrapper
//! - `logger` - Forwards core log records to the browser console
//!
//! # Usage
//!
//! ```typescript
//! import init, { compress_image } from '@photofit/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const result = compress_image(bytes, { maxSizeBytes: 3_000_000 });
//! console.log(result.ok ? `q=${result.finalQuality}` : result.reason);
//! ```

use wasm_bindgen::prelude::*;

mod compress;
mod logger;
mod types;

// Re-export public types
pub use compress::{compress_image, compress_image_notify};
pub use types::JsCompressionResult;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    logger::install(log::LevelFilter::Warn);
}

/// Change console log verbosity (`"off"`, `"error"`, `"warn"`, `"info"`,
/// `"debug"`, `"trace"`).
#[wasm_bindgen]
pub fn set_log_level(level: &str) -> Result<(), JsValue> {
    let filter = logger::parse_level(level)
        .ok_or_else(|| JsValue::from_str(&format!("Unknown log level: {}", level)))?;
    log::set_max_level(filter);
    Ok(())
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
