//! Compression WASM bindings.
//!
//! This module exposes the photofit-core compressor to JavaScript so the
//! client can shrink a picked photo before handing it to the upload call.
//!
//! # Functions
//!
//! - [`compress_image`] - Compress image bytes under a size ceiling
//! - [`compress_image_notify`] - Same, reporting failure through a JS callback
//!
//! # Example
//!
//! ```typescript
//! import { compress_image_notify } from '@photofit/wasm';
//!
//! const bytes = new Uint8Array(await picked.arrayBuffer());
//! const result = compress_image_notify(
//!   bytes,
//!   { maxSizeBytes: 3_000_000, minQuality: 30 },
//!   (title, description) => toast.show({ title, description }),
//! );
//! if (result.ok) {
//!   await upload(new Blob([result.bytes()], { type: result.mimeType }));
//! }
//! ```

use photofit_core::{
    notify_failure, CompressionOptions, CompressionRequest, Compressor, ImageRef, Notifier,
    OptionsError,
};
use wasm_bindgen::prelude::*;

use crate::types::JsCompressionResult;

/// Compress image bytes until the encoded JPEG fits the ceiling.
///
/// # Arguments
///
/// * `bytes` - The picked image (JPEG or PNG) as a `Uint8Array`
/// * `options` - Partial options object (`maxSizeBytes`, `maxWidth`,
///   `maxHeight`, `startQuality`, `qualityStep`, `minQuality`, `filter`);
///   pass `undefined` for the defaults
///
/// # Returns
///
/// A `JsCompressionResult`. Decode failures, encoder failures and
/// unattainable ceilings are reported through the result, not thrown.
///
/// # Errors
///
/// Throws only if `options` is malformed or describes an empty search.
#[wasm_bindgen]
pub fn compress_image(bytes: Vec<u8>, options: JsValue) -> Result<JsCompressionResult, JsValue> {
    let options = parse_options(options)?;
    run(bytes, options).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Like [`compress_image`], and calls `notify(title, description)` exactly
/// once if the result is a failure.
#[wasm_bindgen]
pub fn compress_image_notify(
    bytes: Vec<u8>,
    options: JsValue,
    notify: &js_sys::Function,
) -> Result<JsCompressionResult, JsValue> {
    let options = parse_options(options)?;
    let notifier = JsNotifier(notify);
    run_notify(bytes, options, &notifier).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn parse_options(options: JsValue) -> Result<CompressionOptions, JsValue> {
    if options.is_undefined() || options.is_null() {
        return Ok(CompressionOptions::default());
    }
    serde_wasm_bindgen::from_value(options).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn run(bytes: Vec<u8>, options: CompressionOptions) -> Result<JsCompressionResult, OptionsError> {
    let request = CompressionRequest::new(ImageRef::from(bytes), options)?;
    Ok(JsCompressionResult::from_result(
        Compressor::new().compress(request),
    ))
}

fn run_notify<N: Notifier + ?Sized>(
    bytes: Vec<u8>,
    options: CompressionOptions,
    notifier: &N,
) -> Result<JsCompressionResult, OptionsError> {
    let request = CompressionRequest::new(ImageRef::from(bytes), options)?;
    let result = Compressor::new().compress(request);
    notify_failure(&result, notifier);
    Ok(JsCompressionResult::from_result(result))
}

/// Forwards notices to a JS function.
struct JsNotifier<'a>(&'a js_sys::Function);

impl Notifier for JsNotifier<'_> {
    fn notify(&self, title: &str, description: &str) {
        let result = self
            .0
            .call2(&JsValue::NULL, &JsValue::from_str(title), &JsValue::from_str(description));
        if let Err(e) = result {
            log::warn!("notify callback threw: {:?}", e);
        }
    }
}


/// WASM-specific tests that require JsValue.
///
/// Use `wasm-pack test` to run these.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn gray_jpeg() -> Vec<u8> {
        photofit_core::encode::encode_jpeg(&vec![128u8; 32 * 32 * 3], 32, 32, 90).unwrap()
    }

    #[wasm_bindgen_test]
    fn test_compress_image_defaults() {
        let result = compress_image(gray_jpeg(), JsValue::UNDEFINED).unwrap();
        assert!(result.ok());
    }

    #[wasm_bindgen_test]
    fn test_compress_image_partial_options() {
        let options = js_sys::Object::new();
        js_sys::Reflect::set(&options, &"maxWidth".into(), &JsValue::from_f64(16.0)).unwrap();

        let result = compress_image(gray_jpeg(), options.into()).unwrap();
        assert_eq!(result.width(), Some(16));
    }

    #[wasm_bindgen_test]
    fn test_compress_image_invalid_options_throws() {
        let options = js_sys::Object::new();
        js_sys::Reflect::set(&options, &"qualityStep".into(), &JsValue::from_f64(0.0)).unwrap();

        assert!(compress_image(gray_jpeg(), options.into()).is_err());
    }

    #[wasm_bindgen_test]
    fn test_compress_image_notify_calls_back() {
        let calls = js_sys::Array::new();
        let sink = calls.clone();
        let callback = Closure::<dyn Fn(String, String)>::new(move |title: String, _: String| {
            sink.push(&JsValue::from_str(&title));
        });

        let result = compress_image_notify(
            vec![0u8; 8],
            JsValue::UNDEFINED,
            callback.as_ref().unchecked_ref(),
        )
        .unwrap();

        assert!(!result.ok());
        assert_eq!(calls.length(), 1);
    }
}
