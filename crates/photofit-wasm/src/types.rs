//! WASM-compatible wrapper types for compression results.
//!
//! This module provides JavaScript-friendly types that wrap the core Photofit
//! types, handling the conversion between Rust and JavaScript data
//! representations.

use photofit_core::{CompressionResult, CompressionSummary};
use wasm_bindgen::prelude::*;

/// The outcome of a compression call, as seen from JavaScript.
///
/// On success `ok` is true and `bytes()` returns the encoded image ready for
/// upload. On failure `reason` names the cause (`"decodeError"`,
/// `"encodeError"` or `"sizeUnattainable"`).
///
/// # Memory Management
///
/// The encoded bytes live in WASM memory until `bytes()` copies them out.
/// Call `free()` once the upload has the bytes to release them early.
#[wasm_bindgen]
pub struct JsCompressionResult {
    summary: CompressionSummary,
    bytes: Option<Vec<u8>>,
}

#[wasm_bindgen]
impl JsCompressionResult {
    /// True when an image under the ceiling was produced.
    #[wasm_bindgen(getter)]
    pub fn ok(&self) -> bool {
        matches!(self.summary, CompressionSummary::Ok { .. })
    }

    /// `"ok"` or `"failed"`.
    #[wasm_bindgen(getter)]
    pub fn outcome(&self) -> String {
        if self.ok() { "ok" } else { "failed" }.to_string()
    }

    /// Failure reason in camelCase, or undefined on success.
    #[wasm_bindgen(getter)]
    pub fn reason(&self) -> Option<String> {
        match &self.summary {
            CompressionSummary::Failed { reason, .. } => Some(reason_name(*reason).to_string()),
            CompressionSummary::Ok { .. } => None,
        }
    }

    /// Human-readable failure detail, or undefined on success.
    #[wasm_bindgen(getter)]
    pub fn detail(&self) -> Option<String> {
        match &self.summary {
            CompressionSummary::Failed { detail, .. } => Some(detail.clone()),
            CompressionSummary::Ok { .. } => None,
        }
    }

    #[wasm_bindgen(getter, js_name = finalQuality)]
    pub fn final_quality(&self) -> Option<u8> {
        match &self.summary {
            CompressionSummary::Ok { final_quality, .. } => Some(*final_quality),
            CompressionSummary::Failed { .. } => None,
        }
    }

    /// Encoded size in bytes (a JS number rather than a BigInt).
    #[wasm_bindgen(getter, js_name = sizeBytes)]
    pub fn size_bytes(&self) -> Option<f64> {
        match &self.summary {
            CompressionSummary::Ok { size_bytes, .. } => Some(*size_bytes as f64),
            CompressionSummary::Failed { .. } => None,
        }
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> Option<u32> {
        match &self.summary {
            CompressionSummary::Ok { width, .. } => Some(*width),
            CompressionSummary::Failed { .. } => None,
        }
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> Option<u32> {
        match &self.summary {
            CompressionSummary::Ok { height, .. } => Some(*height),
            CompressionSummary::Failed { .. } => None,
        }
    }

    #[wasm_bindgen(getter, js_name = mimeType)]
    pub fn mime_type(&self) -> Option<String> {
        match &self.summary {
            CompressionSummary::Ok { mime_type, .. } => Some(mime_type.clone()),
            CompressionSummary::Failed { .. } => None,
        }
    }

    /// Number of encode attempts performed.
    #[wasm_bindgen(getter)]
    pub fn attempts(&self) -> u32 {
        match &self.summary {
            CompressionSummary::Ok { attempts, .. } | CompressionSummary::Failed { attempts, .. } => {
                *attempts
            }
        }
    }

    /// Plain-object view of the outcome (without the bytes), e.g. for
    /// posting from a worker or logging.
    #[wasm_bindgen(js_name = toJSON)]
    pub fn to_json(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.summary).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Returns the encoded image as a Uint8Array, or undefined on failure.
    ///
    /// Note: This creates a copy of the bytes.
    pub fn bytes(&self) -> Option<Vec<u8>> {
        self.bytes.clone()
    }

    /// Explicitly free WASM memory.
    ///
    /// This is optional - wasm-bindgen's finalizer will handle cleanup automatically.
    pub fn free(self) {
        // Dropping self releases the memory
    }
}

impl JsCompressionResult {
    /// Build the JS result from a core result, taking its artifact bytes.
    ///
    /// Artifacts in WASM are always memory-backed, so reading them back
    /// cannot hit the filesystem.
    pub(crate) fn from_result(result: CompressionResult) -> Self {
        let summary = result.summary();
        let bytes = result.into_artifact().and_then(|artifact| artifact.into_bytes().ok());
        Self { summary, bytes }
    }
}

fn reason_name(reason: photofit_core::FailureReason) -> &'static str {
    use photofit_core::FailureReason;
    match reason {
        FailureReason::DecodeError => "decodeError",
        FailureReason::EncodeError => "encodeError",
        FailureReason::SizeUnattainable => "sizeUnattainable",
        FailureReason::Cancelled => "cancelled",
    }
}
