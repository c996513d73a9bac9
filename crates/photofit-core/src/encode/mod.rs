//! Image encoding for the upload artifact.
//!
//! This module provides functionality for:
//! - Encoding RGB images to JPEG with configurable quality
//! - The [`QualityEncoder`] trait the compressor drives, so the search can
//!   be exercised with alternate codecs or scripted encoders
//!
//! # Examples
//!
//! ```ignore
//! use photofit_core::encode::encode_jpeg;
//!
//! let pixels = vec![128u8; 100 * 100 * 3]; // Gray image
//! let jpeg_bytes = encode_jpeg(&pixels, 100, 100, 90)?;
//! println!("Encoded {} bytes", jpeg_bytes.len());
//! ```

mod jpeg;
mod quality;

pub use jpeg::{encode_image_jpeg, encode_jpeg, EncodeError};
pub use quality::{JpegQualityEncoder, OutputFormat, QualityEncoder};
