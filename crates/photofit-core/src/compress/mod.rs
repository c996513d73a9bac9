//! Adaptive compression to a byte ceiling.
//!
//! A [`Compressor`] decodes a source once, bounds it to the requested box,
//! then encodes it at `start_quality`, `start_quality - step`, ... down to
//! `min_quality`, stopping at the first encoding that fits. The outcome is a
//! [`CompressionResult`]; presenting failures is left to the caller (see
//! [`crate::notify`]).
//!
//! # Examples
//!
//! ```ignore
//! use photofit_core::compress::{CompressionOptions, CompressionRequest, Compressor};
//! use photofit_core::decode::ImageRef;
//!
//! let request = CompressionRequest::new(
//!     ImageRef::from_path("IMG_0042.jpg"),
//!     CompressionOptions::default(),
//! )?;
//! match Compressor::new().compress(request) {
//!     CompressionResult::Ok { image, final_quality, .. } => upload(image, final_quality),
//!     CompressionResult::Failed { reason, .. } => eprintln!("{}", reason),
//! }
//! ```

mod compressor;
mod options;
mod result;
mod schedule;
#[cfg(feature = "async")]
mod task;
#[cfg(test)]
pub(crate) mod testing;

pub use compressor::{CompressionRequest, Compressor};
pub use options::{
    CompressionOptions, OptionsError, DEFAULT_MAX_DIMENSION, DEFAULT_MAX_SIZE_BYTES,
    DEFAULT_MIN_QUALITY, DEFAULT_QUALITY_STEP, DEFAULT_START_QUALITY,
};
pub use result::{CompressionResult, CompressionSummary, FailureReason};
pub use schedule::QualitySchedule;
#[cfg(feature = "async")]
pub use task::CancelToken;
