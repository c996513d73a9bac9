//! Photofit Core - adaptive photo compression for uploads
//!
//! This crate shrinks a user-selected photo until its encoded size fits a
//! byte ceiling, trading JPEG quality for bytes one step at a time and
//! bounding the pixel dimensions on the way.
//!
//! # Modules
//!
//! - `decode` - Source handles, decoding with EXIF orientation, bounding-box resize
//! - `encode` - JPEG encoding and the [`QualityEncoder`] seam
//! - `artifact` - Encoded outputs that clean up their storage when dropped
//! - `compress` - The quality-stepping [`Compressor`] and its request/result types
//! - `notify` - Mapping failures to user-facing notices

pub mod artifact;
pub mod compress;
pub mod decode;
pub mod encode;
pub mod notify;

pub use artifact::{ArtifactError, ArtifactStore, EncodedArtifact};
#[cfg(feature = "async")]
pub use compress::CancelToken;
pub use compress::{
    CompressionOptions, CompressionRequest, CompressionResult, CompressionSummary, Compressor,
    FailureReason, OptionsError,
};
pub use decode::{DecodeError, FilterType, ImageRef};
pub use encode::{EncodeError, JpegQualityEncoder, OutputFormat, QualityEncoder};
pub use notify::{notify_failure, FailureNotice, Notifier};
