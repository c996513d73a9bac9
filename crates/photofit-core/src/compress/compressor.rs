//! Quality-stepping search for an encoding under a byte ceiling.

use std::fmt::Display;
use std::sync::Arc;

use log::{debug, info, warn};
use thiserror::Error;

use super::{CompressionOptions, CompressionResult, FailureReason, OptionsError};
use crate::artifact::{ArtifactError, ArtifactStore, EncodedArtifact};
use crate::decode::{decode_source, fit_within, DecodeError, DecodedImage, ImageRef};
use crate::encode::{EncodeError, JpegQualityEncoder, QualityEncoder};

/// A validated request: one source image and the search parameters.
#[derive(Debug, Clone)]
pub struct CompressionRequest {
    pub(crate) source: ImageRef,
    pub(crate) options: CompressionOptions,
}

impl CompressionRequest {
    /// # Errors
    ///
    /// Returns an [`OptionsError`] if the options do not describe a bounded
    /// search (zero ceiling, zero step, empty quality range, ...).
    pub fn new(source: ImageRef, options: CompressionOptions) -> Result<Self, OptionsError> {
        options.validate()?;
        Ok(Self { source, options })
    }

    /// A request with [`CompressionOptions::default`].
    pub fn with_defaults(source: ImageRef) -> Self {
        Self {
            source,
            options: CompressionOptions::default(),
        }
    }

    pub fn source(&self) -> &ImageRef {
        &self.source
    }

    pub fn options(&self) -> &CompressionOptions {
        &self.options
    }
}

/// Re-encodes a source at decreasing quality until it fits the ceiling.
///
/// Every attempt encodes the same bounded copy of the original pixels, so
/// the loss of an attempt depends only on its quality level. The first
/// attempt that fits is returned; rejected encodings are dropped as soon as
/// they are measured.
///
/// A `Compressor` holds no per-request state and can be shared between
/// concurrent requests.
#[derive(Debug)]
pub struct Compressor<E = JpegQualityEncoder> {
    pub(crate) encoder: Arc<E>,
    pub(crate) store: ArtifactStore,
}

impl Compressor<JpegQualityEncoder> {
    pub fn new() -> Self {
        Self::with_encoder(JpegQualityEncoder)
    }
}

impl Default for Compressor<JpegQualityEncoder> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Clone for Compressor<E> {
    fn clone(&self) -> Self {
        Self {
            encoder: Arc::clone(&self.encoder),
            store: self.store.clone(),
        }
    }
}

impl<E: QualityEncoder> Compressor<E> {
    pub fn with_encoder(encoder: E) -> Self {
        Self {
            encoder: Arc::new(encoder),
            store: ArtifactStore::default(),
        }
    }

    /// Keep the returned artifact in `store` instead of memory.
    pub fn with_store(mut self, store: ArtifactStore) -> Self {
        self.store = store;
        self
    }

    pub fn encoder(&self) -> &E {
        &self.encoder
    }

    /// Run the search to a terminal result.
    ///
    /// Never panics on bad input: unreadable sources, encoder errors and
    /// exhausted searches all come back as [`CompressionResult::Failed`].
    pub fn compress(&self, request: CompressionRequest) -> CompressionResult {
        let options = request.options;

        let image = match prepare(&request.source, &options) {
            Ok(image) => image,
            Err(e) => return failed(FailureReason::DecodeError, 0, e),
        };

        let mut attempts = 0;
        for quality in options.schedule() {
            attempts += 1;
            match attempt(&*self.encoder, &self.store, &image, quality, options.max_size_bytes) {
                Ok(Attempt::Fits(artifact)) => return succeeded(artifact, quality, &image, attempts),
                Ok(Attempt::TooLarge) => {}
                Err(e) => return failed(FailureReason::EncodeError, attempts, e),
            }
        }

        unattainable(attempts, &options)
    }
}

/// Outcome of one encode step.
#[derive(Debug)]
pub(crate) enum Attempt {
    Fits(EncodedArtifact),
    TooLarge,
}

#[derive(Debug, Error)]
pub(crate) enum AttemptError {
    #[error(transparent)]
    Encode(#[from] EncodeError),
    #[error(transparent)]
    Store(#[from] ArtifactError),
}

/// Decode the source and bound it to the options' box.
pub(crate) fn prepare(
    source: &ImageRef,
    options: &CompressionOptions,
) -> Result<DecodedImage, DecodeError> {
    let decoded = decode_source(source)?;
    let bounded = fit_within(&decoded, options.max_width, options.max_height, options.filter)?;
    debug!(
        "prepared {}x{} source as {}x{}",
        decoded.width, decoded.height, bounded.width, bounded.height
    );
    Ok(bounded)
}

/// Encode once and keep the output only if it fits under `ceiling`.
pub(crate) fn attempt<E: QualityEncoder + ?Sized>(
    encoder: &E,
    store: &ArtifactStore,
    image: &DecodedImage,
    quality: u8,
    ceiling: u64,
) -> Result<Attempt, AttemptError> {
    let bytes = encoder.encode(image, quality)?;
    let size = bytes.len() as u64;
    debug!("quality {}: {} bytes (ceiling {})", quality, size, ceiling);

    if size > ceiling {
        return Ok(Attempt::TooLarge);
    }
    Ok(Attempt::Fits(store.store(bytes, encoder.format())?))
}

pub(crate) fn succeeded(
    image: EncodedArtifact,
    quality: u8,
    bounded: &DecodedImage,
    attempts: u32,
) -> CompressionResult {
    info!(
        "compressed to {} bytes at quality {} after {} attempt(s)",
        image.len(),
        quality,
        attempts
    );
    CompressionResult::Ok {
        size_bytes: image.len(),
        image,
        final_quality: quality,
        width: bounded.width,
        height: bounded.height,
        attempts,
    }
}

pub(crate) fn failed(reason: FailureReason, attempts: u32, detail: impl Display) -> CompressionResult {
    let detail = detail.to_string();
    warn!("compression failed ({}) after {} attempt(s): {}", reason, attempts, detail);
    CompressionResult::Failed {
        reason,
        attempts,
        detail,
    }
}

pub(crate) fn unattainable(attempts: u32, options: &CompressionOptions) -> CompressionResult {
    failed(
        FailureReason::SizeUnattainable,
        attempts,
        format_args!(
            "no quality between {} and {} fits in {} bytes",
            options.start_quality, options.min_quality, options.max_size_bytes
        ),
    )
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::compress::testing::{sample_jpeg, ScriptedEncoder};
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        /// Property: with size growing in quality, the search returns the
        /// highest scheduled level that fits, visits levels in strictly
        /// decreasing order, and never exceeds the attempt bound.
        #[test]
        fn prop_search_is_monotonic_and_first_fit(
            start in 1u8..=100,
            min in 1u8..=100,
            step in 1u8..=50,
            ceiling in 1u64..=120_000,
        ) {
            prop_assume!(min <= start);
            let options = CompressionOptions {
                max_size_bytes: ceiling,
                start_quality: start,
                quality_step: step,
                min_quality: min,
                ..CompressionOptions::default()
            };
            // 1000 bytes per quality point
            let compressor = Compressor::with_encoder(ScriptedEncoder::linear(1_000));
            let request = CompressionRequest::new(ImageRef::from(sample_jpeg(8, 8)), options).unwrap();

            let result = compressor.compress(request);
            let tried = compressor.encoder().qualities();

            prop_assert!(tried.windows(2).all(|w| w[0] > w[1]));
            prop_assert!(tried.len() as u32 <= options.max_attempts());
            prop_assert_eq!(tried.len() as u32, result.attempts());

            let expected = options.schedule().find(|q| u64::from(*q) * 1_000 <= ceiling);
            prop_assert_eq!(result.final_quality(), expected);
            if expected.is_none() {
                prop_assert_eq!(result.failure_reason(), Some(FailureReason::SizeUnattainable));
                prop_assert_eq!(result.attempts(), options.max_attempts());
            }
        }
    }
}
