//! Running the search off the caller's executor threads.
//!
//! Decoding and each encode step are CPU-bound, so they run on tokio's
//! blocking pool and are awaited one at a time. The search order and the
//! results are identical to [`Compressor::compress`].

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::debug;

use super::compressor::{attempt, failed, prepare, succeeded, unattainable, Attempt};
use super::{CompressionRequest, CompressionResult, Compressor, FailureReason};
use crate::encode::QualityEncoder;

/// Shared flag a caller sets when it no longer wants a result, e.g. when the
/// user navigates away or picks another photo.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

impl<E: QualityEncoder + 'static> Compressor<E> {
    /// Async variant of [`Compressor::compress`].
    ///
    /// `cancel` is checked before decoding and after every step. A step in
    /// flight when the token is set runs to completion, then its output is
    /// dropped (deleting any temporary file) and the call returns
    /// `Failed { reason: Cancelled }`. Dropping the returned future has the
    /// same effect on the step in flight.
    ///
    /// Must be called from within a tokio runtime.
    pub async fn compress_async(
        &self,
        request: CompressionRequest,
        cancel: &CancelToken,
    ) -> CompressionResult {
        let CompressionRequest { source, options } = request;

        if cancel.is_cancelled() {
            return cancelled(0);
        }

        let prepared = tokio::task::spawn_blocking(move || prepare(&source, &options)).await;
        let image = match prepared {
            Ok(Ok(image)) => Arc::new(image),
            Ok(Err(e)) => return failed(FailureReason::DecodeError, 0, e),
            Err(e) => return failed(FailureReason::DecodeError, 0, e),
        };

        let mut attempts = 0;
        for quality in options.schedule() {
            if cancel.is_cancelled() {
                return cancelled(attempts);
            }
            attempts += 1;

            let encoder = Arc::clone(&self.encoder);
            let store = self.store.clone();
            let step_image = Arc::clone(&image);
            let ceiling = options.max_size_bytes;
            let step = tokio::task::spawn_blocking(move || {
                attempt(&*encoder, &store, &step_image, quality, ceiling)
            })
            .await;

            if cancel.is_cancelled() {
                debug!("discarding quality {} step after cancellation", quality);
                drop(step);
                return cancelled(attempts);
            }

            match step {
                Ok(Ok(Attempt::Fits(artifact))) => {
                    return succeeded(artifact, quality, &image, attempts)
                }
                Ok(Ok(Attempt::TooLarge)) => {}
                Ok(Err(e)) => return failed(FailureReason::EncodeError, attempts, e),
                Err(e) => return failed(FailureReason::EncodeError, attempts, e),
            }
        }

        unattainable(attempts, &options)
    }
}

fn cancelled(attempts: u32) -> CompressionResult {
    failed(FailureReason::Cancelled, attempts, "request cancelled by caller")
}
