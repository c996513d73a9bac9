//! Terminal outcomes of a compression request.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::artifact::EncodedArtifact;

/// Why a request ended without an artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FailureReason {
    /// The source could not be read or decoded. Retrying the same source
    /// will not help.
    DecodeError,
    /// An encode step (or storing its output) failed. The whole request may
    /// be retried.
    EncodeError,
    /// Every quality level in range was over the ceiling.
    SizeUnattainable,
    /// The caller cancelled the request.
    Cancelled,
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FailureReason::DecodeError => "decode error",
            FailureReason::EncodeError => "encode error",
            FailureReason::SizeUnattainable => "size unattainable",
            FailureReason::Cancelled => "cancelled",
        };
        f.write_str(name)
    }
}

/// Result of [`Compressor::compress`](super::Compressor::compress).
#[derive(Debug)]
pub enum CompressionResult {
    /// The first (highest) quality level that met the ceiling.
    Ok {
        image: EncodedArtifact,
        final_quality: u8,
        size_bytes: u64,
        width: u32,
        height: u32,
        /// Encode attempts performed, including the successful one.
        attempts: u32,
    },
    Failed {
        reason: FailureReason,
        /// Encode attempts performed before giving up.
        attempts: u32,
        /// Human-readable cause from the underlying error.
        detail: String,
    },
}

impl CompressionResult {
    pub fn is_ok(&self) -> bool {
        matches!(self, CompressionResult::Ok { .. })
    }

    pub fn attempts(&self) -> u32 {
        match self {
            CompressionResult::Ok { attempts, .. } | CompressionResult::Failed { attempts, .. } => {
                *attempts
            }
        }
    }

    pub fn failure_reason(&self) -> Option<FailureReason> {
        match self {
            CompressionResult::Ok { .. } => None,
            CompressionResult::Failed { reason, .. } => Some(*reason),
        }
    }

    pub fn final_quality(&self) -> Option<u8> {
        match self {
            CompressionResult::Ok { final_quality, .. } => Some(*final_quality),
            CompressionResult::Failed { .. } => None,
        }
    }

    /// Take the artifact out of a successful result.
    pub fn into_artifact(self) -> Option<EncodedArtifact> {
        match self {
            CompressionResult::Ok { image, .. } => Some(image),
            CompressionResult::Failed { .. } => None,
        }
    }

    /// A serializable view of the outcome without the artifact itself.
    pub fn summary(&self) -> CompressionSummary {
        match self {
            CompressionResult::Ok {
                image,
                final_quality,
                size_bytes,
                width,
                height,
                attempts,
            } => CompressionSummary::Ok {
                final_quality: *final_quality,
                size_bytes: *size_bytes,
                width: *width,
                height: *height,
                attempts: *attempts,
                mime_type: image.format().mime_type().to_string(),
            },
            CompressionResult::Failed {
                reason,
                attempts,
                detail,
            } => CompressionSummary::Failed {
                reason: *reason,
                attempts: *attempts,
                detail: detail.clone(),
            },
        }
    }
}

/// Outcome tagged as `{"outcome": "ok" | "failed", ...}` for reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum CompressionSummary {
    #[serde(rename_all = "camelCase")]
    Ok {
        final_quality: u8,
        size_bytes: u64,
        width: u32,
        height: u32,
        attempts: u32,
        mime_type: String,
    },
    #[serde(rename_all = "camelCase")]
    Failed {
        reason: FailureReason,
        attempts: u32,
        detail: String,
    },
}
