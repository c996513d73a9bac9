//! Tuning parameters for a compression request.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::QualitySchedule;
use crate::decode::FilterType;

/// Default upload ceiling: 3 MB.
pub const DEFAULT_MAX_SIZE_BYTES: u64 = 3_000_000;
/// Default bounding box side.
pub const DEFAULT_MAX_DIMENSION: u32 = 1920;
pub const DEFAULT_START_QUALITY: u8 = 100;
pub const DEFAULT_QUALITY_STEP: u8 = 10;
/// Lowest quality tried before giving up.
pub const DEFAULT_MIN_QUALITY: u8 = 30;

/// Errors for options that cannot describe a bounded search.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptionsError {
    #[error("maxSizeBytes must be greater than zero")]
    ZeroCeiling,

    #[error("Invalid bounds: maxWidth ({max_width}) and maxHeight ({max_height}) must be non-zero")]
    ZeroBounds { max_width: u32, max_height: u32 },

    #[error("Quality range must satisfy 0 < minQuality ({min}) <= startQuality ({start}) <= 100")]
    QualityRange { start: u8, min: u8 },

    #[error("qualityStep must be greater than zero")]
    ZeroStep,
}

/// Everything about a compression request except the source image.
///
/// Deserializes from a partial camelCase object; missing fields take their
/// defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompressionOptions {
    /// Ceiling for the encoded output in bytes.
    pub max_size_bytes: u64,
    pub max_width: u32,
    pub max_height: u32,
    /// First quality tried (1-100).
    pub start_quality: u8,
    /// Amount quality drops after each oversized attempt.
    pub quality_step: u8,
    /// Lowest quality tried (1-100, at most `start_quality`).
    pub min_quality: u8,
    /// Resampling filter for the downscale step.
    pub filter: FilterType,
}

impl Default for CompressionOptions {
    fn default() -> Self {
        Self {
            max_size_bytes: DEFAULT_MAX_SIZE_BYTES,
            max_width: DEFAULT_MAX_DIMENSION,
            max_height: DEFAULT_MAX_DIMENSION,
            start_quality: DEFAULT_START_QUALITY,
            quality_step: DEFAULT_QUALITY_STEP,
            min_quality: DEFAULT_MIN_QUALITY,
            filter: FilterType::default(),
        }
    }
}

impl CompressionOptions {
    /// Check that the options describe a non-empty, bounded search.
    pub fn validate(&self) -> Result<(), OptionsError> {
        if self.max_size_bytes == 0 {
            return Err(OptionsError::ZeroCeiling);
        }
        if self.max_width == 0 || self.max_height == 0 {
            return Err(OptionsError::ZeroBounds {
                max_width: self.max_width,
                max_height: self.max_height,
            });
        }
        if self.min_quality == 0 || self.min_quality > self.start_quality || self.start_quality > 100 {
            return Err(OptionsError::QualityRange {
                start: self.start_quality,
                min: self.min_quality,
            });
        }
        if self.quality_step == 0 {
            return Err(OptionsError::ZeroStep);
        }
        Ok(())
    }

    /// Quality levels the search visits, highest first.
    pub fn schedule(&self) -> QualitySchedule {
        QualitySchedule::new(self.start_quality, self.quality_step, self.min_quality)
    }

    /// Number of encode attempts when no quality meets the ceiling.
    pub fn max_attempts(&self) -> u32 {
        if self.quality_step == 0 || self.min_quality > self.start_quality {
            return 0;
        }
        u32::from(self.start_quality - self.min_quality) / u32::from(self.quality_step) + 1
    }
}
