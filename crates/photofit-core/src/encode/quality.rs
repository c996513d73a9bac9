//! The encoder seam used by the compressor.

use serde::{Deserialize, Serialize};

use super::{encode_image_jpeg, EncodeError};
use crate::decode::DecodedImage;

/// Lossy output formats the compressor can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OutputFormat {
    #[default]
    Jpeg,
}

impl OutputFormat {
    pub fn mime_type(self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "image/jpeg",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "jpg",
        }
    }
}

/// Encodes an image at a given quality level.
///
/// Implementations must not retain state between calls; the compressor may
/// share one encoder across concurrent requests and across blocking-pool
/// threads.
pub trait QualityEncoder: Send + Sync {
    /// Format of the bytes produced by [`QualityEncoder::encode`].
    fn format(&self) -> OutputFormat;

    /// Encode `image` at `quality` (0-100).
    fn encode(&self, image: &DecodedImage, quality: u8) -> Result<Vec<u8>, EncodeError>;
}

/// Baseline JPEG encoder backed by the `image` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct JpegQualityEncoder;

impl QualityEncoder for JpegQualityEncoder {
    fn format(&self) -> OutputFormat {
        OutputFormat::Jpeg
    }

    fn encode(&self, image: &DecodedImage, quality: u8) -> Result<Vec<u8>, EncodeError> {
        encode_image_jpeg(image, quality)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jpeg_encoder_format() {
        assert_eq!(JpegQualityEncoder.format(), OutputFormat::Jpeg);
        assert_eq!(OutputFormat::Jpeg.mime_type(), "image/jpeg");
        assert_eq!(OutputFormat::Jpeg.extension(), "jpg");
    }

    #[test]
    fn test_jpeg_encoder_rejects_bad_buffer() {
        let image = DecodedImage {
            width: 4,
            height: 4,
            pixels: vec![0u8; 10],
        };
        let result = JpegQualityEncoder.encode(&image, 80);
        assert!(matches!(result, Err(EncodeError::InvalidPixelData { .. })));
    }
}
