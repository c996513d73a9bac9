//! Test doubles for driving the search deterministically.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Mutex;

use crate::decode::DecodedImage;
use crate::encode::{encode_jpeg, EncodeError, OutputFormat, QualityEncoder};

enum Sizes {
    Constant(usize),
    Table(Vec<(u8, usize)>),
    PerQualityPoint(usize),
}

/// Encoder whose output size is scripted per quality level. Records every
/// call so tests can check the order of attempts and the pixels encoded.
pub(crate) struct ScriptedEncoder {
    sizes: Sizes,
    fail_at: Option<u8>,
    calls: Mutex<Vec<(u8, u64)>>,
}

impl ScriptedEncoder {
    pub(crate) fn constant(size: usize) -> Self {
        Self::new(Sizes::Constant(size))
    }

    /// Sizes per quality; unlisted levels reuse the smallest listed size.
    pub(crate) fn from_table(table: &[(u8, usize)]) -> Self {
        Self::new(Sizes::Table(table.to_vec()))
    }

    /// `bytes_per_point * quality` bytes.
    pub(crate) fn linear(bytes_per_point: usize) -> Self {
        Self::new(Sizes::PerQualityPoint(bytes_per_point))
    }

    pub(crate) fn failing_at(mut self, quality: u8) -> Self {
        self.fail_at = Some(quality);
        self
    }

    fn new(sizes: Sizes) -> Self {
        Self {
            sizes,
            fail_at: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn qualities(&self) -> Vec<u8> {
        self.calls.lock().unwrap().iter().map(|(q, _)| *q).collect()
    }

    pub(crate) fn fingerprints(&self) -> Vec<u64> {
        self.calls.lock().unwrap().iter().map(|(_, f)| *f).collect()
    }

    fn size_for(&self, quality: u8) -> usize {
        match &self.sizes {
            Sizes::Constant(size) => *size,
            Sizes::PerQualityPoint(bytes) => bytes * usize::from(quality),
            Sizes::Table(table) => table
                .iter()
                .find(|(q, _)| *q == quality)
                .or_else(|| table.iter().min_by_key(|(_, size)| *size))
                .map(|(_, size)| *size)
                .unwrap_or(0),
        }
    }
}

impl QualityEncoder for ScriptedEncoder {
    fn format(&self) -> OutputFormat {
        OutputFormat::Jpeg
    }

    fn encode(&self, image: &DecodedImage, quality: u8) -> Result<Vec<u8>, EncodeError> {
        let mut hasher = DefaultHasher::new();
        (image.width, image.height, &image.pixels).hash(&mut hasher);
        self.calls.lock().unwrap().push((quality, hasher.finish()));

        if self.fail_at == Some(quality) {
            return Err(EncodeError::EncodingFailed("scripted failure".to_string()));
        }
        Ok(vec![0u8; self.size_for(quality)])
    }
}

/// A real JPEG with a detailed gradient, usable as a source image.
pub(crate) fn sample_jpeg(width: u32, height: u32) -> Vec<u8> {
    let mut pixels = Vec::with_capacity((width * height * 3) as usize);
    for y in 0..height {
        for x in 0..width {
            pixels.push((x * 255 / width.max(1)) as u8);
            pixels.push((y * 255 / height.max(1)) as u8);
            pixels.push(((x * 37 + y * 11) % 256) as u8);
        }
    }
    encode_jpeg(&pixels, width, height, 95).unwrap()
}
