//! Source image handles.

use std::borrow::Cow;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::DecodeError;

/// Opaque handle to the bytes of a user-selected image.
///
/// Cloning is cheap: byte sources are reference counted and path sources
/// are only read when the image is loaded.
#[derive(Clone, PartialEq, Eq)]
pub enum ImageRef {
    /// An image file on local storage.
    Path(PathBuf),
    /// An image already held in memory (e.g. handed over from a picker).
    Bytes(Arc<[u8]>),
}

impl ImageRef {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        ImageRef::Path(path.into())
    }

    pub fn from_bytes(bytes: impl Into<Arc<[u8]>>) -> Self {
        ImageRef::Bytes(bytes.into())
    }

    /// Size of the original encoded source, if it can be inspected.
    pub fn byte_len(&self) -> Option<u64> {
        match self {
            ImageRef::Path(path) => std::fs::metadata(path).ok().map(|m| m.len()),
            ImageRef::Bytes(bytes) => Some(bytes.len() as u64),
        }
    }

    /// Read the encoded source bytes.
    ///
    /// # Errors
    ///
    /// Returns `DecodeError::Unreadable` if a path source cannot be read and
    /// `DecodeError::Empty` if the source holds no bytes.
    pub fn load(&self) -> Result<Cow<'_, [u8]>, DecodeError> {
        let bytes = match self {
            ImageRef::Path(path) => Cow::Owned(read_file(path)?),
            ImageRef::Bytes(bytes) => Cow::Borrowed(&bytes[..]),
        };
        if bytes.is_empty() {
            return Err(DecodeError::Empty);
        }
        Ok(bytes)
    }
}

fn read_file(path: &Path) -> Result<Vec<u8>, DecodeError> {
    std::fs::read(path).map_err(|e| DecodeError::Unreadable(format!("{}: {}", path.display(), e)))
}

impl fmt::Debug for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageRef::Path(path) => f.debug_tuple("Path").field(path).finish(),
            ImageRef::Bytes(bytes) => write!(f, "Bytes({} bytes)", bytes.len()),
        }
    }
}

impl From<PathBuf> for ImageRef {
    fn from(path: PathBuf) -> Self {
        ImageRef::Path(path)
    }
}

impl From<Vec<u8>> for ImageRef {
    fn from(bytes: Vec<u8>) -> Self {
        ImageRef::Bytes(bytes.into())
    }
}
