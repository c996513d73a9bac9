//! Encoded output artifacts and where they live.
//!
//! An [`EncodedArtifact`] owns its storage. Dropping it releases that
//! storage, which for [`ArtifactStore::TempDir`] means deleting the temporary
//! file. Artifacts that are superseded, rejected or abandoned therefore
//! clean up on every exit path without explicit bookkeeping.

use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::encode::OutputFormat;

/// Errors raised while storing or reading back an artifact.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("Artifact I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to persist artifact to {path}: {reason}")]
    Persist { path: PathBuf, reason: String },
}

/// Where encoded artifacts are kept until the caller takes them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ArtifactStore {
    /// Keep artifacts in memory.
    #[default]
    Memory,
    /// Write each artifact to a uniquely named temporary file in this
    /// directory.
    TempDir(PathBuf),
}

impl ArtifactStore {
    pub fn temp_dir(dir: impl Into<PathBuf>) -> Self {
        ArtifactStore::TempDir(dir.into())
    }

    /// Take ownership of encoded bytes as an artifact.
    pub fn store(&self, bytes: Vec<u8>, format: OutputFormat) -> Result<EncodedArtifact, ArtifactError> {
        let len = bytes.len() as u64;
        let backing = match self {
            ArtifactStore::Memory => Backing::Memory(bytes),
            ArtifactStore::TempDir(dir) => {
                let mut file = tempfile::Builder::new()
                    .prefix("photofit-")
                    .suffix(&format!(".{}", format.extension()))
                    .tempfile_in(dir)?;
                file.write_all(&bytes)?;
                file.flush()?;
                Backing::File(file.into_temp_path())
            }
        };
        Ok(EncodedArtifact {
            format,
            len,
            backing,
        })
    }
}

enum Backing {
    Memory(Vec<u8>),
    File(tempfile::TempPath),
}

/// An encoded image produced by one compression attempt.
pub struct EncodedArtifact {
    format: OutputFormat,
    len: u64,
    backing: Backing,
}

impl EncodedArtifact {
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Encoded size in bytes.
    pub fn len(&self) -> u64 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The bytes, when the artifact is held in memory.
    pub fn in_memory(&self) -> Option<&[u8]> {
        match &self.backing {
            Backing::Memory(bytes) => Some(bytes.as_slice()),
            Backing::File(_) => None,
        }
    }

    /// The temporary file path, when the artifact is file-backed.
    pub fn path(&self) -> Option<&Path> {
        match &self.backing {
            Backing::Memory(_) => None,
            Backing::File(path) => Some(&**path),
        }
    }

    /// Read the encoded bytes regardless of backing.
    pub fn read_bytes(&self) -> Result<Vec<u8>, ArtifactError> {
        match &self.backing {
            Backing::Memory(bytes) => Ok(bytes.clone()),
            Backing::File(path) => Ok(std::fs::read(path)?),
        }
    }

    /// Consume the artifact and return its bytes. A backing file is deleted.
    pub fn into_bytes(self) -> Result<Vec<u8>, ArtifactError> {
        match self.backing {
            Backing::Memory(bytes) => Ok(bytes),
            Backing::File(path) => Ok(std::fs::read(&path)?),
        }
    }

    /// Move the artifact to `dest`, keeping it past the artifact's lifetime.
    ///
    /// File-backed artifacts are renamed, so `dest` should be on the same
    /// filesystem as the store directory.
    pub fn persist(self, dest: impl AsRef<Path>) -> Result<PathBuf, ArtifactError> {
        let dest = dest.as_ref();
        match self.backing {
            Backing::Memory(bytes) => std::fs::write(dest, bytes)?,
            Backing::File(path) => path.persist(dest).map_err(|e| ArtifactError::Persist {
                path: dest.to_path_buf(),
                reason: e.error.to_string(),
            })?,
        }
        Ok(dest.to_path_buf())
    }
}

impl fmt::Debug for EncodedArtifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("EncodedArtifact");
        s.field("format", &self.format).field("len", &self.len);
        if let Some(path) = self.path() {
            s.field("path", &path);
        }
        s.finish()
    }
}
