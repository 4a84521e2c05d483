use std::fs;
use std::path::{Path, PathBuf};

use xxhash_rust::xxh3::xxh3_64;

use crate::error::{BenchError, Result};

/// The full contents of one corpus file, read once and shared read-only by
/// every trial on that file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceBuffer {
    path: PathBuf,
    bytes: Vec<u8>,
    digest: u64,
}

impl SourceBuffer {
    /// Read `path` fully into memory.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|e| BenchError::io(path, e))?;
        Ok(Self::from_bytes(path, bytes))
    }

    /// Wrap bytes that are already in memory.
    pub fn from_bytes(path: impl Into<PathBuf>, bytes: Vec<u8>) -> Self {
        let digest = xxh3_64(&bytes);
        Self {
            path: path.into(),
            bytes,
            digest,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name for report rows; falls back to the full path.
    pub fn display_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// xxh3-64 of the contents, so a report row can be tied to the exact
    /// bytes that were measured.
    pub fn digest(&self) -> u64 {
        self.digest
    }
}
