//! Scratch-file provider.
//!
//! PDF backends read from a path, so every source buffer is materialized to a
//! short-lived file first. The directory is shared between concurrent loads;
//! names are unique per file (`<unix nanos>-<uuid v4>.pdf`) and every file is
//! deleted by the [`ScratchFile`] guard that created it.

use crate::{FolioError, Result};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

/// Environment variable overriding the default scratch directory.
pub const SCRATCH_DIR_ENV: &str = "FOLIO_SCRATCH_DIR";

/// Capability to create and remove uniquely named scratch files.
///
/// Injected into the loader so tests can point it at an isolated directory.
pub trait ScratchSpace: Send + Sync {
    /// Create a new uniquely named file containing `bytes` and return its path.
    ///
    /// # Errors
    ///
    /// Returns `FolioError::FileSystem` if the directory or file cannot be
    /// created or written.
    fn create(&self, bytes: &[u8]) -> Result<PathBuf>;

    /// Remove a file previously returned by [`ScratchSpace::create`].
    fn remove(&self, path: &Path) -> std::io::Result<()>;
}

/// Scratch space backed by a directory on the local filesystem.
#[derive(Debug, Clone)]
pub struct DirScratchSpace {
    dir: PathBuf,
}

impl DirScratchSpace {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Scratch space at `$FOLIO_SCRATCH_DIR`, or `<system temp>/folio`.
    pub fn from_env() -> Self {
        Self::new(default_scratch_dir())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl Default for DirScratchSpace {
    fn default() -> Self {
        Self::from_env()
    }
}

impl ScratchSpace for DirScratchSpace {
    fn create(&self, bytes: &[u8]) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.dir).map_err(|e| {
            FolioError::file_system_with_source(
                format!("Failed to create scratch directory {}", self.dir.display()),
                e,
            )
        })?;

        let path = self.dir.join(unique_file_name());

        let mut file = OpenOptions::new().write(true).create_new(true).open(&path).map_err(|e| {
            FolioError::file_system_with_source(format!("Failed to create scratch file {}", path.display()), e)
        })?;

        if let Err(e) = file.write_all(bytes).and_then(|_| file.flush()) {
            drop(file);
            let _ = std::fs::remove_file(&path);
            return Err(FolioError::file_system_with_source(
                format!("Failed to write scratch file {}", path.display()),
                e,
            ));
        }

        Ok(path)
    }

    fn remove(&self, path: &Path) -> std::io::Result<()> {
        std::fs::remove_file(path)
    }
}

/// RAII guard owning one scratch file.
///
/// The file is removed when the guard drops, on success, error, and unwind
/// alike. Removal failures are logged and swallowed; a file that is already
/// gone is not a failure.
pub struct ScratchFile {
    space: Arc<dyn ScratchSpace>,
    path: PathBuf,
}

impl ScratchFile {
    pub fn create(space: Arc<dyn ScratchSpace>, bytes: &[u8]) -> Result<Self> {
        let path = space.create(bytes)?;
        tracing::debug!("Created scratch file {} ({} bytes)", path.display(), bytes.len());
        Ok(Self { space, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ScratchFile {
    fn drop(&mut self) {
        match self.space.remove(&self.path) {
            Ok(()) => tracing::debug!("Removed scratch file {}", self.path.display()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!("Failed to remove scratch file {}: {}", self.path.display(), e),
        }
    }
}

fn default_scratch_dir() -> PathBuf {
    std::env::var_os(SCRATCH_DIR_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::temp_dir().join("folio"))
}

fn unique_file_name() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    format!("{}-{}.pdf", nanos, uuid::Uuid::new_v4())
}
