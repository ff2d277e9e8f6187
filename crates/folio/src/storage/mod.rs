//! Bundled file storage.
//!
//! [`LocalFileStorage`] resolves storage keys against a directory tree laid
//! out as `<root>/<org_id>/<flow_id>/<key>`.
//!
//! ```rust,no_run
//! use folio::plugins::FileStorage;
//! use folio::storage::LocalFileStorage;
//! use folio::StorageContext;
//!
//! # async fn example() -> folio::Result<()> {
//! let storage = LocalFileStorage::new("/srv/folio/storage");
//! let context = StorageContext::new("acme", "onboarding");
//! let bytes = storage.get_file("handbook.pdf", &context).await?;
//! # let _ = bytes;
//! # Ok(())
//! # }
//! ```

use crate::plugins::{FileStorage, Plugin};
use crate::types::StorageContext;
use crate::{FolioError, Result};
use async_trait::async_trait;
use std::path::{Component, Path, PathBuf};

/// File storage backed by a local directory.
#[derive(Debug, Clone)]
pub struct LocalFileStorage {
    root: PathBuf,
}

impl LocalFileStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// `<user data dir>/folio/storage`, or `<system temp>/folio/storage` when
    /// the platform has no data directory.
    pub fn default_root() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join("folio")
            .join("storage")
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Location of `key` for the given context.
    ///
    /// # Errors
    ///
    /// Returns `FolioError::StorageFetch` if the key or a context identifier
    /// would escape its directory (absolute paths, `..` segments).
    pub fn resolve_path(&self, key: &str, context: &StorageContext) -> Result<PathBuf> {
        let segments = [
            ("org id", context.org_id.as_str()),
            ("flow id", context.flow_id.as_str()),
            ("key", key),
        ];

        let mut path = self.root.clone();
        for (label, segment) in segments {
            ensure_relative(label, segment)?;
            path.push(segment);
        }
        Ok(path)
    }
}

impl Default for LocalFileStorage {
    fn default() -> Self {
        Self::new(Self::default_root())
    }
}

fn ensure_relative(label: &str, segment: &str) -> Result<()> {
    let is_safe = !segment.is_empty()
        && Path::new(segment)
            .components()
            .all(|component| matches!(component, Component::Normal(_) | Component::CurDir));

    if is_safe {
        Ok(())
    } else {
        Err(FolioError::storage_fetch(format!("Invalid storage {}: '{}'", label, segment)))
    }
}

impl Plugin for LocalFileStorage {
    fn name(&self) -> &str {
        "local-file-storage"
    }

    fn version(&self) -> String {
        env!("CARGO_PKG_VERSION").to_string()
    }

    fn description(&self) -> &str {
        "Reads stored files from a local directory tree"
    }
}

#[async_trait]
impl FileStorage for LocalFileStorage {
    async fn get_file(&self, key: &str, context: &StorageContext) -> Result<Vec<u8>> {
        let path = self.resolve_path(key, context)?;

        tokio::fs::read(&path).await.map_err(|e| {
            FolioError::storage_fetch_with_source(format!("Failed to fetch '{}' from {}", key, path.display()), e)
        })
    }
}
