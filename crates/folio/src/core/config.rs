//! Configuration loading and management.
//!
//! [`LoaderConfig`] carries every per-call option of a load. It can be built
//! in code, or loaded from TOML, YAML, or JSON files and discovered in the
//! project hierarchy (`folio.toml`).

use crate::core::scratch::DirScratchSpace;
use crate::metadata::MetadataInput;
use crate::plugins::PdfLoadOptions;
use crate::types::{OutputMode, StorageContext, Usage};
use crate::{FolioError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the configuration file searched for by [`LoaderConfig::discover`].
pub const CONFIG_FILE_NAME: &str = "folio.toml";

/// Per-call loader configuration.
///
/// # Example
///
/// ```rust
/// use folio::core::config::LoaderConfig;
/// use folio::{OutputMode, Usage};
///
/// let config = LoaderConfig {
///     usage: Usage::PerFile,
///     output_mode: OutputMode::Text,
///     omit_metadata_keys: Some("source".to_string()),
///     ..Default::default()
/// };
/// assert!(!config.usage.splits_pages());
///
/// // Or from a file:
/// // let config = LoaderConfig::from_toml_file("folio.toml")?;
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoaderConfig {
    /// One document per page or per file
    #[serde(default)]
    pub usage: Usage,

    /// Forwarded to the backend when set
    #[serde(default, alias = "extractImages", skip_serializing_if = "Option::is_none")]
    pub extract_images: Option<bool>,

    /// OCR language hint; blank values are treated as unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Additional metadata merged into every document
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<MetadataInput>,

    /// Comma-separated keys (dotted paths allowed) to drop, or `*` for all
    #[serde(default, alias = "omitMetadataKeys", skip_serializing_if = "Option::is_none")]
    pub omit_metadata_keys: Option<String>,

    /// Result shape
    #[serde(default, alias = "outputMode")]
    pub output_mode: OutputMode,

    /// Organization/flow identifiers for storage references
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_context: Option<StorageContext>,

    /// Scratch directory override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scratch_dir: Option<PathBuf>,

    /// Character splitting of extracted documents
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chunking: Option<ChunkingConfig>,
}

/// Character chunking configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkingConfig {
    /// Maximum characters per chunk
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Characters shared by consecutive chunks
    #[serde(default = "default_chunk_overlap")]
    pub chunk_overlap: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
            chunk_overlap: default_chunk_overlap(),
        }
    }
}

fn default_chunk_size() -> usize {
    1000
}
fn default_chunk_overlap() -> usize {
    200
}

impl LoaderConfig {
    /// Backend options derived from this configuration.
    ///
    /// The OCR language is forwarded only when it is non-blank.
    pub fn pdf_load_options(&self) -> PdfLoadOptions {
        PdfLoadOptions {
            split_pages: self.usage.splits_pages(),
            extract_images: self.extract_images,
            ocr_language: self
                .language
                .as_deref()
                .map(str::trim)
                .filter(|language| !language.is_empty())
                .map(str::to_string),
        }
    }

    /// Scratch space for this call: `scratch_dir` when set, else the
    /// environment/temp-dir default.
    pub fn scratch_space(&self) -> DirScratchSpace {
        match &self.scratch_dir {
            Some(dir) => DirScratchSpace::new(dir),
            None => DirScratchSpace::from_env(),
        }
    }

    /// Load configuration from a TOML file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the TOML file
    ///
    /// # Errors
    ///
    /// Returns `FolioError::Validation` if file doesn't exist or is invalid TOML.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = read_config(path.as_ref())?;

        toml::from_str(&content)
            .map_err(|e| FolioError::validation(format!("Invalid TOML in {}: {}", path.as_ref().display(), e)))
    }

    /// Load configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = read_config(path.as_ref())?;

        serde_yaml_ng::from_str(&content)
            .map_err(|e| FolioError::validation(format!("Invalid YAML in {}: {}", path.as_ref().display(), e)))
    }

    /// Load configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = read_config(path.as_ref())?;

        serde_json::from_str(&content)
            .map_err(|e| FolioError::validation(format!("Invalid JSON in {}: {}", path.as_ref().display(), e)))
    }

    /// Load configuration, choosing the format from the file extension.
    ///
    /// `.toml`, `.yaml`/`.yml`, and `.json` are recognized.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml_file(path),
            Some("yaml" | "yml") => Self::from_yaml_file(path),
            Some("json") => Self::from_json_file(path),
            _ => Err(FolioError::validation(format!(
                "Unsupported config file format: {}",
                path.display()
            ))),
        }
    }

    /// Discover configuration file in parent directories.
    ///
    /// Searches for `folio.toml` in current directory and parent directories.
    ///
    /// # Returns
    ///
    /// - `Some(config)` if found
    /// - `None` if no config file found
    pub fn discover() -> Result<Option<Self>> {
        let mut current = std::env::current_dir().map_err(FolioError::Io)?;

        loop {
            let folio_toml = current.join(CONFIG_FILE_NAME);
            if folio_toml.exists() {
                tracing::debug!("Using configuration from {}", folio_toml.display());
                return Ok(Some(Self::from_toml_file(folio_toml)?));
            }

            if let Some(parent) = current.parent() {
                current = parent.to_path_buf();
            } else {
                break;
            }
        }

        Ok(None)
    }
}

fn read_config(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .map_err(|e| FolioError::validation(format!("Failed to read config file {}: {}", path.display(), e)))
}
