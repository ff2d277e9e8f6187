//! PDF extraction backend trait.

use crate::Result;
use crate::plugins::Plugin;
use crate::types::Document;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Options forwarded to a [`PdfBackend`] for a single file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PdfLoadOptions {
    /// Emit one document per page instead of one per file
    pub split_pages: bool,

    /// Image extraction switch (None = backend default)
    pub extract_images: Option<bool>,

    /// OCR language hint (None = backend default). Never an empty string.
    pub ocr_language: Option<String>,
}

/// Trait for PDF extraction backends.
///
/// A backend receives the path of a scratch file holding the raw PDF bytes and
/// returns its documents in page order. Implementations are called from Tokio's
/// blocking pool, so they may do blocking I/O and CPU-heavy parsing freely.
///
/// # Errors
///
/// Return `FolioError::Extraction` when the file is not a readable PDF.
///
/// # Example
///
/// ```rust
/// use folio::plugins::{PdfBackend, PdfLoadOptions, Plugin};
/// use folio::{Document, Result};
/// use std::path::Path;
///
/// struct SizeOnlyBackend;
///
/// impl Plugin for SizeOnlyBackend {
///     fn name(&self) -> &str { "size-only" }
///     fn version(&self) -> String { "1.0.0".to_string() }
/// }
///
/// impl PdfBackend for SizeOnlyBackend {
///     fn load(&self, path: &Path, _options: &PdfLoadOptions) -> Result<Vec<Document>> {
///         let len = std::fs::metadata(path)?.len();
///         Ok(vec![Document::new(format!("{len} bytes"))])
///     }
/// }
/// ```
pub trait PdfBackend: Plugin {
    /// Extract documents from the PDF at `path`.
    fn load(&self, path: &Path, options: &PdfLoadOptions) -> Result<Vec<Document>>;
}
