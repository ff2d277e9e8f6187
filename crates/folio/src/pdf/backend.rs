use super::error::PdfError;
use super::metadata::{document_metadata, page_images};
use super::text::{document_text, open_document, page_text};
use crate::plugins::{PdfBackend, PdfLoadOptions, Plugin};
use crate::types::{Document, DocumentMetadata};
use crate::{FolioError, Result};
use serde_json::{Value, json};
use std::path::Path;

/// Pure-Rust PDF backend built on `lopdf`.
///
/// Metadata on every produced record:
///
/// - `source`: path of the file that was read
/// - `pdf`: `{ version, info, totalPages }`
/// - `loc`: `{ pageNumber }` (per-page mode only)
/// - `images`: image descriptors, only when image extraction is switched on
///
/// `lopdf` has no OCR; a language hint is logged and otherwise ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct LopdfBackend;

impl LopdfBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Plugin for LopdfBackend {
    fn name(&self) -> &str {
        "lopdf-backend"
    }

    fn version(&self) -> String {
        env!("CARGO_PKG_VERSION").to_string()
    }

    fn description(&self) -> &str {
        "Extracts page text and document info with lopdf"
    }
}

impl PdfBackend for LopdfBackend {
    fn load(&self, path: &Path, options: &PdfLoadOptions) -> Result<Vec<Document>> {
        if let Some(language) = &options.ocr_language {
            tracing::debug!("OCR language hint '{}' ignored by {}", language, self.name());
        }

        let doc = open_document(path).map_err(|e| match e {
            PdfError::PasswordRequired => FolioError::from(e),
            other => FolioError::extraction_with_source(format!("Failed to load PDF {}", path.display()), other),
        })?;

        let pages = doc.get_pages();
        let pdf = document_metadata(&doc, pages.len());
        let source = Value::String(path.to_string_lossy().into_owned());
        let with_images = options.extract_images == Some(true);

        let base_metadata = || {
            let mut metadata = DocumentMetadata::new();
            metadata.insert("source".to_string(), source.clone());
            metadata.insert("pdf".to_string(), pdf.clone());
            metadata
        };

        if options.split_pages {
            let documents = pages
                .iter()
                .map(|(&page_number, &page_id)| {
                    let mut metadata = base_metadata();
                    metadata.insert("loc".to_string(), json!({ "pageNumber": page_number }));
                    if with_images {
                        metadata.insert(
                            "images".to_string(),
                            Value::Array(page_images(&doc, page_number, page_id)),
                        );
                    }
                    Document::with_metadata(page_text(&doc, page_number), metadata)
                })
                .collect();
            return Ok(documents);
        }

        let mut metadata = base_metadata();
        if with_images {
            let images = pages
                .iter()
                .flat_map(|(&page_number, &page_id)| page_images(&doc, page_number, page_id))
                .collect();
            metadata.insert("images".to_string(), Value::Array(images));
        }

        Ok(vec![Document::with_metadata(document_text(&doc), metadata)])
    }
}
