//! Extraction backend adapter.
//!
//! Turns one resolved byte buffer into document records:
//!
//! 1. write the bytes to a uniquely named scratch file
//! 2. run the [`PdfBackend`] on it from Tokio's blocking pool
//! 3. remove the scratch file (always, via [`ScratchFile`])
//! 4. pass the documents through the [`TextSplitter`], if one is configured
//!
//! The whole sequence runs inside one blocking task, so a file is fully
//! processed and cleaned up before the caller moves on to the next one.

use crate::core::scratch::{ScratchFile, ScratchSpace};
use crate::plugins::{PdfBackend, PdfLoadOptions, TextSplitter};
use crate::types::Document;
use crate::{FolioError, Result};
use std::sync::Arc;

/// Everything needed to extract one source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionRequest {
    pub raw_bytes: Vec<u8>,
    pub per_page: bool,
    pub extract_images: Option<bool>,
    pub ocr_language: Option<String>,
}

impl ExtractionRequest {
    pub fn new(raw_bytes: Vec<u8>, options: &PdfLoadOptions) -> Self {
        Self {
            raw_bytes,
            per_page: options.split_pages,
            extract_images: options.extract_images,
            ocr_language: options.ocr_language.clone(),
        }
    }

    /// Options as seen by the backend. A blank OCR language is dropped.
    pub fn load_options(&self) -> PdfLoadOptions {
        PdfLoadOptions {
            split_pages: self.per_page,
            extract_images: self.extract_images,
            ocr_language: self
                .ocr_language
                .as_deref()
                .map(str::trim)
                .filter(|language| !language.is_empty())
                .map(str::to_string),
        }
    }
}

/// Runs extraction requests against one backend and scratch space.
#[derive(Clone)]
pub struct ExtractionAdapter {
    backend: Arc<dyn PdfBackend>,
    scratch: Arc<dyn ScratchSpace>,
    splitter: Option<Arc<dyn TextSplitter>>,
}

impl ExtractionAdapter {
    pub fn new(backend: Arc<dyn PdfBackend>, scratch: Arc<dyn ScratchSpace>) -> Self {
        Self {
            backend,
            scratch,
            splitter: None,
        }
    }

    pub fn with_splitter(mut self, splitter: Option<Arc<dyn TextSplitter>>) -> Self {
        self.splitter = splitter;
        self
    }

    /// Extract one file and return its documents in page order.
    ///
    /// # Errors
    ///
    /// - `FolioError::FileSystem` if the scratch file cannot be written
    /// - `FolioError::Extraction` if the backend rejects the bytes or the
    ///   blocking worker panics
    /// - whatever the splitter returns
    pub async fn extract(&self, request: ExtractionRequest) -> Result<Vec<Document>> {
        let backend = Arc::clone(&self.backend);
        let scratch = Arc::clone(&self.scratch);
        let splitter = self.splitter.clone();
        let options = request.load_options();
        let raw_bytes = request.raw_bytes;

        tokio::task::spawn_blocking(move || -> Result<Vec<Document>> {
            let documents = {
                let file = ScratchFile::create(scratch, &raw_bytes)?;
                tracing::debug!(
                    "Extracting {} with {} (split_pages={})",
                    file.path().display(),
                    backend.name(),
                    options.split_pages
                );
                backend.load(file.path(), &options)?
            };

            match splitter {
                Some(splitter) => {
                    let count = documents.len();
                    let split = splitter.split_documents(documents)?;
                    tracing::debug!("{} split {} documents into {}", splitter.name(), count, split.len());
                    Ok(split)
                }
                None => Ok(documents),
            }
        })
        .await
        .map_err(|e| FolioError::extraction_with_source("PDF extraction task failed", e))?
    }

    /// Extract one file and append its documents to `accumulator`.
    ///
    /// On error the accumulator is left untouched.
    pub async fn extract_into(&self, request: ExtractionRequest, accumulator: &mut Vec<Document>) -> Result<()> {
        let documents = self.extract(request).await?;
        accumulator.extend(documents);
        Ok(())
    }
}
