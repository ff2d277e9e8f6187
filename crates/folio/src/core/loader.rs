//! Main load entry points.
//!
//! [`PdfLoader`] runs the whole pipeline for one `source` string:
//!
//! 1. classify the source ([`SourceInput::parse`]) and parse the metadata rules
//! 2. resolve every entry into bytes, in input order
//! 3. extract each buffer in turn, appending its documents to one accumulator
//! 4. apply the metadata rules to every document
//! 5. shape the result ([`format_output`])
//!
//! Any stage failure aborts the call; there is no partial result.

use crate::core::config::LoaderConfig;
use crate::core::output::format_output;
use crate::core::scratch::ScratchSpace;
use crate::core::source::SourceInput;
use crate::extraction::{ExtractionAdapter, ExtractionRequest};
use crate::metadata::MetadataDirective;
use crate::plugins::{FileStorage, PdfBackend, TextSplitter};
use crate::types::LoaderOutput;
use crate::Result;
use once_cell::sync::Lazy;
use std::sync::Arc;

/// Global Tokio runtime for synchronous operations.
///
/// Lazily initialized on first use and shared across all sync wrappers.
/// Runtime creation only fails on resource exhaustion, in which case nothing
/// else would work either.
static GLOBAL_RUNTIME: Lazy<tokio::runtime::Runtime> = Lazy::new(|| {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("Failed to create global Tokio runtime - system may be out of resources")
});

/// PDF loading pipeline.
///
/// Collaborators are shared behind `Arc`, so a loader is cheap to clone and
/// can serve concurrent calls.
///
/// # Example
///
/// ```rust,no_run
/// use folio::core::config::LoaderConfig;
/// use folio::core::loader::PdfLoader;
/// use folio::{OutputMode, StorageContext};
/// use folio::storage::LocalFileStorage;
/// use std::sync::Arc;
///
/// # async fn example() -> folio::Result<()> {
/// let loader = PdfLoader::default().with_storage(Arc::new(LocalFileStorage::default()));
///
/// let config = LoaderConfig {
///     output_mode: OutputMode::Text,
///     storage_context: Some(StorageContext::new("acme", "onboarding")),
///     ..Default::default()
/// };
///
/// let output = loader.load(r#"FILE-STORAGE::["a.pdf","b.pdf"]"#, &config).await?;
/// println!("{}", output.text().unwrap_or_default());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct PdfLoader {
    backend: Arc<dyn PdfBackend>,
    storage: Option<Arc<dyn FileStorage>>,
    scratch: Option<Arc<dyn ScratchSpace>>,
    splitter: Option<Arc<dyn TextSplitter>>,
}

impl PdfLoader {
    pub fn new(backend: Arc<dyn PdfBackend>) -> Self {
        Self {
            backend,
            storage: None,
            scratch: None,
            splitter: None,
        }
    }

    /// File storage used to resolve `FILE-STORAGE::` sources.
    pub fn with_storage(mut self, storage: Arc<dyn FileStorage>) -> Self {
        self.storage = Some(storage);
        self
    }

    /// Scratch space used instead of the one derived from each call's config.
    pub fn with_scratch_space(mut self, scratch: Arc<dyn ScratchSpace>) -> Self {
        self.scratch = Some(scratch);
        self
    }

    /// Splitter applied to every file's documents. Takes precedence over
    /// `LoaderConfig::chunking`.
    pub fn with_text_splitter(mut self, splitter: Arc<dyn TextSplitter>) -> Self {
        self.splitter = Some(splitter);
        self
    }

    pub fn backend(&self) -> &Arc<dyn PdfBackend> {
        &self.backend
    }

    /// Load every PDF named by `source`.
    ///
    /// # Errors
    ///
    /// - `FolioError::MalformedInput` for undecodable `source` or `metadata`
    /// - `FolioError::Validation` for storage sources without storage or
    ///   context, and for invalid chunking settings
    /// - `FolioError::StorageFetch` when a referenced key cannot be read
    /// - `FolioError::Extraction` / `FolioError::FileSystem` from extraction
    #[tracing::instrument(
        skip_all,
        fields(
            loader.backend = %self.backend.name(),
            loader.usage = ?config.usage,
            loader.output_mode = ?config.output_mode,
        )
    )]
    pub async fn load(&self, source: &str, config: &LoaderConfig) -> Result<LoaderOutput> {
        let input = SourceInput::parse(source)?;
        let directive = MetadataDirective::new(config.metadata.as_ref(), config.omit_metadata_keys.as_deref())?;
        let adapter = ExtractionAdapter::new(Arc::clone(&self.backend), self.scratch_space(config))
            .with_splitter(self.text_splitter(config)?);

        let buffers = input.resolve(self.storage.as_deref(), config.storage_context.as_ref()).await?;
        tracing::debug!(
            "Resolved {} {} source(s)",
            buffers.len(),
            if input.is_storage() { "storage" } else { "inline" }
        );

        let options = config.pdf_load_options();
        let mut documents = Vec::new();
        for (index, raw_bytes) in buffers.into_iter().enumerate() {
            let before = documents.len();
            adapter
                .extract_into(ExtractionRequest::new(raw_bytes, &options), &mut documents)
                .await?;
            tracing::debug!("Source {} produced {} document(s)", index, documents.len() - before);
        }

        directive.apply(&mut documents);

        Ok(format_output(documents, config.output_mode))
    }

    /// Blocking variant of [`PdfLoader::load`] driven by a shared global
    /// runtime.
    ///
    /// Must not be called from inside an async context.
    pub fn load_sync(&self, source: &str, config: &LoaderConfig) -> Result<LoaderOutput> {
        GLOBAL_RUNTIME.block_on(self.load(source, config))
    }

    fn scratch_space(&self, config: &LoaderConfig) -> Arc<dyn ScratchSpace> {
        match &self.scratch {
            Some(scratch) => Arc::clone(scratch),
            None => Arc::new(config.scratch_space()),
        }
    }

    fn text_splitter(&self, config: &LoaderConfig) -> Result<Option<Arc<dyn TextSplitter>>> {
        if let Some(splitter) = &self.splitter {
            return Ok(Some(Arc::clone(splitter)));
        }

        match config.chunking {
            None => Ok(None),
            #[cfg(feature = "chunking")]
            Some(chunking) => Ok(Some(Arc::new(crate::chunking::CharacterSplitter::new(chunking)?))),
            #[cfg(not(feature = "chunking"))]
            Some(_) => Err(crate::FolioError::validation(
                "Chunking is configured but the `chunking` feature is disabled",
            )),
        }
    }
}

#[cfg(feature = "pdf")]
impl Default for PdfLoader {
    fn default() -> Self {
        Self::new(Arc::new(crate::pdf::LopdfBackend::new()))
    }
}

impl std::fmt::Debug for PdfLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PdfLoader")
            .field("backend", &self.backend.name())
            .field("storage", &self.storage.as_ref().map(|s| s.name().to_string()))
            .field("splitter", &self.splitter.as_ref().map(|s| s.name().to_string()))
            .finish_non_exhaustive()
    }
}
