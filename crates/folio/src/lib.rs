//! Folio - PDF Document Loading Pipeline
//!
//! Folio turns PDFs delivered as inline base64 data URIs or as references into
//! a file store into document records (`pageContent` + metadata), optionally
//! chunked, with caller-controlled metadata merging, returned either as
//! records or as one text blob.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use folio::{LoaderConfig, PdfLoader, Usage};
//!
//! # fn main() -> folio::Result<()> {
//! let loader = PdfLoader::default();
//! let config = LoaderConfig {
//!     usage: Usage::PerFile,
//!     omit_metadata_keys: Some("pdf.info".to_string()),
//!     ..Default::default()
//! };
//!
//! let output = loader.load_sync("data:application/pdf;base64,JVBERi0xLjQK...", &config)?;
//! for doc in output.documents().unwrap_or_default() {
//!     println!("{}", doc.page_content);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! - **Input Resolver** (`core::source`): classifies the `source` string and resolves it to bytes
//! - **Extraction Adapter** (`extraction`): scratch file, backend call, optional splitting
//! - **Metadata Merger** (`metadata`): additional metadata and key omission
//! - **Output Formatter** (`core::output`): records or escape-normalized text
//! - **Collaborators** (`plugins`): `PdfBackend`, `TextSplitter`, `FileStorage`
//!
//! # Features
//!
//! - `pdf` (default): bundled [`pdf::LopdfBackend`]
//! - `chunking` (default): bundled [`chunking::CharacterSplitter`]

#![deny(unsafe_code)]

pub mod core;
pub mod error;
pub mod extraction;
pub mod metadata;
pub mod plugins;
pub mod storage;
pub mod text;
pub mod types;

#[cfg(feature = "chunking")]
pub mod chunking;

#[cfg(feature = "pdf")]
pub mod pdf;

pub use error::{FolioError, Result};
pub use types::*;

pub use core::config::{ChunkingConfig, LoaderConfig};
pub use core::loader::PdfLoader;
pub use core::output::format_output;
pub use core::scratch::{DirScratchSpace, ScratchSpace};
pub use core::source::SourceInput;
pub use metadata::{MetadataDirective, MetadataInput};
