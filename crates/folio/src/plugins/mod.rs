//! Collaborator traits.
//!
//! The loader pipeline treats its heavy collaborators as black boxes behind
//! these traits:
//!
//! - [`Plugin`] - base trait (name, version) shared by all collaborators
//! - [`PdfBackend`] - turns a PDF file on disk into document records
//! - [`TextSplitter`] - turns documents into smaller documents
//! - [`FileStorage`] - resolves storage keys into raw bytes
//!
//! Collaborators are stored in `Arc<dyn Trait>` and shared across calls:
//!
//! ```rust
//! use folio::plugins::{Plugin, TextSplitter};
//! use folio::{Document, Result};
//! use std::sync::Arc;
//!
//! struct LineSplitter;
//!
//! impl Plugin for LineSplitter {
//!     fn name(&self) -> &str { "line-splitter" }
//!     fn version(&self) -> String { "0.1.0".to_string() }
//! }
//!
//! impl TextSplitter for LineSplitter {
//!     fn split_documents(&self, documents: Vec<Document>) -> Result<Vec<Document>> {
//!         Ok(documents
//!             .into_iter()
//!             .flat_map(|doc| {
//!                 let metadata = doc.metadata.clone();
//!                 doc.page_content
//!                     .lines()
//!                     .map(|line| Document::with_metadata(line, metadata.clone()))
//!                     .collect::<Vec<_>>()
//!             })
//!             .collect())
//!     }
//! }
//!
//! let splitter: Arc<dyn TextSplitter> = Arc::new(LineSplitter);
//! let docs = splitter.split_documents(vec![Document::new("a\nb")]).unwrap();
//! assert_eq!(docs.len(), 2);
//! ```

mod backend;
mod splitter;
mod storage;
mod traits;

pub use backend::{PdfBackend, PdfLoadOptions};
pub use splitter::TextSplitter;
pub use storage::FileStorage;
pub use traits::Plugin;
