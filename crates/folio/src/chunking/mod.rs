//! Text chunking utilities.
//!
//! This module provides [`CharacterSplitter`], the bundled
//! [`TextSplitter`](crate::plugins::TextSplitter), built on the `text-splitter`
//! library. It splits long pages into smaller documents while preserving
//! word and sentence boundaries where the size allows.
//!
//! Every chunk keeps a copy of its parent's metadata and gains
//! `loc.chunk = { index, total }`.
//!
//! # Example
//!
//! ```rust
//! use folio::chunking::CharacterSplitter;
//! use folio::core::config::ChunkingConfig;
//! use folio::plugins::TextSplitter;
//! use folio::Document;
//!
//! # fn example() -> folio::Result<()> {
//! let splitter = CharacterSplitter::new(ChunkingConfig { chunk_size: 40, chunk_overlap: 5 })?;
//!
//! let page = Document::new("This is a very long page of text. ".repeat(10));
//! let chunks = splitter.split_documents(vec![page])?;
//!
//! assert!(chunks.len() > 1);
//! assert!(chunks.iter().all(|c| c.page_content.chars().count() <= 40));
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
use crate::core::config::ChunkingConfig;
use crate::error::{FolioError, Result};
use crate::plugins::{Plugin, TextSplitter};
use crate::types::Document;
use serde_json::{Map, Value, json};
use text_splitter::{Characters, ChunkCapacity, ChunkConfig};

/// Character-count splitter with overlap.
pub struct CharacterSplitter {
    config: ChunkingConfig,
    splitter: text_splitter::TextSplitter<Characters>,
}

impl CharacterSplitter {
    /// Build a splitter.
    ///
    /// # Errors
    ///
    /// Returns `FolioError::Validation` if the chunk size is zero or the
    /// overlap is not smaller than the chunk size.
    pub fn new(config: ChunkingConfig) -> Result<Self> {
        let chunk_config = build_chunk_config(config.chunk_size, config.chunk_overlap)?;
        Ok(Self {
            config,
            splitter: text_splitter::TextSplitter::new(chunk_config),
        })
    }

    pub fn config(&self) -> ChunkingConfig {
        self.config
    }

    /// Split raw text into trimmed chunks. Empty text yields no chunks.
    pub fn split_text<'t>(&self, text: &'t str) -> Vec<&'t str> {
        if text.is_empty() {
            return Vec::new();
        }
        self.splitter.chunks(text).collect()
    }
}

impl std::fmt::Debug for CharacterSplitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CharacterSplitter")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

fn build_chunk_config(chunk_size: usize, chunk_overlap: usize) -> Result<ChunkConfig<Characters>> {
    if chunk_size == 0 {
        return Err(FolioError::validation("Invalid chunking configuration: chunk_size must be > 0"));
    }

    ChunkConfig::new(ChunkCapacity::new(chunk_size))
        .with_overlap(chunk_overlap)
        .map(|config| config.with_trim(true))
        .map_err(|e| FolioError::validation(format!("Invalid chunking configuration: {}", e)))
}

impl Plugin for CharacterSplitter {
    fn name(&self) -> &str {
        "character-splitter"
    }

    fn version(&self) -> String {
        env!("CARGO_PKG_VERSION").to_string()
    }

    fn description(&self) -> &str {
        "Splits documents into overlapping character windows"
    }
}

impl TextSplitter for CharacterSplitter {
    fn split_documents(&self, documents: Vec<Document>) -> Result<Vec<Document>> {
        let mut output = Vec::with_capacity(documents.len());

        for document in documents {
            let chunks = self.split_text(&document.page_content);
            let total = chunks.len();

            for (index, chunk) in chunks.into_iter().enumerate() {
                let mut metadata = document.metadata.clone();
                set_chunk_location(&mut metadata, index, total);
                output.push(Document::with_metadata(chunk, metadata));
            }
        }

        Ok(output)
    }
}

fn set_chunk_location(metadata: &mut Map<String, Value>, index: usize, total: usize) {
    let chunk = json!({ "index": index, "total": total });

    match metadata.get_mut("loc") {
        Some(Value::Object(loc)) => {
            loc.insert("chunk".to_string(), chunk);
        }
        _ => {
            metadata.insert("loc".to_string(), json!({ "chunk": chunk }));
        }
    }
}
