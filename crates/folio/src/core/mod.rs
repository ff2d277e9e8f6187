//! Core loading orchestration module.
//!
//! This module contains the pipeline stages that are not pluggable, and the
//! [`PdfLoader`](loader::PdfLoader) that chains them:
//!
//! - **Source** (`source`): classification and resolution of the `source` field
//! - **Scratch** (`scratch`): temporary files handed to the PDF backend
//! - **Output** (`output`): final result shaping
//! - **Configuration** (`config`): per-call options, file loading and discovery
//!
//! # Example
//!
//! ```rust,no_run
//! use folio::core::config::LoaderConfig;
//! use folio::core::loader::PdfLoader;
//!
//! # async fn example() -> folio::Result<()> {
//! let config = LoaderConfig::discover()?.unwrap_or_default();
//! let output = PdfLoader::default().load("data:application/pdf;base64,JVBERi0...", &config).await?;
//! println!("{} documents", output.documents().map(|d| d.len()).unwrap_or(0));
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod loader;
pub mod output;
pub mod scratch;
pub mod source;

pub use config::{ChunkingConfig, LoaderConfig};
pub use loader::PdfLoader;
pub use output::format_output;
pub use source::SourceInput;
