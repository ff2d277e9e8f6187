//! Bundled PDF backend.
//!
//! [`LopdfBackend`] is the default [`PdfBackend`](crate::plugins::PdfBackend):
//! a pure-Rust reader with no native library to link.
//!
//! # Example
//!
//! ```rust,no_run
//! use folio::pdf::LopdfBackend;
//! use folio::plugins::{PdfBackend, PdfLoadOptions};
//! use std::path::Path;
//!
//! # fn example() -> folio::Result<()> {
//! let options = PdfLoadOptions { split_pages: true, ..Default::default() };
//! let pages = LopdfBackend.load(Path::new("report.pdf"), &options)?;
//!
//! for page in &pages {
//!     println!("{:?}: {} chars", page.metadata.get("loc"), page.page_content.len());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Note
//!
//! This module requires the `pdf` feature.
#[cfg(feature = "pdf")]
pub mod backend;
#[cfg(feature = "pdf")]
pub mod error;
#[cfg(feature = "pdf")]
pub mod metadata;
#[cfg(feature = "pdf")]
pub mod text;

#[cfg(feature = "pdf")]
pub use backend::LopdfBackend;
#[cfg(feature = "pdf")]
pub use error::PdfError;
