//! Error types for Folio.
//!
//! Every fallible operation in the crate returns [`FolioError`]. The variants map
//! one-to-one onto the stages of a load call:
//!
//! - `MalformedInput` - the `source` or `metadata` field could not be decoded
//!   (bad JSON in an array-looking field, bad base64 payload, non-object metadata)
//! - `StorageFetch` - the file-storage collaborator failed to return a referenced key
//! - `Extraction` - the PDF backend rejected the bytes, or its worker died
//! - `FileSystem` - the scratch file could not be created or written
//! - `Validation` - the loader was configured inconsistently
//!
//! # Error Handling Philosophy
//!
//! Raw `std::io::Error`s (a collaborator reading its input, the working directory
//! lookup in config discovery) bubble up unchanged as `FolioError::Io`. Errors raised
//! while handling a scratch file are wrapped into `FileSystem` with the path in the
//! message, so callers can tell scratch failures from everything else.
//!
//! Scratch cleanup failures are never returned. They are logged with
//! `tracing::warn!` and the primary result (success or error) wins.
//!
//! # Example
//!
//! ```rust
//! use folio::{FolioError, Result};
//!
//! fn parse_keys(raw: &str) -> Result<Vec<String>> {
//!     serde_json::from_str(raw)
//!         .map_err(|e| FolioError::malformed_input_with_source("source is not a JSON array", e))
//! }
//!
//! assert!(matches!(parse_keys("[oops"), Err(FolioError::MalformedInput { .. })));
//! ```
use thiserror::Error;

/// Result type alias using `FolioError`.
pub type Result<T> = std::result::Result<T, FolioError>;

/// Main error type for all Folio operations.
#[derive(Debug, Error)]
pub enum FolioError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed input: {message}")]
    MalformedInput {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Storage fetch error: {message}")]
    StorageFetch {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Extraction error: {message}")]
    Extraction {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("File system error: {message}")]
    FileSystem {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Validation error: {message}")]
    Validation {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

#[cfg(feature = "pdf")]
impl From<crate::pdf::error::PdfError> for FolioError {
    fn from(err: crate::pdf::error::PdfError) -> Self {
        FolioError::Extraction {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

macro_rules! error_constructor {
    ($name:ident, $variant:ident) => {
        pastey::paste! {
            #[doc = "Create a " $variant " error"]
            pub fn $name<S: Into<String>>(message: S) -> Self {
                Self::$variant {
                    message: message.into(),
                    source: None,
                }
            }

            #[doc = "Create a " $variant " error with source"]
            pub fn [<$name _with_source>]<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
                message: S,
                source: E,
            ) -> Self {
                Self::$variant {
                    message: message.into(),
                    source: Some(Box::new(source)),
                }
            }
        }
    };
}

impl FolioError {
    error_constructor!(malformed_input, MalformedInput);
    error_constructor!(storage_fetch, StorageFetch);
    error_constructor!(extraction, Extraction);
    error_constructor!(file_system, FileSystem);
    error_constructor!(validation, Validation);
}
