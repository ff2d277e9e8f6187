//! Source field classification and resolution.
//!
//! A load call receives its PDFs through one opaque string. The string is
//! classified exactly once into a [`SourceInput`] and then resolved into raw
//! byte buffers, one per file, in input order:
//!
//! - `FILE-STORAGE::report.pdf` - a single storage key
//! - `FILE-STORAGE::["a.pdf","b.pdf"]` - several storage keys
//! - `data:application/pdf;base64,JVBERi0x...` - a single inline data URI
//! - `["data:...","data:..."]` - several inline data URIs
//!
//! Inline entries may carry a trailing `,filename:<name>` segment, which is
//! ignored.

use crate::plugins::FileStorage;
use crate::types::StorageContext;
use crate::{FolioError, Result};
use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};

/// Prefix marking a storage reference.
pub const STORAGE_PREFIX: &str = "FILE-STORAGE::";

const FILENAME_SEGMENT_PREFIX: &str = "filename:";

const BASE64_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Classified `source` field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceInput {
    /// Keys to fetch from file storage
    StorageRefs(Vec<String>),
    /// Data-URI strings carrying base64 PDF bytes
    InlineData(Vec<String>),
}

impl SourceInput {
    /// Classify a raw `source` string.
    ///
    /// A value whose (prefix-stripped) text starts with `[` is treated as a
    /// JSON array of strings; anything else is a single entry.
    ///
    /// # Errors
    ///
    /// Returns `FolioError::MalformedInput` if array-looking content is not a
    /// valid JSON array of strings.
    pub fn parse(raw: &str) -> Result<Self> {
        match raw.strip_prefix(STORAGE_PREFIX) {
            Some(rest) => Ok(Self::StorageRefs(parse_entries(rest, "storage reference")?)),
            None => Ok(Self::InlineData(parse_entries(raw, "inline data")?)),
        }
    }

    pub fn entries(&self) -> &[String] {
        match self {
            Self::StorageRefs(entries) | Self::InlineData(entries) => entries,
        }
    }

    pub fn is_storage(&self) -> bool {
        matches!(self, Self::StorageRefs(_))
    }

    /// Resolve every non-empty entry into raw bytes, preserving order.
    ///
    /// Inline data never touches `storage`. Storage references perform one
    /// fetch per key and propagate the first fetch error unchanged.
    ///
    /// # Errors
    ///
    /// - `FolioError::MalformedInput` for an inline entry that is not base64
    /// - `FolioError::Validation` for storage references without a storage
    ///   backend or storage context
    /// - whatever the storage backend returns for a failed fetch
    pub async fn resolve(
        &self,
        storage: Option<&dyn FileStorage>,
        context: Option<&StorageContext>,
    ) -> Result<Vec<Vec<u8>>> {
        match self {
            Self::InlineData(entries) => entries
                .iter()
                .filter(|entry| !entry.trim().is_empty())
                .map(|entry| decode_data_uri(entry))
                .collect(),
            Self::StorageRefs(keys) => {
                let storage = storage.ok_or_else(|| {
                    FolioError::validation("Source references file storage but no storage backend is configured")
                })?;
                let context = context.ok_or_else(|| {
                    FolioError::validation("Source references file storage but no storage context was supplied")
                })?;

                let mut buffers = Vec::with_capacity(keys.len());
                for key in keys.iter().filter(|key| !key.trim().is_empty()) {
                    tracing::debug!("Fetching '{}' from {}", key, storage.name());
                    buffers.push(storage.get_file(key, context).await?);
                }
                Ok(buffers)
            }
        }
    }
}

fn parse_entries(raw: &str, kind: &str) -> Result<Vec<String>> {
    if !raw.trim_start().starts_with('[') {
        return Ok(vec![raw.to_string()]);
    }

    serde_json::from_str::<Vec<String>>(raw.trim())
        .map_err(|e| FolioError::malformed_input_with_source(format!("Invalid {} list: {}", kind, e), e))
}

/// Decode the base64 payload of a data URI.
///
/// The segment before the first comma (scheme and media type) is dropped, as
/// is a trailing `filename:` segment. An entry without a comma is decoded
/// whole. ASCII whitespace inside the payload (MIME line wrapping) is skipped.
///
/// # Errors
///
/// Returns `FolioError::MalformedInput` if the payload is not valid base64.
pub fn decode_data_uri(entry: &str) -> Result<Vec<u8>> {
    let mut segments = entry.split(',');
    let head = segments.next().unwrap_or_default();
    let rest: Vec<&str> = segments
        .filter(|segment| !segment.starts_with(FILENAME_SEGMENT_PREFIX))
        .collect();

    let payload = match rest.as_slice() {
        [] => head,
        [payload] => payload,
        _ => {
            return Err(FolioError::malformed_input(format!(
                "Data URI has {} payload segments, expected 1",
                rest.len()
            )));
        }
    };

    let payload: String = payload.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    BASE64_LENIENT
        .decode(payload)
        .map_err(|e| FolioError::malformed_input_with_source("Inline data is not valid base64", e))
}
