//! Metadata merging and key omission.
//!
//! After extraction, every document's metadata is rewritten by one
//! [`MetadataDirective`], built from the caller's `metadata` and
//! `omit_metadata_keys` fields:
//!
//! - `omit_metadata_keys == "*"` (exactly, untrimmed): metadata becomes a copy
//!   of the additional metadata, or empty when there is none
//! - otherwise: additional metadata is shallow-merged over the extracted
//!   metadata, then every listed key is removed. Keys may be dotted paths into
//!   nested objects (`pdf.info` removes `info` inside `pdf`).
//!
//! # Example
//!
//! ```rust
//! use folio::metadata::{MetadataDirective, MetadataInput};
//! use folio::Document;
//! use serde_json::json;
//!
//! # fn main() -> folio::Result<()> {
//! let extra = MetadataInput::Json(r#"{"team": "legal"}"#.to_string());
//! let directive = MetadataDirective::new(Some(&extra), Some("source, pdf.info"))?;
//!
//! let mut doc = Document::new("page text");
//! doc.metadata.insert("source".into(), json!("/tmp/x.pdf"));
//! doc.metadata.insert("pdf".into(), json!({"info": {}, "totalPages": 2}));
//!
//! let mut docs = vec![doc];
//! directive.apply(&mut docs);
//! assert_eq!(
//!     serde_json::Value::Object(docs[0].metadata.clone()),
//!     json!({"team": "legal", "pdf": {"totalPages": 2}})
//! );
//! # Ok(())
//! # }
//! ```

use crate::types::{Document, DocumentMetadata};
use crate::{FolioError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Raw omission value meaning "discard all extracted metadata".
pub const OMIT_ALL: &str = "*";

/// Additional metadata as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetadataInput {
    /// Already-parsed mapping
    Map(DocumentMetadata),
    /// JSON text still to be parsed
    Json(String),
}

impl MetadataInput {
    /// Parse into a mapping.
    ///
    /// Blank JSON text counts as absent and yields `None`.
    ///
    /// # Errors
    ///
    /// Returns `FolioError::MalformedInput` if the text is not valid JSON or
    /// does not describe a JSON object.
    pub fn parse(&self) -> Result<Option<DocumentMetadata>> {
        match self {
            MetadataInput::Map(map) => Ok(Some(map.clone())),
            MetadataInput::Json(text) if text.trim().is_empty() => Ok(None),
            MetadataInput::Json(text) => match serde_json::from_str::<Value>(text) {
                Ok(Value::Object(map)) => Ok(Some(map)),
                Ok(other) => Err(FolioError::malformed_input(format!(
                    "Additional metadata must be a JSON object, got {}",
                    json_type_name(&other)
                ))),
                Err(e) => Err(FolioError::malformed_input_with_source(
                    format!("Additional metadata is not valid JSON: {}", e),
                    e,
                )),
            },
        }
    }
}

impl From<DocumentMetadata> for MetadataInput {
    fn from(map: DocumentMetadata) -> Self {
        MetadataInput::Map(map)
    }
}

impl From<String> for MetadataInput {
    fn from(text: String) -> Self {
        MetadataInput::Json(text)
    }
}

impl From<&str> for MetadataInput {
    fn from(text: &str) -> Self {
        MetadataInput::Json(text.to_string())
    }
}

/// Parsed metadata rules, applied identically to every document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetadataDirective {
    additional: Option<DocumentMetadata>,
    omit_keys: Vec<String>,
    omit_all: bool,
}

impl MetadataDirective {
    /// Build a directive from the caller's raw fields.
    ///
    /// # Errors
    ///
    /// Returns `FolioError::MalformedInput` if `metadata` is JSON text that
    /// does not parse to an object.
    pub fn new(metadata: Option<&MetadataInput>, omit_metadata_keys: Option<&str>) -> Result<Self> {
        let additional = match metadata {
            Some(input) => input.parse()?,
            None => None,
        };

        let raw_omit = omit_metadata_keys.unwrap_or_default();

        Ok(Self {
            additional,
            omit_keys: parse_omit_keys(raw_omit),
            omit_all: raw_omit == OMIT_ALL,
        })
    }

    pub fn additional(&self) -> Option<&DocumentMetadata> {
        self.additional.as_ref()
    }

    pub fn omit_keys(&self) -> &[String] {
        &self.omit_keys
    }

    pub fn omits_all(&self) -> bool {
        self.omit_all
    }

    /// True when applying the directive cannot change any document.
    pub fn is_noop(&self) -> bool {
        !self.omit_all && self.additional.is_none() && self.omit_keys.is_empty()
    }

    /// Rewrite the metadata of every document in place.
    pub fn apply(&self, documents: &mut [Document]) {
        if self.is_noop() {
            return;
        }

        for document in documents.iter_mut() {
            self.apply_one(&mut document.metadata);
        }
    }

    fn apply_one(&self, metadata: &mut DocumentMetadata) {
        if self.omit_all {
            *metadata = self.additional.clone().unwrap_or_default();
            return;
        }

        if let Some(additional) = &self.additional {
            for (key, value) in additional {
                metadata.insert(key.clone(), value.clone());
            }
        }

        for key in &self.omit_keys {
            remove_path(metadata, key);
        }
    }
}

/// Split a comma-separated omission list into trimmed, non-empty keys.
pub fn parse_omit_keys(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .map(str::to_string)
        .collect()
}

/// Remove a possibly dotted key path from a metadata map.
///
/// `a.b.c` walks into the object at `a`, then `b`, and removes `c` there.
/// An exact top-level key containing dots wins over path traversal. Missing
/// segments and non-object intermediates leave the map untouched.
///
/// Returns the removed value, if any.
pub fn remove_path(map: &mut DocumentMetadata, path: &str) -> Option<Value> {
    if let Some(removed) = map.remove(path) {
        return Some(removed);
    }

    let (head, tail) = path.split_once('.')?;
    match map.get_mut(head)? {
        Value::Object(child) => remove_path(child, tail),
        _ => None,
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
