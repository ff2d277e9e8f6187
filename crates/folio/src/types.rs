use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Metadata attached to a [`Document`].
///
/// Kept as an untyped JSON object: backends, splitters, and callers all add
/// arbitrary keys, and omission rules address them by dotted path.
pub type DocumentMetadata = Map<String, Value>;

/// A unit of extracted text plus its metadata mapping.
///
/// Backends produce one per page or one per file. Serializes with the field
/// name `pageContent` so records can be handed to JSON consumers as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Document {
    #[serde(rename = "pageContent")]
    pub page_content: String,
    #[serde(default)]
    pub metadata: DocumentMetadata,
}

impl Document {
    pub fn new(page_content: impl Into<String>) -> Self {
        Self {
            page_content: page_content.into(),
            metadata: Map::new(),
        }
    }

    pub fn with_metadata(page_content: impl Into<String>, metadata: DocumentMetadata) -> Self {
        Self {
            page_content: page_content.into(),
            metadata,
        }
    }
}

/// Page-splitting policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum Usage {
    /// One document per PDF page
    #[default]
    PerPage,
    /// One document per PDF file
    PerFile,
}

impl Usage {
    pub fn splits_pages(self) -> bool {
        matches!(self, Usage::PerPage)
    }
}

/// Shape of a load result. Does not affect extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OutputMode {
    #[default]
    Document,
    Text,
}

/// Result of a load call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LoaderOutput {
    Documents(Vec<Document>),
    Text(String),
}

impl LoaderOutput {
    pub fn documents(&self) -> Option<&[Document]> {
        match self {
            LoaderOutput::Documents(docs) => Some(docs),
            LoaderOutput::Text(_) => None,
        }
    }

    pub fn into_documents(self) -> Option<Vec<Document>> {
        match self {
            LoaderOutput::Documents(docs) => Some(docs),
            LoaderOutput::Text(_) => None,
        }
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            LoaderOutput::Text(text) => Some(text),
            LoaderOutput::Documents(_) => None,
        }
    }
}

/// Ambient identifiers needed to resolve storage references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageContext {
    pub org_id: String,
    pub flow_id: String,
}

impl StorageContext {
    pub fn new(org_id: impl Into<String>, flow_id: impl Into<String>) -> Self {
        Self {
            org_id: org_id.into(),
            flow_id: flow_id.into(),
        }
    }
}
