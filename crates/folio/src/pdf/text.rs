//! Page text extraction.

use super::error::{PdfError, Result};
use lopdf::Document;
use std::collections::BTreeMap;
use std::path::Path;

/// Open a PDF for extraction.
///
/// `lopdf` decrypts documents with an empty user password while loading and
/// keeps `/Encrypt` in the trailer. Only documents it could not decrypt are
/// rejected.
pub fn open_document(path: &Path) -> Result<Document> {
    let doc = Document::load(path)?;

    if doc.is_encrypted() && doc.encryption_state.is_none() {
        return Err(PdfError::PasswordRequired);
    }

    Ok(doc)
}

/// Text of a single page.
///
/// Pages whose content streams cannot be decoded yield an empty string.
pub fn page_text(doc: &Document, page_number: u32) -> String {
    match doc.extract_text(&[page_number]) {
        Ok(text) => text.trim_end().to_string(),
        Err(e) => {
            tracing::debug!("Failed to extract text from page {}: {}", page_number, e);
            String::new()
        }
    }
}

/// Text of every page, keyed by 1-based page number in ascending order.
pub fn page_texts(doc: &Document) -> BTreeMap<u32, String> {
    doc.get_pages()
        .keys()
        .map(|&page_number| (page_number, page_text(doc, page_number)))
        .collect()
}

/// Whole-document text: page texts joined by a blank line.
pub fn document_text(doc: &Document) -> String {
    page_texts(doc).into_values().collect::<Vec<_>>().join("\n\n")
}
