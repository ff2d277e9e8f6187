//! Text splitter trait.

use crate::Result;
use crate::plugins::Plugin;
use crate::types::Document;

/// Trait for splitting documents into smaller documents.
///
/// Splitters run on each file's backend output before it joins the
/// accumulator, so they only ever see documents from one file at a time.
/// Output order must follow input order.
pub trait TextSplitter: Plugin {
    fn split_documents(&self, documents: Vec<Document>) -> Result<Vec<Document>>;
}
