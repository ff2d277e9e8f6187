//! Final result shaping.

use crate::text::unescape_control_sequences;
use crate::types::{Document, LoaderOutput, OutputMode};

/// Render the final document set in the requested shape.
///
/// `Document` returns the records unchanged. `Text` concatenates every
/// `page_content`, each followed by a newline, then turns literal `\n` and
/// `\t` sequences into real control characters.
pub fn format_output(documents: Vec<Document>, mode: OutputMode) -> LoaderOutput {
    match mode {
        OutputMode::Document => LoaderOutput::Documents(documents),
        OutputMode::Text => LoaderOutput::Text(render_text(&documents)),
    }
}

/// Text rendering used by [`OutputMode::Text`].
pub fn render_text(documents: &[Document]) -> String {
    let capacity = documents.iter().map(|doc| doc.page_content.len() + 1).sum();
    let mut text = String::with_capacity(capacity);
    for doc in documents {
        text.push_str(&doc.page_content);
        text.push('\n');
    }

    unescape_control_sequences(&text).into_owned()
}
