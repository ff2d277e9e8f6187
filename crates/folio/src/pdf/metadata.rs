//! Document-level and page-level metadata read with `lopdf`.

use lopdf::{Document, Object, ObjectId};
use serde_json::{Map, Value, json};

/// Document-level metadata shared by every record produced from one file.
///
/// Shape: `{ "version": "1.5", "info": { "Title": "..." }, "totalPages": 3 }`.
pub fn document_metadata(doc: &Document, total_pages: usize) -> Value {
    json!({
        "version": doc.version,
        "info": Value::Object(info_dictionary(doc)),
        "totalPages": total_pages,
    })
}

/// String entries of the trailer's `/Info` dictionary.
///
/// Non-string entries are skipped. A missing or broken `/Info` yields an
/// empty map.
pub fn info_dictionary(doc: &Document) -> Map<String, Value> {
    let mut info = Map::new();

    let Some(dict) = doc
        .trailer
        .get(b"Info")
        .ok()
        .and_then(|obj| resolve(doc, obj))
        .and_then(|obj| obj.as_dict().ok())
    else {
        return info;
    };

    for (key, value) in dict.iter() {
        if let Some(Object::String(bytes, _)) = resolve(doc, value) {
            info.insert(String::from_utf8_lossy(key).into_owned(), Value::String(decode_text(bytes)));
        }
    }

    info
}

/// Descriptors of the image XObjects drawn on one page.
///
/// Each entry is `{ "page", "width", "height", "filters" }`. Pages whose
/// resources cannot be read yield an empty list.
pub fn page_images(doc: &Document, page_number: u32, page_id: ObjectId) -> Vec<Value> {
    match doc.get_page_images(page_id) {
        Ok(images) => images
            .iter()
            .map(|image| {
                json!({
                    "page": page_number,
                    "width": image.width,
                    "height": image.height,
                    "filters": image.filters,
                })
            })
            .collect(),
        Err(e) => {
            tracing::debug!("Failed to read images on page {}: {}", page_number, e);
            Vec::new()
        }
    }
}

/// Decode a PDF text string: UTF-16BE with a byte-order mark, otherwise
/// treated as (approximately) UTF-8.
pub fn decode_text(bytes: &[u8]) -> String {
    match bytes {
        [0xFE, 0xFF, rest @ ..] => {
            let units = rest.chunks_exact(2).map(|pair| u16::from_be_bytes([pair[0], pair[1]]));
            char::decode_utf16(units)
                .map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER))
                .collect()
        }
        _ => String::from_utf8_lossy(bytes).into_owned(),
    }
}

fn resolve<'a>(doc: &'a Document, obj: &'a Object) -> Option<&'a Object> {
    match obj {
        Object::Reference(id) => doc.get_object(*id).ok(),
        other => Some(other),
    }
}
