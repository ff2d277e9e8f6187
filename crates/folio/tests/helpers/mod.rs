//! Shared fixtures for integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use folio::plugins::{FileStorage, PdfBackend, PdfLoadOptions, Plugin};
use folio::types::{Document, DocumentMetadata, StorageContext};
use folio::{FolioError, Result};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Encode bytes as a `data:application/pdf;base64,...` URI.
pub fn data_uri(bytes: &[u8]) -> String {
    format!("data:application/pdf;base64,{}", STANDARD.encode(bytes))
}

/// Storage context used throughout the tests.
pub fn test_context() -> StorageContext {
    StorageContext::new("org-test", "flow-test")
}

/// Number of regular files currently in `dir`.
pub fn file_count(dir: &Path) -> usize {
    match std::fs::read_dir(dir) {
        Ok(entries) => entries.filter_map(|e| e.ok()).filter(|e| e.path().is_file()).count(),
        Err(_) => 0,
    }
}

/// In-memory file storage that records every fetch.
#[derive(Default)]
pub struct MemoryStorage {
    files: HashMap<String, Vec<u8>>,
    fetches: Mutex<Vec<String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, key: &str, bytes: impl Into<Vec<u8>>) -> Self {
        self.files.insert(key.to_string(), bytes.into());
        self
    }

    pub fn fetches(&self) -> Vec<String> {
        self.fetches.lock().unwrap().clone()
    }
}

impl Plugin for MemoryStorage {
    fn name(&self) -> &str {
        "memory-storage"
    }

    fn version(&self) -> String {
        "1.0.0".to_string()
    }
}

#[async_trait]
impl FileStorage for MemoryStorage {
    async fn get_file(&self, key: &str, context: &StorageContext) -> Result<Vec<u8>> {
        self.fetches.lock().unwrap().push(key.to_string());
        assert_eq!(context, &test_context(), "unexpected storage context");

        self.files
            .get(key)
            .cloned()
            .ok_or_else(|| FolioError::storage_fetch(format!("No stored file for key '{}'", key)))
    }
}

/// One call observed by [`RecordingBackend`].
#[derive(Debug, Clone)]
pub struct BackendCall {
    pub path: PathBuf,
    pub options: PdfLoadOptions,
    pub bytes: Vec<u8>,
}

/// Backend that treats its input as UTF-8 text with pages separated by form
/// feeds (`\x0c`), and records every call.
///
/// Input starting with `BROKEN` is rejected like an unreadable PDF.
#[derive(Default)]
pub struct RecordingBackend {
    calls: Mutex<Vec<BackendCall>>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<BackendCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl Plugin for RecordingBackend {
    fn name(&self) -> &str {
        "recording-backend"
    }

    fn version(&self) -> String {
        "1.0.0".to_string()
    }
}

impl PdfBackend for RecordingBackend {
    fn load(&self, path: &Path, options: &PdfLoadOptions) -> Result<Vec<Document>> {
        let bytes = std::fs::read(path)?;
        self.calls.lock().unwrap().push(BackendCall {
            path: path.to_path_buf(),
            options: options.clone(),
            bytes: bytes.clone(),
        });

        let text = String::from_utf8_lossy(&bytes).into_owned();
        if text.starts_with("BROKEN") {
            return Err(FolioError::extraction("Invalid PDF structure"));
        }

        let pages: Vec<&str> = text.split('\x0c').collect();
        let base = |extra: Option<Value>| {
            let mut metadata = DocumentMetadata::new();
            metadata.insert("source".to_string(), json!(path.display().to_string()));
            metadata.insert("pdf".to_string(), json!({ "totalPages": pages.len(), "info": {"Title": "Fixture"} }));
            if let Some(loc) = extra {
                metadata.insert("loc".to_string(), loc);
            }
            metadata
        };

        if options.split_pages {
            Ok(pages
                .iter()
                .enumerate()
                .map(|(i, page)| Document::with_metadata(*page, base(Some(json!({ "pageNumber": i + 1 })))))
                .collect())
        } else {
            Ok(vec![Document::with_metadata(pages.join("\n\n"), base(None))])
        }
    }
}

/// Build a real PDF with one text line per page.
#[cfg(feature = "pdf")]
pub fn build_pdf(pages: &[&str]) -> Vec<u8> {
    PdfFixture::new(pages).build()
}

/// Builder for small real PDFs produced with `lopdf`.
#[cfg(feature = "pdf")]
pub struct PdfFixture<'a> {
    pages: &'a [&'a str],
    title: Option<&'a str>,
    image: Option<(i64, i64)>,
    passwords: Option<(&'a str, &'a str)>,
}

#[cfg(feature = "pdf")]
impl<'a> PdfFixture<'a> {
    pub fn new(pages: &'a [&'a str]) -> Self {
        Self {
            pages,
            title: None,
            image: None,
            passwords: None,
        }
    }

    pub fn title(mut self, title: &'a str) -> Self {
        self.title = Some(title);
        self
    }

    /// Place one grayscale image XObject of the given size on every page.
    pub fn image(mut self, width: i64, height: i64) -> Self {
        self.image = Some((width, height));
        self
    }

    /// Encrypt with RC4 (V2, 128-bit) under the given owner and user passwords.
    pub fn encrypted(mut self, owner_password: &'a str, user_password: &'a str) -> Self {
        self.passwords = Some((owner_password, user_password));
        self
    }

    pub fn build(self) -> Vec<u8> {
        use lopdf::content::{Content, Operation};
        use lopdf::{Dictionary, Object, Stream, dictionary};

        let mut doc = lopdf::Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        });

        let image_id = self.image.map(|(width, height)| {
            doc.add_object(Stream::new(
                dictionary! {
                    "Type" => "XObject",
                    "Subtype" => "Image",
                    "Width" => width,
                    "Height" => height,
                    "ColorSpace" => "DeviceGray",
                    "BitsPerComponent" => 8,
                },
                vec![0u8; (width * height) as usize],
            ))
        });

        let mut kids = Vec::new();
        for text in self.pages {
            let content = Content {
                operations: vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 24.into()]),
                    Operation::new("Td", vec![72.into(), 700.into()]),
                    Operation::new("Tj", vec![Object::string_literal(*text)]),
                    Operation::new("ET", vec![]),
                ],
            };
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));

            let mut resources = Dictionary::new();
            resources.set("Font", dictionary! { "F1" => font_id });
            if let Some(image_id) = image_id {
                resources.set("XObject", dictionary! { "Im1" => image_id });
            }

            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
                "Resources" => resources,
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            });
            kids.push(Object::Reference(page_id));
        }

        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => self.pages.len() as i64,
            }),
        );

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        if let Some(title) = self.title {
            let info_id = doc.add_object(dictionary! {
                "Title" => Object::string_literal(title),
                "Producer" => Object::string_literal("folio tests"),
            });
            doc.trailer.set("Info", info_id);
        }

        if let Some((owner_password, user_password)) = self.passwords {
            let id = Object::string_literal(b"folio-fixture-id".to_vec());
            doc.trailer.set("ID", vec![id.clone(), id]);

            let state = lopdf::EncryptionState::try_from(lopdf::EncryptionVersion::V2 {
                document: &doc,
                owner_password,
                user_password,
                key_length: 128,
                permissions: lopdf::Permissions::PRINTABLE,
            })
            .unwrap();
            doc.encrypt(&state).unwrap();
        }

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).unwrap();
        bytes
    }
}
