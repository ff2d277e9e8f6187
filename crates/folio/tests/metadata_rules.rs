//! Metadata merge and omission rules, applied through the loader.

mod helpers;

use folio::core::config::LoaderConfig;
use folio::{DirScratchSpace, Document, FolioError, MetadataInput, PdfLoader};
use helpers::*;
use serde_json::{Map, Value, json};
use std::sync::Arc;
use tempfile::TempDir;

async fn load(config: LoaderConfig) -> folio::Result<Vec<Document>> {
    let scratch = TempDir::new().unwrap();
    let loader = PdfLoader::new(Arc::new(RecordingBackend::new()))
        .with_scratch_space(Arc::new(DirScratchSpace::new(scratch.path())));

    let output = loader.load(&data_uri(b"one\x0ctwo"), &config).await?;
    Ok(output.into_documents().unwrap())
}

fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected object, got {other}"),
    }
}

#[tokio::test]
async fn test_no_rules_keeps_backend_metadata() {
    let docs = load(LoaderConfig::default()).await.unwrap();

    for doc in &docs {
        assert!(doc.metadata.contains_key("source"));
        assert!(doc.metadata.contains_key("pdf"));
        assert!(doc.metadata.contains_key("loc"));
    }
}

#[tokio::test]
async fn test_omit_all_replaces_with_additional_metadata() {
    let docs = load(LoaderConfig {
        metadata: Some(MetadataInput::from(r#"{"a":1}"#)),
        omit_metadata_keys: Some("*".to_string()),
        ..Default::default()
    })
    .await
    .unwrap();

    assert_eq!(docs.len(), 2);
    for doc in &docs {
        assert_eq!(Value::Object(doc.metadata.clone()), json!({"a": 1}));
    }
}

#[tokio::test]
async fn test_omit_all_without_additional_metadata_empties() {
    let docs = load(LoaderConfig {
        omit_metadata_keys: Some("*".to_string()),
        ..Default::default()
    })
    .await
    .unwrap();

    assert!(docs.iter().all(|doc| doc.metadata.is_empty()));
}

#[tokio::test]
async fn test_omit_source_keeps_everything_else() {
    let docs = load(LoaderConfig {
        omit_metadata_keys: Some("source".to_string()),
        ..Default::default()
    })
    .await
    .unwrap();

    for (index, doc) in docs.iter().enumerate() {
        assert!(!doc.metadata.contains_key("source"));
        assert_eq!(doc.metadata.get("loc"), Some(&json!({"pageNumber": index + 1})));
        assert_eq!(doc.metadata["pdf"]["totalPages"], json!(2));
    }
}

#[tokio::test]
async fn test_dotted_paths_remove_nested_keys() {
    let docs = load(LoaderConfig {
        omit_metadata_keys: Some(" pdf.info , loc.pageNumber ,".to_string()),
        ..Default::default()
    })
    .await
    .unwrap();

    for doc in &docs {
        assert_eq!(doc.metadata["pdf"], json!({"totalPages": 2}));
        assert_eq!(doc.metadata["loc"], json!({}));
    }
}

#[tokio::test]
async fn test_additional_metadata_overrides_then_omission_applies() {
    let additional = object(json!({"source": "s3://bucket/report.pdf", "team": "legal", "tmp": true}));
    let docs = load(LoaderConfig {
        metadata: Some(MetadataInput::Map(additional)),
        omit_metadata_keys: Some("tmp".to_string()),
        ..Default::default()
    })
    .await
    .unwrap();

    for doc in &docs {
        assert_eq!(doc.metadata["source"], json!("s3://bucket/report.pdf"));
        assert_eq!(doc.metadata["team"], json!("legal"));
        assert!(!doc.metadata.contains_key("tmp"));
        assert!(doc.metadata.contains_key("loc"));
    }
}

#[tokio::test]
async fn test_padded_star_is_an_ordinary_key() {
    let docs = load(LoaderConfig {
        omit_metadata_keys: Some(" *".to_string()),
        ..Default::default()
    })
    .await
    .unwrap();

    assert!(docs.iter().all(|doc| doc.metadata.contains_key("source")));
}

#[tokio::test]
async fn test_blank_metadata_string_is_absent() {
    let docs = load(LoaderConfig {
        metadata: Some(MetadataInput::from("   ")),
        omit_metadata_keys: Some("*".to_string()),
        ..Default::default()
    })
    .await
    .unwrap();

    assert!(docs.iter().all(|doc| doc.metadata.is_empty()));
}

#[tokio::test]
async fn test_non_object_metadata_is_malformed() {
    for raw in ["[1,2,3]", "\"text\"", "{broken"] {
        let err = load(LoaderConfig {
            metadata: Some(MetadataInput::from(raw)),
            ..Default::default()
        })
        .await
        .unwrap_err();

        assert!(matches!(err, FolioError::MalformedInput { .. }), "metadata {raw:?}");
    }
}
