// src/document/loader.rs
use crate::document::models::SourceDocument;
use crate::utils::error::DocumentError;
use std::path::Path;

/// Reads a layout-step JSON document from disk.
///
/// Expected shape: `{"company": .., "period": .., "text": "..", "tables": [[[cell, ..], ..], ..]}`,
/// every field optional. A document with neither tables nor text is rejected.
pub async fn load_document(path: &Path) -> Result<SourceDocument, DocumentError> {
    let origin = path.display().to_string();
    tracing::info!("Loading document from: {}", origin);

    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| DocumentError::Io { path: origin.clone(), source })?;
    tracing::debug!("Read {} bytes from {}", raw.len(), origin);

    parse_document(&raw, &origin)
}

/// Parses a document from its JSON text. `origin` is only used in errors.
pub fn parse_document(raw: &str, origin: &str) -> Result<SourceDocument, DocumentError> {
    let document: SourceDocument = serde_json::from_str(raw)
        .map_err(|source| DocumentError::Parse { path: origin.to_string(), source })?;

    if document.is_empty() {
        tracing::warn!("Document {} contains no tables and no text", origin);
        return Err(DocumentError::Empty(origin.to_string()));
    }

    tracing::debug!(
        "Parsed document {}: {} tables, {} chars of text",
        origin,
        document.raw_tables.len(),
        document.text.chars().count()
    );
    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_document_with_tables() {
        let raw = r#"{
            "company": "Acme Ltd",
            "period": "FY2023",
            "text": "Annual report",
            "tables": [[["Item", "2023"], ["Revenue", "45,000"]]]
        }"#;
        let doc = parse_document(raw, "inline").expect("document should parse");
        assert_eq!(doc.company.as_deref(), Some("Acme Ltd"));
        assert_eq!(doc.period.as_deref(), Some("FY2023"));
        assert_eq!(doc.tables().len(), 1);
    }

    #[test]
    fn test_parse_document_rejects_empty() {
        let err = parse_document(r#"{"tables": [], "text": ""}"#, "blank.json").unwrap_err();
        assert!(matches!(err, DocumentError::Empty(ref p) if p == "blank.json"));
    }

    #[test]
    fn test_parse_document_reports_bad_json() {
        let err = parse_document("{not json", "broken.json").unwrap_err();
        assert!(matches!(err, DocumentError::Parse { .. }));
        assert!(err.to_string().contains("broken.json"));
    }

    #[test]
    fn test_load_document_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.json");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(br#"{"text": "Total Revenue 45,000"}"#).unwrap();

        let doc = tokio_test::block_on(load_document(&path)).expect("load should succeed");
        assert_eq!(doc.text, "Total Revenue 45,000");
    }

    #[test]
    fn test_load_document_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.json");
        let result = tokio_test::block_on(load_document(&path));
        assert!(matches!(result, Err(DocumentError::Io { .. })));
    }
}
