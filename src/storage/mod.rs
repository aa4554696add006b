// src/storage/mod.rs
use std::fs;
use std::path::{Path, PathBuf};
use crate::extractors::engine::ExtractionReport;
use crate::utils::error::StorageError;

const UNKNOWN_COMPANY: &str = "UNKNOWN";
const UNKNOWN_PERIOD: &str = "unspecified";

pub struct StorageManager {
    base_dir: PathBuf,
}

impl StorageManager {
    /// Creates a new StorageManager with the specified base directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self, StorageError> {
        let base_path = base_dir.as_ref().to_path_buf();

        // Create the base directory if it doesn't exist
        if !base_path.exists() {
            fs::create_dir_all(&base_path)
                .map_err(StorageError::IoError)?;
        }

        Ok(Self { base_dir: base_path })
    }

    /// Directory for one report: /base_dir/COMPANY/period/
    /// Falls back to the source file stem when the document names no company.
    pub fn report_dir(&self, report: &ExtractionReport, source: &Path) -> PathBuf {
        let company = report
            .company
            .as_deref()
            .map(str::to_string)
            .or_else(|| source.file_stem().map(|s| s.to_string_lossy().into_owned()))
            .unwrap_or_else(|| UNKNOWN_COMPANY.to_string());
        let period = report.period.as_deref().unwrap_or(UNKNOWN_PERIOD);

        self.base_dir
            .join(sanitize_component(&company.to_uppercase()))
            .join(sanitize_component(period))
    }

    /// Saves the full report (numeric context plus findings) as JSON
    pub fn save_report(&self, report: &ExtractionReport, source: &Path) -> Result<PathBuf, StorageError> {
        let target_dir = self.ensure_dir(report, source)?;
        let file_path = target_dir.join("numeric_context.json");

        let body = serde_json::to_string_pretty(report)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;
        fs::write(&file_path, body)
            .map_err(StorageError::IoError)?;

        tracing::info!("Saved report to {}", file_path.display());
        Ok(file_path)
    }

    /// Saves metadata about the extraction run in JSON format
    pub fn save_report_metadata(&self, report: &ExtractionReport, source: &Path) -> Result<PathBuf, StorageError> {
        let target_dir = self.ensure_dir(report, source)?;
        let file_path = target_dir.join("numeric_context_meta.json");

        // Findings are in keyword-table order, the same order as `missing`.
        let found: Vec<&str> = report.findings.iter().map(|f| f.quantity.as_str()).collect();
        let metadata = serde_json::json!({
            "source": source.display().to_string(),
            "company": report.company,
            "period": report.period,
            "quantities_found": found,
            "quantities_missing": report.missing,
            "extraction_timestamp": chrono::Utc::now().to_rfc3339(),
        });

        let metadata_str = serde_json::to_string_pretty(&metadata)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;
        fs::write(&file_path, metadata_str)
            .map_err(StorageError::IoError)?;

        tracing::info!("Saved metadata to {}", file_path.display());
        Ok(file_path)
    }

    fn ensure_dir(&self, report: &ExtractionReport, source: &Path) -> Result<PathBuf, StorageError> {
        let target_dir = self.report_dir(report, source);
        if !target_dir.exists() {
            fs::create_dir_all(&target_dir)
                .map_err(StorageError::IoError)?;
        }
        Ok(target_dir)
    }
}

// Company names and periods come from document content; keep them to a single path segment.
fn sanitize_component(raw: &str) -> String {
    let cleaned: String = raw
        .trim()
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' || c == '.' { c } else { '_' })
        .collect();
    if cleaned.is_empty() || cleaned.chars().all(|c| c == '.') {
        "_".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::engine::extract_document;
    use crate::extractors::keywords::KeywordTable;
    use crate::document::models::SourceDocument;

    fn sample_report(company: Option<&str>) -> ExtractionReport {
        report_for_text(company, "Total Revenue 45,000")
    }

    fn report_for_text(company: Option<&str>, text: &str) -> ExtractionReport {
        let document = SourceDocument {
            company: company.map(str::to_string),
            period: Some("FY2023".to_string()),
            text: text.to_string(),
            raw_tables: Vec::new(),
        };
        extract_document(&document, &KeywordTable::default())
    }

    #[test]
    fn test_save_report_and_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let storage = StorageManager::new(dir.path().join("out")).unwrap();
        let report = sample_report(Some("Acme Ltd"));
        let source = Path::new("/tmp/acme.json");

        let report_path = storage.save_report(&report, source).unwrap();
        assert_eq!(
            report_path,
            dir.path().join("out").join("ACME_LTD").join("FY2023").join("numeric_context.json")
        );
        let saved: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&report_path).unwrap()).unwrap();
        assert_eq!(saved["numeric_context"], serde_json::json!({"revenue": 45000.0}));

        let meta_path = storage.save_report_metadata(&report, source).unwrap();
        let meta: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&meta_path).unwrap()).unwrap();
        assert_eq!(meta["quantities_found"], serde_json::json!(["revenue"]));
        assert_eq!(meta["quantities_missing"].as_array().unwrap().len(), 4);
        assert!(meta["extraction_timestamp"].is_string());
    }

    #[test]
    fn test_metadata_lists_follow_keyword_order() {
        let dir = tempfile::tempdir().unwrap();
        let storage = StorageManager::new(dir.path()).unwrap();
        let report = report_for_text(Some("Acme"), "Total Revenue 45,000 EBITDA 9,000 Total assets 5,000");

        let meta_path = storage.save_report_metadata(&report, Path::new("acme.json")).unwrap();
        let meta: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&meta_path).unwrap()).unwrap();
        assert_eq!(
            meta["quantities_found"],
            serde_json::json!(["revenue", "total_assets", "ebitda"])
        );
        assert_eq!(
            meta["quantities_missing"],
            serde_json::json!(["total_liabilities", "profit_after_tax"])
        );
    }

    #[test]
    fn test_report_dir_falls_back_to_file_stem() {
        let dir = tempfile::tempdir().unwrap();
        let storage = StorageManager::new(dir.path()).unwrap();
        let report = sample_report(None);

        let target = storage.report_dir(&report, Path::new("docs/annual-report.json"));
        assert_eq!(target, dir.path().join("ANNUAL-REPORT").join("FY2023"));
    }

    #[test]
    fn test_sanitize_component() {
        assert_eq!(sanitize_component("../etc"), ".._etc");
        assert_eq!(sanitize_component(".."), "_");
        assert_eq!(sanitize_component("Q1/2024"), "Q1_2024");
    }
}
