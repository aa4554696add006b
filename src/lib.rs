// src/lib.rs
//! Keyword-driven extraction of headline financial figures (revenue, total
//! assets, total liabilities, profit after tax, EBITDA) from the tables and
//! raw text of a financial statement document.
pub mod document;
pub mod extractors;
pub mod storage;
pub mod utils;

pub use document::{CellValue, ColumnId, SourceDocument, Table};
pub use extractors::{
    extract, extract_document, extract_findings, AliasSet, ExtractionReport, Finding,
    FindingSource, KeywordTable, NumericContext, TargetQuantity,
};
