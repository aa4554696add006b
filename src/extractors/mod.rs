// src/extractors/mod.rs
pub mod engine;
pub mod keywords;
pub mod numeric;
pub mod table;
pub mod text;

// Re-export key extraction types for convenience
pub use engine::{
    extract,
    extract_document,
    extract_findings,
    ExtractionReport,
    Finding,
    FindingSource,
    NumericContext,
};
pub use keywords::{AliasSet, KeywordTable, TargetQuantity};
