// src/extractors/engine.rs
use crate::document::models::{ColumnId, SourceDocument, Table};
use crate::extractors::keywords::{AliasSet, KeywordTable};
use crate::extractors::table::scan_with_location;
use crate::extractors::text;
use serde::Serialize;
use std::collections::BTreeMap;

/// Extracted figures keyed by quantity name.
///
/// A quantity that could not be located has no key at all; an absent key
/// means "unknown" and must not be read as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct NumericContext {
    values: BTreeMap<String, f64>,
}

impl NumericContext {
    pub fn get(&self, quantity: &str) -> Option<f64> {
        self.values.get(quantity).copied()
    }

    pub fn contains(&self, quantity: &str) -> bool {
        self.values.contains_key(quantity)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn from_findings(findings: &[Finding]) -> Self {
        let values = findings
            .iter()
            .map(|f| (f.quantity.clone(), f.value))
            .collect();
        Self { values }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FindingSource {
    Table {
        table: usize,
        row: usize,
        label_column: ColumnId,
        value_column: ColumnId,
    },
    Text {
        alias: String,
        offset: usize,
    },
}

/// One located figure and where it came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Finding {
    pub quantity: String,
    pub value: f64,
    pub source: FindingSource,
}

/// Per-document result handed to storage and downstream consumers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractionReport {
    pub company: Option<String>,
    pub period: Option<String>,
    pub numeric_context: NumericContext,
    pub missing: Vec<String>,
    pub findings: Vec<Finding>,
}

/// Extracts one value per quantity of `keywords` from `tables`, falling back
/// to `text`. Never fails; unlocated quantities are simply absent.
pub fn extract(tables: &[Table], text: &str, keywords: &KeywordTable) -> NumericContext {
    NumericContext::from_findings(&extract_findings(tables, text, keywords))
}

/// Same search as [`extract`], keeping the location of every value.
/// Findings follow the keyword table order.
pub fn extract_findings(tables: &[Table], text: &str, keywords: &KeywordTable) -> Vec<Finding> {
    keywords
        .iter()
        .filter_map(|(quantity, aliases)| find_quantity(tables, text, quantity, aliases))
        .collect()
}

fn find_quantity(tables: &[Table], text: &str, quantity: &str, aliases: &AliasSet) -> Option<Finding> {
    // The first table with any hit wins; later tables are not consulted.
    let table_hit = tables
        .iter()
        .enumerate()
        .find_map(|(idx, table)| scan_with_location(table, aliases).map(|hit| (idx, hit)));

    if let Some((table_idx, hit)) = table_hit {
        tracing::debug!("Found {} = {} in table {} row {}", quantity, hit.value, table_idx, hit.row);
        return Some(Finding {
            quantity: quantity.to_string(),
            value: hit.value,
            source: FindingSource::Table {
                table: table_idx,
                row: hit.row,
                label_column: hit.label_column,
                value_column: hit.value_column,
            },
        });
    }

    match text::search(text, aliases) {
        Some(hit) => {
            tracing::debug!("Found {} = {} in text at char {}", quantity, hit.value, hit.offset);
            Some(Finding {
                quantity: quantity.to_string(),
                value: hit.value,
                source: FindingSource::Text { alias: hit.alias, offset: hit.offset },
            })
        }
        None => {
            tracing::debug!("No value located for {}", quantity);
            None
        }
    }
}

/// Runs the extraction over a loaded document and assembles its report.
pub fn extract_document(document: &SourceDocument, keywords: &KeywordTable) -> ExtractionReport {
    let tables = document.tables();
    let findings = extract_findings(&tables, &document.text, keywords);
    let numeric_context = NumericContext::from_findings(&findings);

    let missing = keywords
        .iter()
        .map(|(quantity, _)| quantity)
        .filter(|quantity| !numeric_context.contains(quantity))
        .map(str::to_string)
        .collect();

    ExtractionReport {
        company: document.company.clone(),
        period: document.period.clone(),
        numeric_context,
        missing,
        findings,
    }
}
