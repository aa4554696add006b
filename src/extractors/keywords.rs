// src/extractors/keywords.rs
use crate::utils::error::ConfigError;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

/// The five figures the default keyword table targets, in processing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetQuantity {
    Revenue,
    TotalAssets,
    TotalLiabilities,
    ProfitAfterTax,
    Ebitda,
}

impl TargetQuantity {
    pub const ALL: [TargetQuantity; 5] = [
        TargetQuantity::Revenue,
        TargetQuantity::TotalAssets,
        TargetQuantity::TotalLiabilities,
        TargetQuantity::ProfitAfterTax,
        TargetQuantity::Ebitda,
    ];

    /// Key used in the numeric context.
    pub fn as_str(self) -> &'static str {
        match self {
            TargetQuantity::Revenue => "revenue",
            TargetQuantity::TotalAssets => "total_assets",
            TargetQuantity::TotalLiabilities => "total_liabilities",
            TargetQuantity::ProfitAfterTax => "profit_after_tax",
            TargetQuantity::Ebitda => "ebitda",
        }
    }

    fn default_aliases(self) -> &'static [&'static str] {
        match self {
            TargetQuantity::Revenue => &["revenue", "sales", "total income", "net sales"],
            TargetQuantity::TotalAssets => &["total assets", "assets"],
            TargetQuantity::TotalLiabilities => &["total liabilities", "liabilities"],
            TargetQuantity::ProfitAfterTax => {
                &["profit after tax", "net profit", "profit for the period"]
            }
            TargetQuantity::Ebitda => &[
                "ebitda",
                "earnings before interest, tax, depreciation and amortisation",
            ],
        }
    }
}

/// Lowercases a label and collapses every whitespace run to a single space.
pub fn normalize_label(label: &str) -> String {
    label
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Ordered synonyms for one quantity. Aliases are stored normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasSet {
    aliases: Vec<String>,
}

impl AliasSet {
    pub fn new<I, S>(aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let aliases = aliases
            .into_iter()
            .map(|alias| normalize_label(alias.as_ref()))
            .filter(|alias| !alias.is_empty())
            .collect();
        Self { aliases }
    }

    /// True when any alias occurs inside the label, ignoring case and
    /// whitespace layout.
    pub fn matches(&self, label: &str) -> bool {
        let label = normalize_label(label);
        self.aliases.iter().any(|alias| label.contains(alias.as_str()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.aliases.iter().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct KeywordEntry {
    quantity: String,
    aliases: AliasSet,
}

#[derive(Debug, Deserialize)]
struct KeywordSpec {
    quantity: String,
    aliases: Vec<String>,
}

/// Quantity → alias table. Entry order is the processing order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordTable {
    entries: Vec<KeywordEntry>,
}

impl Default for KeywordTable {
    fn default() -> Self {
        let entries = TargetQuantity::ALL
            .iter()
            .map(|q| KeywordEntry {
                quantity: q.as_str().to_string(),
                aliases: AliasSet::new(q.default_aliases()),
            })
            .collect();
        Self { entries }
    }
}

impl KeywordTable {
    /// Builds a table from `(quantity, aliases)` pairs, rejecting empty names,
    /// duplicate quantities and quantities without a usable alias.
    pub fn new<Q: Into<String>>(
        entries: impl IntoIterator<Item = (Q, AliasSet)>,
    ) -> Result<Self, ConfigError> {
        let mut seen = HashSet::new();
        let mut validated = Vec::new();

        for (quantity, aliases) in entries {
            let quantity = quantity.into().trim().to_string();
            if quantity.is_empty() {
                return Err(ConfigError::EmptyQuantity);
            }
            if aliases.is_empty() {
                return Err(ConfigError::NoAliases(quantity));
            }
            if !seen.insert(quantity.clone()) {
                return Err(ConfigError::DuplicateQuantity(quantity));
            }
            validated.push(KeywordEntry { quantity, aliases });
        }

        Ok(Self { entries: validated })
    }

    /// Parses `[{"quantity": "..", "aliases": [".."]}, ..]`.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let specs: Vec<KeywordSpec> = serde_json::from_str(raw)?;
        Self::new(
            specs
                .into_iter()
                .map(|spec| (spec.quantity, AliasSet::new(spec.aliases))),
        )
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let table = Self::from_json(&raw)?;
        tracing::info!("Loaded {} keyword entries from {}", table.len(), path.display());
        Ok(table)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AliasSet)> {
        self.entries
            .iter()
            .map(|entry| (entry.quantity.as_str(), &entry.aliases))
    }

    pub fn aliases(&self, quantity: &str) -> Option<&AliasSet> {
        self.entries
            .iter()
            .find(|entry| entry.quantity == quantity)
            .map(|entry| &entry.aliases)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_order() {
        let table = KeywordTable::default();
        let order: Vec<&str> = table.iter().map(|(q, _)| q).collect();
        assert_eq!(
            order,
            vec!["revenue", "total_assets", "total_liabilities", "profit_after_tax", "ebitda"]
        );
        let revenue: Vec<&str> = table.aliases("revenue").unwrap().iter().collect();
        assert_eq!(revenue, vec!["revenue", "sales", "total income", "net sales"]);
    }

    #[test]
    fn test_alias_matching_ignores_case_and_whitespace() {
        let aliases = AliasSet::new(["Total  Assets"]);
        assert!(aliases.matches("TOTAL ASSETS"));
        assert!(aliases.matches("  total\n assets (note 4)"));
        assert!(!aliases.matches("total liabilities"));
    }

    #[test]
    fn test_alias_set_drops_blank_aliases() {
        let aliases = AliasSet::new(["  ", "", "Sales"]);
        assert_eq!(aliases.iter().collect::<Vec<_>>(), vec!["sales"]);
        assert!(AliasSet::new([" "]).is_empty());
    }

    #[test]
    fn test_from_json_preserves_order() {
        let raw = r#"[
            {"quantity": "ebitda", "aliases": ["EBITDA"]},
            {"quantity": "revenue", "aliases": ["Turnover", "revenue"]}
        ]"#;
        let table = KeywordTable::from_json(raw).expect("valid keyword file");
        let order: Vec<&str> = table.iter().map(|(q, _)| q).collect();
        assert_eq!(order, vec!["ebitda", "revenue"]);
        assert!(table.aliases("revenue").unwrap().matches("Group turnover"));
    }

    #[test]
    fn test_from_json_validation() {
        let dup = r#"[{"quantity": "revenue", "aliases": ["a"]}, {"quantity": "revenue", "aliases": ["b"]}]"#;
        assert!(matches!(
            KeywordTable::from_json(dup),
            Err(ConfigError::DuplicateQuantity(q)) if q == "revenue"
        ));

        let no_aliases = r#"[{"quantity": "revenue", "aliases": ["  "]}]"#;
        assert!(matches!(KeywordTable::from_json(no_aliases), Err(ConfigError::NoAliases(_))));

        let unnamed = r#"[{"quantity": " ", "aliases": ["sales"]}]"#;
        assert!(matches!(KeywordTable::from_json(unnamed), Err(ConfigError::EmptyQuantity)));

        assert!(matches!(KeywordTable::from_json("{}"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("keywords.json");
        std::fs::write(&path, r#"[{"quantity": "revenue", "aliases": ["sales"]}]"#).unwrap();

        let table = KeywordTable::load(&path).expect("load should succeed");
        assert_eq!(table.len(), 1);

        let missing = KeywordTable::load(&dir.path().join("nope.json"));
        assert!(matches!(missing, Err(ConfigError::Io { .. })));
    }
}
