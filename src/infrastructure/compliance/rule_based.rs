//! Offline keyword checker
//!
//! Each standard is reduced to keywords: alphabetic words (minus filler such
//! as "regulation") and identifiers containing digits ("2023", "14001").
//! A standard is compliant when every word and at least one identifier
//! appear in a key or value of the product data. Keys whose value is `false`
//! or `null` count as an explicit declaration of non-compliance.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::DomainError;
use crate::domain::compliance::{
    ComplianceCheckInput, ComplianceCheckOutput, ComplianceChecker, ComplianceFinding,
    ComplianceStatus,
};

const STOPWORDS: &[&str] = &[
    "the",
    "and",
    "for",
    "with",
    "act",
    "law",
    "regulation",
    "regulations",
    "directive",
    "standard",
    "standards",
    "requirement",
    "requirements",
];

const MIN_WORD_LEN: usize = 3;
const MAX_EVIDENCE: usize = 5;

#[derive(Debug, Clone, Default)]
pub struct RuleBasedComplianceChecker;

impl RuleBasedComplianceChecker {
    pub fn new() -> Self {
        Self
    }

    fn evaluate(&self, standard: &str, index: &[IndexEntry]) -> ComplianceFinding {
        let keywords = Keywords::extract(standard);

        if keywords.is_empty() {
            return ComplianceFinding {
                standard: standard.to_string(),
                status: ComplianceStatus::NeedsReview,
                finding: format!("'{}' has no terms that can be checked automatically", standard),
                evidence_references: None,
            };
        }

        let word_hits: Vec<(&str, Vec<&IndexEntry>)> = keywords
            .words
            .iter()
            .map(|w| (w.as_str(), matches(index, w)))
            .collect();
        let id_hits: Vec<(&str, Vec<&IndexEntry>)> = keywords
            .identifiers
            .iter()
            .map(|id| (id.as_str(), matches(index, id)))
            .collect();

        let all_hits: Vec<&IndexEntry> = word_hits
            .iter()
            .chain(id_hits.iter())
            .flat_map(|(_, hits)| hits.iter().copied())
            .collect();

        if let Some(negated) = all_hits.iter().find(|e| e.negated) {
            return ComplianceFinding {
                standard: standard.to_string(),
                status: ComplianceStatus::NonCompliant,
                finding: format!(
                    "Product data declares '{}' as not met at {}",
                    standard, negated.pointer
                ),
                evidence_references: Some(vec![negated.pointer.clone()]),
            };
        }

        if all_hits.is_empty() {
            return ComplianceFinding {
                standard: standard.to_string(),
                status: ComplianceStatus::NonCompliant,
                finding: format!("No product data addresses '{}'", standard),
                evidence_references: None,
            };
        }

        let missing_words: Vec<&str> = word_hits
            .iter()
            .filter(|(_, hits)| hits.is_empty())
            .map(|(word, _)| *word)
            .collect();
        let id_satisfied = id_hits.is_empty() || id_hits.iter().any(|(_, hits)| !hits.is_empty());

        let evidence = Some(evidence(&all_hits));

        if missing_words.is_empty() && id_satisfied {
            return ComplianceFinding {
                standard: standard.to_string(),
                status: ComplianceStatus::Compliant,
                finding: format!("Product data references '{}'", standard),
                evidence_references: evidence,
            };
        }

        let mut missing: Vec<&str> = missing_words;
        if !id_satisfied {
            missing.extend(id_hits.iter().map(|(id, _)| *id));
        }

        ComplianceFinding {
            standard: standard.to_string(),
            status: ComplianceStatus::NeedsReview,
            finding: format!(
                "Partial match for '{}'; no data mentions: {}",
                standard,
                missing.join(", ")
            ),
            evidence_references: evidence,
        }
    }
}

#[async_trait]
impl ComplianceChecker for RuleBasedComplianceChecker {
    fn name(&self) -> &str {
        "rule_based"
    }

    async fn check(&self, input: &ComplianceCheckInput) -> Result<ComplianceCheckOutput, DomainError> {
        let product = input
            .product_json()
            .map_err(|e| DomainError::invalid_field("product_data", format!("Product data must be valid JSON: {}", e)))?;

        let mut index = Vec::new();
        index_value("", &product, &mut index);

        let findings = input
            .standards()
            .iter()
            .map(|standard| self.evaluate(standard, &index))
            .collect();

        Ok(ComplianceCheckOutput::from_findings(findings))
    }
}

#[derive(Debug, Default)]
struct Keywords {
    words: Vec<String>,
    identifiers: Vec<String>,
}

impl Keywords {
    fn extract(standard: &str) -> Self {
        let mut keywords = Self::default();

        for token in standard
            .split(|c: char| !c.is_alphanumeric())
            .map(str::to_lowercase)
            .filter(|t| !t.is_empty())
        {
            if token.chars().any(|c| c.is_ascii_digit()) {
                if token.len() >= 2 && !keywords.identifiers.contains(&token) {
                    keywords.identifiers.push(token);
                }
            } else if token.chars().count() >= MIN_WORD_LEN
                && !STOPWORDS.contains(&token.as_str())
                && !keywords.words.contains(&token)
            {
                keywords.words.push(token);
            }
        }

        keywords
    }

    fn is_empty(&self) -> bool {
        self.words.is_empty() && self.identifiers.is_empty()
    }
}

/// Searchable text at a JSON pointer
#[derive(Debug)]
struct IndexEntry {
    pointer: String,
    text: String,
    negated: bool,
}

fn index_value(pointer: &str, value: &Value, out: &mut Vec<IndexEntry>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let child_pointer = format!("{}/{}", pointer, escape_pointer(key));

                out.push(IndexEntry {
                    pointer: child_pointer.clone(),
                    text: key.to_lowercase(),
                    negated: matches!(child, Value::Bool(false) | Value::Null),
                });

                index_value(&child_pointer, child, out);
            }
        }
        Value::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                index_value(&format!("{}/{}", pointer, i), item, out);
            }
        }
        Value::String(s) => out.push(IndexEntry {
            pointer: pointer.to_string(),
            text: s.to_lowercase(),
            negated: false,
        }),
        Value::Number(n) => out.push(IndexEntry {
            pointer: pointer.to_string(),
            text: n.to_string(),
            negated: false,
        }),
        Value::Bool(_) | Value::Null => {}
    }
}

fn escape_pointer(key: &str) -> String {
    key.replace('~', "~0").replace('/', "~1")
}

fn matches<'a>(index: &'a [IndexEntry], keyword: &str) -> Vec<&'a IndexEntry> {
    index.iter().filter(|e| e.text.contains(keyword)).collect()
}

fn evidence(hits: &[&IndexEntry]) -> Vec<String> {
    let mut pointers: Vec<String> = Vec::new();

    for hit in hits {
        if pointers.len() == MAX_EVIDENCE {
            break;
        }
        if !pointers.contains(&hit.pointer) {
            pointers.push(hit.pointer.clone());
        }
    }

    pointers
}
