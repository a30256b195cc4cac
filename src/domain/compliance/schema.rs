//! Compliance check input and output schema

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Outcome for a single standard or the check as a whole
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceStatus {
    Compliant,
    NonCompliant,
    NeedsReview,
}

impl ComplianceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Compliant => "compliant",
            Self::NonCompliant => "non_compliant",
            Self::NeedsReview => "needs_review",
        }
    }
}

impl std::fmt::Display for ComplianceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Product data plus the standards to score it against
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceCheckInput {
    /// Product passport data as a JSON document
    #[validate(custom(function = "validate_product_json"))]
    #[serde(default, alias = "product_data")]
    pub product_data: String,

    /// One standard per line, or comma separated
    #[validate(custom(function = "validate_standards"))]
    #[serde(default, alias = "compliance_standards")]
    pub compliance_standards: String,
}

impl ComplianceCheckInput {
    pub fn new(product_data: impl Into<String>, compliance_standards: impl Into<String>) -> Self {
        Self {
            product_data: product_data.into(),
            compliance_standards: compliance_standards.into(),
        }
    }

    /// Parsed product data; only fails on input that skipped validation
    pub fn product_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::from_str(&self.product_data)
    }

    pub fn standards(&self) -> Vec<String> {
        parse_standards(&self.compliance_standards)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceFinding {
    pub standard: String,
    pub status: ComplianceStatus,
    pub finding: String,
    /// JSON pointers or free-text references into the product data
    #[serde(
        default,
        alias = "evidence_references",
        skip_serializing_if = "Option::is_none"
    )]
    pub evidence_references: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceCheckOutput {
    #[serde(alias = "overall_status")]
    pub overall_status: ComplianceStatus,
    pub summary: String,
    pub findings: Vec<ComplianceFinding>,
}

impl ComplianceCheckOutput {
    /// Output whose overall status and summary are derived from the findings
    pub fn from_findings(findings: Vec<ComplianceFinding>) -> Self {
        Self {
            overall_status: overall_status(&findings),
            summary: summarize(&findings),
            findings,
        }
    }
}

/// Split free text into standards, dropping blanks and repeats
pub fn parse_standards(text: &str) -> Vec<String> {
    let mut standards: Vec<String> = Vec::new();

    for candidate in text.split(['\n', ',', ';']) {
        let standard = candidate.trim().trim_start_matches(['-', '*']).trim();

        if standard.is_empty() {
            continue;
        }

        if !standards.iter().any(|s| s.eq_ignore_ascii_case(standard)) {
            standards.push(standard.to_string());
        }
    }

    standards
}

/// Non-compliant if any finding is, otherwise needs review if any finding
/// does or there are none, otherwise compliant
pub fn overall_status(findings: &[ComplianceFinding]) -> ComplianceStatus {
    if findings.is_empty() {
        return ComplianceStatus::NeedsReview;
    }

    if findings.iter().any(|f| f.status == ComplianceStatus::NonCompliant) {
        ComplianceStatus::NonCompliant
    } else if findings.iter().any(|f| f.status == ComplianceStatus::NeedsReview) {
        ComplianceStatus::NeedsReview
    } else {
        ComplianceStatus::Compliant
    }
}

pub fn summarize(findings: &[ComplianceFinding]) -> String {
    let count = |status: ComplianceStatus| findings.iter().filter(|f| f.status == status).count();

    format!(
        "Checked {} standard(s): {} compliant, {} non-compliant, {} needing review.",
        findings.len(),
        count(ComplianceStatus::Compliant),
        count(ComplianceStatus::NonCompliant),
        count(ComplianceStatus::NeedsReview),
    )
}

fn validate_product_json(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(validation_error("product_data", "Product data is required".to_string()));
    }

    match serde_json::from_str::<serde_json::Value>(value) {
        Ok(_) => Ok(()),
        Err(e) => Err(validation_error(
            "product_data",
            format!("Product data must be valid JSON: {}", e),
        )),
    }
}

fn validate_standards(value: &str) -> Result<(), ValidationError> {
    if parse_standards(value).is_empty() {
        return Err(validation_error(
            "compliance_standards",
            "At least one compliance standard is required".to_string(),
        ));
    }
    Ok(())
}

fn validation_error(code: &'static str, message: String) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(message.into());
    error
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::validation::validate_request;

    fn finding(status: ComplianceStatus) -> ComplianceFinding {
        ComplianceFinding {
            standard: "ESPR".to_string(),
            status,
            finding: String::new(),
            evidence_references: None,
        }
    }

    #[test]
    fn test_parse_standards() {
        let standards = parse_standards("EU Battery Regulation\n- ESPR, RoHS\n\nrohs ; REACH");
        assert_eq!(standards, vec!["EU Battery Regulation", "ESPR", "RoHS", "REACH"]);
    }

    #[test]
    fn test_parse_standards_empty() {
        assert!(parse_standards(" \n , ").is_empty());
    }

    #[test]
    fn test_overall_status() {
        use ComplianceStatus::*;

        assert_eq!(overall_status(&[]), NeedsReview);
        assert_eq!(overall_status(&[finding(Compliant), finding(Compliant)]), Compliant);
        assert_eq!(overall_status(&[finding(Compliant), finding(NeedsReview)]), NeedsReview);
        assert_eq!(
            overall_status(&[finding(NeedsReview), finding(NonCompliant)]),
            NonCompliant
        );
    }

    #[test]
    fn test_summary() {
        let output = ComplianceCheckOutput::from_findings(vec![
            finding(ComplianceStatus::Compliant),
            finding(ComplianceStatus::NonCompliant),
        ]);

        assert_eq!(output.overall_status, ComplianceStatus::NonCompliant);
        assert_eq!(
            output.summary,
            "Checked 2 standard(s): 1 compliant, 1 non-compliant, 0 needing review."
        );
    }

    #[test]
    fn test_input_validation() {
        let input = ComplianceCheckInput::new(r#"{"name":"Battery"}"#, "RoHS");
        assert!(validate_request(&input).is_ok());

        let input = ComplianceCheckInput::new("{not json", "");
        let error = validate_request(&input).unwrap_err();
        let fields: Vec<&str> = error.field_errors().iter().map(|e| e.field.as_str()).collect();

        assert_eq!(fields, vec!["compliance_standards", "product_data"]);
        assert!(error.field_errors()[1].message.starts_with("Product data must be valid JSON"));
    }

    #[test]
    fn test_input_accepts_both_casings() {
        let camel: ComplianceCheckInput = serde_json::from_str(
            r#"{"productData":"{}","complianceStandards":"RoHS"}"#,
        )
        .unwrap();
        let snake: ComplianceCheckInput = serde_json::from_str(
            r#"{"product_data":"{}","compliance_standards":"RoHS"}"#,
        )
        .unwrap();

        assert_eq!(camel.compliance_standards, snake.compliance_standards);
    }

    #[test]
    fn test_output_serialization() {
        let output = ComplianceCheckOutput::from_findings(vec![ComplianceFinding {
            standard: "RoHS".to_string(),
            status: ComplianceStatus::Compliant,
            finding: "Declared".to_string(),
            evidence_references: Some(vec!["/rohs".to_string()]),
        }]);

        let json = serde_json::to_value(&output).unwrap();
        assert_eq!(json["overallStatus"], "compliant");
        assert_eq!(json["findings"][0]["evidenceReferences"][0], "/rohs");
    }
}
