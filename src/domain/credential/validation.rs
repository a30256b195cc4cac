//! Credential request validation

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use validator::Validate;

static DPP_ID_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9_-]{0,63}$").expect("valid regex"));

static CREDENTIAL_TYPE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z][A-Za-z0-9]{2,79}$").expect("valid regex"));

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct IssueCredentialRequest {
    /// VC type, e.g. `ProductComplianceCredential`
    #[validate(regex(
        path = *CREDENTIAL_TYPE_PATTERN,
        message = "Credential type must be a PascalCase name of 3 to 80 characters"
    ))]
    pub credential_type: String,

    #[validate(length(min = 1, message = "Issuer DID is required"))]
    pub issuer_did: String,

    #[validate(regex(
        path = *DPP_ID_PATTERN,
        message = "Product passport ID must be 1 to 64 letters, digits, '-' or '_'"
    ))]
    pub subject_dpp_id: String,

    /// Record the credential as pending instead of valid
    #[serde(default)]
    pub pending: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::validation::validate_request;

    fn request(credential_type: &str, subject: &str) -> IssueCredentialRequest {
        IssueCredentialRequest {
            credential_type: credential_type.to_string(),
            issuer_did: "did:web:norruva.com:acme".to_string(),
            subject_dpp_id: subject.to_string(),
            pending: false,
        }
    }

    #[test]
    fn test_valid_request() {
        assert!(validate_request(&request("ProductComplianceCredential", "DPP001")).is_ok());
        assert!(validate_request(&request("BatteryPassportCredential", "dpp_battery-42")).is_ok());
    }

    #[test]
    fn test_invalid_type_and_subject() {
        let err = validate_request(&request("compliance", "DPP 001")).unwrap_err();
        let fields: Vec<&str> = err.field_errors().iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["credential_type", "subject_dpp_id"]);
    }

    #[test]
    fn test_blank_type_and_subject_rejected() {
        let err = validate_request(&request("   ", "  ")).unwrap_err();
        assert_eq!(err.field_errors().len(), 2);
    }
}
