//! DID request validation

use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::domain::validation::validate_trimmed_length;

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateDidRequest {
    #[validate(custom(function = "validate_alias"))]
    pub alias: String,

    /// Explicit DID; minted under the organization's did:web domain when absent
    #[serde(default)]
    pub did: Option<String>,

    /// Register the DID as pending instead of active
    #[serde(default)]
    pub pending: bool,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateDidAliasRequest {
    #[validate(custom(function = "validate_alias"))]
    pub alias: String,
}

fn validate_alias(alias: &str) -> Result<(), ValidationError> {
    validate_trimmed_length(alias, 1, 64, "Alias must be between 1 and 64 characters")
}

/// Lowercase alias reduced to `[a-z0-9-]`, used in minted did:web paths
pub fn slugify(value: &str) -> String {
    let mut slug = String::with_capacity(value.len());

    for c in value.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }

    slug.trim_end_matches('-').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::validation::validate_request;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Acme Batteries GmbH"), "acme-batteries-gmbh");
        assert_eq!(slugify("  --Main  Identity!! "), "main-identity");
        assert_eq!(slugify("***"), "");
    }

    #[test]
    fn test_alias_required() {
        let request = CreateDidRequest {
            alias: String::new(),
            did: None,
            pending: false,
        };

        let err = validate_request(&request).unwrap_err();
        assert_eq!(err.field_errors()[0].field, "alias");
    }

    #[test]
    fn test_blank_alias_rejected() {
        let request = CreateDidRequest {
            alias: "   ".to_string(),
            did: None,
            pending: false,
        };
        let err = validate_request(&request).unwrap_err();
        assert_eq!(err.field_errors()[0].field, "alias");

        let request = UpdateDidAliasRequest {
            alias: "\t ".to_string(),
        };
        assert!(validate_request(&request).is_err());
    }

    #[test]
    fn test_update_alias_length() {
        let request = UpdateDidAliasRequest {
            alias: "a".repeat(65),
        };
        assert!(validate_request(&request).is_err());
    }
}
