//! API key request validation

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use validator::{Validate, ValidationError};

static PERMISSION_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z][a-z_]*:(read|write|admin|\*)$").expect("valid regex"));

/// Longest allowed lifetime of a key
pub const MAX_EXPIRY_DAYS: u32 = 365;

/// Input of the create action
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateApiKeyRequest {
    #[validate(length(min = 3, max = 50, message = "Key name must be between 3 and 50 characters"))]
    pub name: String,

    #[validate(
        length(min = 1, message = "At least one permission is required"),
        custom(function = "validate_permissions")
    )]
    pub permissions: Vec<String>,

    #[validate(range(min = 1, max = 365, message = "Expiry must be between 1 and 365 days"))]
    #[serde(default)]
    pub expires_in_days: Option<u32>,
}

/// Check a single permission string (`<resource>:<read|write|admin|*>`)
pub fn validate_permission(permission: &str) -> bool {
    PERMISSION_PATTERN.is_match(permission)
}

fn validate_permissions(permissions: &[String]) -> Result<(), ValidationError> {
    match permissions.iter().find(|p| !validate_permission(p)) {
        Some(invalid) => {
            let mut error = ValidationError::new("permission_format");
            error.message = Some(
                format!(
                    "Invalid permission '{}', expected '<resource>:<read|write|admin|*>'",
                    invalid
                )
                .into(),
            );
            Err(error)
        }
        None => Ok(()),
    }
}
