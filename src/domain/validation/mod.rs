//! Request validation
//!
//! Request types derive [`validator::Validate`]; [`validate_request`] turns
//! the collected failures into a flat, field-sorted list of
//! [`FieldError`]s carried by [`DomainError::Validation`].

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors, ValidationErrorsKind};

use crate::domain::DomainError;

/// A single field-level validation failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Validate a request, mapping failures to [`DomainError::Validation`]
pub fn validate_request<T: Validate>(request: &T) -> Result<(), DomainError> {
    request
        .validate()
        .map_err(|errors| DomainError::invalid_fields(collect_field_errors(&errors)))
}

/// Length check on the trimmed value, counted in characters
///
/// Used by `custom` validators so whitespace-only input cannot pass a
/// minimum length and then be stored empty.
pub fn validate_trimmed_length(
    value: &str,
    min: usize,
    max: usize,
    message: &'static str,
) -> Result<(), ValidationError> {
    let length = value.trim().chars().count();

    if (min..=max).contains(&length) {
        return Ok(());
    }

    let mut error = ValidationError::new("length");
    error.message = Some(message.into());
    Err(error)
}

/// Flatten validator output into `{field, message}` pairs
///
/// Nested structs and list items are reported with dotted / indexed paths
/// (`items[2].name`).
pub fn collect_field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut collected = Vec::new();
    flatten_into(None, errors, &mut collected);
    collected.sort_by(|a, b| a.field.cmp(&b.field));
    collected
}

fn flatten_into(parent: Option<&str>, errors: &ValidationErrors, out: &mut Vec<FieldError>) {
    for (field, kind) in errors.errors() {
        let path = match parent {
            Some(parent) => format!("{}.{}", parent, field),
            None => field.to_string(),
        };

        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                for error in field_errors {
                    let message = error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Invalid value for '{}' ({})", path, error.code));
                    out.push(FieldError::new(path.clone(), message));
                }
            }
            ValidationErrorsKind::Struct(nested) => flatten_into(Some(&path), nested, out),
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    let item_path = format!("{}[{}]", path, index);
                    flatten_into(Some(&item_path), nested, out);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Validate)]
    struct Invite {
        #[validate(length(min = 1, message = "Name is required"))]
        name: String,
        #[validate(email(message = "Invalid email address"))]
        email: String,
        #[validate(range(min = 1))]
        seats: u32,
    }

    #[test]
    fn test_valid_request_passes() {
        let invite = Invite {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            seats: 1,
        };

        assert!(validate_request(&invite).is_ok());
    }

    #[test]
    fn test_errors_are_sorted_by_field() {
        let invite = Invite {
            name: String::new(),
            email: "not-an-email".to_string(),
            seats: 1,
        };

        let error = validate_request(&invite).unwrap_err();
        let fields: Vec<&str> = error.field_errors().iter().map(|e| e.field.as_str()).collect();

        assert_eq!(fields, vec!["email", "name"]);
        assert_eq!(error.field_errors()[0].message, "Invalid email address");
        assert_eq!(error.field_errors()[1].message, "Name is required");
    }

    #[test]
    fn test_trimmed_length() {
        assert!(validate_trimmed_length(" Ada ", 2, 10, "bad").is_ok());
        assert!(validate_trimmed_length("Ünïcödé", 7, 7, "bad").is_ok());

        let error = validate_trimmed_length("    ", 1, 10, "Name is required").unwrap_err();
        assert_eq!(error.code, "length");
        assert_eq!(error.message.as_deref(), Some("Name is required"));

        assert!(validate_trimmed_length("abcdef", 1, 5, "too long").is_err());
    }

    #[test]
    fn test_missing_message_falls_back_to_code() {
        let invite = Invite {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            seats: 0,
        };

        let error = validate_request(&invite).unwrap_err();
        assert_eq!(error.field_errors().len(), 1);
        assert!(error.field_errors()[0].message.contains("range"));
    }
}
