use thiserror::Error;

use super::validation::FieldError;

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Validation error: {message}")]
    Validation {
        message: String,
        errors: Vec<FieldError>,
    },

    #[error("Conflict: {message}")]
    Conflict { message: String },

    /// The entity is already in a state the operation cannot leave or repeat
    #[error("Invalid state: {message}")]
    InvalidState { message: String },

    #[error("Provider error: {provider} - {message}")]
    Provider { provider: String, message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    /// Validation failure without field-level detail
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            errors: Vec::new(),
        }
    }

    /// Validation failure on a single field
    pub fn invalid_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        let error = FieldError::new(field, message);

        Self::Validation {
            message: error.message.clone(),
            errors: vec![error],
        }
    }

    pub fn invalid_fields(errors: Vec<FieldError>) -> Self {
        let message = match errors.len() {
            0 => "Invalid input".to_string(),
            1 => errors[0].message.clone(),
            n => format!("Invalid input: {} fields failed validation", n),
        };

        Self::Validation { message, errors }
    }

    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState {
            message: message.into(),
        }
    }

    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Provider {
            provider: provider.into(),
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Human-readable message without the variant prefix
    pub fn message(&self) -> String {
        match self {
            Self::NotFound { message }
            | Self::Validation { message, .. }
            | Self::Conflict { message }
            | Self::InvalidState { message }
            | Self::Configuration { message }
            | Self::Internal { message } => message.clone(),
            Self::Provider { provider, message } => format!("{}: {}", provider, message),
        }
    }

    /// Field-level errors, empty unless this is a validation failure
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            Self::Validation { errors, .. } => errors,
            _ => &[],
        }
    }
}
