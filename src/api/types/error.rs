//! Failed action responses
//!
//! [`ActionError`] carries the HTTP status chosen for a [`DomainError`]
//! variant and renders as a failure envelope.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{debug, error};

use super::envelope::Envelope;
use crate::domain::{DomainError, FieldError};

/// Failed action: status plus a `success: false` envelope
#[derive(Debug)]
pub struct ActionError {
    pub status: StatusCode,
    pub message: String,
    pub errors: Vec<FieldError>,
}

impl ActionError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            errors: Vec::new(),
        }
    }

    pub fn with_errors(mut self, errors: Vec<FieldError>) -> Self {
        self.errors = errors;
        self
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, message)
    }

    pub fn bad_gateway(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_GATEWAY, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl IntoResponse for ActionError {
    fn into_response(self) -> Response {
        let envelope: Envelope<()> = Envelope::failure(self.message, self.errors);
        (self.status, Json(envelope)).into_response()
    }
}

impl From<DomainError> for ActionError {
    fn from(err: DomainError) -> Self {
        debug!(error = %err, "Action rejected");

        match err {
            DomainError::NotFound { message } => Self::not_found(message),
            DomainError::Validation { message, errors } => {
                Self::bad_request(message).with_errors(errors)
            }
            DomainError::Conflict { message } | DomainError::InvalidState { message } => {
                Self::conflict(message)
            }
            DomainError::Provider { provider, message } => {
                error!(provider = %provider, error = %message, "External provider failed");
                Self::bad_gateway(format!("{}: {}", provider, message))
            }
            DomainError::Configuration { message } | DomainError::Internal { message } => {
                error!(error = %message, "Action failed");
                Self::internal(message)
            }
        }
    }
}

impl std::fmt::Display for ActionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.status, self.message)
    }
}

impl std::error::Error for ActionError {}
