//! API key domain

mod entity;
mod validation;

pub use entity::{ApiKey, ApiKeyId, ApiKeyStatus};
pub use validation::{CreateApiKeyRequest, validate_permission};
