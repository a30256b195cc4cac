//! API key entity and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::storage::{StorageEntity, StorageKey};
use crate::domain::DomainError;

/// API key identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApiKeyId(String);

impl ApiKeyId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh random identifier (`key_<uuid>`)
    pub fn generate() -> Self {
        Self(format!("key_{}", uuid::Uuid::new_v4().simple()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ApiKeyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StorageKey for ApiKeyId {
    fn as_str(&self) -> &str {
        &self.0
    }
}

/// Status of an API key
///
/// Revocation is terminal; there is no way back to `Active`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ApiKeyStatus {
    #[default]
    Active,
    Revoked,
}

impl std::fmt::Display for ApiKeyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Revoked => write!(f, "revoked"),
        }
    }
}

/// API key record
///
/// Only the hash of the full token is kept. The token itself is handed out
/// once by the service at creation time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiKey {
    id: ApiKeyId,
    name: String,
    key_prefix: String,
    secret_hash: String,
    status: ApiKeyStatus,
    permissions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    expires_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_used_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl ApiKey {
    pub fn new(
        id: ApiKeyId,
        name: impl Into<String>,
        secret_hash: impl Into<String>,
        key_prefix: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            key_prefix: key_prefix.into(),
            secret_hash: secret_hash.into(),
            status: ApiKeyStatus::Active,
            permissions: Vec::new(),
            expires_at: None,
            last_used_at: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_permissions(mut self, permissions: Vec<String>) -> Self {
        self.permissions = permissions;
        self
    }

    pub fn with_expiration(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    pub fn with_last_used_at(mut self, last_used_at: DateTime<Utc>) -> Self {
        self.last_used_at = Some(last_used_at);
        self
    }

    // Getters

    pub fn id(&self) -> &ApiKeyId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn key_prefix(&self) -> &str {
        &self.key_prefix
    }

    pub fn secret_hash(&self) -> &str {
        &self.secret_hash
    }

    pub fn status(&self) -> ApiKeyStatus {
        self.status
    }

    pub fn permissions(&self) -> &[String] {
        &self.permissions
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }

    pub fn last_used_at(&self) -> Option<DateTime<Utc>> {
        self.last_used_at
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|expires| expires <= Utc::now())
    }

    /// Active and not past its expiry
    pub fn is_usable(&self) -> bool {
        self.status == ApiKeyStatus::Active && !self.is_expired()
    }

    // Mutators

    pub fn revoke(&mut self) -> Result<(), DomainError> {
        if self.status == ApiKeyStatus::Revoked {
            return Err(DomainError::invalid_state(format!(
                "API key '{}' is already revoked",
                self.id
            )));
        }

        self.status = ApiKeyStatus::Revoked;
        Ok(())
    }

    pub fn record_usage(&mut self) {
        self.last_used_at = Some(Utc::now());
    }
}

impl StorageEntity for ApiKey {
    type Key = ApiKeyId;

    fn key(&self) -> &Self::Key {
        &self.id
    }
}
